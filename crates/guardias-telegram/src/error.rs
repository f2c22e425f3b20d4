use thiserror::Error;

#[derive(Debug, Error)]
pub enum TelegramError {
    /// Transport or decode failure. The request URL is stripped so the bot
    /// token never reaches the logs.
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("Bot API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Bot API returned ok without a result for {0}")]
    MissingResult(String),
}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Http(err.without_url())
    }
}
