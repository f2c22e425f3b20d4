use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{ApiResponse, GetUpdatesParams, Message, SendMessageParams, Update, User};
use crate::{Result, TelegramError};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Seconds the server may hold a `getUpdates` call open.
pub const POLL_TIMEOUT_SECS: u64 = 30;

// ─── BotClient ────────────────────────────────────────────────────────────

/// Thin Bot API client: one `POST <api>/bot<token>/<method>` per call with a
/// JSON body.
#[derive(Clone)]
pub struct BotClient {
    http: reqwest::Client,
    base: String,
}

impl std::fmt::Debug for BotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotClient").finish_non_exhaustive()
    }
}

impl BotClient {
    pub fn new(token: &str) -> Result<Self> {
        Self::with_api_url(DEFAULT_API_URL, token)
    }

    /// Point the client at another Bot API server (local server, test mock).
    pub fn with_api_url(api_url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .build()?;
        Ok(Self {
            http,
            base: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }

    pub async fn get_me(&self) -> Result<User> {
        self.call("getMe", &serde_json::json!({})).await
    }

    /// Long-poll for updates with id >= `offset`. Passing an offset confirms
    /// every earlier update, so the server drops them.
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u64) -> Result<Vec<Update>> {
        let params = GetUpdatesParams {
            offset,
            timeout: timeout_secs,
            allowed_updates: vec!["message"],
        };
        self.call("getUpdates", &params).await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        self.call("sendMessage", &SendMessageParams { chat_id, text })
            .await
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        // Error replies (4xx) still carry the JSON envelope, so the status
        // code is not checked separately.
        let response = self
            .http
            .post(format!("{}/{}", self.base, method))
            .json(params)
            .send()
            .await?;
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.ok {
            return Err(TelegramError::Api {
                code: envelope.error_code.unwrap_or_default(),
                description: envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }
        envelope
            .result
            .ok_or_else(|| TelegramError::MissingResult(method.to_string()))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────
