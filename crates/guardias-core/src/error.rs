use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardiasError {
    #[error("invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDateFormat(String),

    #[error("date {0} out of range: a seven-day shift must end by the last supported date")]
    DateOutOfRange(chrono::NaiveDate),

    #[error("invalid week count '{0}': must be a positive integer")]
    InvalidWeekCount(String),

    #[error("invalid month {0}: must be between 1 and 12")]
    InvalidMonth(u32),

    #[error("storage unavailable at {}: {source}", path.display())]
    StorageUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl GuardiasError {
    pub(crate) fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GuardiasError::StorageUnavailable {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, GuardiasError>;
