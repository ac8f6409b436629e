use crate::game::RecordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Stats API returned status {status} for {url}")]
    ApiStatus { status: u16, url: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Team not found in the stats API: '{0}'")]
    TeamNotFound(String),

    #[error("Unknown franchise: '{0}'. Use a full team name, e.g. \"Vancouver Canucks\"")]
    UnknownFranchise(String),

    #[error("No team directory available offline. Run once online to populate the cache")]
    DirectoryUnavailable,

    #[error("Invalid game record: {0}")]
    Record(#[from] RecordError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Log setup error: {0}")]
    LogSetup(String),
}

impl AppError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_response(msg: impl Into<String>) -> Self {
        Self::InvalidResponse(msg.into())
    }
}

impl From<ureq::Error> for AppError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(status, response) => Self::ApiStatus {
                status,
                url: response.get_url().to_string(),
            },
            ureq::Error::Transport(t) => Self::Network(t.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_error_wraps() {
        let err: AppError = RecordError::MissingDate { index: 7 }.into();
        assert_eq!(err.to_string(), "Invalid game record: record 7: missing game date");
    }

    #[test]
    fn test_config_error_message() {
        let err = AppError::config_error("--from must not exceed --to");
        assert_eq!(err.to_string(), "Configuration error: --from must not exceed --to");
    }
}
