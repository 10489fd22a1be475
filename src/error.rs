use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Fetch of {url} failed with status {}", display_status(.status))]
    Fetch { status: Option<u16>, url: String },
    #[error("Timed out waiting for {url}")]
    Timeout { url: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Selector error: {0}")]
    Selector(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl GameError {
    /// HTTP status carried by the error, if the upstream answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            GameError::Fetch { status, .. } => *status,
            GameError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }

    pub fn is_upstream(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }
}

fn display_status(status: &Option<u16>) -> String {
    status.map_or_else(|| "unknown".to_string(), |s| s.to_string())
}

pub type Result<T> = std::result::Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_keeps_status_for_mapping() {
        let err = GameError::Fetch {
            status: Some(404),
            url: "https://example.com/game/missing/".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(err.is_not_found());
        assert!(!err.is_upstream());
    }

    #[test]
    fn server_errors_count_as_upstream() {
        let err = GameError::Fetch {
            status: Some(503),
            url: "https://example.com/".to_string(),
        };
        assert!(err.is_upstream());
        assert!(!err.is_not_found());
    }

    #[test]
    fn errors_without_status_map_to_neither() {
        let err = GameError::Timeout {
            url: "https://example.com/".to_string(),
        };
        assert_eq!(err.status_code(), None);
        assert!(!err.is_not_found());
        assert!(!err.is_upstream());
    }

    #[test]
    fn unknown_status_is_rendered() {
        let err = GameError::Fetch {
            status: None,
            url: "https://example.com/".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Fetch of https://example.com/ failed with status unknown"
        );
    }
}
