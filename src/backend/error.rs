use thiserror::Error;

/// Failures talking to the prediction service.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BackendError {
    /// The configured base URL cannot be used to build endpoints.
    #[error("Invalid backend URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Connection, DNS, TLS or timeout failure.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// Non-success HTTP status with the server's `detail`.
    #[error("HTTP {code}: {detail}")]
    Status { code: u16, detail: String },
    /// The response body was not the expected JSON.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl BackendError {
    /// Text for a modal alert. Server-side rejections quote the server detail
    /// verbatim; other failures name the action that failed.
    pub fn alert_text(&self, action: &str) -> String {
        match self {
            Self::Status { detail, .. } => format!("Error: {detail}"),
            other => format!("Error {action}. {other}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_alert_quotes_detail() {
        let err = BackendError::Status {
            code: 400,
            detail: "Machine ID already exists".into(),
        };
        assert_eq!(
            err.alert_text("adding machine"),
            "Error: Machine ID already exists"
        );
    }

    #[test]
    fn transport_alert_names_action() {
        let err = BackendError::Transport("connection refused".into());
        assert_eq!(
            err.alert_text("loading machine details"),
            "Error loading machine details. HTTP error: connection refused"
        );
    }
}
