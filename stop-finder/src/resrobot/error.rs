//! ResRobot client error types.

/// Errors from the ResRobot HTTP client and other transit sources.
#[derive(Debug, thiserror::Error)]
pub enum ResRobotError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON parse error: {message}{}", body_suffix(.body))]
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Rate limited by the API
    #[error("rate limited by ResRobot API")]
    RateLimited,

    /// Invalid access id
    #[error("unauthorized: check RESROBOT_API_KEY")]
    Unauthorized,

    /// Operation not available from this source
    #[error("not configured: {0}")]
    NotConfigured(String),
}

fn body_suffix(body: &Option<String>) -> String {
    body.as_ref()
        .map(|b| format!(" (body: {b})"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = ResRobotError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = ResRobotError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert_eq!(
            err.to_string(),
            "JSON parse error: expected value (body: <html>)"
        );

        let err = ResRobotError::Json {
            message: "expected value".into(),
            body: None,
        };
        assert_eq!(err.to_string(), "JSON parse error: expected value");

        assert_eq!(
            ResRobotError::RateLimited.to_string(),
            "rate limited by ResRobot API"
        );
    }

    #[test]
    fn not_configured_display() {
        let err = ResRobotError::NotConfigured("journey detail".into());
        assert_eq!(err.to_string(), "not configured: journey detail");
    }
}
