use serde::Deserialize;
use thiserror::Error;

/// Message shown when a failure response carries no usable message,
/// and for transport-level failures with no response at all.
pub const GENERIC_AUTH_MESSAGE: &str = "Something went wrong";

#[derive(Error, Debug)]
pub enum ApiError {
    /// Application-level rejection from the identity endpoint.
    #[error("{0}")]
    Auth(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Failure body shape: `{ "error": { "message": "..." } }`, message optional.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Build an error from a non-success response body.
    ///
    /// Any HTTP failure from the endpoint is treated as an application-level
    /// rejection; bodies that don't parse (HTML error pages, empty 5xx
    /// responses) fall back to the generic message.
    pub fn from_failure(body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error)
            .and_then(|e| e.message)
            .filter(|m| !m.is_empty());
        ApiError::Auth(message.unwrap_or_else(|| GENERIC_AUTH_MESSAGE.to_string()))
    }

    /// The string a user-facing alert should carry for this error.
    /// Transport and parse failures are not shown verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Auth(message) => message.clone(),
            _ => GENERIC_AUTH_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_failure_with_message() {
        let err = ApiError::from_failure(r#"{"error": {"message": "Invalid credentials"}}"#);
        assert_eq!(err.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_from_failure_without_message() {
        assert_eq!(
            ApiError::from_failure(r#"{"error": {}}"#).user_message(),
            GENERIC_AUTH_MESSAGE
        );
        assert_eq!(ApiError::from_failure("{}").user_message(), GENERIC_AUTH_MESSAGE);
    }

    #[test]
    fn test_from_failure_unparseable_body() {
        let err = ApiError::from_failure("<html>502 Bad Gateway</html>");
        assert_eq!(err.user_message(), GENERIC_AUTH_MESSAGE);
    }

    #[test]
    fn test_from_failure_empty_message() {
        let err = ApiError::from_failure(r#"{"error": {"message": ""}}"#);
        assert_eq!(err.user_message(), GENERIC_AUTH_MESSAGE);
    }
}
