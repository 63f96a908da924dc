use serde::Deserialize;
use thiserror::Error;

/// Failure of a backend call, as shown to the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("session expired, please sign in again")]
    Unauthorized,
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Error bodies the backend produces: `{"error": ..}` from the dashboard
/// views, `{"detail": ..}` from the framework's own checks
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    detail: Option<String>,
    message: Option<String>,
}

impl ApiError {
    pub fn from_response(status: u16, body: &str) -> ApiError {
        if status == 401 {
            return ApiError::Unauthorized;
        }

        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.error.or(b.detail).or(b.message))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty() && !trimmed.starts_with('<')).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| format!("request failed with status {status}"));

        ApiError::Status { status, message }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_field_becomes_message() {
        let err = ApiError::from_response(400, r#"{"error": "User is already active"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: "User is already active".into()
            }
        );
        assert_eq!(err.to_string(), "User is already active");
    }

    #[test]
    fn test_detail_field_is_used() {
        let err = ApiError::from_response(403, r#"{"detail": "You do not have permission."}"#);
        assert_eq!(err.to_string(), "You do not have permission.");
    }

    #[test]
    fn test_unauthorized() {
        assert!(ApiError::from_response(401, "").is_unauthorized());
    }

    #[test]
    fn test_html_body_falls_back_to_status_line() {
        let err = ApiError::from_response(502, "<html><body>Bad gateway</body></html>");
        assert_eq!(err.to_string(), "request failed with status 502");
        let err = ApiError::from_response(500, "");
        assert_eq!(err.to_string(), "request failed with status 500");
    }

    #[test]
    fn test_plain_text_body_is_kept() {
        let err = ApiError::from_response(409, "  order already delivered \n");
        assert_eq!(err.to_string(), "order already delivered");
    }
}
