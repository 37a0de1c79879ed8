use store::StorageError;
use thiserror::Error;

use crate::session::SessionError;
use crate::validation::ValidationErrors;

/// Shown when the backend gives no usable message.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

/// Every failure a service call can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),
    /// Non-2xx answer other than 401.
    #[error("{message} (HTTP {status})")]
    Http { status: u16, message: String },
    /// 401 on an authenticated call. Credentials are already cleared.
    #[error("session expired")]
    Unauthorized,
    /// The body did not match any known shape.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// The draft failed client-side checks; nothing was sent.
    #[error("{0}")]
    Validation(ValidationErrors),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// Text suitable for a toast.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Unauthorized => "Your session has expired. Please sign in again.".to_string(),
            ApiError::Network(_) => "Unable to reach the server.".to_string(),
            ApiError::Validation(errors) => errors.to_string(),
            _ => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let err = ApiError::Http {
            status: 409,
            message: "Email already used".to_string(),
        };
        assert_eq!(err.user_message(), "Email already used");
        assert_eq!(err.status(), Some(409));

        let err = ApiError::Http {
            status: 500,
            message: String::new(),
        };
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
        assert_eq!(ApiError::Decode("x".into()).user_message(), GENERIC_ERROR_MESSAGE);
        assert!(ApiError::Unauthorized.is_unauthorized());
    }
}
