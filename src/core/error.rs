//! Client-side error taxonomy
//!
//! Every fallible operation of the session layer and the typed API clients
//! returns [`SessionError`]. Credential and validation errors are meant to
//! be shown inline by the initiating form, everything else ends up in a
//! toast through [`SessionError::user_message`].

use crate::core::auth::{ClaimsError, StorageError};
use crate::core::http::{ApiResponse, TransportError};

/// Message shown when the backend did not send anything usable
pub const GENERIC_ERROR_MESSAGE: &str = "Une erreur est survenue, veuillez réessayer plus tard.";

/// Session and API error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An account already exists for this email")]
    DuplicateAccount,

    #[error("Refresh token invalid or expired")]
    RefreshTokenInvalid,

    #[error("A token refresh is already in progress")]
    RefreshInProgress,

    #[error("No refresh token stored")]
    NoRefreshToken,

    #[error("Social login failed: {0}")]
    SocialLogin(String),

    #[error("Server error ({status})")]
    ServerError {
        status: u16,
        message: Option<String>,
    },

    #[error("Request failed ({status})")]
    Unexpected {
        status: u16,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl SessionError {
    /// Map a non-success response from a regular endpoint
    pub fn from_response(response: &ApiResponse) -> Self {
        let message = response.error_message();
        match response.status {
            500..=599 => SessionError::ServerError {
                status: response.status,
                message,
            },
            status => SessionError::Unexpected { status, message },
        }
    }

    /// Map a non-success response from the sign-in or sign-up endpoints
    pub fn from_credentials_response(response: &ApiResponse) -> Self {
        match response.status {
            401 | 403 => SessionError::InvalidCredentials,
            409 => SessionError::DuplicateAccount,
            _ => Self::from_response(response),
        }
    }

    /// Whether the error should be shown next to the form that caused it
    pub fn is_form_error(&self) -> bool {
        matches!(
            self,
            SessionError::InvalidCredentials
                | SessionError::DuplicateAccount
                | SessionError::Validation(_)
        )
    }

    /// Human-readable message for notifications and inline form errors
    pub fn user_message(&self) -> String {
        match self {
            SessionError::InvalidCredentials => "Email ou mot de passe incorrect.".to_string(),
            SessionError::DuplicateAccount => "Un compte existe déjà avec cet email.".to_string(),
            SessionError::RefreshTokenInvalid | SessionError::NoRefreshToken => {
                "Votre session a expiré, veuillez vous reconnecter.".to_string()
            }
            SessionError::SocialLogin(message) | SessionError::Validation(message) => {
                message.clone()
            }
            SessionError::ServerError { message, .. } | SessionError::Unexpected { message, .. } => {
                message
                    .clone()
                    .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string())
            }
            SessionError::RefreshInProgress
            | SessionError::NetworkError(_)
            | SessionError::Storage(_)
            | SessionError::Decode(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<TransportError> for SessionError {
    fn from(err: TransportError) -> Self {
        SessionError::NetworkError(err.to_string())
    }
}

impl From<StorageError> for SessionError {
    fn from(err: StorageError) -> Self {
        SessionError::Storage(err.to_string())
    }
}

impl From<ClaimsError> for SessionError {
    fn from(err: ClaimsError) -> Self {
        SessionError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(err: serde_json::Error) -> Self {
        SessionError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse::new(status, body)
    }

    // ========================================================================
    // Status Mapping Tests
    // ========================================================================

    #[test]
    fn test_credentials_response_unauthorized() {
        let err = SessionError::from_credentials_response(&response(401, ""));
        assert_eq!(err, SessionError::InvalidCredentials);

        let err = SessionError::from_credentials_response(&response(403, ""));
        assert_eq!(err, SessionError::InvalidCredentials);
    }

    #[test]
    fn test_credentials_response_conflict() {
        let err = SessionError::from_credentials_response(&response(409, ""));
        assert_eq!(err, SessionError::DuplicateAccount);
    }

    #[test]
    fn test_server_error_keeps_backend_message() {
        let err = SessionError::from_response(&response(
            503,
            r#"{"statusCode":503,"message":"Maintenance en cours"}"#,
        ));

        assert_eq!(
            err,
            SessionError::ServerError {
                status: 503,
                message: Some("Maintenance en cours".to_string()),
            }
        );
        assert_eq!(err.user_message(), "Maintenance en cours");
    }

    #[test]
    fn test_unexpected_status_without_payload() {
        let err = SessionError::from_response(&response(404, "not json"));

        assert_eq!(
            err,
            SessionError::Unexpected {
                status: 404,
                message: None,
            }
        );
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    // ========================================================================
    // User Message Tests
    // ========================================================================

    #[test]
    fn test_network_error_uses_fallback() {
        let err = SessionError::NetworkError("connection refused".to_string());
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_form_errors() {
        assert!(SessionError::InvalidCredentials.is_form_error());
        assert!(SessionError::DuplicateAccount.is_form_error());
        assert!(SessionError::Validation("bad".to_string()).is_form_error());
        assert!(!SessionError::RefreshTokenInvalid.is_form_error());
        assert!(!SessionError::NetworkError("x".to_string()).is_form_error());
    }
}
