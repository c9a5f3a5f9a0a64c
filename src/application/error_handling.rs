// src/application/error_handling.rs
//
// Error Handling for Commands
//
// ARCHITECTURE:
// - Maps internal errors → caller-friendly responses
// - Provides consistent error format for the moderation UI
// - Never exposes store internals
// - Logs store faults for debugging

use serde::{Deserialize, Serialize};

use crate::error::{AppError, ErrorKind};

/// Standard error response for the UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Comment, post or user does not exist (404)
    NotFound,

    /// Invalid input or invariant violation (400)
    Validation,

    /// Duplicate match or constraint violation (409)
    Conflict,

    /// Database or pool failure (503)
    StoreUnavailable,

    /// Anything else (500)
    Internal,
}

impl From<ErrorKind> for ErrorType {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::NotFound => ErrorType::NotFound,
            ErrorKind::Validation => ErrorType::Validation,
            ErrorKind::Conflict => ErrorType::Conflict,
            ErrorKind::StoreUnavailable => ErrorType::StoreUnavailable,
            ErrorKind::Internal => ErrorType::Internal,
        }
    }
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        let error_type = ErrorType::from(error.kind());

        match error_type {
            ErrorType::NotFound => Self {
                success: false,
                error_type,
                message: error.to_string(),
                details: None,
            },

            ErrorType::Validation => Self {
                success: false,
                error_type,
                message: "Validation failed".to_string(),
                details: Some(error.to_string()),
            },

            ErrorType::Conflict => {
                log::warn!("conflict: {}", error);

                Self {
                    success: false,
                    error_type,
                    message: "The change conflicts with stored data".to_string(),
                    details: None,
                }
            }

            ErrorType::StoreUnavailable => {
                log::error!("store fault: {:?}", error);

                Self {
                    success: false,
                    error_type,
                    message: "Database operation failed".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            ErrorType::Internal => {
                log::error!("internal error: {:?}", error);

                Self {
                    success: false,
                    error_type,
                    message: "Internal error".to_string(),
                    details: None,
                }
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn test_not_found_error() {
        let error = ErrorResponse::from_app_error(AppError::not_found("comment 3"));
        assert!(!error.success);
        assert_eq!(error.error_type, ErrorType::NotFound);
        assert_eq!(error.message, "Not found: comment 3");
    }

    #[test]
    fn test_domain_error_is_validation_with_details() {
        let error = ErrorResponse::from_app_error(AppError::Domain(
            DomainError::InvariantViolation("Parent comment id must be positive".to_string()),
        ));
        assert_eq!(error.error_type, ErrorType::Validation);
        assert!(error.details.unwrap().contains("must be positive"));
    }

    #[test]
    fn test_store_fault_hides_detail() {
        let error = ErrorResponse::from_app_error(AppError::Pool("connection refused".to_string()));
        assert_eq!(error.error_type, ErrorType::StoreUnavailable);
        assert!(!error.message.contains("refused"));
        assert!(!error.details.unwrap().contains("refused"));
    }

    #[test]
    fn test_conflict_error() {
        let error = ErrorResponse::from_app_error(AppError::Conflict("more than one comment matched".to_string()));
        assert_eq!(error.error_type, ErrorType::Conflict);
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::validation("Unknown comment status: hidden".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"validation\""));
        assert!(json.contains("\"success\":false"));
    }
}
