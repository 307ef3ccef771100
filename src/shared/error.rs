//! Forum Error Types
//!
//! This module defines the error taxonomy every forum operation reports.
//! Storage-layer failures are translated into these kinds before they leave
//! the stores, so raw database text never reaches a caller.
//!
//! # Error Categories
//!
//! - `Validation` - A required field is missing or empty (re-prompt the form)
//! - `Conflict` - Username or email already taken (re-prompt the form)
//! - `Authentication` - Bad credentials; never says which part was wrong
//! - `Reference` - A referenced user or post does not exist (caller bug or race)
//! - `NotFound` - The requested entity is absent
//! - `NotAuthenticated` - A guarded operation was attempted anonymously
//! - `Unavailable` - Transient storage failure (timeout, lost connection)
//! - `Internal` - Anything else that went wrong on our side
//!
//! # Usage
//!
//! ```rust
//! use agora_forum::shared::error::ForumError;
//!
//! let error = ForumError::validation("title", "Title is required");
//! assert_eq!(error.public_message(), "Title is required");
//! ```
use thiserror::Error;

/// Generic message for every credential failure
pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

/// Generic message for registration collisions
pub const ACCOUNT_TAKEN: &str = "Username or email already taken";

/// Errors reported by forum operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ForumError {
    /// Missing or empty required field
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Uniqueness violation
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Unknown username or wrong password
    #[error("{}", INVALID_CREDENTIALS)]
    Authentication,

    /// Dangling foreign key at creation time
    #[error("Reference to missing {entity}")]
    Reference {
        /// Kind of the missing entity
        entity: String,
    },

    /// Requested entity does not exist
    #[error("{entity} not found")]
    NotFound {
        /// Kind of the missing entity
        entity: String,
    },

    /// Guarded operation without an authenticated session
    #[error("Authentication required")]
    NotAuthenticated,

    /// Transient storage failure; the caller may retry
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Internal detail, logged only
        message: String,
    },

    /// Unexpected failure
    #[error("Internal error: {message}")]
    Internal {
        /// Internal detail, logged only
        message: String,
    },
}

impl ForumError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create the registration conflict error
    pub fn account_taken() -> Self {
        Self::Conflict {
            message: ACCOUNT_TAKEN.to_string(),
        }
    }

    /// Create a new reference error
    pub fn reference(entity: impl Into<String>) -> Self {
        Self::Reference {
            entity: entity.into(),
        }
    }

    /// Create a new not-found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
        }
    }

    /// Create a new transient storage error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether retrying the same operation may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. })
    }

    /// Message that is safe to show to the end user
    ///
    /// Storage and internal detail is replaced with a generic text.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::Conflict { message } => message.clone(),
            Self::Authentication => INVALID_CREDENTIALS.to_string(),
            Self::Reference { .. } | Self::Internal { .. } => {
                "Something went wrong, please try again later".to_string()
            }
            Self::NotFound { entity } => format!("{} not found", entity),
            Self::NotAuthenticated => "Please log in first".to_string(),
            Self::Unavailable { .. } => {
                "The forum is temporarily unavailable, please retry".to_string()
            }
        }
    }
}

/// Fail with a validation error when `value` is empty or only whitespace
pub fn require(field: &str, value: &str, message: &str) -> Result<(), ForumError> {
    if value.trim().is_empty() {
        Err(ForumError::validation(field, message))
    } else {
        Ok(())
    }
}
