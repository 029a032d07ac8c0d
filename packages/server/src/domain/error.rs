//! Domain layer error definitions.

use thiserror::Error;

/// Errors related to Value Objects validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    /// ParticipantName validation error
    #[error("name cannot be empty")]
    ParticipantNameEmpty,

    /// ParticipantName has leading or trailing whitespace
    #[error("name cannot start or end with whitespace (got: '{0}')")]
    ParticipantNameUntrimmed(String),

    /// ParticipantName too long error
    #[error("name cannot exceed {max} characters (got {actual})")]
    ParticipantNameTooLong { max: usize, actual: usize },

    /// ParticipantName collides with the broadcast token
    #[error("name '{0}' is reserved")]
    ParticipantNameReserved(String),

    /// Recipient validation error
    #[error("to cannot be empty")]
    RecipientEmpty,

    /// MessageText validation error
    #[error("text cannot be empty")]
    MessageTextEmpty,

    /// MessageText too long error
    #[error("text cannot exceed {max} characters (got {actual})")]
    MessageTextTooLong { max: usize, actual: usize },

    /// Unknown or non user-postable message type
    #[error("type must be one of 'message' or 'private_message' (got: {0})")]
    MessageTypeInvalid(String),

    /// Limit is not a positive integer
    #[error("limit must be a positive integer (got: {0})")]
    MessageLimitInvalid(String),
}

/// Errors raised by the store adapter
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Conditional insert found an existing record with the same key
    #[error("participant '{0}' already exists")]
    AlreadyExists(String),

    /// Point lookup or update found no record
    #[error("participant '{0}' not found")]
    NotFound(String),

    /// Underlying store failure
    #[error("store error: {0}")]
    Storage(String),
}
