//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, JOINED_TEXT, LEFT_TEXT, Participant};
pub use error::{RepositoryError, ValueObjectError};
pub use factory::MessageIdFactory;
pub use repository::{MessageRepository, ParticipantRepository};
pub use value_object::{
    BROADCAST_TARGET, MessageId, MessageLimit, MessageText, MessageType, ParticipantName,
    Recipient, Timestamp,
};
