//! Domain factories for creating domain entities and value objects.

use super::MessageId;

/// Factory for generating MessageId instances.
///
/// Keeps id generation out of the value object so that `MessageId` stays a
/// plain value and tests can build messages with fixed ids.
pub struct MessageIdFactory;

impl MessageIdFactory {
    /// Generate a new MessageId with a random UUID v4.
    pub fn generate() -> MessageId {
        MessageId::from_uuid(uuid::Uuid::new_v4())
    }
}
