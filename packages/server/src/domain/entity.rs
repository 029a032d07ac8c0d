//! Core domain models for the chat application.

use roomchat_shared::time::timestamp_to_local_hms;

use super::value_object::{
    MessageId, MessageText, MessageType, ParticipantName, Recipient, Timestamp,
};

/// Text of the status message appended when a participant registers
pub const JOINED_TEXT: &str = "joined";

/// Text of the status message appended when a participant expires
pub const LEFT_TEXT: &str = "left";

/// Represents a participant currently present in the room
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    /// Participant name (unique key)
    pub name: ParticipantName,
    /// Timestamp of registration or last heartbeat
    pub last_status: Timestamp,
}

impl Participant {
    /// Create a new participant
    pub fn new(name: ParticipantName, last_status: Timestamp) -> Self {
        Self { name, last_status }
    }

    /// Record a heartbeat. `last_status` never moves backwards.
    pub fn touch(&mut self, at: Timestamp) {
        self.last_status = self.last_status.max(at);
    }

    /// Whether the last heartbeat is strictly older than `cutoff`
    pub fn is_inactive_since(&self, cutoff: Timestamp) -> bool {
        self.last_status < cutoff
    }
}

/// Represents a message in the room log
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Server-assigned identifier
    pub id: MessageId,
    /// Sender's participant name
    pub from: ParticipantName,
    /// Recipient (whole room or one participant)
    pub to: Recipient,
    /// Message body
    pub text: MessageText,
    /// Message kind
    pub kind: MessageType,
    /// Insertion timestamp
    pub sent_at: Timestamp,
    /// `HH:MM:SS` rendering of `sent_at`, fixed at insertion
    pub time: String,
}

impl ChatMessage {
    /// Create a new chat message
    pub fn new(
        id: MessageId,
        from: ParticipantName,
        to: Recipient,
        text: MessageText,
        kind: MessageType,
        sent_at: Timestamp,
    ) -> Self {
        Self {
            id,
            from,
            to,
            text,
            kind,
            sent_at,
            time: timestamp_to_local_hms(sent_at.value()),
        }
    }

    /// Status notice broadcast when `name` joins the room
    pub fn joined(id: MessageId, name: ParticipantName, at: Timestamp) -> Self {
        Self::status(id, name, JOINED_TEXT, at)
    }

    /// Status notice broadcast when `name` is removed for inactivity
    pub fn left(id: MessageId, name: ParticipantName, at: Timestamp) -> Self {
        Self::status(id, name, LEFT_TEXT, at)
    }

    fn status(id: MessageId, name: ParticipantName, text: &str, at: Timestamp) -> Self {
        Self {
            id,
            from: name,
            to: Recipient::Everyone,
            text: MessageText(text.to_string()),
            kind: MessageType::Status,
            sent_at: at,
            time: timestamp_to_local_hms(at.value()),
        }
    }

    /// Visibility rule for reads.
    ///
    /// Public messages are visible to everyone, including anonymous viewers.
    /// Private messages are visible only to their sender and recipient.
    /// Status notices are kept in the log but never returned to readers.
    pub fn is_visible_to(&self, viewer: Option<&ParticipantName>) -> bool {
        match self.kind {
            MessageType::Message => true,
            MessageType::PrivateMessage => {
                viewer.is_some_and(|v| &self.from == v || self.to.is(v))
            }
            MessageType::Status => false,
        }
    }
}
