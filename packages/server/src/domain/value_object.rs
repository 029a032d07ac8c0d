//! Value Objects for domain models.
//!
//! Value Objects are immutable objects that represent values in the domain.
//! They are compared by their value, not by identity.

use serde::{Deserialize, Serialize};
use std::{fmt, num::IntErrorKind, str::FromStr};

use super::error::ValueObjectError;

/// Reserved recipient token meaning "everyone in the room".
///
/// No participant may register under this name.
pub const BROADCAST_TARGET: &str = "Todos";

const PARTICIPANT_NAME_MAX_CHARS: usize = 100;
const MESSAGE_TEXT_MAX_CHARS: usize = 10000;

/// Participant name value object.
///
/// The name is the participant's primary key: there is no other identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantName(String);

impl ParticipantName {
    /// Create a new ParticipantName.
    ///
    /// # Arguments
    ///
    /// * `name` - The participant name string
    ///
    /// # Returns
    ///
    /// A Result containing the ParticipantName or an error if validation fails
    pub fn new(name: String) -> Result<Self, ValueObjectError> {
        if name.trim().is_empty() {
            return Err(ValueObjectError::ParticipantNameEmpty);
        }
        // Header values reach us trimmed; a padded name could never be matched.
        if name.trim() != name {
            return Err(ValueObjectError::ParticipantNameUntrimmed(name));
        }
        let len = name.chars().count();
        if len > PARTICIPANT_NAME_MAX_CHARS {
            return Err(ValueObjectError::ParticipantNameTooLong {
                max: PARTICIPANT_NAME_MAX_CHARS,
                actual: len,
            });
        }
        if name == BROADCAST_TARGET {
            return Err(ValueObjectError::ParticipantNameReserved(name));
        }
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert to owned String.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ParticipantName {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ParticipantName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message recipient: the whole room or a single participant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Recipient {
    Everyone,
    Participant(ParticipantName),
}

impl Recipient {
    /// Parse a raw `to` value. The broadcast token maps to [`Recipient::Everyone`].
    pub fn parse(to: String) -> Result<Self, ValueObjectError> {
        if to.trim().is_empty() {
            return Err(ValueObjectError::RecipientEmpty);
        }
        if to == BROADCAST_TARGET {
            return Ok(Self::Everyone);
        }
        ParticipantName::new(to).map(Self::Participant)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Everyone => BROADCAST_TARGET,
            Self::Participant(name) => name.as_str(),
        }
    }

    /// Whether this recipient is exactly the given participant.
    pub fn is(&self, name: &ParticipantName) -> bool {
        matches!(self, Self::Participant(p) if p == name)
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Message text value object.
///
/// Represents the body of a chat message with validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageText(pub(super) String);

impl MessageText {
    /// Create a new MessageText.
    ///
    /// # Arguments
    ///
    /// * `text` - The message body
    ///
    /// # Returns
    ///
    /// A Result containing the MessageText or an error if validation fails
    pub fn new(text: String) -> Result<Self, ValueObjectError> {
        if text.trim().is_empty() {
            return Err(ValueObjectError::MessageTextEmpty);
        }
        let len = text.chars().count();
        if len > MESSAGE_TEXT_MAX_CHARS {
            return Err(ValueObjectError::MessageTextTooLong {
                max: MESSAGE_TEXT_MAX_CHARS,
                actual: len,
            });
        }
        Ok(Self(text))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Kind of a stored message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Public message, visible to everyone.
    Message,
    /// Targeted message, visible to its sender and recipient only.
    PrivateMessage,
    /// System-generated join/leave notice.
    Status,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Message => "message",
            Self::PrivateMessage => "private_message",
            Self::Status => "status",
        }
    }

    /// Parse a type supplied by a participant. `status` is server-only.
    pub fn parse_user_supplied(value: &str) -> Result<Self, ValueObjectError> {
        match value.parse::<Self>()? {
            Self::Status => Err(ValueObjectError::MessageTypeInvalid(value.to_string())),
            kind => Ok(kind),
        }
    }
}

impl FromStr for MessageType {
    type Err = ValueObjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "message" => Ok(Self::Message),
            "private_message" => Ok(Self::PrivateMessage),
            "status" => Ok(Self::Status),
            other => Err(ValueObjectError::MessageTypeInvalid(other.to_string())),
        }
    }
}

impl fmt::Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Timestamp value object.
///
/// Represents a Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a new Timestamp from Unix milliseconds.
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the inner i64 value.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// The instant `millis` milliseconds before this one.
    pub fn minus_millis(&self, millis: i64) -> Self {
        Self(self.0.saturating_sub(millis))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Maximum number of messages returned by a read, taken from the tail of
/// the visible log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLimit(usize);

impl MessageLimit {
    /// Parse a raw query value. Only positive integers are accepted; values
    /// beyond `usize::MAX` saturate.
    pub fn parse(raw: &str) -> Result<Self, ValueObjectError> {
        match raw.trim().parse::<usize>() {
            Ok(n) if n > 0 => Ok(Self(n)),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(Self(usize::MAX)),
            _ => Err(ValueObjectError::MessageLimitInvalid(raw.to_string())),
        }
    }

    pub fn value(&self) -> usize {
        self.0
    }
}

/// Message identifier value object (UUID v4 string).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Create a MessageId from a UUID.
    pub fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
