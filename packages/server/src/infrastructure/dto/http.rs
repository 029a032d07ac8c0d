//! HTTP API request/response DTOs for the chat application.

use serde::{Deserialize, Serialize};

use crate::domain::{ChatMessage, Participant};

/// Body of `POST /participants`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterParticipantRequest {
    pub name: Option<String>,
}

/// Body of `POST /messages`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub to: Option<String>,
    pub text: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

/// Query of `GET /messages`
///
/// `limit` stays a string so that non-numeric values reach validation
/// instead of failing extraction.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListMessagesQuery {
    pub limit: Option<String>,
}

/// Participant entry for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub name: String,
    /// Unix timestamp (milliseconds since epoch)
    pub last_status: i64,
}

impl From<Participant> for ParticipantDto {
    fn from(participant: Participant) -> Self {
        Self {
            name: participant.name.into_string(),
            last_status: participant.last_status.value(),
        }
    }
}

/// Message entry for list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub from: String,
    pub to: String,
    pub text: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub time: String, // HH:MM:SS
}

impl From<ChatMessage> for MessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id.to_string(),
            from: message.from.into_string(),
            to: message.to.as_str().to_string(),
            text: message.text.as_str().to_string(),
            kind: message.kind.as_str().to_string(),
            time: message.time,
        }
    }
}

/// Unfiltered room state for the debug endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugStateDto {
    pub participants: Vec<ParticipantDto>,
    pub messages: Vec<MessageDto>,
}
