//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod error;
pub mod expire_participants;
pub mod heartbeat;
pub mod list_messages;
pub mod list_participants;
pub mod register_participant;
pub mod send_message;

pub use error::{
    ExpireParticipantsError, HeartbeatError, ListMessagesError, ListParticipantsError,
    RegisterParticipantError, SendMessageError,
};
pub use expire_participants::ExpireParticipantsUseCase;
pub use heartbeat::HeartbeatUseCase;
pub use list_messages::ListMessagesUseCase;
pub use list_participants::ListParticipantsUseCase;
pub use register_participant::RegisterParticipantUseCase;
pub use send_message::SendMessageUseCase;
