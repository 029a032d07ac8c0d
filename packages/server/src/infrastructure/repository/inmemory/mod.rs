//! インメモリ実装

mod message;
mod participant;

pub use message::InMemoryMessageRepository;
pub use participant::InMemoryParticipantRepository;
