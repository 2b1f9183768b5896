//! Conversation model: turns, the transcript, and the turn machine

pub mod engine;
pub mod transcript;
pub mod turn;

pub use engine::{ConversationEngine, IgnoreReason, SendGate, SubmitOutcome};
pub use transcript::Transcript;
pub use turn::{Speaker, Turn};
