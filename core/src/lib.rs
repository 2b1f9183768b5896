pub mod consent;
pub mod config;
pub mod conversation;
pub mod error;
pub mod output;
pub mod reply;
pub mod state;

// Re-exports for convenience
pub use config::Config;
pub use consent::ConsentGate;
pub use conversation::ConversationEngine;
pub use error::{CoachError, Result};
