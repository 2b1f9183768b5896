//! Append-only transcript
//!
//! Owned by the engine; the only way a turn gets in is through a submit or
//! a finished reply. Insertion order is display order.

use super::turn::Turn;

#[derive(Debug, Default)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn. Crate-private so hosts cannot bypass the engine.
    pub(crate) fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// All turns in insertion order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Most recent turn, if any
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }
}
