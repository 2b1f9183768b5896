//! Turn lifecycle state machine
//!
//! One submission is in flight at a time. `submit` appends the user turn
//! and hands the caller a delay; the caller schedules it however it likes
//! and calls `finish_reply` when it elapses. The engine never owns a timer.

use rand::Rng;
use std::time::Duration;

use super::transcript::Transcript;
use super::turn::Turn;
use crate::consent::ConsentGate;
use crate::reply::select_reply;

/// Default lower bound of the reply delay, in milliseconds
pub const DEFAULT_MIN_DELAY_MS: u64 = 1000;
/// Default upper bound (exclusive) of the reply delay, in milliseconds
pub const DEFAULT_MAX_DELAY_MS: u64 = 2000;

/// Whether a submission is currently waiting on its reply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendGate {
    /// Ready to accept a submission
    Idle,
    /// A reply is scheduled; submissions are ignored
    AwaitingReply,
}

/// Why a submission was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Consent has not been granted
    ConsentRequired,
    /// A previous submission is still waiting on its reply
    ReplyPending,
    /// Input was empty after trimming
    EmptyInput,
}

/// Result of a submission attempt
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The user turn was appended; deliver the reply after `delay`
    Accepted { turn: Turn, delay: Duration },
    /// Nothing happened
    Ignored(IgnoreReason),
}

pub struct ConversationEngine {
    transcript: Transcript,
    gate: SendGate,
    pending_input: Option<String>,
    min_delay_ms: u64,
    max_delay_ms: u64,
}

impl ConversationEngine {
    pub fn new() -> Self {
        Self {
            transcript: Transcript::new(),
            gate: SendGate::Idle,
            pending_input: None,
            min_delay_ms: DEFAULT_MIN_DELAY_MS,
            max_delay_ms: DEFAULT_MAX_DELAY_MS,
        }
    }

    /// Override the reply delay range, `[min, max)` in milliseconds
    pub fn with_pacing(mut self, min_delay_ms: u64, max_delay_ms: u64) -> Self {
        self.min_delay_ms = min_delay_ms;
        self.max_delay_ms = max_delay_ms;
        self
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn gate(&self) -> SendGate {
        self.gate
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.gate == SendGate::AwaitingReply
    }

    /// Whether the input surface accepts a submission right now
    ///
    /// Both dimensions gate it: consent, and no reply in flight.
    pub fn can_send(&self, consent: &ConsentGate) -> bool {
        consent.granted() && self.gate == SendGate::Idle
    }

    /// Try to submit user input
    ///
    /// Checks run in order: consent, pending reply, emptiness after trim.
    /// A failed check changes nothing. On success the trimmed text becomes
    /// a user turn and the engine waits for `finish_reply`.
    pub fn submit(&mut self, raw: &str, consent: &ConsentGate) -> SubmitOutcome {
        if !consent.granted() {
            return SubmitOutcome::Ignored(IgnoreReason::ConsentRequired);
        }
        if self.gate == SendGate::AwaitingReply {
            return SubmitOutcome::Ignored(IgnoreReason::ReplyPending);
        }

        let text = raw.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }

        let turn = Turn::user(text);
        self.transcript.push(turn.clone());
        self.pending_input = Some(text.to_string());
        self.gate = SendGate::AwaitingReply;

        SubmitOutcome::Accepted {
            turn,
            delay: self.sample_delay(),
        }
    }

    /// Deliver the reply for the submission in flight
    ///
    /// Selects the canned response for the last submitted text, appends it
    /// and returns to `Idle`. Returns `None` when nothing is in flight.
    pub fn finish_reply(&mut self) -> Option<Turn> {
        if self.gate != SendGate::AwaitingReply {
            return None;
        }

        let input = self.pending_input.take().unwrap_or_default();
        let turn = Turn::assistant(select_reply(&input));
        self.transcript.push(turn.clone());
        self.gate = SendGate::Idle;

        Some(turn)
    }

    fn sample_delay(&self) -> Duration {
        if self.max_delay_ms <= self.min_delay_ms {
            return Duration::from_millis(self.min_delay_ms);
        }

        let ms = rand::thread_rng().gen_range(self.min_delay_ms..self.max_delay_ms);
        Duration::from_millis(ms)
    }
}

impl Default for ConversationEngine {
    fn default() -> Self {
        Self::new()
    }
}
