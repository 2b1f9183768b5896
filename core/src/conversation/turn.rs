//! Turn types for the transcript
//!
//! A turn is one utterance by either side, stamped with the wall-clock
//! minute it was appended.

use chrono::{DateTime, Local, Timelike};

/// Side of the conversation a turn belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    /// Text typed by the user
    User,
    /// Canned response
    Assistant,
}

/// A single utterance in the conversation
#[derive(Debug, Clone)]
pub struct Turn {
    /// Who produced the text
    pub speaker: Speaker,
    /// The utterance, already trimmed
    pub text: String,
    /// Creation time, truncated to the minute
    pub stamp: DateTime<Local>,
}

impl Turn {
    /// Create a user turn stamped now
    pub fn user(text: impl Into<String>) -> Self {
        Turn {
            speaker: Speaker::User,
            text: text.into(),
            stamp: minute_stamp(),
        }
    }

    /// Create an assistant turn stamped now
    pub fn assistant(text: impl Into<String>) -> Self {
        Turn {
            speaker: Speaker::Assistant,
            text: text.into(),
            stamp: minute_stamp(),
        }
    }

    /// Display form of the stamp, `HH:MM`
    pub fn stamp_label(&self) -> String {
        self.stamp.format("%H:%M").to_string()
    }
}

/// Current local time with seconds and finer dropped
fn minute_stamp() -> DateTime<Local> {
    let now = Local::now();
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_creation() {
        let user_turn = Turn::user("自己PRをつくって");
        assert_eq!(user_turn.speaker, Speaker::User);
        assert_eq!(user_turn.text, "自己PRをつくって");

        let assistant_turn = Turn::assistant("どういたしまして！");
        assert_eq!(assistant_turn.speaker, Speaker::Assistant);
    }

    #[test]
    fn test_stamp_truncated_to_minute() {
        let turn = Turn::user("hello");
        assert_eq!(turn.stamp.second(), 0);
        assert_eq!(turn.stamp.nanosecond(), 0);
    }

    #[test]
    fn test_stamp_label_format() {
        let turn = Turn::user("hello");
        let expected = format!("{:02}:{:02}", turn.stamp.hour(), turn.stamp.minute());
        assert_eq!(turn.stamp_label(), expected);
    }
}
