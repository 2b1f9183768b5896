//! Widget state for the chat TUI
//!
//! Wraps the conversation engine and the consent gate together with the
//! pieces the renderer needs: the input buffer with its cursor, pane focus,
//! scroll positions and the terms overlay.

use std::time::Duration;

use prcoach_core::consent::{ConsentGate, Hint};
use prcoach_core::conversation::{ConversationEngine, SubmitOutcome, Transcript};
use prcoach_core::state::StateStore;
use prcoach_core::Config;

/// Tallest the input pane grows before it scrolls internally
const MAX_INPUT_LINES: usize = 5;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Transcript,
}

pub struct App {
    pub engine: ConversationEngine,
    pub consent: ConsentGate,

    /// Input buffer, may span multiple lines
    pub input: String,
    /// Cursor offset into `input`, counted in chars
    pub cursor_position: usize,

    pub focus: Focus,
    pub should_quit: bool,

    /// Transcript lines scrolled up from the bottom
    pub transcript_scroll: usize,
    /// Stick to the newest turn while at the bottom
    pub auto_scroll: bool,

    pub show_terms: bool,
    pub terms_scroll: u16,

    pub assistant_label: String,
}

impl App {
    pub fn new(config: &Config, store: StateStore) -> Self {
        let engine = ConversationEngine::new()
            .with_pacing(config.pacing.min_delay_ms, config.pacing.max_delay_ms);
        let (consent, _) = ConsentGate::initialize(store);

        Self {
            engine,
            consent,
            input: String::new(),
            cursor_position: 0,
            focus: Focus::Input,
            should_quit: false,
            transcript_scroll: 0,
            auto_scroll: true,
            show_terms: false,
            terms_scroll: 0,
            assistant_label: config.ui.assistant_label.clone(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        self.engine.transcript()
    }

    /// Whether the input surface takes keystrokes at all
    pub fn can_type(&self) -> bool {
        self.consent.granted()
    }

    /// Whether a submission would be accepted right now
    pub fn can_send(&self) -> bool {
        self.engine.can_send(&self.consent)
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.engine.is_awaiting_reply()
    }

    /// Hint line matching the current consent state
    pub fn hint(&self) -> Hint {
        self.consent.surface().hint
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Transcript,
            Focus::Transcript => Focus::Input,
        };
    }

    // Consent

    pub fn toggle_consent(&mut self) {
        let granted = self.consent.granted();
        self.consent.set_consent(!granted);
    }

    // Submission lifecycle

    /// Try to submit the input buffer
    ///
    /// On acceptance the buffer clears and the caller gets the delay after
    /// which `finish_reply` is due. Ignored submissions leave the buffer
    /// untouched.
    pub fn submit(&mut self) -> Option<Duration> {
        match self.engine.submit(&self.input, &self.consent) {
            SubmitOutcome::Accepted { delay, .. } => {
                self.input.clear();
                self.cursor_position = 0;
                self.auto_scroll = true;
                Some(delay)
            }
            SubmitOutcome::Ignored(_) => None,
        }
    }

    /// Deliver the scheduled reply and hand focus back to the input
    pub fn finish_reply(&mut self) {
        if self.engine.finish_reply().is_some() {
            self.auto_scroll = true;
            self.focus = Focus::Input;
        }
    }

    // Text input

    pub fn enter_char(&mut self, new_char: char) {
        if !self.can_type() || new_char == '\r' {
            return;
        }

        if self.cursor_position >= self.input.chars().count() {
            self.input.push(new_char);
        } else {
            let byte_idx = self
                .input
                .char_indices()
                .nth(self.cursor_position)
                .map(|(i, _)| i)
                .unwrap_or(self.input.len());
            self.input.insert(byte_idx, new_char);
        }
        self.cursor_position += 1;
    }

    /// Shift+Enter path: a literal newline in the buffer
    pub fn insert_newline(&mut self) {
        if !self.can_type() {
            return;
        }

        if self.cursor_position >= self.input.chars().count() {
            self.input.push('\n');
        } else {
            let byte_idx = self
                .input
                .char_indices()
                .nth(self.cursor_position)
                .map(|(i, _)| i)
                .unwrap_or(self.input.len());
            self.input.insert(byte_idx, '\n');
        }
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if !self.can_type() {
            return;
        }
        if self.cursor_position > 0 {
            let mut chars: Vec<char> = self.input.chars().collect();
            chars.remove(self.cursor_position - 1);
            self.input = chars.into_iter().collect();
            self.move_cursor_left();
        }
    }

    pub fn delete_at_cursor(&mut self) {
        if !self.can_type() {
            return;
        }
        let char_count = self.input.chars().count();
        if self.cursor_position < char_count {
            let mut chars: Vec<char> = self.input.chars().collect();
            chars.remove(self.cursor_position);
            self.input = chars.into_iter().collect();
        }
    }

    // Cursor movement

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let char_count = self.input.chars().count();
        if self.cursor_position < char_count {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_line_start(&mut self) {
        let (_, col) = self.cursor_line_col();
        self.cursor_position -= col;
    }

    pub fn move_cursor_line_end(&mut self) {
        let chars: Vec<char> = self.input.chars().collect();
        let mut pos = self.cursor_position;
        while pos < chars.len() && chars[pos] != '\n' {
            pos += 1;
        }
        self.cursor_position = pos;
    }

    /// Cursor position as (line, column), both zero-based and in chars
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let mut line = 0;
        let mut col = 0;
        for ch in self.input.chars().take(self.cursor_position) {
            if ch == '\n' {
                line += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        (line, col)
    }

    /// Rows the input pane content needs, capped at `MAX_INPUT_LINES`
    pub fn input_height(&self) -> u16 {
        self.input.split('\n').count().clamp(1, MAX_INPUT_LINES) as u16
    }

    // Transcript scrolling

    pub fn scroll_transcript_up(&mut self) {
        self.transcript_scroll = self.transcript_scroll.saturating_add(1);
        self.auto_scroll = false;
    }

    pub fn scroll_transcript_down(&mut self) {
        self.transcript_scroll = self.transcript_scroll.saturating_sub(1);
        if self.transcript_scroll == 0 {
            self.auto_scroll = true;
        }
    }

    // Terms overlay

    pub fn toggle_terms(&mut self) {
        self.show_terms = !self.show_terms;
        self.terms_scroll = 0;
    }

    pub fn scroll_terms_up(&mut self) {
        self.terms_scroll = self.terms_scroll.saturating_sub(1);
    }

    pub fn scroll_terms_down(&mut self) {
        self.terms_scroll = self.terms_scroll.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prcoach_core::consent::{HINT_CONSENT_REQUIRED, HINT_READY};
    use prcoach_core::conversation::Speaker;

    fn fresh_app() -> App {
        App::new(&Config::default(), StateStore::ephemeral())
    }

    fn granted_app() -> App {
        let mut app = fresh_app();
        app.toggle_consent();
        app
    }

    fn type_str(app: &mut App, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                app.insert_newline();
            } else {
                app.enter_char(ch);
            }
        }
    }

    #[test]
    fn test_typing_blocked_until_consent() {
        let mut app = fresh_app();
        app.enter_char('あ');
        app.insert_newline();
        assert_eq!(app.input, "");

        app.toggle_consent();
        app.enter_char('あ');
        assert_eq!(app.input, "あ");
    }

    #[test]
    fn test_submit_round_trip() {
        let mut app = granted_app();
        type_str(&mut app, "自己PRをつくって");

        let delay = app.submit();
        assert!(delay.is_some());
        assert!(app.input.is_empty());
        assert_eq!(app.cursor_position, 0);
        assert!(app.is_awaiting_reply());
        assert_eq!(app.transcript().len(), 1);

        // A second submission while the reply is pending is dropped
        type_str(&mut app, "もう一度");
        assert!(app.submit().is_none());
        assert_eq!(app.input, "もう一度");

        app.finish_reply();
        assert!(!app.is_awaiting_reply());
        assert_eq!(app.transcript().len(), 2);
        assert_eq!(app.transcript().last().unwrap().speaker, Speaker::Assistant);
    }

    #[test]
    fn test_blank_submit_is_dropped() {
        let mut app = granted_app();
        type_str(&mut app, "  \n ");
        assert!(app.submit().is_none());
        assert!(app.transcript().is_empty());
    }

    #[test]
    fn test_can_send_follows_consent_and_pending_reply() {
        let mut app = fresh_app();
        assert!(!app.can_send());

        app.toggle_consent();
        assert!(app.can_send());

        type_str(&mut app, "テスト");
        app.submit();
        assert!(!app.can_send());

        app.finish_reply();
        assert!(app.can_send());
    }

    #[test]
    fn test_finish_reply_returns_focus_to_input() {
        let mut app = granted_app();
        type_str(&mut app, "テスト");
        app.submit();
        app.focus = Focus::Transcript;

        app.finish_reply();
        assert_eq!(app.focus, Focus::Input);
    }

    #[test]
    fn test_multibyte_cursor_editing() {
        let mut app = granted_app();
        type_str(&mut app, "こんにちは");

        app.move_cursor_left();
        app.move_cursor_left();
        app.enter_char('、');
        assert_eq!(app.input, "こんに、ちは");

        app.delete_char();
        assert_eq!(app.input, "こんにちは");

        app.delete_at_cursor();
        assert_eq!(app.input, "こんには");
    }

    #[test]
    fn test_input_height_caps_at_five_lines() {
        let mut app = granted_app();
        assert_eq!(app.input_height(), 1);

        type_str(&mut app, "a\nb\nc");
        assert_eq!(app.input_height(), 3);

        type_str(&mut app, "\nd\ne\nf\ng");
        assert_eq!(app.input_height(), 5);
    }

    #[test]
    fn test_cursor_line_col_tracks_newlines() {
        let mut app = granted_app();
        type_str(&mut app, "ab\ncd");
        assert_eq!(app.cursor_line_col(), (1, 2));

        app.move_cursor_line_start();
        assert_eq!(app.cursor_line_col(), (1, 0));

        app.move_cursor_line_end();
        assert_eq!(app.cursor_line_col(), (1, 2));
    }

    #[test]
    fn test_scrolling_leaves_and_rejoins_the_bottom() {
        let mut app = granted_app();
        assert!(app.auto_scroll);

        app.scroll_transcript_up();
        assert!(!app.auto_scroll);
        assert_eq!(app.transcript_scroll, 1);

        app.scroll_transcript_down();
        assert!(app.auto_scroll);
        assert_eq!(app.transcript_scroll, 0);
    }

    #[test]
    fn test_toggle_terms_resets_overlay_scroll() {
        let mut app = granted_app();
        app.toggle_terms();
        assert!(app.show_terms);

        app.scroll_terms_down();
        assert_eq!(app.terms_scroll, 1);

        app.toggle_terms();
        app.toggle_terms();
        assert_eq!(app.terms_scroll, 0);
    }

    #[test]
    fn test_consent_toggle_flips_hint() {
        let mut app = fresh_app();
        assert_eq!(app.hint().text, HINT_CONSENT_REQUIRED);

        app.toggle_consent();
        assert_eq!(app.hint().text, HINT_READY);
    }
}
