//! Output formatting module
//!
//! Colored console output for the one-shot CLI paths, plus an HTML view of
//! turns in the `html` submodule.

use console::Style;

use crate::consent::{Hint, HintVariant};
use crate::conversation::{Speaker, Turn};
use crate::reply::REPLY_RULES;

pub mod html;

/// Marker shown beside assistant turns
pub const ASSISTANT_AVATAR: &str = "🤖";

/// Label shown beside user turns
pub const USER_LABEL: &str = "あなた";

/// Output formatter for CLI results
pub struct OutputFormatter {
    // Styles
    blue: Style,
    green: Style,
    dim: Style,
    bold: Style,
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self {
            blue: Style::new().blue(),
            green: Style::new().green(),
            dim: Style::new().dim(),
            bold: Style::new().bold(),
        }
    }
}

impl OutputFormatter {
    /// Create a new formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Print a single turn with its speaker header
    pub fn print_turn(&self, turn: &Turn, assistant_label: &str) {
        println!();
        match turn.speaker {
            Speaker::User => {
                println!(
                    "{} {}",
                    self.bold.apply_to(USER_LABEL),
                    self.dim.apply_to(turn.stamp_label())
                );
            }
            Speaker::Assistant => {
                println!(
                    "{} {} {}",
                    ASSISTANT_AVATAR,
                    self.bold.apply_to(self.green.apply_to(assistant_label)),
                    self.dim.apply_to(turn.stamp_label())
                );
            }
        }
        println!("{}", turn.text);
    }

    /// Print the input-surface hint in its variant's weight
    pub fn print_hint(&self, hint: &Hint) {
        let styled = match hint.variant {
            HintVariant::Accent => self.blue.apply_to(hint.text),
            HintVariant::Muted => self.dim.apply_to(hint.text),
        };
        println!("{}", styled);
    }

    /// Print consent status with the matching hint
    pub fn print_consent_status(&self, granted: bool, hint: &Hint) {
        println!();
        let status = if granted {
            self.green.apply_to("同意済み")
        } else {
            self.dim.apply_to("未同意")
        };
        println!("{} {}", self.bold.apply_to("利用規約:"), status);
        self.print_hint(hint);
    }

    /// Print an overview of the response rule table
    pub fn print_rules(&self) {
        println!();
        println!("{}", self.bold.apply_to("応答ルール（上から順に判定）:"));
        for rule in REPLY_RULES {
            println!(
                "- {}: {}",
                self.green.apply_to(rule.topic),
                self.dim.apply_to(rule.keywords.join("、"))
            );
        }
        println!(
            "- {}: {}",
            self.green.apply_to("それ以外"),
            self.dim.apply_to("案内メッセージを返します")
        );
    }
}
