//! HTML view of turns
//!
//! For hosts that embed the transcript in markup. Free-form turn text is
//! escaped at the embed point; everything else in the fragment is fixed.

use super::ASSISTANT_AVATAR;
use crate::conversation::{Speaker, Transcript, Turn};

/// Render one turn as an HTML fragment
pub fn render_turn(turn: &Turn) -> String {
    let escaped = html_escape::encode_text(&turn.text);
    let stamp = turn.stamp_label();

    match turn.speaker {
        Speaker::User => format!(
            "<div class=\"message user-message\">\n  \
             <div class=\"message-content\"><p>{}</p></div>\n  \
             <div class=\"message-time\">{}</div>\n\
             </div>",
            escaped, stamp
        ),
        Speaker::Assistant => format!(
            "<div class=\"message ai-message\">\n  \
             <div class=\"message-avatar\">{}</div>\n  \
             <div class=\"message-content\"><p>{}</p></div>\n  \
             <div class=\"message-time\">{}</div>\n\
             </div>",
            ASSISTANT_AVATAR, escaped, stamp
        ),
    }
}

/// Render the whole transcript, one fragment per turn
pub fn render_transcript(transcript: &Transcript) -> String {
    transcript
        .turns()
        .iter()
        .map(render_turn)
        .collect::<Vec<_>>()
        .join("\n")
}
