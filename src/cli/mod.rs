//! CLI argument parsing using clap 4.x derive macros

use clap::{Parser, Subcommand};

/// A terminal chat coach for drafting Japanese self-PR statements
///
/// Replies come from a fixed keyword rule table evaluated top to bottom,
/// so the coach runs fully offline and never sends input anywhere.
#[derive(Parser, Debug)]
#[command(name = "prcoach")]
#[command(author, version, about, long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print version information
    #[arg(long)]
    pub version: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send one message and print the coach reply
    Ask {
        /// The message to send
        text: String,

        /// Output format (text, html)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Show or change consent to the terms of use
    Consent {
        /// Grant consent without prompting
        #[arg(long, conflicts_with = "revoke")]
        grant: bool,

        /// Revoke consent without prompting
        #[arg(long)]
        revoke: bool,

        /// Print the current consent state and exit
        #[arg(long, conflicts_with_all = ["grant", "revoke"])]
        status: bool,
    },

    /// List the reply rules in the order they are matched
    Rules,
}
