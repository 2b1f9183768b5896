//! `prcoach` - A consent-gated terminal chat coach for Japanese self-PR drafts
//!
//! This binary provides the interactive chat TUI plus one-shot subcommands
//! for sending a single message, managing consent and listing the reply
//! rules. Replies come from a fixed keyword table; nothing leaves the
//! machine.

use anyhow::{Context, Result};
use clap::Parser;
use console::Style;

use crate::cli::{Cli, Commands};
use prcoach_core::config::Config;
use prcoach_core::consent::ConsentGate;
use prcoach_core::conversation::{ConversationEngine, SubmitOutcome};
use prcoach_core::output::OutputFormatter;
use prcoach_core::state::StateStore;

mod cli;
mod terminal;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        let blue = Style::new().blue();
        println!("{} v{}", blue.apply_to("prcoach"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let formatter = OutputFormatter::new();
    let config = Config::load_or_default();

    match &cli.command {
        Some(Commands::Ask { text, format }) => {
            handle_ask(text, format, &config, &formatter).await?;
        }

        Some(Commands::Consent {
            grant,
            revoke,
            status,
        }) => {
            handle_consent(*grant, *revoke, *status, &config, &formatter)?;
        }

        Some(Commands::Rules) => {
            formatter.print_rules();
        }

        None => {
            let store = open_state_store(&config);
            terminal::run_tui(&config, store).await?;
        }
    }

    Ok(())
}

/// Open the state store, falling back to an in-memory one
///
/// Consent simply does not survive restarts when the file is unusable.
fn open_state_store(config: &Config) -> StateStore {
    let result = match &config.storage.state_path {
        Some(path) => StateStore::with_path(path),
        None => StateStore::new(),
    };

    match result {
        Ok(store) => store,
        Err(err) => {
            log::warn!("state file unusable, consent will not persist: {}", err);
            StateStore::ephemeral()
        }
    }
}

/// One-shot exchange without the TUI
async fn handle_ask(
    text: &str,
    format: &str,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    if format != "text" && format != "html" {
        anyhow::bail!("unknown format: {} (expected text or html)", format);
    }

    let store = open_state_store(config);
    let (consent, surface) = ConsentGate::initialize(store);

    if !consent.granted() {
        formatter.print_hint(&surface.hint);
        println!(
            "{}",
            Style::new().dim().apply_to("prcoach consent --grant で同意できます")
        );
        anyhow::bail!("利用規約への同意が必要です");
    }

    let mut engine = ConversationEngine::new()
        .with_pacing(config.pacing.min_delay_ms, config.pacing.max_delay_ms);

    let delay = match engine.submit(text, &consent) {
        SubmitOutcome::Accepted { turn, delay } => {
            if format == "text" {
                formatter.print_turn(&turn, &config.ui.assistant_label);
            }
            delay
        }
        SubmitOutcome::Ignored(_) => anyhow::bail!("メッセージが空です"),
    };

    // The reply keeps the widget's pacing even in one-shot mode
    tokio::time::sleep(delay).await;

    let reply = engine
        .finish_reply()
        .context("reply was not pending after an accepted submission")?;

    if format == "html" {
        println!(
            "{}",
            prcoach_core::output::html::render_transcript(engine.transcript())
        );
    } else {
        formatter.print_turn(&reply, &config.ui.assistant_label);
    }

    Ok(())
}

/// Show, grant or revoke consent; prompts when no flag is given
fn handle_consent(
    grant: bool,
    revoke: bool,
    status: bool,
    config: &Config,
    formatter: &OutputFormatter,
) -> Result<()> {
    let store = open_state_store(config);
    let (mut consent, surface) = ConsentGate::initialize(store);

    if status {
        formatter.print_consent_status(consent.granted(), &surface.hint);
        return Ok(());
    }

    let granted = if grant {
        true
    } else if revoke {
        false
    } else {
        println!();
        println!("{}", Style::new().bold().apply_to("利用規約の概要"));
        println!("{}", terminal::terms::summary());
        dialoguer::Confirm::new()
            .with_prompt("利用規約に同意しますか？")
            .default(consent.granted())
            .interact()?
    };

    let update = consent.set_consent(granted);
    formatter.print_consent_status(consent.granted(), &update.hint);
    Ok(())
}
