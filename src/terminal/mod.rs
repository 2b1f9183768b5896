//! Interactive chat TUI
//!
//! Event-driven loop over a single mpsc channel: a spawned listener forwards
//! raw terminal input, and each accepted submission spawns a one-shot timer
//! that posts `ReplyDue` when the sampled delay elapses. The loop redraws
//! after every event.

pub mod app;
pub mod terms;
pub mod ui;

use crate::terminal::app::{App, Focus};
use crate::terminal::ui::render;
use anyhow::Result;
use crossterm::{
    event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use prcoach_core::state::StateStore;
use prcoach_core::Config;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration};
use tokio::sync::mpsc;

/// Events consumed by the TUI loop
pub enum WidgetEvent {
    /// Raw terminal input
    Input(CrosstermEvent),
    /// The reply delay for the in-flight submission elapsed
    ReplyDue,
}

pub async fn run_tui(config: &Config, store: StateStore) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config, store);

    // Channel for events
    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<WidgetEvent>();

    // Spawn input listener
    let input_tx = event_tx.clone();
    tokio::spawn(async move {
        loop {
            if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                if let Ok(ev) = event::read() {
                    if input_tx.send(WidgetEvent::Input(ev)).is_err() {
                        break;
                    }
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    });

    let res = run_loop(&mut terminal, &mut app, &mut event_rx, event_tx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<WidgetEvent>,
    event_tx: mpsc::UnboundedSender<WidgetEvent>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, app))?;

        if let Some(event) = event_rx.recv().await {
            match event {
                WidgetEvent::ReplyDue => {
                    app.finish_reply();
                }
                WidgetEvent::Input(ev) => match ev {
                    CrosstermEvent::Key(key) => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) {
                            match key.code {
                                KeyCode::Char('c') => {
                                    app.should_quit = true;
                                }
                                KeyCode::Char('a') => {
                                    app.toggle_consent();
                                }
                                _ => {}
                            }
                        } else if app.show_terms {
                            match key.code {
                                KeyCode::F(1) | KeyCode::Esc => app.toggle_terms(),
                                KeyCode::Up => app.scroll_terms_up(),
                                KeyCode::Down => app.scroll_terms_down(),
                                KeyCode::PageUp => {
                                    for _ in 0..10 {
                                        app.scroll_terms_up();
                                    }
                                }
                                KeyCode::PageDown => {
                                    for _ in 0..10 {
                                        app.scroll_terms_down();
                                    }
                                }
                                _ => {}
                            }
                        } else {
                            handle_key(app, key, &event_tx);
                        }
                    }
                    CrosstermEvent::Resize(_, _) => {
                        terminal.autoresize()?;
                    }
                    _ => {}
                },
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent, event_tx: &mpsc::UnboundedSender<WidgetEvent>) {
    match key.code {
        KeyCode::F(1) => {
            app.toggle_terms();
            return;
        }
        KeyCode::Tab => {
            app.toggle_focus();
            return;
        }
        _ => {}
    }

    match app.focus {
        Focus::Input => match key.code {
            KeyCode::Enter => {
                // Some terminals never report SHIFT with Enter, so Alt+Enter
                // also breaks the line
                if key.modifiers.contains(KeyModifiers::SHIFT)
                    || key.modifiers.contains(KeyModifiers::ALT)
                {
                    app.insert_newline();
                } else if let Some(delay) = app.submit() {
                    schedule_reply(event_tx, delay);
                }
            }
            KeyCode::Char(c) => app.enter_char(c),
            KeyCode::Backspace => app.delete_char(),
            KeyCode::Delete => app.delete_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_line_start(),
            KeyCode::End => app.move_cursor_line_end(),
            KeyCode::Up => app.scroll_transcript_up(),
            KeyCode::Down => app.scroll_transcript_down(),
            KeyCode::PageUp => {
                for _ in 0..10 {
                    app.scroll_transcript_up();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..10 {
                    app.scroll_transcript_down();
                }
            }
            _ => {}
        },
        Focus::Transcript => match key.code {
            KeyCode::Esc => app.toggle_focus(),
            KeyCode::Up => app.scroll_transcript_up(),
            KeyCode::Down => app.scroll_transcript_down(),
            KeyCode::PageUp => {
                for _ in 0..10 {
                    app.scroll_transcript_up();
                }
            }
            KeyCode::PageDown => {
                for _ in 0..10 {
                    app.scroll_transcript_down();
                }
            }
            _ => {}
        },
    }
}

/// Post `ReplyDue` once the sampled delay elapses
fn schedule_reply(event_tx: &mpsc::UnboundedSender<WidgetEvent>, delay: Duration) {
    let tx = event_tx.clone();
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        let _ = tx.send(WidgetEvent::ReplyDue);
    });
}
