//! Rendering for the chat TUI
//!
//! One frame is: header line, transcript pane, hint line, input pane. The
//! terms overlay draws on top when open. The transcript scrolls by whole
//! display lines and sticks to the newest turn until the user scrolls up.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};
use ratatui::Frame;
use textwrap::core::display_width;

use prcoach_core::consent::HintVariant;
use prcoach_core::conversation::Speaker;
use prcoach_core::output::{ASSISTANT_AVATAR, USER_LABEL};

use super::app::{App, Focus};
use super::terms;

pub fn render(frame: &mut Frame, app: &mut App) {
    let input_height = app.input_height() + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(input_height),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_transcript(frame, app, chunks[1]);
    render_hint(frame, app, chunks[2]);
    render_input(frame, app, chunks[3]);

    if app.show_terms {
        render_terms_overlay(frame, app);
    }
}

fn render_header(frame: &mut Frame, app: &mut App, area: Rect) {
    let consent_badge = if app.consent.granted() {
        Span::styled("同意済み", Style::default().fg(Color::Green))
    } else {
        Span::styled("未同意", Style::default().fg(Color::DarkGray))
    };

    let header = Line::from(vec![
        Span::styled(
            " 自己PRチャットコーチ ",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("利用規約: "),
        consent_badge,
        Span::styled(
            "  [Ctrl+a: 同意切替] [F1: 利用規約] [Tab: フォーカス] [Ctrl+c: 終了]",
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(header), area);
}

fn render_transcript(frame: &mut Frame, app: &mut App, area: Rect) {
    let width = area.width.saturating_sub(2).max(1) as usize;

    let mut items: Vec<ListItem> = Vec::new();
    for turn in app.transcript().turns() {
        let (label, label_style) = match turn.speaker {
            Speaker::User => (
                USER_LABEL.to_string(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Speaker::Assistant => (
                format!("{} {}", ASSISTANT_AVATAR, app.assistant_label),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        };

        items.push(ListItem::new(Line::from(vec![
            Span::styled(label, label_style),
            Span::raw(" "),
            Span::styled(turn.stamp_label(), Style::default().fg(Color::DarkGray)),
        ])));

        for raw_line in turn.text.split('\n') {
            if raw_line.is_empty() {
                items.push(ListItem::new(Line::from("")));
                continue;
            }
            for wrapped in textwrap::wrap(raw_line, width) {
                items.push(ListItem::new(Line::from(wrapped.into_owned())));
            }
        }

        items.push(ListItem::new(Line::from("")));
    }

    let height = area.height.saturating_sub(2) as usize;
    let total_lines = items.len();
    let max_scroll = total_lines.saturating_sub(height);

    app.transcript_scroll = app.transcript_scroll.min(max_scroll);
    let start_index = if app.auto_scroll {
        total_lines.saturating_sub(height)
    } else {
        max_scroll.saturating_sub(app.transcript_scroll)
    };
    let end_index = (start_index + height).min(total_lines);
    let visible: Vec<ListItem> = items.drain(start_index..end_index).collect();

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(" チャット ")
        .border_style(if app.focus == Focus::Transcript {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });

    if !app.auto_scroll {
        block = block.title_bottom(Line::from(vec![Span::styled(
            " [スクロール中] ",
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        )]));
    }

    frame.render_widget(List::new(visible).block(block), area);
}

fn render_hint(frame: &mut Frame, app: &mut App, area: Rect) {
    let hint = app.hint();
    let style = match hint.variant {
        HintVariant::Accent => Style::default().fg(Color::Blue),
        HintVariant::Muted => Style::default().fg(Color::DarkGray),
    };
    let paragraph = Paragraph::new(Span::styled(format!(" {}", hint.text), style));
    frame.render_widget(paragraph, area);
}

fn render_input(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Input;

    let border_style = if !app.can_type() {
        Style::default().fg(Color::DarkGray)
    } else if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let title = if !app.can_type() {
        " 入力（利用規約への同意が必要です） "
    } else if focused {
        " 入力 (Enter: 送信 / Shift+Enter: 改行) "
    } else {
        " 入力 (Tab: フォーカス) "
    };

    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    if app.is_awaiting_reply() {
        block = block.title_bottom(Line::from(vec![Span::styled(
            " 送信中... ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )]));
    }

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let visible_rows = area.height.saturating_sub(2).max(1) as usize;

    let lines: Vec<&str> = app.input.split('\n').collect();
    let (cursor_line, cursor_col) = app.cursor_line_col();

    // Keep the cursor row inside the pane when the buffer outgrows it
    let start_line = if cursor_line < visible_rows {
        0
    } else {
        cursor_line + 1 - visible_rows
    };
    let end_line = (start_line + visible_rows).min(lines.len());
    let display = lines[start_line..end_line].join("\n");

    // Horizontal scroll in cells so fullwidth characters stay visible
    let before_cursor: String = lines
        .get(cursor_line)
        .map(|l| l.chars().take(cursor_col).collect())
        .unwrap_or_default();
    let cell_col = display_width(&before_cursor);
    let hscroll = cell_col.saturating_sub(inner_width.saturating_sub(1));

    let paragraph = if app.input.is_empty() {
        Paragraph::new(Span::styled(
            "メッセージを入力...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))
        .block(block)
    } else {
        let text_style = if app.can_type() {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        Paragraph::new(display)
            .style(text_style)
            .block(block)
            .scroll((0, hscroll as u16))
    };
    frame.render_widget(paragraph, area);

    if focused && app.can_type() && !app.show_terms {
        frame.set_cursor_position((
            area.x + 1 + (cell_col - hscroll) as u16,
            area.y + 1 + (cursor_line - start_line) as u16,
        ));
    }
}

fn render_terms_overlay(frame: &mut Frame, app: &mut App) {
    let popup_area = centered_rect(70, 80, frame.area());

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" 利用規約 ")
        .title_bottom(Line::from(" F1/Esc: 閉じる  ↑/↓: スクロール "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let mut lines: Vec<Line> = Vec::new();
    for section in terms::SECTIONS {
        lines.push(Line::from(Span::styled(
            section.title,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for body_line in section.body.split('\n') {
            lines.push(Line::from(body_line));
        }
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.terms_scroll, 0));
    frame.render_widget(paragraph, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
