//! Shared UI components (status bar, dialogs, help overlay).
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::dialog::Dialog;
use crate::app::keymap::{KeyAction, describe_action};
use crate::app::{AppState, InputMode, Route, Theme};

/// Render the bottom status bar with mode, route and backend.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match (&app.route, app.input_mode) {
        (Route::List, InputMode::Search) => "SEARCH",
        (Route::List, InputMode::Normal) => "NORMAL",
        _ => "FORM",
    };
    let busy = if app.list.loading || app.create.loading || app.edit.loading {
        "  working..."
    } else {
        ""
    };
    let msg = format!(
        "mode: {mode}  route: {}  clients:{}/{}  api: {}{busy}",
        app.route.path(),
        app.list.visible.len(),
        app.list.records.len(),
        app.api_label,
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Confirm / Cancel prompt, or a single OK button for success dialogs.
pub fn render_confirmation_dialog(f: &mut Frame, area: Rect, theme: &Theme, dialog: &Dialog) {
    let width = 56u16.min(area.width.saturating_sub(4)).max(30);
    let rect = centered_rect(width, 7, area);

    let accent = if dialog.is_success() {
        theme.success
    } else {
        theme.title
    };
    let mut buttons: Vec<Span> = Vec::new();
    for (idx, label) in dialog.buttons().iter().enumerate() {
        if idx > 0 {
            buttons.push(Span::raw("    "));
        }
        if idx == dialog.selected {
            buttons.push(Span::styled(
                format!("[{}]", label),
                Style::default()
                    .fg(theme.highlight_fg)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            buttons.push(Span::raw(format!(" {} ", label)));
        }
    }
    let lines = vec![
        Line::raw(""),
        Line::raw(dialog.message.clone()),
        Line::raw(""),
        Line::from(buttons),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(dialog.title.clone())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

/// Help overlay listing the current list-screen bindings plus fixed form keys.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 26u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let key_style = Style::default().add_modifier(Modifier::ITALIC);
    let heading = |s: &'static str| {
        Line::from(Span::styled(s, Style::default().add_modifier(Modifier::BOLD)))
    };

    let mut lines: Vec<Line> = vec![heading("Client list"), Line::raw("")];
    for action in [
        KeyAction::NewClient,
        KeyAction::EditSelection,
        KeyAction::DeleteSelection,
        KeyAction::Refresh,
        KeyAction::StartSearch,
        KeyAction::MoveUp,
        KeyAction::MoveDown,
        KeyAction::PageUp,
        KeyAction::PageDown,
        KeyAction::OpenHelp,
        KeyAction::Quit,
    ] {
        let keys = app.keymap.keys_for(action);
        if keys.is_empty() {
            continue;
        }
        lines.push(Line::from(vec![
            Span::raw(format!("{:<24}", describe_action(action))),
            Span::styled(keys, key_style),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Forms"));
    for (label, keys) in [
        ("Next field", "Tab / Down"),
        ("Previous field", "BackTab / Up"),
        ("Save", "Enter"),
        ("Back to list", "Esc"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<24}", label)),
            Span::styled(keys, key_style),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(heading("Dialogs"));
    for (label, keys) in [
        ("Switch button", "Left / Right / Tab"),
        ("Choose", "Enter"),
        ("Confirm / Cancel", "y / n, Esc"),
    ] {
        lines.push(Line::from(vec![
            Span::raw(format!("{:<24}", label)),
            Span::styled(keys, key_style),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw(format!("{:<24}", "Quit anywhere")),
        Span::styled("Ctrl+c", key_style),
    ]));

    let p = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Help (Esc to close)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
