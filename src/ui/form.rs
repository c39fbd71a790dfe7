use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::app::form::{ClientForm, FormField};
use crate::app::{AppState, Route, Theme};
use crate::cpf::CPF_PLACEHOLDER;

/// Everything the form view needs, independent of which screen owns it.
pub struct FormView<'a> {
    pub title: &'a str,
    pub form: &'a ClientForm,
    pub loading: bool,
    pub error: Option<&'a str>,
    pub submit_label: &'a str,
}

/// Create or edit screen, depending on the route.
pub fn render_form_screen(f: &mut Frame, area: Rect, app: &AppState) {
    match &app.route {
        Route::Create => {
            let c = &app.create;
            let view = FormView {
                title: "New client",
                form: &c.form,
                loading: c.loading,
                error: c.error.as_deref(),
                submit_label: "Register",
            };
            render_client_form(f, area, &app.theme, &view);
        }
        Route::Edit(_) => {
            let e = &app.edit;
            if !e.form_enabled() {
                render_edit_placeholder(f, area, app);
                return;
            }
            let view = FormView {
                title: "Edit client",
                form: &e.form,
                loading: e.loading,
                error: e.error.as_deref(),
                submit_label: "Save changes",
            };
            render_client_form(f, area, &app.theme, &view);
        }
        Route::List => {}
    }
}

/// Edit screen before the record is available: loading, or an error with no form.
fn render_edit_placeholder(f: &mut Frame, area: Rect, app: &AppState) {
    let (msg, style) = match (&app.edit.error, app.edit.loading) {
        (_, true) => (
            "Loading client...".to_string(),
            Style::default().fg(app.theme.muted),
        ),
        (Some(err), false) => (
            format!("{}\n\nPress Esc to go back to the list.", err),
            Style::default().fg(app.theme.error),
        ),
        (None, false) => (String::new(), Style::default()),
    };
    let p = Paragraph::new(msg)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Edit client")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

/// Four labelled inputs in order Name, CPF, Email, Phone, then the submit line.
pub fn render_client_form(f: &mut Frame, area: Rect, theme: &Theme, view: &FormView) {
    let outer = Block::default()
        .title(view.title.to_string())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = outer.inner(area);
    f.render_widget(outer, area);

    let mut constraints: Vec<Constraint> = FormField::ALL
        .iter()
        .map(|_| Constraint::Length(4))
        .collect();
    constraints.push(Constraint::Length(2));
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (idx, field) in FormField::ALL.iter().copied().enumerate() {
        render_input(f, rows[idx], theme, view, field);
    }

    let blocked = view.form.submit_blocked();
    let label = if view.loading {
        "Saving...".to_string()
    } else {
        format!("[ {} ]", view.submit_label)
    };
    let submit_style = if view.loading || blocked {
        Style::default().fg(theme.muted)
    } else {
        Style::default()
            .fg(theme.highlight_fg)
            .add_modifier(Modifier::BOLD)
    };
    let mut submit_line = vec![Span::styled(label, submit_style)];
    submit_line.push(Span::styled(
        "   Enter: save  Tab: next field  Esc: back",
        Style::default().fg(theme.muted),
    ));
    f.render_widget(Paragraph::new(Line::from(submit_line)), rows[FormField::ALL.len()]);

    if let Some(err) = view.error {
        let p = Paragraph::new(err.to_string())
            .style(Style::default().fg(theme.error))
            .wrap(Wrap { trim: false });
        f.render_widget(p, rows[FormField::ALL.len() + 1]);
    }
}

fn render_input(f: &mut Frame, area: Rect, theme: &Theme, view: &FormView, field: FormField) {
    let focused = view.form.focus == field;
    let value = view.form.value(field);
    let border = if focused {
        Style::default().fg(theme.title)
    } else {
        Style::default().fg(theme.border)
    };
    let text = if value.is_empty() && field == FormField::Cpf {
        Span::styled(CPF_PLACEHOLDER, Style::default().fg(theme.muted))
    } else if focused && !view.loading {
        Span::styled(format!("{}_", value), Style::default().fg(theme.text))
    } else {
        Span::styled(value.to_string(), Style::default().fg(theme.text))
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);
    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .title(field.label())
            .borders(Borders::ALL)
            .border_style(border),
    );
    f.render_widget(input, chunks[0]);

    if let Some(err) = view.form.error_for(field) {
        let p = Paragraph::new(format!(" {}", err)).style(Style::default().fg(theme.error));
        f.render_widget(p, chunks[1]);
    }
}
