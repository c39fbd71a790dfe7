use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};

use crate::app::AppState;
use crate::cpf;

/// Paginated client table; also records how many rows fit per page.
pub fn render_clients_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }
    let block = Block::default()
        .title(table_title(app))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.border));

    let list = &app.list;
    if list.visible.is_empty() {
        let (msg, style) = if list.loading {
            ("Loading clients...", Style::default().fg(app.theme.muted))
        } else if let Some(err) = &list.error {
            (err.as_str(), Style::default().fg(app.theme.error))
        } else if !list.query.is_empty() {
            ("No client matches the search.", Style::default().fg(app.theme.muted))
        } else {
            (
                "No clients registered. Press 'n' to add one.",
                Style::default().fg(app.theme.muted),
            )
        };
        let p = Paragraph::new(msg)
            .style(style)
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let rpp = app.rows_per_page.max(1);
    let start = (list.selected / rpp) * rpp;
    let end = (start + rpp).min(list.visible.len());
    let slice = &list.visible[start..end];

    let rows = slice.iter().enumerate().map(|(i, r)| {
        let absolute_index = start + i;
        let style = if absolute_index == list.selected {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(app.theme.text)
        };
        let deleting = list.deleting.as_deref() == Some(r.id.as_str());
        let name = if deleting {
            format!("{} (deleting...)", r.name)
        } else {
            r.name.clone()
        };
        Row::new(vec![
            Cell::from(name),
            Cell::from(cpf::format_cpf(&r.cpf)),
            Cell::from(r.email.clone()),
            Cell::from(r.phone.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Percentage(30),
        Constraint::Length(16),
        Constraint::Percentage(35),
        Constraint::Percentage(20),
    ];
    let header = Row::new(vec!["NAME", "CPF", "EMAIL", "PHONE"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .column_spacing(1);
    f.render_widget(table, area);
}

fn table_title(app: &AppState) -> String {
    let list = &app.list;
    let pages = list.visible.len().div_ceil(app.rows_per_page.max(1)).max(1);
    let page = list.selected / app.rows_per_page.max(1) + 1;
    let mut title = format!("Clients ({}) page {}/{}", list.visible.len(), page, pages);
    if list.loading && !list.visible.is_empty() {
        title.push_str(" refreshing...");
    }
    title
}

/// Details of the selected client plus any screen-level error.
pub fn render_client_details(f: &mut Frame, area: Rect, app: &AppState) {
    let mut text = match app.list.selected_record() {
        Some(r) => format!(
            "ID: {}\nName: {}\nCPF: {}\nEmail: {}\nPhone: {}",
            r.id,
            r.name,
            cpf::format_cpf(&r.cpf),
            r.email,
            r.phone
        ),
        None => String::from("No client selected"),
    };
    // An empty table already shows the error in its place.
    let error = app.list.error.as_ref().filter(|_| !app.list.visible.is_empty());
    let style = match error {
        Some(err) => {
            text.push_str("\n\nError: ");
            text.push_str(err);
            Style::default().fg(app.theme.error)
        }
        None => Style::default().fg(app.theme.text),
    };
    let p = Paragraph::new(text)
        .style(style)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Details")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}
