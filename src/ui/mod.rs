pub mod components;
pub mod form;
pub mod list;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, Route};

pub fn render(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    let hints = match (&app.route, app.input_mode) {
        (Route::List, InputMode::Search) => {
            format!("Search: {}_   Enter: keep  Esc: clear", app.list.query)
        }
        (Route::List, InputMode::Normal) => {
            "n: new  Enter: edit  d: delete  r: reload  /: search  ?: help  q: quit".to_string()
        }
        _ => "Enter: save  Tab: next field  Esc: back to list".to_string(),
    };
    let header = Paragraph::new(format!("{}  {}", app.route.path(), hints))
        .block(
            Block::default()
                .title(format!("clients-admin | {}", app.route.title()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .style(
            Style::default()
                .fg(app.theme.header_fg)
                .bg(app.theme.header_bg),
        );
    f.render_widget(header, root[0]);

    match app.route {
        Route::List => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
                .split(root[1]);
            list::render_clients_table(f, body[0], app);
            list::render_client_details(f, body[1], app);
        }
        Route::Create | Route::Edit(_) => form::render_form_screen(f, root[1], app),
    }

    components::render_status_bar(f, root[2], app);

    let dialog = match app.route {
        Route::List => app.list.dialog.as_ref(),
        Route::Edit(_) => app.edit.dialog.as_ref(),
        Route::Create => None,
    };
    let area = f.area();
    if let Some(d) = dialog {
        components::render_confirmation_dialog(f, area, &app.theme, d);
    }
    if app.show_help {
        components::render_help_modal(f, area, app);
    }
}
