use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Handle;
use tracing::info;

use crate::api::ClientService;
use crate::app::dialog::DialogChoice;
use crate::app::dispatch::{Dispatcher, Request};
use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, Route};
use crate::ui;

/// Run the TUI until the user quits.
///
/// Requests are spawned on `runtime`; their outcomes are drained at the top
/// of every tick, so the UI never waits on the network.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    mut app: AppState,
    service: ClientService,
    runtime: Handle,
    start: Route,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(service, runtime, tx);
    info!(route = %start.path(), "starting event loop");
    if let Some(req) = app.navigate(start) {
        dispatcher.dispatch(req);
    }

    loop {
        while let Ok(outcome) = rx.try_recv() {
            if let Some(req) = app.apply_outcome(outcome) {
                dispatcher.dispatch(req);
            }
        }

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if app.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(req) = handle_key(&mut app, key) {
                        dispatcher.dispatch(req);
                    }
                }
            }
        }
    }

    info!(uptime_secs = app.started_at.elapsed().as_secs(), "quit");
    Ok(())
}

/// Apply one key press and return the request it triggered, if any.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> Option<Request> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return None;
    }
    if app.show_help {
        if matches!(
            key.code,
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('?') | KeyCode::Char('q')
        ) {
            app.show_help = false;
        }
        return None;
    }
    match app.route {
        Route::List => handle_list_key(app, key),
        Route::Create => handle_create_key(app, key),
        Route::Edit(_) => handle_edit_key(app, key),
    }
}

fn handle_list_key(app: &mut AppState, key: KeyEvent) -> Option<Request> {
    if let Some(dialog) = app.list.dialog.as_mut() {
        let success = dialog.is_success();
        return match dialog.handle_key(key.code) {
            Some(DialogChoice::Confirm) if success => {
                app.list.acknowledge_success();
                None
            }
            Some(DialogChoice::Confirm) => app
                .list
                .confirm_delete()
                .and_then(|e| app.apply_effect(e)),
            Some(DialogChoice::Cancel) => {
                app.list.cancel_delete();
                None
            }
            None => None,
        };
    }

    if app.input_mode == InputMode::Search {
        match key.code {
            KeyCode::Enter => app.input_mode = InputMode::Normal,
            KeyCode::Esc => {
                app.input_mode = InputMode::Normal;
                app.list.set_query("");
            }
            KeyCode::Backspace => {
                let mut q = app.list.query.clone();
                q.pop();
                app.list.set_query(q);
            }
            KeyCode::Up => app.list.move_up(),
            KeyCode::Down => app.list.move_down(),
            KeyCode::Char(c) => {
                let q = format!("{}{}", app.list.query, c);
                app.list.set_query(q);
            }
            _ => {}
        }
        return None;
    }

    match app.keymap.resolve(&key)? {
        KeyAction::Quit => app.should_quit = true,
        KeyAction::OpenHelp => app.show_help = true,
        KeyAction::StartSearch => {
            app.list.set_query("");
            app.input_mode = InputMode::Search;
        }
        KeyAction::NewClient => return app.navigate(Route::Create),
        KeyAction::EditSelection => {
            let effect = app.list.edit_selected()?;
            return app.apply_effect(effect);
        }
        KeyAction::DeleteSelection => app.list.request_delete_selected(),
        KeyAction::Refresh => {
            let effect = app.list.refresh();
            return app.apply_effect(effect);
        }
        KeyAction::MoveUp => app.list.move_up(),
        KeyAction::MoveDown => app.list.move_down(),
        KeyAction::PageUp => app.list.page_up(app.rows_per_page),
        KeyAction::PageDown => app.list.page_down(app.rows_per_page),
        KeyAction::Ignore => {}
    }
    None
}

fn handle_create_key(app: &mut AppState, key: KeyEvent) -> Option<Request> {
    match key.code {
        KeyCode::Esc => return app.navigate(Route::List),
        KeyCode::Enter => {
            let effect = app.create.submit()?;
            return app.apply_effect(effect);
        }
        KeyCode::Tab | KeyCode::Down => app.create.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.create.form.prev_field(),
        KeyCode::Backspace if !app.create.loading => app.create.form.backspace(),
        KeyCode::Char(c) if !app.create.loading && is_plain(&key) => app.create.form.input_char(c),
        _ => {}
    }
    None
}

fn handle_edit_key(app: &mut AppState, key: KeyEvent) -> Option<Request> {
    if let Some(dialog) = app.edit.dialog.as_mut() {
        let success = dialog.is_success();
        return match dialog.handle_key(key.code) {
            Some(DialogChoice::Confirm) if success => {
                let effect = app.edit.acknowledge_success();
                app.apply_effect(effect)
            }
            Some(DialogChoice::Confirm) => app
                .edit
                .confirm_update()
                .and_then(|e| app.apply_effect(e)),
            Some(DialogChoice::Cancel) => {
                app.edit.cancel_confirm();
                None
            }
            None => None,
        };
    }

    if key.code == KeyCode::Esc {
        let effect = app.edit.cancel();
        return app.apply_effect(effect);
    }
    if !app.edit.form_enabled() || app.edit.loading {
        return None;
    }
    match key.code {
        KeyCode::Enter => app.edit.submit(),
        KeyCode::Tab | KeyCode::Down => app.edit.form.next_field(),
        KeyCode::BackTab | KeyCode::Up => app.edit.form.prev_field(),
        KeyCode::Backspace => app.edit.form.backspace(),
        KeyCode::Char(c) if is_plain(&key) => app.edit.form.input_char(c),
        _ => {}
    }
    None
}

/// Printable input: no Ctrl or Alt held.
fn is_plain(key: &KeyEvent) -> bool {
    !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}
