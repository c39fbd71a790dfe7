// Integration tests for clients-admin

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use clients_admin::api::{ApiError, CpfWireFormat, Record};
use clients_admin::app::apiconf::ApiConfig;
use clients_admin::app::dispatch::{Outcome, Request};
use clients_admin::app::keymap::{KeyAction, Keymap};
use clients_admin::app::update::handle_key;
use clients_admin::app::{AppState, InputMode, Route, Theme, config_file_read_path};

fn temp_path(tag: &str) -> String {
    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("ca_{}_{}_{}.conf", tag, std::process::id(), nonce));
    path.to_string_lossy().to_string()
}

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn is_list(req: &Option<Request>) -> bool {
    matches!(req, Some(Request::List(_)))
}

fn type_text(app: &mut AppState, text: &str) {
    for c in text.chars() {
        assert_eq!(handle_key(app, key(KeyCode::Char(c))), None);
    }
}

fn record(id: &str, name: &str) -> Record {
    Record {
        id: id.into(),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        phone: "11999990000".into(),
        cpf: "11122233344".into(),
    }
}

/// App on the list screen with two loaded records.
fn listed_app() -> AppState {
    let mut app = AppState::default();
    let seq = match app.navigate(Route::List) {
        Some(Request::List(seq)) => seq,
        other => panic!("expected list request, got {other:?}"),
    };
    app.apply_outcome(Outcome::Listed {
        seq,
        result: Ok(vec![record("1", "Ana"), record("2", "Bia")]),
    });
    app
}

// 1) Config files roundtrip and init

#[test]
fn theme_roundtrip_and_init() {
    let path = temp_path("theme");
    let t = Theme::mocha();
    t.write_file(&path).expect("write theme");
    let t2 = Theme::from_file(&path).expect("read theme");
    assert_eq!(t, t2);

    let init = temp_path("theme_init");
    let _ = std::fs::remove_file(&init);
    let _created = Theme::load_or_init(&init);
    // a user-level theme.conf takes precedence over writing defaults
    if config_file_read_path("theme.conf").is_none() {
        assert!(PathBuf::from(&init).exists());
    }

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&init);
}

#[test]
fn theme_from_file_robustness() {
    let path = temp_path("theme_bad");
    std::fs::write(
        &path,
        "text = #112233\nerror=zzz\n=\nnonsense\nsuccess = reset\n# comment\n",
    )
    .unwrap();
    let t = Theme::from_file(&path).unwrap();
    assert_eq!(t.text, ratatui::style::Color::Rgb(0x11, 0x22, 0x33));
    assert_eq!(t.error, Theme::mocha().error);
    assert_eq!(t.success, ratatui::style::Color::Reset);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn api_config_roundtrip_and_init() {
    let path = temp_path("api");
    let cfg = ApiConfig {
        base_url: "https://clients.example.com/v2".into(),
        timeout_secs: 15,
        cpf_wire_format: CpfWireFormat::Masked,
    };
    cfg.write_file(&path).unwrap();
    assert_eq!(ApiConfig::from_file(&path), Some(cfg.clone()));

    let service = cfg.build_service().unwrap();
    assert_eq!(service.base_url().as_str(), "https://clients.example.com/v2");

    let init = temp_path("api_init");
    let _ = std::fs::remove_file(&init);
    let loaded = ApiConfig::load_or_init(&init);
    if config_file_read_path("api.conf").is_none() {
        assert!(PathBuf::from(&init).exists());
        assert_eq!(ApiConfig::from_file(&init), Some(loaded));
    }

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_file(&init);
}

#[test]
fn api_config_rejects_bad_base_url() {
    let cfg = ApiConfig {
        base_url: "mailto:admin@example.com".into(),
        ..ApiConfig::default()
    };
    assert!(cfg.build_service().is_err());
}

#[test]
fn keymap_roundtrip_keeps_every_binding() {
    let path = temp_path("keys");
    let km = Keymap::default();
    km.write_file(&path).unwrap();
    let km2 = Keymap::from_file(&path).unwrap();
    for ((mods, code), action) in km.all_bindings() {
        if mods.is_empty() {
            assert_eq!(km2.resolve(&KeyEvent::new(code, mods)), Some(action));
        }
    }
    let _ = std::fs::remove_file(&path);
}

// 2) Routes

#[test]
fn start_routes_mount_the_right_screen() {
    let mut app = AppState::default();
    assert_eq!(
        app.navigate(Route::from_path("/editar/12")),
        Some(Request::Get("12".into()))
    );
    assert!(app.edit.loading);

    assert_eq!(app.navigate(Route::from_path("/editar")), None);
    assert!(app.edit.error.is_some());

    assert_eq!(app.navigate(Route::from_path("/cadastro")), None);
    assert_eq!(app.route, Route::Create);

    assert!(is_list(&app.navigate(Route::from_path("/whatever"))));
}

// 3) Key-driven flows

#[test]
fn create_flow_from_list_and_back() {
    let mut app = listed_app();
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('n'))), None);
    assert_eq!(app.route, Route::Create);

    type_text(&mut app, "Caio Lima");
    handle_key(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "44455566677");
    assert_eq!(app.create.form.cpf, "444.555.666-77");
    handle_key(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "caio@example.com");
    handle_key(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "11988887777");

    let req = handle_key(&mut app, key(KeyCode::Enter));
    let payload = match req {
        Some(Request::Create(p)) => p,
        other => panic!("expected create request, got {other:?}"),
    };
    assert_eq!(payload.name, "Caio Lima");
    assert_eq!(payload.cpf, "444.555.666-77");

    let next = app.apply_outcome(Outcome::Created(Ok(record("3", "Caio"))));
    assert!(is_list(&next));
    assert_eq!(app.route, Route::List);
}

#[test]
fn short_cpf_never_produces_a_request() {
    let mut app = AppState::default();
    app.navigate(Route::Create);
    type_text(&mut app, "Ana");
    handle_key(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "123");
    handle_key(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "ana@example.com");
    handle_key(&mut app, key(KeyCode::Tab));
    type_text(&mut app, "1");
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), None);
    assert!(!app.create.loading);
}

#[test]
fn stale_create_outcome_does_not_navigate() {
    let mut app = AppState::default();
    app.navigate(Route::Create);
    app.create.form.name = "Ana".into();
    app.create.form.email = "ana@example.com".into();
    app.create.form.phone = "1".into();
    app.create.form.set_cpf_input("11122233344");
    assert!(matches!(
        handle_key(&mut app, key(KeyCode::Enter)),
        Some(Request::Create(_))
    ));
    // user leaves before the answer arrives
    assert!(is_list(&handle_key(&mut app, key(KeyCode::Esc))));
    let next = app.apply_outcome(Outcome::Created(Ok(record("1", "Ana"))));
    assert_eq!(next, None);
    assert_eq!(app.route, Route::List);
}

#[test]
fn delete_flow_with_confirmation() {
    let mut app = listed_app();
    handle_key(&mut app, key(KeyCode::Down));
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('d'))), None);
    assert!(app.list.dialog.is_some());

    // Cancel is highlighted first; move to Confirm
    handle_key(&mut app, key(KeyCode::Left));
    let req = handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(req, Some(Request::Delete("2".into())));

    let reload = app.apply_outcome(Outcome::Deleted {
        id: "2".into(),
        result: Ok(()),
    });
    assert!(is_list(&reload));
    assert!(app.list.dialog.as_ref().is_some_and(|d| d.is_success()));

    // OK closes the success dialog
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), None);
    assert!(app.list.dialog.is_none());
}

#[test]
fn delete_cancelled_with_escape_sends_nothing() {
    let mut app = listed_app();
    let before = app.list.clone();
    handle_key(&mut app, key(KeyCode::Delete));
    assert_eq!(handle_key(&mut app, key(KeyCode::Esc)), None);
    assert_eq!(app.list, before);
}

#[test]
fn edit_flow_with_confirmation_and_success() {
    let mut app = listed_app();
    let req = handle_key(&mut app, key(KeyCode::Enter));
    assert_eq!(req, Some(Request::Get("1".into())));
    assert_eq!(app.route, Route::Edit(Some("1".into())));

    // keys are ignored until the record arrives
    type_text(&mut app, "zzz");
    assert_eq!(app.edit.form.name, "");

    app.apply_outcome(Outcome::Fetched {
        id: "1".into(),
        result: Ok(record("1", "Ana")),
    });
    assert_eq!(app.edit.form.cpf, "111.222.333-44");
    type_text(&mut app, " Maria");

    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), None);
    assert!(app.edit.dialog.is_some());
    let req = handle_key(&mut app, key(KeyCode::Char('y')));
    match req {
        Some(Request::Update(id, p)) => {
            assert_eq!(id, "1");
            assert_eq!(p.name, "Ana Maria");
        }
        other => panic!("expected update request, got {other:?}"),
    }

    app.apply_outcome(Outcome::Updated {
        id: "1".into(),
        result: Ok(record("1", "Ana Maria")),
    });
    assert!(app.edit.dialog.as_ref().is_some_and(|d| d.is_success()));
    // acknowledging goes back to a freshly loading list
    assert!(is_list(&handle_key(&mut app, key(KeyCode::Enter))));
    assert_eq!(app.route, Route::List);
}

#[test]
fn edit_load_failure_allows_only_going_back() {
    let mut app = AppState::default();
    app.navigate(Route::Edit(Some("7".into())));
    app.apply_outcome(Outcome::Fetched {
        id: "7".into(),
        result: Err(ApiError::NoData),
    });
    assert_eq!(handle_key(&mut app, key(KeyCode::Enter)), None);
    assert!(app.edit.dialog.is_none());
    assert!(is_list(&handle_key(&mut app, key(KeyCode::Esc))));
}

#[test]
fn search_mode_filters_and_escape_clears() {
    let mut app = listed_app();
    handle_key(&mut app, key(KeyCode::Char('/')));
    assert_eq!(app.input_mode, InputMode::Search);
    type_text(&mut app, "bia");
    assert_eq!(app.list.visible.len(), 1);
    // 'q' is text while searching
    assert!(!app.should_quit);

    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.input_mode, InputMode::Normal);
    assert_eq!(app.list.visible.len(), 2);
}

#[test]
fn refresh_help_and_quit() {
    let mut app = listed_app();
    assert!(is_list(&handle_key(&mut app, key(KeyCode::Char('r')))));
    assert!(app.list.loading);

    handle_key(&mut app, key(KeyCode::Char('?')));
    assert!(app.show_help);
    // keys are swallowed while help is open
    assert_eq!(handle_key(&mut app, key(KeyCode::Char('n'))), None);
    assert_eq!(app.route, Route::List);
    handle_key(&mut app, key(KeyCode::Esc));
    assert!(!app.show_help);

    handle_key(&mut app, key(KeyCode::Char('q')));
    assert!(app.should_quit);
}

#[test]
fn ctrl_c_quits_from_a_form() {
    let mut app = AppState::default();
    app.navigate(Route::Create);
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
    assert!(app.should_quit);
    assert_eq!(app.create.form.name, "");
}

#[test]
fn custom_keymap_is_honoured() {
    let mut app = listed_app();
    app.keymap = {
        let path = temp_path("keys_custom");
        std::fs::write(&path, "Refresh = F5\n").unwrap();
        let km = Keymap::from_file(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        km
    };
    assert_eq!(app.keymap.keys_for(KeyAction::Refresh), "F5/r");
    assert!(is_list(&handle_key(&mut app, key(KeyCode::F(5)))));
}
