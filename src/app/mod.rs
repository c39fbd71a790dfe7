//! Application state types and entry glue.
//!
//! [`AppState`] owns one controller per screen and resolves their
//! [`Effect`]s: navigation re-mounts the target screen, requests are handed
//! back to the event loop for dispatch. The loop itself lives in
//! [`update`] and is re-exported as `run`.
pub mod apiconf;
pub mod create;
pub mod dialog;
pub mod dispatch;
pub mod edit;
pub mod form;
pub mod keymap;
pub mod list;
pub mod update;

use ratatui::style::Color;
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

use self::create::CreateController;
use self::dispatch::{Effect, Outcome, Request};
use self::edit::EditController;
use self::keymap::Keymap;
use self::list::ListController;

/// Screens, addressed by their URL-style paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Route {
    /// `/`
    #[default]
    List,
    /// `/cadastro`
    Create,
    /// `/editar/:id`; `None` when the path carries no id.
    Edit(Option<String>),
}

impl Route {
    /// Parse a path. Unknown paths fall back to the list.
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim().trim_start_matches('/');
        let mut segments = trimmed.splitn(2, '/');
        match segments.next().unwrap_or("") {
            "cadastro" => Route::Create,
            "editar" => {
                let id = segments
                    .next()
                    .map(|s| s.trim_end_matches('/'))
                    .filter(|s| !s.is_empty())
                    .map(str::to_string);
                Route::Edit(id)
            }
            _ => Route::List,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Create => "/cadastro".to_string(),
            Route::Edit(Some(id)) => format!("/editar/{}", id),
            Route::Edit(None) => "/editar".to_string(),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::List => "Clients",
            Route::Create => "New client",
            Route::Edit(_) => "Edit client",
        }
    }
}

/// Current input mode for key handling on the list screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Search,
}

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    /// Catppuccin Mocha theme defaults.
    pub fn mocha() -> Self {
        // Palette reference: https://github.com/catppuccin/catppuccin
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),         // text
            muted: Color::Rgb(0x7f, 0x84, 0x9c),        // overlay1
            title: Color::Rgb(0xcb, 0xa6, 0xf7),        // mauve
            border: Color::Rgb(0x58, 0x5b, 0x70),       // surface2
            header_bg: Color::Rgb(0x31, 0x32, 0x44),    // surface0
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),    // lavender
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),    // surface1
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),    // text
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf), // yellow
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a), // surface1
            error: Color::Rgb(0xf3, 0x8b, 0xa8),        // red
            success: Color::Rgb(0xa6, 0xe3, 0xa1),      // green
        }
    }

    /// Load theme from a simple key=value file. Unknown or missing keys fall back to `mocha`.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw_line in contents.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let key = parts.next().map(|s| s.trim()).unwrap_or("");
            let val = parts.next().map(|s| s.trim()).unwrap_or("");
            if key.is_empty() || val.is_empty() {
                continue;
            }
            if let Some(color) = Self::parse_color(val) {
                match key {
                    "text" => theme.text = color,
                    "muted" => theme.muted = color,
                    "title" => theme.title = color,
                    "border" => theme.border = color,
                    "header_bg" => theme.header_bg = color,
                    "header_fg" => theme.header_fg = color,
                    "status_bg" => theme.status_bg = color,
                    "status_fg" => theme.status_fg = color,
                    "highlight_fg" => theme.highlight_fg = color,
                    "highlight_bg" => theme.highlight_bg = color,
                    "error" => theme.error = color,
                    "success" => theme.success = color,
                    _ => {}
                }
            }
        }
        theme
    }

    /// Parse a color from hex ("#RRGGBB" or "RRGGBB") or "reset".
    fn parse_color(s: &str) -> Option<Color> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "reset" {
            return Some(Color::Reset);
        }
        let hex = lower.strip_prefix('#').unwrap_or(lower.as_str());
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        match (
            u8::from_str_radix(&hex[0..2], 16),
            u8::from_str_radix(&hex[2..4], 16),
            u8::from_str_radix(&hex[4..6], 16),
        ) {
            (Ok(r), Ok(g), Ok(b)) => Some(Color::Rgb(r, g, b)),
            _ => None,
        }
    }

    /// Persist the theme to a config file in key=value format.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# clients-admin theme configuration\n");
        buf.push_str("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'\n\n");

        fn color_to_str(c: Color) -> String {
            match c {
                Color::Rgb(r, g, b) => format!("#{:02X}{:02X}{:02X}", r, g, b),
                Color::Reset => "reset".to_string(),
                // Named colors are written as a best-effort hex approximation
                Color::Black => "#000000".to_string(),
                Color::Red => "#FF0000".to_string(),
                Color::Green => "#00FF00".to_string(),
                Color::Yellow => "#FFFF00".to_string(),
                Color::Blue => "#0000FF".to_string(),
                Color::Magenta => "#FF00FF".to_string(),
                Color::Cyan => "#00FFFF".to_string(),
                Color::Gray => "#B3B3B3".to_string(),
                Color::DarkGray => "#4D4D4D".to_string(),
                Color::LightRed => "#FF6666".to_string(),
                Color::LightGreen => "#66FF66".to_string(),
                Color::LightYellow => "#FFFF66".to_string(),
                Color::LightBlue => "#6666FF".to_string(),
                Color::LightMagenta => "#FF66FF".to_string(),
                Color::LightCyan => "#66FFFF".to_string(),
                Color::White => "#FFFFFF".to_string(),
                Color::Indexed(_) => "reset".to_string(),
            }
        }

        let entries = [
            ("text", self.text),
            ("muted", self.muted),
            ("title", self.title),
            ("border", self.border),
            ("header_bg", self.header_bg),
            ("header_fg", self.header_fg),
            ("status_bg", self.status_bg),
            ("status_fg", self.status_fg),
            ("highlight_fg", self.highlight_fg),
            ("highlight_bg", self.highlight_bg),
            ("error", self.error),
            ("success", self.success),
        ];
        for (k, v) in entries {
            let _ = writeln!(&mut buf, "{} = {}", k, color_to_str(v));
        }
        std::fs::write(path, buf)
    }

    /// Load `path`, then the user config directory; otherwise write `mocha` to `path`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        if let Some(existing) = config_file_read_path("theme.conf") {
            return Self::from_file(&existing).unwrap_or_else(Self::mocha);
        }
        let t = Self::mocha();
        if let Err(e) = t.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default theme.conf");
        }
        t
    }
}

/// Directory holding user config files: `$XDG_CONFIG_HOME/clients-admin` or `~/.config/clients-admin`.
pub fn config_dir() -> Option<PathBuf> {
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
    Some(base.join("clients-admin"))
}

/// Path of `name` in [`config_dir`], if such a file exists.
pub fn config_file_read_path(name: &str) -> Option<String> {
    let candidate = config_dir()?.join(name);
    if candidate.is_file() {
        candidate.to_str().map(str::to_string)
    } else {
        None
    }
}

pub struct AppState {
    pub started_at: Instant,
    pub route: Route,
    pub list: ListController,
    pub create: CreateController,
    pub edit: EditController,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub keymap: Keymap,
    pub show_help: bool,
    pub rows_per_page: usize,
    pub should_quit: bool,
    /// Base URL shown in the status bar.
    pub api_label: String,
}

impl AppState {
    pub fn new(theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            route: Route::List,
            list: ListController::default(),
            create: CreateController::default(),
            edit: EditController::default(),
            input_mode: InputMode::Normal,
            theme,
            keymap,
            show_help: false,
            rows_per_page: 10,
            should_quit: false,
            api_label: String::new(),
        }
    }

    /// Switch screens. The target controller starts from scratch.
    pub fn navigate(&mut self, route: Route) -> Option<Request> {
        info!(path = %route.path(), "navigate");
        self.input_mode = InputMode::Normal;
        self.show_help = false;
        self.route = route.clone();
        let effect = match route {
            Route::List => {
                // the counter survives so answers to pre-remount loads are dropped
                self.list = ListController {
                    load_seq: self.list.load_seq,
                    ..ListController::default()
                };
                Some(self.list.mount())
            }
            Route::Create => {
                self.create = CreateController::default();
                None
            }
            Route::Edit(id) => {
                self.edit = EditController::default();
                self.edit.mount(id)
            }
        };
        effect.and_then(|e| self.apply_effect(e))
    }

    /// Turn a controller effect into the next request, following navigation.
    pub fn apply_effect(&mut self, effect: Effect) -> Option<Request> {
        match effect {
            Effect::Request(req) => Some(req),
            Effect::Navigate(route) => self.navigate(route),
        }
    }

    /// Hand a finished request to its controller.
    pub fn apply_outcome(&mut self, outcome: Outcome) -> Option<Request> {
        match outcome {
            Outcome::Listed { seq, result } => {
                self.list.on_loaded(seq, result);
                None
            }
            Outcome::Fetched { id, result } => {
                self.edit.on_loaded(&id, result);
                None
            }
            Outcome::Created(result) => {
                let effect = self.create.on_created(result);
                if self.route == Route::Create {
                    effect.and_then(|e| self.apply_effect(e))
                } else {
                    None
                }
            }
            Outcome::Updated { id, result } => {
                self.edit.on_updated(&id, result);
                None
            }
            Outcome::Deleted { id, result } => self
                .list
                .on_deleted(&id, result)
                .and_then(|e| self.apply_effect(e)),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::mocha(), Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
