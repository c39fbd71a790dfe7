//! clients-admin binary entry point.
//!
//! Parses the command line, sets up file logging and the tokio runtime,
//! initializes the terminal in raw mode, runs the TUI event loop, and
//! restores the terminal state on exit.
//!
use std::path::{Path, PathBuf};

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;
use tracing_subscriber::EnvFilter;

use clients_admin::api::CpfWireFormat;
use clients_admin::app::apiconf::ApiConfig;
use clients_admin::app::keymap::Keymap;
use clients_admin::app::{self, AppState, Route, Theme};
use clients_admin::error::{Context, Result, simple_error};

#[derive(Parser, Debug)]
#[command(
    name = "clients-admin",
    version,
    about = "Create, list, edit and delete client records served by a REST API"
)]
struct Cli {
    /// Base URL of the API; `/clients` is appended to it.
    #[arg(long, env = "CLIENTS_ADMIN_API_URL")]
    base_url: Option<String>,

    /// Request timeout in seconds (0 disables it).
    #[arg(long, env = "CLIENTS_ADMIN_TIMEOUT")]
    timeout_secs: Option<u64>,

    /// How CPF values are sent: digits or masked.
    #[arg(long)]
    cpf_wire_format: Option<String>,

    /// Path of the API settings file.
    #[arg(long, default_value = "api.conf")]
    config: String,

    /// Screen to start on: /, /cadastro or /editar/<id>.
    #[arg(long, default_value = "/")]
    route: String,

    /// Where log lines go; stdout belongs to the TUI.
    #[arg(long, env = "CLIENTS_ADMIN_LOG", default_value = "clients-admin.log")]
    log_file: PathBuf,
}

impl Cli {
    /// File settings overridden by whatever was given on the command line.
    fn api_config(&self) -> Result<ApiConfig> {
        let mut config = ApiConfig::load_or_init(&self.config);
        if let Some(url) = &self.base_url {
            config.base_url = url.clone();
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
        if let Some(fmt) = &self.cpf_wire_format {
            config.cpf_wire_format = CpfWireFormat::parse(fmt).ok_or_else(|| {
                simple_error(format!(
                    "unknown cpf wire format '{}', expected digits or masked",
                    fmt
                ))
            })?;
        }
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_ctx(|| format!("open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Initialize a Crossterm-backed `ratatui` terminal in raw mode.
fn init_terminal() -> Result<Terminal<CrosstermBackend<std::io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Program entry point: run the TUI and report any top-level error to stderr.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = cli.api_config()?;
    let service = config.build_service()?;
    let runtime = tokio::runtime::Runtime::new().with_ctx(|| "start tokio runtime".to_string())?;
    info!(base_url = %service.base_url(), cpf_wire_format = config.cpf_wire_format.as_str(), "starting");

    let mut state = AppState::new(
        Theme::load_or_init("theme.conf"),
        Keymap::load_or_init("keybinds.conf"),
    );
    state.api_label = service.base_url().to_string();
    let start = Route::from_path(&cli.route);

    let mut terminal = init_terminal().map_err(|e| format!("init terminal: {}", e))?;

    let res = app::run(
        &mut terminal,
        state,
        service,
        runtime.handle().clone(),
        start,
    );

    disable_raw_mode().ok();
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .ok();
    terminal.show_cursor().ok();

    if let Err(err) = res {
        tracing::error!(error = %err, "event loop failed");
        eprintln!("application error: {err:#}");
    }
    runtime.shutdown_background();
    Ok(())
}
