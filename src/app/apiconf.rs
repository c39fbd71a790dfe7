//! API settings: parse/write `api.conf` and build a [`ClientService`] from it.
//!
//! The file uses the same `<key> = <value>` format as the theme and keymap
//! files. Unknown keys and unparsable values are skipped and keep their
//! defaults.

use std::time::Duration;

use url::Url;

use crate::api::{ClientService, CpfWireFormat};
use crate::error::{Context, Result, simple_error};

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Settings for reaching the `/clients` service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL the `/clients` path is appended to.
    pub base_url: String,
    /// Request timeout in seconds; `0` leaves the transport default (none).
    pub timeout_secs: u64,
    /// How CPF values are written into create/update bodies.
    pub cpf_wire_format: CpfWireFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 0,
            cpf_wire_format: CpfWireFormat::Digits,
        }
    }
}

impl ApiConfig {
    /// Load settings from `path`, falling back to the user config directory.
    ///
    /// When neither exists, defaults are written to `path` for later editing.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        if let Some(existing) = crate::app::config_file_read_path("api.conf") {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let cfg = Self::default();
        if let Err(e) = cfg.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default api.conf");
        }
        cfg
    }

    /// Parse an `api.conf` file. Returns `None` if it cannot be read.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse `api.conf` contents on top of the defaults.
    pub fn parse(contents: &str) -> Self {
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            match lhs {
                "base_url" => cfg.base_url = rhs.to_string(),
                "timeout_secs" => {
                    if let Ok(secs) = rhs.parse() {
                        cfg.timeout_secs = secs;
                    }
                }
                "cpf_wire_format" => {
                    if let Some(fmt) = CpfWireFormat::parse(rhs) {
                        cfg.cpf_wire_format = fmt;
                    }
                }
                _ => {}
            }
        }
        cfg
    }

    /// Write the settings in `<key> = <value>` form with explanatory comments.
    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# clients-admin API settings\n");
        buf.push_str("# base_url: the /clients resource is appended to this URL\n");
        buf.push_str("# timeout_secs: 0 means no request timeout\n");
        buf.push_str("# cpf_wire_format: digits (11122233344) | masked (111.222.333-44)\n\n");
        let _ = writeln!(&mut buf, "base_url = {}", self.base_url);
        let _ = writeln!(&mut buf, "timeout_secs = {}", self.timeout_secs);
        let _ = writeln!(
            &mut buf,
            "cpf_wire_format = {}",
            self.cpf_wire_format.as_str()
        );
        std::fs::write(path, buf)
    }

    /// Validate `base_url`: it must be an absolute http(s) URL that can carry a path.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let url = Url::parse(self.base_url.trim())
            .with_ctx(|| format!("invalid base_url '{}'", self.base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(simple_error(format!(
                "base_url must use http or https, got '{}'",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() {
            return Err(simple_error(format!(
                "base_url '{}' cannot carry a path",
                self.base_url
            )));
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }

    /// Build the HTTP client these settings describe.
    pub fn build_service(&self) -> Result<ClientService> {
        let base = self.parsed_base_url()?;
        let service = ClientService::new(base, self.timeout(), self.cpf_wire_format)?;
        Ok(service)
    }
}
