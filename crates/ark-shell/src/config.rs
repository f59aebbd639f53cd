//! Shell configuration: `shell.toml` plus environment overrides.

use crate::{
    CONFIG_FILENAME, ProbeSettings, ProbeTarget, ServerSettings, ShellError, ShellResult,
    WindowSettings,
};

use std::panic::Location;
use std::path::Path;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Full URL the window loads; used verbatim when set
    pub start_url: Option<String>,
    pub server: ServerSettings,
    pub probe: ProbeSettings,
    pub window: WindowSettings,
}

impl ShellConfig {
    /// Load config from `<config_dir>/shell.toml` if present, else defaults,
    /// then apply environment overrides.
    ///
    /// Environment overrides:
    /// - `NEXT_HOST` - server host
    /// - `PORT`, `NEXT_PORT` - server port (`NEXT_PORT` wins)
    /// - `ARK_START_URL` - full target URL
    /// - `ARK_NODE_BINARY` - Node.js runtime
    /// - `ARK_PROBE_MAX_ATTEMPTS`, `ARK_PROBE_RETRY_DELAY_MS`, `ARK_PROBE_ATTEMPT_TIMEOUT_MS`
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load(config_dir: &Path) -> ShellResult<Self> {
        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| ShellError::ConfigParse {
                path: config_path.clone(),
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?
        } else {
            Self::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Validate all configuration.
    pub fn validate(&self) -> ShellResult<()> {
        self.server.validate()?;
        self.probe.validate()?;
        self.window.validate()?;

        // Surfaces a bad ARK_START_URL at startup instead of at first probe
        self.probe_target()?;

        Ok(())
    }

    /// URL the display surface loads and the prober checks.
    pub fn target_url(&self) -> ShellResult<Url> {
        let raw = match &self.start_url {
            Some(url) => url.clone(),
            None => self.server.base_url(),
        };

        Url::parse(&raw).map_err(|e| ShellError::invalid_target(raw, e.to_string()))
    }

    pub fn probe_target(&self) -> ShellResult<ProbeTarget> {
        ProbeTarget::from_url(&self.target_url()?)
    }

    /// Log configuration summary.
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} (node: {})",
            self.server.host, self.server.port, self.server.node_binary
        );
        match &self.start_url {
            Some(url) => info!("  start_url: {url} (override)"),
            None => info!("  start_url: {}", self.server.base_url()),
        }
        info!(
            "  probe: attempts={}, delay={}ms, timeout={}ms",
            self.probe.max_attempts, self.probe.retry_delay_ms, self.probe.attempt_timeout_ms
        );
        info!(
            "  window: {}x{} \"{}\"",
            self.window.width, self.window.height, self.window.title
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("NEXT_HOST", &mut self.server.host);
        Self::apply_env_parse("PORT", &mut self.server.port);
        Self::apply_env_parse("NEXT_PORT", &mut self.server.port);
        Self::apply_env_string("ARK_NODE_BINARY", &mut self.server.node_binary);

        Self::apply_env_option_string("ARK_START_URL", &mut self.start_url);

        // Probe
        Self::apply_env_parse("ARK_PROBE_MAX_ATTEMPTS", &mut self.probe.max_attempts);
        Self::apply_env_parse("ARK_PROBE_RETRY_DELAY_MS", &mut self.probe.retry_delay_ms);
        Self::apply_env_parse(
            "ARK_PROBE_ATTEMPT_TIMEOUT_MS",
            &mut self.probe.attempt_timeout_ms,
        );
    }

    /// Helper: Apply environment variable override for String values.
    /// An empty value keeps the current one.
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name)
            && !val.is_empty()
        {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name)
            && !val.is_empty()
        {
            *target = Some(val);
        }
    }
}
