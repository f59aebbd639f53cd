use crate::{DEFAULT_HOST, DEFAULT_NODE_BINARY, DEFAULT_PORT, ShellError, ShellResult};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host the standalone server binds to and the shell probes
    pub host: String,
    pub port: u16,
    /// Node.js runtime used to run the standalone `server.js`
    pub node_binary: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
            node_binary: String::from(DEFAULT_NODE_BINARY),
        }
    }
}

impl ServerSettings {
    pub fn validate(&self) -> ShellResult<()> {
        if self.host.trim().is_empty() {
            return Err(ShellError::config_invalid("server.host must not be empty"));
        }

        if self.port == 0 {
            return Err(ShellError::config_invalid(
                "server.port must be non-zero, the shell has to know where to probe",
            ));
        }

        if self.node_binary.trim().is_empty() {
            return Err(ShellError::config_invalid(
                "server.node_binary must not be empty",
            ));
        }

        Ok(())
    }

    /// Default target URL when no explicit start URL is configured.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
