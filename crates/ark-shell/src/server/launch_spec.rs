use crate::ServerSettings;

use std::path::{Path, PathBuf};

/// Everything needed to start the standalone server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Added on top of the inherited environment
    pub envs: Vec<(String, String)>,
}

impl LaunchSpec {
    /// `node <entry_point> -H <host> -p <port>`, run from the script's own directory.
    pub fn standalone(entry_point: &Path, settings: &ServerSettings) -> Self {
        let working_dir = entry_point
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let port = settings.port.to_string();

        Self {
            program: settings.node_binary.clone(),
            args: vec![
                entry_point.to_string_lossy().into_owned(),
                "-H".into(),
                settings.host.clone(),
                "-p".into(),
                port.clone(),
            ],
            working_dir,
            envs: vec![
                ("NODE_ENV".into(), "production".into()),
                ("PORT".into(), port),
                ("HOSTNAME".into(), settings.host.clone()),
            ],
        }
    }

    pub fn env(&self, key: &str) -> Option<&str> {
        self.envs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}
