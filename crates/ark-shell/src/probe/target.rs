use crate::{ShellError, ShellResult};

use std::fmt;

use url::Url;

/// Transport selected by the target URL's scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeScheme {
    Http,
    Https,
}

impl ProbeScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    pub fn default_port(&self) -> u16 {
        match self {
            Self::Http => 80,
            Self::Https => 443,
        }
    }
}

/// Where readiness must be confirmed. Built once at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeTarget {
    scheme: ProbeScheme,
    host: String,
    port: u16,
    path: String,
}

impl ProbeTarget {
    pub fn new(
        scheme: ProbeScheme,
        host: impl Into<String>,
        port: u16,
        path: impl Into<String>,
    ) -> Self {
        let path = path.into();
        let path = if path.starts_with('/') {
            path
        } else {
            format!("/{path}")
        };

        Self {
            scheme,
            host: host.into(),
            port,
            path,
        }
    }

    /// Build a target from a URL. Query and fragment are not part of the probe.
    pub fn from_url(url: &Url) -> ShellResult<Self> {
        let scheme = match url.scheme() {
            "http" => ProbeScheme::Http,
            "https" => ProbeScheme::Https,
            other => {
                return Err(ShellError::invalid_target(
                    url.as_str(),
                    format!("unsupported scheme '{other}', expected http or https"),
                ));
            }
        };

        let host = url
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ShellError::invalid_target(url.as_str(), "missing host"))?;

        let port = url.port().unwrap_or_else(|| scheme.default_port());

        Ok(Self::new(scheme, host, port, url.path()))
    }

    pub fn scheme(&self) -> ProbeScheme {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn url(&self) -> String {
        format!(
            "{}://{}:{}{}",
            self.scheme.as_str(),
            self.host,
            self.port,
            self.path
        )
    }
}

impl fmt::Display for ProbeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}
