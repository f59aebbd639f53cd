use serde::Serialize;

/// Whether the shell runs from a packaged build or from live sources.
///
/// Supplied by the host runtime; the controller never works it out itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LaunchMode {
    /// Built artifact: spawn the bundled server and wait for it
    Packaged,
    /// An external dev server is assumed to be serving already
    Development,
}

impl LaunchMode {
    pub fn from_packaged(is_packaged: bool) -> Self {
        if is_packaged {
            Self::Packaged
        } else {
            Self::Development
        }
    }

    pub fn is_packaged(&self) -> bool {
        matches!(self, Self::Packaged)
    }
}
