/// What the platform expects when the last window closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformConvention {
    /// Quit the application (Windows, Linux)
    QuitOnLastWindowClosed,
    /// Keep running without windows until explicitly quit (macOS)
    PersistInBackground,
}

/// Answers which convention applies. Injected so tests can pick one.
pub trait PlatformQuery: Send + Sync {
    fn convention(&self) -> PlatformConvention;
}

/// The platform this binary was compiled for.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostPlatform;

impl PlatformQuery for HostPlatform {
    fn convention(&self) -> PlatformConvention {
        if cfg!(target_os = "macos") {
            PlatformConvention::PersistInBackground
        } else {
            PlatformConvention::QuitOnLastWindowClosed
        }
    }
}
