//! Seam to the windowing runtime.

use crate::ShellResult;

use url::Url;

/// Parameters for a new display surface.
///
/// Content loaded into a surface is always isolated from host-privileged
/// APIs; hosts must not offer a way to turn that off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceSpec {
    pub label: String,
    pub title: String,
    pub width: u32,
    pub height: u32,
}

/// Handle to a window created by a [`DisplayHost`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DisplaySurface {
    label: String,
}

impl DisplaySurface {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

/// The windowing runtime as seen by the lifecycle controller.
pub trait DisplayHost: Send + Sync {
    /// Create an empty surface. Content is loaded separately.
    fn open_surface(&self, spec: &SurfaceSpec) -> ShellResult<DisplaySurface>;

    fn load_url(&self, surface: &DisplaySurface, url: &Url) -> ShellResult<()>;

    /// Labels of every surface that currently exists.
    fn surfaces(&self) -> Vec<DisplaySurface>;

    /// Quit the whole application.
    fn quit(&self);
}
