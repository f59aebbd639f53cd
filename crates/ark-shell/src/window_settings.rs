use crate::{
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_TITLE, DEFAULT_WINDOW_WIDTH, ShellError, ShellResult,
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: String::from(DEFAULT_WINDOW_TITLE),
            width: DEFAULT_WINDOW_WIDTH,
            height: DEFAULT_WINDOW_HEIGHT,
        }
    }
}

impl WindowSettings {
    pub fn validate(&self) -> ShellResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(ShellError::config_invalid(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        Ok(())
    }
}
