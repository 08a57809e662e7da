//! Worker window configuration.

/// Worker window configuration
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Window width (pixels)
    pub width: u32,

    /// Window height (pixels)
    pub height: u32,

    /// Title (not shown while undecorated, still reported to the window manager)
    pub title: &'static str,

    /// Draw title bar and borders
    pub decorated: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 300,
            title: "YouAreAnIdiot",
            decorated: false,
        }
    }
}
