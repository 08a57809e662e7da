//! winit glue: window attributes, monitor bounds and window placement.

use glam::DVec2;
use winit::dpi::{LogicalSize, PhysicalPosition};
use winit::window::{Window, WindowAttributes};

use crate::params::WindowConfig;
use crate::worker::{Placement, ScreenBounds};

/// Attributes for the fixed-size, undecorated worker window
///
/// The window starts hidden; it is shown once the first tick has placed it.
pub fn window_attributes(config: &WindowConfig) -> WindowAttributes {
    Window::default_attributes()
        .with_title(config.title)
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_decorations(config.decorated)
        .with_resizable(false)
        .with_visible(false)
}

/// Monitor bounds plus the monitor's screen origin
pub type MonitorArea = (ScreenBounds, PhysicalPosition<i32>);

/// Monitor the window is on, as bounds plus the monitor's screen origin
///
/// Falls back to the primary monitor; `None` if the window system reports
/// neither.
pub fn screen_bounds(window: &Window) -> Option<MonitorArea> {
    let monitor = window
        .current_monitor()
        .or_else(|| window.primary_monitor())?;

    let monitor_size = monitor.size();
    let window_size = window.outer_size();
    let bounds = ScreenBounds::new(
        DVec2::new(monitor_size.width as f64, monitor_size.height as f64),
        DVec2::new(window_size.width as f64, window_size.height as f64),
    );
    Some((bounds, monitor.position()))
}

/// Last monitor area the window system reported
///
/// A frame without monitor information reuses the previous area. Before
/// the first report there is nothing to move within and the caller skips
/// the tick.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonitorCache {
    last: Option<MonitorArea>,
}

impl MonitorCache {
    /// Record a fresh report, if any, and return the area to use this frame
    pub fn resolve(&mut self, reported: Option<MonitorArea>) -> Option<MonitorArea> {
        if reported.is_some() {
            self.last = reported;
        }
        self.last
    }
}

/// Places a window relative to a monitor origin
pub struct WindowPlacement<'a> {
    window: &'a Window,
    origin: PhysicalPosition<i32>,
}

impl<'a> WindowPlacement<'a> {
    pub fn new(window: &'a Window, origin: PhysicalPosition<i32>) -> Self {
        Self { window, origin }
    }
}

impl Placement for WindowPlacement<'_> {
    fn place(&mut self, position: DVec2) {
        self.window.set_outer_position(PhysicalPosition::new(
            self.origin.x + position.x as i32,
            self.origin.y + position.y as i32,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(width: f64, x: i32) -> MonitorArea {
        (
            ScreenBounds::new(DVec2::new(width, 1080.0), DVec2::new(300.0, 300.0)),
            PhysicalPosition::new(x, 0),
        )
    }

    #[test]
    fn test_window_attributes() {
        let attributes = window_attributes(&WindowConfig::default());

        assert_eq!(attributes.title, "YouAreAnIdiot");
        assert!(!attributes.decorations);
        assert!(!attributes.resizable);
        // Shown only after the first placement
        assert!(!attributes.visible);
    }

    #[test]
    fn test_no_area_before_first_report() {
        let mut cache = MonitorCache::default();
        assert_eq!(cache.resolve(None), None);
        assert_eq!(cache.resolve(None), None);
    }

    #[test]
    fn test_missing_report_reuses_last_area() {
        let mut cache = MonitorCache::default();
        assert_eq!(cache.resolve(Some(area(1920.0, 0))), Some(area(1920.0, 0)));
        assert_eq!(cache.resolve(None), Some(area(1920.0, 0)));
    }

    #[test]
    fn test_new_report_replaces_last_area() {
        let mut cache = MonitorCache::default();
        cache.resolve(Some(area(1920.0, 0)));
        assert_eq!(cache.resolve(Some(area(2560.0, 1920))), Some(area(2560.0, 1920)));
        assert_eq!(cache.resolve(None), Some(area(2560.0, 1920)));
    }
}
