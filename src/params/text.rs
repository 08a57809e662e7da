//! Message text parameters.

/// Text overlay drawn on top of the flashing fill
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Literal message
    pub message: &'static str,

    /// Font size (points)
    pub size_pt: f32,

    /// Rasterization resolution (dots per inch)
    /// 80 DPI at 25pt gives roughly 28px glyphs, which fits a 300px window
    pub dpi: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            message: "YOU ARE AN IDIOT",
            size_pt: 25.0,
            dpi: 80.0,
        }
    }
}

impl TextConfig {
    /// Font size in pixels (points are 1/72 inch)
    pub fn pixel_size(&self) -> f32 {
        self.size_pt * self.dpi / 72.0
    }

    /// Baseline origin for a surface of the given size (pixels)
    /// Left edge at 1/8 of the width, baseline at half the height
    pub fn origin(&self, width: u32, height: u32) -> (i32, i32) {
        ((width / 8) as i32, (height / 2) as i32)
    }
}
