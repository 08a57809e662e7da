//! Message rasterization.
//!
//! The message never changes, so it is rasterized once at startup into a
//! coverage mask; each frame only blends the mask in the current colors.

use ab_glyph::{point, Font, FontRef, GlyphId, OutlinedGlyph, PxScale, ScaleFont};

use crate::error::TextError;
use crate::params::TextConfig;

/// Anti-aliased coverage of a laid-out line of text
#[derive(Debug, Clone, PartialEq)]
pub struct TextMask {
    /// Offset of the mask's top-left from the baseline origin (pixels)
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major coverage in `[0, 1]`
    coverage: Vec<f32>,
}

impl TextMask {
    /// Lay out and rasterize `config.message` with the given font
    pub fn rasterize(font_data: &[u8], config: &TextConfig) -> Result<Self, TextError> {
        let font = FontRef::try_from_slice(font_data)?;
        let scale = PxScale::from(config.pixel_size());
        let scaled = font.as_scaled(scale);

        let mut caret = 0.0;
        let mut previous: Option<GlyphId> = None;
        let mut outlined: Vec<OutlinedGlyph> = Vec::new();

        for ch in config.message.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            let glyph = id.with_scale_and_position(scale, point(caret, 0.0));
            caret += scaled.h_advance(id);
            previous = Some(id);

            // Whitespace has no outline
            if let Some(g) = font.outline_glyph(glyph) {
                outlined.push(g);
            }
        }

        Ok(Self::from_glyphs(&outlined))
    }

    fn from_glyphs(glyphs: &[OutlinedGlyph]) -> Self {
        let Some(first) = glyphs.first() else {
            return Self::empty();
        };

        let mut min = first.px_bounds().min;
        let mut max = first.px_bounds().max;
        for g in glyphs {
            let b = g.px_bounds();
            min.x = min.x.min(b.min.x);
            min.y = min.y.min(b.min.y);
            max.x = max.x.max(b.max.x);
            max.y = max.y.max(b.max.y);
        }

        let left = min.x.floor() as i32;
        let top = min.y.floor() as i32;
        let width = (max.x.ceil() as i32 - left).max(0) as u32;
        let height = (max.y.ceil() as i32 - top).max(0) as u32;
        let mut coverage = vec![0.0f32; (width * height) as usize];

        for g in glyphs {
            let b = g.px_bounds();
            let gx = b.min.x as i32 - left;
            let gy = b.min.y as i32 - top;
            g.draw(|x, y, c| {
                let px = gx + x as i32;
                let py = gy + y as i32;
                if px >= 0 && py >= 0 && (px as u32) < width && (py as u32) < height {
                    let cell = &mut coverage[(py as u32 * width + px as u32) as usize];
                    *cell = (*cell + c).min(1.0);
                }
            });
        }

        Self {
            left,
            top,
            width,
            height,
            coverage,
        }
    }

    fn empty() -> Self {
        Self {
            left: 0,
            top: 0,
            width: 0,
            height: 0,
            coverage: Vec::new(),
        }
    }

    /// Coverage at mask-local pixel coordinates; zero outside the mask
    pub fn coverage(&self, x: u32, y: u32) -> f32 {
        if x < self.width && y < self.height {
            self.coverage[(y * self.width + x) as usize]
        } else {
            0.0
        }
    }

    pub fn is_empty(&self) -> bool {
        self.coverage.iter().all(|&c| c == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::params::AudioConfig;

    fn font() -> &'static [u8] {
        Assets::embedded()
            .load(AudioConfig::default().font_name)
            .unwrap()
    }

    #[test]
    fn test_message_rasterizes_above_baseline() {
        let config = TextConfig::default();
        let mask = TextMask::rasterize(font(), &config).unwrap();

        assert!(!mask.is_empty());
        // Capitals sit above the baseline
        assert!(mask.top < 0);
        assert!(mask.top + mask.height as i32 <= 1);
        // Cap height roughly 70% of the pixel size
        assert!(mask.height as f32 > config.pixel_size() * 0.5);
        assert!((mask.height as f32) < config.pixel_size());
    }

    #[test]
    fn test_message_fits_default_window() {
        let config = TextConfig::default();
        let mask = TextMask::rasterize(font(), &config).unwrap();
        let (ox, _) = config.origin(300, 300);

        assert!(ox + mask.left >= 0);
        assert!(ox + mask.left + mask.width as i32 <= 300);
    }

    #[test]
    fn test_coverage_bounds() {
        let mask = TextMask::rasterize(font(), &TextConfig::default()).unwrap();

        assert_eq!(mask.coverage(mask.width, 0), 0.0);
        assert_eq!(mask.coverage(0, mask.height), 0.0);
        for y in 0..mask.height {
            for x in 0..mask.width {
                let c = mask.coverage(x, y);
                assert!((0.0..=1.0).contains(&c));
            }
        }
    }

    #[test]
    fn test_blank_message() {
        let config = TextConfig {
            message: "   ",
            ..TextConfig::default()
        };
        let mask = TextMask::rasterize(font(), &config).unwrap();
        assert_eq!(mask.width, 0);
        assert!(mask.is_empty());
    }

    #[test]
    fn test_invalid_font() {
        let err = TextMask::rasterize(b"not a font", &TextConfig::default()).unwrap_err();
        assert!(matches!(err, TextError::Font(_)));
    }
}
