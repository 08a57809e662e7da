//! CPU frame composition: flashing fill plus the message.

use image::{Rgba, RgbaImage};

use crate::text::TextMask;
use crate::worker::WorkerState;

pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Fill color for the current flash phase
pub fn fill_color(flash_on: bool) -> Rgba<u8> {
    if flash_on {
        WHITE
    } else {
        BLACK
    }
}

/// Text color contrasting with the fill
pub fn text_color(flash_on: bool) -> Rgba<u8> {
    fill_color(!flash_on)
}

/// Draw one frame.
///
/// Before the worker has started (`state == None`) the frame uses the
/// "off" phase. `origin` is the text baseline start in frame pixels.
pub fn render(
    state: Option<&WorkerState>,
    text: &TextMask,
    origin: (i32, i32),
    frame: &mut RgbaImage,
) {
    let flash_on = state.is_some_and(|s| s.flash_on);
    let background = fill_color(flash_on);
    let foreground = text_color(flash_on);

    for pixel in frame.pixels_mut() {
        *pixel = background;
    }

    let (width, height) = frame.dimensions();
    let left = origin.0 + text.left;
    let top = origin.1 + text.top;

    for my in 0..text.height {
        let y = top + my as i32;
        if y < 0 || y as u32 >= height {
            continue;
        }
        for mx in 0..text.width {
            let x = left + mx as i32;
            if x < 0 || x as u32 >= width {
                continue;
            }
            let c = text.coverage(mx, my);
            if c > 0.0 {
                frame.put_pixel(x as u32, y as u32, blend(background, foreground, c));
            }
        }
    }
}

fn blend(background: Rgba<u8>, foreground: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let mix = |b: u8, f: u8| (b as f32 + (f as f32 - b as f32) * coverage).round() as u8;
    Rgba([
        mix(background[0], foreground[0]),
        mix(background[1], foreground[1]),
        mix(background[2], foreground[2]),
        255,
    ])
}
