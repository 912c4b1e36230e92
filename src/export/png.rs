//! PNG card writer: the same shapes rasterized with `image`.

use image::{Rgb as Pixel, RgbImage};

use super::card::{self, Rgb, Shape, HEIGHT, WIDTH};
use super::glyphs::{glyph, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::stats::WrappedStats;

fn pixel(color: Rgb) -> Pixel<u8> {
    Pixel([color.0, color.1, color.2])
}

/// Fill a rectangle, clipped to the image. Corners within `radius` of a
/// corner point are left untouched.
fn fill_rect(img: &mut RgbImage, x: i32, y: i32, w: u32, h: u32, color: Rgb, radius: u32) {
    let (img_w, img_h) = img.dimensions();
    let x0 = x.max(0) as u32;
    let y0 = y.max(0) as u32;
    let x1 = ((x as i64 + w as i64).clamp(0, img_w as i64)) as u32;
    let y1 = ((y as i64 + h as i64).clamp(0, img_h as i64)) as u32;
    let r = radius.min(w / 2).min(h / 2) as i64;
    let value = pixel(color);

    for py in y0..y1 {
        for px in x0..x1 {
            if r > 0 && outside_corner(px as i64 - x as i64, py as i64 - y as i64, w as i64, h as i64, r) {
                continue;
            }
            img.put_pixel(px, py, value);
        }
    }
}

fn outside_corner(dx: i64, dy: i64, w: i64, h: i64, r: i64) -> bool {
    let cx = if dx < r {
        r
    } else if dx >= w - r {
        w - r - 1
    } else {
        return false;
    };
    let cy = if dy < r {
        r
    } else if dy >= h - r {
        h - r - 1
    } else {
        return false;
    };
    let (ex, ey) = (dx - cx, dy - cy);
    ex * ex + ey * ey > r * r
}

/// Draw `text` with its top-left corner at (`x`, `y`). Bold doubles each
/// column.
fn draw_text(img: &mut RgbImage, x: i32, y: i32, size: u32, text: &str, color: Rgb, bold: bool) {
    let scale = (size / GLYPH_HEIGHT).max(1);
    let mut pen_x = x;
    for c in text.chars() {
        let rows = glyph(c);
        for (row, bits) in rows.iter().enumerate() {
            for col in 0..GLYPH_WIDTH {
                if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                    continue;
                }
                let gx = pen_x + (col * scale) as i32;
                let gy = y + (row as u32 * scale) as i32;
                let w = if bold { scale + scale / 2 } else { scale };
                fill_rect(img, gx, gy, w, scale, color, 0);
            }
        }
        pen_x += (ADVANCE * scale) as i32;
    }
}

/// Rasterize the card.
pub fn render_png(stats: &WrappedStats) -> RgbImage {
    let mut img = RgbImage::new(WIDTH, HEIGHT);
    for shape in card::layout(stats) {
        match shape {
            Shape::Rect {
                x,
                y,
                w,
                h,
                fill,
                radius,
            } => fill_rect(&mut img, x, y, w, h, fill, radius),
            Shape::Text {
                x,
                y,
                size,
                text,
                fill,
                bold,
            } => draw_text(&mut img, x, y, size, &text, fill, bold),
        }
    }
    img
}
