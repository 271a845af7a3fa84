use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;

use crate::models::HexColor;

/// Edge length of composited marker icons, in pixels.
pub const ICON_SIZE: u32 = 48;

/// Width of the white ring around the colored disc.
pub const RING_WIDTH: u32 = 3;

/// Share of the disc diameter the glyph may occupy.
const GLYPH_FILL: f32 = 0.6;

/// Decode glyph bytes (any format `image` can sniff).
pub fn decode_glyph(bytes: &[u8]) -> image::ImageResult<DynamicImage> {
    image::load_from_memory(bytes)
}

/// Recolor a glyph to white, keeping only its alpha channel as the mask.
pub fn tint_white(glyph: &DynamicImage) -> RgbaImage {
    let mut rgba = glyph.to_rgba8();
    for pixel in rgba.pixels_mut() {
        let alpha = pixel[3];
        *pixel = Rgba([255, 255, 255, alpha]);
    }
    rgba
}

/// A transparent square with a white-ringed disc of `color`.
pub fn filled_disc(size: u32, color: HexColor) -> RgbaImage {
    let mut canvas = RgbaImage::new(size, size);
    let center = (size as i32 / 2, size as i32 / 2);
    let outer = (size / 2).saturating_sub(1) as i32;
    let inner = outer - RING_WIDTH as i32;

    draw_filled_circle_mut(&mut canvas, center, outer, HexColor::WHITE.to_rgba());
    if inner > 0 {
        draw_filled_circle_mut(&mut canvas, center, inner, color.to_rgba());
    }
    canvas
}

/// Scale the white glyph to fit the disc and center it on a fresh disc of `color`.
pub fn composite(white_glyph: &RgbaImage, color: HexColor, size: u32) -> RgbaImage {
    let mut canvas = filled_disc(size, color);

    let (width, height) = white_glyph.dimensions();
    if width == 0 || height == 0 {
        return canvas;
    }

    let target = (size as f32 * GLYPH_FILL).max(1.0);
    let scale = (target / width as f32).min(target / height as f32);
    let scaled_w = ((width as f32 * scale) as u32).max(1);
    let scaled_h = ((height as f32 * scale) as u32).max(1);

    let scaled = image::imageops::resize(white_glyph, scaled_w, scaled_h, FilterType::CatmullRom);

    let offset_x = (size.saturating_sub(scaled_w)) / 2;
    let offset_y = (size.saturating_sub(scaled_h)) / 2;
    image::imageops::overlay(&mut canvas, &scaled, offset_x.into(), offset_y.into());

    canvas
}
