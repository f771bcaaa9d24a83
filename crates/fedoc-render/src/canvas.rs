//! # Software Canvas — RGB8 Raster Drawing
//!
//! A minimal in-memory canvas with the primitives the template renderer
//! needs: rectangle fill, horizontal rule, glyph text, image blit, and a
//! generated placeholder pattern for missing thumbnails. All drawing is
//! clipped to the canvas bounds; out-of-range coordinates are clamped,
//! never panicking.

use serde::{Deserialize, Serialize};

use crate::font::{glyph, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};

/// An RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Paper white.
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    /// Ink black.
    pub const BLACK: Rgb = Rgb(16, 16, 16);
    /// Band/table separator gray.
    pub const GRAY: Rgb = Rgb(180, 180, 180);
    /// Light fill for alternating structure.
    pub const LIGHT: Rgb = Rgb(235, 235, 235);
}

/// A finished raster: tightly packed RGB8 rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RasterImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGB8 pixel data, row-major, `width * height * 3` bytes.
    pub pixels: Vec<u8>,
}

impl RasterImage {
    /// A solid-color image.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Self {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color.0, color.1, color.2]);
        }
        Self { width, height, pixels }
    }

    /// The pixel at (x, y), if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * 3) as usize;
        Some(Rgb(self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]))
    }
}

/// Mutable drawing surface. Created immediately before rasterization and
/// consumed by [`Canvas::into_image`]; it never outlives the render call.
#[derive(Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// A canvas filled with the background color.
    pub fn new(width: u32, height: u32, background: Rgb) -> Self {
        let image = RasterImage::solid(width, height, background);
        Self { width, height, pixels: image.pixels }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    fn put(&mut self, x: u32, y: u32, color: Rgb) {
        if x >= self.width || y >= self.height {
            return;
        }
        let i = ((y * self.width + x) * 3) as usize;
        self.pixels[i] = color.0;
        self.pixels[i + 1] = color.1;
        self.pixels[i + 2] = color.2;
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.put(px, py, color);
            }
        }
    }

    /// A 1-pixel horizontal rule.
    pub fn hline(&mut self, x: u32, y: u32, w: u32, color: Rgb) {
        self.fill_rect(x, y, w, 1, color);
    }

    /// An unfilled rectangle border.
    pub fn rect_outline(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        self.fill_rect(x, y, w, 1, color);
        self.fill_rect(x, y.saturating_add(h.saturating_sub(1)), w, 1, color);
        self.fill_rect(x, y, 1, h, color);
        self.fill_rect(x.saturating_add(w.saturating_sub(1)), y, 1, h, color);
    }

    /// Draw text with the embedded 5×7 glyph set at an integer scale.
    pub fn draw_text(&mut self, x: u32, y: u32, text: &str, scale: u32, color: Rgb) {
        let scale = scale.max(1);
        let mut cursor = x;
        for c in text.chars() {
            let rows = glyph(c);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) != 0 {
                        self.fill_rect(
                            cursor + col * scale,
                            y + row as u32 * scale,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
            cursor = cursor.saturating_add(GLYPH_ADVANCE * scale);
        }
    }

    /// Pixel height of text at the given scale.
    pub fn text_height(scale: u32) -> u32 {
        GLYPH_HEIGHT * scale.max(1)
    }

    /// Blit an image into the given cell with nearest-neighbour scaling.
    pub fn blit_scaled(&mut self, x: u32, y: u32, w: u32, h: u32, image: &RasterImage) {
        if image.width == 0 || image.height == 0 || w == 0 || h == 0 {
            return;
        }
        for py in 0..h {
            for px in 0..w {
                let sx = px * image.width / w;
                let sy = py * image.height / h;
                if let Some(color) = image.pixel(sx, sy) {
                    self.put(x + px, y + py, color);
                }
            }
        }
    }

    /// The generated stand-in for a missing or broken thumbnail: an
    /// outlined cell with a diagonal cross.
    pub fn draw_placeholder(&mut self, x: u32, y: u32, w: u32, h: u32) {
        self.fill_rect(x, y, w, h, Rgb::LIGHT);
        self.rect_outline(x, y, w, h, Rgb::GRAY);
        if w == 0 || h == 0 {
            return;
        }
        for t in 0..w.max(h) {
            let dx = t * w / w.max(h);
            let dy = t * h / w.max(h);
            self.put(x + dx, y + dy, Rgb::GRAY);
            self.put(x + w.saturating_sub(1 + dx), y + dy, Rgb::GRAY);
        }
    }

    /// Finish drawing and hand back the raster.
    pub fn into_image(self) -> RasterImage {
        RasterImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels,
        }
    }
}
