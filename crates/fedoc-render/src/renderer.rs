//! # Renderer — Template Rasterization
//!
//! Draws a composed [`Template`] onto an offscreen canvas and returns one
//! tall [`RasterImage`]. The canvas is created immediately before drawing
//! and consumed on return; it never survives the call on any path.
//!
//! The output emulates an A4-proportioned page at 96 dpi
//! ([`LOGICAL_PAGE_WIDTH`] = 794 px) with a device scale factor capped at
//! [`MAX_DEVICE_SCALE`], regardless of the actual device pixel ratio, to
//! bound output size.

use thiserror::Error;
use tracing::debug;

use crate::canvas::{Canvas, RasterImage, Rgb};
use crate::template::{Band, Template};

/// Logical page width in pixels: A4 width at 96 dpi.
pub const LOGICAL_PAGE_WIDTH: u32 = 794;

/// Upper bound on the device scale factor.
pub const MAX_DEVICE_SCALE: f32 = 2.0;

// ─── External images ─────────────────────────────────────────────────

/// Error loading an external image reference.
#[derive(Error, Debug)]
pub enum ImageError {
    /// The reference resolves to nothing.
    #[error("image not found: {reference}")]
    NotFound {
        /// The unresolvable reference.
        reference: String,
    },
    /// The reference resolved but the data cannot be decoded.
    #[error("image {reference} failed to decode: {detail}")]
    Decode {
        /// The broken reference.
        reference: String,
        /// Decoder diagnostic.
        detail: String,
    },
}

/// Source of product thumbnails and logos.
///
/// A failed load is never fatal to a render; the renderer substitutes a
/// generated placeholder, mirroring an `onerror` image fallback.
pub trait ImageSource {
    /// Resolve a reference to a decoded raster.
    fn load(&self, reference: &str) -> Result<RasterImage, ImageError>;
}

/// An image source with no images; every lookup takes the placeholder
/// path. The default for tooling and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoImages;

impl ImageSource for NoImages {
    fn load(&self, reference: &str) -> Result<RasterImage, ImageError> {
        Err(ImageError::NotFound { reference: reference.to_string() })
    }
}

// ─── Errors ──────────────────────────────────────────────────────────

/// Rasterization failure.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The template has no bands to draw.
    #[error("template is empty")]
    EmptyTemplate,
    /// The template is taller than the renderer is willing to rasterize.
    #[error("template height {height}px exceeds the rasterization bound")]
    Oversize {
        /// Logical template height.
        height: u32,
    },
}

/// Templates taller than this (logical pixels) indicate a runaway layout.
const MAX_TEMPLATE_HEIGHT: u32 = 120_000;

// ─── Renderer ────────────────────────────────────────────────────────

/// Rasterizes templates at a capped device scale.
pub struct Renderer<'a> {
    image_source: &'a dyn ImageSource,
    scale: u32,
}

impl<'a> Renderer<'a> {
    /// Create a renderer. `device_scale` is the runtime's pixel ratio;
    /// it is clamped to `[1, 2]` and rounded to an integer scale.
    pub fn new(image_source: &'a dyn ImageSource, device_scale: f32) -> Self {
        // NaN passes through clamp and would cast to 0; floor at 1.
        let clamped = device_scale.clamp(1.0, MAX_DEVICE_SCALE);
        Self { image_source, scale: (clamped.round() as u32).max(1) }
    }

    /// The integer scale actually applied.
    pub fn effective_scale(&self) -> u32 {
        self.scale
    }

    /// Draw the template into one tall raster image.
    pub fn rasterize(&self, template: &Template) -> Result<RasterImage, RenderError> {
        if template.bands.is_empty() {
            return Err(RenderError::EmptyTemplate);
        }
        let logical_height = template.total_height();
        if logical_height > MAX_TEMPLATE_HEIGHT {
            return Err(RenderError::Oversize { height: logical_height });
        }

        let s = self.scale;
        let mut canvas = Canvas::new(LOGICAL_PAGE_WIDTH * s, logical_height * s, Rgb::WHITE);

        let mut y = 0u32;
        for band in &template.bands {
            self.draw_band(&mut canvas, band, y);
            y += band.height();
        }

        Ok(canvas.into_image())
    }

    fn draw_band(&self, canvas: &mut Canvas, band: &Band, y: u32) {
        let s = self.scale;
        match band {
            Band::Header {
                company_name,
                identity_lines,
                title,
                sequence,
                access_key,
                logo_ref,
            } => {
                if let Some(reference) = logo_ref {
                    self.draw_image_cell(canvas, 24 * s, (y + 10) * s, 64 * s, 64 * s, reference);
                }
                canvas.draw_text(100 * s, (y + 12) * s, company_name, 2 * s, Rgb::BLACK);
                for (i, line) in identity_lines.iter().enumerate() {
                    canvas.draw_text(100 * s, (y + 34 + 12 * i as u32) * s, line, s, Rgb::BLACK);
                }
                canvas.draw_text(540 * s, (y + 12) * s, title, 2 * s, Rgb::BLACK);
                canvas.draw_text(540 * s, (y + 34) * s, sequence, s, Rgb::BLACK);
                if let Some(key) = access_key {
                    canvas.draw_text(24 * s, (y + 92) * s, key, s, Rgb::BLACK);
                }
                canvas.hline(24 * s, (y + 106) * s, 746 * s, Rgb::GRAY);
            }
            Band::Counterparty { name, tax_id, email, issued_at } => {
                canvas.draw_text(24 * s, (y + 8) * s, name, s, Rgb::BLACK);
                if let Some(tax_id) = tax_id {
                    canvas.draw_text(24 * s, (y + 22) * s, tax_id, s, Rgb::BLACK);
                }
                if let Some(email) = email {
                    canvas.draw_text(24 * s, (y + 36) * s, email, s, Rgb::BLACK);
                }
                canvas.draw_text(540 * s, (y + 8) * s, issued_at, s, Rgb::BLACK);
                canvas.hline(24 * s, (y + 58) * s, 746 * s, Rgb::GRAY);
            }
            Band::TableHeader => {
                canvas.fill_rect(24 * s, y * s, 746 * s, 20 * s, Rgb::LIGHT);
                for (x, caption) in [
                    (72u32, "DESCRIPCION"),
                    (430, "CANT"),
                    (480, "P.UNIT"),
                    (550, "DESC"),
                    (610, "IVA"),
                    (670, "TOTAL"),
                ] {
                    canvas.draw_text(x * s, (y + 6) * s, caption, s, Rgb::BLACK);
                }
            }
            Band::LineRow {
                description,
                quantity,
                unit_price,
                discount,
                tax,
                line_total,
                thumbnail_ref,
            } => {
                match thumbnail_ref {
                    Some(reference) => {
                        self.draw_image_cell(canvas, 24 * s, (y + 4) * s, 40 * s, 40 * s, reference)
                    }
                    None => canvas.draw_placeholder(24 * s, (y + 4) * s, 40 * s, 40 * s),
                }
                canvas.draw_text(72 * s, (y + 18) * s, description, s, Rgb::BLACK);
                for (x, value) in [
                    (430u32, quantity),
                    (480, unit_price),
                    (550, discount),
                    (610, tax),
                    (670, line_total),
                ] {
                    canvas.draw_text(x * s, (y + 18) * s, value, s, Rgb::BLACK);
                }
                canvas.hline(24 * s, (y + 46) * s, 746 * s, Rgb::LIGHT);
            }
            Band::TotalsPanel { rows } => {
                for (i, (label, value)) in rows.iter().enumerate() {
                    let row_y = (y + 8 + 18 * i as u32) * s;
                    canvas.draw_text(480 * s, row_y, label, s, Rgb::BLACK);
                    canvas.draw_text(670 * s, row_y, value, s, Rgb::BLACK);
                }
            }
            Band::BankFooter { lines } => {
                canvas.hline(24 * s, (y + 2) * s, 746 * s, Rgb::GRAY);
                for (i, line) in lines.iter().enumerate() {
                    canvas.draw_text(24 * s, (y + 10 + 16 * i as u32) * s, line, s, Rgb::BLACK);
                }
            }
        }
    }

    /// Draw an external image into a cell, or the placeholder when the
    /// reference is broken. Never fails.
    fn draw_image_cell(&self, canvas: &mut Canvas, x: u32, y: u32, w: u32, h: u32, reference: &str) {
        match self.image_source.load(reference) {
            Ok(image) => canvas.blit_scaled(x, y, w, h, &image),
            Err(error) => {
                debug!(%error, "thumbnail failed to load; substituting placeholder");
                canvas.draw_placeholder(x, y, w, h);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branding::Branding;
    use fedoc_core::{Counterparty, DocumentType, ElectronicDocument, LineItem, TaxLine};

    fn document(thumbnail_ref: Option<String>) -> ElectronicDocument {
        ElectronicDocument::new_draft(
            DocumentType::Invoice,
            "001-001-000000042".to_string(),
            Counterparty { name: "Cliente".to_string(), tax_id: None, email: None, phone: None },
            vec![LineItem {
                description: "Widget".to_string(),
                quantity: 2,
                unit_price: 500,
                discount: 0,
                tax_breakdown: vec![TaxLine { rate_bp: 1500 }],
                thumbnail_ref,
            }],
        )
    }

    fn template(thumbnail_ref: Option<String>) -> Template {
        Template::compose(&document(thumbnail_ref), &Branding::minimal("EMPRESA", "1790012345001"))
    }

    #[test]
    fn test_rasterize_dimensions() {
        let template = template(None);
        let renderer = Renderer::new(&NoImages, 1.0);
        let image = renderer.rasterize(&template).unwrap();
        assert_eq!(image.width, LOGICAL_PAGE_WIDTH);
        assert_eq!(image.height, template.total_height());
    }

    #[test]
    fn test_device_scale_capped_at_two() {
        let template = template(None);
        // A 3× retina display still renders at 2×.
        let renderer = Renderer::new(&NoImages, 3.0);
        assert_eq!(renderer.effective_scale(), 2);
        let image = renderer.rasterize(&template).unwrap();
        assert_eq!(image.width, LOGICAL_PAGE_WIDTH * 2);
        assert_eq!(image.height, template.total_height() * 2);
    }

    #[test]
    fn test_degenerate_device_scale_renders_at_one() {
        for scale in [f32::NAN, 0.0, -3.0] {
            let renderer = Renderer::new(&NoImages, scale);
            assert_eq!(renderer.effective_scale(), 1, "scale {scale}");
        }
        let template = template(None);
        let image = Renderer::new(&NoImages, f32::NAN).rasterize(&template).unwrap();
        assert_eq!(image.width, LOGICAL_PAGE_WIDTH);
    }

    #[test]
    fn test_broken_thumbnail_never_fails_render() {
        let template = template(Some("missing://thumb".to_string()));
        let renderer = Renderer::new(&NoImages, 1.0);
        assert!(renderer.rasterize(&template).is_ok());
    }

    #[test]
    fn test_empty_template_rejected() {
        let renderer = Renderer::new(&NoImages, 1.0);
        let err = renderer.rasterize(&Template { bands: vec![] }).unwrap_err();
        assert!(matches!(err, RenderError::EmptyTemplate));
    }

    #[test]
    fn test_render_produces_ink() {
        let template = template(None);
        let renderer = Renderer::new(&NoImages, 1.0);
        let image = renderer.rasterize(&template).unwrap();
        let inked = (0..image.height)
            .flat_map(|y| (0..image.width).map(move |x| (x, y)))
            .filter(|&(x, y)| image.pixel(x, y) == Some(Rgb::BLACK))
            .count();
        assert!(inked > 100, "expected text ink, found {inked} black pixels");
    }
}
