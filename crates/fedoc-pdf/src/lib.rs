//! # fedoc-pdf — Paginated PDF Assembly
//!
//! Stitches the single tall raster produced by `fedoc-render` into a
//! paginated A4 PDF with fixed physical margins.
//!
//! ## Algorithm
//!
//! The image is scaled to the printable width (page width minus two
//! margins). Page count is `ceil(scaled_height / printable_height)`,
//! minimum 1. Every page draws the *same* full image, shifted upward by
//! `i × printable_height` and clipped to the printable box — a sliding
//! window over the rendition. No content is duplicated or dropped at
//! page boundaries beyond sub-pixel rounding.
//!
//! The raster is embedded once as a shared DeviceRGB image XObject and
//! referenced from every page's content stream.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use thiserror::Error;

use fedoc_render::RasterImage;

/// A4 page width in millimetres.
pub const PAGE_WIDTH_MM: f32 = 210.0;
/// A4 page height in millimetres.
pub const PAGE_HEIGHT_MM: f32 = 297.0;
/// Physical margin on every side, millimetres.
pub const MARGIN_MM: f32 = 14.0;

/// Convert millimetres to PDF points (1 pt = 1/72 inch).
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * 72.0 / 25.4
}

/// Assembly failure.
#[derive(Error, Debug)]
pub enum AssembleError {
    /// The raster has a zero dimension or inconsistent buffer length.
    #[error("raster is malformed: {width}x{height}, {len} bytes")]
    MalformedRaster {
        /// Raster width.
        width: u32,
        /// Raster height.
        height: u32,
        /// Pixel buffer length.
        len: usize,
    },
    /// The underlying PDF writer failed.
    #[error("pdf write error: {0}")]
    Pdf(#[from] lopdf::Error),
    /// Writing the output buffer failed.
    #[error("pdf output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Assembles rasters into margined A4 PDFs.
#[derive(Debug, Clone, Copy)]
pub struct PdfAssembler {
    page_width: f32,
    page_height: f32,
    margin: f32,
}

impl Default for PdfAssembler {
    fn default() -> Self {
        Self {
            page_width: mm_to_pt(PAGE_WIDTH_MM),
            page_height: mm_to_pt(PAGE_HEIGHT_MM),
            margin: mm_to_pt(MARGIN_MM),
        }
    }
}

impl PdfAssembler {
    /// A4 with the standard margin.
    pub fn a4() -> Self {
        Self::default()
    }

    /// Printable width in points.
    pub fn printable_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Printable height in points.
    pub fn printable_height(&self) -> f32 {
        self.page_height - 2.0 * self.margin
    }

    /// Height of the raster once scaled to the printable width, points.
    pub fn scaled_height(&self, raster: &RasterImage) -> f32 {
        self.printable_width() * raster.height as f32 / raster.width as f32
    }

    /// Number of physical pages the raster needs.
    pub fn page_count(&self, raster: &RasterImage) -> u32 {
        pages_for(self.scaled_height(raster), self.printable_height())
    }

    /// Build the paginated PDF.
    pub fn assemble(&self, raster: &RasterImage) -> Result<Vec<u8>, AssembleError> {
        let expected_len = raster.width as usize * raster.height as usize * 3;
        if raster.width == 0 || raster.height == 0 || raster.pixels.len() != expected_len {
            return Err(AssembleError::MalformedRaster {
                width: raster.width,
                height: raster.height,
                len: raster.pixels.len(),
            });
        }

        let page_count = self.page_count(raster);
        let scaled_w = self.printable_width();
        let scaled_h = self.scaled_height(raster);
        let printable_h = self.printable_height();

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => raster.width as i64,
                "Height" => raster.height as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
            },
            raster.pixels.clone(),
        ));

        let mut kids: Vec<Object> = Vec::with_capacity(page_count as usize);
        for page_index in 0..page_count {
            // Image top sits at the top margin on page 0 and slides up by
            // one printable window per page.
            let ty = self.page_height - self.margin + page_index as f32 * printable_h - scaled_h;
            let content = Content {
                operations: vec![
                    Operation::new("q", vec![]),
                    Operation::new(
                        "re",
                        vec![
                            self.margin.into(),
                            self.margin.into(),
                            scaled_w.into(),
                            printable_h.into(),
                        ],
                    ),
                    Operation::new("W", vec![]),
                    Operation::new("n", vec![]),
                    Operation::new(
                        "cm",
                        vec![
                            scaled_w.into(),
                            0f32.into(),
                            0f32.into(),
                            scaled_h.into(),
                            self.margin.into(),
                            ty.into(),
                        ],
                    ),
                    Operation::new("Do", vec!["Im0".into()]),
                    Operation::new("Q", vec![]),
                ],
            };
            let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "MediaBox" => vec![
                    0f32.into(),
                    0f32.into(),
                    self.page_width.into(),
                    self.page_height.into(),
                ],
                "Resources" => dictionary! {
                    "XObject" => dictionary! { "Im0" => image_id },
                },
            });
            kids.push(page_id.into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_count as i64,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

/// `ceil(scaled_height / printable_height)`, minimum one page.
fn pages_for(scaled_height: f32, printable_height: f32) -> u32 {
    let pages = (scaled_height / printable_height).ceil() as u32;
    pages.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fedoc_render::Rgb;

    fn raster(width: u32, height: u32) -> RasterImage {
        RasterImage::solid(width, height, Rgb::WHITE)
    }

    #[test]
    fn test_pages_for_exact_and_partial() {
        assert_eq!(pages_for(3000.0, 1000.0), 3);
        assert_eq!(pages_for(999.0, 1000.0), 1);
        assert_eq!(pages_for(1001.0, 1000.0), 2);
        assert_eq!(pages_for(0.0, 1000.0), 1);
    }

    #[test]
    fn test_mm_to_pt() {
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-4);
        assert!((mm_to_pt(210.0) - 595.27563).abs() < 1e-2);
    }

    #[test]
    fn test_short_raster_is_one_page() {
        let assembler = PdfAssembler::a4();
        let raster = raster(794, 400);
        assert_eq!(assembler.page_count(&raster), 1);
        let bytes = assembler.assemble(&raster).unwrap();
        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len(), 1);
    }

    #[test]
    fn test_tall_raster_paginates() {
        let assembler = PdfAssembler::a4();
        // Aspect ratio chosen so the scaled height needs several windows.
        let raster = raster(794, 4000);
        let expected = assembler.page_count(&raster);
        assert!(expected > 1, "test raster should span multiple pages");

        let bytes = assembler.assemble(&raster).unwrap();
        let reloaded = Document::load_mem(&bytes).unwrap();
        assert_eq!(reloaded.get_pages().len() as u32, expected);
    }

    #[test]
    fn test_page_count_matches_formula() {
        let assembler = PdfAssembler::a4();
        let raster = raster(1000, 5000);
        let scaled_h = assembler.printable_width() * 5.0;
        let expected = (scaled_h / assembler.printable_height()).ceil() as u32;
        assert_eq!(assembler.page_count(&raster), expected);
    }

    #[test]
    fn test_malformed_raster_rejected() {
        let assembler = PdfAssembler::a4();
        let mut bad = raster(10, 10);
        bad.pixels.truncate(5);
        assert!(matches!(
            assembler.assemble(&bad),
            Err(AssembleError::MalformedRaster { .. })
        ));

        let empty = RasterImage { width: 0, height: 0, pixels: vec![] };
        assert!(matches!(
            assembler.assemble(&empty),
            Err(AssembleError::MalformedRaster { .. })
        ));
    }
}
