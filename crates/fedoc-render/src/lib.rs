//! # fedoc-render — Document Print Rendering
//!
//! Turns an [`fedoc_core::ElectronicDocument`] into one tall raster image
//! laid out as a fixed-width A4-proportioned print page: header band,
//! counterparty summary, line-item table with per-line tax breakdown,
//! totals panel, and bank-details footer.
//!
//! ## Design
//!
//! The crate is platform-free: no filesystem, no async, no GPU. Layout
//! (`template.rs`) is a pure function from document + branding to a list
//! of bands; rasterization (`renderer.rs`) draws those bands onto an
//! in-memory RGB canvas (`canvas.rs`) using an embedded 5×7 glyph set
//! (`font.rs`). External resources (product thumbnails) come in through
//! the [`ImageSource`] trait and fall back to a generated placeholder —
//! a broken image reference never fails a render.
//!
//! Pagination is deliberately not handled here. The renderer always
//! produces a single tall image; slicing it into physical pages is
//! `fedoc-pdf`'s concern.

pub mod branding;
pub mod canvas;
pub mod font;
pub mod renderer;
pub mod template;

pub use branding::Branding;
pub use canvas::{Canvas, RasterImage, Rgb};
pub use renderer::{
    ImageError, ImageSource, NoImages, RenderError, Renderer, LOGICAL_PAGE_WIDTH, MAX_DEVICE_SCALE,
};
pub use template::{Band, Template};
