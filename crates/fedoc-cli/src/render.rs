//! # Render Subcommand
//!
//! Rasterizes a document JSON file through the banded template and
//! writes the paginated A4 PDF next to it (or to `--out`).

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use fedoc_core::ElectronicDocument;
use fedoc_pdf::PdfAssembler;
use fedoc_render::{Branding, NoImages, Renderer, Template};

/// Arguments for the render subcommand.
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Path to the document JSON.
    pub document: PathBuf,

    /// Path to a branding JSON; omitted fields fall back to a minimal
    /// unbranded header.
    #[arg(long)]
    pub branding: Option<PathBuf>,

    /// Output PDF path. Defaults to `<sequence>.pdf` in the working
    /// directory.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Device scale factor (clamped to 1–2 by the renderer).
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,
}

/// Render the document and write the PDF. Returns the output path.
pub fn run(args: &RenderArgs) -> anyhow::Result<PathBuf> {
    let raw = fs::read_to_string(&args.document)
        .with_context(|| format!("reading {}", args.document.display()))?;
    let document: ElectronicDocument =
        serde_json::from_str(&raw).context("decoding document JSON")?;

    let branding = match &args.branding {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            serde_json::from_str(&raw).context("decoding branding JSON")?
        }
        None => Branding::minimal("", ""),
    };

    let template = Template::compose(&document, &branding);
    let renderer = Renderer::new(&NoImages, args.scale);
    let raster = renderer.rasterize(&template).context("rasterizing document")?;

    let assembler = PdfAssembler::a4();
    let pdf = assembler.assemble(&raster).context("assembling PDF")?;
    let pages = assembler.page_count(&raster);

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("{}.pdf", document.sequence)));
    fs::write(&out, pdf).with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(document = %document.sequence, pages, out = %out.display(), "rendered");
    Ok(out)
}
