//! The read → plan → render → write pipeline.
//!
//! The source is read in full before any PDF state exists, the document is rendered into memory,
//! and the output file is written with a single call once rendering has succeeded. A failed render
//! therefore never leaves a partial file behind.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::builder::{DocumentBuilder, PageCounter};
use crate::elements;
use crate::error::RenderError;
use crate::fonts;
use crate::layout::LayoutSettings;
use crate::model::{plan_document, Block, PlanSummary};
use crate::profile::DocumentProfile;

/// An in-memory PDF together with what went into it.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// Serialized PDF bytes.
    pub bytes: Vec<u8>,
    /// Number of pages the header was painted on.
    pub pages: usize,
    /// Block counts of the rendered plan.
    pub summary: PlanSummary,
}

/// Outcome of [`render_file`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderReport {
    /// Path the PDF was written to.
    pub output: PathBuf,
    /// Number of pages in the PDF.
    pub pages: usize,
    /// Block counts of the rendered plan.
    pub summary: PlanSummary,
    /// Size of the written file.
    pub bytes: usize,
}

/// Reads a source document, decoding invalid UTF-8 lossily.
pub fn read_source(path: &Path) -> Result<String, RenderError> {
    let raw = fs::read(path).map_err(|err| RenderError::source_not_found(path, err))?;
    Ok(String::from_utf8_lossy(&raw).into_owned())
}

/// Renders `source` with the title and rules of `profile` without touching the filesystem.
pub fn render_source(
    source: &str,
    profile: &DocumentProfile,
    layout: &LayoutSettings,
) -> Result<RenderedPdf, RenderError> {
    let blocks = plan_document(source, profile.rules());
    render_blocks(&blocks, profile.title(), layout)
}

/// Renders already planned blocks under a header carrying `title`.
pub fn render_blocks(
    blocks: &[Block],
    title: &str,
    layout: &LayoutSettings,
) -> Result<RenderedPdf, RenderError> {
    let font_family =
        fonts::default_font_family(layout.embedding).map_err(RenderError::FontLoad)?;

    let pages = PageCounter::new();
    let header_title = title.to_owned();
    let header_layout = *layout;
    let builder = DocumentBuilder::new()
        .with_title(title)
        .with_paper_size(layout.paper_size)
        .with_margins(layout.margins)
        .with_page_counter(pages.clone())
        .with_header(move |_| elements::header(&header_title, &header_layout));
    let builder = configure_hyphenation(builder, layout)?;

    let mut document = builder.build(font_family);
    for block in blocks {
        document.push(elements::block(block, layout));
    }

    let mut bytes = Vec::new();
    document.render(&mut bytes).map_err(RenderError::Render)?;

    let summary = PlanSummary::of(blocks);
    debug!(
        "Rendered {} blocks onto {} pages ({} bytes)",
        summary.total(),
        pages.get(),
        bytes.len()
    );

    Ok(RenderedPdf {
        bytes,
        pages: pages.get(),
        summary,
    })
}

#[cfg(feature = "hyphenation")]
fn configure_hyphenation(
    builder: DocumentBuilder,
    layout: &LayoutSettings,
) -> Result<DocumentBuilder, RenderError> {
    use hyphenation::{Language, Load, Standard};

    if !layout.hyphenate {
        return Ok(builder);
    }

    let dictionary =
        Standard::from_embedded(Language::EnglishUS).map_err(RenderError::hyphenation)?;
    Ok(builder.with_hyphenator(dictionary))
}

#[cfg(not(feature = "hyphenation"))]
fn configure_hyphenation(
    builder: DocumentBuilder,
    layout: &LayoutSettings,
) -> Result<DocumentBuilder, RenderError> {
    if layout.hyphenate {
        log::warn!("Hyphenation requested but the `hyphenation` feature is disabled; ignoring.");
    }
    Ok(builder)
}

/// Reads `profile.input()`, renders it and writes the PDF to `profile.output()`.
///
/// An existing file at the output path is overwritten.
pub fn render_file(
    profile: &DocumentProfile,
    layout: &LayoutSettings,
) -> Result<RenderReport, RenderError> {
    let source = read_source(profile.input())?;
    let rendered = render_source(&source, profile, layout)?;

    let output = profile.output();
    fs::write(output, &rendered.bytes).map_err(|err| RenderError::write_output(output, err))?;

    info!(
        "Wrote {} ({} pages, {} bytes) from {}",
        output.display(),
        rendered.pages,
        rendered.bytes.len(),
        profile.input().display()
    );

    Ok(RenderReport {
        output: output.to_path_buf(),
        pages: rendered.pages,
        summary: rendered.summary,
        bytes: rendered.bytes.len(),
    })
}
