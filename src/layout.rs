//! Fixed typography and spacing applied to every rendered briefing.

use genpdf::{Margins, Mm, PaperSize, Size};

use crate::model::Gap;

/// How the font files found on disk end up in the PDF.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontEmbedding {
    /// Embed the loaded TrueType files.
    #[default]
    Embedded,
    /// Reference the PDF core Helvetica family and use the loaded files for metrics only.
    ///
    /// Core fonts only cover Windows-1252; other characters come out garbled.
    Builtin,
}

/// Font sizes, gaps and page geometry.
///
/// Gaps are expressed in millimetres and sizes in points. The defaults reproduce the look of the
/// original briefing documents: a 14pt centred header, 12pt bold headings and 10pt body text on
/// A4 with 10mm side margins and a 15mm bottom margin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayoutSettings {
    /// Paper size of every page.
    pub paper_size: Size,
    /// Page margins applied by the page decorator.
    pub margins: Margins,
    /// Header title size.
    pub header_font_size: u8,
    /// Space between the header and the first block of a page.
    pub header_gap_mm: f64,
    /// Heading size, shared by both heading levels.
    pub heading_font_size: u8,
    /// Space after a heading.
    pub heading_gap_mm: f64,
    /// Body paragraph size.
    pub body_font_size: u8,
    /// Line spacing multiplier inside body paragraphs.
    pub body_line_spacing: f64,
    /// Space after a body paragraph.
    pub body_gap_mm: f64,
    /// Space produced by a blank line.
    pub blank_gap_mm: f64,
    /// Space produced by a separator line.
    pub separator_gap_mm: f64,
    /// Font embedding mode.
    pub embedding: FontEmbedding,
    /// Hyphenate wrapped body text (needs the `hyphenation` feature).
    pub hyphenate: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4.into(),
            margins: Margins::trbl(10, 10, 15, 10),
            header_font_size: 14,
            header_gap_mm: 5.0,
            heading_font_size: 12,
            heading_gap_mm: 4.0,
            body_font_size: 10,
            body_line_spacing: 1.5,
            body_gap_mm: 8.0,
            blank_gap_mm: 2.0,
            separator_gap_mm: 4.0,
            embedding: FontEmbedding::Embedded,
            hyphenate: false,
        }
    }
}

impl LayoutSettings {
    /// Creates the default layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size and returns the updated layout.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = paper_size.into();
        self
    }

    /// Sets the page margins and returns the updated layout.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Sets the font embedding mode and returns the updated layout.
    pub fn with_embedding(mut self, embedding: FontEmbedding) -> Self {
        self.embedding = embedding;
        self
    }

    /// Enables or disables hyphenation and returns the updated layout.
    pub fn with_hyphenation(mut self, hyphenate: bool) -> Self {
        self.hyphenate = hyphenate;
        self
    }

    /// Returns the vertical space produced by `gap`.
    pub fn gap(&self, gap: Gap) -> Mm {
        match gap {
            Gap::Blank => Mm::from(self.blank_gap_mm),
            Gap::Separator => Mm::from(self.separator_gap_mm),
        }
    }
}
