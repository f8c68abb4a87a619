//! Data structures describing the logical content of a rendered briefing.
//!
//! A source document is turned into a flat list of [`Block`] values before any PDF primitive is
//! touched. The list preserves source order exactly and holds one block per source line, which
//! keeps the planning step pure and lets callers inspect what will be painted without loading
//! fonts.

use log::debug;

use crate::classify::{classify_line, ClassifyRules, LineKind};

/// Heading depth recognised by the line classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadingLevel {
    /// `# ` headings.
    One,
    /// `## ` headings.
    Two,
}

/// Vertical gaps that paint no text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gap {
    /// Produced by a line that is empty after trimming.
    Blank,
    /// Produced by a `---` rule in documents that honour separators.
    Separator,
}

/// A single discrete unit appended to the render target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    /// Single-line bold heading.
    Heading {
        /// Source heading depth.
        level: HeadingLevel,
        /// Text after the heading prefix.
        text: String,
    },
    /// Wrapped body paragraph holding one unmodified source line.
    Body(String),
    /// Fixed vertical spacing.
    Gap(Gap),
}

impl Block {
    /// Convenience helper for building a heading block.
    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            text: text.into(),
        }
    }

    /// Convenience helper for building a body block.
    pub fn body(text: impl Into<String>) -> Self {
        Self::Body(text.into())
    }

    /// Returns the painted text, or `None` for gaps.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Heading { text, .. } | Block::Body(text) => Some(text.as_str()),
            Block::Gap(_) => None,
        }
    }
}

impl From<LineKind<'_>> for Block {
    fn from(kind: LineKind<'_>) -> Self {
        match kind {
            LineKind::Heading1(text) => Block::heading(HeadingLevel::One, text),
            LineKind::Heading2(text) => Block::heading(HeadingLevel::Two, text),
            LineKind::Separator => Block::Gap(Gap::Separator),
            LineKind::Blank => Block::Gap(Gap::Blank),
            LineKind::Body(text) => Block::body(text),
        }
    }
}

/// Per-kind block counts for a planned document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// Number of heading blocks of either level.
    pub headings: usize,
    /// Number of body paragraphs.
    pub bodies: usize,
    /// Number of blank gaps.
    pub blanks: usize,
    /// Number of separator gaps.
    pub separators: usize,
}

impl PlanSummary {
    /// Tallies the given blocks.
    pub fn of(blocks: &[Block]) -> Self {
        blocks.iter().fold(Self::default(), |mut summary, block| {
            match block {
                Block::Heading { .. } => summary.headings += 1,
                Block::Body(_) => summary.bodies += 1,
                Block::Gap(Gap::Blank) => summary.blanks += 1,
                Block::Gap(Gap::Separator) => summary.separators += 1,
            }
            summary
        })
    }

    /// Total number of blocks.
    pub fn total(&self) -> usize {
        self.headings + self.bodies + self.blanks + self.separators
    }
}

/// Classifies every line of `source` and returns the resulting blocks in source order.
///
/// Lines are split the way [`str::lines`] does: `\n` and `\r\n` both terminate a line and a
/// trailing line terminator does not produce an extra blank gap.
///
/// This is not one block per physical `\n`-separated segment. Splitting on every `\n` would add
/// a final [`Gap::Blank`] after a trailing newline and plan one blank gap for an empty source;
/// here the former yields no extra block and the latter yields no blocks at all.
pub fn plan_document(source: &str, rules: ClassifyRules) -> Vec<Block> {
    let blocks: Vec<Block> = source
        .lines()
        .map(|line| Block::from(classify_line(line, rules)))
        .collect();

    let summary = PlanSummary::of(&blocks);
    debug!(
        "Planned {} blocks ({} headings, {} body, {} blank, {} separator)",
        summary.total(),
        summary.headings,
        summary.bodies,
        summary.blanks,
        summary.separators
    );

    blocks
}
