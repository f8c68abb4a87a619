//! `genpdf` elements for each kind of planned block.
//!
//! Every block becomes one vertical [`LinearLayout`] so the document root receives exactly one
//! element per source line. Spacing uses [`VerticalSpace`], which works in millimetres rather than
//! in multiples of the current line height like [`genpdf::elements::Break`].

use genpdf::elements::{LinearLayout, Paragraph, Text};
use genpdf::error::Error;
use genpdf::style::Style;
use genpdf::{render, Alignment, Element, Mm, RenderResult, Size};

use crate::layout::LayoutSettings;
use crate::model::Block;

/// Body text wrapped to the printable width, with words that would never fit on a line broken up.
///
/// `Paragraph` discards a word that is wider than its area. Before the first render this element
/// measures every word with the inherited style and splits the over-wide ones into chunks that fit,
/// so long URLs and identifiers reach the page intact.
#[derive(Clone, Debug)]
pub struct BodyParagraph {
    text: String,
    paragraph: Option<Paragraph>,
}

impl BodyParagraph {
    /// Creates a paragraph for one unmodified source line.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            paragraph: None,
        }
    }
}

impl Element for BodyParagraph {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        if self.paragraph.is_none() {
            // Wrapped words carry their trailing space, so keep room for one.
            let width = area.size().width - style.str_width(&context.font_cache, " ");
            let text = break_long_words(&self.text, width, |s| {
                style.str_width(&context.font_cache, s)
            });
            self.paragraph = Some(Paragraph::new(text));
        }

        match self.paragraph.as_mut() {
            Some(paragraph) => paragraph.render(context, area, style),
            None => Ok(RenderResult::default()),
        }
    }
}

/// Splits every space-separated word of `line` that is wider than `max_width` into chunks no wider
/// than `max_width`, joined by single spaces. Narrower words and the original spacing are kept.
///
/// A single character wider than `max_width` still forms a chunk of its own.
pub fn break_long_words<F>(line: &str, max_width: Mm, measure: F) -> String
where
    F: Fn(&str) -> Mm,
{
    let mut broken = String::with_capacity(line.len());
    for (index, word) in line.split(' ').enumerate() {
        if index > 0 {
            broken.push(' ');
        }
        if measure(word) <= max_width {
            broken.push_str(word);
            continue;
        }

        let mut start = 0;
        for (offset, ch) in word.char_indices() {
            let end = offset + ch.len_utf8();
            if offset > start && measure(&word[start..end]) > max_width {
                broken.push_str(&word[start..offset]);
                broken.push(' ');
                start = offset;
            }
        }
        broken.push_str(&word[start..]);
    }
    broken
}

/// Fixed vertical spacing that never triggers a page break.
///
/// When less room is left on the page than requested, the remaining room is consumed and the next
/// element starts on a fresh page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VerticalSpace {
    height: Mm,
}

impl VerticalSpace {
    /// Creates a gap of the given height.
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }

    /// Returns the requested height.
    pub fn height(&self) -> Mm {
        self.height
    }
}

impl Element for VerticalSpace {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let available = area.size().height;
        let height = if self.height > available {
            available
        } else {
            self.height
        };

        let mut result = RenderResult::default();
        result.size = Size::new(0, height);
        Ok(result)
    }
}

fn heading_style(layout: &LayoutSettings) -> Style {
    Style::new().bold().with_font_size(layout.heading_font_size)
}

fn body_style(layout: &LayoutSettings) -> Style {
    Style::new()
        .with_font_size(layout.body_font_size)
        .with_line_spacing(layout.body_line_spacing)
}

/// Builds the centred title painted at the top of every page.
pub fn header(title: &str, layout: &LayoutSettings) -> LinearLayout {
    let mut header = LinearLayout::vertical();
    header.push(
        Paragraph::new(title.to_owned())
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(layout.header_font_size)),
    );
    header.push(VerticalSpace::new(layout.header_gap_mm));
    header
}

/// Builds the element for a single block.
pub fn block(block: &Block, layout: &LayoutSettings) -> LinearLayout {
    let mut element = LinearLayout::vertical();
    match block {
        Block::Heading { text, .. } => {
            element.push(Text::new(text.clone()).styled(heading_style(layout)));
            element.push(VerticalSpace::new(layout.heading_gap_mm));
        }
        Block::Body(text) => {
            element.push(BodyParagraph::new(text.clone()).styled(body_style(layout)));
            element.push(VerticalSpace::new(layout.body_gap_mm));
        }
        Block::Gap(gap) => element.push(VerticalSpace::new(layout.gap(*gap))),
    }
    element
}
