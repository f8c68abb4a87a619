//! Construction of page-decorated `genpdf` documents.

use std::cell::Cell;
use std::rc::Rc;

use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style;
use genpdf::{Element, Margins, PageDecorator, Position, Size};

#[cfg(feature = "hyphenation")]
use hyphenation::Standard;

type HeaderFactory = dyn Fn(usize) -> Box<dyn Element>;

/// Shared count of decorated pages.
///
/// The decorator is moved into the document, so the count is shared through a reference-counted
/// cell that the caller keeps a clone of.
#[derive(Clone, Debug, Default)]
pub struct PageCounter(Rc<Cell<usize>>);

impl PageCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pages decorated so far.
    pub fn get(&self) -> usize {
        self.0.get()
    }

    fn advance(&self) -> usize {
        let page = self.0.get() + 1;
        self.0.set(page);
        page
    }
}

/// Builder for `genpdf::Document` instances with a repeating page header.
#[derive(Default)]
pub struct DocumentBuilder {
    title: Option<String>,
    paper_size: Option<Size>,
    margins: Option<Margins>,
    header: Option<Box<HeaderFactory>>,
    pages: PageCounter,
    #[cfg(feature = "hyphenation")]
    hyphenator: Option<Standard>,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the document metadata title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the paper size used for every page.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    ///
    /// The bottom margin doubles as the auto page break threshold.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Configures a header callback that is invoked with the 1-based page number of every page.
    pub fn with_header<F, E>(mut self, header: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.header = Some(Box::new(move |page| {
            Box::new(header(page)) as Box<dyn Element>
        }));
        self
    }

    /// Uses `pages` to record how many pages get decorated.
    pub fn with_page_counter(mut self, pages: PageCounter) -> Self {
        self.pages = pages;
        self
    }

    /// Enables hyphenation of wrapped paragraphs.
    #[cfg(feature = "hyphenation")]
    pub fn with_hyphenator(mut self, hyphenator: Standard) -> Self {
        self.hyphenator = Some(hyphenator);
        self
    }

    /// Builds the document around `font_family`.
    pub fn build(self, font_family: FontFamily<FontData>) -> genpdf::Document {
        let mut document = genpdf::Document::new(font_family);

        if let Some(title) = self.title {
            document.set_title(title);
        }

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        document.set_page_decorator(HeaderDecorator {
            pages: self.pages,
            margins: self.margins,
            header: self.header,
        });

        #[cfg(feature = "hyphenation")]
        if let Some(hyphenator) = self.hyphenator {
            document.set_hyphenator(hyphenator);
        }

        document
    }
}

struct HeaderDecorator {
    pages: PageCounter,
    margins: Option<Margins>,
    header: Option<Box<HeaderFactory>>,
}

impl PageDecorator for HeaderDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: style::Style,
    ) -> Result<genpdf::render::Area<'a>, Error> {
        let page = self.pages.advance();

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        if let Some(header_cb) = &self.header {
            let mut element = header_cb(page);
            let result = element.render(context, area.clone(), style)?;
            area.add_offset(Position::new(0, result.size.height));
        }

        Ok(area)
    }
}
