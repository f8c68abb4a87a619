//! Renders Markdown-like briefing documents into PDF.
//!
//! Each source line is classified by its prefix, turned into a heading, body paragraph or gap,
//! and painted below a title header that repeats on every page. Pagination is left to `genpdf`.

pub mod builder;
pub mod classify;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod profile;
pub mod render;

pub use classify::{classify_line, ClassifyRules, LineKind};
pub use error::RenderError;
pub use layout::{FontEmbedding, LayoutSettings};
pub use model::{plan_document, Block, Gap, HeadingLevel, PlanSummary};
pub use profile::{DocumentProfile, Variant};
pub use render::{render_file, render_source, RenderReport, RenderedPdf};
