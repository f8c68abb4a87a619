//! Line classification for Markdown-like briefing sources.
//!
//! Every source line is tagged independently of its neighbours. The rules are checked in a fixed
//! order and the first match wins. `"## "` lines fall through the level-one check because they do
//! not start with `"# "`.

/// Prefix marking a level-one heading.
pub const HEADING1_PREFIX: &str = "# ";

/// Prefix marking a level-two heading.
pub const HEADING2_PREFIX: &str = "## ";

/// Literal content of a separator line once surrounding whitespace is trimmed.
pub const SEPARATOR_MARKER: &str = "---";

/// Switches that vary between document variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClassifyRules {
    separators: bool,
}

impl ClassifyRules {
    /// Creates the rule set used by plain documentation: headings, blanks and body text only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables the `---` separator rule.
    pub fn with_separators(mut self, separators: bool) -> Self {
        self.separators = separators;
        self
    }

    /// Returns whether `---` lines are treated as separators.
    pub fn separators(&self) -> bool {
        self.separators
    }
}

/// The tag assigned to a single source line.
///
/// Heading and body variants borrow their render text from the source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `# ` prefixed line, carrying the text after the prefix.
    Heading1(&'a str),
    /// `## ` prefixed line, carrying the text after the prefix.
    Heading2(&'a str),
    /// A `---` rule (only when separators are enabled).
    Separator,
    /// A line that is empty after trimming.
    Blank,
    /// Any other line, carried unmodified.
    Body(&'a str),
}

impl LineKind<'_> {
    /// Returns the text painted for this line, if it paints any.
    pub fn text(&self) -> Option<&str> {
        match self {
            LineKind::Heading1(text) | LineKind::Heading2(text) | LineKind::Body(text) => {
                Some(*text)
            }
            LineKind::Separator | LineKind::Blank => None,
        }
    }

    /// Returns whether the line is a heading of either level.
    pub fn is_heading(&self) -> bool {
        matches!(self, LineKind::Heading1(_) | LineKind::Heading2(_))
    }
}

/// Classifies a single line according to `rules`.
pub fn classify_line<'a>(line: &'a str, rules: ClassifyRules) -> LineKind<'a> {
    if let Some(rest) = line.strip_prefix(HEADING1_PREFIX) {
        return LineKind::Heading1(rest);
    }

    if let Some(rest) = line.strip_prefix(HEADING2_PREFIX) {
        return LineKind::Heading2(rest);
    }

    let trimmed = line.trim();
    if rules.separators && trimmed == SEPARATOR_MARKER {
        return LineKind::Separator;
    }

    if trimmed.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Body(line)
    }
}
