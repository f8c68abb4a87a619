//! Document variants and their fixed titles and paths.

use std::path::{Path, PathBuf};

use crate::classify::ClassifyRules;

/// The two historical document flavours.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Variant {
    /// Project documentation: headings, blanks and body text.
    #[default]
    Documentation,
    /// Stakeholder presentation: additionally honours `---` separators.
    Presentation,
}

impl Variant {
    /// Returns the classification rules used by this variant.
    pub fn rules(self) -> ClassifyRules {
        ClassifyRules::new().with_separators(matches!(self, Variant::Presentation))
    }
}

/// Title, input and output of a single render run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentProfile {
    title: String,
    input: PathBuf,
    output: PathBuf,
    rules: ClassifyRules,
}

impl DocumentProfile {
    /// Creates a profile with explicit paths using documentation rules.
    pub fn new(
        title: impl Into<String>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            title: title.into(),
            input: input.into(),
            output: output.into(),
            rules: Variant::Documentation.rules(),
        }
    }

    /// The project documentation preset.
    pub fn documentation() -> Self {
        Self::new(
            "AI Study Assistant Project Documentation",
            "ProjectDocumentation.md",
            "ProjectDocumentation.pdf",
        )
    }

    /// The stakeholder presentation preset.
    pub fn presentation() -> Self {
        Self::new(
            "AI Study Assistant: Stakeholder Presentation",
            "ProjectStakeholderPresentation.md",
            "ProjectStakeholderPresentation.pdf",
        )
        .with_variant(Variant::Presentation)
    }

    /// Returns the preset for `variant`.
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Documentation => Self::documentation(),
            Variant::Presentation => Self::presentation(),
        }
    }

    /// Header and metadata title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Source path.
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// Destination path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Classification rules applied to the source.
    pub fn rules(&self) -> ClassifyRules {
        self.rules
    }

    /// Applies the rules of `variant` and returns the updated profile.
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.rules = variant.rules();
        self
    }

    /// Overrides the separator rule and returns the updated profile.
    pub fn with_separators(mut self, separators: bool) -> Self {
        self.rules = self.rules.with_separators(separators);
        self
    }

    /// Overrides the title and returns the updated profile.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Overrides the source path and returns the updated profile.
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.input = input.into();
        self
    }

    /// Overrides the destination path and returns the updated profile.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }
}

impl Default for DocumentProfile {
    fn default() -> Self {
        Self::documentation()
    }
}
