//! Errors produced while turning a source file into a PDF.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur while rendering a briefing.
#[derive(Debug)]
pub enum RenderError {
    /// The source file is missing or could not be read.
    SourceNotFound {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
    /// No usable font family could be loaded.
    FontLoad(genpdf::error::Error),
    /// The hyphenation dictionary requested for body text could not be loaded.
    Hyphenation(Box<dyn std::error::Error + Send + Sync>),
    /// The PDF library failed while laying out or serializing the document.
    Render(genpdf::error::Error),
    /// The rendered PDF could not be written.
    WriteOutput {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },
}

impl RenderError {
    pub(crate) fn source_not_found(path: &Path, source: io::Error) -> Self {
        Self::SourceNotFound {
            path: path.to_path_buf(),
            source,
        }
    }

    #[cfg_attr(not(feature = "hyphenation"), allow(dead_code))]
    pub(crate) fn hyphenation(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Hyphenation(err.into())
    }

    pub(crate) fn write_output(path: &Path, source: io::Error) -> Self {
        Self::WriteOutput {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceNotFound { path, .. } => {
                write!(f, "Failed to read source document {}", path.display())
            }
            Self::FontLoad(_) => write!(f, "Failed to load fonts"),
            Self::Hyphenation(_) => write!(f, "Failed to load the hyphenation dictionary"),
            Self::Render(_) => write!(f, "Failed to render PDF"),
            Self::WriteOutput { path, .. } => {
                write!(f, "Failed to write PDF to {}", path.display())
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SourceNotFound { source, .. } | Self::WriteOutput { source, .. } => Some(source),
            Self::FontLoad(err) | Self::Render(err) => Some(err),
            Self::Hyphenation(err) => Some(&**err as &(dyn std::error::Error + 'static)),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn display_names_the_path_and_source_keeps_the_cause() {
        let err = RenderError::source_not_found(
            Path::new("missing.md"),
            io::Error::new(io::ErrorKind::NotFound, "no such file"),
        );
        assert_eq!(err.to_string(), "Failed to read source document missing.md");
        assert_eq!(
            err.source().map(|cause| cause.to_string()),
            Some("no such file".to_owned())
        );
    }

    #[test]
    fn write_failures_are_distinct_from_read_failures() {
        let err = RenderError::write_output(
            Path::new("out/report.pdf"),
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(err, RenderError::WriteOutput { .. }));
        assert!(err.to_string().contains("out/report.pdf"));
    }

    #[test]
    fn hyphenation_failures_do_not_claim_a_render_failure() {
        let err = RenderError::hyphenation(io::Error::new(
            io::ErrorKind::InvalidData,
            "corrupt dictionary",
        ));
        assert_eq!(err.to_string(), "Failed to load the hyphenation dictionary");
        assert!(!err.to_string().contains("render"));
        assert_eq!(
            err.source().map(|cause| cause.to_string()),
            Some("corrupt dictionary".to_owned())
        );
    }
}
