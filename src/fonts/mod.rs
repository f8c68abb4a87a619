//! Font discovery for briefing renders.
//!
//! The renderer needs a sans-serif family with regular, bold, italic and bold-italic faces.
//! Directories are searched in this order:
//!
//! 1. `BRIEF_PDF_FONTS_DIR`
//! 2. `assets/fonts` next to the running executable
//! 3. `assets/fonts` inside the crate checkout
//!
//! Each of these must contain the `LiberationSans-*.ttf` files. When none does, the system font
//! directories are tried: Liberation Sans under the usual Linux locations, then Arial under
//! `BRIEF_PDF_SYSTEM_FONTS_DIR`, `WINDIR` or `SystemRoot`.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, Builtin, FontData, FontFamily};
use log::{debug, warn};
use printpdf::BuiltinFont;

use crate::layout::FontEmbedding;

/// Name of the preferred font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "LiberationSans";

/// Environment variable pointing at a directory with the preferred family.
pub const FONTS_DIR_ENV: &str = "BRIEF_PDF_FONTS_DIR";

/// Environment variable pointing at a directory with the Arial fallback family.
pub const SYSTEM_FONTS_DIR_ENV: &str = "BRIEF_PDF_SYSTEM_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "LiberationSans-Regular.ttf",
    "LiberationSans-Bold.ttf",
    "LiberationSans-Italic.ttf",
    "LiberationSans-BoldItalic.ttf",
];

const SYSTEM_LIBERATION_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
];

const ARIAL_FAMILY_NAME: &str = "Arial";

struct FamilyFiles {
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

const ARIAL_FILES: FamilyFiles = FamilyFiles {
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

/// Returns the `assets/fonts` directory of the crate checkout.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    push_unique(&mut candidates, bundled_fonts_source_dir());

    for dir in SYSTEM_LIBERATION_DIRS {
        push_unique(&mut candidates, PathBuf::from(dir));
    }

    candidates
}

fn missing_font_files(path: &Path) -> Vec<&'static str> {
    FONT_FILES
        .iter()
        .copied()
        .filter(|name| !path.join(name).is_file())
        .collect()
}

fn resolve_font_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        if !candidate.is_dir() {
            attempts.push(format!("{} (directory missing)", candidate.display()));
            continue;
        }

        let missing = missing_font_files(&candidate);
        if missing.is_empty() {
            debug!("Using fonts from {}", candidate.display());
            return Ok(candidate);
        }

        attempts.push(format!(
            "{} (missing files [{}])",
            candidate.display(),
            missing.join(", ")
        ));
    }

    Err(Error::new(
        format!(
            "Unable to locate the {} font family. Checked: {}. Set {} to a directory holding {}.",
            DEFAULT_FONT_FAMILY_NAME,
            attempts.join(", "),
            FONTS_DIR_ENV,
            FONT_FILES.join(", ")
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn builtin_for<B>(embedding: FontEmbedding, builtin: B) -> Option<B> {
    match embedding {
        FontEmbedding::Embedded => None,
        FontEmbedding::Builtin => Some(builtin),
    }
}

fn load_preferred_family(embedding: FontEmbedding) -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory()?;

    fonts::from_files(
        &directory,
        DEFAULT_FONT_FAMILY_NAME,
        builtin_for(embedding, Builtin::Helvetica),
    )
    .map_err(|err| {
        Error::new(
            format!(
                "Failed to load font family '{}' from {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn arial_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(SYSTEM_FONTS_DIR_ENV) {
        return Some(path);
    }

    ["WINDIR", "SystemRoot"]
        .into_iter()
        .filter_map(env_path)
        .map(|root| root.join("Fonts"))
        .find(|candidate| candidate.is_dir())
}

fn load_face(
    directory: &Path,
    file: &str,
    face: &str,
    builtin: Option<BuiltinFont>,
) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, builtin).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load fallback {} face at {}: {}",
                face,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn load_arial_family(embedding: FontEmbedding) -> Result<FontFamily<FontData>, Error> {
    let directory = arial_directory().ok_or_else(|| {
        Error::new(
            "System font directory not found for the Arial fallback",
            io::Error::new(io::ErrorKind::NotFound, "system fonts directory not found"),
        )
    })?;

    Ok(FontFamily {
        regular: load_face(
            &directory,
            ARIAL_FILES.regular,
            "regular",
            builtin_for(embedding, BuiltinFont::Helvetica),
        )?,
        bold: load_face(
            &directory,
            ARIAL_FILES.bold,
            "bold",
            builtin_for(embedding, BuiltinFont::HelveticaBold),
        )?,
        italic: load_face(
            &directory,
            ARIAL_FILES.italic,
            "italic",
            builtin_for(embedding, BuiltinFont::HelveticaOblique),
        )?,
        bold_italic: load_face(
            &directory,
            ARIAL_FILES.bold_italic,
            "bold italic",
            builtin_for(embedding, BuiltinFont::HelveticaBoldOblique),
        )?,
    })
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the Liberation Sans family, falling back to Arial when it cannot be found.
pub fn default_font_family(embedding: FontEmbedding) -> Result<FontFamily<FontData>, Error> {
    match load_preferred_family(embedding) {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match load_arial_family(embedding) {
            Ok(fallback) => {
                warn!(
                    "{} unavailable ({}); falling back to the system '{}' family.",
                    DEFAULT_FONT_FAMILY_NAME, err, ARIAL_FAMILY_NAME
                );
                Ok(fallback)
            }
            Err(fallback_err) => {
                warn!(
                    "{} unavailable ({}); {} fallback failed: {}",
                    DEFAULT_FONT_FAMILY_NAME, err, ARIAL_FAMILY_NAME, fallback_err
                );
                Err(Error::new(
                    format!(
                        "No usable font family: {}; {} fallback failed: {}",
                        err, ARIAL_FAMILY_NAME, fallback_err
                    ),
                    io::Error::new(io::ErrorKind::NotFound, "no usable font family"),
                ))
            }
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether a usable font family can be located without loading it.
pub fn default_fonts_available() -> bool {
    resolve_font_directory().is_ok()
        || arial_directory()
            .map(|dir| dir.join(ARIAL_FILES.regular).is_file())
            .unwrap_or(false)
}
