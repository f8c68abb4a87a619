use std::error::Error;
use std::path::PathBuf;

use brief_pdf::fonts::FONTS_DIR_ENV;
use brief_pdf::{render_file, DocumentProfile, FontEmbedding, LayoutSettings, Variant};
use clap::{Args, Parser, Subcommand};

/// Renders Markdown-like briefing documents into PDF.
///
/// Fonts are looked up under `BRIEF_PDF_FONTS_DIR`, `assets/fonts` next to the binary or the
/// crate, and finally the system font directories.
#[derive(Parser)]
#[command(author, version, about = "Render Markdown-like briefings to PDF")]
struct Cli {
    /// Directory holding the LiberationSans-*.ttf files.
    #[arg(long, global = true, env = FONTS_DIR_ENV, value_name = "DIR")]
    fonts_dir: Option<PathBuf>,

    /// Reference the PDF core Helvetica family instead of embedding the font files.
    #[arg(long, global = true)]
    builtin_fonts: bool,

    /// Hyphenate wrapped body text (requires the `hyphenation` feature).
    #[arg(long, global = true)]
    hyphenate: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the project documentation (`ProjectDocumentation.md`).
    #[command(name = "documentation", aliases = ["doc", "docs"])]
    Documentation(PathOverrides),

    /// Render the stakeholder presentation (`ProjectStakeholderPresentation.md`).
    #[command(name = "presentation", aliases = ["deck", "stakeholder"])]
    Presentation(PathOverrides),

    /// Render an arbitrary document with a custom header title.
    Render {
        /// Source document.
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Destination PDF, overwritten if present.
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,

        /// Title painted at the top of every page.
        #[arg(short, long)]
        title: String,

        /// Treat `---` lines as separators.
        #[arg(long)]
        separators: bool,
    },
}

#[derive(Args)]
struct PathOverrides {
    /// Source document.
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Destination PDF, overwritten if present.
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl PathOverrides {
    fn apply(self, mut profile: DocumentProfile) -> DocumentProfile {
        if let Some(input) = self.input {
            profile = profile.with_input(input);
        }
        if let Some(output) = self.output {
            profile = profile.with_output(output);
        }
        profile
    }
}

impl Commands {
    fn into_profile(self) -> DocumentProfile {
        match self {
            Commands::Documentation(paths) => paths.apply(DocumentProfile::documentation()),
            Commands::Presentation(paths) => {
                paths.apply(DocumentProfile::for_variant(Variant::Presentation))
            }
            Commands::Render {
                input,
                output,
                title,
                separators,
            } => DocumentProfile::new(title, input, output).with_separators(separators),
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Some(dir) = &cli.fonts_dir {
        std::env::set_var(FONTS_DIR_ENV, dir);
    }

    let embedding = if cli.builtin_fonts {
        FontEmbedding::Builtin
    } else {
        FontEmbedding::Embedded
    };
    let layout = LayoutSettings::new()
        .with_embedding(embedding)
        .with_hyphenation(cli.hyphenate);
    let profile = cli.command.into_profile();

    match render_file(&profile, &layout) {
        Ok(report) => println!("PDF generated: {}", report.output.display()),
        Err(err) => {
            eprintln!("Error: {}", err);
            print_error_sources(&err);
            std::process::exit(1);
        }
    }
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
