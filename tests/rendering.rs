use std::fs;

use brief_pdf::fonts;
use brief_pdf::{
    render_file, render_source, DocumentProfile, FontEmbedding, LayoutSettings, RenderError,
    RenderedPdf,
};
use sha2::{Digest, Sha256};

const SKIP_NOTE: &str =
    "no usable fonts. Set BRIEF_PDF_FONTS_DIR or install Liberation Sans.";

fn render(source: &str, profile: &DocumentProfile) -> Option<RenderedPdf> {
    if !fonts::default_fonts_available() {
        return None;
    }

    Some(render_source(source, profile, &LayoutSettings::default()).expect("render pdf"))
}

fn page_count(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes)
        .expect("rendered PDF parses")
        .get_pages()
        .len()
}

/// Collects the text painted by core-font `TJ` operators on every page.
///
/// Core fonts are written as two-byte Windows-1252 code units, so ASCII text decodes directly.
fn painted_text(bytes: &[u8]) -> String {
    let document = lopdf::Document::load_mem(bytes).expect("rendered PDF parses");
    let mut text = String::new();
    for page_id in document.get_pages().into_values() {
        let content = document.get_page_content(page_id).expect("page content");
        let content = lopdf::content::Content::decode(&content).expect("content stream decodes");
        for operation in content.operations {
            if operation.operator != "TJ" {
                continue;
            }
            for operand in operation.operands {
                let lopdf::Object::Array(items) = operand else {
                    continue;
                };
                for item in items {
                    if let lopdf::Object::String(code_units, _) = item {
                        text.extend(
                            code_units
                                .chunks(2)
                                .map(|unit| {
                                    unit.iter().fold(0u32, |acc, b| (acc << 8) | u32::from(*b))
                                })
                                .filter_map(char::from_u32),
                        );
                    }
                }
            }
        }
    }
    text
}

fn without_whitespace(text: &str) -> String {
    text.chars().filter(|ch| !ch.is_whitespace()).collect()
}

fn long_source() -> String {
    let paragraph = "The study assistant keeps notes, flashcards and goals in sync so that \
                     every session starts where the previous one ended. ";
    let mut source = String::from("# Overview\n\n");
    for index in 0..120 {
        source.push_str(&format!("## Topic {}\n", index + 1));
        source.push_str(&paragraph.repeat(3));
        source.push('\n');
    }
    source
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    fn scrub_xml(data: &mut [u8], start: &[u8], end: &[u8]) {
        let mut offset = 0;
        while offset + start.len() < data.len() {
            let Some(start_pos) = data[offset..]
                .windows(start.len())
                .position(|window| window == start)
            else {
                break;
            };
            let start_index = offset + start_pos + start.len();
            let Some(end_pos) = data[start_index..]
                .windows(end.len())
                .position(|window| window == end)
            else {
                break;
            };
            for byte in &mut data[start_index..start_index + end_pos] {
                if !matches!(*byte, b'<' | b'>' | b'/' | b' ' | b'\n' | b'\r' | b'\t') {
                    *byte = b'0';
                }
            }
            offset = start_index + end_pos + end.len();
        }
    }

    let mut normalized = bytes.to_vec();
    for tag in [&b"/CreationDate("[..], &b"/ModDate("[..], &b"/Producer("[..]] {
        scrub_segment(&mut normalized, tag, b')');
    }
    scrub_segment(&mut normalized, b"/ID[", b']');
    for (start, end) in [
        (&b"<xmp:CreateDate>"[..], &b"</xmp:CreateDate>"[..]),
        (&b"<xmp:ModifyDate>"[..], &b"</xmp:ModifyDate>"[..]),
        (&b"<xmp:MetadataDate>"[..], &b"</xmp:MetadataDate>"[..]),
        (&b"<xmpMM:DocumentID>"[..], &b"</xmpMM:DocumentID>"[..]),
        (&b"<xmpMM:InstanceID>"[..], &b"</xmpMM:InstanceID>"[..]),
        (&b"<xmpMM:VersionID>"[..], &b"</xmpMM:VersionID>"[..]),
    ] {
        scrub_xml(&mut normalized, start, end);
    }
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(scrub_pdf(bytes)).into()
}

#[test]
fn title_blank_body_fits_on_one_page() {
    let Some(pdf) = render(
        "# Title\n\nSome body text.",
        &DocumentProfile::documentation(),
    ) else {
        eprintln!("Skipping title_blank_body_fits_on_one_page: {SKIP_NOTE}");
        return;
    };

    assert_eq!(pdf.summary.headings, 1);
    assert_eq!(pdf.summary.blanks, 1);
    assert_eq!(pdf.summary.bodies, 1);
    assert_eq!(pdf.pages, 1);
    assert_eq!(page_count(&pdf.bytes), 1);
}

#[test]
fn presentation_separators_render_as_gaps() {
    let Some(pdf) = render("## Sub\n---\nline", &DocumentProfile::presentation()) else {
        eprintln!("Skipping presentation_separators_render_as_gaps: {SKIP_NOTE}");
        return;
    };

    assert_eq!(pdf.summary.headings, 1);
    assert_eq!(pdf.summary.separators, 1);
    assert_eq!(pdf.summary.bodies, 1);
    assert_eq!(pdf.pages, 1);
}

#[test]
fn empty_source_yields_a_single_header_page() {
    let Some(pdf) = render("", &DocumentProfile::documentation()) else {
        eprintln!("Skipping empty_source_yields_a_single_header_page: {SKIP_NOTE}");
        return;
    };

    assert_eq!(pdf.summary.total(), 0);
    assert_eq!(pdf.pages, 1);
    assert_eq!(page_count(&pdf.bytes), 1);
}

#[test]
fn overflowing_body_repeats_the_header_on_every_page() {
    let Some(pdf) = render(&long_source(), &DocumentProfile::documentation()) else {
        eprintln!("Skipping overflowing_body_repeats_the_header_on_every_page: {SKIP_NOTE}");
        return;
    };

    let pages = page_count(&pdf.bytes);
    assert!(pages > 1, "expected several pages, got {pages}");
    assert_eq!(pdf.pages, pages, "header must be painted once per page");
    assert_eq!(pdf.summary.headings, 121);
}

#[test]
fn rendering_is_deterministic() {
    let source = long_source();
    let profile = DocumentProfile::presentation();
    let (Some(first), Some(second)) = (render(&source, &profile), render(&source, &profile)) else {
        eprintln!("Skipping rendering_is_deterministic: {SKIP_NOTE}");
        return;
    };

    assert_eq!(first.bytes.len(), second.bytes.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&first.bytes),
        normalized_hash(&second.bytes),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn render_file_overwrites_existing_output() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping render_file_overwrites_existing_output: {SKIP_NOTE}");
        return;
    }

    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("notes.md");
    let output = dir.path().join("notes.pdf");
    fs::write(&input, "# Notes\n\nFirst line.\nSecond line.\n").expect("write source");
    fs::write(&output, b"stale").expect("write stale output");

    let profile = DocumentProfile::new("Study Notes", &input, &output);
    let report = render_file(&profile, &LayoutSettings::default()).expect("render file");

    let written = fs::read(&output).expect("read output");
    assert!(written.starts_with(b"%PDF-"));
    assert_eq!(report.bytes, written.len());
    assert_eq!(report.output, output);
    assert_eq!(report.summary.bodies, 2);
}

#[test]
fn unwritable_output_is_a_write_error() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping unwritable_output_is_a_write_error: {SKIP_NOTE}");
        return;
    }

    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("notes.md");
    fs::write(&input, "# Notes\n").expect("write source");
    let output = dir.path().join("missing-dir").join("notes.pdf");

    let profile = DocumentProfile::new("Study Notes", &input, &output);
    let err = render_file(&profile, &LayoutSettings::default()).unwrap_err();
    assert!(
        matches!(err, RenderError::WriteOutput { ref path, .. } if *path == output),
        "unexpected error: {err}"
    );
}

#[test]
fn words_wider_than_the_page_are_painted_in_full() {
    if !fonts::default_fonts_available() {
        eprintln!("Skipping words_wider_than_the_page_are_painted_in_full: {SKIP_NOTE}");
        return;
    }

    let line = format!("Read https://example.com/{} before the exam.", "a".repeat(200));
    let layout = LayoutSettings::default().with_embedding(FontEmbedding::Builtin);
    let pdf = render_source(&line, &DocumentProfile::documentation(), &layout).expect("render pdf");

    let painted = painted_text(&pdf.bytes);
    assert!(painted.contains("example.com"), "URL missing from {painted:?}");
    assert!(painted.contains("before the exam."));
    assert!(
        without_whitespace(&painted).contains(&without_whitespace(&line)),
        "long word was not painted in full: {painted:?}"
    );
}
