//! Multi-format document text extraction.
//!
//! Turns raw file bytes into plain UTF-8 text ready for sanitization.
//! Each format gets light preprocessing before entering the shared
//! pipeline: markdown syntax stripping, PDF artifact cleanup, CSV
//! prose summarization, JSON string flattening, and DOCX run extraction.

use std::io::Read;

use regex::Regex;
use std::sync::OnceLock;

use crate::models::FileType;

/// Maximum decompressed bytes read from a single ZIP entry (zip-bomb
/// protection).
const MAX_XML_ENTRY_BYTES: u64 = 50 * 1024 * 1024;

/// Extraction error. The pipeline surfaces this before any analysis
/// stage runs; no panics on malformed input.
#[derive(Debug)]
pub enum ExtractError {
    UnsupportedExtension(String),
    Pdf(String),
    Docx(String),
    Encoding(String),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractError::UnsupportedExtension(ext) => {
                write!(f, "unsupported file extension: {}", ext)
            }
            ExtractError::Pdf(e) => write!(f, "PDF extraction failed: {}", e),
            ExtractError::Docx(e) => write!(f, "DOCX extraction failed: {}", e),
            ExtractError::Encoding(e) => write!(f, "text decoding failed: {}", e),
        }
    }
}

impl std::error::Error for ExtractError {}

/// Resolve a path's extension to a supported [`FileType`].
pub fn file_type_for_path(path: &std::path::Path) -> Result<FileType, ExtractError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    FileType::from_extension(ext)
        .ok_or_else(|| ExtractError::UnsupportedExtension(ext.to_string()))
}

/// Extract plain text from document bytes according to the file type.
pub fn extract_text(bytes: &[u8], file_type: FileType) -> Result<String, ExtractError> {
    match file_type {
        FileType::Txt => decode_utf8(bytes),
        FileType::Md => Ok(strip_markdown(&decode_utf8(bytes)?)),
        FileType::Pdf => extract_pdf(bytes),
        FileType::Docx => extract_docx(bytes),
        FileType::Csv => Ok(summarize_csv(&decode_utf8(bytes)?)),
        FileType::Json => Ok(flatten_json(&decode_utf8(bytes)?)),
    }
}

fn decode_utf8(bytes: &[u8]) -> Result<String, ExtractError> {
    String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::Encoding(e.to_string()))
}

// ============ Markdown ============

fn md_block_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Fenced code blocks, kept out of the prose entirely.
    RE.get_or_init(|| Regex::new(r"(?s)```.*?```").unwrap())
}

fn md_inline_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Headings, emphasis markers, inline code ticks, blockquote and
    // list prefixes.
    RE.get_or_init(|| Regex::new(r"(?m)^#{1,6}\s+|^\s*[>*+-]\s+|[*_]{1,3}|`").unwrap())
}

fn md_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // [text](url) → text; image links drop entirely.
    RE.get_or_init(|| Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").unwrap())
}

/// Strip markdown syntax, leaving prose.
pub fn strip_markdown(text: &str) -> String {
    let no_blocks = md_block_re().replace_all(text, " ");
    let no_links = md_link_re().replace_all(&no_blocks, "$1");
    md_inline_re().replace_all(&no_links, "").to_string()
}

// ============ PDF ============

fn pdf_hyphen_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Hyphenated line breaks left by extraction ("analy-\nsis").
    RE.get_or_init(|| Regex::new(r"(\w)-\s*\n\s*(\w)").unwrap())
}

fn extract_pdf(bytes: &[u8]) -> Result<String, ExtractError> {
    let raw =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))?;
    // Artifact cleanup: form feeds between pages and rejoined hyphenation.
    let no_ff = raw.replace('\u{000C}', "\n");
    Ok(pdf_hyphen_re().replace_all(&no_ff, "$1$2").to_string())
}

// ============ DOCX ============

fn extract_docx(bytes: &[u8]) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    let entry = archive
        .by_name("word/document.xml")
        .map_err(|_| ExtractError::Docx("word/document.xml not found".to_string()))?;
    let mut doc_xml = Vec::new();
    entry
        .take(MAX_XML_ENTRY_BYTES)
        .read_to_end(&mut doc_xml)
        .map_err(|e| ExtractError::Docx(e.to_string()))?;
    if doc_xml.len() as u64 >= MAX_XML_ENTRY_BYTES {
        return Err(ExtractError::Docx(
            "word/document.xml exceeds size limit".to_string(),
        ));
    }
    extract_text_runs(&doc_xml)
}

/// Collect the text of `w:t` run elements, separating paragraphs with
/// spaces.
fn extract_text_runs(xml: &[u8]) -> Result<String, ExtractError> {
    let mut out = String::new();
    let mut reader = quick_xml::Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut in_t = false;
    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_t = true;
                }
            }
            Ok(quick_xml::events::Event::Text(te)) if in_t => {
                out.push_str(te.unescape().unwrap_or_default().as_ref());
            }
            Ok(quick_xml::events::Event::End(e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_t = false;
                } else if e.local_name().as_ref() == b"p" && !out.ends_with(' ') {
                    out.push(' ');
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(ExtractError::Docx(e.to_string())),
            _ => {}
        }
        buf.clear();
    }
    Ok(out.trim().to_string())
}

// ============ CSV ============

/// Summarize tabular data as prose: a header/row-count lead-in followed
/// by the cell text. Quoting rules beyond bare commas are out of scope
/// for this light preprocessing.
pub fn summarize_csv(text: &str) -> String {
    let mut lines = text.lines().filter(|l| !l.trim().is_empty());
    let header = match lines.next() {
        Some(h) => h,
        None => return String::new(),
    };
    let columns: Vec<&str> = header.split(',').map(|c| c.trim()).collect();
    let rows: Vec<&str> = lines.collect();

    let mut out = format!(
        "Table with {} columns ({}) and {} data rows. ",
        columns.len(),
        columns.join(", "),
        rows.len()
    );
    for row in rows {
        let cells: Vec<&str> = row.split(',').map(|c| c.trim()).collect();
        out.push_str(&cells.join(" "));
        out.push_str(". ");
    }
    out.trim().to_string()
}

// ============ JSON ============

/// Flatten a JSON document's string leaves (and keys) into prose. Invalid
/// JSON degrades to the raw text rather than an error.
pub fn flatten_json(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => {
            let mut out = String::new();
            collect_strings(&value, &mut out);
            out.trim().to_string()
        }
        Err(_) => text.to_string(),
    }
}

fn collect_strings(value: &serde_json::Value, out: &mut String) {
    match value {
        serde_json::Value::String(s) => {
            out.push_str(s);
            out.push(' ');
        }
        serde_json::Value::Number(n) => {
            out.push_str(&n.to_string());
            out.push(' ');
        }
        serde_json::Value::Array(items) => {
            for item in items {
                collect_strings(item, out);
            }
        }
        serde_json::Value::Object(map) => {
            for (key, item) in map {
                out.push_str(key);
                out.push(' ');
                collect_strings(item, out);
            }
        }
        _ => {}
    }
}
