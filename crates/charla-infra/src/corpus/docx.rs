//! Plain-text extraction from `.docx` documents.
//!
//! A `.docx` file is a zip container; the body lives in
//! `word/document.xml`. Text runs (`w:t`) are concatenated, paragraphs end
//! with a blank line, and tabs and breaks map to `\t` and `\n`. Formatting,
//! headers and footers are ignored.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use zip::ZipArchive;

const BODY_PART: &str = "word/document.xml";

/// Extract the raw text of a `.docx` file.
pub fn extract_docx_text(bytes: &[u8]) -> Result<String, String> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| e.to_string())?;
    let mut xml = String::new();
    archive
        .by_name(BODY_PART)
        .map_err(|e| format!("{BODY_PART}: {e}"))?
        .read_to_string(&mut xml)
        .map_err(|e| format!("{BODY_PART}: {e}"))?;

    document_xml_text(&xml)
}

fn document_xml_text(xml: &str) -> Result<String, String> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(e) if e.name().as_ref() == b"w:t" => in_text = true,
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => out.push_str("\n\n"),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" => out.push('\t'),
                b"w:br" | b"w:cr" => out.push('\n'),
                b"w:p" => out.push_str("\n\n"),
                _ => {}
            },
            Event::Text(t) if in_text => {
                out.push_str(&t.unescape().map_err(|e| e.to_string())?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out.trim().to_string())
}
