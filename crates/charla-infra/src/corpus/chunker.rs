//! Document chunker.
//!
//! Uses the `text-splitter` crate to cut documents into pieces suitable for
//! embedding. Markdown files use `MarkdownSplitter` for heading-aware
//! splitting; all other text uses `TextSplitter`.

use text_splitter::{MarkdownSplitter, TextSplitter};

/// A piece of a source document, not yet embedded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentChunk {
    /// `"{file}-{byte_offset}"`, stable across rebuilds of the same file.
    pub id: String,
    pub text: String,
    pub source: String,
}

/// Split `content` into chunks of at most `max_chars` characters.
pub fn chunk_document(file_name: &str, content: &str, max_chars: usize) -> Vec<DocumentChunk> {
    let max_chars = max_chars.max(1);

    let pieces: Vec<(usize, &str)> = if is_markdown(file_name) {
        MarkdownSplitter::new(max_chars).chunk_indices(content).collect()
    } else {
        TextSplitter::new(max_chars).chunk_indices(content).collect()
    };

    pieces
        .into_iter()
        .map(|(offset, text)| DocumentChunk {
            id: format!("{file_name}-{offset}"),
            text: text.to_string(),
            source: file_name.to_string(),
        })
        .collect()
}

/// Whether a file name is a corpus document (`.txt`, `.md` or `.docx`).
pub fn is_document(file_name: &str) -> bool {
    has_extension(file_name, "txt") || is_markdown(file_name) || is_docx(file_name)
}

/// `.docx` files are read as bytes and converted to text before chunking.
pub fn is_docx(file_name: &str) -> bool {
    has_extension(file_name, "docx")
}

fn is_markdown(file_name: &str) -> bool {
    has_extension(file_name, "md")
}

fn has_extension(file_name: &str, ext: &str) -> bool {
    std::path::Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_document_is_one_chunk() {
        let chunks = chunk_document("guia.txt", "El horario es de 9 a 18.", 500);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].id, "guia.txt-0");
        assert_eq!(chunks[0].source, "guia.txt");
        assert_eq!(chunks[0].text, "El horario es de 9 a 18.");
    }

    #[test]
    fn test_long_document_respects_max_chars() {
        let content = "Primera frase del manual. ".repeat(100);
        let chunks = chunk_document("manual.txt", &content, 120);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 120);
            let offset: usize = chunk.id.rsplit('-').next().unwrap().parse().unwrap();
            assert!(content[offset..].starts_with(&chunk.text));
        }
    }

    #[test]
    fn test_markdown_document_is_split() {
        let content = format!(
            "# Envíos\n\n{}\n\n# Devoluciones\n\n{}",
            "Los envíos tardan tres días. ".repeat(10),
            "Las devoluciones se aceptan durante un mes. ".repeat(10)
        );
        let chunks = chunk_document("faq.md", &content, 200);
        assert!(chunks.len() >= 2);
        assert!(chunks.iter().all(|c| c.source == "faq.md"));
    }

    #[test]
    fn test_empty_document_has_no_chunks() {
        assert!(chunk_document("vacio.txt", "", 500).is_empty());
    }

    #[test]
    fn test_is_document() {
        assert!(is_document("a.txt"));
        assert!(is_document("b.MD"));
        assert!(is_document("manual.docx"));
        assert!(!is_document("c.pdf"));
        assert!(!is_document("txt"));
    }
}
