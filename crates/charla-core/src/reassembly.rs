//! Client-side reassembly of streamed fragments into display text.
//!
//! Two pieces:
//!
//! - [`SseLineDecoder`] turns the raw bytes of a `text/event-stream` body into
//!   trimmed `data:` payloads, buffering partial lines across reads.
//! - [`Reassembler`] joins those payloads into prose, restoring newlines from
//!   the `###` sentinel and inserting the spaces the trimming removed.
//!
//! Spacing decisions are local and final: text already appended is never
//! revised. That means two halves of one word arriving in separate fragments
//! get a space between them (`"hol"` + `"a"` gives `"hol a"`).

use crate::relay::{DONE, LINE_BREAK};

/// Punctuation after which a non-whitespace fragment gets a leading space.
const SPACED_PUNCTUATION: &[char] = &[
    '.', ',', ';', ':', '!', '¡', '¿', '?', '"', '\'', '*', '+', '-',
];

/// Letters and digits, plus the Spanish accented vowels and ñ in either case.
fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            'á' | 'é' | 'í' | 'ó' | 'ú' | 'ñ' | 'Á' | 'É' | 'Í' | 'Ó' | 'Ú' | 'Ñ'
        )
}

/// Incremental fragment joiner for one response.
#[derive(Debug, Default, Clone)]
pub struct Reassembler {
    accumulated: String,
    last_char: Option<char>,
    finished: bool,
}

impl Reassembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one raw fragment.
    ///
    /// Returns the text actually appended (possibly with a leading space), or
    /// `None` when the fragment was empty, was the terminator, or arrived
    /// after the terminator.
    pub fn push(&mut self, fragment: &str) -> Option<String> {
        if self.finished || fragment.is_empty() {
            return None;
        }
        if fragment == DONE {
            self.finished = true;
            return None;
        }

        let mut piece = fragment.replace(LINE_BREAK, "\n");
        let first = piece.chars().next()?;

        if let Some(last) = self.last_char {
            if is_word_char(last) && is_word_char(first) {
                piece.insert(0, ' ');
            } else if SPACED_PUNCTUATION.contains(&last) && !first.is_whitespace() {
                piece.insert(0, ' ');
            }
        }

        self.last_char = piece.chars().last();
        self.accumulated.push_str(&piece);
        Some(piece)
    }

    /// Text assembled so far.
    pub fn text(&self) -> &str {
        &self.accumulated
    }

    /// Whether the terminator has been seen.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the reassembler, returning the full text.
    pub fn into_text(self) -> String {
        self.accumulated
    }
}

/// Reassemble a complete fragment sequence in one call.
pub fn reassemble<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut reassembler = Reassembler::new();
    for fragment in fragments {
        reassembler.push(fragment.as_ref());
    }
    reassembler.into_text()
}

/// Incremental decoder for `text/event-stream` bodies.
///
/// Only `data:` lines are surfaced; comments (keep-alives), `event:` and
/// other fields are ignored. Payloads are trimmed of surrounding whitespace.
#[derive(Debug, Default)]
pub struct SseLineDecoder {
    buffer: Vec<u8>,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk of body bytes; returns every payload completed by it.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(payload) = Self::parse_line(&line[..line.len() - 1]) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flush a final line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        Self::parse_line(&rest)
    }

    fn parse_line(line: &[u8]) -> Option<String> {
        // A complete line never ends mid code point, so lossy decoding only
        // affects genuinely invalid bytes.
        let line = String::from_utf8_lossy(line);
        line.strip_prefix("data:").map(|p| p.trim().to_string())
    }
}
