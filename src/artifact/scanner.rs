// Envelope scanner
//
// Two-state machine over the raw model text:
//
//   Searching --(opening marker found)--> Found --(last closing marker)--> done
//
// Searching skips look-alike tags such as `<artifacts>`. Found spans from the
// first opening marker through the LAST closing marker, so nested
// look-alike text inside the body stays inside the envelope. Several
// envelopes in one response are merged into one span; the number of opening
// markers inside the span is reported so callers can log it.

pub const OPEN_MARKER: &str = "<artifact";
pub const CLOSE_MARKER: &str = "</artifact>";

/// Byte range of the envelope inside the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeSpan {
    /// Offset of the opening `<artifact`
    pub start: usize,
    /// Offset one past the closing `</artifact>`
    pub end: usize,
    /// Opening markers seen inside the span (1 for a well-formed response)
    pub opening_markers: usize,
}

impl EnvelopeSpan {
    pub fn is_ambiguous(&self) -> bool {
        self.opening_markers > 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Searching { from: usize },
    Found { open: usize },
}

/// Locate the envelope in `text`, or `None` when there is no opening marker
/// or it is never closed.
pub fn locate(text: &str) -> Option<EnvelopeSpan> {
    let mut state = ScanState::Searching { from: 0 };
    loop {
        state = match state {
            ScanState::Searching { from } => ScanState::Found {
                open: find_opening_marker(text, from)?,
            },
            ScanState::Found { open } => {
                let close = text[open..].rfind(CLOSE_MARKER)?;
                let end = open + close + CLOSE_MARKER.len();
                return Some(EnvelopeSpan {
                    start: open,
                    end,
                    opening_markers: count_opening_markers(&text[open..end]),
                });
            }
        };
    }
}

/// Next `<artifact` at or after `from` that is followed by whitespace or `>`.
fn find_opening_marker(text: &str, from: usize) -> Option<usize> {
    let mut cursor = from;
    while let Some(offset) = text[cursor..].find(OPEN_MARKER) {
        let at = cursor + offset;
        let after = at + OPEN_MARKER.len();
        match text[after..].chars().next() {
            Some(c) if c == '>' || c.is_whitespace() => return Some(at),
            _ => cursor = after,
        }
    }
    None
}

fn count_opening_markers(text: &str) -> usize {
    let mut count = 0;
    let mut cursor = 0;
    while let Some(at) = find_opening_marker(text, cursor) {
        count += 1;
        cursor = at + OPEN_MARKER.len();
    }
    count
}
