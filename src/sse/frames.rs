//! Blank-line framing for decoded SSE text.

/// One blank-line-delimited unit of the SSE stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(String);

impl Frame {
    /// Build a frame from already-normalized text.
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw frame text without the trailing delimiter.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Lines of the frame, split on `\n`.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.0.split('\n')
    }
}

/// Accumulates decoded text and yields complete frames.
///
/// The retained remainder is the only state carried between reads. After
/// each `feed` it holds exactly the suffix not yet closed by a blank line,
/// already CRLF-normalized except for a trailing `\r` that may pair with
/// the next read.
#[derive(Debug, Default)]
pub struct FrameSplitter {
    remainder: String,
    /// Offset in `remainder` before which no delimiter can start
    scan_from: usize,
}

impl FrameSplitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text` and return every frame it completes, in arrival order.
    ///
    /// Only the newly appended text is normalized and searched.
    pub fn feed(&mut self, text: &str) -> Vec<Frame> {
        // A CRLF split across reads: drop the held `\r`
        if self.remainder.ends_with('\r') && text.starts_with('\n') {
            self.remainder.pop();
            self.scan_from = self.scan_from.min(self.remainder.len().saturating_sub(1));
        }
        if text.contains("\r\n") {
            self.remainder.push_str(&text.replace("\r\n", "\n"));
        } else {
            self.remainder.push_str(text);
        }

        let mut frames = Vec::new();
        let mut start = 0;
        let mut from = self.scan_from;
        while let Some(at) = find_delimiter(&self.remainder, from) {
            let piece = &self.remainder[start..at];
            if !piece.trim().is_empty() {
                frames.push(Frame::new(piece));
            }
            start = at + 2;
            from = start;
        }

        self.remainder.drain(..start);
        self.scan_from = self.remainder.len().saturating_sub(1);
        frames
    }

    /// Text received but not yet closed by a blank line.
    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    /// Take the unterminated remainder, leaving the splitter empty.
    pub fn take_remainder(&mut self) -> String {
        self.scan_from = 0;
        std::mem::take(&mut self.remainder)
    }

    pub fn reset(&mut self) {
        self.remainder.clear();
        self.scan_from = 0;
    }
}

/// Byte offset of the first `\n\n` at or after `from`.
fn find_delimiter(text: &str, from: usize) -> Option<usize> {
    text.as_bytes()
        .get(from..)?
        .windows(2)
        .position(|pair| pair == b"\n\n")
        .map(|at| at + from)
}
