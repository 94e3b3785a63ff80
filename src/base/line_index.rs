//! Byte-offset to line-number conversion.
//!
//! The lexer reports positions as byte offsets; diagnostics want 1-based
//! line numbers. A `LineIndex` is built once per input text.

use text_size::TextSize;

/// Maps byte offsets into a text to 1-based line numbers.
#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte offset of the start of each line (line 1 starts at 0).
    line_starts: Vec<u32>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i as u32 + 1);
            }
        }
        Self { line_starts }
    }

    /// 1-based line number containing the given offset.
    pub fn line(&self, offset: TextSize) -> u32 {
        let offset: u32 = offset.into();
        match self.line_starts.binary_search(&offset) {
            Ok(idx) => idx as u32 + 1,
            Err(idx) => idx as u32,
        }
    }

    /// 1-based column of the given offset within its line (byte-based).
    pub fn column(&self, offset: TextSize) -> u32 {
        let offset: u32 = offset.into();
        let line = self.line(TextSize::new(offset)) as usize;
        offset - self.line_starts[line - 1] + 1
    }

    /// Number of lines in the indexed text.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
