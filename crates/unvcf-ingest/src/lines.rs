//! Physical line reading shared by the header scanner and the row source.

use std::io::{self, BufRead};

/// Line-at-a-time reader that tolerates invalid UTF-8 and CRLF endings.
///
/// `count` is the number of lines consumed so far, so right after
/// [`LineReader::next_line`] returns a line it is that line's 1-based number.
pub(crate) struct LineReader<R> {
    reader: R,
    buf: Vec<u8>,
    pub(crate) count: u64,
}

impl<R: BufRead> LineReader<R> {
    /// `count` lines have already been consumed from `reader`.
    pub(crate) fn new(reader: R, count: u64) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            count,
        }
    }

    pub(crate) fn next_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        self.count += 1;
        let text = String::from_utf8_lossy(&self.buf);
        Ok(Some(text.trim_end_matches(['\n', '\r']).to_string()))
    }
}
