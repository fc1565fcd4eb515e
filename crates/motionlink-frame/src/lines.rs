/// Stateful splitter for the inbound line protocol.
///
/// Consumes one byte at a time. Non-terminator bytes accumulate in an
/// internal buffer; a `\r` or `\n` completes the buffered line if it is
/// non-empty. Empty accumulations (leading or repeated terminators) are
/// discarded, so a zero-length line is never produced. Malformed input
/// has no error path; it simply never completes a line.
#[derive(Debug, Default)]
pub struct LineAccumulator {
    buf: Vec<u8>,
}

impl LineAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte; returns the completed line when a terminator
    /// closes a non-empty buffer.
    ///
    /// Lines are delivered verbatim (lossy UTF-8, terminator stripped).
    /// The buffer resets after each yield.
    pub fn push(&mut self, byte: u8) -> Option<String> {
        match byte {
            b'\r' | b'\n' => {
                if self.buf.is_empty() {
                    return None;
                }
                let line = String::from_utf8_lossy(&self.buf).into_owned();
                self.buf.clear();
                Some(line)
            }
            other => {
                self.buf.push(other);
                None
            }
        }
    }

    /// Discard any partially accumulated line.
    ///
    /// Called when a connection is (re)opened so stale bytes from a
    /// previous session cannot prefix the first line of the next one.
    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(acc: &mut LineAccumulator, bytes: &[u8]) -> Vec<String> {
        bytes.iter().filter_map(|&b| acc.push(b)).collect()
    }

    #[test]
    fn splits_mixed_terminators() {
        let mut acc = LineAccumulator::new();
        let lines = feed(&mut acc, b"hello\r\nworld\n");
        assert_eq!(lines, ["hello", "world"]);
    }

    #[test]
    fn never_yields_empty_lines() {
        let mut acc = LineAccumulator::new();
        let lines = feed(&mut acc, b"\r\n\r\n\na\n\r\r");
        assert_eq!(lines, ["a"]);
    }

    #[test]
    fn partial_line_survives_across_pushes() {
        let mut acc = LineAccumulator::new();
        assert!(feed(&mut acc, b"OK 12").is_empty());
        assert_eq!(feed(&mut acc, b"8\r"), ["OK 128"]);
    }

    #[test]
    fn reset_discards_partial_line() {
        let mut acc = LineAccumulator::new();
        assert!(feed(&mut acc, b"stale").is_empty());
        acc.reset();
        assert_eq!(feed(&mut acc, b"fresh\n"), ["fresh"]);
    }

    #[test]
    fn non_utf8_bytes_are_replaced_not_dropped() {
        let mut acc = LineAccumulator::new();
        let lines = feed(&mut acc, &[b'o', b'k', 0xFF, b'\n']);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("ok"));
        assert!(!lines[0].is_empty());
    }
}
