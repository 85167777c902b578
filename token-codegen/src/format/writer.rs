/// Line-oriented string builder for emitting JS/TS source files.
pub struct CodeWriter {
    buf: String,
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl CodeWriter {
    pub fn new() -> Self {
        Self { buf: String::new() }
    }

    /// Append text verbatim (no trailing newline added).
    pub fn raw(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Write one line terminated by `\n`.
    pub fn line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Consume and return the built string.
    pub fn finish(self) -> String {
        self.buf
    }
}

/// Escape a string for embedding in a JS double-quoted string literal.
pub fn escape_js(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line() {
        let mut w = CodeWriter::new();
        w.line("const x = 1;");
        assert_eq!(w.finish(), "const x = 1;\n");
    }

    #[test]
    fn test_raw_then_blank() {
        let mut w = CodeWriter::new();
        w.raw("// a\n");
        w.blank();
        w.line("x;");
        assert_eq!(w.finish(), "// a\n\nx;\n");
    }

    #[test]
    fn test_escape_js() {
        assert_eq!(escape_js("#0875e1"), "#0875e1");
        assert_eq!(escape_js("a\"b"), "a\\\"b");
        assert_eq!(escape_js("a\\b"), "a\\\\b");
        assert_eq!(escape_js("a\nb"), "a\\nb");
        assert_eq!(escape_js("a\u{2028}b"), "a\\u2028b");
    }
}
