//! Character cursor for traversing source code.
//!
//! The `Cursor` maintains position state while iterating through source
//! characters. It handles UTF-8 correctly and tracks line/column numbers
//! for error reporting; a newline increments the line and resets the
//! column to 1.

/// A cursor for traversing source code character by character.
///
/// # Example
///
/// ```
/// use rulang_lex::cursor::Cursor;
///
/// let mut cursor = Cursor::new("let x");
/// assert_eq!(cursor.current_char(), 'l');
/// cursor.advance();
/// assert_eq!(cursor.current_char(), 'e');
/// ```
pub struct Cursor<'a> {
    /// The source text being traversed.
    source: &'a str,

    /// Current byte position in the source.
    position: usize,

    /// Current line number (1-based).
    line: u32,

    /// Current column number (1-based).
    column: u32,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor positioned at the start of `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the current character, or `'\0'` at end of input.
    pub fn current_char(&self) -> char {
        self.source[self.position..].chars().next().unwrap_or('\0')
    }

    /// Returns the character `offset` characters ahead of the cursor,
    /// or `'\0'` past the end of input.
    pub fn peek_char(&self, offset: usize) -> char {
        self.source[self.position..]
            .chars()
            .nth(offset)
            .unwrap_or('\0')
    }

    /// Advances past the current character, updating line/column state.
    pub fn advance(&mut self) {
        if let Some(c) = self.source[self.position..].chars().next() {
            self.position += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes the current character if it equals `expected`.
    pub fn match_char(&mut self, expected: char) -> bool {
        if self.current_char() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Whether the cursor has consumed all input.
    pub fn is_at_end(&self) -> bool {
        self.position >= self.source.len()
    }

    /// Source text from byte offset `start` up to the cursor.
    pub fn slice_from(&self, start: usize) -> &'a str {
        &self.source[start..self.position]
    }

    /// Current byte position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Current line (1-based).
    pub fn line(&self) -> u32 {
        self.line
    }

    /// Current column (1-based).
    pub fn column(&self) -> u32 {
        self.column
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_tracks_columns() {
        let mut cursor = Cursor::new("ab");
        assert_eq!(cursor.column(), 1);
        cursor.advance();
        assert_eq!(cursor.column(), 2);
    }

    #[test]
    fn test_newline_resets_column() {
        let mut cursor = Cursor::new("a\nb");
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.line(), 2);
        assert_eq!(cursor.column(), 1);
        assert_eq!(cursor.current_char(), 'b');
    }

    #[test]
    fn test_peek_does_not_move() {
        let cursor = Cursor::new("xyz");
        assert_eq!(cursor.peek_char(1), 'y');
        assert_eq!(cursor.peek_char(2), 'z');
        assert_eq!(cursor.peek_char(3), '\0');
        assert_eq!(cursor.current_char(), 'x');
    }

    #[test]
    fn test_slice_from() {
        let mut cursor = Cursor::new("hello");
        let start = cursor.position();
        cursor.advance();
        cursor.advance();
        assert_eq!(cursor.slice_from(start), "he");
    }

    #[test]
    fn test_match_char() {
        let mut cursor = Cursor::new("->");
        assert!(!cursor.match_char('>'));
        assert!(cursor.match_char('-'));
        assert!(cursor.match_char('>'));
        assert!(cursor.is_at_end());
    }

    #[test]
    fn test_current_char_at_end() {
        let cursor = Cursor::new("");
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current_char(), '\0');
    }
}
