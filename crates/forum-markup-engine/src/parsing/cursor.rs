/// A byte cursor over one markup body.
///
/// Indices are local to `s`; callers that report positions in the whole post
/// add the body's offset themselves.
#[derive(Clone)]
pub struct Cursor<'a> {
    pub s: &'a str,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(s: &'a str) -> Self {
        Self::at(s, 0)
    }

    /// Cursor over `s` starting at local index `i`.
    pub fn at(s: &'a str, i: usize) -> Self {
        Self { s, i }
    }

    pub fn peek(&self) -> Option<u8> {
        self.s.as_bytes().get(self.i).copied()
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.i += 1;
        Some(b)
    }

    /// Moves to the next `byte`, or to the end. Returns true if found.
    pub fn skip_to(&mut self, byte: u8) -> bool {
        match self.s.as_bytes().get(self.i..).and_then(|rest| rest.iter().position(|b| *b == byte)) {
            Some(offset) => {
                self.i += offset;
                true
            }
            None => {
                self.i = self.s.len();
                false
            }
        }
    }

    pub fn seek(&mut self, i: usize) {
        self.i = i;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peek_and_bump() {
        let mut cur = Cursor::new("[b]");
        assert_eq!(cur.peek(), Some(b'['));
        assert_eq!(cur.bump(), Some(b'['));
        assert_eq!(cur.i, 1);
    }

    #[test]
    fn empty_input() {
        let mut cur = Cursor::new("");
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.bump(), None);
        assert!(!cur.skip_to(b'['));
    }

    #[test]
    fn skip_to_finds_next_bracket() {
        let mut cur = Cursor::at("plain [b] [i]", 7);
        assert!(cur.skip_to(b'['));
        assert_eq!(cur.i, 10);
    }

    #[test]
    fn skip_to_without_match_moves_to_end() {
        let mut cur = Cursor::new("no tags");
        assert!(!cur.skip_to(b'['));
        assert_eq!(cur.i, 7);
        assert_eq!(cur.peek(), None);
    }

    #[test]
    fn seek_past_end_does_not_panic() {
        let mut cur = Cursor::new("hi");
        cur.seek(10);
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.bump(), None);
        assert!(!cur.skip_to(b'['));
    }
}
