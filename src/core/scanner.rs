//! Byte-level cursor over HTML input
//!
//! Delimiter searches go through memchr, which picks SSE2/AVX2/NEON at
//! runtime. Every position the cursor hands out is clamped to the input, so
//! truncated markup never panics.

use memchr::{memchr, memmem};

pub struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    #[inline]
    pub fn new(input: &'a [u8]) -> Self {
        Scanner { input, pos: 0 }
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Move the cursor; positions past the end land on the end
    #[inline]
    pub fn set_position(&mut self, pos: usize) {
        self.pos = pos.min(self.input.len());
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.input.len()
    }

    #[inline]
    pub fn slice(&self, start: usize, end: usize) -> &'a [u8] {
        &self.input[start..end]
    }

    #[inline]
    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    #[inline]
    pub fn advance(&mut self, n: usize) {
        self.set_position(self.pos + n);
    }

    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        self.rest().starts_with(needle)
    }

    #[inline]
    fn rest(&self) -> &'a [u8] {
        &self.input[self.pos..]
    }

    /// Absolute offset of the next `<`
    #[inline]
    pub fn find_tag_start(&self) -> Option<usize> {
        memchr(b'<', self.rest()).map(|i| self.pos + i)
    }

    /// Absolute offset of the next `>`, quotes ignored
    #[inline]
    pub fn find_tag_end(&self) -> Option<usize> {
        memchr(b'>', self.rest()).map(|i| self.pos + i)
    }

    /// Offset of the `>` closing the current tag.
    ///
    /// A quote only opens an attribute value when it follows `=`, so stray
    /// apostrophes (`<p don't>`) do not swallow the rest of the document.
    pub fn find_tag_end_quoted(&self) -> Option<usize> {
        let mut open: Option<u8> = None;
        for (offset, &b) in self.rest().iter().enumerate() {
            let at = self.pos + offset;
            match open {
                Some(q) => {
                    if b == q {
                        open = None;
                    }
                }
                None if b == b'>' => return Some(at),
                None if (b == b'"' || b == b'\'') && self.after_equals(at) => open = Some(b),
                None => {}
            }
        }
        None
    }

    /// Absolute offset of the next `needle`
    #[inline]
    pub fn find_seq(&self, needle: &[u8]) -> Option<usize> {
        memmem::find(self.rest(), needle).map(|i| self.pos + i)
    }

    /// Offset of the `</name` that ends a raw-text element.
    ///
    /// The name compares ASCII case-insensitively and must be followed by
    /// whitespace, `/`, `>` or the end of input (`</scriptx>` does not count).
    pub fn find_raw_text_end(&self, name: &[u8]) -> Option<usize> {
        let finder = memmem::Finder::new(b"</");
        let mut from = self.pos;
        while let Some(i) = finder.find(&self.input[from..]) {
            let open = from + i;
            let after = open + 2 + name.len();
            let matches = self
                .input
                .get(open + 2..after)
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name));
            let bounded = self
                .input
                .get(after)
                .is_none_or(|&b| b == b'>' || b == b'/' || is_whitespace(b));
            if matches && bounded {
                return Some(open);
            }
            from = open + 2;
        }
        None
    }

    /// Consume a tag name. Names start with an ASCII letter and stop at
    /// whitespace, `/` or `>`; anything else leaves the cursor in place.
    pub fn read_tag_name(&mut self) -> Option<&'a [u8]> {
        let start = self.pos;
        if !self.peek()?.is_ascii_alphabetic() {
            return None;
        }
        let len = self
            .rest()
            .iter()
            .position(|&b| b == b'>' || b == b'/' || is_whitespace(b))
            .unwrap_or(self.input.len() - start);
        self.pos = start + len;
        Some(&self.input[start..self.pos])
    }

    fn after_equals(&self, at: usize) -> bool {
        self.input[self.pos..at]
            .iter()
            .rev()
            .find(|&&b| !is_whitespace(b))
            .is_some_and(|&b| b == b'=')
    }
}

/// HTML whitespace: space, tab, LF, CR, FF
#[inline]
pub fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0C)
}
