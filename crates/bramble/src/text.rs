//! Text encoding helpers.

use std::str;

/// A UTF-8 byte sequence for one code point, stored NUL-terminated in a
/// fixed buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Utf8Seq {
    /// Encoded bytes followed by a NUL.
    buf: [u8; 8],
    /// Number of encoded bytes, excluding the NUL.
    len: usize,
}

impl Utf8Seq {
    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// The encoded bytes and the terminating NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf[..=self.len]
    }

    /// The sequence as a string, if it is valid modern UTF-8. Sequences for
    /// surrogates and for code points above U+10FFFF are not.
    pub fn as_str(&self) -> Option<&str> {
        str::from_utf8(self.as_bytes()).ok()
    }

    /// Number of encoded bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for out-of-range input.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Encode a code point with the six-byte UTF-8 scheme of RFC 2279, which
/// covers `0..=0x7fff_ffff`. Larger values yield an empty sequence.
pub fn utf8(codepoint: u32) -> Utf8Seq {
    let len = match codepoint {
        0..0x80 => 1,
        0x80..0x800 => 2,
        0x800..0x1_0000 => 3,
        0x1_0000..0x20_0000 => 4,
        0x20_0000..0x400_0000 => 5,
        0x400_0000..=0x7fff_ffff => 6,
        _ => 0,
    };
    let mut buf = [0; 8];
    let mut c = codepoint;
    for i in (1..len).rev() {
        buf[i] = 0x80 | (c & 0x3f) as u8;
        c >>= 6;
    }
    if len == 1 {
        buf[0] = c as u8;
    } else if len > 1 {
        buf[0] = !(0xff_u8 >> len) | c as u8;
    }
    Utf8Seq { buf, len }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn known_sequences() {
        assert_eq!(utf8(0x41).as_bytes(), b"A");
        assert_eq!(utf8(0x41).as_bytes_with_nul(), b"A\0");
        assert_eq!(utf8(0).as_bytes_with_nul(), &[0, 0]);
        assert_eq!(utf8(0x20AC).as_bytes(), &[0xE2, 0x82, 0xAC]);
        assert_eq!(utf8(0x20AC).as_str(), Some("\u{20AC}"));
        assert_eq!(utf8(0x10_FFFF).as_str(), Some("\u{10FFFF}"));
    }

    #[test]
    fn extended_range() {
        let five = utf8(0x20_0000);
        assert_eq!(five.as_bytes(), &[0xF8, 0x88, 0x80, 0x80, 0x80]);
        assert_eq!(five.as_str(), None);
        let six = utf8(0x7fff_ffff);
        assert_eq!(six.as_bytes(), &[0xFD, 0xBF, 0xBF, 0xBF, 0xBF, 0xBF]);
        assert_eq!(six.as_bytes_with_nul().len(), 7);
    }

    #[test]
    fn out_of_range() {
        let s = utf8(0x8000_0000);
        assert!(s.is_empty());
        assert_eq!(s.as_bytes_with_nul(), &[0]);
    }

    proptest! {
        #[test]
        fn matches_std_encoder(c in any::<char>()) {
            let mut buf = [0; 4];
            let expected = c.encode_utf8(&mut buf);
            let seq = utf8(u32::from(c));
            prop_assert_eq!(seq.as_bytes(), expected.as_bytes());
            prop_assert_eq!(seq.as_str().and_then(|s| s.chars().next()), Some(c));
        }
    }
}
