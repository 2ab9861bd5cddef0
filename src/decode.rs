//! The symmetric percent-decoder: byte mode and text mode.

use crate::classes::URIC;
use crate::encode::Encoding;
use crate::error::UriError;
use crate::hex::decode_pair;

/// Stateless percent-decoder. Safe to share across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct Decoder;

impl Decoder {
    /// Decodes `s[off..off + len]` into raw bytes.
    ///
    /// Each character must be ASCII and in [`URIC`] (emitted as one byte),
    /// or `%` followed by two hex digits within the window (emitted as the
    /// decoded byte), or the window is malformed.
    pub fn decode(&self, s: &str, off: usize, len: usize) -> Result<Vec<u8>, UriError> {
        let window = &s[off..off + len];
        let bytes = window.as_bytes();
        let mut out = Vec::with_capacity(bytes.len());
        let mut i = 0;
        while i < bytes.len() {
            let b = bytes[i];
            if b < 128 && URIC.matches(b as char) {
                out.push(b);
                i += 1;
            } else if b == b'%' {
                let hi = bytes.get(i + 1).map(|&b| b as char);
                let lo = bytes.get(i + 2).map(|&b| b as char);
                match (hi, lo) {
                    (Some(hi), Some(lo)) => match decode_pair(hi, lo) {
                        Some(byte) => {
                            out.push(byte);
                            i += 3;
                        }
                        None => return Err(UriError::syntax("percent-encoding", off + i, window)),
                    },
                    _ => return Err(UriError::syntax("percent-encoding", off + i, window)),
                }
            } else {
                return Err(UriError::syntax("percent-encoding", off + i, window));
            }
        }
        Ok(out)
    }

    /// Decodes `s[off..off + len]` to raw bytes, then decodes those bytes as
    /// text in `encoding`. A fast path skips the intermediate byte buffer
    /// for UTF-8 input with no percent triplet.
    pub fn decode_text(&self, s: &str, off: usize, len: usize, encoding: Encoding) -> Result<String, UriError> {
        let window = &s[off..off + len];
        if encoding == Encoding::Utf8 && !window.contains('%') {
            return Ok(window.to_string());
        }
        let bytes = self.decode(s, off, len)?;
        Ok(match encoding {
            Encoding::Utf8 => String::from_utf8_lossy(&bytes).into_owned(),
            Encoding::Latin1 => bytes.into_iter().map(|b| b as char).collect(),
        })
    }

    /// Equivalent to `decode_text(s, off, len, Encoding::Utf8)`.
    pub fn decode_utf8(&self, s: &str, off: usize, len: usize) -> Result<String, UriError> {
        self.decode_text(s, off, len, Encoding::Utf8)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::encode::Encoder;
    use proptest::prelude::*;

    #[test]
    fn decodes_literal_and_percent_bytes() {
        let dec = Decoder;
        let decoded = dec.decode("a%20b", 0, 5).unwrap();
        assert_eq!(decoded, b"a b");
    }

    #[test]
    fn rejects_truncated_triplet() {
        let dec = Decoder;
        assert!(dec.decode("a%2", 0, 3).is_err());
    }

    #[test]
    fn rejects_non_uric_literal_byte() {
        let dec = Decoder;
        assert!(dec.decode("a\"b", 0, 3).is_err());
    }

    #[test]
    fn literal_examples_decode_utf8_after_encode_utf8_round_trip() {
        let enc = Encoder::uri();
        let dec = Decoder;
        for s in ["hello world", "caf\u{e9}", "100% done", "a/b?c#d"] {
            let encoded = enc.encode_utf8_to_string(s, false).unwrap();
            let decoded = dec.decode_utf8(&encoded, 0, encoded.len()).unwrap();
            assert_eq!(decoded, s);
        }
    }

    #[test]
    fn fast_path_matches_slow_path_for_utf8_without_triplets() {
        let dec = Decoder;
        let s = "no/triplets?here";
        assert_eq!(dec.decode_utf8(s, 0, s.len()).unwrap(), s);
    }

    proptest! {
        /// spec §8 invariant 5: `decodeUtf8(E.encodeUtf8(s)) == s` for any
        /// string and the UTF-8 preset encoder.
        #[test]
        fn property_decode_utf8_after_encode_utf8_round_trips(s in ".*") {
            let enc = Encoder::uri();
            let dec = Decoder;
            let encoded = enc.encode_utf8_to_string(&s, false).unwrap();
            let decoded = dec.decode_utf8(&encoded, 0, encoded.len()).unwrap();
            prop_assert_eq!(decoded, s);
        }

        /// The fast path (no percent triplet, UTF-8) must agree with the
        /// byte-buffer path for arbitrary strings free of `%`.
        #[test]
        fn property_fast_path_matches_slow_path(s in "[^%]*") {
            let dec = Decoder;
            prop_assert_eq!(dec.decode_utf8(&s, 0, s.len()).unwrap(), s);
        }
    }
}
