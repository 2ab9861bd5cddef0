//! Percent-encoding engine: byte-mode and text-mode encoding into a
//! caller-supplied sink, plus "mixed" mode that preserves existing
//! percent-encoding triplets instead of re-encoding their `%`.

use std::fmt::Write;

use crate::classes::{REG_NAME, URIC, UNRESERVED};
use crate::error::UriError;
use crate::hex::{byte_to_upper_hex, is_hex_digit, upper_hex_digit};
use crate::mask::AsciiMask;

/// The text encoding used by [`Encoder::encode_text`] / the symmetric
/// decoder. See spec.md §4.4 ("a selected character encoding") and
/// SPEC_FULL.md §3 for why these two are the concrete choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Native, lossless. Malformed byte sequences decode to `U+FFFD`.
    Utf8,
    /// ISO-8859-1: one byte per code point `U+0000..=U+00FF`; code points
    /// above that range encode as the byte `0x3F` (`?`).
    Latin1,
}

impl Encoding {
    fn encode(self, s: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => s.as_bytes().to_vec(),
            Encoding::Latin1 => s
                .chars()
                .map(|ch| {
                    let cp = ch as u32;
                    if cp <= 0xFF {
                        cp as u8
                    } else {
                        b'?'
                    }
                })
                .collect(),
        }
    }

    fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
            Encoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
        }
    }
}

/// A percent-encoding configuration: characters in `pass_through` are
/// emitted literally, everything else becomes a `%HH` triplet with
/// uppercase hex. `pass_through` must be a subset of [`URIC`].
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    pass_through: AsciiMask,
}

impl Encoder {
    /// Builds a custom encoder. Fails with [`UriError::Argument`] if
    /// `pass_through` contains a character outside [`URIC`].
    pub fn new(pass_through: AsciiMask) -> Result<Encoder, UriError> {
        if !URIC.contains(pass_through) {
            return Err(UriError::Argument {
                message: "encoder mask must be a subset of URIC".into(),
            });
        }
        Ok(Encoder { pass_through })
    }

    /// `UNRESERVED` only.
    pub fn data() -> Encoder {
        Encoder {
            pass_through: UNRESERVED,
        }
    }

    pub fn user_info() -> Encoder {
        Encoder {
            pass_through: crate::classes::USERINFO,
        }
    }

    pub fn host() -> Encoder {
        Encoder {
            pass_through: REG_NAME,
        }
    }

    pub fn path() -> Encoder {
        Encoder {
            pass_through: crate::classes::PATH,
        }
    }

    pub fn segment() -> Encoder {
        Encoder {
            pass_through: crate::classes::SEGMENT,
        }
    }

    pub fn query() -> Encoder {
        Encoder {
            pass_through: crate::classes::QUERY,
        }
    }

    pub fn fragment() -> Encoder {
        Encoder {
            pass_through: crate::classes::FRAGMENT,
        }
    }

    /// All of `URIC`.
    pub fn uri() -> Encoder {
        Encoder { pass_through: URIC }
    }

    /// `UNRESERVED ∪ chars`, provided `chars ⊆ URIC`.
    pub fn extra(chars: AsciiMask) -> Result<Encoder, UriError> {
        Encoder::new(AsciiMask::union(&[UNRESERVED, chars]))
    }

    /// Encodes raw bytes, writing the result into `sink`.
    pub fn encode<W: Write>(&self, bytes: &[u8], sink: &mut W) -> Result<(), UriError> {
        for &b in bytes {
            if b < 128 && self.pass_through.matches(b as char) {
                sink.write_char(b as char)?;
            } else {
                let [hi, lo] = byte_to_upper_hex(b);
                sink.write_char('%')?;
                sink.write_char(hi as char)?;
                sink.write_char(lo as char)?;
            }
        }
        Ok(())
    }

    /// Encodes `str` to bytes with `encoding`, then percent-encodes those
    /// bytes. When `mixed` is true, percent-encoding triplets already
    /// present in `str` are preserved verbatim (with hex digits
    /// uppercased) instead of being re-encoded through the text encoder.
    pub fn encode_text<W: Write>(
        &self,
        s: &str,
        encoding: Encoding,
        mixed: bool,
        sink: &mut W,
    ) -> Result<(), UriError> {
        if !mixed {
            let bytes = encoding.encode(s);
            return self.encode(&bytes, sink);
        }

        let chars: Vec<char> = s.chars().collect();
        let mut i = 0;
        let mut literal_run = String::new();
        while i < chars.len() {
            if chars[i] == '%'
                && i + 2 < chars.len()
                && is_hex_digit(chars[i + 1])
                && is_hex_digit(chars[i + 2])
            {
                if !literal_run.is_empty() {
                    let bytes = encoding.encode(&literal_run);
                    self.encode(&bytes, sink)?;
                    literal_run.clear();
                }
                sink.write_char('%')?;
                sink.write_char(upper_hex_digit(chars[i + 1]))?;
                sink.write_char(upper_hex_digit(chars[i + 2]))?;
                i += 3;
            } else {
                literal_run.push(chars[i]);
                i += 1;
            }
        }
        if !literal_run.is_empty() {
            let bytes = encoding.encode(&literal_run);
            self.encode(&bytes, sink)?;
        }
        Ok(())
    }

    /// Equivalent to `encode_text(s, Encoding::Utf8, mixed, sink)`.
    pub fn encode_utf8<W: Write>(&self, s: &str, mixed: bool, sink: &mut W) -> Result<(), UriError> {
        self.encode_text(s, Encoding::Utf8, mixed, sink)
    }

    /// Convenience wrapper that returns an owned `String` instead of
    /// writing into a caller-supplied sink.
    pub fn encode_to_string(&self, bytes: &[u8]) -> Result<String, UriError> {
        let mut out = String::new();
        self.encode(bytes, &mut out)?;
        Ok(out)
    }

    pub fn encode_utf8_to_string(&self, s: &str, mixed: bool) -> Result<String, UriError> {
        let mut out = String::new();
        self.encode_utf8(s, mixed, &mut out)?;
        Ok(out)
    }
}
