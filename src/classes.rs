//! Named RFC 3986 character classes, built once as process-wide constant
//! [`AsciiMask`] tables and shared freely (see spec §9 "Global state").

use crate::mask::AsciiMask;

pub const ALPHA: AsciiMask = AsciiMask::from_range(b'A', b'Z').or(AsciiMask::from_range(b'a', b'z'));
pub const DIGIT: AsciiMask = AsciiMask::from_range(b'0', b'9');
pub const HEXDIG: AsciiMask = DIGIT
    .or(AsciiMask::from_range(b'A', b'F'))
    .or(AsciiMask::from_range(b'a', b'f'));

const UNRESERVED_EXTRA: AsciiMask = AsciiMask::from_range(b'-', b'-')
    .or(AsciiMask::from_range(b'.', b'.'))
    .or(AsciiMask::from_range(b'_', b'_'))
    .or(AsciiMask::from_range(b'~', b'~'));

pub const UNRESERVED: AsciiMask = ALPHA.or(DIGIT).or(UNRESERVED_EXTRA);

/// `"!" / "$" / "&" / "'" / "(" / ")" / "*" / "+" / "," / ";" / "="`
pub const SUB_DELIMS: AsciiMask = AsciiMask::from_range(b'!', b'!')
    .or(AsciiMask::from_range(b'$', b'$'))
    .or(AsciiMask::from_range(b'&', b'&'))
    .or(AsciiMask::from_range(b'\'', b'\''))
    .or(AsciiMask::from_range(b'(', b')'))
    .or(AsciiMask::from_range(b'*', b'*'))
    .or(AsciiMask::from_range(b'+', b'+'))
    .or(AsciiMask::from_range(b',', b','))
    .or(AsciiMask::from_range(b';', b';'))
    .or(AsciiMask::from_range(b'=', b'='));

/// `":" / "/" / "?" / "#" / "[" / "]" / "@"`
pub const GEN_DELIMS: AsciiMask = AsciiMask::from_range(b':', b':')
    .or(AsciiMask::from_range(b'/', b'/'))
    .or(AsciiMask::from_range(b'?', b'?'))
    .or(AsciiMask::from_range(b'#', b'#'))
    .or(AsciiMask::from_range(b'[', b'['))
    .or(AsciiMask::from_range(b']', b']'))
    .or(AsciiMask::from_range(b'@', b'@'));

pub const RESERVED: AsciiMask = GEN_DELIMS.or(SUB_DELIMS);

/// `unreserved / gen-delims / sub-delims` — used by the decoder to decide
/// which bytes may be emitted literally rather than percent-encoded.
pub const URIC: AsciiMask = UNRESERVED.or(RESERVED);

/// `pchar = unreserved / sub-delims / ":" / "@"` (percent-encoding handled
/// separately by the validator/decoder).
pub const PCHAR: AsciiMask = UNRESERVED
    .or(SUB_DELIMS)
    .or(AsciiMask::from_range(b':', b':'))
    .or(AsciiMask::from_range(b'@', b'@'));

pub const SEGMENT: AsciiMask = PCHAR;

/// `pchar` without `":"` — used for the first segment of a relative-path
/// reference's first segment in some grammars; kept for completeness.
pub const SEGMENT_NC: AsciiMask = UNRESERVED
    .or(SUB_DELIMS)
    .or(AsciiMask::from_range(b'@', b'@'));

pub const SCHEME_FIRST: AsciiMask = ALPHA;
pub const SCHEME_TAIL: AsciiMask = ALPHA
    .or(DIGIT)
    .or(AsciiMask::from_range(b'+', b'+'))
    .or(AsciiMask::from_range(b'-', b'-'))
    .or(AsciiMask::from_range(b'.', b'.'));

/// `userinfo = *( unreserved / pct-encoded / sub-delims / ":" )`
pub const USERINFO: AsciiMask = UNRESERVED.or(SUB_DELIMS).or(AsciiMask::from_range(b':', b':'));

/// `reg-name = *( unreserved / pct-encoded / sub-delims )`
pub const REG_NAME: AsciiMask = UNRESERVED.or(SUB_DELIMS);

pub const PORT: AsciiMask = DIGIT;

pub const PATH: AsciiMask = PCHAR.or(AsciiMask::from_range(b'/', b'/'));

pub const QUERY: AsciiMask = PCHAR
    .or(AsciiMask::from_range(b'/', b'/'))
    .or(AsciiMask::from_range(b'?', b'?'));

pub const FRAGMENT: AsciiMask = QUERY;

/// `IPv6address` interior characters: `HEXDIG / ":" / "."`.
pub const IPV6_ADDRESS_MASK: AsciiMask = HEXDIG
    .or(AsciiMask::from_range(b':', b':'))
    .or(AsciiMask::from_range(b'.', b'.'));

/// `IPvFuture` interior characters after the version digits and `"."`:
/// `unreserved / sub-delims / ":"`.
pub const IPV_FUTURE_MASK: AsciiMask = UNRESERVED.or(SUB_DELIMS).or(AsciiMask::from_range(b':', b':'));
