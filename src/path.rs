//! The path engine: the immutable [`Path`] value, the mutable
//! [`PathBuilder`], `remove_dot_segments`, RFC 3986 §5.2 reference
//! resolution, and §6.2.2 syntax-based normalization.

use crate::classes::{SEGMENT, UNRESERVED};
use crate::encode::{Encoder, Encoding};
use crate::error::UriError;
use crate::hex::{decode_pair, is_hex_digit, upper_hex_digit};
use crate::validate::validate_with_pct;

/// An ordered sequence of path segments plus an `absolute` flag.
///
/// The segment list is never empty: an "empty path" is the single empty
/// segment with `absolute = false`. See spec §3 for the full invariant set.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    absolute: bool,
    segments: Vec<String>,
}

impl Path {
    /// Parses `s` against the `PATH` grammar, then splits on `/`. A leading
    /// `/` sets `absolute = true` and is consumed; the remainder is split
    /// keeping all trailing empty segments.
    pub fn parse(s: &str) -> Result<Path, UriError> {
        validate_with_pct(s, crate::classes::PATH, "path")?;
        Ok(Path::parse_unchecked(s))
    }

    pub(crate) fn parse_unchecked(s: &str) -> Path {
        let absolute = s.starts_with('/');
        let rest = if absolute { &s[1..] } else { s };
        let segments = rest.split('/').map(|seg| seg.to_string()).collect();
        Path { absolute, segments }
    }

    pub(crate) fn from_parts(absolute: bool, segments: Vec<String>) -> Path {
        debug_assert!(!segments.is_empty());
        Path { absolute, segments }
    }

    /// `(absolute ? "/" : "") + segments.join("/")`.
    pub fn value(&self) -> String {
        let mut out = String::new();
        if self.absolute {
            out.push('/');
        }
        out.push_str(&self.segments.join("/"));
        out
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    /// True iff this path serializes to the empty string.
    pub fn is_empty(&self) -> bool {
        !self.absolute && self.segments.len() == 1 && self.segments[0].is_empty()
    }

    /// RFC 3986 §5.2.3 path merge + resolution (spec §4.9).
    pub fn resolve(&self, that: &Path) -> Path {
        if that.absolute {
            return that.normalize();
        }
        let mut merged = self.segments.clone();
        merged.pop();
        merged.extend(that.segments.iter().cloned());
        finish_normalize(self.absolute, merged)
    }

    /// Applies `remove_dot_segments` then syntax-based triplet
    /// normalization (spec §4.8 / RFC 3986 §6.2.2).
    pub fn normalize(&self) -> Path {
        finish_normalize(self.absolute, self.segments.clone())
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.value())
    }
}

fn finish_normalize(absolute: bool, segments: Vec<String>) -> Path {
    let mut out = remove_dot_segments(&segments, absolute);
    for seg in out.iter_mut() {
        *seg = normalize_segment_triplets(seg);
    }
    Path::from_parts(absolute, out)
}

/// RFC 3986 §5.2.4: drops `.` segments, resolves `..` segments against the
/// accumulated output, strips leading `..` on an absolute path, and
/// re-applies the normalize-time syntactic guard (spec §4.8; see
/// [`apply_normalize_guard`], which is a superset of the build-time guard
/// [`apply_syntax_guard`] applied by [`PathBuilder::build`]).
pub fn remove_dot_segments(segments: &[String], absolute: bool) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(segments.len());
    for seg in segments {
        if seg == "." {
            continue;
        } else if seg == ".." {
            match out.last() {
                None => out.push("..".to_string()),
                Some(last) if last == ".." => out.push("..".to_string()),
                Some(_) => {
                    out.pop();
                }
            }
        } else {
            out.push(seg.clone());
        }
    }

    if absolute {
        while out.first().map(|s| s == "..").unwrap_or(false) {
            out.remove(0);
        }
    }

    if out.is_empty() {
        out.push(String::new());
    }

    apply_normalize_guard(absolute, &mut out);
    out
}

/// Uppercases hex digits in every `%XY` triplet and decodes the triplet in
/// place when the decoded byte is an `UNRESERVED` ASCII character (spec
/// §4.8 / RFC 3986 §6.2.2).
pub fn normalize_segment_triplets(seg: &str) -> String {
    let bytes = seg.as_bytes();
    let mut out = String::with_capacity(seg.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && is_hex_digit(bytes[i + 1] as char)
            && is_hex_digit(bytes[i + 2] as char)
        {
            let hi = bytes[i + 1] as char;
            let lo = bytes[i + 2] as char;
            let decoded = decode_pair(hi, lo).expect("checked hex digits above");
            if decoded < 128 && UNRESERVED.matches(decoded as char) {
                out.push(decoded as char);
            } else {
                out.push('%');
                out.push(upper_hex_digit(hi));
                out.push(upper_hex_digit(lo));
            }
            i += 3;
        } else {
            let ch = seg[i..].chars().next().expect("non-empty remainder");
            out.push(ch);
            i += ch.len_utf8();
        }
    }
    out
}

/// Inserts a leading `.` segment when the segment list would otherwise be
/// ambiguous on re-serialization: a non-absolute path whose first two
/// segments are both empty (would read as `//…`), or whose first segment
/// contains `:` (would read as a scheme), per spec §4.7. Used only by
/// [`PathBuilder::build`] — a `Path` built directly from explicit
/// operations has no opinion on whether it will end up attached to an
/// authority, so it does not guard the absolute-plus-empty-first-segment
/// case that [`apply_normalize_guard`] does.
fn apply_syntax_guard(absolute: bool, segments: &mut Vec<String>) {
    let looks_like_authority =
        !absolute && segments.len() >= 2 && segments[0].is_empty() && segments[1].is_empty();
    let looks_like_scheme = !absolute && segments.first().map(|s| s.contains(':')).unwrap_or(false);
    if looks_like_authority || looks_like_scheme {
        segments.insert(0, ".".to_string());
    }
}

/// The normalize-time counterpart of [`apply_syntax_guard`], applied after
/// [`remove_dot_segments`] (spec §4.8). A superset of the build-time guard:
/// it additionally inserts a leading `.` when the result is **absolute**
/// with an empty first segment, which would otherwise round-trip as
/// `"//…"` — indistinguishable from an authority — once the path is
/// serialized on its own. [`crate::uri::Uri::normalize`] strips this guard
/// back out once it knows an authority is actually attached, via
/// `strip_uri_level_guard`'s `"/.//"` check.
fn apply_normalize_guard(absolute: bool, segments: &mut Vec<String>) {
    let looks_like_authority_relative =
        !absolute && segments.len() >= 2 && segments[0].is_empty() && segments[1].is_empty();
    let looks_like_authority_absolute = absolute && segments.first().map(|s| s.is_empty()).unwrap_or(false);
    let looks_like_scheme = !absolute && segments.first().map(|s| s.contains(':')).unwrap_or(false);
    if looks_like_authority_relative || looks_like_authority_absolute || looks_like_scheme {
        segments.insert(0, ".".to_string());
    }
}

fn check_insert_index(index: usize, len: usize) -> Result<(), UriError> {
    if index <= len {
        Ok(())
    } else {
        Err(UriError::Index { index, length: len })
    }
}

fn check_mutate_index(index: usize, len: usize) -> Result<(), UriError> {
    if index < len {
        Ok(())
    } else {
        Err(UriError::Index { index, length: len })
    }
}

fn clamp_count(n: isize, len: usize) -> usize {
    let n = n.max(0) as usize;
    n.min(len)
}

/// Mutable working copy of `{absolute, segments}`. Not safe for concurrent
/// mutation (spec §5). Finalized by [`PathBuilder::build`].
#[derive(Debug, Clone)]
pub struct PathBuilder {
    absolute: bool,
    segments: Vec<String>,
}

/// Delegates to [`PathBuilder::new`] so `PathBuilder::default()` agrees with
/// it: `absolute = true`, zero segments (spec §3/§4.6).
impl Default for PathBuilder {
    fn default() -> PathBuilder {
        PathBuilder::new()
    }
}

impl PathBuilder {
    /// An empty builder: `absolute = true`, zero segments.
    pub fn new() -> PathBuilder {
        PathBuilder {
            absolute: true,
            segments: Vec::new(),
        }
    }

    /// Seeds a builder from an existing [`Path`].
    pub fn from_path(path: &Path) -> PathBuilder {
        PathBuilder {
            absolute: path.absolute,
            segments: path.segments.clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn absolute(&mut self, absolute: bool) -> &mut Self {
        self.absolute = absolute;
        self
    }

    /// Inserts each defined, non-absent segment string at increasing
    /// positions starting at `index`. Validates eagerly against `SEGMENT`;
    /// `build()` validates again regardless (spec §4.7 "deferred
    /// validation").
    pub fn insert_segments(&mut self, index: usize, segs: &[Option<&str>]) -> Result<(), UriError> {
        check_insert_index(index, self.segments.len())?;
        let mut pos = index;
        for seg in segs {
            if let Some(s) = seg {
                validate_with_pct(s, SEGMENT, "path")?;
                self.segments.insert(pos, s.to_string());
                pos += 1;
            }
        }
        Ok(())
    }

    pub fn append_segments(&mut self, segs: &[Option<&str>]) -> Result<(), UriError> {
        self.insert_segments(self.segments.len(), segs)
    }

    /// Byte form: each non-absent segment is percent-encoded with the
    /// `segment` encoder preset before insertion.
    pub fn insert_segments_bytes(&mut self, index: usize, segs: &[Option<&[u8]>]) -> Result<(), UriError> {
        check_insert_index(index, self.segments.len())?;
        let encoder = Encoder::segment();
        let mut pos = index;
        for seg in segs {
            if let Some(bytes) = seg {
                let encoded = encoder.encode_to_string(bytes)?;
                self.segments.insert(pos, encoded);
                pos += 1;
            }
        }
        Ok(())
    }

    pub fn append_segments_bytes(&mut self, segs: &[Option<&[u8]>]) -> Result<(), UriError> {
        self.insert_segments_bytes(self.segments.len(), segs)
    }

    /// Text form: each non-absent segment is text-encoded in `encoding`,
    /// then percent-encoded with the `segment` preset.
    pub fn insert_segments_text(
        &mut self,
        index: usize,
        segs: &[Option<&str>],
        encoding: Encoding,
    ) -> Result<(), UriError> {
        check_insert_index(index, self.segments.len())?;
        let encoder = Encoder::segment();
        let mut pos = index;
        for seg in segs {
            if let Some(s) = seg {
                let mut out = String::new();
                encoder.encode_text(s, encoding, false, &mut out)?;
                self.segments.insert(pos, out);
                pos += 1;
            }
        }
        Ok(())
    }

    pub fn append_segments_text(&mut self, segs: &[Option<&str>], encoding: Encoding) -> Result<(), UriError> {
        self.insert_segments_text(self.segments.len(), segs, encoding)
    }

    /// Overwrites starting at `index`; absent entries are skipped entirely,
    /// consuming neither a write position nor an existing segment. Extra
    /// elements past `size() - index` are appended (spec §4.7 scenario A).
    pub fn set_segments(&mut self, index: usize, segs: &[Option<&str>]) -> Result<(), UriError> {
        check_insert_index(index, self.segments.len())?;
        let mut pos = index;
        for seg in segs {
            if let Some(s) = seg {
                validate_with_pct(s, SEGMENT, "path")?;
                if pos < self.segments.len() {
                    self.segments[pos] = s.to_string();
                } else {
                    self.segments.push(s.to_string());
                }
                pos += 1;
            }
        }
        Ok(())
    }

    /// Splits each given path string on `/` (a leading `/` is not
    /// specially preserved: `"/a/b"` and `"a/b"` both split to `"a","b"`),
    /// drops a trailing empty segment already present in the builder, then
    /// appends the split segments. Absent and empty `p` entries are
    /// ignored.
    pub fn append_paths(&mut self, paths: &[Option<&str>]) -> Result<(), UriError> {
        for p in paths {
            let p = match p {
                Some(p) if !p.is_empty() => *p,
                _ => continue,
            };
            let parts: Vec<&str> = if let Some(stripped) = p.strip_prefix('/') {
                stripped.split('/').collect()
            } else {
                p.split('/').collect()
            };
            if self.segments.last().map(|s| s.is_empty()).unwrap_or(false) {
                self.segments.pop();
            }
            for part in parts {
                validate_with_pct(part, SEGMENT, "path")?;
                self.segments.push(part.to_string());
            }
        }
        Ok(())
    }

    /// Removes the first `min(max(n, 0), size())` segments.
    pub fn strip(&mut self, n: isize) -> &mut Self {
        let n = clamp_count(n, self.segments.len());
        self.segments.drain(0..n);
        self
    }

    /// Removes the last `min(max(n, 0), size())` segments.
    pub fn tear(&mut self, n: isize) -> &mut Self {
        let n = clamp_count(n, self.segments.len());
        let start = self.segments.len() - n;
        self.segments.drain(start..);
        self
    }

    /// Keeps the first `min(max(n, 0), size())` segments.
    pub fn truncate(&mut self, n: isize) -> &mut Self {
        let n = clamp_count(n, self.segments.len());
        self.segments.truncate(n);
        self
    }

    /// Removes all trailing empty segments.
    pub fn trim(&mut self) -> &mut Self {
        while self.segments.last().map(|s| s.is_empty()).unwrap_or(false) {
            self.segments.pop();
        }
        self
    }

    /// Removes all empty segments. When `keep_final_empty` is true and the
    /// last segment was empty, at most one trailing empty segment is kept
    /// (spec §9 open question: "at most one trailing empty segment
    /// remains").
    pub fn prune(&mut self, keep_final_empty: bool) -> &mut Self {
        let keep = keep_final_empty && self.segments.last().map(|s| s.is_empty()).unwrap_or(false);
        self.segments.retain(|s| !s.is_empty());
        if keep {
            self.segments.push(String::new());
        }
        self
    }

    pub fn remove(&mut self, index: usize) -> Result<(), UriError> {
        check_mutate_index(index, self.segments.len())?;
        self.segments.remove(index);
        Ok(())
    }

    pub fn clear(&mut self) -> &mut Self {
        self.segments.clear();
        self
    }

    /// Validates every segment against `SEGMENT`, applies the syntactic
    /// guard of spec §4.7, and returns the immutable, normalized-segment
    /// [`Path`]. Non-mutating: a failed `build()` leaves the builder
    /// unchanged and usable.
    pub fn build(&self) -> Result<Path, UriError> {
        let mut segments = self.segments.clone();
        if segments.is_empty() {
            segments.push(String::new());
        }
        for seg in &segments {
            validate_with_pct(seg, SEGMENT, "path")?;
        }
        apply_syntax_guard(self.absolute, &mut segments);
        Ok(Path::from_parts(self.absolute, segments))
    }
}
