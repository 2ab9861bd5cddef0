//! The immutable [`UriRef`] / [`Uri`] values: parsing, read-side accessors,
//! equality, ordering, RFC 3986 §5.2 resolution and §6.2.2 normalization.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::UriError;
use crate::path::{normalize_segment_triplets, Path};
use crate::raw::RawUri;
use crate::validate;

/// A validated URI-reference: a [`RawUri`] split together with its derived
/// [`Path`]. `scheme` may or may not be present — when it is, the value can
/// be upgraded to a [`Uri`] via [`Uri::try_from`].
#[derive(Debug, Clone)]
pub struct UriRef {
    pub(crate) scheme: Option<String>,
    pub(crate) user_info: Option<String>,
    pub(crate) host: Option<String>,
    pub(crate) port: Option<String>,
    pub(crate) path: Path,
    pub(crate) query: Option<String>,
    pub(crate) fragment: Option<String>,
}

impl UriRef {
    /// Splits, validates, and parses `s` into a `UriRef`.
    pub fn parse(s: &str) -> Result<UriRef, UriError> {
        let raw = RawUri::split(s);
        validate::validate(&raw)?;
        Ok(UriRef {
            scheme: raw.scheme.map(str::to_string),
            user_info: raw.user_info.map(str::to_string),
            host: raw.host.map(str::to_string),
            port: raw.port.map(str::to_string),
            path: Path::parse_unchecked(raw.path),
            query: raw.query.map(str::to_string),
            fragment: raw.fragment.map(str::to_string),
        })
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn user_info(&self) -> Option<&str> {
        self.user_info.as_deref()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<&str> {
        self.port.as_deref()
    }

    /// Parses the port as an unsigned 32-bit integer. Fails with
    /// [`UriError::Overflow`] if the port is absent, empty, or doesn't fit;
    /// the port string itself remains reachable via [`UriRef::port`].
    pub fn port_as_int(&self) -> Result<u32, UriError> {
        match &self.port {
            Some(p) if !p.is_empty() => p.parse::<u32>().map_err(|_| UriError::Overflow { port: p.clone() }),
            Some(p) => Err(UriError::Overflow { port: p.clone() }),
            None => Err(UriError::Overflow { port: String::new() }),
        }
    }

    /// `true` iff `host` is defined (the authority component is present).
    pub fn has_authority(&self) -> bool {
        self.host.is_some()
    }

    /// Recomposed `userinfo@host:port` string, or `None` if there is no
    /// authority.
    pub fn authority(&self) -> Option<String> {
        let host = self.host.as_ref()?;
        let mut out = String::new();
        if let Some(ui) = &self.user_info {
            out.push_str(ui);
            out.push('@');
        }
        out.push_str(host);
        if let Some(port) = &self.port {
            out.push(':');
            out.push_str(port);
        }
        Some(out)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub fn is_absolute_path(&self) -> bool {
        self.path.is_absolute()
    }
}

impl fmt::Display for UriRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(scheme) = &self.scheme {
            f.write_str(scheme)?;
            f.write_str(":")?;
        }
        if let Some(host) = &self.host {
            f.write_str("//")?;
            if let Some(ui) = &self.user_info {
                f.write_str(ui)?;
                f.write_str("@")?;
            }
            f.write_str(host)?;
            if let Some(port) = &self.port {
                f.write_str(":")?;
                f.write_str(port)?;
            }
        }
        f.write_str(&self.path.value())?;
        if let Some(query) = &self.query {
            f.write_str("?")?;
            f.write_str(query)?;
        }
        if let Some(fragment) = &self.fragment {
            f.write_str("#")?;
            f.write_str(fragment)?;
        }
        Ok(())
    }
}

/// Equality over two `UriRef`s: `host` is ASCII case-insensitive, every
/// other component (including `scheme`) is byte-wise. Absent never equals
/// defined, so a `Uri` (scheme present) is never equal to a bare `UriRef`
/// (scheme absent) — the mismatched `scheme` field already guarantees that.
impl PartialEq for UriRef {
    fn eq(&self, other: &UriRef) -> bool {
        self.scheme == other.scheme
            && self.user_info == other.user_info
            && host_eq(self.host.as_deref(), other.host.as_deref())
            && self.port == other.port
            && self.path == other.path
            && self.query == other.query
            && self.fragment == other.fragment
    }
}

impl Eq for UriRef {}

fn host_eq(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    }
}

/// A [`UriRef`] whose `scheme` is defined and non-empty.
#[derive(Debug, Clone)]
pub struct Uri(UriRef);

impl std::convert::TryFrom<UriRef> for Uri {
    type Error = UriError;

    fn try_from(uri_ref: UriRef) -> Result<Uri, UriError> {
        match &uri_ref.scheme {
            Some(s) if !s.is_empty() => Ok(Uri(uri_ref)),
            _ => Err(UriError::Argument {
                message: "a Uri requires a non-empty scheme".into(),
            }),
        }
    }
}

impl std::ops::Deref for Uri {
    type Target = UriRef;

    fn deref(&self) -> &UriRef {
        &self.0
    }
}

impl Uri {
    /// Parses `s`, requiring a scheme. Fails with [`UriError::Argument`] if
    /// the parsed reference has no scheme.
    pub fn parse(s: &str) -> Result<Uri, UriError> {
        use std::convert::TryFrom;
        Uri::try_from(UriRef::parse(s)?)
    }

    pub fn as_uri_ref(&self) -> &UriRef {
        &self.0
    }

    pub fn into_uri_ref(self) -> UriRef {
        self.0
    }

    pub fn scheme(&self) -> &str {
        self.0.scheme.as_deref().expect("Uri invariant: scheme present")
    }

    /// RFC 3986 §5.2.2 reference resolution. `strict` defaults to `true`
    /// in callers that don't need the backwards-compatible same-scheme
    /// relaxation of §5.2.1.
    pub fn resolve(&self, r: &UriRef, strict: bool) -> Uri {
        let treat_scheme_as_undefined = !strict
            && r.scheme
                .as_deref()
                .map(|rs| rs.eq_ignore_ascii_case(self.scheme()))
                .unwrap_or(false);
        let effective_scheme = if treat_scheme_as_undefined {
            None
        } else {
            r.scheme.as_deref()
        };

        let (t_scheme, t_user_info, t_host, t_port, t_path, t_query);

        if let Some(rs) = effective_scheme {
            t_scheme = rs.to_string();
            t_user_info = r.user_info.clone();
            t_host = r.host.clone();
            t_port = r.port.clone();
            t_path = r.path.normalize();
            t_query = r.query.clone();
        } else if r.host.is_some() {
            t_scheme = self.scheme().to_string();
            t_user_info = r.user_info.clone();
            t_host = r.host.clone();
            t_port = r.port.clone();
            t_path = r.path.normalize();
            t_query = r.query.clone();
        } else if r.path.is_empty() {
            t_scheme = self.scheme().to_string();
            t_user_info = self.0.user_info.clone();
            t_host = self.0.host.clone();
            t_port = self.0.port.clone();
            t_path = self.0.path.clone();
            t_query = r.query.clone().or_else(|| self.0.query.clone());
        } else if r.path.is_absolute() {
            t_scheme = self.scheme().to_string();
            t_user_info = self.0.user_info.clone();
            t_host = self.0.host.clone();
            t_port = self.0.port.clone();
            t_path = r.path.normalize();
            t_query = r.query.clone();
        } else {
            t_scheme = self.scheme().to_string();
            t_user_info = self.0.user_info.clone();
            t_host = self.0.host.clone();
            t_port = self.0.port.clone();
            t_path = merge_paths(self.0.host.is_some(), &self.0.path, &r.path);
            t_query = r.query.clone();
        }

        let uri_ref = UriRef {
            scheme: Some(t_scheme),
            user_info: t_user_info,
            host: t_host,
            port: t_port,
            path: t_path,
            query: t_query,
            fragment: r.fragment.clone(),
        };

        use std::convert::TryFrom;
        Uri::try_from(uri_ref).expect("resolved scheme always defined").normalize()
    }

    /// Syntax-based normalization only (spec §4.11): lowercases `scheme`
    /// and `host`, uppercases percent-encoding hex digits and decodes
    /// unreserved triplets everywhere, drops an empty-but-defined `port`,
    /// and normalizes `path`, stripping a `.` guard segment that is no
    /// longer needed once reattached to scheme/authority.
    pub fn normalize(&self) -> Uri {
        let scheme = self.scheme().to_ascii_lowercase();
        let host = self
            .0
            .host
            .as_ref()
            .map(|h| normalize_segment_triplets(&h.to_ascii_lowercase()));
        let user_info = self.0.user_info.as_deref().map(normalize_segment_triplets);
        let query = self.0.query.as_deref().map(normalize_segment_triplets);
        let fragment = self.0.fragment.as_deref().map(normalize_segment_triplets);
        let port = match &self.0.port {
            Some(p) if p.is_empty() => None,
            other => other.clone(),
        };
        let path = strip_uri_level_guard(self.0.path.normalize(), host.is_some());

        Uri(UriRef {
            scheme: Some(scheme),
            user_info,
            host,
            port,
            path,
            query,
            fragment,
        })
    }
}

fn merge_paths(base_has_authority: bool, base_path: &Path, ref_path: &Path) -> Path {
    if base_has_authority && base_path.is_empty() {
        let mut segs = ref_path.segments().to_vec();
        if segs.is_empty() {
            segs.push(String::new());
        }
        Path::from_parts(true, segs).normalize()
    } else {
        base_path.resolve(ref_path)
    }
}

fn strip_uri_level_guard(path: Path, authority_present: bool) -> Path {
    let value = path.value();
    if authority_present && value.starts_with("/.//") {
        let segs = path.segments()[1..].to_vec();
        Path::from_parts(true, segs)
    } else if !path.is_absolute() && value.starts_with("./") {
        let mut segs = path.segments()[1..].to_vec();
        if segs.is_empty() {
            segs.push(String::new());
        }
        Path::from_parts(false, segs)
    } else {
        path
    }
}

/// Equality over two `Uri`s: `scheme` and `host` are ASCII case-insensitive;
/// everything else is byte-wise.
impl PartialEq for Uri {
    fn eq(&self, other: &Uri) -> bool {
        self.scheme().eq_ignore_ascii_case(other.scheme())
            && self.0.user_info == other.0.user_info
            && host_eq(self.0.host.as_deref(), other.0.host.as_deref())
            && self.0.port == other.0.port
            && self.0.path == other.0.path
            && self.0.query == other.0.query
            && self.0.fragment == other.0.fragment
    }
}

impl Eq for Uri {}

impl Hash for Uri {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.scheme().to_ascii_lowercase().hash(state);
        self.0.host.as_ref().map(|h| h.to_ascii_lowercase()).hash(state);
        self.0.user_info.hash(state);
        self.0.port.hash(state);
        self.0.path.value().hash(state);
        self.0.query.hash(state);
        self.0.fragment.hash(state);
    }
}

impl PartialOrd for Uri {
    fn partial_cmp(&self, other: &Uri) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uri {
    fn cmp(&self, other: &Uri) -> Ordering {
        self.scheme()
            .to_ascii_lowercase()
            .cmp(&other.scheme().to_ascii_lowercase())
            .then_with(|| compare_nulls_first_ci(self.0.host.as_deref(), other.0.host.as_deref()))
            .then_with(|| compare_ports(self.0.port.as_deref(), other.0.port.as_deref()))
            .then_with(|| compare_nulls_first(self.0.user_info.as_deref(), other.0.user_info.as_deref()))
            .then_with(|| self.0.path.value().cmp(&other.0.path.value()))
            .then_with(|| compare_nulls_first(self.0.query.as_deref(), other.0.query.as_deref()))
            .then_with(|| compare_nulls_first(self.0.fragment.as_deref(), other.0.fragment.as_deref()))
    }
}

fn compare_nulls_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.cmp(b),
    }
}

fn compare_nulls_first_ci(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()),
    }
}

/// Port ordering: a defined-but-empty port sorts before any non-empty one;
/// between two non-empty ports, compares as unsigned decimal integers of
/// arbitrary width (a leading-zero-stripped digit-string compare, which
/// avoids pulling in a bignum dependency for the 32-bit-overflow case — see
/// DESIGN.md).
fn compare_ports(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a.is_empty(), b.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => compare_decimal_strings(a, b),
        },
    }
}

fn compare_decimal_strings(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    let a = if a.is_empty() { "0" } else { a };
    let b = if b.is_empty() { "0" } else { b };
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::builder::UriBuilder;
    use proptest::prelude::*;

    fn scheme_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("http".to_string()),
            Just("HTTP".to_string()),
            Just("ftp".to_string()),
            Just("a".to_string()),
        ]
    }

    fn host_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("example.com".to_string()),
            Just("EXAMPLE.COM".to_string()),
            Just("a".to_string()),
            Just("host-1".to_string()),
        ]
    }

    fn segment_strategy() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("a".to_string()),
            Just("b".to_string()),
            Just("..".to_string()),
            Just(".".to_string()),
        ]
    }

    fn build_uri(scheme: &str, host: &str, segs: &[String], query: Option<&str>, fragment: Option<&str>) -> Uri {
        let mut b = UriBuilder::new();
        b.scheme(Some(scheme)).host(Some(host)).query(query).fragment(fragment);
        for s in segs {
            b.path().append_segments(&[Some(s.as_str())]).unwrap();
        }
        b.build_uri().unwrap()
    }

    proptest! {
        /// spec §8 invariant 2: `Uri::normalize()` is idempotent.
        #[test]
        fn property_normalize_is_idempotent(
            scheme in scheme_strategy(),
            host in host_strategy(),
            segs in prop::collection::vec(segment_strategy(), 0..5),
            query in proptest::option::of("[a-z]{0,4}"),
            fragment in proptest::option::of("[a-z]{0,4}"),
        ) {
            let uri = build_uri(&scheme, &host, &segs, query.as_deref(), fragment.as_deref());
            let once = uri.normalize();
            let twice = once.normalize();
            prop_assert_eq!(once.to_string(), twice.to_string());
        }

        /// spec §8 invariant 3: `B.resolve(R, strict=true).fragment() == R.fragment()`.
        #[test]
        fn property_resolve_fragment_always_comes_from_reference(
            scheme in scheme_strategy(),
            host in host_strategy(),
            base_segs in prop::collection::vec(segment_strategy(), 0..5),
            ref_segs in prop::collection::vec(segment_strategy(), 0..5),
            ref_absolute in any::<bool>(),
            base_fragment in proptest::option::of("[a-z]{0,4}"),
            ref_fragment in proptest::option::of("[a-z]{0,4}"),
        ) {
            let base = build_uri(&scheme, &host, &base_segs, None, base_fragment.as_deref());

            let mut rb = UriBuilder::new();
            rb.path().absolute(ref_absolute);
            for s in &ref_segs {
                rb.path().append_segments(&[Some(s.as_str())]).unwrap();
            }
            rb.fragment(ref_fragment.as_deref());
            let r = rb.build().unwrap();

            let resolved = base.resolve(&r, true);
            prop_assert_eq!(resolved.fragment().map(str::to_string), ref_fragment);
        }

        /// spec §8 invariant 9: `A.equals(B)` implies equal hashes and a
        /// zero `compareTo`.
        #[test]
        fn property_equal_uris_have_equal_hash_and_zero_compare(
            scheme in scheme_strategy(),
            host in host_strategy(),
            segs in prop::collection::vec(segment_strategy(), 0..5),
            query in proptest::option::of("[a-z]{0,4}"),
            fragment in proptest::option::of("[a-z]{0,4}"),
        ) {
            let a = build_uri(&scheme, &host, &segs, query.as_deref(), fragment.as_deref());
            let b = build_uri(&scheme.to_ascii_uppercase(), &host.to_ascii_uppercase(), &segs, query.as_deref(), fragment.as_deref());
            let a = a.normalize();
            let b = b.normalize();
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.cmp(&b), Ordering::Equal);

            use std::collections::hash_map::DefaultHasher;
            let mut h1 = DefaultHasher::new();
            a.hash(&mut h1);
            let mut h2 = DefaultHasher::new();
            b.hash(&mut h2);
            prop_assert_eq!(h1.finish(), h2.finish());
        }
    }

    #[test]
    fn scheme_presence_decides_uri_ref_vs_uri() {
        assert!(Uri::parse("relative/path").is_err());
        assert!(Uri::parse("http://example.com").is_ok());
    }

    #[test]
    fn uri_ref_vs_uri_never_equal() {
        let rel = UriRef::parse("//example.com/a").unwrap();
        let abs = UriRef::parse("http://example.com/a").unwrap();
        assert_ne!(rel, abs);
    }

    #[test]
    fn scenario_f_ipv6_host() {
        assert!(Uri::parse("http://[2001:db8::1]:8080/").is_ok());
        assert!(Uri::parse("http://[2001:db8:::1]/").is_err());
    }

    #[test]
    fn scenario_d_syntax_normalization() {
        let u = Uri::parse("HTTP://EXAMPLE.com/%7efoo/./bar/../baz").unwrap();
        assert_eq!(u.normalize().to_string(), "http://example.com/~foo/baz");
    }

    #[test]
    fn scenario_b_dot_segment_removal() {
        let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
        let r = UriRef::parse("../../../g").unwrap();
        let resolved = base.resolve(&r, true);
        assert_eq!(resolved.to_string(), "http://a/g");
    }

    #[test]
    fn scenario_c_merge() {
        let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
        let r = UriRef::parse("g;x=1/../y").unwrap();
        let resolved = base.resolve(&r, true);
        assert_eq!(resolved.to_string(), "http://a/b/c/y");
    }

    #[test]
    fn resolve_fragment_always_comes_from_reference() {
        let base = Uri::parse("http://a/b/c/d;p?q#basefrag").unwrap();
        let r = UriRef::parse("?y#reffrag").unwrap();
        let resolved = base.resolve(&r, true);
        assert_eq!(resolved.fragment(), Some("reffrag"));
    }

    #[test]
    fn empty_reference_keeps_base_query_if_reference_has_none() {
        let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
        let r = UriRef::parse("").unwrap();
        let resolved = base.resolve(&r, true);
        assert_eq!(resolved.to_string(), "http://a/b/c/d;p?q");
    }

    #[test]
    fn normalize_is_idempotent() {
        let u = Uri::parse("HTTP://Example.com/a/../b").unwrap();
        let once = u.normalize();
        let twice = once.normalize();
        assert_eq!(once.to_string(), twice.to_string());
    }

    #[test]
    fn normalize_strips_path_guard_once_authority_is_attached() {
        // The path engine guards "//b" unconditionally (see path.rs); at
        // the Uri level, an attached authority removes the ambiguity and
        // the "." guard segment is stripped back out.
        let u = Uri::parse("http://example.com//b").unwrap();
        assert_eq!(u.normalize().to_string(), "http://example.com//b");
    }

    #[test]
    fn equal_uris_have_equal_hash_and_zero_compare() {
        let a = Uri::parse("HTTP://EXAMPLE.com/x").unwrap().normalize();
        let b = Uri::parse("http://example.com/x").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.cmp(&b), Ordering::Equal);

        use std::collections::hash_map::DefaultHasher;
        let mut h1 = DefaultHasher::new();
        a.hash(&mut h1);
        let mut h2 = DefaultHasher::new();
        b.hash(&mut h2);
        assert_eq!(h1.finish(), h2.finish());
    }

    #[test]
    fn port_overflow_is_catchable_and_port_string_remains() {
        let u = Uri::parse("http://host:99999999999999999999/").unwrap();
        assert!(u.port_as_int().is_err());
        assert_eq!(u.port(), Some("99999999999999999999"));
    }

    #[test]
    fn port_ordering_defined_empty_before_nonempty() {
        let a = Uri::parse("http://host:/").unwrap();
        let b = Uri::parse("http://host:80/").unwrap();
        assert_eq!(a.cmp(&b), Ordering::Less);
    }

    #[test]
    fn non_strict_resolve_treats_same_scheme_reference_as_relative() {
        let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
        let r = UriRef::parse("http:g").unwrap();
        let resolved = base.resolve(&r, false);
        assert_eq!(resolved.to_string(), "http://a/b/c/g");
    }

    /// Not spec §8 invariant 1 (see `parse_then_display_is_lossless_even_when_not_normalized`
    /// below for that) — this checks `normalize()`'s own round trip instead
    /// of plain `parse`: applying it to an already-normalized string is a
    /// no-op, and applying it to a non-normalized one changes the string.
    #[test]
    fn normalize_only_equals_input_when_already_normalized() {
        let normalized = "http://example.com/a/b?q#f";
        let u = Uri::parse(normalized).unwrap();
        assert_eq!(u.normalize().to_string(), normalized);

        let not_normalized = "HTTP://example.com/a/./b?q#f";
        let u = Uri::parse(not_normalized).unwrap();
        assert_ne!(u.normalize().to_string(), not_normalized);
    }

    /// spec §8 invariant 1, read literally, is: `parse(s).toString() == s`
    /// iff `s` is already syntax-normalized. This crate's `parse` is a pure
    /// split-then-validate pass (spec §4.2/§4.3 `RawUri`/`Validator`): it
    /// never rewrites a component, so `UriRef::parse(s).to_string() == s`
    /// holds for *every* valid `s`, normalized or not — normalization is a
    /// distinct, explicit step (`Uri::normalize`), never applied implicitly
    /// by `parse`. That makes the literal "iff" false in the not-normalized
    /// direction; this is an intentional consequence of keeping `parse`
    /// lossless rather than a bug, matching the value-type read-side API of
    /// spec §3/§6 (see DESIGN.md's Open Question entry). This test exercises
    /// that actual, intentional behavior directly, since nothing previously
    /// did.
    #[test]
    fn parse_then_display_is_lossless_even_when_not_normalized() {
        let not_normalized = "HTTP://EXAMPLE.com/%7efoo/./bar/../baz";
        let parsed = UriRef::parse(not_normalized).unwrap();
        assert_eq!(parsed.to_string(), not_normalized);

        // Confirm `not_normalized` really is not normalized, so the above
        // round trip is the "normalized == false, round-trips == true" case
        // that falsifies a literal reading of the iff.
        let uri = Uri::parse(not_normalized).unwrap();
        assert_ne!(uri.normalize().to_string(), not_normalized);
    }

    proptest! {
        /// Property form of the above: for arbitrary scheme/host casing and
        /// dot-segments, plain `parse` round-trips losslessly regardless of
        /// whether the input happens to already be normalized.
        #[test]
        fn property_parse_then_display_is_always_lossless(
            scheme in scheme_strategy(),
            host in host_strategy(),
            segs in prop::collection::vec(segment_strategy(), 0..5),
        ) {
            let mut s = format!("{}://{}", scheme, host);
            for seg in &segs {
                s.push('/');
                s.push_str(seg);
            }
            let parsed = UriRef::parse(&s).unwrap();
            prop_assert_eq!(parsed.to_string(), s);
        }
    }

    #[test]
    fn strict_resolve_keeps_reference_scheme_as_absolute() {
        let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
        let r = UriRef::parse("http:g").unwrap();
        let resolved = base.resolve(&r, true);
        assert_eq!(resolved.to_string(), "http:g");
    }
}
