//! Per-component grammar validation plus the cross-component correlation
//! rules of RFC 3986 §3 / §4.2 (spec §4.3).

use crate::classes::*;
use crate::error::UriError;
use crate::mask::AsciiMask;
use crate::raw::RawUri;

/// Validates every field of `raw`, in place, returning the same fields
/// wrapped in `Ok(())`, or the first [`UriError`] encountered.
pub fn validate(raw: &RawUri) -> Result<(), UriError> {
    if let Some(scheme) = raw.scheme {
        validate_scheme(scheme)?;
    }
    if let Some(user_info) = raw.user_info {
        validate_with_pct(user_info, USERINFO, "userInfo")?;
    }
    if let Some(host) = raw.host {
        validate_host(host)?;
    }
    if let Some(port) = raw.port {
        validate_mask_only(port, PORT, "port")?;
    }
    validate_with_pct(raw.path, PATH, "path")?;
    if let Some(query) = raw.query {
        validate_with_pct(query, QUERY, "query")?;
    }
    if let Some(fragment) = raw.fragment {
        validate_with_pct(fragment, FRAGMENT, "fragment")?;
    }

    validate_correlations(raw)
}

fn validate_scheme(scheme: &str) -> Result<(), UriError> {
    let mut chars = scheme.char_indices();
    match chars.next() {
        Some((_, first)) if SCHEME_FIRST.matches(first) => {}
        _ => return Err(UriError::syntax("scheme", 0, scheme)),
    }
    for (i, ch) in chars {
        if !SCHEME_TAIL.matches(ch) {
            return Err(UriError::syntax("scheme", i, scheme));
        }
    }
    Ok(())
}

/// Validates a component that allows percent-encoding: every character must
/// either be in `mask` or begin a `%HH` triplet.
pub fn validate_with_pct(s: &str, mask: AsciiMask, component: &'static str) -> Result<(), UriError> {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let ch = s[i..].chars().next().unwrap();
        if ch == '%' {
            let hi = bytes.get(i + 1).map(|&b| b as char);
            let lo = bytes.get(i + 2).map(|&b| b as char);
            match (hi, lo) {
                (Some(hi), Some(lo)) if crate::hex::is_hex_digit(hi) && crate::hex::is_hex_digit(lo) => {
                    i += 3;
                }
                _ => return Err(UriError::syntax(component, i, s)),
            }
        } else if mask.matches(ch) {
            i += ch.len_utf8();
        } else {
            return Err(UriError::syntax(component, i, s));
        }
    }
    Ok(())
}

/// Validates a component that does not allow percent-encoding (port).
fn validate_mask_only(s: &str, mask: AsciiMask, component: &'static str) -> Result<(), UriError> {
    for (i, ch) in s.char_indices() {
        if !mask.matches(ch) {
            return Err(UriError::syntax(component, i, s));
        }
    }
    Ok(())
}

fn validate_host(host: &str) -> Result<(), UriError> {
    if host.len() >= 2 && host.starts_with('[') && host.ends_with(']') {
        let inner = &host[1..host.len() - 1];
        if inner.starts_with('v') {
            return validate_ip_future(inner, host);
        }
        for (i, ch) in inner.char_indices() {
            if !IPV6_ADDRESS_MASK.matches(ch) {
                return Err(UriError::syntax("host", i + 1, host));
            }
        }
        if !is_valid_ipv6(inner) {
            return Err(UriError::syntax("host", 1, host));
        }
        return Ok(());
    }
    validate_with_pct(host, REG_NAME, "host")
}

fn validate_ip_future(inner: &str, host: &str) -> Result<(), UriError> {
    if is_valid_ip_future(inner) {
        Ok(())
    } else {
        Err(UriError::syntax("host", 1, host))
    }
}

fn is_valid_ip_future(inner: &str) -> bool {
    let rest = match inner.strip_prefix('v') {
        Some(r) => r,
        None => return false,
    };
    let dot = match rest.find('.') {
        Some(p) => p,
        None => return false,
    };
    let version = &rest[..dot];
    let tail = &rest[dot + 1..];
    !version.is_empty()
        && version.chars().all(|c| HEXDIG.matches(c))
        && !tail.is_empty()
        && tail.chars().all(|c| IPV_FUTURE_MASK.matches(c))
}

fn is_h16(s: &str) -> bool {
    !s.is_empty() && s.len() <= 4 && s.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_dec_octet(s: &str) -> bool {
    if s.is_empty() || s.len() > 3 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    if s.len() > 1 && s.starts_with('0') {
        return false;
    }
    matches!(s.parse::<u16>(), Ok(v) if v <= 255)
}

fn is_ipv4(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 4 && parts.iter().all(|p| is_dec_octet(p))
}

fn groups_of(s: &str) -> Option<Vec<&str>> {
    if s.is_empty() {
        return Some(Vec::new());
    }
    let parts: Vec<&str> = s.split(':').collect();
    if parts.iter().any(|p| p.is_empty()) {
        None
    } else {
        Some(parts)
    }
}

/// Recognizes exactly the strings that are valid `IPv6address` literals per
/// RFC 3986, including `::` compression and an embedded IPv4 tail. Does not
/// accept scope-id suffixes (`%eth0`), matching spec §9.
fn is_valid_ipv6(s: &str) -> bool {
    if s.contains('%') {
        return false;
    }
    if s.matches("::").count() > 1 {
        return false;
    }

    match s.find("::") {
        None => {
            let groups = match groups_of(s) {
                Some(g) => g,
                None => return false,
            };
            if groups.len() == 8 {
                groups.iter().all(|g| is_h16(g))
            } else if groups.len() == 7 {
                is_ipv4(groups[6]) && groups[..6].iter().all(|g| is_h16(g))
            } else {
                false
            }
        }
        Some(pos) => {
            let before = &s[..pos];
            let after = &s[pos + 2..];
            let before_groups = match groups_of(before) {
                Some(g) => g,
                None => return false,
            };
            let after_groups = match groups_of(after) {
                Some(g) => g,
                None => return false,
            };

            if !before_groups.iter().all(|g| is_h16(g)) {
                return false;
            }

            let (after_weight, after_ok) = match after_groups.split_last() {
                Some((last, rest)) if is_ipv4(last) => {
                    (rest.len() + 2, rest.iter().all(|g| is_h16(g)))
                }
                _ => (after_groups.len(), after_groups.iter().all(|g| is_h16(g))),
            };

            after_ok && before_groups.len() + after_weight <= 7
        }
    }
}

/// Cross-component correlations of spec §4.3.
fn validate_correlations(raw: &RawUri) -> Result<(), UriError> {
    // 1. userInfo/host/port defined implies host defined.
    if (raw.user_info.is_some() || raw.port.is_some()) && raw.host.is_none() {
        return Err(UriError::correlation("authority", 0, raw.path));
    }

    match raw.host {
        // 3. authority present: path empty or starts with "/".
        Some(_) => {
            if !raw.path.is_empty() && !raw.path.starts_with('/') {
                return Err(UriError::correlation("path", 0, raw.path));
            }
        }
        // 2. authority absent: path must not begin with "//".
        None => {
            if raw.path.starts_with("//") {
                return Err(UriError::correlation("path", 0, raw.path));
            }
        }
    }

    // 4. no scheme, no authority, non-empty path: first segment has no ":".
    if raw.scheme.is_none() && raw.host.is_none() && !raw.path.is_empty() {
        let first_segment = match raw.path.find('/') {
            Some(i) => &raw.path[..i],
            None => raw.path,
        };
        if first_segment.contains(':') {
            return Err(UriError::correlation("path", 0, raw.path));
        }
    }

    Ok(())
}
