//! [`UriBuilder`]: the mutable counterpart to [`UriRef`]/[`Uri`], composing a
//! [`PathBuilder`] with the remaining six components.

use crate::encode::{Encoder, Encoding};
use crate::error::UriError;
use crate::path::PathBuilder;
use crate::raw::RawUri;
use crate::uri::{Uri, UriRef};
use crate::validate;

/// Mutable working copy of the seven URI-reference components. Not safe for
/// concurrent mutation, same as [`PathBuilder`].
#[derive(Debug, Clone)]
pub struct UriBuilder {
    scheme: Option<String>,
    user_info: Option<String>,
    host: Option<String>,
    port: Option<String>,
    path_builder: PathBuilder,
    query: Option<String>,
    fragment: Option<String>,
}

/// Delegates to [`UriBuilder::new`], so `UriBuilder::default()` agrees with
/// it rather than relying on a derive that would happen to match only
/// because every field's own `Default` currently does.
impl Default for UriBuilder {
    fn default() -> UriBuilder {
        UriBuilder::new()
    }
}

impl UriBuilder {
    /// An empty builder: no scheme, no authority, an empty relative path.
    pub fn new() -> UriBuilder {
        UriBuilder {
            scheme: None,
            user_info: None,
            host: None,
            port: None,
            path_builder: PathBuilder::new(),
            query: None,
            fragment: None,
        }
    }

    /// Seeds a builder from an existing [`UriRef`].
    pub fn from_uri_ref(u: &UriRef) -> UriBuilder {
        UriBuilder {
            scheme: u.scheme().map(str::to_string),
            user_info: u.user_info().map(str::to_string),
            host: u.host().map(str::to_string),
            port: u.port().map(str::to_string),
            path_builder: PathBuilder::from_path(u.path()),
            query: u.query().map(str::to_string),
            fragment: u.fragment().map(str::to_string),
        }
    }

    pub fn scheme(&mut self, scheme: Option<&str>) -> &mut Self {
        self.scheme = scheme.map(str::to_string);
        self
    }

    pub fn user_info(&mut self, user_info: Option<&str>) -> &mut Self {
        self.user_info = user_info.map(str::to_string);
        self
    }

    pub fn user_info_bytes(&mut self, bytes: Option<&[u8]>) -> Result<&mut Self, UriError> {
        self.user_info = match bytes {
            Some(b) => Some(Encoder::user_info().encode_to_string(b)?),
            None => None,
        };
        Ok(self)
    }

    pub fn user_info_text(&mut self, s: Option<&str>, encoding: Encoding) -> Result<&mut Self, UriError> {
        self.user_info = encode_text_opt(&Encoder::user_info(), s, encoding)?;
        Ok(self)
    }

    pub fn host(&mut self, host: Option<&str>) -> &mut Self {
        self.host = host.map(str::to_string);
        self
    }

    pub fn host_bytes(&mut self, bytes: Option<&[u8]>) -> Result<&mut Self, UriError> {
        self.host = match bytes {
            Some(b) => Some(Encoder::host().encode_to_string(b)?),
            None => None,
        };
        Ok(self)
    }

    pub fn host_text(&mut self, s: Option<&str>, encoding: Encoding) -> Result<&mut Self, UriError> {
        self.host = encode_text_opt(&Encoder::host(), s, encoding)?;
        Ok(self)
    }

    pub fn port(&mut self, port: Option<&str>) -> &mut Self {
        self.port = port.map(str::to_string);
        self
    }

    pub fn query(&mut self, query: Option<&str>) -> &mut Self {
        self.query = query.map(str::to_string);
        self
    }

    pub fn query_bytes(&mut self, bytes: Option<&[u8]>) -> Result<&mut Self, UriError> {
        self.query = match bytes {
            Some(b) => Some(Encoder::query().encode_to_string(b)?),
            None => None,
        };
        Ok(self)
    }

    pub fn query_text(&mut self, s: Option<&str>, encoding: Encoding) -> Result<&mut Self, UriError> {
        self.query = encode_text_opt(&Encoder::query(), s, encoding)?;
        Ok(self)
    }

    pub fn fragment(&mut self, fragment: Option<&str>) -> &mut Self {
        self.fragment = fragment.map(str::to_string);
        self
    }

    pub fn fragment_bytes(&mut self, bytes: Option<&[u8]>) -> Result<&mut Self, UriError> {
        self.fragment = match bytes {
            Some(b) => Some(Encoder::fragment().encode_to_string(b)?),
            None => None,
        };
        Ok(self)
    }

    pub fn fragment_text(&mut self, s: Option<&str>, encoding: Encoding) -> Result<&mut Self, UriError> {
        self.fragment = encode_text_opt(&Encoder::fragment(), s, encoding)?;
        Ok(self)
    }

    /// Mutable access to the underlying [`PathBuilder`].
    pub fn path(&mut self) -> &mut PathBuilder {
        &mut self.path_builder
    }

    /// Validates every component, including the cross-component
    /// correlations of spec §4.3, and returns the immutable [`UriRef`].
    /// Non-mutating: a failed `build()` leaves the builder unchanged.
    pub fn build(&self) -> Result<UriRef, UriError> {
        let path = self.path_builder.build()?;
        let path_str = path.value();
        let raw = RawUri {
            scheme: self.scheme.as_deref(),
            user_info: self.user_info.as_deref(),
            host: self.host.as_deref(),
            port: self.port.as_deref(),
            path: &path_str,
            query: self.query.as_deref(),
            fragment: self.fragment.as_deref(),
        };
        validate::validate(&raw)?;

        Ok(UriRef {
            scheme: self.scheme.clone(),
            user_info: self.user_info.clone(),
            host: self.host.clone(),
            port: self.port.clone(),
            path,
            query: self.query.clone(),
            fragment: self.fragment.clone(),
        })
    }

    /// Like [`UriBuilder::build`], additionally requiring a non-empty
    /// scheme, and returns a [`Uri`] instead of a [`UriRef`].
    pub fn build_uri(&self) -> Result<Uri, UriError> {
        use std::convert::TryFrom;
        Uri::try_from(self.build()?)
    }
}

fn encode_text_opt(encoder: &Encoder, s: Option<&str>, encoding: Encoding) -> Result<Option<String>, UriError> {
    match s {
        Some(s) => {
            let mut out = String::new();
            encoder.encode_text(s, encoding, false, &mut out)?;
            Ok(Some(out))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_a_full_uri() {
        let mut b = UriBuilder::new();
        b.scheme(Some("https"))
            .host(Some("example.com"))
            .port(Some("8443"))
            .query(Some("a=1"))
            .fragment(Some("top"));
        b.path().append_segments(&[Some("a"), Some("b")]).unwrap();
        let uri = b.build_uri().unwrap();
        assert_eq!(uri.to_string(), "https://example.com:8443/a/b?a=1#top");
    }

    #[test]
    fn build_uri_requires_scheme() {
        let mut b = UriBuilder::new();
        b.host(Some("example.com"));
        assert!(b.build_uri().is_err());
        assert!(b.build().is_ok());
    }

    #[test]
    fn from_uri_ref_round_trips() {
        let uri = UriRef::parse("http://user@host:80/a/b?q#f").unwrap();
        let b = UriBuilder::from_uri_ref(&uri);
        assert_eq!(b.build().unwrap().to_string(), uri.to_string());
    }

    #[test]
    fn bytes_and_text_setters_percent_encode() {
        let mut b = UriBuilder::new();
        b.scheme(Some("x"));
        b.host(Some("h"));
        b.user_info_bytes(Some(b"a b")).unwrap();
        b.query_text(Some("a b"), Encoding::Utf8).unwrap();
        let uri = b.build().unwrap();
        assert_eq!(uri.user_info(), Some("a%20b"));
        assert_eq!(uri.query(), Some("a%20b"));
    }

    #[test]
    fn build_validates_correlation_rules() {
        let mut b = UriBuilder::new();
        b.user_info(Some("u"));
        assert!(b.build().is_err());
    }

    #[test]
    fn default_agrees_with_new() {
        let a = UriBuilder::default().build().unwrap();
        let b = UriBuilder::new().build().unwrap();
        assert_eq!(a.to_string(), b.to_string());
        // UriBuilder::new()'s PathBuilder starts `absolute = true` (spec
        // §4.6), and `default()` must agree rather than falling back to
        // the derived `false`.
        assert!(a.path().is_absolute());
    }
}
