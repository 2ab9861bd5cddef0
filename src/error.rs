//! The single error family surfaced by every public operation (spec §7).

use std::fmt;

/// Errors raised while parsing, validating, building, encoding, or decoding
/// a URI-reference.
///
/// All public operations propagate errors of this type; none are silently
/// swallowed, and a failed [`crate::builder::UriBuilder::build`] leaves the
/// builder unchanged.
#[derive(thiserror::Error, Debug)]
pub enum UriError {
    /// The input violates RFC 3986 grammar for the named component.
    #[error("invalid {component} at offset {offset}: {input:?}")]
    Syntax {
        component: &'static str,
        offset: usize,
        input: String,
    },

    /// A cross-component correlation rule (spec §4.3) was violated. A
    /// subtype of [`UriError::Syntax`] in spirit: it carries the same shape.
    #[error("correlation violation ({component}) at offset {offset}: {input:?}")]
    Correlation {
        component: &'static str,
        offset: usize,
        input: String,
    },

    /// A builder index was out of range.
    #[error("index {index} out of range (length {length})")]
    Index { index: usize, length: usize },

    /// Construction-time misuse, e.g. a custom encoder mask containing a
    /// character outside URIC, or a non-ASCII character in an `AsciiMask`.
    #[error("invalid argument: {message}")]
    Argument { message: String },

    /// `port_as_int` was called on a port that doesn't fit in the target
    /// integer width. The port string itself remains accessible.
    #[error("port {port:?} does not fit in a 32-bit integer")]
    Overflow { port: String },

    /// A caller-supplied encoder sink failed; the underlying error is
    /// wrapped once and surfaced as-is.
    #[error("encoder sink failed")]
    Io {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl UriError {
    pub fn syntax(component: &'static str, offset: usize, input: impl Into<String>) -> UriError {
        UriError::Syntax {
            component,
            offset,
            input: input.into(),
        }
    }

    pub fn correlation(component: &'static str, offset: usize, input: impl Into<String>) -> UriError {
        UriError::Correlation {
            component,
            offset,
            input: input.into(),
        }
    }

    pub fn io(source: impl std::error::Error + Send + Sync + 'static) -> UriError {
        UriError::Io {
            source: Box::new(source),
        }
    }
}

impl From<fmt::Error> for UriError {
    fn from(e: fmt::Error) -> UriError {
        UriError::io(e)
    }
}
