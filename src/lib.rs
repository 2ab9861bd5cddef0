//! `rfc3986` is a URI-reference library: parsing, building, resolving, and
//! normalizing, following RFC 3986 directly rather than delegating to a
//! single host language's URL semantics.
//!
//! - Uses only safe Rust.
//! - Splitting (`raw`), grammar validation (`validate`), and value
//!   construction (`uri`) are separate passes, so a caller who only needs
//!   the Appendix B split can stop there.
//!
//! ## Structure
//!
//! ```notrust
//!     foo://user@example.com:8042/over/there?name=ferret#nose
//!      \_/   \__/ \_________/ \__/\_________/ \_________/ \__/
//!       |     |        |        |      |           |        |
//!    scheme  user     host     port   path        query   fragment
//! ```
//!
//! # Usage
//!
//! ```
//! use rfc3986::Uri;
//!
//! let uri = Uri::parse("https://crates.io/crates/rfc3986").unwrap();
//! assert_eq!(uri.host(), Some("crates.io"));
//! ```
//!
//! Resolving a reference against a base:
//!
//! ```
//! use rfc3986::{Uri, UriRef};
//!
//! let base = Uri::parse("http://a/b/c/d;p?q").unwrap();
//! let reference = UriRef::parse("../g").unwrap();
//! assert_eq!(base.resolve(&reference, true).to_string(), "http://a/b/g");
//! ```

pub mod builder;
pub mod classes;
pub mod decode;
pub mod encode;
pub mod error;
pub mod hex;
pub mod mask;
pub mod path;
pub mod raw;
pub mod uri;
pub mod validate;

pub use builder::UriBuilder;
pub use decode::Decoder;
pub use encode::{Encoder, Encoding};
pub use error::UriError;
pub use mask::AsciiMask;
pub use path::{Path, PathBuilder};
pub use raw::RawUri;
pub use uri::{Uri, UriRef};
