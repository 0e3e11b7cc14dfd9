//! Value-type URI model with a syntactically strict parser, an
//! [RFC 3986] reference-resolution and relativization engine, a
//! document-equivalence normalizer, WHATWG origin and IPv4-host
//! handling, and an [RFC 6570] URI Template expander.
//!
//! [RFC 3986]: https://tools.ietf.org/html/rfc3986
//! [RFC 6570]: https://www.rfc-editor.org/rfc/rfc6570.html
//!
//! # Capability
//!
//! * **Values**: [`Uri`] is an immutable value decomposed into canonical
//!   components. Parsing validates and canonicalizes (lowercase scheme
//!   and ASCII host, uppercase percent-triplets, A-label hosts); the
//!   `Display` form is the RFC 3986 recomposition of the components.
//!   [`Uri::builder`] and the `with_*` methods derive new values.
//! * **Resolution**: [`resolve()`] implements the strict
//!   transform-references algorithm; [`relativize`] is its inverse for
//!   targets sharing scheme and authority. Neither can fail.
//! * **Equivalence**: [`normalize()`] and [`is_same_document`] implement
//!   document equivalence; [`origin()`] and [`is_cross_origin`] implement
//!   the WHATWG origin comparison, and [`ipv4::normalize_host`] the
//!   WHATWG IPv4 host reduction.
//! * **Templates**: the [`template`] module expands RFC 6570 Level 4
//!   templates from a normalized [`template::VariableBag`].
//!
//! Comparisons between `Uri` values by `PartialEq` and `Eq` are exact
//! component comparisons, which on canonical components is [simple string
//! comparison](https://tools.ietf.org/html/rfc3986#section-6.2.1). Use
//! [`is_same_document`] for the looser document equivalence.
//!
//! # Examples
//!
//! ```
//! use uri_value::{resolve, Uri};
//!
//! let base = Uri::parse("http://example.com/a/b/c?query")?;
//! let reference = Uri::parse("../x?y#z")?;
//! assert_eq!(
//!     resolve(&base, &reference).to_string(),
//!     "http://example.com/a/x?y#z"
//! );
//! # Ok::<_, uri_value::SyntaxError>(())
//! ```
//!
//! # Feature flags
//!
//! * `serde`
//!     + Implements `Serialize` and `Deserialize` (as strings) for
//!       [`Uri`] and [`Template`][`template::Template`].
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

pub mod ipv4;
mod normalize;
mod origin;
pub(crate) mod parser;
pub mod percent_encode;
mod relative;
mod resolve;
pub mod template;
mod uri;
pub(crate) mod validate;

pub use self::normalize::{is_same_document, normalize};
pub use self::origin::{is_cross_origin, origin};
pub use self::relative::relativize;
pub use self::resolve::resolve;
pub use self::uri::{SyntaxError, Uri, UriBuilder, Userinfo};
pub use self::validate::Component;
