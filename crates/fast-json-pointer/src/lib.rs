//! JSON Pointer (RFC 6901) and relative JSON Pointer (2020-12 draft)
//! utilities.
//!
//! This crate implements the two pointer grammars of
//! [RFC 6901](https://tools.ietf.org/html/rfc6901) and the
//! [relative pointer draft](https://json-schema.org/draft/2020-12/relative-json-pointer.html),
//! a resolution engine that walks a [`serde_json::Value`] tree producing an
//! auditable chain of references, and the patch operations built on that
//! chain: get, add, remove, replace, move, copy, and test.
//!
//! # Example
//!
//! ```
//! use fast_json_pointer::{ops, JsonPointer};
//! use serde_json::json;
//!
//! // Parse and serialize pointers
//! let ptr = JsonPointer::parse("/a~0b/c~1d").unwrap();
//! assert_eq!(ptr.parts(), &["a~b", "c/d"]);
//! assert_eq!(ptr.to_string(), "/a~0b/c~1d");
//!
//! // Read and mutate a document
//! let mut doc = json!({"x": 2});
//! assert_eq!(ops::get(&doc, "/x", None::<&str>).unwrap(), json!(2));
//!
//! ops::add(&mut doc, "/y", json!("foo"), None::<&str>).unwrap();
//! assert_eq!(doc, json!({"x": 2, "y": "foo"}));
//!
//! // Relative pointers ascend from the node the absolute pointer hit
//! assert_eq!(ops::get(&doc, "/x", Some("1/y")).unwrap(), json!("foo"));
//! assert_eq!(ops::get(&doc, "/x", Some("0#")).unwrap(), json!("x"));
//! ```

pub mod error;
pub mod ops;
pub mod pointer;
pub mod relative;
pub mod resolve;
pub mod util;

pub use error::{JsonPointerError, ParseError, ResolutionError, ResolutionErrorKind};
pub use ops::{IntoJsonPointer, IntoRelativePointer};
pub use pointer::{JsonPointer, RelativeJsonPointer};
pub use relative::{format_relative_pointer, parse_relative_pointer};
pub use resolve::{get_mut, get_ref, resolve, DocRef, Resolution};
pub use util::{
    escape_component, format_json_pointer, is_valid_index, parse_json_pointer,
    unescape_component, validate_json_pointer,
};
