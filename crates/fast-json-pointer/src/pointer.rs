//! Pointer value types: [`JsonPointer`] for RFC 6901 pointers and
//! [`RelativeJsonPointer`] for the 2020-12 draft relative extension.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::relative::{format_relative_pointer, parse_relative_pointer};
use crate::util::{format_json_pointer, parse_json_pointer};

/// An RFC 6901 JSON Pointer: an ordered sequence of unescaped path parts.
///
/// Immutable once constructed. Equality and hashing are part-sequence based,
/// and `Display` produces the canonical escaped string form.
///
/// ```
/// use fast_json_pointer::JsonPointer;
///
/// let ptr = JsonPointer::new(["~home", "foo.txt", "mime/type"]);
/// assert_eq!(ptr.to_string(), "/~0home/foo.txt/mime~1type");
/// assert_eq!("/~0home/foo.txt/mime~1type".parse::<JsonPointer>().unwrap(), ptr);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct JsonPointer {
    parts: Vec<String>,
}

impl JsonPointer {
    /// Build a pointer from unescaped parts.
    pub fn new<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The pointer addressing the whole document.
    pub fn root() -> Self {
        Self { parts: Vec::new() }
    }

    /// Parse a serialized RFC 6901 pointer.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        Ok(Self {
            parts: parse_json_pointer(s)?,
        })
    }

    /// The unescaped path parts.
    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    /// Number of path parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether this pointer addresses the whole document.
    pub fn is_root(&self) -> bool {
        self.parts.is_empty()
    }

    /// The final path part, if any.
    pub fn last(&self) -> Option<&str> {
        self.parts.last().map(String::as_str)
    }

    /// The pointer one level up, or `None` for the root.
    pub fn parent(&self) -> Option<JsonPointer> {
        crate::util::parent(&self.parts).map(|p| JsonPointer {
            parts: p.to_vec(),
        })
    }

    /// The pointer extended by one part.
    pub fn child(&self, part: impl Into<String>) -> JsonPointer {
        let mut parts = self.parts.clone();
        parts.push(part.into());
        JsonPointer { parts }
    }
}

impl fmt::Display for JsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_json_pointer(&self.parts))
    }
}

impl FromStr for JsonPointer {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Vec<String>> for JsonPointer {
    fn from(parts: Vec<String>) -> Self {
        Self { parts }
    }
}

impl TryFrom<&str> for JsonPointer {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

/// A 2020-12 draft relative JSON Pointer: an ascension offset plus either a
/// further absolute pointer or the `#` index-of operator.
///
/// ```
/// use fast_json_pointer::{JsonPointer, RelativeJsonPointer};
///
/// let rel = RelativeJsonPointer::new(0, Some(JsonPointer::new(["data", "items"])));
/// assert_eq!(rel.to_string(), "0/data/items");
///
/// let name_of = RelativeJsonPointer::new(2, None);
/// assert_eq!(name_of.to_string(), "2#");
/// assert!(name_of.is_index_ref());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativeJsonPointer {
    pub offset: usize,
    pub pointer: Option<JsonPointer>,
}

impl RelativeJsonPointer {
    pub fn new(offset: usize, pointer: Option<JsonPointer>) -> Self {
        Self { offset, pointer }
    }

    /// Parse a serialized relative pointer.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let (offset, parts) = parse_relative_pointer(s)?;
        Ok(Self {
            offset,
            pointer: parts.map(JsonPointer::from),
        })
    }

    /// Whether this is the `#` index-of form, which queries a node's name or
    /// index within its parent rather than its value.
    pub fn is_index_ref(&self) -> bool {
        self.pointer.is_none()
    }

    /// Unescaped tail parts, if this isn't an index reference.
    pub fn parts(&self) -> Option<&[String]> {
        self.pointer.as_ref().map(JsonPointer::parts)
    }
}

impl fmt::Display for RelativeJsonPointer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_relative_pointer(self.offset, self.parts()))
    }
}

impl FromStr for RelativeJsonPointer {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for RelativeJsonPointer {
    type Error = ParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_display_roundtrip() {
        let ptr = JsonPointer::parse("/~0home/foo.txt/mime~1type").unwrap();
        assert_eq!(ptr.parts(), &["~home", "foo.txt", "mime/type"]);
        assert_eq!(ptr.to_string(), "/~0home/foo.txt/mime~1type");
    }

    #[test]
    fn test_pointer_parts_accessor() {
        let ptr = JsonPointer::parse("/data/items/0/id").unwrap();
        assert_eq!(ptr.parts(), &["data", "items", "0", "id"]);
        assert_eq!(ptr.last(), Some("id"));
        assert_eq!(ptr.len(), 4);
    }

    #[test]
    fn test_root() {
        let root = JsonPointer::root();
        assert!(root.is_root());
        assert_eq!(root.to_string(), "");
        assert_eq!(root.last(), None);
        assert_eq!(root.parent(), None);
        assert_eq!(JsonPointer::parse("").unwrap(), root);
    }

    #[test]
    fn test_parent_child() {
        let ptr = JsonPointer::new(["a", "b"]);
        assert_eq!(ptr.parent().unwrap(), JsonPointer::new(["a"]));
        assert_eq!(ptr.child("c"), JsonPointer::new(["a", "b", "c"]));
    }

    #[test]
    fn test_from_str() {
        let ptr: JsonPointer = "/x/y".parse().unwrap();
        assert_eq!(ptr.parts(), &["x", "y"]);
        assert!("bad".parse::<JsonPointer>().is_err());
    }

    #[test]
    fn test_relative_parse() {
        let rel = RelativeJsonPointer::parse("0/data/items/0/id").unwrap();
        assert_eq!(rel.offset, 0);
        assert_eq!(rel.parts().unwrap(), &["data", "items", "0", "id"]);
        assert!(!rel.is_index_ref());

        let rel = RelativeJsonPointer::parse("0#").unwrap();
        assert_eq!(rel.offset, 0);
        assert!(rel.parts().is_none());
        assert!(rel.is_index_ref());

        // bare offset and trailing slash are not index refs
        assert!(!RelativeJsonPointer::parse("0").unwrap().is_index_ref());
        assert!(!RelativeJsonPointer::parse("0/").unwrap().is_index_ref());
    }

    #[test]
    fn test_relative_display() {
        for text in ["0", "2#", "0/data/items", "0/#", "1/a~1b"] {
            let rel = RelativeJsonPointer::parse(text).unwrap();
            assert_eq!(rel.to_string(), text);
        }
    }
}
