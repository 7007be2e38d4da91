//! Low-level RFC 6901 codec: escaping, validation, parsing, and formatting
//! of absolute JSON Pointer strings.

use crate::error::ParseError;

/// Unescapes a JSON Pointer path component.
///
/// Per RFC 6901, `~1` is replaced with `/` and `~0` is replaced with `~`.
///
/// # Example
///
/// ```
/// use fast_json_pointer::util::unescape_component;
///
/// assert_eq!(unescape_component("a~0b"), "a~b");
/// assert_eq!(unescape_component("c~1d"), "c/d");
/// assert_eq!(unescape_component("no-escapes"), "no-escapes");
/// ```
pub fn unescape_component(component: &str) -> String {
    if !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~1 must be replaced before ~0
    component.replace("~1", "/").replace("~0", "~")
}

/// Escapes a JSON Pointer path component.
///
/// Per RFC 6901, `~` is replaced with `~0` and `/` is replaced with `~1`.
///
/// # Example
///
/// ```
/// use fast_json_pointer::util::escape_component;
///
/// assert_eq!(escape_component("a~b"), "a~0b");
/// assert_eq!(escape_component("c/d"), "c~1d");
/// assert_eq!(escape_component("no-escapes"), "no-escapes");
/// ```
pub fn escape_component(component: &str) -> String {
    if !component.contains('/') && !component.contains('~') {
        return component.to_string();
    }
    // Order matters: ~ must be escaped before /
    component.replace('~', "~0").replace('/', "~1")
}

/// Validate that a string is a well-formed RFC 6901 pointer.
///
/// A pointer must be empty or start with `/`, and every `~` in it must be
/// part of a `~0` or `~1` escape. Checked on the raw text, before any
/// unescaping.
///
/// # Example
///
/// ```
/// use fast_json_pointer::util::validate_json_pointer;
///
/// validate_json_pointer("").unwrap();
/// validate_json_pointer("/foo/bar").unwrap();
/// validate_json_pointer("foo").unwrap_err();
/// validate_json_pointer("/a~").unwrap_err();
/// validate_json_pointer("/a~2").unwrap_err();
/// ```
pub fn validate_json_pointer(pointer: &str) -> Result<(), ParseError> {
    if !pointer.is_empty() && !pointer.starts_with('/') {
        return Err(ParseError::NotAbsolute);
    }
    let bytes = pointer.as_bytes();
    for (i, &b) in bytes.iter().enumerate() {
        if b != b'~' {
            continue;
        }
        match bytes.get(i + 1) {
            Some(b'0') | Some(b'1') => {}
            // slice from the ~ by chars, the next byte may not be ascii
            Some(_) => {
                let escape: String = pointer[i..].chars().take(2).collect();
                return Err(ParseError::InvalidEscape(escape));
            }
            None => return Err(ParseError::InvalidEscape("~".to_string())),
        }
    }
    Ok(())
}

/// Parse an RFC 6901 pointer into a list of unescaped path components.
///
/// The empty string denotes the whole document and parses to an empty vec;
/// `/` parses to a single empty component.
///
/// # Errors
///
/// [`ParseError`] if the pointer is non-empty without a leading `/`, or
/// contains a bare `~` outside a `~0`/`~1` escape.
///
/// # Example
///
/// ```
/// use fast_json_pointer::util::parse_json_pointer;
///
/// assert_eq!(parse_json_pointer("").unwrap(), Vec::<String>::new());
/// assert_eq!(parse_json_pointer("/").unwrap(), vec![""]);
/// assert_eq!(parse_json_pointer("/a~0b/c~1d").unwrap(), vec!["a~b", "c/d"]);
/// assert!(parse_json_pointer("foo").is_err());
/// ```
pub fn parse_json_pointer(pointer: &str) -> Result<Vec<String>, ParseError> {
    validate_json_pointer(pointer)?;
    if pointer.is_empty() {
        return Ok(Vec::new());
    }
    // skip(1) discards the empty component before the leading /
    Ok(pointer.split('/').skip(1).map(unescape_component).collect())
}

/// Format unescaped path components into an RFC 6901 pointer.
///
/// Exact inverse of [`parse_json_pointer`]; the empty component list formats
/// to the empty string.
///
/// # Example
///
/// ```
/// use fast_json_pointer::util::format_json_pointer;
///
/// assert_eq!(format_json_pointer(&[]), "");
/// assert_eq!(format_json_pointer(&["".to_string()]), "/");
/// assert_eq!(
///     format_json_pointer(&["a~b".to_string(), "c/d".to_string()]),
///     "/a~0b/c~1d"
/// );
/// ```
pub fn format_json_pointer(parts: &[String]) -> String {
    if parts.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for component in parts {
        out.push('/');
        out.push_str(&escape_component(component));
    }
    out
}

/// Check if a string is a canonical non-negative integer array index.
///
/// Canonical means no leading zeros except `"0"` itself.
///
/// # Example
///
/// ```
/// use fast_json_pointer::util::is_valid_index;
///
/// assert!(is_valid_index("0"));
/// assert!(is_valid_index("123"));
/// assert!(!is_valid_index("-1"));
/// assert!(!is_valid_index("01"));
/// assert!(!is_valid_index("abc"));
/// ```
pub fn is_valid_index(index: &str) -> bool {
    if index.is_empty() {
        return false;
    }
    let bytes = index.as_bytes();
    // First char can't be a leading zero unless it's just "0"
    if bytes.len() > 1 && bytes[0] == b'0' {
        return false;
    }
    bytes.iter().all(|&b| b.is_ascii_digit())
}

/// Check if a path addresses the root value.
pub fn is_root(path: &[String]) -> bool {
    path.is_empty()
}

/// Get the parent path of a given path, or `None` for the root.
pub fn parent(path: &[String]) -> Option<&[String]> {
    if path.is_empty() {
        return None;
    }
    Some(&path[..path.len() - 1])
}
