//! Codec for 2020-12 draft relative JSON Pointers:
//! `<offset>` optionally followed by `#` or an absolute pointer.

use crate::error::ParseError;
use crate::util::{format_json_pointer, parse_json_pointer};

/// Parse a relative JSON Pointer into `(offset, parts)`.
///
/// A `None` parts value means the pointer ends in the `#` operator and is an
/// "index / name of" reference. `#` is also a perfectly valid character
/// inside a pointer tail, so `0/#` parses to `(0, Some(["#"]))` while `0#`
/// parses to `(0, None)`.
///
/// # Errors
///
/// [`ParseError`] if the text does not start with a canonical non-negative
/// integer, if anything follows a `#` operator, or if the tail is not a
/// well-formed absolute pointer.
///
/// # Example
///
/// ```
/// use fast_json_pointer::relative::parse_relative_pointer;
///
/// assert_eq!(parse_relative_pointer("0").unwrap(), (0, Some(vec![])));
/// assert_eq!(parse_relative_pointer("2#").unwrap(), (2, None));
/// assert_eq!(
///     parse_relative_pointer("1/foo").unwrap(),
///     (1, Some(vec!["foo".to_string()]))
/// );
/// assert!(parse_relative_pointer("#").is_err());
/// assert!(parse_relative_pointer("0#/foo").is_err());
/// assert!(parse_relative_pointer("-1").is_err());
/// ```
pub fn parse_relative_pointer(s: &str) -> Result<(usize, Option<Vec<String>>), ParseError> {
    let digits = leading_offset(s);
    if digits.is_empty() {
        return Err(ParseError::MissingOffset);
    }
    let offset: usize = digits
        .parse()
        .map_err(|_| ParseError::OffsetOutOfRange)?;
    let rest = &s[digits.len()..];

    if let Some(after_hash) = rest.strip_prefix('#') {
        if !after_hash.is_empty() {
            return Err(ParseError::SymbolsAfterHash);
        }
        return Ok((offset, None));
    }
    Ok((offset, Some(parse_json_pointer(rest)?)))
}

/// Serialize a relative JSON Pointer from `(offset, parts)`.
///
/// `None` parts serialize to the index-of form; an empty parts list
/// serializes to the bare offset.
///
/// # Example
///
/// ```
/// use fast_json_pointer::relative::format_relative_pointer;
///
/// assert_eq!(format_relative_pointer(0, Some(&["foo".to_string()])), "0/foo");
/// assert_eq!(format_relative_pointer(0, None), "0#");
/// assert_eq!(format_relative_pointer(3, Some(&[])), "3");
/// ```
pub fn format_relative_pointer(offset: usize, parts: Option<&[String]>) -> String {
    match parts {
        None => format!("{offset}#"),
        Some(parts) => format!("{offset}{}", format_json_pointer(parts)),
    }
}

/// The longest leading run matching `0 | [1-9][0-9]*`.
fn leading_offset(s: &str) -> &str {
    let bytes = s.as_bytes();
    // "0" never starts a longer canonical integer
    if bytes.first() == Some(&b'0') {
        return &s[..1];
    }
    let end = bytes
        .iter()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(bytes.len());
    &s[..end]
}
