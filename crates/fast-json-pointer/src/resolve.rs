//! Resolution engine: walks a document tree along a parsed pointer and
//! produces the root-to-target chain of references that the patch
//! operations are built on.

use serde_json::Value;

use crate::error::{ResolutionError, ResolutionErrorKind};
use crate::pointer::{JsonPointer, RelativeJsonPointer};
use crate::util::is_valid_index;

/// One reference in a resolution chain: a document node together with the
/// pointer naming its path from the document root.
#[derive(Debug, Clone, PartialEq)]
pub struct DocRef {
    pub doc: Value,
    pub location: JsonPointer,
}

/// A successful resolution: the reference chain from the root to the
/// target, plus the target's name when the query was an index-of relative
/// pointer.
///
/// Each chain entry's location is a one-part extension of the previous
/// entry's, starting at the document root.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    chain: Vec<DocRef>,
    name: Option<String>,
}

impl Resolution {
    /// The reference chain, root first.
    pub fn chain(&self) -> &[DocRef] {
        &self.chain
    }

    /// The deepest reference in the chain.
    pub fn last(&self) -> Option<&DocRef> {
        self.chain.last()
    }

    /// The name or index produced by an index-of (`#`) query, if that is
    /// what was resolved.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The queried result: the index-of name as a JSON string, or the last
    /// reference's value.
    pub fn target(&self) -> Value {
        match &self.name {
            Some(name) => Value::String(name.clone()),
            None => self
                .chain
                .last()
                .map(|r| r.doc.clone())
                .unwrap_or(Value::Null),
        }
    }

    /// Consume the resolution, yielding the queried result.
    pub fn into_target(mut self) -> Value {
        match self.name {
            Some(name) => Value::String(name),
            None => self.chain.pop().map(|r| r.doc).unwrap_or(Value::Null),
        }
    }
}

/// Resolve `pointer` against `doc`, then optionally apply `rel` from the
/// node the absolute pointer landed on.
///
/// The document is never mutated. On failure the error carries the chain
/// resolved so far and every segment that was not consumed, so callers can
/// tell a missing final segment (a creatable position) from a missing
/// intermediate one.
///
/// # Example
///
/// ```
/// use fast_json_pointer::{resolve, JsonPointer, RelativeJsonPointer};
/// use serde_json::json;
///
/// let doc = json!({"x": {"": 3, "z": 12}});
/// let ptr = JsonPointer::parse("/x/").unwrap();
/// let rel = RelativeJsonPointer::parse("1/z").unwrap();
///
/// let resolution = resolve(&doc, &ptr, Some(&rel)).unwrap();
/// assert_eq!(resolution.target(), json!(12));
/// ```
pub fn resolve(
    doc: &Value,
    pointer: &JsonPointer,
    rel: Option<&RelativeJsonPointer>,
) -> Result<Resolution, ResolutionError> {
    let mut chain = walk(doc, pointer.parts(), JsonPointer::root())?;

    let Some(rel) = rel else {
        return Ok(Resolution { chain, name: None });
    };

    if rel.offset > 0 {
        // the chain holds parts + 1 references, so the deepest legal
        // ascension leaves just the root
        if rel.offset >= chain.len() {
            return Err(ResolutionError {
                kind: ResolutionErrorKind::AscendsPastRoot,
                chain,
                remaining: rel.parts().map(<[String]>::to_vec).unwrap_or_default(),
            });
        }
        chain.truncate(chain.len() - rel.offset);
    }

    match &rel.pointer {
        None => {
            let name = match chain.last().and_then(|r| r.location.last()) {
                Some(name) => name.to_string(),
                None => {
                    return Err(ResolutionError {
                        kind: ResolutionErrorKind::RootHasNoName,
                        chain,
                        remaining: Vec::new(),
                    })
                }
            };
            Ok(Resolution {
                chain,
                name: Some(name),
            })
        }
        Some(tail) => {
            let (base_doc, base_location) = match chain.last() {
                Some(r) => (r.doc.clone(), r.location.clone()),
                None => (doc.clone(), JsonPointer::root()),
            };
            match walk(&base_doc, tail.parts(), base_location) {
                Ok(sub) => {
                    // the sub-walk's first reference is the base node again
                    chain.extend(sub.into_iter().skip(1));
                    Ok(Resolution { chain, name: None })
                }
                Err(mut err) => {
                    chain.pop();
                    chain.extend(err.chain);
                    err.chain = chain;
                    Err(err)
                }
            }
        }
    }
}

/// Walk `parts` down from `doc`, locations prefixed by `base`.
fn walk(
    doc: &Value,
    parts: &[String],
    base: JsonPointer,
) -> Result<Vec<DocRef>, ResolutionError> {
    let mut location = base;
    let mut current = doc;
    let mut chain = vec![DocRef {
        doc: doc.clone(),
        location: location.clone(),
    }];

    for (idx, part) in parts.iter().enumerate() {
        match step(current, part) {
            Ok(next) => {
                current = next;
                location = location.child(part.clone());
                chain.push(DocRef {
                    doc: next.clone(),
                    location: location.clone(),
                });
            }
            Err(kind) => {
                return Err(ResolutionError {
                    kind,
                    chain,
                    remaining: parts[idx..].to_vec(),
                })
            }
        }
    }
    Ok(chain)
}

/// Descend one part into a node.
fn step<'a>(doc: &'a Value, part: &str) -> Result<&'a Value, ResolutionErrorKind> {
    match doc {
        Value::Object(map) => map
            .get(part)
            .ok_or_else(|| ResolutionErrorKind::MissingKey(part.to_string())),
        Value::Array(arr) => {
            if part == "-" {
                return Err(ResolutionErrorKind::EndOfArray);
            }
            if !is_valid_index(part) {
                return Err(ResolutionErrorKind::InvalidIndex(part.to_string()));
            }
            let idx: usize = part
                .parse()
                .map_err(|_| ResolutionErrorKind::InvalidIndex(part.to_string()))?;
            arr.get(idx).ok_or(ResolutionErrorKind::OutOfBounds(idx))
        }
        _ => Err(ResolutionErrorKind::NotNavigable),
    }
}

/// Borrowing lookup by path. Returns `None` if the path doesn't resolve.
///
/// # Example
///
/// ```
/// use fast_json_pointer::get_ref;
/// use serde_json::json;
///
/// let doc = json!({"foo": {"bar": 42}});
/// let path = ["foo".to_string(), "bar".to_string()];
/// assert_eq!(get_ref(&doc, &path), Some(&json!(42)));
/// ```
pub fn get_ref<'a>(val: &'a Value, path: &[String]) -> Option<&'a Value> {
    let mut current = val;
    for part in path {
        match current {
            Value::Array(arr) => {
                if part == "-" {
                    return None;
                }
                let idx: usize = part.parse().ok()?;
                current = arr.get(idx)?;
            }
            Value::Object(map) => {
                current = map.get(part.as_str())?;
            }
            _ => return None,
        }
    }
    Some(current)
}

/// Mutable counterpart of [`get_ref`].
pub fn get_mut<'a>(val: &'a mut Value, path: &[String]) -> Option<&'a mut Value> {
    let mut current = val;
    for part in path {
        match current {
            Value::Array(arr) => {
                if part == "-" {
                    return None;
                }
                let idx: usize = part.parse().ok()?;
                current = arr.get_mut(idx)?;
            }
            Value::Object(map) => {
                current = map.get_mut(part.as_str())?;
            }
            _ => return None,
        }
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ptr(s: &str) -> JsonPointer {
        JsonPointer::parse(s).unwrap()
    }

    fn rel(s: &str) -> RelativeJsonPointer {
        RelativeJsonPointer::parse(s).unwrap()
    }

    #[test]
    fn test_resolve_root() {
        let doc = json!({});
        let resolution = resolve(&doc, &ptr(""), None).unwrap();
        assert_eq!(resolution.target(), json!({}));
        assert_eq!(resolution.chain().len(), 1);
    }

    #[test]
    fn test_resolve_object_path() {
        let doc = json!({"x": {"": 3}});
        let resolution = resolve(&doc, &ptr("/x/"), None).unwrap();
        assert_eq!(resolution.target(), json!(3));

        let locations: Vec<String> = resolution
            .chain()
            .iter()
            .map(|r| r.location.to_string())
            .collect();
        assert_eq!(locations, vec!["", "/x", "/x/"]);
    }

    #[test]
    fn test_resolve_array_path() {
        let doc = json!([{"x": 1}, 4]);
        let resolution = resolve(&doc, &ptr("/0/x"), None).unwrap();
        assert_eq!(resolution.target(), json!(1));
        assert_eq!(resolve(&doc, &ptr("/1"), None).unwrap().target(), json!(4));
    }

    #[test]
    fn test_chain_is_one_part_extensions() {
        let doc = json!({"a": {"b": [10, 20]}});
        let resolution = resolve(&doc, &ptr("/a/b/1"), None).unwrap();
        let chain = resolution.chain();
        assert_eq!(chain.len(), 4);
        for pair in chain.windows(2) {
            assert_eq!(pair[1].location.parent().unwrap(), pair[0].location);
        }
    }

    #[test]
    fn test_missing_key_carries_chain_and_remaining() {
        let doc = json!({"a": {"b": 1}});
        let err = resolve(&doc, &ptr("/a/x/y"), None).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::MissingKey("x".to_string()));
        assert_eq!(err.remaining, vec!["x", "y"]);
        assert_eq!(err.chain.len(), 2);
        assert_eq!(err.last_resolved().unwrap().location, ptr("/a"));
    }

    #[test]
    fn test_index_out_of_range() {
        let doc = json!([{"x": 1}, 4]);
        let err = resolve(&doc, &ptr("/3"), None).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::OutOfBounds(3));
        assert_eq!(err.remaining, vec!["3"]);
    }

    #[test]
    fn test_invalid_index() {
        let doc = json!([1, 2]);
        let err = resolve(&doc, &ptr("/01"), None).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::InvalidIndex("01".to_string()));
        let err = resolve(&doc, &ptr("/x"), None).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::InvalidIndex("x".to_string()));
    }

    #[test]
    fn test_end_of_array_token() {
        let doc = json!([1, 2]);
        let err = resolve(&doc, &ptr("/-"), None).unwrap_err();
        assert!(err.is_end_of_array());
        assert_eq!(err.remaining, vec!["-"]);
    }

    #[test]
    fn test_scalar_not_navigable() {
        let doc = json!({"a": 5});
        let err = resolve(&doc, &ptr("/a/b"), None).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::NotNavigable);
        assert_eq!(err.remaining, vec!["b"]);
    }

    #[test]
    fn test_relative_tail() {
        let doc = json!({"x": {"": 3, "z": 12}});
        let resolution = resolve(&doc, &ptr("/x/"), Some(&rel("1/z"))).unwrap();
        assert_eq!(resolution.target(), json!(12));
        assert_eq!(resolution.last().unwrap().location, ptr("/x/z"));
    }

    #[test]
    fn test_relative_index_of() {
        let doc = json!({"x": {"": 3}, "z": 12});
        let resolution = resolve(&doc, &ptr("/x/"), Some(&rel("1#"))).unwrap();
        assert_eq!(resolution.name(), Some("x"));
        assert_eq!(resolution.target(), json!("x"));

        let doc = json!([{"x": 1}, 4]);
        let resolution = resolve(&doc, &ptr("/0/x"), Some(&rel("1#"))).unwrap();
        assert_eq!(resolution.target(), json!("0"));
    }

    #[test]
    fn test_relative_zero_offset_tail() {
        let doc = json!([{"x": {"": {"y": 3}}}, 4]);
        let err = resolve(&doc, &ptr("/0/x"), Some(&rel("0//does-not-exist"))).unwrap_err();
        assert_eq!(
            err.kind,
            ResolutionErrorKind::MissingKey("does-not-exist".to_string())
        );
        assert_eq!(err.remaining, vec!["does-not-exist"]);
        // a scalar mid-tail is not navigable
        let doc = json!([{"x": {"": 3}}, 4]);
        let err = resolve(&doc, &ptr("/0/x"), Some(&rel("0//does-not-exist"))).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::NotNavigable);
    }

    #[test]
    fn test_relative_ascends_past_root() {
        let doc = json!({"x": 2});
        let err = resolve(&doc, &ptr("/x"), Some(&rel("5/y"))).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::AscendsPastRoot);
        // ascending exactly to the root is fine
        let resolution = resolve(&doc, &ptr("/x"), Some(&rel("1"))).unwrap();
        assert_eq!(resolution.target(), json!({"x": 2}));
    }

    #[test]
    fn test_relative_index_of_at_root() {
        let doc = json!({"x": 2});
        let err = resolve(&doc, &ptr(""), Some(&rel("0#"))).unwrap_err();
        assert_eq!(err.kind, ResolutionErrorKind::RootHasNoName);
    }

    #[test]
    fn test_relative_tail_failure_reports_full_chain() {
        let doc = json!({"a": {"b": {"c": 1}}});
        let err = resolve(&doc, &ptr("/a/b"), Some(&rel("1/missing"))).unwrap_err();
        assert_eq!(
            err.kind,
            ResolutionErrorKind::MissingKey("missing".to_string())
        );
        assert_eq!(err.remaining, vec!["missing"]);
        // chain runs root -> /a, with no duplicated base entry
        let locations: Vec<String> = err.chain.iter().map(|r| r.location.to_string()).collect();
        assert_eq!(locations, vec!["", "/a"]);
    }

    #[test]
    fn test_get_ref() {
        let doc = json!({"a": {"b": [1, 2, 3]}});
        let path = vec!["a".to_string(), "b".to_string(), "1".to_string()];
        assert_eq!(get_ref(&doc, &path), Some(&json!(2)));
        assert_eq!(get_ref(&doc, &["missing".to_string()]), None);
        assert_eq!(get_ref(&doc, &[]), Some(&doc));
    }

    #[test]
    fn test_get_mut() {
        let mut doc = json!({"a": [1, 2]});
        let path = vec!["a".to_string(), "0".to_string()];
        *get_mut(&mut doc, &path).unwrap() = json!(9);
        assert_eq!(doc, json!({"a": [9, 2]}));
        assert!(get_mut(&mut doc, &["a".to_string(), "-".to_string()]).is_none());
    }
}
