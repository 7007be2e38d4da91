//! Patch operations (`get`, `add`, `remove`, `replace`, `move_`, `copy`,
//! `test`) expressed over the resolution engine's reference chains.
//!
//! Every operation accepts either raw pointer text or a pre-parsed pointer
//! value, plus an optional relative pointer of either form. Pass
//! `None::<&str>` when no relative pointer applies.

use serde_json::Value;

use crate::error::{JsonPointerError, ParseError, ResolutionErrorKind};
use crate::pointer::{JsonPointer, RelativeJsonPointer};
use crate::resolve::{get_mut, resolve, Resolution};
use crate::util::is_valid_index;

/// Raw text or an already-parsed absolute pointer.
pub trait IntoJsonPointer {
    fn into_json_pointer(self) -> Result<JsonPointer, ParseError>;
}

impl IntoJsonPointer for JsonPointer {
    fn into_json_pointer(self) -> Result<JsonPointer, ParseError> {
        Ok(self)
    }
}

impl IntoJsonPointer for &JsonPointer {
    fn into_json_pointer(self) -> Result<JsonPointer, ParseError> {
        Ok(self.clone())
    }
}

impl IntoJsonPointer for &str {
    fn into_json_pointer(self) -> Result<JsonPointer, ParseError> {
        JsonPointer::parse(self)
    }
}

impl IntoJsonPointer for String {
    fn into_json_pointer(self) -> Result<JsonPointer, ParseError> {
        JsonPointer::parse(&self)
    }
}

/// Raw text or an already-parsed relative pointer.
pub trait IntoRelativePointer {
    fn into_relative_pointer(self) -> Result<RelativeJsonPointer, ParseError>;
}

impl IntoRelativePointer for RelativeJsonPointer {
    fn into_relative_pointer(self) -> Result<RelativeJsonPointer, ParseError> {
        Ok(self)
    }
}

impl IntoRelativePointer for &RelativeJsonPointer {
    fn into_relative_pointer(self) -> Result<RelativeJsonPointer, ParseError> {
        Ok(self.clone())
    }
}

impl IntoRelativePointer for &str {
    fn into_relative_pointer(self) -> Result<RelativeJsonPointer, ParseError> {
        RelativeJsonPointer::parse(self)
    }
}

impl IntoRelativePointer for String {
    fn into_relative_pointer(self) -> Result<RelativeJsonPointer, ParseError> {
        RelativeJsonPointer::parse(&self)
    }
}

fn opt_rel<R: IntoRelativePointer>(
    rel: Option<R>,
) -> Result<Option<RelativeJsonPointer>, ParseError> {
    rel.map(IntoRelativePointer::into_relative_pointer).transpose()
}

/// Fetch the value at a pointer. An index-of relative pointer yields the
/// target's name or index as a JSON string.
///
/// # Example
///
/// ```
/// use fast_json_pointer::ops;
/// use serde_json::json;
///
/// let doc = json!({"x": {"": 3, "z": 12}});
/// assert_eq!(ops::get(&doc, "/x/", None::<&str>).unwrap(), json!(3));
/// assert_eq!(ops::get(&doc, "/x/", Some("1/z")).unwrap(), json!(12));
/// assert_eq!(ops::get(&doc, "/x/", Some("1#")).unwrap(), json!("x"));
/// ```
pub fn get<P, R>(doc: &Value, pointer: P, rel: Option<R>) -> Result<Value, JsonPointerError>
where
    P: IntoJsonPointer,
    R: IntoRelativePointer,
{
    let pointer = pointer.into_json_pointer()?;
    let rel = opt_rel(rel)?;
    let resolution = resolve(doc, &pointer, rel.as_ref())?;
    Ok(resolution.into_target())
}

/// Insert a value at a pointer.
///
/// Object parents get the key inserted or overwritten. Array parents get
/// the value inserted *at* the index, shifting later elements right; the
/// `-` token appends. A pointer whose final segment does not yet exist is
/// legal, and creates it under the last resolvable node; a pointer missing
/// more than its final segment fails.
///
/// # Example
///
/// ```
/// use fast_json_pointer::ops;
/// use serde_json::json;
///
/// let mut doc = json!({});
/// ops::add(&mut doc, "/x", json!(2), None::<&str>).unwrap();
/// assert_eq!(doc, json!({"x": 2}));
///
/// let mut doc = json!([1, 3]);
/// ops::add(&mut doc, "/1", json!(2), None::<&str>).unwrap();
/// assert_eq!(doc, json!([1, 2, 3]));
/// ops::add(&mut doc, "/-", json!(4), None::<&str>).unwrap();
/// assert_eq!(doc, json!([1, 2, 3, 4]));
/// ```
pub fn add<P, R>(
    doc: &mut Value,
    pointer: P,
    value: Value,
    rel: Option<R>,
) -> Result<(), JsonPointerError>
where
    P: IntoJsonPointer,
    R: IntoRelativePointer,
{
    let pointer = pointer.into_json_pointer()?;
    let rel = opt_rel(rel)?;
    if rel.as_ref().is_some_and(RelativeJsonPointer::is_index_ref) {
        return Err(JsonPointerError::InvalidTarget(
            "an index-of relative pointer has no assignable target".to_string(),
        ));
    }

    let (parent_location, part) = match resolve(&*doc, &pointer, rel.as_ref()) {
        Ok(resolution) => split_target(&resolution, "add at")?,
        // only the final segment is missing: that is the position to create;
        // an ascension failure is never creatable
        Err(err)
            if err.remaining.len() == 1
                && err.kind != ResolutionErrorKind::AscendsPastRoot =>
        {
            match err.last_resolved() {
                Some(parent) => (parent.location.clone(), err.remaining[0].clone()),
                None => return Err(err.into()),
            }
        }
        Err(err) => return Err(err.into()),
    };

    let parent = parent_container(doc, &parent_location)?;
    insert_into(parent, &part, value)
}

/// Delete the value at a pointer. The pointer must resolve fully; the `-`
/// token is a terminal error here.
///
/// # Example
///
/// ```
/// use fast_json_pointer::ops;
/// use serde_json::json;
///
/// let mut doc = json!({"x": 2});
/// ops::remove(&mut doc, "/x", None::<&str>).unwrap();
/// assert_eq!(doc, json!({}));
/// ```
pub fn remove<P, R>(doc: &mut Value, pointer: P, rel: Option<R>) -> Result<(), JsonPointerError>
where
    P: IntoJsonPointer,
    R: IntoRelativePointer,
{
    let pointer = pointer.into_json_pointer()?;
    let rel = opt_rel(rel)?;
    let resolution = resolve(&*doc, &pointer, rel.as_ref())?;
    if resolution.name().is_some() {
        return Err(JsonPointerError::InvalidTarget(
            "an index-of relative pointer has no removable target".to_string(),
        ));
    }
    let (parent_location, part) = split_target(&resolution, "remove")?;

    let parent = parent_container(doc, &parent_location)?;
    match parent {
        Value::Object(map) => {
            // shift_remove keeps the map's insertion order intact
            map.shift_remove(&part);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = array_index(&part, arr.len())?;
            arr.remove(idx);
            Ok(())
        }
        _ => Err(JsonPointerError::InvalidTarget(
            "cannot remove from a scalar value".to_string(),
        )),
    }
}

/// Overwrite the value at a pointer in place. The pointer must resolve
/// fully; use [`add`] to create new positions.
///
/// # Example
///
/// ```
/// use fast_json_pointer::ops;
/// use serde_json::json;
///
/// let mut doc = json!({"x": 2});
/// ops::replace(&mut doc, "/x", json!(["foo"]), None::<&str>).unwrap();
/// assert_eq!(doc, json!({"x": ["foo"]}));
/// ```
pub fn replace<P, R>(
    doc: &mut Value,
    pointer: P,
    value: Value,
    rel: Option<R>,
) -> Result<(), JsonPointerError>
where
    P: IntoJsonPointer,
    R: IntoRelativePointer,
{
    let pointer = pointer.into_json_pointer()?;
    let rel = opt_rel(rel)?;
    let resolution = resolve(&*doc, &pointer, rel.as_ref())?;
    if resolution.name().is_some() {
        return Err(JsonPointerError::InvalidTarget(
            "an index-of relative pointer has no replaceable target".to_string(),
        ));
    }
    let (parent_location, part) = split_target(&resolution, "replace")?;

    let parent = parent_container(doc, &parent_location)?;
    match parent {
        Value::Object(map) => {
            map.insert(part, value);
            Ok(())
        }
        Value::Array(arr) => {
            let idx = array_index(&part, arr.len())?;
            arr[idx] = value;
            Ok(())
        }
        _ => Err(JsonPointerError::InvalidTarget(
            "cannot replace inside a scalar value".to_string(),
        )),
    }
}

/// Move the value at `from` to `to`: a [`get`], a [`remove`], then an
/// [`add`], in that order.
///
/// Not atomic: a failure partway leaves the document partially mutated.
/// Callers needing atomicity must snapshot and restore externally.
///
/// # Example
///
/// ```
/// use fast_json_pointer::ops;
/// use serde_json::json;
///
/// let mut doc = json!({"x": 2});
/// ops::move_(&mut doc, "/x", "/y", None::<&str>, None::<&str>).unwrap();
/// assert_eq!(doc, json!({"y": 2}));
/// ```
pub fn move_<P, Q, R, S>(
    doc: &mut Value,
    from: P,
    to: Q,
    from_rel: Option<R>,
    rel: Option<S>,
) -> Result<(), JsonPointerError>
where
    P: IntoJsonPointer,
    Q: IntoJsonPointer,
    R: IntoRelativePointer,
    S: IntoRelativePointer,
{
    let from = from.into_json_pointer()?;
    let to = to.into_json_pointer()?;
    let from_rel = opt_rel(from_rel)?;
    let rel = opt_rel(rel)?;

    let value = get(&*doc, &from, from_rel.as_ref())?;
    remove(doc, &from, from_rel.as_ref())?;
    add(doc, &to, value, rel.as_ref())
}

/// Copy the value at `from` to `to`: a [`get`] then an [`add`]. Like
/// [`move_`], not atomic.
///
/// # Example
///
/// ```
/// use fast_json_pointer::ops;
/// use serde_json::json;
///
/// let mut doc = json!({"x": 2});
/// ops::copy(&mut doc, "/x", "/y", None::<&str>, None::<&str>).unwrap();
/// assert_eq!(doc, json!({"x": 2, "y": 2}));
/// ```
pub fn copy<P, Q, R, S>(
    doc: &mut Value,
    from: P,
    to: Q,
    from_rel: Option<R>,
    rel: Option<S>,
) -> Result<(), JsonPointerError>
where
    P: IntoJsonPointer,
    Q: IntoJsonPointer,
    R: IntoRelativePointer,
    S: IntoRelativePointer,
{
    let from = from.into_json_pointer()?;
    let to = to.into_json_pointer()?;
    let from_rel = opt_rel(from_rel)?;
    let rel = opt_rel(rel)?;

    let value = get(&*doc, &from, from_rel.as_ref())?;
    add(doc, &to, value, rel.as_ref())
}

/// Whether the value at a pointer structurally equals `value`.
///
/// # Example
///
/// ```
/// use fast_json_pointer::ops;
/// use serde_json::json;
///
/// let doc = json!({"x": 2});
/// assert!(ops::test(&doc, "/x", &json!(2), None::<&str>).unwrap());
/// assert!(!ops::test(&doc, "/x", &json!(3), None::<&str>).unwrap());
/// ```
pub fn test<P, R>(
    doc: &Value,
    pointer: P,
    value: &Value,
    rel: Option<R>,
) -> Result<bool, JsonPointerError>
where
    P: IntoJsonPointer,
    R: IntoRelativePointer,
{
    Ok(get(doc, pointer, rel)? == *value)
}

/// Split a resolved target into its parent's location and its final
/// segment. The document root has neither and cannot be mutated through a
/// parent container.
fn split_target(
    resolution: &Resolution,
    action: &str,
) -> Result<(JsonPointer, String), JsonPointerError> {
    let location = resolution
        .last()
        .map(|r| r.location.clone())
        .unwrap_or_default();
    match (location.parent(), location.last()) {
        (Some(parent), Some(part)) => Ok((parent, part.to_string())),
        _ => Err(JsonPointerError::InvalidTarget(format!(
            "cannot {action} the document root"
        ))),
    }
}

fn parent_container<'a>(
    doc: &'a mut Value,
    location: &JsonPointer,
) -> Result<&'a mut Value, JsonPointerError> {
    get_mut(doc, location.parts()).ok_or_else(|| {
        JsonPointerError::InvalidTarget(format!("parent container `{location}` is not reachable"))
    })
}

fn array_index(part: &str, len: usize) -> Result<usize, JsonPointerError> {
    if !is_valid_index(part) {
        return Err(JsonPointerError::InvalidTarget(format!(
            "`{part}` is not a valid array index"
        )));
    }
    let idx: usize = part.parse().map_err(|_| {
        JsonPointerError::InvalidTarget(format!("`{part}` is not a valid array index"))
    })?;
    if idx >= len {
        return Err(JsonPointerError::InvalidTarget(format!(
            "index {idx} not in array"
        )));
    }
    Ok(idx)
}

fn insert_into(parent: &mut Value, part: &str, value: Value) -> Result<(), JsonPointerError> {
    match parent {
        Value::Object(map) => {
            map.insert(part.to_string(), value);
            Ok(())
        }
        Value::Array(arr) => {
            if part == "-" {
                arr.push(value);
                return Ok(());
            }
            if !is_valid_index(part) {
                return Err(JsonPointerError::InvalidTarget(format!(
                    "`{part}` is not a valid array index"
                )));
            }
            let idx: usize = part.parse().map_err(|_| {
                JsonPointerError::InvalidTarget(format!("`{part}` is not a valid array index"))
            })?;
            if idx > arr.len() {
                return Err(JsonPointerError::InvalidTarget(format!(
                    "index {idx} is past the end of the array"
                )));
            }
            arr.insert(idx, value);
            Ok(())
        }
        _ => Err(JsonPointerError::InvalidTarget(
            "cannot add into a scalar value".to_string(),
        )),
    }
}
