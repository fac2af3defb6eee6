//! Path-based reads over [`Value`] subjects.
//!
//! Every function here resolves a path against a subject and applies a
//! defaulting policy to the outcome:
//!
//! 1. Resolve the path. A found value that passes the accessor's pre-cast
//!    test is coerced and returned; the default is never even validated.
//! 2. Otherwise (not found, or found but the wrong shape), the default is
//!    validated against the accessor's required type and returned.
//!
//! Resolution distinguishes presence from value identity: a stored null is
//! found, and only a genuinely absent (or shape-rejected) value falls back
//! to the default.
//!
//! ```
//! use deepread::{get_integer, value};
//!
//! let subject = value!({"retries": [1, 2]});
//!
//! // an array is not scalar, so the integer accessor falls back
//! assert_eq!(get_integer(&subject, "retries", 7)?, 7);
//! # Ok::<(), deepread::ReadError>(())
//! ```

use snafu::{ensure, Snafu};

use crate::path::{Path, PathError};
use crate::value::Value;

/// Error for misuse of the reading API.
///
/// Absent values and shape mismatches are not errors; they produce the
/// caller's default. These conditions are raised synchronously, before or
/// instead of a result, and nothing is retried.
#[derive(Debug, PartialEq, Snafu)]
pub enum ReadError {
    /// The root subject was not a readable container shape.
    #[snafu(display("Subject must be an array or object"))]
    UnreadableSubject {
        /// Kind label of the rejected subject.
        kind: &'static str,
    },

    /// The path argument was malformed.
    #[snafu(context(false), display("{source}"))]
    Path {
        /// The underlying path validation failure.
        source: PathError,
    },

    /// A default was needed but failed the accessor's type test.
    #[snafu(display("Invalid default supplied to {accessor}"))]
    InvalidDefault {
        /// Name of the accessor the default was supplied to.
        accessor: &'static str,
    },
}

/// Whether this reader can read the given value: true for the four container
/// shapes, false for scalars and null.
pub fn is_readable(value: &Value) -> bool {
    matches!(
        value,
        Value::Array(_) | Value::Object(_) | Value::Indexed(_) | Value::Record(_)
    )
}

/// Get the nested value. The default is returned if the path does not
/// resolve.
///
/// # Errors
///
/// Fails if the subject is not readable or the path is malformed.
pub fn get(
    subject: &Value,
    path: impl Path,
    default: impl Into<Value>,
) -> Result<Value, ReadError> {
    get_with_policy(subject, path, default.into(), None, None)
}

/// Get the nested value as an integer. The default is returned if the path
/// does not resolve or the value is not scalar.
///
/// # Errors
///
/// Fails if the subject is not readable, the path is malformed, or the
/// default is needed and is not an integer.
pub fn get_integer(
    subject: &Value,
    path: impl Path,
    default: impl Into<Value>,
) -> Result<i64, ReadError> {
    get_with_policy(
        subject,
        path,
        default.into(),
        Some(Value::is_scalar),
        Some(("get_integer", Value::is_integer)),
    )
    .map(|value| value.coerce_integer())
}

/// Get the nested value as a float. The default is returned if the path does
/// not resolve or the value is not scalar.
///
/// # Errors
///
/// Fails if the subject is not readable, the path is malformed, or the
/// default is needed and is not a float.
pub fn get_float(
    subject: &Value,
    path: impl Path,
    default: impl Into<Value>,
) -> Result<f64, ReadError> {
    get_with_policy(
        subject,
        path,
        default.into(),
        Some(Value::is_scalar),
        Some(("get_float", Value::is_float)),
    )
    .map(|value| value.coerce_float())
}

/// Get the nested value as a boolean. The default is returned if the path
/// does not resolve; a found value of any shape is accepted and cast by
/// truthiness.
///
/// # Errors
///
/// Fails if the subject is not readable, the path is malformed, or the
/// default is needed and is not a boolean.
pub fn get_boolean(
    subject: &Value,
    path: impl Path,
    default: impl Into<Value>,
) -> Result<bool, ReadError> {
    get_with_policy(
        subject,
        path,
        default.into(),
        None,
        Some(("get_boolean", Value::is_boolean)),
    )
    .map(|value| value.coerce_boolean())
}

/// Get the nested value as a string. The default is returned if the path
/// does not resolve or the value is not scalar.
///
/// # Errors
///
/// Fails if the subject is not readable, the path is malformed, or the
/// default is needed and is not a string.
pub fn get_string(
    subject: &Value,
    path: impl Path,
    default: impl Into<Value>,
) -> Result<String, ReadError> {
    get_with_policy(
        subject,
        path,
        default.into(),
        Some(Value::is_scalar),
        Some(("get_string", Value::is_string)),
    )
    .map(|value| value.coerce_string())
}

/// Get the nested value as a container. The default is returned if the path
/// does not resolve or the value is not a plain container; either way the
/// result is container-cast, so a scalar default comes back as a one-element
/// array.
///
/// # Errors
///
/// Fails if the subject is not readable or the path is malformed. Any
/// default is acceptable.
pub fn get_array(
    subject: &Value,
    path: impl Path,
    default: impl Into<Value>,
) -> Result<Value, ReadError> {
    get_with_policy(subject, path, default.into(), Some(Value::is_container), None)
        .map(Value::coerce_array)
}

/// Determine if the subject contains a value at the given path. A stored
/// null counts as present.
///
/// # Errors
///
/// Fails if the subject is not readable or the path is malformed.
pub fn has(subject: &Value, path: impl Path) -> Result<bool, ReadError> {
    search(subject, path).map(|found| found.is_some())
}

fn get_with_policy(
    subject: &Value,
    path: impl Path,
    default: Value,
    value_test: Option<fn(&Value) -> bool>,
    default_test: Option<(&'static str, fn(&Value) -> bool)>,
) -> Result<Value, ReadError> {
    if let Some(value) = search(subject, path)? {
        let accepted = match value_test {
            Some(test) => test(value),
            None => true,
        };
        if accepted {
            return Ok(value.clone());
        }
    }

    if let Some((accessor, test)) = default_test {
        ensure!(test(&default), InvalidDefaultSnafu { accessor });
    }

    Ok(default)
}

/// The resolution walk. Each node is classified by its variant and the next
/// segment is looked up under that shape's own existence semantics; a miss
/// at any depth resolves the whole search to `None`.
fn search<'a>(subject: &'a Value, path: impl Path) -> Result<Option<&'a Value>, ReadError> {
    ensure!(
        is_readable(subject),
        UnreadableSubjectSnafu {
            kind: subject.kind()
        }
    );

    let segments = path.into_segments()?;

    let mut node = subject;
    for segment in &segments {
        node = match node {
            Value::Object(map) => match map.get(segment.as_str()) {
                Some(value) => value,
                None => return Ok(None),
            },
            Value::Array(items) => {
                match parse_index(segment).and_then(|index| items.get(index)) {
                    Some(value) => value,
                    None => return Ok(None),
                }
            }
            Value::Indexed(container) => {
                if !container.offset_exists(segment) {
                    return Ok(None);
                }
                match container.offset_get(segment) {
                    Some(value) => value,
                    // the container contradicted its own existence check
                    None => return Ok(None),
                }
            }
            Value::Record(record) => match record.property(segment) {
                Some(value) => value,
                None => return Ok(None),
            },
            // Scalars and null cannot be descended into; the path has
            // overrun a leaf.
            _ => return Ok(None),
        };
    }

    Ok(Some(node))
}

// Canonical decimal only: "07", "+1", and "1e2" address keys, not elements.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.is_empty() || (segment.len() > 1 && segment.starts_with('0')) {
        return None;
    }
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}
