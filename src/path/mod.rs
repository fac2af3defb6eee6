//! This module contains all of the logic for paths.
//!
//! A path identifies a nested location inside a [`Value`]. In string form it
//! uses `.` as the segment separator, with `\.` escaping a literal dot inside
//! a segment:
//!
//! | path       | segments        |
//! |------------|-----------------|
//! | `foo.bar`  | `foo`, `bar`    |
//! | `foo\.bar` | `foo.bar`       |
//! | `a..b`     | `a`, ``, `b`    |
//!
//! A backslash not followed by a dot is ordinary segment text. Escape
//! handling is a single left-to-right scan, so there is no placeholder token
//! that adversarial input could collide with.
//!
//! Pre-split forms (slices of strings, or an [`OwnedPath`]) bypass escape
//! handling entirely; their segments are taken verbatim. That is the way to
//! address a key whose text would otherwise need escaping.
//!
//! The [`Path`] trait is the polymorphic path argument accepted by the
//! [`reader`](crate::reader) functions. It is also implemented for `&Value`,
//! for paths that arrive as data rather than as Rust literals; that impl is
//! the one place path validation can fail at runtime.

use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use snafu::Snafu;

use crate::value::{KeyString, Value};

/// Error for path arguments that are not string-shaped.
#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
pub enum PathError {
    /// The path was neither a string nor a sequence of strings.
    #[snafu(display("Path must be a string or an array of strings"))]
    NotStrings {
        /// Kind label of the offending value.
        kind: &'static str,
    },
}

/// A pre-parsed lookup path.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct OwnedPath {
    pub segments: Vec<KeyString>,
}

impl OwnedPath {
    /// The empty path, which resolves to the subject itself.
    pub fn root() -> Self {
        vec![].into()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn single_field(field: &str) -> Self {
        vec![KeyString::from(field)].into()
    }

    pub fn push_field(&mut self, field: &str) {
        self.segments.push(field.into());
    }

    pub fn with_field_appended(&self, field: &str) -> Self {
        let mut new_path = self.clone();
        new_path.push_field(field);
        new_path
    }
}

/// Parse a path from its string form, honoring `\.` escapes.
///
/// Parsing is total: every string is a valid path. The empty string is a
/// single empty segment, not the root path.
pub fn parse_path(raw: &str) -> OwnedPath {
    let mut segments = Vec::new();
    let mut segment = String::new();
    let mut chars = raw.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'.') => {
                chars.next();
                segment.push('.');
            }
            '.' => segments.push(KeyString::from(std::mem::take(&mut segment))),
            other => segment.push(other),
        }
    }
    segments.push(KeyString::from(segment));

    OwnedPath { segments }
}

impl From<Vec<KeyString>> for OwnedPath {
    fn from(segments: Vec<KeyString>) -> Self {
        Self { segments }
    }
}

impl From<String> for OwnedPath {
    fn from(raw: String) -> Self {
        parse_path(&raw)
    }
}

impl FromStr for OwnedPath {
    type Err = Infallible;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Ok(parse_path(raw))
    }
}

impl From<OwnedPath> for String {
    fn from(path: OwnedPath) -> Self {
        Self::from(&path)
    }
}

impl From<&OwnedPath> for String {
    fn from(path: &OwnedPath) -> Self {
        let mut output = String::new();
        for (i, segment) in path.segments.iter().enumerate() {
            if i != 0 {
                output.push('.');
            }
            serialize_segment(&mut output, segment);
        }
        output
    }
}

// Literal dots are written back as `\.`; everything else, backslashes
// included, passes through untouched. A segment ending in a backslash cannot
// be represented unambiguously and will not survive a reparse.
fn serialize_segment(output: &mut String, segment: &str) {
    for c in segment.chars() {
        if c == '.' {
            output.push('\\');
        }
        output.push(c);
    }
}

impl Display for OwnedPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", String::from(self))
    }
}

/// A path argument: anything the reader can turn into an ordered list of
/// segments.
pub trait Path {
    /// The path's segments, in traversal order.
    ///
    /// # Errors
    ///
    /// Fails when a dynamic path (`&Value`) is not a string or an array of
    /// strings. The statically string-shaped impls never fail.
    fn into_segments(self) -> Result<Vec<KeyString>, PathError>;
}

impl Path for &str {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        Ok(parse_path(self).segments)
    }
}

impl Path for &String {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        self.as_str().into_segments()
    }
}

impl Path for OwnedPath {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        Ok(self.segments)
    }
}

impl Path for &OwnedPath {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        Ok(self.segments.clone())
    }
}

impl Path for &[&str] {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        Ok(self.iter().copied().map(KeyString::from).collect())
    }
}

impl Path for &[String] {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        Ok(self.iter().map(|s| KeyString::from(s.as_str())).collect())
    }
}

impl Path for &[KeyString] {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        Ok(self.to_vec())
    }
}

impl<const N: usize> Path for &[&str; N] {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        self.as_slice().into_segments()
    }
}

impl Path for &Value {
    fn into_segments(self) -> Result<Vec<KeyString>, PathError> {
        match self {
            Value::String(raw) => raw.as_str().into_segments(),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(segment) => Ok(KeyString::from(segment.as_str())),
                    other => NotStringsSnafu { kind: other.kind() }.fail(),
                })
                .collect(),
            other => NotStringsSnafu { kind: other.kind() }.fail(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn segments(path: &OwnedPath) -> Vec<&str> {
        path.segments.iter().map(KeyString::as_str).collect()
    }

    #[test]
    fn parse_cases() {
        let cases: &[(&str, &[&str])] = &[
            ("", &[""]),
            ("f", &["f"]),
            ("foo", &["foo"]),
            ("foo.bar", &["foo", "bar"]),
            ("foo.bar.baz", &["foo", "bar", "baz"]),
            // escaped dot stays inside the segment
            (r"foo\.bar", &["foo.bar"]),
            (r"a\.b.c", &["a.b", "c"]),
            (r"a.b\.c", &["a", "b.c"]),
            (r"\.", &["."]),
            // empty segments are preserved
            ("a..b", &["a", "", "b"]),
            (".a", &["", "a"]),
            ("a.", &["a", ""]),
            // a backslash not followed by a dot is plain text
            (r"a\b", &[r"a\b"]),
            (r"a\", &[r"a\"]),
            // leftmost backslash-dot pair wins
            (r"a\\.b", &[r"a\.b"]),
        ];

        for (raw, expected) in cases {
            let parsed = parse_path(raw);
            assert_eq!(&segments(&parsed), expected, "parsing {raw:?}");
        }
    }

    #[test]
    fn display_escapes_literal_dots() {
        let path = OwnedPath::from(vec![KeyString::from("a.b"), KeyString::from("c")]);
        assert_eq!(path.to_string(), r"a\.b.c");
        assert_eq!(parse_path(&path.to_string()), path);
    }

    #[test]
    fn from_str_is_total() {
        let path: OwnedPath = r"ec2.metadata.availability\.zone".parse().unwrap();
        assert_eq!(
            segments(&path),
            vec!["ec2", "metadata", "availability.zone"]
        );
    }

    #[test]
    fn value_paths() {
        let path = Value::from("a.b");
        assert_eq!(
            path.into_segments().unwrap(),
            vec![KeyString::from("a"), KeyString::from("b")]
        );

        // pre-split array values bypass escaping
        let path = Value::Array(vec![Value::from("a.b")]);
        assert_eq!(path.into_segments().unwrap(), vec![KeyString::from("a.b")]);

        for bad in [Value::Integer(33), Value::Float(33.0), Value::Boolean(true)] {
            assert_eq!(
                bad.into_segments(),
                Err(PathError::NotStrings { kind: bad.kind() })
            );
        }

        let mixed = Value::Array(vec![Value::from("ok"), Value::Integer(1)]);
        assert_eq!(
            mixed.into_segments(),
            Err(PathError::NotStrings { kind: "integer" })
        );
    }

    #[test]
    fn serde_uses_string_form() {
        let path = parse_path(r"a\.b.c");
        let json = serde_json::to_string(&path).unwrap();
        assert_eq!(json, r#""a\\.b.c""#);
        let back: OwnedPath = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
    }

    fn reparse_thing(path: &OwnedPath) {
        let text = path.to_string();
        let reparsed = parse_path(&text);
        assert_eq!(&reparsed, path, "via {text:?}");
    }

    proptest::proptest! {
        #[test]
        fn reparses_segment_sets(raw in proptest::collection::vec(r"[a-z.\\]{0,6}", 1..5)) {
            // a trailing backslash would merge with the following separator
            proptest::prop_assume!(raw.iter().all(|s| !s.ends_with('\\')));

            let path = OwnedPath::from(
                raw.iter().map(|s| KeyString::from(s.as_str())).collect::<Vec<_>>(),
            );
            reparse_thing(&path);
        }
    }
}
