//! Lossy casts applied by the typed accessors after a value has passed its
//! pre-cast test (or a default has passed validation). String-to-number
//! coercion reads an optional leading numeric prefix and yields zero when
//! there is none, so these casts are total.

use super::Value;

impl Value {
    /// Numeric cast to an integer. Floats truncate toward zero; strings are
    /// read by prefix (`"12px"` is 12, `"px"` is 0).
    pub fn coerce_integer(&self) -> i64 {
        match self {
            Value::Integer(v) => *v,
            Value::Float(v) => *v as i64,
            Value::Boolean(v) => i64::from(*v),
            Value::String(s) => leading_integer(s),
            _ => 0,
        }
    }

    /// Numeric cast to a float.
    pub fn coerce_float(&self) -> f64 {
        match self {
            Value::Integer(v) => *v as f64,
            Value::Float(v) => *v,
            Value::Boolean(v) => {
                if *v {
                    1.0
                } else {
                    0.0
                }
            }
            Value::String(s) => leading_float(s),
            _ => 0.0,
        }
    }

    /// Truthiness cast. Null, zero, the empty string, `"0"`, and empty
    /// plain containers are false; everything else, trait-backed containers
    /// included, is true.
    pub fn coerce_boolean(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Boolean(v) => *v,
            Value::Integer(v) => *v != 0,
            Value::Float(v) => *v != 0.0,
            Value::String(s) => !s.is_empty() && s != "0",
            Value::Array(items) => !items.is_empty(),
            Value::Object(map) => !map.is_empty(),
            Value::Indexed(_) | Value::Record(_) => true,
        }
    }

    /// String cast for scalars. Numbers render via `Display`, booleans as
    /// `"true"` / `"false"`. Non-scalars render empty.
    pub fn coerce_string(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Integer(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Boolean(v) => v.to_string(),
            _ => String::new(),
        }
    }

    /// Container cast. Plain containers pass through, null becomes the empty
    /// array, and anything else is wrapped as a one-element array.
    pub fn coerce_array(self) -> Value {
        match self {
            Value::Array(_) | Value::Object(_) => self,
            Value::Null => Value::Array(vec![]),
            other => Value::Array(vec![other]),
        }
    }
}

fn leading_integer(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, s.strip_prefix('+').unwrap_or(s)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end].parse::<i64>().map_or(0, |v| sign * v)
}

fn leading_float(s: &str) -> f64 {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let mut digits = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        digits += 1;
    }

    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > i + 1 {
            digits += j - i - 1;
            i = j;
        } else if digits > 0 {
            // "1." is a valid prefix, "." alone is not
            i += 1;
        }
    }

    if digits == 0 {
        return 0.0;
    }

    let mut end = i;
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exponent_digits = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exponent_digits {
            end = j;
        }
    }

    s[..end].parse().unwrap_or(0.0)
}
