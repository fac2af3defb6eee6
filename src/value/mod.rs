//! The `value` module contains the [`Value`] tagged union that subjects are
//! built from, along with its key type, capability traits, conversions, and
//! the coercions backing the typed accessors.

mod coerce;
mod convert;
mod keystring;
mod record;

use std::collections::BTreeMap;

pub use self::keystring::KeyString;
pub use self::record::{IndexAccess, Record};

/// The type of [`Value::Object`] maps.
pub type ObjectMap = BTreeMap<KeyString, Value>;

/// A node in a subject tree.
///
/// Four variants are readable containers: [`Object`](Value::Object) (string
/// keys), [`Array`](Value::Array) (integer keys), and the trait-backed
/// [`Indexed`](Value::Indexed) and [`Record`](Value::Record) shapes. The
/// rest are leaves; a path that tries to descend into a leaf resolves to
/// not-found rather than an error.
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Array(Vec<Value>),
    Object(ObjectMap),
    /// A caller-defined container read through [`IndexAccess`].
    Indexed(Box<dyn IndexAccess>),
    /// A caller-defined object read through [`Record`].
    Record(Box<dyn Record>),
}

impl Value {
    /// A type-tag label for error and debug messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Indexed(_) => "indexed container",
            Value::Record(_) => "record",
        }
    }

    /// Box a [`Record`] implementation into a value.
    pub fn record(record: impl Record + 'static) -> Self {
        Value::Record(Box::new(record))
    }

    /// Box an [`IndexAccess`] implementation into a value.
    pub fn indexed(container: impl IndexAccess + 'static) -> Self {
        Value::Indexed(Box::new(container))
    }

    /// True for the leaf data variants: boolean, integer, float, string.
    /// Null is not a scalar.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Boolean(_) | Value::Integer(_) | Value::Float(_) | Value::String(_)
        )
    }

    /// True for the plain-data containers: array and object. Trait-backed
    /// containers are not plain data and do not count.
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Array(_) | Value::Object(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_float(&self) -> bool {
        matches!(self, Value::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => {
                let names = a.property_names();
                names == b.property_names()
                    && names.iter().all(|name| a.property(name) == b.property(name))
            }
            // Indexed containers expose no enumeration protocol, so their
            // contents cannot be compared.
            _ => false,
        }
    }
}

/// A macro to easily generate Values
///
/// ```
/// use deepread::value;
///
/// let subject = value!({"enabled": true, "retries": [1, 2, 3]});
/// assert_eq!(subject.kind(), "object");
/// ```
#[macro_export]
macro_rules! value {
    ([]) => ({
        $crate::value::Value::Array(vec![])
    });

    ([$($v:tt),+ $(,)?]) => ({
        let vec: Vec<$crate::value::Value> = vec![$($crate::value!($v)),+];
        $crate::value::Value::Array(vec)
    });

    ({}) => ({
        $crate::value::Value::Object(::std::collections::BTreeMap::default())
    });

    ({$($($k1:literal)? $($k2:ident)?: $v:tt),+ $(,)?}) => ({
        let map = vec![$(($crate::value::KeyString::from($($k1)? $(stringify!($k2))?), $crate::value!($v))),+]
            .into_iter()
            .collect::<::std::collections::BTreeMap<_, $crate::value::Value>>();

        $crate::value::Value::Object(map)
    });

    (null) => ({
        $crate::value::Value::Null
    });

    ($k:expr) => ({
        $crate::value::Value::from($k)
    });
}
