//! Capability traits for caller-defined container shapes.
//!
//! The two built-in container variants of [`Value`] cover keyed maps and
//! arrays. Subjects that keep their data behind an accessor protocol instead
//! implement one of these traits and enter the tree boxed, via
//! [`Value::indexed`] or [`Value::record`]. Dispatch during traversal is
//! structural: each node is classified by its variant, so trait-backed
//! containers nest freely inside maps and arrays and vice versa.

use std::fmt::Debug;

use dyn_clone::DynClone;

use super::{KeyString, Value};

/// A container read through an explicit existence check plus an indexed get.
///
/// The existence check is authoritative: a key reported absent terminates
/// traversal as not-found, and `offset_get` is only consulted afterwards.
pub trait IndexAccess: Debug + DynClone {
    /// Whether a value exists at `key`.
    fn offset_exists(&self, key: &str) -> bool;

    /// The value stored at `key`, if any.
    fn offset_get(&self, key: &str) -> Option<&Value>;
}

dyn_clone::clone_trait_object!(IndexAccess);

/// An object exposing named properties.
///
/// Presence is property existence, not value truthiness: a property holding
/// [`Value::Null`] must return `Some(&Value::Null)`.
pub trait Record: Debug + DynClone {
    /// The property named `name`, if the object has one.
    fn property(&self, name: &str) -> Option<&Value>;

    /// All property names, used for equality checks and debugging.
    fn property_names(&self) -> Vec<KeyString>;

    /// Whether a property named `name` exists.
    fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }
}

dyn_clone::clone_trait_object!(Record);
