//! Tri-state field updates for partial `PUT` payloads.
//!
//! A field missing from the payload keeps its stored value, an explicit
//! `null` clears it, and any other value overwrites it. Declare patch fields
//! with `#[serde(default)]` so that a missing key deserializes to
//! [`FieldPatch::Keep`].

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    #[default]
    Keep,
    Clear,
    Set(T),
}

impl<T> FieldPatch<T> {
    /// Apply the patch to a stored optional value.
    pub fn apply_to(self, current: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *current = None,
            Self::Set(value) => *current = Some(value),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for FieldPatch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Self::Set(value),
            None => Self::Clear,
        })
    }
}
