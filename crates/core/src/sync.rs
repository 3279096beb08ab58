//! Rename propagation rules.
//!
//! Catalog records reference master data by name, not id. This module
//! decides which record fields carry which kind of name and how a single
//! record is rewritten. The store-facing scan lives in `mediadex-db`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::master_data::MasterDataType;
use crate::token_list::rewrite_token_field;

/// JSON key stamped on every rewritten catalog record.
pub const UPDATED_AT_FIELD: &str = "updatedAt";

// ---------------------------------------------------------------------------
// Sync report
// ---------------------------------------------------------------------------

/// Number of denormalized records rewritten by one propagation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncReport {
    pub records_updated: u64,
    pub secondary_records_updated: u64,
}

impl SyncReport {
    pub fn is_empty(&self) -> bool {
        self.records_updated == 0 && self.secondary_records_updated == 0
    }
}

// ---------------------------------------------------------------------------
// Propagation kinds and fields
// ---------------------------------------------------------------------------

/// Master data kinds whose names are denormalized into catalog records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropagationKind {
    Actor,
    Actress,
    Director,
    Tag,
    Type,
}

/// How a denormalized field stores names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    /// One name, replaced on exact equality.
    Scalar,
    /// Comma-joined [`TokenList`](crate::token_list::TokenList).
    TokenList,
}

/// A name-bearing field on a catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DenormalizedField {
    pub key: &'static str,
    pub shape: FieldShape,
}

const fn scalar(key: &'static str) -> DenormalizedField {
    DenormalizedField {
        key,
        shape: FieldShape::Scalar,
    }
}

const fn list(key: &'static str) -> DenormalizedField {
    DenormalizedField {
        key,
        shape: FieldShape::TokenList,
    }
}

impl PropagationKind {
    /// The propagation path triggered by renaming an item of `kind`, if any.
    pub fn for_master_type(kind: MasterDataType) -> Option<Self> {
        match kind {
            MasterDataType::Actor => Some(Self::Actor),
            MasterDataType::Actress => Some(Self::Actress),
            MasterDataType::Director => Some(Self::Director),
            MasterDataType::Tag => Some(Self::Tag),
            MasterDataType::Type => Some(Self::Type),
            _ => None,
        }
    }

    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match MasterDataType::from_str_value(s).ok().and_then(Self::for_master_type) {
            Some(kind) => Ok(kind),
            None => Err(format!(
                "Invalid propagation kind '{s}'. Must be one of: actor, actress, director, tag, type"
            )),
        }
    }

    /// Fields rewritten on primary catalog records.
    pub fn primary_fields(self) -> &'static [DenormalizedField] {
        const DIRECTOR: &[DenormalizedField] = &[scalar("director")];
        const ACTRESS: &[DenormalizedField] = &[list("actress")];
        const ACTORS: &[DenormalizedField] = &[list("actors")];
        const TAGS: &[DenormalizedField] = &[list("tags")];
        const TYPE: &[DenormalizedField] = &[list("type")];
        match self {
            Self::Director => DIRECTOR,
            Self::Actress => ACTRESS,
            Self::Actor => ACTORS,
            Self::Tag => TAGS,
            Self::Type => TYPE,
        }
    }

    /// Fields rewritten on secondary catalog records.
    pub fn secondary_fields(self) -> &'static [DenormalizedField] {
        const CAST: &[DenormalizedField] = &[list("cast")];
        const TAGS: &[DenormalizedField] = &[list("tags")];
        const TYPE: &[DenormalizedField] = &[list("type")];
        match self {
            Self::Actor | Self::Actress | Self::Director => CAST,
            Self::Tag => TAGS,
            Self::Type => TYPE,
        }
    }
}

// ---------------------------------------------------------------------------
// Record rewriting
// ---------------------------------------------------------------------------

/// Rewrite one field value. Returns the new text only if it changed.
pub fn rewrite_field(raw: &str, shape: FieldShape, old: &str, new: &str) -> Option<String> {
    match shape {
        FieldShape::Scalar => (raw == old && old != new).then(|| new.to_string()),
        FieldShape::TokenList => rewrite_token_field(raw, old, new),
    }
}

/// Rewrite the given fields of a catalog record in place.
///
/// Non-string and missing fields are left alone, as are all fields not
/// listed. Returns whether anything changed; the caller stamps
/// [`UPDATED_AT_FIELD`] and persists only in that case.
pub fn rewrite_record(
    record: &mut Map<String, Value>,
    fields: &[DenormalizedField],
    old: &str,
    new: &str,
) -> bool {
    let mut changed = false;
    for field in fields {
        let Some(Value::String(raw)) = record.get(field.key) else {
            continue;
        };
        if let Some(rewritten) = rewrite_field(raw, field.shape, old, new) {
            record.insert(field.key.to_string(), Value::String(rewritten));
            changed = true;
        }
    }
    changed
}
