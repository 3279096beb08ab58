//! Master data types, identity and duplicate-scope rules.
//!
//! Every master data item belongs to exactly one [`MasterDataType`]; the type
//! selects the key partition, the identifying field(s), and whether name
//! uniqueness is narrowed to a parent id.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const TYPE_ACTOR: &str = "actor";
pub const TYPE_ACTRESS: &str = "actress";
pub const TYPE_DIRECTOR: &str = "director";
pub const TYPE_SERIES: &str = "series";
pub const TYPE_STUDIO: &str = "studio";
pub const TYPE_LABEL: &str = "label";
pub const TYPE_TAG: &str = "tag";
pub const TYPE_TYPE: &str = "type";
pub const TYPE_GROUP: &str = "group";
pub const TYPE_GENERATION: &str = "generation";
pub const TYPE_LINEUP: &str = "lineup";

/// All valid master data type strings, in display order.
pub const VALID_TYPES: &[&str] = &[
    TYPE_ACTOR,
    TYPE_ACTRESS,
    TYPE_DIRECTOR,
    TYPE_SERIES,
    TYPE_STUDIO,
    TYPE_LABEL,
    TYPE_TAG,
    TYPE_TYPE,
    TYPE_GROUP,
    TYPE_GENERATION,
    TYPE_LINEUP,
];

// ---------------------------------------------------------------------------
// MasterDataType
// ---------------------------------------------------------------------------

/// The eleven managed master data variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasterDataType {
    Actor,
    Actress,
    Director,
    Series,
    Studio,
    Label,
    Tag,
    Type,
    Group,
    Generation,
    Lineup,
}

/// The parent reference that narrows a type's duplicate scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentScope {
    Group,
    Generation,
}

impl ParentScope {
    /// JSON field carrying the parent id.
    pub fn field_name(self) -> &'static str {
        match self {
            Self::Group => "groupId",
            Self::Generation => "generationId",
        }
    }
}

impl MasterDataType {
    /// Parse a type from its path/storage string.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            TYPE_ACTOR => Ok(Self::Actor),
            TYPE_ACTRESS => Ok(Self::Actress),
            TYPE_DIRECTOR => Ok(Self::Director),
            TYPE_SERIES => Ok(Self::Series),
            TYPE_STUDIO => Ok(Self::Studio),
            TYPE_LABEL => Ok(Self::Label),
            TYPE_TAG => Ok(Self::Tag),
            TYPE_TYPE => Ok(Self::Type),
            TYPE_GROUP => Ok(Self::Group),
            TYPE_GENERATION => Ok(Self::Generation),
            TYPE_LINEUP => Ok(Self::Lineup),
            _ => Err(format!(
                "Invalid master data type '{s}'. Must be one of: {}",
                VALID_TYPES.join(", ")
            )),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Actor => TYPE_ACTOR,
            Self::Actress => TYPE_ACTRESS,
            Self::Director => TYPE_DIRECTOR,
            Self::Series => TYPE_SERIES,
            Self::Studio => TYPE_STUDIO,
            Self::Label => TYPE_LABEL,
            Self::Tag => TYPE_TAG,
            Self::Type => TYPE_TYPE,
            Self::Group => TYPE_GROUP,
            Self::Generation => TYPE_GENERATION,
            Self::Lineup => TYPE_LINEUP,
        }
    }

    /// Human-readable entity label used in error messages.
    pub fn entity_label(self) -> &'static str {
        match self {
            Self::Actor => "Actor",
            Self::Actress => "Actress",
            Self::Director => "Director",
            Self::Series => "Series",
            Self::Studio => "Studio",
            Self::Label => "Label",
            Self::Tag => "Tag",
            Self::Type => "Type",
            Self::Group => "Group",
            Self::Generation => "Generation",
            Self::Lineup => "Lineup",
        }
    }

    /// Parent reference narrowing uniqueness, if any.
    pub fn parent_scope(self) -> Option<ParentScope> {
        match self {
            Self::Generation => Some(ParentScope::Group),
            Self::Lineup => Some(ParentScope::Generation),
            _ => None,
        }
    }

    /// Whether the type is identified by the dual `titleEn`/`titleJp` pair.
    pub fn has_dual_titles(self) -> bool {
        matches!(self, Self::Series)
    }
}

impl std::fmt::Display for MasterDataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Per-type field sets
// ---------------------------------------------------------------------------

/// Editable fields of a master data item. Which ones a type accepts is
/// given by [`MasterDataType::fields`]; anything else in a payload is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Name,
    TitleEn,
    TitleJp,
    KanjiName,
    Alias,
    Birthdate,
    ProfileImage,
    Website,
    Description,
    GroupId,
    GenerationId,
}

impl MasterDataType {
    pub fn fields(self) -> &'static [ItemField] {
        use ItemField::*;
        match self {
            Self::Actor | Self::Actress | Self::Director => &[
                Name,
                KanjiName,
                Alias,
                Birthdate,
                ProfileImage,
                Description,
            ],
            Self::Series => &[TitleEn, TitleJp, Description],
            Self::Studio | Self::Label => &[Name, Website, Description],
            Self::Tag | Self::Type => &[Name, Description],
            Self::Group => &[Name, KanjiName, Website, ProfileImage, Description],
            Self::Generation => &[Name, GroupId, Description],
            Self::Lineup => &[Name, GenerationId, GroupId, Description],
        }
    }

    pub fn accepts(self, field: ItemField) -> bool {
        self.fields().contains(&field)
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Normalize a name for duplicate comparison.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// The identifying name(s) of an item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Name(String),
    Titles {
        en: Option<String>,
        jp: Option<String>,
    },
}

impl Identity {
    /// True when no usable identifying name is present.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Name(name) => name.trim().is_empty(),
            Self::Titles { en, jp } => {
                en.as_deref().map_or(true, |t| t.trim().is_empty())
                    && jp.as_deref().map_or(true, |t| t.trim().is_empty())
            }
        }
    }

    /// Normalized, non-empty comparison keys.
    pub fn normalized_keys(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Self::Name(name) => vec![name.as_str()],
            Self::Titles { en, jp } => [en.as_deref(), jp.as_deref()]
                .into_iter()
                .flatten()
                .collect(),
        };
        raw.into_iter()
            .map(normalize_name)
            .filter(|k| !k.is_empty())
            .collect()
    }

    /// Two identities collide if any of their normalized keys match.
    ///
    /// For series this means either title colliding with either title.
    pub fn collides_with(&self, other: &Identity) -> bool {
        let theirs = other.normalized_keys();
        self.normalized_keys().iter().any(|k| theirs.contains(k))
    }

    /// Display form used in error messages.
    pub fn display(&self) -> String {
        match self {
            Self::Name(name) => name.trim().to_string(),
            Self::Titles { en, jp } => [en.as_deref(), jp.as_deref()]
                .into_iter()
                .flatten()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" / "),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
