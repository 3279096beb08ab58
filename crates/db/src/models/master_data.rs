//! Master data item model and DTOs.

use mediadex_core::master_data::{Identity, ItemField, MasterDataType, ParentScope};
use mediadex_core::patch::FieldPatch;
use mediadex_core::token_list::TokenList;
use mediadex_core::types::{ItemId, Timestamp};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Stored item
// ---------------------------------------------------------------------------

/// One master data item as stored under `master:{type}:{id}`.
///
/// Fields a type does not accept stay `None` and are omitted from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterDataItem {
    pub id: ItemId,
    #[serde(rename = "type")]
    pub kind: MasterDataType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_en: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title_jp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kanji_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<TokenList>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation_id: Option<ItemId>,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<Timestamp>,
}

impl MasterDataItem {
    pub fn identity(&self) -> Identity {
        if self.kind.has_dual_titles() {
            Identity::Titles {
                en: self.title_en.clone(),
                jp: self.title_jp.clone(),
            }
        } else {
            Identity::Name(self.name.clone().unwrap_or_default())
        }
    }

    /// Parent id for the given scope (`groupId` or `generationId`).
    pub fn parent_id(&self, scope: ParentScope) -> Option<&str> {
        match scope {
            ParentScope::Group => self.group_id.as_deref(),
            ParentScope::Generation => self.generation_id.as_deref(),
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Create payload. Fields the target type does not accept are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMasterData {
    pub name: Option<String>,
    pub title_en: Option<String>,
    pub title_jp: Option<String>,
    pub kanji_name: Option<String>,
    pub alias: Option<TokenList>,
    pub birthdate: Option<String>,
    pub profile_image: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub group_id: Option<ItemId>,
    pub generation_id: Option<ItemId>,
}

impl CreateMasterData {
    /// Build a stored item of `kind`, keeping only accepted fields and
    /// trimming the identifying name(s).
    pub fn into_item(self, kind: MasterDataType, id: ItemId, now: Timestamp) -> MasterDataItem {
        let keep = |field: ItemField, value: Option<String>| {
            if kind.accepts(field) {
                value
            } else {
                None
            }
        };
        MasterDataItem {
            id,
            kind,
            name: keep(ItemField::Name, self.name.map(|n| n.trim().to_string())),
            title_en: keep(ItemField::TitleEn, self.title_en.map(|t| t.trim().to_string())),
            title_jp: keep(ItemField::TitleJp, self.title_jp.map(|t| t.trim().to_string())),
            kanji_name: keep(ItemField::KanjiName, self.kanji_name),
            alias: self.alias.filter(|_| kind.accepts(ItemField::Alias)),
            birthdate: keep(ItemField::Birthdate, self.birthdate),
            profile_image: keep(ItemField::ProfileImage, self.profile_image),
            website: keep(ItemField::Website, self.website),
            description: keep(ItemField::Description, self.description),
            group_id: keep(ItemField::GroupId, self.group_id),
            generation_id: keep(ItemField::GenerationId, self.generation_id),
            created_at: now,
            updated_at: None,
        }
    }
}

/// Partial update payload.
///
/// A missing key keeps the stored value, `null` clears it, anything else
/// overwrites it. Fields the item's type does not accept are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMasterData {
    #[serde(default)]
    pub name: FieldPatch<String>,
    #[serde(default)]
    pub title_en: FieldPatch<String>,
    #[serde(default)]
    pub title_jp: FieldPatch<String>,
    #[serde(default)]
    pub kanji_name: FieldPatch<String>,
    #[serde(default)]
    pub alias: FieldPatch<TokenList>,
    #[serde(default)]
    pub birthdate: FieldPatch<String>,
    #[serde(default)]
    pub profile_image: FieldPatch<String>,
    #[serde(default)]
    pub website: FieldPatch<String>,
    #[serde(default)]
    pub description: FieldPatch<String>,
    #[serde(default)]
    pub group_id: FieldPatch<ItemId>,
    #[serde(default)]
    pub generation_id: FieldPatch<ItemId>,
}

impl UpdateMasterData {
    /// Shorthand for a rename-only payload.
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: FieldPatch::Set(name.into()),
            ..Self::default()
        }
    }

    /// Merge into `item`, touching only fields its type accepts.
    pub fn apply_to(self, item: &mut MasterDataItem) {
        let kind = item.kind;
        let trimmed = |p: FieldPatch<String>| match p {
            FieldPatch::Set(v) => FieldPatch::Set(v.trim().to_string()),
            other => other,
        };
        let patches: [(ItemField, FieldPatch<String>, &mut Option<String>); 10] = [
            (ItemField::Name, trimmed(self.name), &mut item.name),
            (ItemField::TitleEn, trimmed(self.title_en), &mut item.title_en),
            (ItemField::TitleJp, trimmed(self.title_jp), &mut item.title_jp),
            (ItemField::KanjiName, self.kanji_name, &mut item.kanji_name),
            (ItemField::Birthdate, self.birthdate, &mut item.birthdate),
            (ItemField::ProfileImage, self.profile_image, &mut item.profile_image),
            (ItemField::Website, self.website, &mut item.website),
            (ItemField::Description, self.description, &mut item.description),
            (ItemField::GroupId, self.group_id, &mut item.group_id),
            (ItemField::GenerationId, self.generation_id, &mut item.generation_id),
        ];
        for (field, patch, slot) in patches {
            if kind.accepts(field) {
                patch.apply_to(slot);
            }
        }
        if kind.accepts(ItemField::Alias) {
            self.alias.apply_to(&mut item.alias);
        }
    }
}
