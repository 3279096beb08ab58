use crate::types::ItemId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: ItemId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A case/whitespace-insensitive name collision inside the duplicate scope.
    #[error("Duplicate name: {entity} '{name}' already exists")]
    DuplicateName {
        entity: &'static str,
        name: String,
        existing_id: ItemId,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}
