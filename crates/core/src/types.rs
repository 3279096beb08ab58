/// Master data ids are opaque strings (UUIDv7 for items created here).
pub type ItemId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Generate a fresh item id.
pub fn new_item_id() -> ItemId {
    uuid::Uuid::now_v7().to_string()
}
