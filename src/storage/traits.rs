/// Key under which the session identity snapshot is persisted.
pub const SESSION_KEY: &str = "revisitUser";
/// Key under which the category collection snapshot is persisted.
pub const CATEGORIES_KEY: &str = "revisitCategories";

/// Host key-value storage holding complete serialized snapshots.
///
/// Every write replaces the whole value under a key; there are no partial
/// updates.
pub trait Storage {
    fn load(&self, key: &str) -> anyhow::Result<Option<String>>;
    fn save(&self, key: &str, value: &str) -> anyhow::Result<()>;
    fn remove(&self, key: &str) -> anyhow::Result<()>;
}
