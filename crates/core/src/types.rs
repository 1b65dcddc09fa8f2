use serde::{Deserialize, Deserializer};

/// All primary keys are server-assigned PostgreSQL UUIDs.
pub type DbId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Optimistic-lock version column. Starts at 1, incremented once per update.
pub type Version = i32;

/// Deserialize a nullable field so that an absent key and an explicit `null`
/// can be told apart.
///
/// Use together with `#[serde(default)]`:
///
/// - key absent      -> `None`
/// - `"key": null`   -> `Some(None)`
/// - `"key": value`  -> `Some(Some(value))`
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
