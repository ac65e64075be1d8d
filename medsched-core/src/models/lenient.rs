//! Deserializers for stored fields that older documents may hold as `null`.

use serde::{Deserialize, Deserializer};

/// Reads a string field, treating `null` like `""`.
pub fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
