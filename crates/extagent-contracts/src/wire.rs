//! Serde helpers shared by the wire types.

use serde::{Deserialize, Deserializer};

/// Deserialize `T`, reading an explicit JSON `null` as `T::default()`.
///
/// Pair with `#[serde(default)]` so absent and null fields decode alike.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
