//! Field deserializers that never fail on a mistyped value.
//!
//! A schema field of the wrong shape (`required: true` on a property, a
//! numeric `description`, `allOf: {}`) reads as the field's default so the
//! rest of the schema, and the rest of the document, still resolves.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Deserialize `T`, or fall back to `T::default()` when the value does not fit.
pub(crate) fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_yaml_ng::Value::deserialize(deserializer)?;
    match serde_yaml_ng::from_value(value) {
        Ok(parsed) => Ok(parsed),
        Err(err) => {
            log::debug!("ignoring mistyped schema field: {}", err);
            Ok(T::default())
        }
    }
}
