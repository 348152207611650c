use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::errors::CoreError;

use super::traits::{Collection, Record};

/// A model type stored as records of one collection.
pub trait Entity: Serialize + DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> Uuid;
}

/// Serialize an entity into a flat record.
pub fn to_record<T: Serialize>(entity: &T) -> Result<Record, CoreError> {
    match serde_json::to_value(entity)? {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::Serialization(format!(
            "Expected an object, got {other}"
        ))),
    }
}

/// Deserialize a record into an entity. Null fields count as missing so
/// optional columns left blank still decode.
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, CoreError> {
    let cleaned: Record = record.into_iter().filter(|(_, v)| !v.is_null()).collect();
    serde_json::from_value(Value::Object(cleaned))
        .map_err(|e| CoreError::Deserialization(e.to_string()))
}

/// Decode every record of a collection, skipping rows that do not match
/// the entity's shape (hand-edited sheets often contain some).
pub fn decode_all<T: Entity>(records: Vec<Record>) -> Vec<T> {
    let mut entities = Vec::with_capacity(records.len());
    for (idx, record) in records.into_iter().enumerate() {
        match from_record::<T>(record) {
            Ok(entity) => entities.push(entity),
            Err(e) => log::warn!("Skipping malformed {} record #{idx}: {e}", T::COLLECTION),
        }
    }
    entities
}

/// The `id` of a record as a string, whether stored as text or number.
pub fn record_id(record: &Record) -> Option<String> {
    match record.get("id")? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Overwrite `target`'s fields with `fields`. The `id` is never changed.
pub fn merge_fields(target: &mut Record, fields: Record) {
    for (key, value) in fields {
        if key != "id" {
            target.insert(key, value);
        }
    }
}

/// Build a partial record from `(field, value)` pairs.
pub fn fields<I, K>(pairs: I) -> Record
where
    I: IntoIterator<Item = (K, Value)>,
    K: Into<String>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v)).collect()
}
