//! JSON shape of the `hiring.json` endpoint.

use catalog_core::Record;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{FailureKind, FetchError};

#[derive(Debug, Deserialize)]
struct WireRecord {
    id: i64,
    #[serde(rename = "listId")]
    list_id: i64,
    #[serde(default, deserialize_with = "lenient_name")]
    name: Option<String>,
    price: f64,
    rating: i64,
}

impl From<WireRecord> for Record {
    fn from(wire: WireRecord) -> Self {
        Record::new(wire.id, wire.list_id, wire.name, wire.price, wire.rating)
    }
}

// A name that is not a string is treated as missing; the record is filtered later.
fn lenient_name<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(name) => Ok(Some(name)),
        _ => Ok(None),
    }
}

/// Decodes a response body into records. Anything but an array of records is an error.
pub fn decode_records(body: &[u8]) -> Result<Vec<Record>, FetchError> {
    let wire: Vec<WireRecord> = serde_json::from_slice(body)
        .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
    Ok(wire.into_iter().map(Record::from).collect())
}
