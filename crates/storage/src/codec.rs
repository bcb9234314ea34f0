//! Record body codec.
//!
//! Storage keeps a record's class and fields as opaque bytes. The location
//! and the version counter live next to the bytes, outside the encoding, so
//! an entry whose bytes no longer decode can still be located, versioned and
//! deleted.

use std::collections::BTreeMap;

use orbis_core::{OrbisError, OrbisResult, Record, RecordId, Value};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct BodyRef<'a> {
    class_name: &'a Option<String>,
    fields: &'a BTreeMap<String, Value>,
}

#[derive(Deserialize)]
struct Body {
    class_name: Option<String>,
    fields: BTreeMap<String, Value>,
}

/// Encode the class and fields of a record.
pub fn encode(record: &Record) -> OrbisResult<Vec<u8>> {
    let body = BodyRef {
        class_name: &record.class_name,
        fields: &record.fields,
    };
    serde_json::to_vec(&body)
        .map_err(|e| OrbisError::storage(format!("cannot encode record {}: {}", record.rid, e)))
}

/// Decode stored bytes back into a record placed at `rid` with `version`.
pub fn decode(rid: RecordId, version: u64, bytes: &[u8]) -> OrbisResult<Record> {
    let body: Body = serde_json::from_slice(bytes).map_err(|e| OrbisError::Corruption {
        rid,
        reason: e.to_string(),
    })?;
    Ok(Record {
        rid,
        version,
        class_name: body.class_name,
        fields: body.fields,
    })
}
