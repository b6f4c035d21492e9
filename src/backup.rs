//! Whole-state snapshot and restore.
//!
//! A backup is one JSON object holding every named collection. Restore is a
//! destructive replace: once the document passes validation, each key it
//! carries overwrites the store entry of the same name. The caller is
//! expected to get explicit confirmation before invoking it.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::error::{Error, Result};
use crate::store::{keys, Store};

/// Keys a restore document must carry to be accepted.
const REQUIRED_KEYS: [&str; 4] = [
    keys::INVOICES,
    keys::PRODUCTS,
    keys::CUSTOMERS,
    keys::SELLER,
];

/// All keys a backup exports, with the default written for an absent entry.
fn exported_keys() -> [(&'static str, Value); 7] {
    [
        (keys::INVOICES, json!([])),
        (keys::PRODUCTS, json!([])),
        (keys::CUSTOMERS, json!([])),
        (keys::SELLER, json!({})),
        (keys::BANK_ACCOUNTS, json!([])),
        (keys::INVOICE_HEADER, json!("")),
        (keys::INVOICE_FOOTER, json!("")),
    ]
}

/// Snapshots the full store into a single JSON object. Keys missing from the
/// store are filled with their empty defaults; this never fails.
pub fn backup(store: &dyn Store) -> Value {
    let mut doc = Map::new();
    for (key, default) in exported_keys() {
        doc.insert(key.to_string(), store.get(key).unwrap_or(default));
    }
    Value::Object(doc)
}

/// Suggested file name for a backup taken on `date`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("faktor-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Validates `text` and replaces the store's state with it. The document must
/// be a JSON object carrying at least {invoices, products, customers, seller};
/// anything less is rejected before a single key is written, so a failed
/// restore leaves the store exactly as it was. Keys beyond the known set are
/// stored verbatim, not filtered.
pub fn restore(text: &str, store: &mut dyn Store) -> Result<()> {
    let doc: Value = serde_json::from_str(text)
        .map_err(|e| Error::InvalidBackup(format!("not valid JSON: {e}")))?;

    let object = doc
        .as_object()
        .ok_or_else(|| Error::InvalidBackup("top level must be an object".into()))?;

    for key in REQUIRED_KEYS {
        if !object.contains_key(key) {
            return Err(Error::InvalidBackup(format!("missing required key: {key}")));
        }
    }

    for (key, value) in object {
        store.set(key, value.clone())?;
    }
    Ok(())
}
