//! Shape checks for the status endpoint's response body.
//!
//! Everything past this module works on [`StatusPage`]; raw JSON never leaves
//! here.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, WatchError};
use crate::types::{StatusEntry, StatusPage};

pub const ENTRIES_FIELD: &str = "homeworks";
pub const CURSOR_FIELD: &str = "current_date";

/// Validate a decoded body and turn it into a [`StatusPage`].
///
/// Fails with [`WatchError::Schema`] when the body is not an object, when the
/// entries field is absent or not a list, when a list element is not an entry
/// record, or when the cursor field holds something other than an integer.
/// Status codes are not interpreted here.
pub fn validate(body: &Value) -> Result<StatusPage> {
    let record = body.as_object().ok_or_else(|| {
        WatchError::Schema(format!("expected an object, got {}", json_kind(body)))
    })?;

    let list = record
        .get(ENTRIES_FIELD)
        .ok_or_else(|| WatchError::Schema(format!("missing field '{ENTRIES_FIELD}'")))?;

    let items = list.as_array().ok_or_else(|| {
        WatchError::Schema(format!(
            "field '{ENTRIES_FIELD}' should be a list, got {}",
            json_kind(list)
        ))
    })?;

    let entries = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            StatusEntry::deserialize(item)
                .map_err(|e| WatchError::Schema(format!("{ENTRIES_FIELD}[{i}]: {e}")))
        })
        .collect::<Result<Vec<_>>>()?;

    let next_cursor = match record.get(CURSOR_FIELD) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_i64().ok_or_else(|| {
            WatchError::Schema(format!(
                "field '{CURSOR_FIELD}' should be an integer, got {}",
                json_kind(value)
            ))
        })?),
    };

    Ok(StatusPage {
        entries,
        next_cursor,
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
