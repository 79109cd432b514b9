// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON conversion and pointer lookups

use crate::error::CodecError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Pretty-printed JSON for any serializable value
///
/// Field naming is the type's own; derive with
/// `#[serde(rename_all = "snake_case")]` for snake_case keys.
pub fn stringify<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Parse JSON into `T`. Unknown fields are ignored unless `T` denies them.
pub fn parse<T: DeserializeOwned>(json: &str) -> Result<T, CodecError> {
    Ok(serde_json::from_str(json)?)
}

/// Text of the node at a JSON pointer (`/a/0/b`)
///
/// Strings come back unquoted, numbers and booleans as their literal text.
/// A missing node, `null`, or a container yields an empty string.
pub fn value_at_path(pointer: &str, json: &str) -> Result<String, CodecError> {
    let root: Value = serde_json::from_str(json)?;
    let text = match root.pointer(pointer) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null | Value::Array(_) | Value::Object(_)) | None => String::new(),
    };
    Ok(text)
}

/// Render with four-space indentation, the layout used for guides
pub(crate) fn to_indented<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let mut out = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    // serde_json only writes valid UTF-8
    Ok(String::from_utf8_lossy(&out).into_owned())
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
