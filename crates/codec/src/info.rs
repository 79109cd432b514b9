// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fixed-key reports filled in by commands as they learn values

use crate::error::CodecError;
use crate::json::to_indented;
use serde_json::{Map, Value};

/// An ordered set of keys declared up front, each filled at most once per write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoStack {
    entries: Vec<(String, Option<String>)>,
}

impl InfoStack {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            entries: keys.into_iter().map(|k| (k.into(), None)).collect(),
        }
    }

    /// Set the value of a declared key
    pub fn fulfill_key(
        &mut self,
        key: &str,
        value: impl Into<String>,
    ) -> Result<(), CodecError> {
        let slot = self
            .entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .ok_or_else(|| CodecError::UnknownKey(key.to_string()))?;
        slot.1 = Some(value.into());
        Ok(())
    }

    /// Fill every unset or empty key with `value`
    pub fn fulfill_empty(&mut self, value: &str) {
        for (_, slot) in &mut self.entries {
            if slot.as_deref().map_or(true, str::is_empty) {
                *slot = Some(value.to_string());
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.as_deref())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Keys in declaration order; unset keys render as `null`
    pub fn to_json(&self) -> Result<String, CodecError> {
        let map: Map<String, Value> = self
            .entries
            .iter()
            .map(|(k, v)| (k.clone(), v.clone().map_or(Value::Null, Value::from)))
            .collect();
        to_indented(&map)
    }
}

#[cfg(test)]
#[path = "info_tests.rs"]
mod tests;
