// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Self-describing commands and their JSON guides

use crate::error::CodecError;
use crate::json::to_indented;
use serde::Serialize;
use serde_json::{Map, Value};

/// One documented argument of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Argument {
    pub name: &'static str,
    pub description: &'static str,
    /// Rust type shown in place of an empty description
    pub type_name: &'static str,
}

impl Argument {
    pub fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            type_name: "",
        }
    }

    pub fn typed<T: ?Sized>(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            type_name: std::any::type_name::<T>(),
        }
    }

    fn guide_text(&self) -> String {
        if self.description.is_empty() {
            format!("<{}>", self.type_name)
        } else {
            self.description.to_string()
        }
    }
}

/// Implemented by commands that can explain themselves to a caller
pub trait Describe {
    fn description() -> &'static str;

    fn type_name() -> &'static str {
        let full = std::any::type_name::<Self>();
        let base = full.split('<').next().unwrap_or(full);
        base.rsplit("::").next().unwrap_or(base)
    }

    fn arguments() -> Vec<Argument> {
        Vec::new()
    }
}

/// Everything a guide shows about one command type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Descriptor {
    pub type_name: &'static str,
    pub description: &'static str,
    pub arguments: Vec<Argument>,
}

impl Descriptor {
    pub fn of<T: Describe>() -> Self {
        Self {
            type_name: T::type_name(),
            description: T::description(),
            arguments: T::arguments(),
        }
    }

    /// `{type, description, arguments}` as indented JSON
    ///
    /// `arguments` is omitted when the command declares none.
    pub fn guide(&self) -> Result<String, CodecError> {
        let mut root = Map::new();
        root.insert("type".into(), Value::from(self.type_name));
        root.insert("description".into(), Value::from(self.description));
        if !self.arguments.is_empty() {
            let arguments: Map<String, Value> = self
                .arguments
                .iter()
                .map(|a| (a.name.to_string(), Value::from(a.guide_text())))
                .collect();
            root.insert("arguments".into(), Value::Object(arguments));
        }
        to_indented(&root)
    }
}

/// Guide for a single command type
pub fn guide<T: Describe>() -> Result<String, CodecError> {
    Descriptor::of::<T>().guide()
}

/// Described command types, looked up by type name
#[derive(Debug, Default)]
pub struct CommandRegistry {
    entries: Vec<Descriptor>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `T`, replacing an earlier entry with the same name
    pub fn register<T: Describe>(&mut self) -> &mut Self {
        let descriptor = Descriptor::of::<T>();
        match self
            .entries
            .iter_mut()
            .find(|d| d.type_name == descriptor.type_name)
        {
            Some(existing) => *existing = descriptor,
            None => self.entries.push(descriptor),
        }
        self
    }

    pub fn get(&self, name: &str) -> Result<&Descriptor, CodecError> {
        self.entries
            .iter()
            .find(|d| d.type_name == name)
            .ok_or_else(|| CodecError::UnknownCommand(name.to_string()))
    }

    pub fn guide(&self, name: &str) -> Result<String, CodecError> {
        self.get(name)?.guide()
    }

    /// Registered names in registration order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|d| d.type_name).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "describe_tests.rs"]
mod tests;
