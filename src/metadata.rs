//! Entity metadata input model
//!
//! The schema-loading collaborator hands over a JSON document of the shape
//!
//! ```json
//! { "apps": { "<identifier>": { "app_id": "...", "name": "...", "controls": { ... } } } }
//! ```
//!
//! Both `apps` and `controls` are ordered maps: declaration order is display
//! order and must survive parsing, so they deserialize into `IndexMap`.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default `fulltype` for fields that do not declare one
pub const DEFAULT_FULLTYPE: &str = "string/text";

/// The full metadata set for one generation run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppMetadata {
    /// identifier -> entity, in declaration order
    #[serde(default)]
    pub apps: IndexMap<String, EntityMetadata>,
}

/// One schema-declared record type
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityMetadata {
    /// Globally unique external identity, only used to resolve references
    #[serde(default)]
    pub app_id: String,

    /// Human display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// field key -> descriptor, in display order
    #[serde(default)]
    pub controls: IndexMap<String, FieldDescriptor>,
}

/// Declared semantic type and display metadata for one field
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default = "default_fulltype")]
    pub fulltype: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default)]
    pub required: bool,

    /// Hint that this field is a good row label
    #[serde(default)]
    pub in_list: bool,

    /// Stored value -> display value, for `lookup/select`
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub lookup_data: IndexMap<String, serde_json::Value>,

    /// URL whose last path segment is the target `app_id`, for `applookup/*`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_app: Option<String>,
}

fn default_fulltype() -> String {
    DEFAULT_FULLTYPE.to_string()
}

impl AppMetadata {
    /// Parse a metadata document
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a metadata document from disk
    pub fn from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn get(&self, identifier: &str) -> Option<&EntityMetadata> {
        self.apps.get(identifier)
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.apps.contains_key(identifier)
    }

    /// Identifiers in declaration order
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.apps.keys().map(String::as_str)
    }

    /// All human-facing text (entity names and field labels)
    pub fn display_texts(&self) -> Vec<&str> {
        let mut texts = Vec::new();
        for entity in self.apps.values() {
            texts.push(entity.name.as_deref().unwrap_or(""));
            for field in entity.controls.values() {
                texts.push(field.label.as_deref().unwrap_or(""));
            }
        }
        texts
    }
}

impl EntityMetadata {
    /// Display label, falling back to the supplied type name
    pub fn label_or<'a>(&'a self, type_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(type_name)
    }
}

impl FieldDescriptor {
    /// Display label, falling back to the field key
    pub fn label_or<'a>(&'a self, key: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(key)
    }

    /// Choice options as (stored value, display text) pairs
    pub fn choices(&self) -> impl Iterator<Item = (&str, String)> {
        self.lookup_data.iter().map(|(value, display)| {
            let text = match display {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (value.as_str(), text)
        })
    }
}
