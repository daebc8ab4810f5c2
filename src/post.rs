//! The document model: content plus a metadata mapping
//!
//! A [`Post`] pairs the body text of a document with the mapping decoded from
//! its front matter. It optionally remembers the handler that parsed it; the
//! reference is advisory and only used as the default format when the post is
//! serialized again. Swapping or clearing the handler never touches content
//! or metadata.

use std::fmt;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::{Mapping, Value};

use crate::error::{Result, missing_key};
use crate::handler::Handler;

/// A parsed document: content text, metadata mapping, and an optional
/// remembered handler for round-tripping.
#[derive(Clone)]
pub struct Post {
    /// Body text with the front matter block removed. Line endings are
    /// normalized to LF and outer whitespace trimmed by the parse pipeline.
    pub content: String,

    /// Front matter metadata. Keys are unique; values are whatever the
    /// source format supports (scalars, sequences, nested mappings).
    pub metadata: Mapping,

    /// Handler that parsed this post, or one set by the caller. Used as the
    /// default for serialization; `None` falls back to YAML.
    pub handler: Option<Arc<dyn Handler>>,
}

impl Post {
    /// Create a post with content and no metadata.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            metadata: Mapping::new(),
            handler: None,
        }
    }

    /// Create a post from content and a metadata mapping.
    pub fn with_metadata(content: impl Into<String>, metadata: Mapping) -> Self {
        Self {
            content: content.into(),
            metadata,
            handler: None,
        }
    }

    /// Get a metadata value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Get a metadata value by key, falling back to a default.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.metadata.get(key).unwrap_or(default)
    }

    /// Get a metadata value by key, erroring when absent.
    pub fn require(&self, key: &str) -> Result<&Value> {
        self.metadata.get(key).ok_or_else(|| missing_key(key))
    }

    /// Set a metadata key, returning the previous value if any.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.metadata.insert(Value::String(key.into()), value.into())
    }

    /// Remove a metadata key, erroring when absent.
    pub fn remove(&mut self, key: &str) -> Result<Value> {
        self.metadata.remove(key).ok_or_else(|| missing_key(key))
    }

    /// Whether a metadata key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.metadata.contains_key(key)
    }

    /// Iterate metadata keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.metadata.keys()
    }
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}

impl fmt::Debug for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Post")
            .field("content", &self.content)
            .field("metadata", &self.metadata)
            .field("handler", &self.handler.as_ref().map(|h| h.name()))
            .finish()
    }
}

/// Serializes as a single flat map: every metadata entry plus a `content`
/// key holding the body text.
impl Serialize for Post {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.metadata.len() + 1))?;
        for (key, value) in &self.metadata {
            map.serialize_entry(key, value)?;
        }
        map.serialize_entry("content", &self.content)?;
        map.end()
    }
}
