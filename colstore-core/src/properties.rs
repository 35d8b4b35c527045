//! Runtime properties
//!
//! Key/value settings such as per-table store locations. Table store
//! locations are keyed by [`TableIdentity::table_key`](crate::TableIdentity::table_key).

use crate::{ColstoreError, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, trace};

/// Read access to string properties
pub trait PropertyStore {
    /// Value for `key`, or `default` when absent
    fn get_or(&self, key: &str, default: &str) -> String;
}

/// In-memory property store
#[derive(Debug, Default)]
pub struct Properties {
    values: RwLock<HashMap<String, String>>,
}

impl Properties {
    /// Create an empty property store
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a `key=value` properties file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let properties = Self::parse(&content)?;
        info!(
            "Loaded {} properties from {:?}",
            properties.len(),
            path
        );
        Ok(properties)
    }

    /// Parse properties text
    ///
    /// Blank lines and lines starting with `#` or `!` are skipped. Keys and
    /// values are trimmed; a later duplicate key overrides an earlier one.
    pub fn parse(content: &str) -> Result<Self> {
        let mut values = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| {
                ColstoreError::Config(format!("line {}: expected key=value", line_no + 1))
            })?;
            let key = key.trim();
            if key.is_empty() {
                return Err(ColstoreError::Config(format!(
                    "line {}: empty key",
                    line_no + 1
                )));
            }

            values.insert(key.to_string(), value.trim().to_string());
        }

        Ok(Self {
            values: RwLock::new(values),
        })
    }

    /// Set a property, returning the previous value
    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.values.write().insert(key.into(), value.into())
    }

    /// Get a property
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    /// Remove a property
    pub fn remove(&self, key: &str) -> Option<String> {
        self.values.write().remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

impl PropertyStore for Properties {
    fn get_or(&self, key: &str, default: &str) -> String {
        match self.get(key) {
            Some(value) => value,
            None => {
                trace!(key, default, "property not set, using default");
                default.to_string()
            }
        }
    }
}
