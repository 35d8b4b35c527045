//! Table metadata registry

use crate::{TableIdentifier, TableIdentity};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

/// Registered table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescriptor {
    pub identity: TableIdentity,
    /// Canonical identifier; absent while the table is not fully created
    pub identifier: Option<TableIdentifier>,
}

impl TableDescriptor {
    pub fn new(identifier: TableIdentifier) -> Self {
        Self {
            identity: identifier.identity(),
            identifier: Some(identifier),
        }
    }

    /// Descriptor with no identifier assigned yet
    pub fn pending(identity: TableIdentity) -> Self {
        Self {
            identity,
            identifier: None,
        }
    }

    pub fn table_key(&self) -> String {
        self.identity.table_key()
    }
}

/// Lookup of registered tables by table key
pub trait MetadataRegistry {
    fn lookup(&self, table_key: &str) -> Option<Arc<TableDescriptor>>;
}

/// In-memory metadata registry
#[derive(Debug, Default)]
pub struct TableRegistry {
    tables: RwLock<HashMap<String, Arc<TableDescriptor>>>,
}

impl TableRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a table, replacing any entry under the same key
    pub fn register(&self, descriptor: TableDescriptor) -> Arc<TableDescriptor> {
        let key = descriptor.table_key();
        let descriptor = Arc::new(descriptor);
        self.tables.write().insert(key.clone(), descriptor.clone());
        info!("Registered table: {}", key);
        descriptor
    }

    /// Remove a table
    pub fn remove(&self, table_key: &str) -> Option<Arc<TableDescriptor>> {
        let removed = self.tables.write().remove(table_key);
        if removed.is_some() {
            info!("Removed table: {}", table_key);
        }
        removed
    }

    /// List all table keys
    pub fn table_keys(&self) -> Vec<String> {
        self.tables.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.tables.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.read().is_empty()
    }
}

impl MetadataRegistry for TableRegistry {
    fn lookup(&self, table_key: &str) -> Option<Arc<TableDescriptor>> {
        self.tables.read().get(table_key).cloned()
    }
}
