//! In-memory implementation of LinkStore for testing and development

use crate::core::error::StorageError;
use crate::core::link::{LinkName, LinkRow};
use crate::core::service::LinkStore;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

type Tables = HashMap<LinkName, IndexMap<String, LinkRow>>;

/// In-memory link store
///
/// One ordered map per link table, behind a single RwLock.
#[derive(Clone, Default)]
pub struct InMemoryLinkStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryLinkStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, StorageError> {
        self.tables
            .read()
            .map_err(|e| StorageError::LockPoisoned(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, StorageError> {
        self.tables
            .write()
            .map_err(|e| StorageError::LockPoisoned(format!("Failed to acquire write lock: {}", e)))
    }
}

fn insert_row(table: &mut IndexMap<String, LinkRow>, row: LinkRow) -> Result<LinkRow, StorageError> {
    if table.contains_key(&row.id) {
        return Err(StorageError::OperationFailed {
            operation: "insert".to_string(),
            message: format!("row '{}' already exists in '{}'", row.id, row.link),
        });
    }

    table.insert(row.id.clone(), row.clone());
    Ok(row)
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn insert(&self, row: LinkRow) -> Result<LinkRow, StorageError> {
        let mut tables = self.write()?;
        insert_row(tables.entry(row.link).or_default(), row)
    }

    async fn insert_unique(
        &self,
        row: LinkRow,
        unique_keys: &[&str],
    ) -> Result<LinkRow, StorageError> {
        let mut tables = self.write()?;
        let table = tables.entry(row.link).or_default();

        let existing = table.values().find(|stored| {
            unique_keys
                .iter()
                .all(|key| stored.key(key).is_some() && stored.key(key) == row.key(key))
        });
        if let Some(existing) = existing {
            return Ok(existing.clone());
        }

        insert_row(table, row)
    }

    async fn get(&self, link: LinkName, id: &str) -> Result<Option<LinkRow>, StorageError> {
        let tables = self.read()?;
        Ok(tables.get(&link).and_then(|table| table.get(id)).cloned())
    }

    async fn list(&self, link: LinkName) -> Result<Vec<LinkRow>, StorageError> {
        let tables = self.read()?;
        Ok(tables
            .get(&link)
            .map(|table| table.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_key(
        &self,
        link: LinkName,
        foreign_key: &str,
        entity_id: &str,
    ) -> Result<Vec<LinkRow>, StorageError> {
        let tables = self.read()?;
        Ok(tables
            .get(&link)
            .map(|table| {
                table
                    .values()
                    .filter(|row| row.key(foreign_key) == Some(entity_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete(&self, link: LinkName, id: &str) -> Result<Option<LinkRow>, StorageError> {
        let mut tables = self.write()?;
        Ok(tables
            .get_mut(&link)
            .and_then(|table| table.shift_remove(id)))
    }

    async fn delete_by_key(
        &self,
        link: LinkName,
        foreign_key: &str,
        entity_id: &str,
    ) -> Result<Vec<LinkRow>, StorageError> {
        let mut tables = self.write()?;
        let Some(table) = tables.get_mut(&link) else {
            return Ok(Vec::new());
        };

        let mut removed = Vec::new();
        table.retain(|_, row| {
            if row.key(foreign_key) == Some(entity_id) {
                removed.push(row.clone());
                false
            } else {
                true
            }
        });

        Ok(removed)
    }
}
