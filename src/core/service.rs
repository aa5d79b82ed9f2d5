//! Storage trait for association rows

use crate::core::error::StorageError;
use crate::core::link::{LinkName, LinkRow};
use async_trait::async_trait;

/// Storage for the rows of every link's join table
///
/// Implementations know nothing about link definitions: they store rows
/// keyed by link name and filter on foreign key columns. Validation and
/// cascade rules live in [`LinkRuntime`](crate::links::service::LinkRuntime).
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Insert a new row
    async fn insert(&self, row: LinkRow) -> Result<LinkRow, StorageError>;

    /// Get a row by id
    async fn get(&self, link: LinkName, id: &str) -> Result<Option<LinkRow>, StorageError>;

    /// List all rows of a link, in insertion order
    async fn list(&self, link: LinkName) -> Result<Vec<LinkRow>, StorageError>;

    /// Rows whose `foreign_key` column equals `entity_id`
    async fn find_by_key(
        &self,
        link: LinkName,
        foreign_key: &str,
        entity_id: &str,
    ) -> Result<Vec<LinkRow>, StorageError>;

    /// Insert `row` unless a row of the same link already holds its values
    /// for every column in `unique_keys`
    ///
    /// Returns the existing row on a match, otherwise the inserted one. The
    /// lookup and the insert happen as one step for the link's table.
    async fn insert_unique(
        &self,
        row: LinkRow,
        unique_keys: &[&str],
    ) -> Result<LinkRow, StorageError>;

    /// Delete one row, returning it if it existed
    async fn delete(&self, link: LinkName, id: &str) -> Result<Option<LinkRow>, StorageError>;

    /// Delete every row whose `foreign_key` column equals `entity_id`
    ///
    /// The scan and removal happen as one step for the link's table.
    async fn delete_by_key(
        &self,
        link: LinkName,
        foreign_key: &str,
        entity_id: &str,
    ) -> Result<Vec<LinkRow>, StorageError>;
}
