//! Link runtime: association row lifecycle and navigation
//!
//! The runtime is the consumer of compiled link definitions. It creates and
//! dismisses association rows, applies cascade rules when an endpoint entity
//! is deleted, and answers reverse-navigation queries from either endpoint.

use crate::core::error::{LinkError, LinkResult};
use crate::core::link::{LinkName, LinkRow};
use crate::core::module::ModuleName;
use crate::core::service::LinkStore;
use crate::links::compiler::{CompiledLink, NavigationTarget};
use crate::links::registry::LinkRegistry;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Rows removed by the cascade of one entity deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeReport {
    pub module: ModuleName,
    pub entity_id: String,
    /// link -> deleted row ids
    pub deleted: IndexMap<LinkName, Vec<String>>,
}

impl CascadeReport {
    /// Total number of rows deleted
    pub fn deleted_count(&self) -> usize {
        self.deleted.values().map(Vec::len).sum()
    }
}

/// Result of navigating a reverse relationship
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Navigation {
    /// Association rows (relationship alias)
    Rows(Vec<LinkRow>),
    /// A single association row, for non-list relationships
    Row(Option<LinkRow>),
    /// Entity ids on the other endpoint (field alias)
    Ids(Vec<String>),
    /// A single entity id on the other endpoint, for non-list relationships
    Id(Option<String>),
}

/// Runtime over a registry and a row store
#[derive(Clone)]
pub struct LinkRuntime {
    registry: Arc<LinkRegistry>,
    store: Arc<dyn LinkStore>,
}

impl LinkRuntime {
    pub fn new(registry: Arc<LinkRegistry>, store: Arc<dyn LinkStore>) -> Self {
        Self { registry, store }
    }

    pub fn registry(&self) -> &LinkRegistry {
        &self.registry
    }

    /// Resolve a link by alias or service name
    pub fn link(&self, name: &str) -> LinkResult<&CompiledLink> {
        self.registry.resolve_alias(name).ok_or_else(|| {
            LinkError::UnknownLink {
                name: name.to_string(),
            }
            .into()
        })
    }

    /// Create an association row between two entities
    ///
    /// `entities` maps each endpoint module to the id of its entity. If a
    /// row already links the same pair, it is returned unchanged.
    pub async fn create(
        &self,
        link: &str,
        entities: &IndexMap<ModuleName, String>,
    ) -> LinkResult<LinkRow> {
        let compiled = self.link(link)?;

        if let Some(module) = entities
            .keys()
            .find(|module| compiled.endpoint(**module).is_none())
        {
            return Err(LinkError::NotAnEndpoint {
                link: compiled.name(),
                module: *module,
            }
            .into());
        }

        let mut keys = IndexMap::new();
        for endpoint in &compiled.endpoints {
            let id = entities
                .get(&endpoint.module)
                .filter(|id| !id.is_empty())
                .ok_or(LinkError::MissingEndpoint {
                    link: compiled.name(),
                    module: endpoint.module,
                })?;
            keys.insert(endpoint.foreign_key.clone(), id.clone());
        }

        let unique_keys = [
            compiled.endpoints[0].foreign_key.as_str(),
            compiled.endpoints[1].foreign_key.as_str(),
        ];
        let candidate = LinkRow::new(compiled.name(), &compiled.schema.id_prefix, keys);
        let candidate_id = candidate.id.clone();
        let row = self.store.insert_unique(candidate, &unique_keys).await?;

        if row.id == candidate_id {
            tracing::debug!(link = %compiled.name(), id = %row.id, "Created link row");
        } else {
            tracing::debug!(link = %compiled.name(), id = %row.id, "Link row already exists");
        }
        Ok(row)
    }

    /// Get one row by id
    pub async fn get(&self, link: &str, row_id: &str) -> LinkResult<LinkRow> {
        let compiled = self.link(link)?;
        self.store
            .get(compiled.name(), row_id)
            .await?
            .ok_or_else(|| {
                LinkError::RowNotFound {
                    link: compiled.name(),
                    id: row_id.to_string(),
                }
                .into()
            })
    }

    /// All rows of a link, by alias or service name
    pub async fn list(&self, link: &str) -> LinkResult<Vec<LinkRow>> {
        let name = self.link(link)?.name();
        self.rows(name).await
    }

    /// All rows of an already resolved link
    pub async fn rows(&self, link: LinkName) -> LinkResult<Vec<LinkRow>> {
        Ok(self.store.list(link).await?)
    }

    /// Remove one association row; neither endpoint entity is affected
    pub async fn dismiss(&self, link: &str, row_id: &str) -> LinkResult<LinkRow> {
        let compiled = self.link(link)?;
        let removed = self
            .store
            .delete(compiled.name(), row_id)
            .await?
            .ok_or_else(|| LinkError::RowNotFound {
                link: compiled.name(),
                id: row_id.to_string(),
            })?;

        tracing::debug!(link = %compiled.name(), id = %row_id, "Dismissed link row");
        Ok(removed)
    }

    /// Apply cascade rules for a deleted entity
    ///
    /// Rows are removed only from links where `module` is the
    /// cascade-flagged endpoint. Rows of every other link are kept. Each
    /// link's rows are removed in one store operation; links are processed
    /// in registration order and a failure stops the remaining links.
    pub async fn on_entity_deleted(
        &self,
        module: ModuleName,
        entity_id: &str,
    ) -> LinkResult<CascadeReport> {
        let mut report = CascadeReport {
            module,
            entity_id: entity_id.to_string(),
            deleted: IndexMap::new(),
        };

        let rules = self
            .registry
            .links()
            .flat_map(|compiled| compiled.cascades.iter())
            .filter(|rule| rule.module == module);

        for rule in rules {
            let removed = self
                .store
                .delete_by_key(rule.link, &rule.foreign_key, entity_id)
                .await?;

            tracing::info!(
                link = %rule.link,
                module = %module,
                entity_id = %entity_id,
                deleted = removed.len(),
                "Cascaded entity deletion to link rows"
            );
            report
                .deleted
                .insert(rule.link, removed.into_iter().map(|row| row.id).collect());
        }

        Ok(report)
    }

    /// Navigate a field added to `module` by a link
    pub async fn navigate(
        &self,
        module: ModuleName,
        entity_id: &str,
        field: &str,
    ) -> LinkResult<Navigation> {
        let (compiled, nav) =
            self.registry
                .resolve_field(module, field)
                .ok_or_else(|| LinkError::UnknownField {
                    module,
                    field: field.to_string(),
                })?;

        let rows = self
            .store
            .find_by_key(compiled.name(), &nav.local_key, entity_id)
            .await?;
        tracing::debug!(
            link = %compiled.name(),
            module = %module,
            field = %field,
            rows = rows.len(),
            "Resolved navigation"
        );

        let navigation = match (&nav.target, nav.is_list) {
            (NavigationTarget::Rows, true) => Navigation::Rows(rows),
            (NavigationTarget::Rows, false) => Navigation::Row(rows.into_iter().next()),
            (NavigationTarget::Endpoint { foreign_key, .. }, is_list) => {
                let mut ids = rows
                    .iter()
                    .filter_map(|row| row.key(foreign_key).map(str::to_string));
                if is_list {
                    Navigation::Ids(ids.collect())
                } else {
                    Navigation::Id(ids.next())
                }
            }
        };

        Ok(navigation)
    }
}
