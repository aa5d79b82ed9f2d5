//! Load-time compilation of link definitions
//!
//! [`compile`] validates one [`LinkDefinition`] against the modules
//! registered in this process and turns it into a [`CompiledLink`]: the join
//! table schema, the two endpoints, the cascade rules and the reverse
//! navigations each endpoint module gains. Validation is a single pass and
//! the first violation is returned.

use crate::core::error::ConfigError;
use crate::core::link::{LinkDefinition, LinkName};
use crate::core::module::ModuleName;
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// Name of the identifier column on every join table
pub const ID_COLUMN: &str = "id";

/// Column types used by join tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: String,
    pub column_type: ColumnType,
    pub nullable: bool,
}

impl ColumnDef {
    fn text(name: &str) -> Self {
        Self {
            name: name.to_string(),
            column_type: ColumnType::Text,
            nullable: false,
        }
    }

    fn timestamp(name: &str, nullable: bool) -> Self {
        Self {
            name: name.to_string(),
            column_type: ColumnType::Timestamp,
            nullable,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDef {
    pub name: String,
    pub columns: Vec<String>,
}

/// Physical schema of a link's association table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinTableSchema {
    pub table_name: String,
    pub id_prefix: String,
    pub columns: Vec<ColumnDef>,
    pub primary_key: Vec<String>,
    pub indexes: Vec<IndexDef>,
}

/// One side of a compiled link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub module: ModuleName,
    pub primary_key: String,
    pub foreign_key: String,
    pub alias: String,
    pub delete_cascade: bool,
}

/// Rows of `link` are deleted when an entity of `module` is deleted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeRule {
    pub link: LinkName,
    pub module: ModuleName,
    pub foreign_key: String,
}

/// What a reverse navigation field yields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationTarget {
    /// The association rows themselves
    Rows,
    /// Ids of the entities on the other endpoint
    Endpoint {
        module: ModuleName,
        foreign_key: String,
    },
}

/// A field an endpoint module gains through a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReverseNavigation {
    pub module: ModuleName,
    pub field: String,
    pub link: LinkName,
    /// Row column matched against the module entity's id
    pub local_key: String,
    pub is_list: bool,
    pub target: NavigationTarget,
}

/// A validated link, ready to be served
#[derive(Debug, Clone, Serialize)]
pub struct CompiledLink {
    pub definition: Arc<LinkDefinition>,
    pub schema: JoinTableSchema,
    pub endpoints: [Endpoint; 2],
    pub cascades: Vec<CascadeRule>,
    pub navigations: Vec<ReverseNavigation>,
}

impl CompiledLink {
    pub fn name(&self) -> LinkName {
        self.definition.service_name
    }

    /// The endpoint for `module`
    pub fn endpoint(&self, module: ModuleName) -> Option<&Endpoint> {
        self.endpoints.iter().find(|e| e.module == module)
    }

    /// The endpoint opposite to `module`
    pub fn other_endpoint(&self, module: ModuleName) -> Option<&Endpoint> {
        match &self.endpoints {
            [a, b] if a.module == module => Some(b),
            [a, b] if b.module == module => Some(a),
            _ => None,
        }
    }

    /// True if deleting an entity of `module` deletes rows of this link
    pub fn cascades_from(&self, module: ModuleName) -> bool {
        self.cascades.iter().any(|rule| rule.module == module)
    }
}

/// Validate `definition` and compile it
///
/// `modules` is the set of modules registered in this process.
pub fn compile(
    definition: &LinkDefinition,
    modules: &BTreeSet<ModuleName>,
) -> Result<CompiledLink, ConfigError> {
    let link = definition.service_name;

    if !definition.is_link {
        return Err(ConfigError::NotALink { link });
    }

    let db = &definition.database_config;
    if db.table_name.trim().is_empty() {
        return Err(ConfigError::InvalidDatabaseConfig {
            link,
            message: "table_name is empty".to_string(),
        });
    }
    if db.id_prefix.trim().is_empty() {
        return Err(ConfigError::InvalidDatabaseConfig {
            link,
            message: "id_prefix is empty".to_string(),
        });
    }

    let [left, right] = definition.relationships.as_slice() else {
        return Err(ConfigError::RelationshipCount {
            link,
            found: definition.relationships.len(),
        });
    };

    if left.service_name == right.service_name {
        return Err(ConfigError::DuplicateEndpoint {
            link,
            module: left.service_name,
        });
    }

    for rel in [left, right] {
        if !modules.contains(&rel.service_name) {
            return Err(ConfigError::ModuleNotRegistered {
                link,
                module: rel.service_name,
            });
        }
    }

    for key in [ID_COLUMN, left.foreign_key.as_str(), right.foreign_key.as_str()] {
        if !definition.primary_keys.iter().any(|pk| pk == key) {
            return Err(ConfigError::MissingPrimaryKey {
                link,
                key: key.to_string(),
            });
        }
    }

    let mut alias_names = HashSet::new();
    for name in definition.alias_names() {
        if !alias_names.insert(name) {
            return Err(ConfigError::DuplicateAlias {
                alias: name.to_string(),
                first: link,
                second: link,
            });
        }
    }

    let endpoints = [left, right].map(|rel| Endpoint {
        module: rel.service_name,
        primary_key: rel.primary_key.clone(),
        foreign_key: rel.foreign_key.clone(),
        alias: rel.alias.clone(),
        delete_cascade: rel.delete_cascade,
    });

    let navigations = compile_extensions(definition, &endpoints)?;

    let cascades = endpoints
        .iter()
        .filter(|e| e.delete_cascade)
        .map(|e| CascadeRule {
            link,
            module: e.module,
            foreign_key: e.foreign_key.clone(),
        })
        .collect();

    Ok(CompiledLink {
        definition: Arc::new(definition.clone()),
        schema: join_table_schema(definition, &endpoints),
        endpoints,
        cascades,
        navigations,
    })
}

fn compile_extensions(
    definition: &LinkDefinition,
    endpoints: &[Endpoint; 2],
) -> Result<Vec<ReverseNavigation>, ConfigError> {
    let link = definition.service_name;
    let mut navigations: Vec<ReverseNavigation> = Vec::new();

    for ext in &definition.extends {
        let rel = &ext.relationship;

        if rel.service_name != link {
            return Err(ConfigError::AliasAsymmetry {
                link,
                module: ext.service_name,
                found: rel.service_name,
            });
        }

        let (local, other) = match endpoints {
            [a, b] if a.module == ext.service_name => (a, b),
            [a, b] if b.module == ext.service_name => (b, a),
            _ => {
                return Err(ConfigError::ExtensionNotEndpoint {
                    link,
                    module: ext.service_name,
                });
            }
        };

        if rel.primary_key != local.foreign_key {
            return Err(ConfigError::ExtensionKeyMismatch {
                link,
                module: ext.service_name,
                expected: local.foreign_key.clone(),
                found: rel.primary_key.clone(),
            });
        }

        navigations.push(ReverseNavigation {
            module: ext.service_name,
            field: rel.alias.clone(),
            link,
            local_key: local.foreign_key.clone(),
            is_list: rel.is_list,
            target: NavigationTarget::Rows,
        });

        let expected = format!("{}.{}", rel.alias, other.alias);
        for (field, path) in &ext.field_alias {
            if *path != expected {
                return Err(ConfigError::InvalidFieldAlias {
                    link,
                    field: field.clone(),
                    path: path.clone(),
                    expected,
                });
            }

            navigations.push(ReverseNavigation {
                module: ext.service_name,
                field: field.clone(),
                link,
                local_key: local.foreign_key.clone(),
                is_list: rel.is_list,
                target: NavigationTarget::Endpoint {
                    module: other.module,
                    foreign_key: other.foreign_key.clone(),
                },
            });
        }
    }

    let mut seen = HashSet::new();
    for nav in &navigations {
        if !seen.insert((nav.module, nav.field.as_str())) {
            return Err(ConfigError::DuplicateField {
                module: nav.module,
                field: nav.field.clone(),
                first: link,
                second: link,
            });
        }
    }

    Ok(navigations)
}

fn join_table_schema(definition: &LinkDefinition, endpoints: &[Endpoint; 2]) -> JoinTableSchema {
    let db = &definition.database_config;

    let mut columns = vec![ColumnDef::text(ID_COLUMN)];
    columns.extend(endpoints.iter().map(|e| ColumnDef::text(&e.foreign_key)));
    for key in &definition.primary_keys {
        if !columns.iter().any(|c| c.name == *key) {
            columns.push(ColumnDef::text(key));
        }
    }
    columns.push(ColumnDef::timestamp("created_at", false));
    columns.push(ColumnDef::timestamp("updated_at", false));
    columns.push(ColumnDef::timestamp("deleted_at", true));

    let indexes = endpoints
        .iter()
        .map(|e| IndexDef {
            name: format!("IDX_{}_{}", db.table_name, e.foreign_key),
            columns: vec![e.foreign_key.clone()],
        })
        .collect();

    JoinTableSchema {
        table_name: db.table_name.clone(),
        id_prefix: db.id_prefix.clone(),
        columns,
        primary_key: definition.primary_keys.clone(),
        indexes,
    }
}
