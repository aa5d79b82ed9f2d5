//! Link definitions describing relationships between modules
//!
//! A [`LinkDefinition`] is a static, declarative record: it names the two
//! module endpoints of a relationship, the join table that stores the
//! association rows, the aliases under which those rows are queryable, and
//! how each endpoint module can navigate back to the other side.

use crate::core::error::ConfigError;
use crate::core::module::ModuleName;
use crate::core::pluralize::Pluralizer;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Name of a registered link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkName {
    LocationFulfillmentSet,
    ProductVariantInventoryItem,
    SalesChannelLocation,
}

impl LinkName {
    pub const ALL: [LinkName; 3] = [
        LinkName::LocationFulfillmentSet,
        LinkName::ProductVariantInventoryItem,
        LinkName::SalesChannelLocation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkName::LocationFulfillmentSet => "location_fulfillment_set",
            LinkName::ProductVariantInventoryItem => "product_variant_inventory_item",
            LinkName::SalesChannelLocation => "sales_channel_location",
        }
    }
}

impl fmt::Display for LinkName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LinkName::ALL
            .into_iter()
            .find(|link| link.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownLink {
                name: s.to_string(),
            })
    }
}

/// Physical storage naming for the association rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Join table name (e.g. "location_fulfillment_set")
    pub table_name: String,

    /// Prefix of generated row ids (e.g. "locfs" → "locfs_...")
    pub id_prefix: String,
}

/// Arguments bound to a link alias
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasArgs {
    /// Logical entity tag the alias resolves to
    pub entity: String,
}

/// Names under which the link rows can be queried
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAlias {
    /// Singular and plural names
    pub name: Vec<String>,
    pub args: AliasArgs,
}

impl LinkAlias {
    /// Build the singular/plural alias pair for a snake_case name
    ///
    /// Only the last segment is pluralized:
    /// "location_fulfillment_set" → ["location_fulfillment_set", "location_fulfillment_sets"]
    pub fn singular_plural(singular: &str, entity: impl Into<String>) -> Self {
        Self {
            name: vec![singular.to_string(), Pluralizer::pluralize(singular)],
            args: AliasArgs {
                entity: entity.into(),
            },
        }
    }
}

/// One endpoint of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRelationship {
    /// The endpoint module
    pub service_name: ModuleName,

    /// Primary key of the endpoint module's entity
    pub primary_key: String,

    /// Foreign key column stored on the association row
    pub foreign_key: String,

    /// Name used when navigating from a link row to this endpoint
    pub alias: String,

    /// Deleting the referenced entity deletes the association rows
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub delete_cascade: bool,
}

/// Relationship added to an endpoint module to reach the link rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionRelationship {
    /// Must be the link's own service name
    pub service_name: LinkName,

    /// Column on the link row matched against the module's entity id
    pub primary_key: String,

    /// Key on the module's entity (usually "id")
    pub foreign_key: String,

    /// Field name under which the link rows appear on the module's entity
    pub alias: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_list: bool,
}

/// Reverse navigation from one endpoint module
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkExtension {
    /// The module being extended
    pub service_name: ModuleName,

    pub relationship: ExtensionRelationship,

    /// Shorthand fields rewritten to a path through the relationship
    ///
    /// Example: "fulfillment_sets" → "fulfillment_set_link.fulfillment_set"
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub field_alias: IndexMap<String, String>,
}

/// Declarative description of a link between two modules
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkDefinition {
    pub service_name: LinkName,

    #[serde(default)]
    pub is_link: bool,

    pub database_config: DatabaseConfig,

    #[serde(default)]
    pub alias: Vec<LinkAlias>,

    /// Ordered fields identifying an association row
    pub primary_keys: Vec<String>,

    /// The two endpoints
    pub relationships: Vec<LinkRelationship>,

    #[serde(default)]
    pub extends: Vec<LinkExtension>,
}

impl LinkDefinition {
    /// The relationship declared for `module`, if it is an endpoint
    pub fn relationship_for(&self, module: ModuleName) -> Option<&LinkRelationship> {
        self.relationships
            .iter()
            .find(|rel| rel.service_name == module)
    }

    /// Every alias name declared by this link
    pub fn alias_names(&self) -> impl Iterator<Item = &str> {
        self.alias
            .iter()
            .flat_map(|alias| alias.name.iter().map(String::as_str))
    }
}

/// An association row stored in a link's join table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRow {
    /// Prefixed row id (e.g. "locfs_01f3...")
    pub id: String,

    pub link: LinkName,

    /// Foreign key column → referenced entity id
    pub keys: IndexMap<String, String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LinkRow {
    /// Create a row with a fresh id using the given prefix
    pub fn new(link: LinkName, id_prefix: &str, keys: IndexMap<String, String>) -> Self {
        let now = Utc::now();
        Self {
            id: format!("{}_{}", id_prefix, Uuid::new_v4().simple()),
            link,
            keys,
            created_at: now,
            updated_at: now,
        }
    }

    /// The entity id stored under a foreign key column
    pub fn key(&self, foreign_key: &str) -> Option<&str> {
        self.keys.get(foreign_key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_name_roundtrip() {
        for link in LinkName::ALL {
            assert_eq!(link.as_str().parse::<LinkName>().unwrap(), link);
        }
        assert!("location_fulfillment_sets".parse::<LinkName>().is_err());
    }

    #[test]
    fn test_singular_plural_alias() {
        let alias =
            LinkAlias::singular_plural("location_fulfillment_set", "LinkLocationFulfillmentSet");
        assert_eq!(
            alias.name,
            vec!["location_fulfillment_set", "location_fulfillment_sets"]
        );
        assert_eq!(alias.args.entity, "LinkLocationFulfillmentSet");
    }

    #[test]
    fn test_row_id_prefix() {
        let mut keys = IndexMap::new();
        keys.insert("stock_location_id".to_string(), "sloc_1".to_string());
        keys.insert("fulfillment_set_id".to_string(), "fuset_1".to_string());

        let row = LinkRow::new(LinkName::LocationFulfillmentSet, "locfs", keys);

        assert!(row.id.starts_with("locfs_"));
        assert_eq!(row.key("stock_location_id"), Some("sloc_1"));
        assert_eq!(row.key("missing"), None);
    }

    #[test]
    fn test_definition_from_yaml() {
        let yaml = r#"
            service_name: location_fulfillment_set
            is_link: true
            database_config:
              table_name: location_fulfillment_set
              id_prefix: locfs
            primary_keys: [id, stock_location_id, fulfillment_set_id]
            relationships:
              - service_name: stock_location
                primary_key: id
                foreign_key: stock_location_id
                alias: location
              - service_name: fulfillment
                primary_key: id
                foreign_key: fulfillment_set_id
                alias: fulfillment_set
                delete_cascade: true
            extends:
              - service_name: stock_location
                relationship:
                  service_name: location_fulfillment_set
                  primary_key: stock_location_id
                  foreign_key: id
                  alias: fulfillment_set_link
                  is_list: true
                field_alias:
                  fulfillment_sets: fulfillment_set_link.fulfillment_set
        "#;

        let def: LinkDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.service_name, LinkName::LocationFulfillmentSet);
        assert!(def.alias.is_empty());
        assert!(!def.relationships[0].delete_cascade);
        assert!(def.relationships[1].delete_cascade);
        assert_eq!(
            def.relationship_for(ModuleName::Fulfillment)
                .map(|rel| rel.foreign_key.as_str()),
            Some("fulfillment_set_id")
        );
        assert_eq!(
            def.extends[0].field_alias["fulfillment_sets"],
            "fulfillment_set_link.fulfillment_set"
        );
    }

    #[test]
    fn test_definition_with_unknown_module_fails_to_parse() {
        let yaml = r#"
            service_name: location_fulfillment_set
            is_link: true
            database_config: { table_name: t, id_prefix: p }
            primary_keys: [id]
            relationships:
              - { service_name: warehouse, primary_key: id, foreign_key: warehouse_id, alias: w }
        "#;

        assert!(serde_yaml::from_str::<LinkDefinition>(yaml).is_err());
    }
}
