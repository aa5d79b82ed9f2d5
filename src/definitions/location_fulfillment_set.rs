//! Stock location ↔ fulfillment set
//!
//! A stock location ships through any number of fulfillment sets. Deleting a
//! fulfillment set removes its association rows; the stock location is kept.

use crate::core::link::{
    DatabaseConfig, ExtensionRelationship, LinkAlias, LinkDefinition, LinkExtension, LinkName,
    LinkRelationship,
};
use crate::core::module::ModuleName;
use indexmap::IndexMap;
use std::sync::LazyLock;

pub static LOCATION_FULFILLMENT_SET: LazyLock<LinkDefinition> = LazyLock::new(|| LinkDefinition {
    service_name: LinkName::LocationFulfillmentSet,
    is_link: true,
    database_config: DatabaseConfig {
        table_name: "location_fulfillment_set".to_string(),
        id_prefix: "locfs".to_string(),
    },
    alias: vec![LinkAlias::singular_plural(
        "location_fulfillment_set",
        "LinkLocationFulfillmentSet",
    )],
    primary_keys: vec![
        "id".to_string(),
        "stock_location_id".to_string(),
        "fulfillment_set_id".to_string(),
    ],
    relationships: vec![
        LinkRelationship {
            service_name: ModuleName::StockLocation,
            primary_key: "id".to_string(),
            foreign_key: "stock_location_id".to_string(),
            alias: "location".to_string(),
            delete_cascade: false,
        },
        LinkRelationship {
            service_name: ModuleName::Fulfillment,
            primary_key: "id".to_string(),
            foreign_key: "fulfillment_set_id".to_string(),
            alias: "fulfillment_set".to_string(),
            delete_cascade: true,
        },
    ],
    extends: vec![
        LinkExtension {
            service_name: ModuleName::StockLocation,
            relationship: ExtensionRelationship {
                service_name: LinkName::LocationFulfillmentSet,
                primary_key: "stock_location_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "fulfillment_set_link".to_string(),
                is_list: true,
            },
            field_alias: IndexMap::from([(
                "fulfillment_sets".to_string(),
                "fulfillment_set_link.fulfillment_set".to_string(),
            )]),
        },
        LinkExtension {
            service_name: ModuleName::Fulfillment,
            relationship: ExtensionRelationship {
                service_name: LinkName::LocationFulfillmentSet,
                primary_key: "fulfillment_set_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "locations_link".to_string(),
                is_list: false,
            },
            field_alias: IndexMap::new(),
        },
    ],
});
