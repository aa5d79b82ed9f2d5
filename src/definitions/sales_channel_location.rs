//! Sales channel ↔ stock location
//!
//! Neither side cascades: removing a sales channel or a stock location
//! leaves the association rows to be dismissed explicitly.

use crate::core::link::{
    DatabaseConfig, ExtensionRelationship, LinkAlias, LinkDefinition, LinkExtension, LinkName,
    LinkRelationship,
};
use crate::core::module::ModuleName;
use indexmap::IndexMap;
use std::sync::LazyLock;

pub static SALES_CHANNEL_LOCATION: LazyLock<LinkDefinition> = LazyLock::new(|| LinkDefinition {
    service_name: LinkName::SalesChannelLocation,
    is_link: true,
    database_config: DatabaseConfig {
        table_name: "sales_channel_stock_location".to_string(),
        id_prefix: "scloc".to_string(),
    },
    alias: vec![LinkAlias::singular_plural(
        "sales_channel_location",
        "LinkSalesChannelLocation",
    )],
    primary_keys: vec![
        "id".to_string(),
        "sales_channel_id".to_string(),
        "stock_location_id".to_string(),
    ],
    relationships: vec![
        LinkRelationship {
            service_name: ModuleName::SalesChannel,
            primary_key: "id".to_string(),
            foreign_key: "sales_channel_id".to_string(),
            alias: "sales_channel".to_string(),
            delete_cascade: false,
        },
        LinkRelationship {
            service_name: ModuleName::StockLocation,
            primary_key: "id".to_string(),
            foreign_key: "stock_location_id".to_string(),
            alias: "location".to_string(),
            delete_cascade: false,
        },
    ],
    extends: vec![
        LinkExtension {
            service_name: ModuleName::SalesChannel,
            relationship: ExtensionRelationship {
                service_name: LinkName::SalesChannelLocation,
                primary_key: "sales_channel_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "stock_locations_link".to_string(),
                is_list: true,
            },
            field_alias: IndexMap::from([(
                "stock_locations".to_string(),
                "stock_locations_link.location".to_string(),
            )]),
        },
        LinkExtension {
            service_name: ModuleName::StockLocation,
            relationship: ExtensionRelationship {
                service_name: LinkName::SalesChannelLocation,
                primary_key: "stock_location_id".to_string(),
                foreign_key: "id".to_string(),
                alias: "sales_channels_link".to_string(),
                is_list: true,
            },
            field_alias: IndexMap::from([(
                "sales_channels".to_string(),
                "sales_channels_link.sales_channel".to_string(),
            )]),
        },
    ],
});
