//! Product variant ↔ inventory item

use crate::core::link::{
    DatabaseConfig, ExtensionRelationship, LinkAlias, LinkDefinition, LinkExtension, LinkName,
    LinkRelationship,
};
use crate::core::module::ModuleName;
use indexmap::IndexMap;
use std::sync::LazyLock;

pub static PRODUCT_VARIANT_INVENTORY_ITEM: LazyLock<LinkDefinition> =
    LazyLock::new(|| LinkDefinition {
        service_name: LinkName::ProductVariantInventoryItem,
        is_link: true,
        database_config: DatabaseConfig {
            table_name: "product_variant_inventory_item".to_string(),
            id_prefix: "pvitem".to_string(),
        },
        alias: vec![LinkAlias::singular_plural(
            "product_variant_inventory_item",
            "LinkProductVariantInventoryItem",
        )],
        primary_keys: vec![
            "id".to_string(),
            "variant_id".to_string(),
            "inventory_item_id".to_string(),
        ],
        relationships: vec![
            LinkRelationship {
                service_name: ModuleName::Product,
                primary_key: "id".to_string(),
                foreign_key: "variant_id".to_string(),
                alias: "variant".to_string(),
                delete_cascade: false,
            },
            LinkRelationship {
                service_name: ModuleName::Inventory,
                primary_key: "id".to_string(),
                foreign_key: "inventory_item_id".to_string(),
                alias: "inventory".to_string(),
                delete_cascade: true,
            },
        ],
        extends: vec![
            LinkExtension {
                service_name: ModuleName::Product,
                relationship: ExtensionRelationship {
                    service_name: LinkName::ProductVariantInventoryItem,
                    primary_key: "variant_id".to_string(),
                    foreign_key: "id".to_string(),
                    alias: "inventory_items".to_string(),
                    is_list: true,
                },
                field_alias: IndexMap::from([(
                    "inventory".to_string(),
                    "inventory_items.inventory".to_string(),
                )]),
            },
            LinkExtension {
                service_name: ModuleName::Inventory,
                relationship: ExtensionRelationship {
                    service_name: LinkName::ProductVariantInventoryItem,
                    primary_key: "inventory_item_id".to_string(),
                    foreign_key: "id".to_string(),
                    alias: "variant_link".to_string(),
                    is_list: true,
                },
                field_alias: IndexMap::from([(
                    "variants".to_string(),
                    "variant_link.variant".to_string(),
                )]),
            },
        ],
    });
