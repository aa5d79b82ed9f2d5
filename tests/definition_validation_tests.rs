//! Properties of the built-in link definitions and of the load-time validator

use link_modules::definitions;
use link_modules::links::compiler::{ColumnType, NavigationTarget};
use link_modules::prelude::*;
use std::collections::BTreeSet;

fn all_modules() -> BTreeSet<ModuleName> {
    ModuleName::ALL.into_iter().collect()
}

// ============================================================================
// Built-in definitions
// ============================================================================

mod builtin_tests {
    use super::*;

    #[test]
    fn test_every_builtin_is_a_link_with_two_distinct_endpoints() {
        for definition in definitions::builtin() {
            assert!(definition.is_link, "{}", definition.service_name);
            assert_eq!(definition.relationships.len(), 2);
            assert_ne!(
                definition.relationships[0].service_name,
                definition.relationships[1].service_name
            );
        }
    }

    #[test]
    fn test_primary_keys_cover_id_and_foreign_keys() {
        for definition in definitions::builtin() {
            assert!(definition.primary_keys.iter().any(|k| k == "id"));
            for rel in &definition.relationships {
                assert!(
                    definition.primary_keys.contains(&rel.foreign_key),
                    "{} is missing {}",
                    definition.service_name,
                    rel.foreign_key
                );
            }
        }
    }

    #[test]
    fn test_every_builtin_compiles() {
        let modules = all_modules();
        for definition in definitions::builtin() {
            let compiled = compile(definition, &modules).unwrap();
            assert_eq!(compiled.name(), definition.service_name);
        }
    }

    #[test]
    fn test_builtin_names_cover_link_enum() {
        let names: Vec<LinkName> = definitions::builtin()
            .into_iter()
            .map(|d| d.service_name)
            .collect();
        for link in LinkName::ALL {
            assert!(names.contains(&link), "{} has no definition", link);
        }
    }

    #[test]
    fn test_location_fulfillment_set_schema() {
        let compiled = compile(&definitions::LOCATION_FULFILLMENT_SET, &all_modules()).unwrap();

        assert_eq!(compiled.schema.table_name, "location_fulfillment_set");
        assert_eq!(compiled.schema.id_prefix, "locfs");
        assert_eq!(
            compiled.schema.primary_key,
            vec!["id", "stock_location_id", "fulfillment_set_id"]
        );

        let deleted_at = compiled
            .schema
            .columns
            .iter()
            .find(|c| c.name == "deleted_at")
            .unwrap();
        assert_eq!(deleted_at.column_type, ColumnType::Timestamp);
        assert!(deleted_at.nullable);

        let index_names: Vec<&str> = compiled
            .schema
            .indexes
            .iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(
            index_names,
            vec![
                "IDX_location_fulfillment_set_stock_location_id",
                "IDX_location_fulfillment_set_fulfillment_set_id"
            ]
        );
    }

    #[test]
    fn test_cascade_is_one_directional() {
        let compiled = compile(&definitions::LOCATION_FULFILLMENT_SET, &all_modules()).unwrap();

        assert!(compiled.cascades_from(ModuleName::Fulfillment));
        assert!(!compiled.cascades_from(ModuleName::StockLocation));
    }

    #[test]
    fn test_sales_channel_location_never_cascades() {
        let compiled = compile(&definitions::SALES_CHANNEL_LOCATION, &all_modules()).unwrap();
        assert!(compiled.cascades.is_empty());
    }

    #[test]
    fn test_field_alias_navigates_to_other_endpoint() {
        let compiled = compile(&definitions::LOCATION_FULFILLMENT_SET, &all_modules()).unwrap();

        let nav = compiled
            .navigations
            .iter()
            .find(|n| n.module == ModuleName::StockLocation && n.field == "fulfillment_sets")
            .unwrap();
        assert!(nav.is_list);
        assert_eq!(nav.local_key, "stock_location_id");
        assert_eq!(
            nav.target,
            NavigationTarget::Endpoint {
                module: ModuleName::Fulfillment,
                foreign_key: "fulfillment_set_id".to_string(),
            }
        );
    }

    #[test]
    fn test_default_registry_has_no_conflicts() {
        let registry = LinkRegistry::from_config(&LinksConfig::default_config()).unwrap();
        assert_eq!(registry.links().count(), LinkName::ALL.len());
        assert_eq!(
            registry.links_for_module(ModuleName::StockLocation).len(),
            2
        );
    }
}

// ============================================================================
// Rejected definitions
// ============================================================================

mod rejection_tests {
    use super::*;

    fn location_link() -> LinkDefinition {
        definitions::LOCATION_FULFILLMENT_SET.clone()
    }

    #[test]
    fn test_not_a_link() {
        let mut definition = location_link();
        definition.is_link = false;

        assert_eq!(
            compile(&definition, &all_modules()).unwrap_err(),
            ConfigError::NotALink {
                link: LinkName::LocationFulfillmentSet
            }
        );
    }

    #[test]
    fn test_single_relationship() {
        let mut definition = location_link();
        definition.relationships.pop();

        assert_eq!(
            compile(&definition, &all_modules()).unwrap_err(),
            ConfigError::RelationshipCount {
                link: LinkName::LocationFulfillmentSet,
                found: 1
            }
        );
    }

    #[test]
    fn test_three_relationships() {
        let mut definition = location_link();
        let extra = definition.relationships[0].clone();
        definition.relationships.push(extra);

        assert!(matches!(
            compile(&definition, &all_modules()).unwrap_err(),
            ConfigError::RelationshipCount { found: 3, .. }
        ));
    }

    #[test]
    fn test_unregistered_module() {
        let modules: BTreeSet<ModuleName> = [ModuleName::StockLocation].into_iter().collect();

        assert_eq!(
            compile(&location_link(), &modules).unwrap_err(),
            ConfigError::ModuleNotRegistered {
                link: LinkName::LocationFulfillmentSet,
                module: ModuleName::Fulfillment
            }
        );
    }

    #[test]
    fn test_primary_keys_missing_foreign_key() {
        let mut definition = location_link();
        definition.primary_keys.retain(|k| k != "fulfillment_set_id");

        assert_eq!(
            compile(&definition, &all_modules()).unwrap_err(),
            ConfigError::MissingPrimaryKey {
                link: LinkName::LocationFulfillmentSet,
                key: "fulfillment_set_id".to_string()
            }
        );
    }

    #[test]
    fn test_primary_keys_may_be_a_superset() {
        let mut definition = location_link();
        definition.primary_keys.push("shipping_profile_id".to_string());

        let compiled = compile(&definition, &all_modules()).unwrap();
        assert!(
            compiled
                .schema
                .primary_key
                .iter()
                .any(|k| k == "shipping_profile_id")
        );
    }

    #[test]
    fn test_asymmetric_extension() {
        let mut definition = location_link();
        definition.extends[0].relationship.service_name = LinkName::SalesChannelLocation;

        assert!(matches!(
            compile(&definition, &all_modules()).unwrap_err(),
            ConfigError::AliasAsymmetry {
                module: ModuleName::StockLocation,
                found: LinkName::SalesChannelLocation,
                ..
            }
        ));
    }

    #[test]
    fn test_field_alias_through_wrong_relationship() {
        let mut definition = location_link();
        definition.extends[0].field_alias.insert(
            "fulfillment_sets".to_string(),
            "locations_link.fulfillment_set".to_string(),
        );

        assert!(matches!(
            compile(&definition, &all_modules()).unwrap_err(),
            ConfigError::InvalidFieldAlias { field, .. } if field == "fulfillment_sets"
        ));
    }

    #[test]
    fn test_duplicate_table_across_links() {
        let mut config = LinksConfig::default_config();
        config.links[2].database_config.table_name = "location_fulfillment_set".to_string();

        assert!(matches!(
            LinkRegistry::from_config(&config).unwrap_err(),
            ConfigError::DuplicateTable { table, .. } if table == "location_fulfillment_set"
        ));
    }

    #[test]
    fn test_error_messages_name_the_link() {
        let mut definition = location_link();
        definition.relationships.clear();

        let message = compile(&definition, &all_modules()).unwrap_err().to_string();
        assert!(message.contains("location_fulfillment_set"));
    }
}
