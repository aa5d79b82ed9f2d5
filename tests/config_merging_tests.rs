//! Integration tests for config loading and merging

use link_modules::prelude::*;
use std::io::Write;

const LOCATION_LINK_YAML: &str = r#"
modules: [stock_location, fulfillment]

links:
  - service_name: location_fulfillment_set
    is_link: true
    database_config:
      table_name: location_fulfillment_set
      id_prefix: locfs
    alias:
      - name: [location_fulfillment_set, location_fulfillment_sets]
        args:
          entity: LinkLocationFulfillmentSet
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
      - service_name: fulfillment
        relationship:
          service_name: location_fulfillment_set
          primary_key: fulfillment_set_id
          foreign_key: id
          alias: locations_link
"#;

#[test]
fn test_merge_empty_configs() {
    let merged = LinksConfig::merge(vec![]).unwrap();

    assert!(merged.modules.is_empty());
    assert!(merged.links.is_empty());
    assert!(merged.reference.base_url.is_none());
}

#[test]
fn test_yaml_definition_matches_builtin() {
    let config = LinksConfig::from_yaml_str(LOCATION_LINK_YAML).unwrap();

    assert_eq!(
        config.modules,
        vec![ModuleName::StockLocation, ModuleName::Fulfillment]
    );
    assert_eq!(
        config.links,
        vec![link_modules::definitions::LOCATION_FULFILLMENT_SET.clone()]
    );
}

#[test]
fn test_yaml_config_compiles() {
    let config = LinksConfig::from_yaml_str(LOCATION_LINK_YAML).unwrap();
    let registry = LinkRegistry::from_config(&config).unwrap();

    assert_eq!(registry.links().count(), 1);
    assert!(registry.resolve_alias("location_fulfillment_sets").is_some());
}

#[test]
fn test_merge_unions_modules() {
    let first = LinksConfig::from_yaml_str("modules: [stock_location, fulfillment]").unwrap();
    let second = LinksConfig::from_yaml_str("modules: [fulfillment, sales_channel]").unwrap();

    let merged = LinksConfig::merge(vec![first, second]).unwrap();

    assert_eq!(
        merged.modules,
        vec![
            ModuleName::StockLocation,
            ModuleName::Fulfillment,
            ModuleName::SalesChannel
        ]
    );
}

#[test]
fn test_merge_link_overlap_last_wins() {
    let first = LinksConfig::from_yaml_str(LOCATION_LINK_YAML).unwrap();
    let second =
        LinksConfig::from_yaml_str(&LOCATION_LINK_YAML.replace("id_prefix: locfs", "id_prefix: lfs"))
            .unwrap();

    let merged = LinksConfig::merge(vec![first, second]).unwrap();

    assert_eq!(merged.links.len(), 1);
    assert_eq!(merged.links[0].database_config.id_prefix, "lfs");
}

#[test]
fn test_merged_modules_enable_links_from_other_configs() {
    let modules_only = LinksConfig::from_yaml_str("modules: [stock_location]").unwrap();
    let mut links_only = LinksConfig::from_yaml_str(LOCATION_LINK_YAML).unwrap();
    links_only.modules = vec![ModuleName::Fulfillment];

    assert!(LinkRegistry::from_config(&links_only).is_err());

    let merged = LinksConfig::merge(vec![modules_only, links_only]).unwrap();
    assert!(LinkRegistry::from_config(&merged).is_ok());
}

#[test]
fn test_reference_base_url_last_set_wins() {
    let first =
        LinksConfig::from_yaml_str("reference: { base_url: 'https://a.example.com' }").unwrap();
    let second =
        LinksConfig::from_yaml_str("reference: { base_url: 'https://b.example.com' }").unwrap();
    let third = LinksConfig::from_yaml_str("modules: []").unwrap();

    let merged = LinksConfig::merge(vec![first, second, third]).unwrap();
    assert_eq!(
        merged.reference.base_url.as_deref(),
        Some("https://b.example.com")
    );
}

#[test]
fn test_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(LOCATION_LINK_YAML.as_bytes()).unwrap();

    let config = LinksConfig::from_yaml_file(file.path()).unwrap();
    assert_eq!(config.links.len(), 1);
}

#[test]
fn test_from_missing_yaml_file() {
    let err = LinksConfig::from_yaml_file("/nonexistent/links.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read link config"));
}

#[test]
fn test_unknown_link_name_is_a_parse_error() {
    let yaml = LOCATION_LINK_YAML.replace(
        "service_name: location_fulfillment_set\n    is_link",
        "service_name: location_fulfilment_set\n    is_link",
    );

    let err = LinksConfig::from_yaml_str(&yaml).unwrap_err();
    assert!(
        matches!(&err, ConfigError::Parse { message } if message.contains("location_fulfilment_set"))
    );
}

#[test]
fn test_unknown_module_is_a_parse_error() {
    let err = LinksConfig::from_yaml_str("modules: [stock_locations]").unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn test_link_repeated_in_one_file_is_rejected() {
    let yaml = format!(
        "{}{}",
        LOCATION_LINK_YAML,
        &LOCATION_LINK_YAML[LOCATION_LINK_YAML.find("  - service_name").unwrap()..]
    );
    let config = LinksConfig::from_yaml_str(&yaml).unwrap();
    assert_eq!(config.links.len(), 2);

    let err = LinksConfig::merge(vec![config]).unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicateService {
            link: LinkName::LocationFulfillmentSet
        }
    );
}

#[test]
fn test_link_repeated_in_one_file_fails_server_build() {
    let yaml = format!(
        "{}{}",
        LOCATION_LINK_YAML,
        &LOCATION_LINK_YAML[LOCATION_LINK_YAML.find("  - service_name").unwrap()..]
    );

    let err = ServerBuilder::new()
        .with_link_store(InMemoryLinkStore::new())
        .with_config(LinksConfig::from_yaml_str(&yaml).unwrap())
        .build()
        .unwrap_err();
    assert!(format!("{:#}", err).contains("registered more than once"));
}
