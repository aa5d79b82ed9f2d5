//! Tests for error status codes, error codes and response format

use axum::http::StatusCode;
use axum::response::IntoResponse;
use link_modules::prelude::*;

// ============================================================================
// HTTP Status Code Tests
// ============================================================================

mod status_code_tests {
    use super::*;

    #[test]
    fn test_unknown_link_is_404() {
        let err = LinkModuleError::from(LinkError::UnknownLink {
            name: "carts".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_module_is_404() {
        let err = LinkModuleError::from(LinkError::UnknownModule {
            name: "warehouse".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_endpoint_is_400() {
        let err = LinkModuleError::from(LinkError::MissingEndpoint {
            link: LinkName::SalesChannelLocation,
            module: ModuleName::SalesChannel,
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_not_an_endpoint_is_400() {
        let err = LinkModuleError::from(LinkError::NotAnEndpoint {
            link: LinkName::SalesChannelLocation,
            module: ModuleName::Product,
        });
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_unknown_field_is_404() {
        let err = LinkModuleError::from(LinkError::UnknownField {
            module: ModuleName::Product,
            field: "variants".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_unknown_area_is_404() {
        let err = LinkModuleError::from(PageError::UnknownArea {
            area: "partner".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_storage_error_is_500() {
        let err = LinkModuleError::from(StorageError::LockPoisoned("rows".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_config_error_is_500() {
        let err = LinkModuleError::from(ConfigError::DuplicateService {
            link: LinkName::LocationFulfillmentSet,
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}

// ============================================================================
// Error Code Tests
// ============================================================================

mod error_code_tests {
    use super::*;

    #[test]
    fn test_link_error_codes() {
        let cases = [
            (
                LinkError::UnknownLink {
                    name: "x".to_string(),
                },
                "UNKNOWN_LINK",
            ),
            (
                LinkError::RowNotFound {
                    link: LinkName::LocationFulfillmentSet,
                    id: "locfs_1".to_string(),
                },
                "LINK_ROW_NOT_FOUND",
            ),
            (
                LinkError::InvalidRequest {
                    message: "bad".to_string(),
                },
                "INVALID_REQUEST",
            ),
        ];

        for (err, code) in cases {
            assert_eq!(LinkModuleError::from(err).error_code(), code);
        }
    }

    #[test]
    fn test_storage_error_code() {
        let err = LinkModuleError::from(StorageError::OperationFailed {
            operation: "insert".to_string(),
            message: "duplicate id".to_string(),
        });
        assert_eq!(err.error_code(), "STORAGE_ERROR");
    }

    #[test]
    fn test_page_error_code() {
        let err = LinkModuleError::from(PageError::UnknownArea {
            area: "partner".to_string(),
        });
        assert_eq!(err.error_code(), "PAGE_NOT_FOUND");
    }
}

// ============================================================================
// Error Response Tests
// ============================================================================

mod response_format_tests {
    use super::*;

    #[test]
    fn test_response_serializes_code_and_message() {
        let err = LinkModuleError::from(LinkError::UnknownLink {
            name: "carts".to_string(),
        });
        let json = serde_json::to_value(err.to_response()).unwrap();

        assert_eq!(json["code"], "UNKNOWN_LINK");
        assert_eq!(json["message"], "No link is registered under 'carts'");
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_missing_endpoint_details() {
        let err = LinkModuleError::from(LinkError::MissingEndpoint {
            link: LinkName::ProductVariantInventoryItem,
            module: ModuleName::Inventory,
        });
        let details = err.to_response().details.unwrap();

        assert_eq!(details["link"], "product_variant_inventory_item");
        assert_eq!(details["module"], "inventory");
    }

    #[test]
    fn test_into_response_uses_status_code() {
        let err = LinkModuleError::from(LinkError::RowNotFound {
            link: LinkName::LocationFulfillmentSet,
            id: "locfs_1".to_string(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_internal_error_message() {
        let err = LinkModuleError::Internal("serializer failed".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Internal error: serializer failed");
    }
}
