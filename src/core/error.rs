//! Typed error handling for link modules
//!
//! Errors are split by the phase they belong to:
//!
//! - [`ConfigError`]: a link definition or configuration file is malformed.
//!   Raised while the registry is built at startup and fatal to initialization.
//! - [`LinkError`]: a runtime operation on association rows failed.
//! - [`StorageError`]: the row store could not complete an operation.
//! - [`PageError`]: the API reference route was given an unknown area.
//!
//! [`LinkModuleError`] wraps all of them and renders as a JSON
//! [`ErrorResponse`] when returned from an axum handler.

use crate::core::link::LinkName;
use crate::core::module::ModuleName;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the crate
#[derive(Debug, Error)]
pub enum LinkModuleError {
    /// Configuration errors (startup only)
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Link row operation errors
    #[error(transparent)]
    Link(#[from] LinkError),

    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// API reference page errors
    #[error(transparent)]
    Page(#[from] PageError),

    /// Internal errors (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl LinkModuleError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LinkModuleError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LinkModuleError::Link(e) => e.status_code(),
            LinkModuleError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LinkModuleError::Page(e) => e.status_code(),
            LinkModuleError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            LinkModuleError::Config(_) => "CONFIG_ERROR",
            LinkModuleError::Link(e) => e.error_code(),
            LinkModuleError::Storage(_) => "STORAGE_ERROR",
            LinkModuleError::Page(e) => e.error_code(),
            LinkModuleError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            LinkModuleError::Link(LinkError::RowNotFound { link, id }) => Some(serde_json::json!({
                "link": link.as_str(),
                "id": id,
            })),
            LinkModuleError::Link(LinkError::MissingEndpoint { link, module }) => {
                Some(serde_json::json!({
                    "link": link.as_str(),
                    "module": module.as_str(),
                }))
            }
            LinkModuleError::Page(PageError::UnknownArea { area }) => {
                Some(serde_json::json!({ "area": area }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for LinkModuleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// A malformed link definition or configuration source
///
/// These are detected when definitions are compiled into the registry and
/// abort initialization. They are never produced while serving requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Link '{link}' is not marked as a link definition (is_link = false)")]
    NotALink { link: LinkName },

    #[error("Link '{link}' must declare exactly two relationships, found {found}")]
    RelationshipCount { link: LinkName, found: usize },

    #[error("Link '{link}' references module '{module}' twice")]
    DuplicateEndpoint { link: LinkName, module: ModuleName },

    #[error("Unknown module '{name}'")]
    UnknownModule { name: String },

    #[error("Unknown link '{name}'")]
    UnknownLink { name: String },

    #[error("Link '{link}' references module '{module}' which is not registered")]
    ModuleNotRegistered { link: LinkName, module: ModuleName },

    #[error("Link '{link}' primary keys do not include '{key}'")]
    MissingPrimaryKey { link: LinkName, key: String },

    #[error("Link '{link}' has an invalid database config: {message}")]
    InvalidDatabaseConfig { link: LinkName, message: String },

    #[error("Link '{link}' extends module '{module}' through service '{found}', expected '{link}'")]
    AliasAsymmetry {
        link: LinkName,
        module: ModuleName,
        found: LinkName,
    },

    #[error("Link '{link}' extends module '{module}' which is not one of its endpoints")]
    ExtensionNotEndpoint { link: LinkName, module: ModuleName },

    #[error(
        "Link '{link}' extends module '{module}' with primary key '{found}', expected foreign key '{expected}'"
    )]
    ExtensionKeyMismatch {
        link: LinkName,
        module: ModuleName,
        expected: String,
        found: String,
    },

    #[error("Link '{link}' field alias '{field}' -> '{path}' must resolve to '{expected}'")]
    InvalidFieldAlias {
        link: LinkName,
        field: String,
        path: String,
        expected: String,
    },

    #[error("Alias '{alias}' is declared by both '{first}' and '{second}'")]
    DuplicateAlias {
        alias: String,
        first: LinkName,
        second: LinkName,
    },

    #[error("Link '{link}' is registered more than once")]
    DuplicateService { link: LinkName },

    #[error("Table '{table}' is used by both '{first}' and '{second}'")]
    DuplicateTable {
        table: String,
        first: LinkName,
        second: LinkName,
    },

    #[error("Field '{field}' on module '{module}' is defined by both '{first}' and '{second}'")]
    DuplicateField {
        module: ModuleName,
        field: String,
        first: LinkName,
        second: LinkName,
    },

    #[error("Failed to parse configuration: {message}")]
    Parse { message: String },
}

// =============================================================================
// Link Errors
// =============================================================================

/// Errors raised by row operations on a registered link
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("No link is registered under '{name}'")]
    UnknownLink { name: String },

    #[error("Unknown module '{name}'")]
    UnknownModule { name: String },

    #[error("Link row '{id}' not found in '{link}'")]
    RowNotFound { link: LinkName, id: String },

    #[error("Link '{link}' requires an id for module '{module}'")]
    MissingEndpoint { link: LinkName, module: ModuleName },

    #[error("Module '{module}' is not an endpoint of link '{link}'")]
    NotAnEndpoint { link: LinkName, module: ModuleName },

    #[error("Module '{module}' has no field '{field}'")]
    UnknownField { module: ModuleName, field: String },

    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl LinkError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            LinkError::UnknownLink { .. } => StatusCode::NOT_FOUND,
            LinkError::UnknownModule { .. } => StatusCode::NOT_FOUND,
            LinkError::RowNotFound { .. } => StatusCode::NOT_FOUND,
            LinkError::MissingEndpoint { .. } => StatusCode::BAD_REQUEST,
            LinkError::NotAnEndpoint { .. } => StatusCode::BAD_REQUEST,
            LinkError::UnknownField { .. } => StatusCode::NOT_FOUND,
            LinkError::InvalidRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            LinkError::UnknownLink { .. } => "UNKNOWN_LINK",
            LinkError::UnknownModule { .. } => "UNKNOWN_MODULE",
            LinkError::RowNotFound { .. } => "LINK_ROW_NOT_FOUND",
            LinkError::MissingEndpoint { .. } => "MISSING_ENDPOINT",
            LinkError::NotAnEndpoint { .. } => "NOT_AN_ENDPOINT",
            LinkError::UnknownField { .. } => "UNKNOWN_FIELD",
            LinkError::InvalidRequest { .. } => "INVALID_REQUEST",
        }
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("Storage lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Storage operation '{operation}' failed: {message}")]
    OperationFailed { operation: String, message: String },
}

// =============================================================================
// Page Errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("No API reference page for area '{area}'")]
    UnknownArea { area: String },
}

impl PageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            PageError::UnknownArea { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            PageError::UnknownArea { .. } => "PAGE_NOT_FOUND",
        }
    }
}

/// Result alias used across the crate
pub type LinkResult<T> = std::result::Result<T, LinkModuleError>;
