//! # Link Modules
//!
//! Typed link definitions between independently-owned domain modules, with a
//! load-time validator and a runtime for the association rows they describe.
//!
//! ## Features
//!
//! - **Closed Name Sets**: modules and links are enums, so a misspelled name
//!   never silently creates a new module
//! - **Load-Time Validation**: every definition is compiled once at startup;
//!   a malformed definition is a fatal configuration error
//! - **Join Table Schema**: table name, id prefix, columns, primary key and
//!   indexes derived from each definition
//! - **Cascade Deletes**: deleting a cascade-flagged endpoint's entity removes
//!   its association rows and nothing else
//! - **Reverse Navigation**: each endpoint module gains fields that reach the
//!   other side of the link
//! - **API Reference Pages**: `admin` and `store` reference routes
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use link_modules::prelude::*;
//!
//! let registry = LinkRegistry::from_config(&LinksConfig::default_config())?;
//! let runtime = LinkRuntime::new(Arc::new(registry), Arc::new(InMemoryLinkStore::new()));
//!
//! let row = runtime
//!     .create(
//!         "location_fulfillment_set",
//!         &IndexMap::from([
//!             (ModuleName::StockLocation, "sloc_01".to_string()),
//!             (ModuleName::Fulfillment, "fuset_01".to_string()),
//!         ]),
//!     )
//!     .await?;
//!
//! // Deleting the fulfillment set removes the row
//! runtime.on_entity_deleted(ModuleName::Fulfillment, "fuset_01").await?;
//! ```

pub mod config;
pub mod core;
pub mod definitions;
pub mod links;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ConfigError, LinkDefinition, LinkError, LinkModuleError, LinkName, LinkResult, LinkRow,
        LinkStore, ModuleName, PageError, Pluralizer, StorageError,
    };

    // === Links ===
    pub use crate::links::{
        CascadeReport, CompiledLink, LinkRegistry, LinkRuntime, Navigation, compile,
    };

    // === Storage ===
    pub use crate::storage::InMemoryLinkStore;

    // === Config ===
    pub use crate::config::{LinksConfig, ReferenceConfig};

    // === Server ===
    pub use crate::server::{Area, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use indexmap::IndexMap;
    pub use std::sync::Arc;
}
