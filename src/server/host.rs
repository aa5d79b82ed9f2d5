//! Server host holding the state shared by every route
//!
//! The host is built once at startup from the merged configuration. Building
//! it compiles every link definition, so a malformed definition stops the
//! process before any route is served.

use crate::config::{LinksConfig, ReferenceConfig};
use crate::core::error::ConfigError;
use crate::core::service::LinkStore;
use crate::links::registry::LinkRegistry;
use crate::links::service::LinkRuntime;
use std::sync::Arc;

/// Host context containing all application state
pub struct ServerHost {
    /// Compiled links
    pub registry: Arc<LinkRegistry>,

    /// Row lifecycle and navigation over the registry
    pub runtime: LinkRuntime,

    /// Settings for the API reference pages
    pub reference: ReferenceConfig,
}

impl ServerHost {
    /// Compile the configuration and attach the row store
    pub fn new(config: LinksConfig, store: Arc<dyn LinkStore>) -> Result<Self, ConfigError> {
        let registry = Arc::new(LinkRegistry::from_config(&config)?);
        let runtime = LinkRuntime::new(registry.clone(), store);

        Ok(Self {
            reference: config.reference,
            registry,
            runtime,
        })
    }
}
