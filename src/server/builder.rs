//! ServerBuilder for fluent API to build HTTP servers

use super::host::ServerHost;
use super::reference::reference_routes;
use super::router::{build_link_routes, health_routes};
use crate::config::LinksConfig;
use crate::core::service::LinkStore;
use crate::links::handlers::AppState;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the link server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_link_store(InMemoryLinkStore::new())
///     .with_config(LinksConfig::default_config())
///     .build()?;
/// ```
pub struct ServerBuilder {
    link_store: Option<Arc<dyn LinkStore>>,
    configs: Vec<LinksConfig>,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            link_store: None,
            configs: Vec::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the link row store (required)
    pub fn with_link_store(mut self, store: impl LinkStore + 'static) -> Self {
        self.link_store = Some(Arc::new(store));
        self
    }

    /// Add a configuration; configurations are merged in the order added
    pub fn with_config(mut self, config: LinksConfig) -> Self {
        self.configs.push(config);
        self
    }

    /// Load and add a YAML configuration file
    pub fn with_config_file(self, path: &str) -> Result<Self> {
        let config = LinksConfig::from_yaml_file(path)?;
        Ok(self.with_config(config))
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the host, compiling every link definition
    ///
    /// Fails if any definition is malformed.
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = self
            .link_store
            .take()
            .ok_or_else(|| anyhow::anyhow!("LinkStore is required. Call .with_link_store()"))?;

        let config = LinksConfig::merge(std::mem::take(&mut self.configs))
            .context("Invalid link configuration")?;
        let host = ServerHost::new(config, store).context("Invalid link configuration")?;
        Ok(host)
    }

    /// Build the final router
    ///
    /// - Health check routes
    /// - Link routes
    /// - API reference routes
    /// - Custom routes
    pub fn build(mut self) -> Result<Router> {
        let host = self.build_host()?;

        let state = AppState {
            runtime: host.runtime.clone(),
        };

        let mut app = health_routes()
            .merge(build_link_routes(state))
            .merge(reference_routes(host.reference.clone()));

        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind {}", addr))?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
