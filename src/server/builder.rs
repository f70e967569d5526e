//! ServerBuilder for fluent API to build HTTP servers

use super::registry::{CollectionRegistry, RecordCollection};
use super::rest::RestExposure;
use crate::config::PortalConfig;
use crate::core::RecordService;
use crate::records::NewRecord;
use anyhow::Result;
use axum::Router;
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for creating HTTP servers with auto-registered collection routes
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(PortalConfig::from_yaml_file("labdesk.yaml")?)
///     .register_collection::<NewPaper>(InMemoryRecordService::new())?
///     .register_collection::<NewBoardPost>(InMemoryRecordService::new())?
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: PortalConfig,
    registry: CollectionRegistry,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: PortalConfig::default_config(),
            registry: CollectionRegistry::new(),
            custom_routes: Vec::new(),
        }
    }

    /// Replace the configuration
    pub fn with_config(mut self, config: PortalConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// Use this for routes that don't fit the collection pattern, such as
    /// dashboards or file endpoints.
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Register a collection whose records are created from payloads of
    /// type `P` and stored in `service`
    pub fn register_collection<P>(
        mut self,
        service: impl RecordService<P::Record> + 'static,
    ) -> Result<Self>
    where
        P: NewRecord,
        P::Record: Serialize,
    {
        self.registry
            .register(Box::new(RecordCollection::<P>::new(Arc::new(service))))?;
        Ok(self)
    }

    /// The configuration the server will be built with
    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    /// Build the final REST router
    pub fn build(self) -> Result<Router> {
        self.config.validate()?;
        Ok(RestExposure::build_router(
            &self.registry,
            &self.config,
            self.custom_routes,
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the configured `bind_addr`
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.bind_addr.clone();
        let collections = self.registry.names().join(", ");
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!(%addr, %collections, "Server listening");

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

/// Wait for a shutdown signal (SIGTERM or SIGINT)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{BoardPost, NewBoardPost, NewPaper, Paper};
    use crate::storage::InMemoryRecordService;

    #[test]
    fn test_new_creates_empty_builder() {
        let builder = ServerBuilder::new();
        assert!(builder.registry.names().is_empty());
        assert!(builder.custom_routes.is_empty());
        assert_eq!(builder.config().default_page_size, 10);
    }

    #[test]
    fn test_register_collections() {
        let builder = ServerBuilder::default()
            .register_collection::<NewPaper>(InMemoryRecordService::<Paper>::new())
            .unwrap()
            .register_collection::<NewBoardPost>(InMemoryRecordService::<BoardPost>::new())
            .unwrap();
        assert_eq!(builder.registry.names(), vec!["papers", "board-posts"]);
    }

    #[test]
    fn test_register_twice_fails() {
        let result = ServerBuilder::new()
            .register_collection::<NewPaper>(InMemoryRecordService::<Paper>::new())
            .unwrap()
            .register_collection::<NewPaper>(InMemoryRecordService::<Paper>::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_build_rejects_invalid_config() {
        let mut config = PortalConfig::default_config();
        config.default_page_size = 0;
        assert!(ServerBuilder::new().with_config(config).build().is_err());
    }

    #[test]
    fn test_with_custom_routes_appends_router() {
        let builder = ServerBuilder::new().with_custom_routes(Router::new());
        assert_eq!(builder.custom_routes.len(), 1);
        assert!(builder.build().is_ok());
    }
}
