use std::sync::Arc;

use tokio::net::TcpListener;

use docket_engine::Coordinator;
use docket_store::Registry;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;

/// Docket repository server.
pub struct DocketServer {
    config: ServerConfig,
}

impl DocketServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Scan the repository root and build the router (useful for testing).
    pub fn build(&self) -> ServerResult<axum::Router> {
        let registry = Registry::scan(self.config.repos_root.clone())?;
        if registry.is_empty() {
            tracing::warn!(root = %self.config.repos_root.display(), "no repositories found");
        }
        let coordinator = Arc::new(Coordinator::new(registry));
        Ok(build_router(coordinator))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!("docket server listening on {}", self.config.bind_addr);
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}
