use std::sync::Arc;

use tokio::net::TcpListener;

use idreg_service::RegistryService;
use idreg_store::SqliteStore;

use crate::config::ServerConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::AppState;
use crate::router::build_router;

/// ID Registry HTTP server.
pub struct RegistryServer {
    config: ServerConfig,
}

impl RegistryServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the store and assemble the shared state.
    pub fn build_state(&self) -> ServerResult<AppState> {
        let store = SqliteStore::open(&self.config.db_path)?;
        Ok(AppState {
            service: Arc::new(RegistryService::new(Arc::new(store))),
        })
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let state = self.build_state()?;
        let app = build_router(state);
        let listener = TcpListener::bind(&self.config.bind_addr).await?;
        tracing::info!(
            db = %self.config.db_path.display(),
            "id registry listening on {}",
            self.config.bind_addr
        );
        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_construction() {
        let server = RegistryServer::new(ServerConfig::default());
        assert_eq!(
            server.config().bind_addr,
            "127.0.0.1:7310".parse().unwrap()
        );
    }

    #[test]
    fn build_state_opens_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            db_path: dir.path().join("registry.db"),
            ..Default::default()
        };
        let state = RegistryServer::new(config).build_state().unwrap();
        state.service.settings().unwrap();
    }
}
