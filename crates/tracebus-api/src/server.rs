//! Introspection endpoint server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use tracebus_config::ServerConfig;

use crate::http::routes::create_router;
use crate::state::AppState;

/// The introspection endpoint.
pub struct ApiServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl ApiServer {
    pub fn new(config: ServerConfig, state: Arc<AppState>) -> Self {
        Self { config, state }
    }

    /// Get the server address.
    pub fn addr(&self) -> String {
        self.config.addr()
    }

    /// Shared state, e.g. to request shutdown from a signal handler.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Bind the configured address and serve until shutdown is requested.
    pub async fn run(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr()).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown is requested.
    ///
    /// Shutdown cancels every running execution, so open execute streams
    /// end instead of holding the server open.
    pub async fn serve(&self, listener: TcpListener) -> std::io::Result<()> {
        let app = create_router(self.state.clone());
        let shutdown = self.state.shutdown.clone();

        info!("tracebus endpoint listening on {}", listener.local_addr()?);
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        info!("tracebus endpoint stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tracebus_core::Tracer;

    #[test]
    fn test_server_addr() {
        let state = Arc::new(AppState::new(Arc::new(Tracer::new())));
        let server = ApiServer::new(ServerConfig::default(), state);
        assert_eq!(server.addr(), "127.0.0.1:9099");
    }

    #[tokio::test]
    async fn test_serve_stops_on_shutdown() {
        let state = Arc::new(AppState::new(Arc::new(Tracer::new())));
        let server = Arc::new(ApiServer::new(ServerConfig::default(), state.clone()));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();

        let running = {
            let server = server.clone();
            tokio::spawn(async move { server.serve(listener).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        state.request_shutdown();

        let result = tokio::time::timeout(Duration::from_secs(2), running)
            .await
            .expect("server should stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
