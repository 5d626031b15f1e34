//! Control Gateway service - binds the listener and serves the router until
//! the shutdown future completes.

use crate::domain::config::GatewayConfig;
use crate::domain::error::GatewayError;
use crate::router::build_router;
use axum::Router;
use sa_03_proposal_quorum::ControlSurface;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

pub struct ControlGateway {
    config: GatewayConfig,
    surface: Arc<dyn ControlSurface>,
}

impl ControlGateway {
    pub fn new(
        config: GatewayConfig,
        surface: Arc<dyn ControlSurface>,
    ) -> Result<Self, GatewayError> {
        config
            .validate()
            .map_err(|e| GatewayError::Config(e.to_string()))?;
        Ok(Self { config, surface })
    }

    pub fn router(&self) -> Router {
        build_router(Arc::clone(&self.surface), self.config.max_upload_bytes)
    }

    /// Bind the configured address.
    pub async fn bind(&self) -> Result<TcpListener, GatewayError> {
        let addr = self.config.bind_addr;
        TcpListener::bind(addr)
            .await
            .map_err(|source| GatewayError::Bind { addr, source })
    }

    /// Bind and serve until `shutdown` resolves.
    pub async fn serve<F>(self, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let listener = self.bind().await?;
        self.serve_on(listener, shutdown).await
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn serve_on<F>(self, listener: TcpListener, shutdown: F) -> Result<(), GatewayError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr().map_err(GatewayError::Serve)?;
        info!(%addr, "[sa-05] control surface listening");

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(GatewayError::Serve)?;

        info!("[sa-05] control surface stopped");
        Ok(())
    }
}
