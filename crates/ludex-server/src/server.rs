use std::sync::Arc;

use ludex_store::{DirImageStore, ImageStore, JsonShelfStore};
use tokio::net::TcpListener;

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::router::{build_router, AppState};

/// The Ludex game-shelf server.
pub struct LudexServer {
    config: ServerConfig,
}

impl LudexServer {
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Open the stores and build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        let images: Arc<dyn ImageStore> =
            Arc::new(DirImageStore::open(&self.config.images_dir)?);
        let shelf = Arc::new(JsonShelfStore::open(
            &self.config.data_file,
            images.clone(),
        )?);
        let state = AppState { shelf, images };
        Ok(build_router(state, &self.config.images_dir))
    }

    /// Start serving requests.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let listener = TcpListener::bind(self.config.bind_addr).await?;
        tracing::info!("ludex server listening on http://{}", self.config.bind_addr);
        Ok(axum::serve(listener, app).await?)
    }
}
