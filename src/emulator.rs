//! The in-process emulator handle.

use server::{vwq_router, vws_router, ServerConfig, ServerState};
use std::sync::Arc;
use store::{StoreError, TargetManager, VuforiaDatabase};
use tokio::task::JoinHandle;

/// Both emulator APIs running on ephemeral local ports.
///
/// Databases are provisioned directly through [`Vumock::add_database`] (or
/// the shared [`TargetManager`]); requests are then served exactly as the
/// real APIs would serve them. Dropping the handle stops both servers.
pub struct Vumock {
    vws_url: String,
    vwq_url: String,
    target_manager: Arc<TargetManager>,
    vws_task: JoinHandle<()>,
    vwq_task: JoinHandle<()>,
}

impl Vumock {
    /// Spawn both APIs. Port zero in the config binds an ephemeral port,
    /// which is the default and the right choice for parallel test runs.
    pub async fn spawn(mut config: ServerConfig) -> anyhow::Result<Self> {
        if config.vws_port == 5005 && config.vwq_port == 5006 {
            // The standalone defaults collide across test processes; the
            // in-process double always prefers ephemeral ports.
            config.vws_port = 0;
            config.vwq_port = 0;
        }
        let vws_listener =
            tokio::net::TcpListener::bind((config.bind_addr.as_str(), config.vws_port)).await?;
        let vwq_listener =
            tokio::net::TcpListener::bind((config.bind_addr.as_str(), config.vwq_port)).await?;
        let vws_url = format!("http://{}", vws_listener.local_addr()?);
        let vwq_url = format!("http://{}", vwq_listener.local_addr()?);

        let state = ServerState::new(config);
        let target_manager = state.target_manager.clone();

        let vws_app = vws_router(state.clone());
        let vwq_app = vwq_router(state);
        let vws_task = tokio::spawn(async move {
            if let Err(error) = axum::serve(vws_listener, vws_app).await {
                tracing::error!(%error, "management API server stopped");
            }
        });
        let vwq_task = tokio::spawn(async move {
            if let Err(error) = axum::serve(vwq_listener, vwq_app).await {
                tracing::error!(%error, "query API server stopped");
            }
        });

        tracing::info!(vws_url, vwq_url, "emulator spawned");
        Ok(Self {
            vws_url,
            vwq_url,
            target_manager,
            vws_task,
            vwq_task,
        })
    }

    /// Base URL of the management API.
    pub fn vws_url(&self) -> &str {
        &self.vws_url
    }

    /// Base URL of the query API.
    pub fn vwq_url(&self) -> &str {
        &self.vwq_url
    }

    /// The repository behind both APIs.
    pub fn target_manager(&self) -> &Arc<TargetManager> {
        &self.target_manager
    }

    /// Provision a database, enforcing the credential uniqueness rules.
    pub fn add_database(&self, database: VuforiaDatabase) -> Result<(), StoreError> {
        self.target_manager.add_database(database)
    }
}

impl Drop for Vumock {
    fn drop(&mut self) {
        self.vws_task.abort();
        self.vwq_task.abort();
    }
}
