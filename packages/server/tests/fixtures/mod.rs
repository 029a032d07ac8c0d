//! Test fixtures for integration tests.

use std::{net::SocketAddr, sync::Arc, time::Duration};

use roomchat_server::{
    SweeperSettings,
    infrastructure::repository::sqlite,
    ui::{AppState, create_router, spawn_sweeper},
};
use tokio::{net::TcpListener, task::JoinHandle};

/// In-process server bound to an ephemeral port.
///
/// Both the HTTP server and the sweeper are aborted on drop.
pub struct TestServer {
    addr: SocketAddr,
    server: JoinHandle<()>,
    sweeper: JoinHandle<()>,
}

impl TestServer {
    /// Start a server whose sweeper effectively never fires.
    pub async fn start() -> Self {
        Self::start_with_sweeper(idle_sweeper()).await
    }

    /// Same as [`TestServer::start`], backed by an in-memory SQLite database.
    pub async fn start_sqlite() -> Self {
        let pool = sqlite::connect_lazy("sqlite::memory:").expect("Failed to open database");
        sqlite::init_schema(&pool)
            .await
            .expect("Failed to create tables");
        Self::start_with(Arc::new(AppState::sqlite(pool)), idle_sweeper()).await
    }

    pub async fn start_with_sweeper(settings: SweeperSettings) -> Self {
        Self::start_with(Arc::new(AppState::in_memory()), settings).await
    }

    async fn start_with(state: Arc<AppState>, settings: SweeperSettings) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        let sweeper = spawn_sweeper(state.clone(), settings);
        let app = create_router(state);
        let server = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Server failed");
        });

        Self {
            addr,
            server,
            sweeper,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

fn idle_sweeper() -> SweeperSettings {
    SweeperSettings {
        interval: Duration::from_secs(3600),
        ttl: Duration::from_secs(3600),
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.server.abort();
        self.sweeper.abort();
    }
}
