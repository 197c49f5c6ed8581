//! End-to-end test harness for Mercado.
//!
//! [`TestContext::start`] runs the real server router on an ephemeral port
//! against a throwaway `SQLite` file and hands back a [`CatalogClient`]
//! pointed at it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mercado-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;
use std::path::PathBuf;

use secrecy::SecretString;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use url::Url;

use mercado_server::config::{LogFormat, ServerConfig};
use mercado_server::{AppState, db, router};
use mercado_storefront::CatalogClient;

/// A running server plus a client for it. The server stops when dropped.
pub struct TestContext {
    pub client: CatalogClient,
    pub base_url: Url,
    pub uploads_dir: PathBuf,
    pub addr: SocketAddr,
    dir: TempDir,
    server: JoinHandle<()>,
}

impl TestContext {
    /// Start a fresh server.
    ///
    /// # Panics
    ///
    /// Panics if the temporary database, directories or listener cannot be
    /// set up.
    #[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
    pub async fn start() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let uploads_dir = dir.path().join("uploads");
        let public_dir = dir.path().join("public");
        std::fs::create_dir_all(&public_dir).unwrap();

        let config = ServerConfig {
            database_url: SecretString::from(format!(
                "sqlite://{}",
                dir.path().join("catalogo.db").display()
            )),
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            uploads_dir: uploads_dir.clone(),
            public_dir,
            max_upload_bytes: 1024 * 1024,
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        };

        let pool = db::create_pool(&config.database_url).await.unwrap();
        db::migrate(&pool).await.unwrap();

        let listener = tokio::net::TcpListener::bind(config.socket_addr())
            .await
            .unwrap();
        let addr = listener.local_addr().unwrap();

        let state = AppState::new(config, pool);
        state.uploads().ensure_dir().await.unwrap();
        let app = router(state);

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "test server stopped");
            }
        });

        let base_url = Url::parse(&format!("http://{addr}")).unwrap();
        Self {
            client: CatalogClient::new(&base_url),
            base_url,
            uploads_dir,
            addr,
            dir,
            server,
        }
    }

    /// A directory that lives as long as the context, for client-side files.
    #[must_use]
    pub fn scratch_dir(&self) -> PathBuf {
        self.dir.path().join("client")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        self.server.abort();
    }
}
