//! Fleet maintenance server runtime.
//!
//! [`ServerHandle`] owns the full lifecycle: metrics recorder, storage
//! backend, REST API listener and graceful shutdown. The CLI binary is a
//! thin wrapper around it.

use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use std::time::{Duration, Instant};

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use sea_orm::DatabaseConnection;
use tracing::{error, info, warn};

use crate::config::AppConfig;
use crate::domain::RepositoryProvider;
use crate::infrastructure::{
    init_database, run_migrations, InMemoryStorage, SeaOrmRepositoryProvider,
};
use crate::interfaces::http::modules::health::HealthState;
use crate::interfaces::http::{create_api_router, ApiState};
use crate::shared::{ShutdownCoordinator, ShutdownSignal};

// ── Options ────────────────────────────────────────────────────────

pub struct ServerOptions {
    pub config: AppConfig,
    /// Run database migrations on startup (default: true).
    pub auto_migrate: bool,
    /// Keep everything in process memory instead of the configured database.
    pub in_memory: bool,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            config: AppConfig::default(),
            auto_migrate: true,
            in_memory: false,
        }
    }
}

// ── ServerHandle ───────────────────────────────────────────────────

/// Handle to a running fleet maintenance server.
///
/// ```rust,no_run
/// use fleet_maintenance::server::{ServerHandle, ServerOptions};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let handle = ServerHandle::start(ServerOptions::default()).await?;
///     handle.install_signal_handler();
///     handle.wait().await;
///     Ok(())
/// }
/// ```
pub struct ServerHandle {
    pub repos: Arc<dyn RepositoryProvider>,
    pub config: AppConfig,
    /// Port actually bound, which differs from the config when it asked for 0.
    pub api_port: u16,

    db: Option<DatabaseConnection>,
    shutdown: ShutdownCoordinator,
    api_task: tokio::task::JoinHandle<()>,
}

impl ServerHandle {
    pub async fn start(opts: ServerOptions) -> Result<Self, Box<dyn std::error::Error>> {
        let app_cfg = opts.config;

        info!("Starting fleet maintenance service...");

        let prometheus_handle = prometheus_handle();

        // ── Storage ────────────────────────────────────────────
        let (repos, db): (Arc<dyn RepositoryProvider>, Option<DatabaseConnection>) =
            if opts.in_memory {
                info!("Storage: in-memory (data is lost on exit)");
                (Arc::new(InMemoryStorage::new()), None)
            } else {
                info!("Database: {}", app_cfg.database.url);
                let db = init_database(&app_cfg.database).await?;
                if opts.auto_migrate {
                    run_migrations(&db).await?;
                } else {
                    warn!("Skipping database migrations");
                }
                (Arc::new(SeaOrmRepositoryProvider::new(db.clone())), Some(db))
            };

        // ── REST API ───────────────────────────────────────────
        let health_state = HealthState {
            db: db.clone(),
            started_at: Arc::new(Instant::now()),
        };
        let api_router = create_api_router(
            ApiState::new(repos.clone()),
            health_state,
            prometheus_handle,
        );

        let shutdown = ShutdownCoordinator::new(app_cfg.server.shutdown_timeout);
        let shutdown_signal = shutdown.signal();

        let listener = tokio::net::TcpListener::bind(app_cfg.api_address()).await?;
        let local_addr = listener.local_addr()?;
        info!("REST API server listening on http://{}", local_addr);
        info!("Swagger UI available at http://{}/docs/", local_addr);

        let api_server = axum::serve(
            listener,
            api_router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(async move {
            shutdown_signal.wait().await;
            info!("REST API server received shutdown signal");
        });

        let api_task = tokio::spawn(async move {
            if let Err(e) = api_server.await {
                error!("REST API server error: {}", e);
            }
        });

        Ok(Self {
            repos,
            config: app_cfg,
            api_port: local_addr.port(),
            db,
            shutdown,
            api_task,
        })
    }

    pub fn shutdown_signal(&self) -> ShutdownSignal {
        self.shutdown.signal()
    }

    /// Install OS signal listeners (SIGTERM, SIGINT) that trigger shutdown.
    pub fn install_signal_handler(&self) {
        self.shutdown.start_signal_listener();
    }

    /// Trigger graceful shutdown (non-blocking). Call [`wait`](Self::wait)
    /// to block until the listener has drained.
    pub fn trigger_shutdown(&self) {
        self.shutdown.signal().trigger();
    }

    /// Wait for the API task to stop, then close the database.
    ///
    /// In-flight requests get `shutdown_timeout` seconds once shutdown has
    /// been triggered; after that the task is aborted.
    pub async fn wait(self) {
        let signal = self.shutdown.signal();
        let drain = Duration::from_secs(self.shutdown.timeout_secs());
        let mut api_task = self.api_task;

        tokio::select! {
            result = &mut api_task => log_api_exit(result),
            _ = signal.wait() => {
                info!("Waiting up to {}s for in-flight requests...", drain.as_secs());
                match tokio::time::timeout(drain, &mut api_task).await {
                    Ok(result) => log_api_exit(result),
                    Err(_) => {
                        warn!("Shutdown timeout elapsed, aborting REST API server");
                        api_task.abort();
                    }
                }
            }
        }

        if let Some(db) = self.db {
            match db.close().await {
                Ok(()) => info!("Database connection closed"),
                Err(e) => warn!("Error closing database connection: {}", e),
            }
        }

        info!("Fleet maintenance service shutdown complete");
    }

    pub async fn shutdown(self) {
        info!("Shutting down fleet maintenance service...");
        self.trigger_shutdown();
        self.wait().await;
    }

    pub fn is_running(&self) -> bool {
        !self.api_task.is_finished()
    }
}

fn log_api_exit(result: Result<(), tokio::task::JoinError>) {
    match result {
        Ok(()) => info!("REST API server stopped"),
        Err(e) => error!("REST API server task panicked: {}", e),
    }
}

/// The global recorder can only be installed once per process, so a
/// restarted server reuses the first handle. When another recorder is
/// already installed the service runs without `/metrics`.
fn prometheus_handle() -> Option<PrometheusHandle> {
    static PROM_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

    PROM_HANDLE
        .get_or_init(|| match PrometheusBuilder::new().install_recorder() {
            Ok(handle) => {
                info!("Prometheus metrics recorder installed");
                Some(handle)
            }
            Err(e) => {
                warn!("Prometheus recorder unavailable, /metrics disabled: {}", e);
                None
            }
        })
        .clone()
}

/// Initialize tracing from the application config.
///
/// Call once at process startup, before [`ServerHandle::start`].
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ephemeral_options() -> ServerOptions {
        let mut config = AppConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 0;
        config.server.shutdown_timeout = 2;
        ServerOptions {
            config,
            auto_migrate: true,
            in_memory: true,
        }
    }

    #[tokio::test]
    async fn starts_on_ephemeral_port_and_shuts_down() {
        let handle = ServerHandle::start(ephemeral_options()).await.unwrap();
        assert_ne!(handle.api_port, 0);
        assert!(handle.is_running());

        let stream = tokio::net::TcpStream::connect(("127.0.0.1", handle.api_port)).await;
        assert!(stream.is_ok());
        drop(stream);

        let signal = handle.shutdown_signal();
        handle.shutdown().await;
        assert!(signal.is_triggered());
    }

    #[tokio::test]
    async fn sqlite_backend_migrates_on_start() {
        let mut opts = ephemeral_options();
        opts.in_memory = false;
        opts.config.database = crate::infrastructure::DatabaseConfig::sqlite_memory();

        let handle = ServerHandle::start(opts).await.unwrap();
        assert!(handle
            .repos
            .vehicles()
            .find_by_plate("NONE-01")
            .await
            .unwrap()
            .is_none());
        handle.shutdown().await;
    }
}
