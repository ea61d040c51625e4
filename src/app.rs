use crate::{
    cli, context, rest,
    storage::{self, Storage},
    stores::{
        CategoryEvent, CategoryStore, LogNotifier, MockAuthenticator, Notifier, SessionEvent,
        SessionStore,
    },
};
use anyhow::{Context as AnyhowContext, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// The two state containers, constructed once and shared by every consumer.
#[derive(Clone)]
pub struct Stores {
    pub categories: CategoryStore,
    pub session: SessionStore,
}

impl Stores {
    /// Build both stores over `storage` and load their persisted snapshots.
    pub fn open(
        storage: Arc<dyn Storage + Send + Sync>,
        notifier: Arc<dyn Notifier>,
        latency: Duration,
    ) -> Self {
        let categories = CategoryStore::open(storage.clone(), notifier.clone(), latency);
        let session = SessionStore::open(storage, notifier, Arc::new(MockAuthenticator), latency);
        Self {
            categories,
            session,
        }
    }
}

/// The main application state.
/// decoupled from CLI parsing to allow for easier testing.
pub struct App {
    config: context::Context,
    stores: Stores,
    shutdown: CancellationToken,
}

impl App {
    /// Factory method to build the App from CLI arguments.
    pub fn from_cli() -> Result<(App, cli::Cli)> {
        let cli = crate::cli::parse();

        crate::tracing::set_log_file(cli.log_file.as_deref().map(Path::new));

        let ctx = context::Context::from_cli(&cli);
        log_startup_info(&ctx);

        let storage = init_storage(&ctx)?;
        let stores = Stores::open(storage, Arc::new(LogNotifier), ctx.latency);

        Ok((App::new(ctx, stores), cli))
    }

    pub fn new(config: context::Context, stores: Stores) -> Self {
        Self {
            config,
            stores,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    /// Main entry point for the daemon.
    pub async fn run_daemon(&self) -> Result<()> {
        self.log_runtime_config();

        let mut rest_handle = self.spawn_rest_server();
        let mut change_log_handle = self.spawn_change_log();

        self.wait_for_shutdown(&mut rest_handle, &mut change_log_handle)
            .await
    }

    // --- Helper Methods ---

    fn spawn_rest_server(&self) -> JoinHandle<()> {
        let addr = self.config.api_listen;
        let stores = self.stores.clone();
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            if let Err(e) = rest::serve(addr, stores, token).await {
                log::error!("REST server failed: {:#}", e);
            }
        })
    }

    /// Log every committed store change until shutdown.
    fn spawn_change_log(&self) -> JoinHandle<()> {
        let mut categories = self.stores.categories.subscribe();
        let mut session = self.stores.session.subscribe();
        let token = self.shutdown.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => break,
                    event = categories.recv() => match event {
                        Ok(event) => log_category_event(&event),
                        Err(RecvError::Lagged(skipped)) => {
                            log::warn!("Change log skipped {} category events", skipped)
                        }
                        Err(RecvError::Closed) => break,
                    },
                    event = session.recv() => match event {
                        Ok(event) => log_session_event(&event),
                        Err(RecvError::Lagged(skipped)) => {
                            log::warn!("Change log skipped {} session events", skipped)
                        }
                        Err(RecvError::Closed) => break,
                    },
                }
            }
        })
    }

    async fn wait_for_shutdown(
        &self,
        rest_task: &mut JoinHandle<()>,
        change_log_task: &mut JoinHandle<()>,
    ) -> Result<()> {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => log::info!("🧨 Ctrl-C received, shutting down..."),
            _ = &mut *rest_task => log::error!("REST task exited unexpectedly"),
            _ = &mut *change_log_task => log::error!("Change log task exited unexpectedly"),
        }

        self.shutdown.cancel();

        // A completed JoinHandle must not be polled again.
        if !rest_task.is_finished() {
            let _ = rest_task.await;
        }
        if !change_log_task.is_finished() {
            let _ = change_log_task.await;
        }

        log::info!("✅ Shutdown complete");
        Ok(())
    }

    fn log_runtime_config(&self) {
        log::info!("🌐 REST API: http://{}", self.config.api_listen);
        log::info!("⏱️ Store latency: {:?}", self.config.latency);
        if let Some(path) = self.config.log_file.as_deref() {
            log::info!("📝 Log file: {}", path.to_string_lossy());
        }
    }
}

// --- Standalone Helpers ---

fn log_category_event(event: &CategoryEvent) {
    match event {
        CategoryEvent::Loaded { count } => log::info!("📦 categories loaded ({})", count),
        CategoryEvent::Created(c) => log::info!("➕ category {} created: {}", c.id, c.name),
        CategoryEvent::Updated(c) => log::info!("✏️ category {} updated: {}", c.id, c.name),
        CategoryEvent::Deleted(id) => log::info!("🗑️ category {} deleted", id),
    }
}

fn log_session_event(event: &SessionEvent) {
    match event {
        SessionEvent::SignedIn(identity) => log::info!("🔓 signed in as {}", identity.email),
        SessionEvent::SignedOut => log::info!("🔒 signed out"),
    }
}

fn log_startup_info(ctx: &context::Context) {
    log::info!("🚀 Starting revisit");
    if ctx.ephemeral {
        log::info!("📂 Storage: in-memory (ephemeral)");
    } else {
        log::info!("📂 Data dir: {}", ctx.data_dir.to_string_lossy());
    }
}

fn init_storage(ctx: &context::Context) -> Result<Arc<dyn Storage + Send + Sync>> {
    if ctx.ephemeral {
        return Ok(Arc::new(storage::MemoryStorage::new()));
    }

    std::fs::create_dir_all(&ctx.data_dir)
        .with_context(|| format!("creating data dir {}", ctx.data_dir.display()))?;

    let sqlite = storage::SqliteStorage::new(ctx.db_path());
    if ctx.reset {
        sqlite.reset_all().context("resetting storage")?;
    }
    sqlite.init().context("initializing storage")?;

    Ok(Arc::new(sqlite))
}

// --- Entry Point ---

pub async fn run() -> Result<()> {
    let (app, cli) = App::from_cli()?;

    // Handle one-shot commands
    if let Some(cmd) = &cli.cmd {
        return cmd.run(app.stores()).await;
    }

    app.run_daemon().await
}
