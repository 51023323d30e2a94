use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use log::{error, info};
use session_store::{MemorySessionStorage, SessionStorage};
use tokio::sync::oneshot;

use crate::config::ServerSettings;
use crate::controllers::{list_controller, todo_controller};
use crate::error::AppError;
use crate::middleware::SessionMiddleware;
use crate::views::Views;

pub struct AppState {
    storage: Arc<dyn SessionStorage>,
    views: Views,
}

impl AppState {
    /// State backed by the in-memory session store.
    pub fn new() -> Result<Self, AppError> {
        Self::with_storage(Arc::new(MemorySessionStorage::new()))
    }

    pub fn with_storage(storage: Arc<dyn SessionStorage>) -> Result<Self, AppError> {
        Ok(Self {
            storage,
            views: Views::new()?,
        })
    }

    pub fn storage(&self) -> Arc<dyn SessionStorage> {
        Arc::clone(&self.storage)
    }

    pub fn views(&self) -> &Views {
        &self.views
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.configure(list_controller::config)
        .configure(todo_controller::config);
}

fn build_server(
    app_state: web::Data<AppState>,
    settings: &ServerSettings,
) -> std::io::Result<actix_web::dev::Server> {
    let cookie_name = settings.session_cookie.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(SessionMiddleware::new(cookie_name.clone()))
            .wrap(Cors::permissive())
            .configure(app_config)
    })
    .workers(settings.workers)
    .bind((settings.bind_addr.as_str(), settings.port))?
    .run();
    Ok(server)
}

pub async fn run(settings: ServerSettings) -> anyhow::Result<()> {
    info!("Starting web service...");

    let app_state = web::Data::new(AppState::new()?);
    let server = build_server(app_state, &settings)?;

    info!(
        "Starting web service on http://{}:{}",
        settings.bind_addr, settings.port
    );

    if let Err(e) = server.await {
        error!("Web server error: {}", e);
        return Err(e.into());
    }

    Ok(())
}

/// Embeddable web service with an explicit start/stop lifecycle.
pub struct WebService {
    shutdown_tx: Option<oneshot::Sender<()>>,
    server_handle: Option<tokio::task::JoinHandle<()>>,
    settings: ServerSettings,
}

impl WebService {
    pub fn new(settings: ServerSettings) -> Self {
        Self {
            shutdown_tx: None,
            server_handle: None,
            settings,
        }
    }

    pub async fn start(&mut self) -> anyhow::Result<()> {
        info!("Starting web service...");
        if self.server_handle.is_some() {
            anyhow::bail!("Web service is already running");
        }

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        let app_state = web::Data::new(AppState::new()?);
        let server = build_server(app_state, &self.settings)?;

        let server_handle = tokio::spawn(async move {
            tokio::select! {
                result = server => {
                    if let Err(e) = result {
                        error!("Web server error: {}", e);
                    }
                }
                _ = &mut shutdown_rx => {
                    info!("Web service shutdown signal received");
                }
            }
        });

        self.shutdown_tx = Some(shutdown_tx);
        self.server_handle = Some(server_handle);

        info!("Web service started successfully");
        Ok(())
    }

    pub async fn stop(&mut self) -> anyhow::Result<()> {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            if shutdown_tx.send(()).is_err() {
                error!("Failed to send shutdown signal");
            }
        }

        if let Some(handle) = self.server_handle.take() {
            if let Err(e) = handle.await {
                error!("Error waiting for server shutdown: {}", e);
                return Err(e.into());
            }
        }

        info!("Web service stopped successfully");
        Ok(())
    }

    pub fn is_running(&self) -> bool {
        self.server_handle.is_some()
    }
}

impl Drop for WebService {
    fn drop(&mut self) {
        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            let _ = shutdown_tx.send(());
        }
    }
}
