//! Server construction and middleware wiring.

mod config;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;

use std::future::Future;
use std::sync::Arc;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::{info, warn};

use gitdoc::Trace;
#[cfg(debug_assertions)]
use gitdoc::doc::ApiDoc;
use gitdoc::domain::DocumentService;
use gitdoc::inbound::http::documents::{
    create_document, delete_document, get_document, list_documents, update_document,
};
use gitdoc::inbound::http::health::{HealthState, live, ready};
use gitdoc::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use state_builders::build_storage;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(list_documents)
        .service(create_document)
        .service(get_document)
        .service(update_document)
        .service(delete_document);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Resolve once the process receives Ctrl-C.
///
/// Never resolves when the signal handler cannot be installed.
async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Wait for `signal`, fail liveness, then stop the server gracefully.
async fn drain_on(
    signal: impl Future<Output = ()>,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) {
    signal.await;
    info!("shutdown requested; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

/// Construct an Actix HTTP server for `config`.
///
/// Connects the selected storage backend, binds the listener and marks the
/// health state ready. Ctrl-C flips liveness to 503 before in-flight requests
/// are drained.
///
/// # Returns
/// A [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when the storage backend cannot be
/// initialised or binding the socket fails.
pub async fn create_server(config: ServerConfig) -> std::io::Result<Server> {
    let bind_addr = config.bind_addr();
    let ports = build_storage(&config.storage).await?;

    let health_state = web::Data::new(HealthState::new(ports.health));
    let http_state = web::Data::new(HttpState::new(
        DocumentService::new(ports.repository),
        Arc::new(DefaultClock),
    ));

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .disable_signals()
        .bind(bind_addr)?
        .run();

    actix_web::rt::spawn(drain_on(
        shutdown_signal(),
        health_state.clone(),
        server.handle(),
    ));
    health_state.mark_ready();
    info!(%bind_addr, "gitdoc server listening");
    Ok(server)
}
