//! Network module with deferred startup lifecycle.
//!
//! Implements the deferred startup pattern: `new()` creates resources,
//! `start()` binds the TCP listener, and `serve()` starts accepting
//! connections. The gap between `start()` and `serve()` is where callers
//! can seed data or inspect state (tests do both).

use std::future::Future;
use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tracing::info;

use autolot_core::Error;

use crate::config::AppConfig;
use crate::tenant::{subdomain_gate, token_gate};

use super::handlers::{
    create_vehicle_handler, delete_vehicle_handler, get_site_config_handler, get_vehicle_handler,
    health_handler, list_vehicles_handler, liveness_handler, login_handler,
    public_site_config_handler, public_vehicle_handler, public_vehicles_handler,
    readiness_handler, signup_handler, update_site_config_handler, update_vehicle_handler,
    AppState,
};
use super::middleware::apply_http_layers;
use super::shutdown::ShutdownController;

/// Manages the full HTTP server lifecycle.
///
/// 1. `new()` -- allocates shared state (stores, services, shutdown
///    controller), failing fast on invalid configuration
/// 2. `start()` -- binds the TCP listener to the configured address
/// 3. `serve()` -- accepts connections until shutdown is signalled
pub struct NetworkModule {
    config: AppConfig,
    listener: Option<TcpListener>,
    state: AppState,
}

impl NetworkModule {
    /// Creates the module without binding any port.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the auth configuration is
    /// rejected (weak signing secret, zero TTL).
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let shutdown = Arc::new(ShutdownController::new());
        let state = AppState::new(&config.auth, shutdown)?;
        Ok(Self {
            config,
            listener: None,
            state,
        })
    }

    /// Shared application state, for seeding and inspection.
    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Assembles the axum router: routes, tenant gates, transport stack.
    ///
    /// Gate ordering: the subdomain gate is the outer of the two layers,
    /// so within one request it completes fully before the token gate
    /// begins. The transport stack wraps both.
    #[must_use]
    pub fn build_router(&self) -> Router {
        let state = self.state.clone();

        let gates = ServiceBuilder::new()
            .layer(middleware::from_fn_with_state(
                state.clone(),
                subdomain_gate,
            ))
            .layer(middleware::from_fn_with_state(state.clone(), token_gate));

        let router = Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .route("/health/ready", get(readiness_handler))
            .route("/api/auth/signup", post(signup_handler))
            .route("/api/auth/login", post(login_handler))
            .route(
                "/api/admin/vehicles",
                get(list_vehicles_handler).post(create_vehicle_handler),
            )
            .route(
                "/api/admin/vehicles/{id}",
                get(get_vehicle_handler)
                    .put(update_vehicle_handler)
                    .delete(delete_vehicle_handler),
            )
            .route(
                "/api/admin/site-config",
                get(get_site_config_handler).put(update_site_config_handler),
            )
            .route("/api/public/vehicles", get(public_vehicles_handler))
            .route("/api/public/vehicles/{id}", get(public_vehicle_handler))
            .route("/api/public/site-config", get(public_site_config_handler))
            .layer(gates);

        apply_http_layers(router, &self.config.network).with_state(state)
    }

    /// Binds the TCP listener to the configured host and port.
    ///
    /// Returns the actual bound port, which may differ from the
    /// configured port when port 0 is used (OS-assigned).
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn start(&mut self) -> anyhow::Result<u16> {
        let addr = format!("{}:{}", self.config.network.host, self.config.network.port);
        let listener = TcpListener::bind(&addr).await?;
        let port = listener.local_addr()?.port();

        info!("TCP listener bound to {}:{}", self.config.network.host, port);

        self.listener = Some(listener);
        Ok(port)
    }

    /// Serves connections until the shutdown future resolves.
    ///
    /// Consumes `self` because the listener is moved into the server.
    ///
    /// # Errors
    ///
    /// Returns an error on fatal I/O failures.
    ///
    /// # Panics
    ///
    /// Panics if `start()` was not called before `serve()`.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> anyhow::Result<()> {
        let router = self.build_router();
        let listener = self
            .listener
            .expect("start() must be called before serve()");

        let controller = Arc::clone(&self.state.shutdown);
        controller.set_ready();

        // Transition to Draining as soon as the signal fires, so the
        // readiness probe stops routing traffic during the drain window.
        let drain_controller = Arc::clone(&controller);
        let graceful = async move {
            shutdown.await;
            drain_controller.trigger_shutdown();
        };

        if let Some(tls) = self.config.network.tls.clone() {
            serve_tls(listener, router, &tls, graceful).await?;
        } else {
            info!("Serving plain HTTP connections");
            axum::serve(listener, router)
                .with_graceful_shutdown(graceful)
                .await?;
        }

        controller.set_stopped();
        info!("Server stopped");
        Ok(())
    }
}

/// Serves TLS connections using `axum-server` with rustls, reusing the
/// pre-bound TCP listener.
async fn serve_tls(
    listener: TcpListener,
    router: Router,
    tls: &super::config::TlsConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    use axum_server::tls_rustls::RustlsConfig;

    let rustls_config = RustlsConfig::from_pem_file(&tls.cert_path, &tls.key_path)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load TLS certificates: {e}"))?;

    let addr = listener.local_addr()?;
    let std_listener = listener.into_std()?;
    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();

    tokio::spawn(async move {
        shutdown.await;
        shutdown_handle.graceful_shutdown(None);
    });

    info!("Serving TLS connections on {}", addr);

    axum_server::from_tcp_rustls(std_listener, rustls_config)
        .handle(handle)
        .serve(router.into_make_service())
        .await?;

    Ok(())
}
