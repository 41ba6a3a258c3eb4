//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the redirect handler
//! - Wire up middleware (tracing, timeout)
//! - Serve plain HTTP or HTTPS until shutdown is signalled
//! - Dispatch each request: diagnostic ping, discovery page, redirect or 404

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Request, State},
    http::header,
    response::Response,
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::RedirectorConfig;
use crate::http::response::{
    bad_request_response, not_found_response, page_response, pong_response, redirect_response,
    render_error_response, RenderError, Renderer,
};
use crate::net::tls::load_tls_config;
use crate::routing::{
    decode_request_path, normalize_request_path, resolve, ImportMapping, Resolution,
};

/// How long in-flight TLS connections get to finish after shutdown.
const TLS_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Error type for running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load TLS certificate: {0}")]
    Tls(#[source] std::io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub mapping: Arc<ImportMapping>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    /// Compile the page template for `config`.
    pub fn new(config: &RedirectorConfig) -> Result<Self, RenderError> {
        Ok(Self {
            mapping: Arc::new(config.mapping.clone()),
            renderer: Arc::new(Renderer::new(config.vcs.clone())?),
        })
    }
}

/// HTTP server for the import path root.
pub struct HttpServer {
    router: Router,
    config: RedirectorConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RedirectorConfig) -> Result<Self, ServerError> {
        let state = AppState::new(&config)?;
        let router = build_router(state, config.request_timeout);
        Ok(Self { router, config })
    }

    /// Bind the configured address and serve, over TLS if configured.
    pub async fn serve(self, shutdown: broadcast::Receiver<()>) -> Result<(), ServerError> {
        if let Some(paths) = &self.config.tls {
            let tls = load_tls_config(paths).await.map_err(ServerError::Tls)?;
            tracing::info!(
                cert = %paths.cert_path.display(),
                key = %paths.key_path.display(),
                "TLS certificate loaded"
            );
            return self.run_tls(tls, shutdown).await;
        }

        let addr = self.config.listen_addr;
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        self.run(listener, shutdown).await
    }

    /// Run plain HTTP on an already bound listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Run HTTPS on the configured address.
    pub async fn run_tls(
        self,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), ServerError> {
        let addr = self.config.listen_addr;
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            drain.graceful_shutdown(Some(TLS_DRAIN_TIMEOUT));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
#[allow(deprecated)]
pub fn build_router(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", any(redirect_handler))
        .route("/{*path}", any(redirect_handler))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(request_timeout)),
        )
}

/// Answer a discovery request for `Host + path`.
async fn redirect_handler(State(state): State<AppState>, request: Request) -> Response {
    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| request.uri().authority().map(|a| a.as_str()))
        .unwrap_or_default();
    let decoded = match decode_request_path(request.uri().path()) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::debug!(
                path = %request.uri().path(),
                error = %e,
                "Request path is not UTF-8"
            );
            return bad_request_response();
        }
    };
    let path = normalize_request_path(host, &decoded);

    if state.mapping.is_ping(&path) {
        return pong_response();
    }

    match resolve(&state.mapping, &path) {
        Resolution::Render(resolved) => {
            tracing::debug!(
                path = %path,
                import_root = %resolved.import_root,
                repo_root = %resolved.repo_root,
                suffix = %resolved.suffix,
                "Resolved import path"
            );
            match state.renderer.render(&resolved) {
                Ok(body) => page_response(body),
                Err(e) => {
                    tracing::error!(path = %path, error = %e, "Failed to render page");
                    render_error_response(&e)
                }
            }
        }
        Resolution::RedirectToRepo(repo_root) => {
            tracing::debug!(path = %path, location = %repo_root, "Redirecting to repository root");
            redirect_response(repo_root)
        }
        Resolution::NoMatch => {
            tracing::debug!(path = %path, "No import path matched");
            not_found_response()
        }
    }
}
