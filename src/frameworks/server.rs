// Framework bootstrap for the exporter runtime.

use crate::frameworks::config::{self, ExporterSettings};
use crate::interface_adapters::clients::EngineClient;
use crate::interface_adapters::diagnostics::TracingDiagnostics;
use crate::interface_adapters::render::{AsciiRenderer, GifRenderer};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use std::net::SocketAddr;
use std::{io::Result, sync::Arc};

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

pub async fn run(listener: tokio::net::TcpListener, settings: ExporterSettings) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&settings)?;

    // Start the web server with the export routes wired up.
    let app = routes::app(state);

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([0, 0, 0, 0], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, ExporterSettings::from_env()).await
}

fn build_state(settings: &ExporterSettings) -> Result<Arc<AppState>> {
    // One pooled client for the whole process lifetime.
    let engine = EngineClient::new(&settings.engine_url).map_err(|e| {
        std::io::Error::other(format!(
            "failed to initialize engine client for {}: {e}",
            settings.engine_url
        ))
    })?;
    tracing::debug!(engine_url = %engine.base_url(), "engine client configured");

    Ok(Arc::new(AppState {
        engine: Arc::new(engine),
        ascii: Arc::new(AsciiRenderer),
        still_gif: Arc::new(GifRenderer),
        animation: Arc::new(GifRenderer),
        diagnostics: Arc::new(TracingDiagnostics),
        home_url: settings.home_url.clone(),
    }))
}
