use mimalloc::MiMalloc;
use promptbuilder::config::Config;
use promptbuilder::llm::LlmClient;
use promptbuilder::server::{AppState, promptbuilder_router};
use std::net::SocketAddr;
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.basic.database_url,
        loglevel = %cfg.basic.loglevel,
        listen_addr = %cfg.basic.listen_addr,
        listen_port = cfg.basic.listen_port,
        llm_fallback_url = %cfg.llm.api_url.as_ref().map_or("<none>", |u| u.as_str()),
        llm_proxy = %cfg.llm.proxy.as_ref().map_or("<none>", |u| u.as_str()),
        "Configuration loaded"
    );

    let db = promptbuilder::db::spawn(&cfg.basic.database_url).await?;

    if cfg.basic.seed_sample_data {
        if let Err(e) = promptbuilder::seed::seed_sample_data(&db).await {
            warn!(error = %e, "Seeding sample data failed");
        }
    }

    let llm = LlmClient::new(&cfg.llm)?;
    let state = AppState::new(db, llm, &cfg.llm.meta_prompt)
        .with_max_import_bytes(cfg.basic.max_import_bytes)
        .with_static_dir(cfg.basic.static_dir.clone());
    let app = promptbuilder_router(state);

    let addr = SocketAddr::from((cfg.basic.listen_addr, cfg.basic.listen_port));
    let listener = TcpListener::bind(addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Server has shut down gracefully.");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Ctrl+C received, shutting down"),
        () = terminate => info!("SIGTERM received, shutting down"),
    }
}
