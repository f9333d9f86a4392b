use pdf_chat::api::{create_router, AppState};
use pdf_chat::application::{ChatService, DocumentService};
use pdf_chat::infrastructure::{
    build_pipelines, logging, AppConfig, InMemorySessionStore, LopdfExtractor,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    logging::init_tracing(config.config.logging.format);

    let pipelines = match build_pipelines(&config) {
        Ok(pipelines) => Some(pipelines),
        Err(e) => {
            warn!(error = %e, "inference pipelines unavailable, uploads will not become ready");
            None
        }
    };

    let documents = DocumentService::new(Arc::new(LopdfExtractor::new()));
    let chat = ChatService::new(documents, pipelines, config.chat_settings());

    let sessions = Arc::new(InMemorySessionStore::with_limits(
        config.config.sessions.limits(),
    ));
    spawn_session_sweeper(sessions.clone(), config.config.sessions.sweep_interval());

    let addr = SocketAddr::new(config.config.server.host.parse()?, config.config.server.port);
    let state = AppState::new(sessions, Arc::new(chat), config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn spawn_session_sweeper(sessions: Arc<InMemorySessionStore>, every: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            match sessions.evict_idle() {
                Ok(0) => {}
                Ok(evicted) => info!(evicted, remaining = sessions.len(), "session sweep"),
                Err(e) => warn!(error = %e, "session sweep failed"),
            }
        }
    });
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
    }
    info!("shutting down");
}
