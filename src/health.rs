use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;

pub const ALIVE_TEXT: &str = "Bot is running dynamic cycles! 🇵🇱";

async fn alive() -> &'static str {
    ALIVE_TEXT
}

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

/// Отвечает на GET / для внешнего мониторинга хостинга.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("🌐 Liveness endpoint on {}", addr);
    axum::serve(listener, router()).await?;
    Ok(())
}
