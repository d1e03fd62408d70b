//! Jiangchong · Academic Text Rewriting Backend
//!
//! - Axum HTTP API in front of the rewriting pipeline
//! - jieba segmentation, seed banks with optional TOML overrides
//! - Static front-end fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                : u16 (default 5000)
//!   REWRITE_CONFIG_PATH : path to TOML resource overrides
//!   REWRITE_SEED        : u64, makes every response reproducible
//!   LOG_LEVEL           : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT          : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

use jiangchong::routes::build_router;
use jiangchong::state::AppState;
use jiangchong::telemetry;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Segmenter and banks load once; a broken resource stops startup.
  let state = match AppState::new() {
    Ok(state) => Arc::new(state),
    Err(e) => {
      error!(target: "jiangchong", error = %e, "Failed to load linguistic resources");
      return Err(e.into());
    }
  };

  let app = build_router(state.clone());

  // Read port from env or default to 5000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 5000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "jiangchong", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
