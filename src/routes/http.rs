//! HTTP endpoint handlers. These are thin wrappers that forward to the pipeline.
//! Each handler is instrumented and logs sizes and basic result info, never the text.

use std::sync::Arc;

use axum::{
  extract::{rejection::JsonRejection, State},
  response::IntoResponse,
  Json,
};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::error::RewriteError;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info", skip(state, body), fields(request_id = %Uuid::new_v4()))]
pub async fn http_post_process(
  State(state): State<Arc<AppState>>,
  body: Result<Json<ProcessIn>, JsonRejection>,
) -> Result<Json<ProcessOut>, RewriteError> {
  let Json(body) = body.map_err(|e| {
    debug!(target: "jiangchong", error = %e, "Rejected request body");
    RewriteError::validation("请提供文本")
  })?;
  let cfg = body.config()?;
  let text = body.text.unwrap_or_default();
  let original_text = text.clone();

  let pipeline = state.pipeline.clone();
  let mut rng = state.request_rng();
  let out = tokio::task::spawn_blocking(move || pipeline.process_document(&text, &cfg, &mut rng))
    .await
    .map_err(|e| {
      error!(target: "jiangchong", error = %e, "Pipeline worker failed");
      RewriteError::processing(e.to_string())
    })??;

  info!(
    target: "jiangchong",
    text_len = original_text.len(),
    final_len = out.final_text.len(),
    rewrite_change_rate = out.rewrite_change_rate,
    final_change_rate = out.final_change_rate,
    "HTTP process served"
  );
  Ok(Json(ProcessOut::new(original_text, out)))
}
