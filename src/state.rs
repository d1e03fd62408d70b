//! Application state: the pipeline built once at startup plus the RNG policy.
//!
//! This module owns:
//!   - the `Pipeline` (segmenter and every bank, behind `Arc`s)
//!   - the optional REWRITE_SEED that makes responses reproducible

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, instrument, warn};

use crate::config::load_bank_config_from_env;
use crate::error::Result;
use crate::pipeline::{Pipeline, Resources};

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub seed: Option<u64>,
}

fn seed_from_env() -> Option<u64> {
    let raw = std::env::var("REWRITE_SEED").ok()?;
    match raw.trim().parse::<u64>() {
        Ok(seed) => Some(seed),
        Err(e) => {
            warn!(target: "jiangchong", %raw, error = %e, "Ignoring invalid REWRITE_SEED");
            None
        }
    }
}

impl AppState {
    /// Build state from env: load config, build resources, wire the pipeline.
    /// Fails only when a configured resource cannot be loaded.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Result<Self> {
        let cfg = load_bank_config_from_env().unwrap_or_default();
        let resources = Resources::from_config(&cfg)?;
        Ok(Self::with_resources(resources, seed_from_env()))
    }

    pub fn with_resources(resources: Resources, seed: Option<u64>) -> Self {
        resources.log_inventory();
        match seed {
            Some(seed) => info!(target: "jiangchong", seed, "Deterministic mode: every request reuses REWRITE_SEED"),
            None => info!(target: "jiangchong", "Requests draw from entropy-seeded RNGs"),
        }
        Self { pipeline: Arc::new(Pipeline::new(resources)), seed }
    }

    /// Fresh RNG for one request.
    pub fn request_rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}
