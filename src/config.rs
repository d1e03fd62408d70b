//! Loading resource overrides (synonyms, templates, markers, patterns) from TOML.
//!
//! Every section is optional; anything left out keeps the built-in seeds.
//! See `BankConfig` for the schema.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use crate::error::{Result, RewriteError};

#[derive(Clone, Debug, Deserialize, Default)]
pub struct BankConfig {
  #[serde(default)]
  pub resources: ResourcesCfg,
  /// Merged over the seed dictionary, entry by entry.
  #[serde(default)]
  pub synonyms: HashMap<String, Vec<String>>,
  #[serde(default)]
  pub templates: TemplatesCfg,
  #[serde(default)]
  pub features: FeaturesCfg,
  #[serde(default)]
  pub patterns: PatternsCfg,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct ResourcesCfg {
  /// jieba user dictionary (`word [freq] [tag]` per line).
  #[serde(default)] pub user_dict: Option<String>,
}

/// A non-empty list replaces the seeded templates of that category.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct TemplatesCfg {
  #[serde(default)] pub declarative: Vec<String>,
  #[serde(default)] pub passive: Vec<String>,
  #[serde(default)] pub compound: Vec<String>,
}

/// A non-empty list replaces the seeded markers of that kind.
#[derive(Clone, Debug, Deserialize, Default)]
pub struct FeaturesCfg {
  #[serde(default)] pub colloquial: Vec<String>,
  #[serde(default)] pub idiom: Vec<String>,
  #[serde(default)] pub transition: Vec<String>,
  #[serde(default)] pub opinion: Vec<String>,
  #[serde(default)] pub rhetorical: Vec<String>,
  #[serde(default)] pub filler: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Default)]
pub struct PatternsCfg {
  /// Extra regexes, appended after the seeded ones.
  #[serde(default)] pub extra: Vec<String>,
  /// Replaces the seeded vocabulary when non-empty.
  #[serde(default)] pub preferred_words: Vec<String>,
}

/// Read and parse one config file.
pub fn load_bank_config(path: &Path) -> Result<BankConfig> {
  let raw = std::fs::read_to_string(path)?;
  toml::from_str::<BankConfig>(&raw)
    .map_err(|e| RewriteError::resource(format!("Failed to parse '{}': {}", path.display(), e)))
}

/// Attempt to load `BankConfig` from REWRITE_CONFIG_PATH. On any parsing/IO error, returns None.
pub fn load_bank_config_from_env() -> Option<BankConfig> {
  let path = std::env::var("REWRITE_CONFIG_PATH").ok()?;
  match load_bank_config(Path::new(&path)) {
    Ok(cfg) => {
      info!(target: "jiangchong", %path, "Loaded resource config (TOML)");
      Some(cfg)
    }
    Err(e) => {
      error!(target: "jiangchong", %path, error = %e, "Failed to load TOML config; using seeds");
      None
    }
  }
}
