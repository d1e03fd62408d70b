//! Domain models: method tags, intensity, per-call configuration and results.

use std::collections::HashSet;
use std::hash::Hash;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chance::clamp_probability;
use crate::util::cjk_ratio;

/// Sentence-level rewriting methods, applied in this order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RewriteMethod {
  Synonym,
  Restructure,
  WordOrder,
}

impl RewriteMethod {
  pub const ALL: [RewriteMethod; 3] = [RewriteMethod::Synonym, RewriteMethod::Restructure, RewriteMethod::WordOrder];

  pub fn tag(self) -> &'static str {
    match self {
      RewriteMethod::Synonym => "synonym",
      RewriteMethod::Restructure => "restructure",
      RewriteMethod::WordOrder => "word_order",
    }
  }
}

impl FromStr for RewriteMethod {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    RewriteMethod::ALL
      .into_iter()
      .find(|m| m.tag() == s.trim())
      .ok_or_else(|| format!("unknown rewrite method '{}'", s))
  }
}

/// Detection-avoidance passes, applied in this order.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AvoidMethod {
  HumanFeatures,
  SentenceDiversity,
  ReducePatterns,
  AdjustPerplexity,
}

impl AvoidMethod {
  pub const ALL: [AvoidMethod; 4] = [
    AvoidMethod::HumanFeatures,
    AvoidMethod::SentenceDiversity,
    AvoidMethod::ReducePatterns,
    AvoidMethod::AdjustPerplexity,
  ];

  pub fn tag(self) -> &'static str {
    match self {
      AvoidMethod::HumanFeatures => "human_features",
      AvoidMethod::SentenceDiversity => "sentence_diversity",
      AvoidMethod::ReducePatterns => "reduce_patterns",
      AvoidMethod::AdjustPerplexity => "adjust_perplexity",
    }
  }
}

impl FromStr for AvoidMethod {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    AvoidMethod::ALL
      .into_iter()
      .find(|m| m.tag() == s.trim())
      .ok_or_else(|| format!("unknown avoid method '{}'", s))
  }
}

/// Probability in [0, 1] that parametrizes every gate in the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Intensity(f64);

impl Intensity {
  pub const DEFAULT: f64 = 0.5;

  /// Clamps into [0, 1]; NaN becomes 0.
  pub fn new(value: f64) -> Self {
    Intensity(clamp_probability(value))
  }

  pub fn value(self) -> f64 {
    self.0
  }
}

impl Default for Intensity {
  fn default() -> Self { Intensity(Self::DEFAULT) }
}

/// Selected methods plus the intensity they run at.
#[derive(Clone, Debug)]
pub struct TransformConfig<M: Eq + Hash> {
  pub methods: HashSet<M>,
  pub intensity: Intensity,
}

impl<M: Eq + Hash + Copy> TransformConfig<M> {
  pub fn new<I: IntoIterator<Item = M>>(methods: I, intensity: Intensity) -> Self {
    Self { methods: methods.into_iter().collect(), intensity }
  }

  pub fn has(&self, method: M) -> bool {
    self.methods.contains(&method)
  }
}

impl Default for TransformConfig<RewriteMethod> {
  fn default() -> Self { Self::new(RewriteMethod::ALL, Intensity::default()) }
}

impl Default for TransformConfig<AvoidMethod> {
  fn default() -> Self { Self::new(AvoidMethod::ALL, Intensity::default()) }
}

/// Configuration for one `process_document` call. Both stages share one intensity.
#[derive(Clone, Debug, Default)]
pub struct ProcessConfig {
  pub rewrite: TransformConfig<RewriteMethod>,
  pub avoid: TransformConfig<AvoidMethod>,
}

impl ProcessConfig {
  pub fn new<R, A>(rewrite_methods: R, avoid_methods: A, intensity: f64) -> Self
  where
    R: IntoIterator<Item = RewriteMethod>,
    A: IntoIterator<Item = AvoidMethod>,
  {
    let intensity = Intensity::new(intensity);
    Self {
      rewrite: TransformConfig::new(rewrite_methods, intensity),
      avoid: TransformConfig::new(avoid_methods, intensity),
    }
  }

  pub fn intensity(&self) -> Intensity {
    self.rewrite.intensity
  }
}

/// Language used to pick a sentence splitter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Language {
  Chinese,
  Other,
}

impl Language {
  /// Chinese when at least 30% of the letters are CJK ideographs.
  pub fn detect(text: &str) -> Self {
    if text.is_empty() || cjk_ratio(text) >= 0.3 { Language::Chinese } else { Language::Other }
  }
}

/// Outcome of one `process_document` call.
#[derive(Clone, Debug, Serialize)]
pub struct ProcessOutput {
  pub cleaned_text: String,
  pub rewritten_text: String,
  pub final_text: String,
  /// Token-set change between cleaned and rewritten text.
  pub rewrite_change_rate: f64,
  /// Token-set change between cleaned and final text.
  pub final_change_rate: f64,
}
