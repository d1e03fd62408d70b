//! Detection-avoidance passes and their orchestrator.

pub mod diversity;
pub mod features;
pub mod patterns;
pub mod perplexity;

use rand::Rng;
use tracing::instrument;

use crate::domain::{AvoidMethod, TransformConfig};

use self::diversity::LengthDiversifier;
use self::features::FeatureInjector;
use self::patterns::PatternNeutralizer;
use self::perplexity::PerplexityAdjuster;

/// Runs injector → diversifier → neutralizer → perplexity, each only when selected.
#[derive(Clone)]
pub struct Avoider {
  injector: FeatureInjector,
  diversifier: LengthDiversifier,
  neutralizer: PatternNeutralizer,
  perplexity: PerplexityAdjuster,
}

impl Avoider {
  pub fn new(
    injector: FeatureInjector,
    diversifier: LengthDiversifier,
    neutralizer: PatternNeutralizer,
    perplexity: PerplexityAdjuster,
  ) -> Self {
    Self { injector, diversifier, neutralizer, perplexity }
  }

  #[instrument(level = "debug", skip(self, text, cfg, rng), fields(text_len = text.len(), intensity = cfg.intensity.value()))]
  pub fn avoid<R: Rng + ?Sized>(&self, text: &str, cfg: &TransformConfig<AvoidMethod>, rng: &mut R) -> String {
    if text.is_empty() {
      return String::new();
    }
    let p = cfg.intensity.value();
    let mut out = text.to_string();
    if cfg.has(AvoidMethod::HumanFeatures) {
      out = self.injector.inject(&out, p, rng);
    }
    if cfg.has(AvoidMethod::SentenceDiversity) {
      out = self.diversifier.diversify(&out, p, rng);
    }
    if cfg.has(AvoidMethod::ReducePatterns) {
      out = self.neutralizer.neutralize(&out, rng);
    }
    if cfg.has(AvoidMethod::AdjustPerplexity) {
      out = self.perplexity.adjust(&out, p, rng);
    }
    out
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;
  use crate::domain::Intensity;
  use crate::pipeline::{Pipeline, Resources};
  use crate::segment::LexiconSegmenter;

  const TEXT: &str = "论文研究方法很重要。论文降重需要综合多种技术手段，才能取得理想效果。总而言之，这些方法可以有效降低重复率。";

  fn pipeline() -> Pipeline {
    let seg = LexiconSegmenter::new([
      ("论文", "n"),
      ("研究", "vn"),
      ("方法", "n"),
      ("技术", "n"),
      ("手段", "n"),
      ("这些", "r"),
      ("降低", "v"),
      ("重复率", "n"),
    ]);
    Pipeline::new(Resources::seeded(Arc::new(seg)))
  }

  fn cfg<I: IntoIterator<Item = AvoidMethod>>(methods: I, intensity: f64) -> TransformConfig<AvoidMethod> {
    TransformConfig::new(methods, Intensity::new(intensity))
  }

  #[test]
  fn empty_method_set_is_identity() {
    let p = pipeline();
    for seed in 0..4 {
      let mut rng = StdRng::seed_from_u64(seed);
      assert_eq!(p.avoider().avoid(TEXT, &cfg([], 1.0), &mut rng), TEXT);
    }
  }

  #[test]
  fn zero_intensity_leaves_only_pattern_pass_active() {
    let p = pipeline();
    let mut rng = StdRng::seed_from_u64(3);
    for method in [AvoidMethod::HumanFeatures, AvoidMethod::SentenceDiversity, AvoidMethod::AdjustPerplexity] {
      assert_eq!(p.avoider().avoid(TEXT, &cfg([method], 0.0), &mut rng), TEXT, "{:?}", method);
    }
    let out = p.avoider().avoid(TEXT, &cfg([AvoidMethod::ReducePatterns], 0.0), &mut rng);
    assert!(!out.contains("总而言之"), "{}", out);
  }

  #[test]
  fn each_pass_runs_alone() {
    let p = pipeline();

    let out = p.avoider().avoid(TEXT, &cfg([AvoidMethod::SentenceDiversity], 1.0), &mut StdRng::seed_from_u64(1));
    assert!(out.contains("技术手段。才能"), "{}", out);

    let out = p.avoider().avoid(TEXT, &cfg([AvoidMethod::AdjustPerplexity], 1.0), &mut StdRng::seed_from_u64(1));
    assert_ne!(out, TEXT);

    let changed = (0..5).any(|seed| {
      let mut rng = StdRng::seed_from_u64(seed);
      p.avoider().avoid(TEXT, &cfg([AvoidMethod::HumanFeatures], 1.0), &mut rng) != TEXT
    });
    assert!(changed);
  }

  #[test]
  fn passes_run_in_fixed_order() {
    let p = pipeline();
    let a = p.avoider();
    for seed in 0..4 {
      let got = a.avoid(TEXT, &cfg(AvoidMethod::ALL, 0.7), &mut StdRng::seed_from_u64(seed));

      let mut rng = StdRng::seed_from_u64(seed);
      let step = a.injector.inject(TEXT, 0.7, &mut rng);
      let step = a.diversifier.diversify(&step, 0.7, &mut rng);
      let step = a.neutralizer.neutralize(&step, &mut rng);
      let want = a.perplexity.adjust(&step, 0.7, &mut rng);
      assert_eq!(got, want, "seed {}", seed);
    }
  }
}
