//! Rewrite orchestration: synonym → restructure → word order, per sentence.

use rand::Rng;
use tracing::{debug, instrument};

use crate::chance::roll;
use crate::domain::{RewriteMethod, TransformConfig};
use crate::preprocess::Preprocessor;
use crate::reorder::WordOrderPermuter;
use crate::restructure::Restructurer;
use crate::synonym::SynonymEngine;

#[derive(Clone)]
pub struct Rewriter {
  pre: Preprocessor,
  synonyms: SynonymEngine,
  restructurer: Restructurer,
  permuter: WordOrderPermuter,
}

impl Rewriter {
  pub fn new(
    pre: Preprocessor,
    synonyms: SynonymEngine,
    restructurer: Restructurer,
    permuter: WordOrderPermuter,
  ) -> Self {
    Self { pre, synonyms, restructurer, permuter }
  }

  pub fn synonyms(&self) -> &SynonymEngine {
    &self.synonyms
  }

  /// Rewrite one sentence. Each stage has its own gate on top of the
  /// sentence gate.
  pub fn rewrite_sentence<R: Rng + ?Sized>(
    &self,
    sentence: &str,
    cfg: &TransformConfig<RewriteMethod>,
    rng: &mut R,
  ) -> String {
    let p = cfg.intensity.value();
    let mut out = sentence.to_string();
    if !roll(rng, p) {
      return out;
    }
    if cfg.has(RewriteMethod::Synonym) {
      out = self.synonyms.substitute(&out, p, rng);
    }
    if cfg.has(RewriteMethod::Restructure) && roll(rng, p) {
      out = self.restructurer.restructure(&out, rng);
    }
    if cfg.has(RewriteMethod::WordOrder) && roll(rng, p) {
      out = self.permuter.reorder(&out);
    }
    out
  }

  /// Rewrite every sentence of `text`, keeping sentence order and the
  /// whitespace between sentences. The input is not cleaned here.
  #[instrument(level = "debug", skip(self, text, cfg, rng), fields(text_len = text.len(), intensity = cfg.intensity.value()))]
  pub fn rewrite<R: Rng + ?Sized>(&self, text: &str, cfg: &TransformConfig<RewriteMethod>, rng: &mut R) -> String {
    if text.is_empty() {
      return String::new();
    }
    let mut changed = 0usize;
    let out = self.pre.map_sentences(text, |_, sentence| {
      let rewritten = self.rewrite_sentence(sentence, cfg, rng);
      if rewritten != sentence {
        changed += 1;
      }
      rewritten
    });
    debug!(target: "jiangchong", changed, "Rewrite pass done");
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
  use crate::restructure::TemplateBank;
  use crate::segment::LexiconSegmenter;
  use crate::synonym::SynonymDictionary;

  fn rewriter() -> Rewriter {
    let seg = LexiconSegmenter::new([("论文", "n"), ("研究", "vn"), ("方法", "n"), ("提高", "v"), ("质量", "n")]);
    let pre = Preprocessor::new(Arc::new(seg));
    Rewriter::new(
      pre.clone(),
      SynonymEngine::new(pre.clone(), Arc::new(SynonymDictionary::seeded())),
      Restructurer::new(pre.clone(), Arc::new(TemplateBank::seeded())),
      WordOrderPermuter::new(pre),
    )
  }

  #[test]
  fn zero_intensity_is_identity() {
    let mut rng = StdRng::seed_from_u64(1);
    let cfg = TransformConfig::new(RewriteMethod::ALL, Intensity::new(0.0));
    let text = "论文研究方法很多。\n\n 论文可以提高质量！最后没有标点 ";
    assert_eq!(rewriter().rewrite(text, &cfg, &mut rng), text);
  }

  #[test]
  fn empty_is_empty() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(rewriter().rewrite("", &TransformConfig::default(), &mut rng), "");
  }

  #[test]
  fn no_methods_means_no_change() {
    let mut rng = StdRng::seed_from_u64(1);
    let cfg = TransformConfig::new([], Intensity::new(1.0));
    assert_eq!(rewriter().rewrite("论文研究方法。", &cfg, &mut rng), "论文研究方法。");
  }

  #[test]
  fn full_synonym_rewrite_uses_dictionary_candidates() {
    let mut rng = StdRng::seed_from_u64(42);
    let r = rewriter();
    let cfg = TransformConfig::new([RewriteMethod::Synonym], Intensity::new(1.0));
    let out = r.rewrite("论文研究方法", &cfg, &mut rng);
    let dict = r.synonyms().dictionary();
    let heads = dict.candidates("论文").unwrap();
    assert!(heads.iter().any(|c| out.starts_with(c.as_str())), "{}", out);
    assert!(!out.contains("论文研究"));
  }
}
