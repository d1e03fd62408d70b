//! End-to-end document processing: validate → clean → rewrite → avoid.
//!
//! [`Resources`] holds everything loaded at startup. It is built once and
//! shared read-only by every call through `Arc`s.

use std::path::Path;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, info, instrument};

use crate::avoid::diversity::LengthDiversifier;
use crate::avoid::features::{FeatureBank, FeatureInjector, FeatureKind};
use crate::avoid::patterns::{PatternBank, PatternFamily, PatternNeutralizer};
use crate::avoid::perplexity::PerplexityAdjuster;
use crate::avoid::Avoider;
use crate::config::BankConfig;
use crate::domain::{ProcessConfig, ProcessOutput};
use crate::error::{Result, RewriteError};
use crate::metrics::{change_rate, pattern_hits};
use crate::preprocess::Preprocessor;
use crate::reorder::WordOrderPermuter;
use crate::restructure::{Restructurer, TemplateBank, TemplateCategory};
use crate::rewriter::Rewriter;
use crate::segment::{JiebaSegmenter, Segmenter};
use crate::synonym::{SynonymDictionary, SynonymEngine};

/// Segmenter plus every bank the transforms read from.
#[derive(Clone)]
pub struct Resources {
  pub segmenter: Arc<dyn Segmenter>,
  pub synonyms: Arc<SynonymDictionary>,
  pub templates: Arc<TemplateBank>,
  pub features: Arc<FeatureBank>,
  pub patterns: Arc<PatternBank>,
}

impl Resources {
  /// Built-in banks around the given segmenter.
  pub fn seeded(segmenter: Arc<dyn Segmenter>) -> Self {
    Self {
      segmenter,
      synonyms: Arc::new(SynonymDictionary::seeded()),
      templates: Arc::new(TemplateBank::seeded()),
      features: Arc::new(FeatureBank::seeded()),
      patterns: Arc::new(PatternBank::seeded()),
    }
  }

  /// Seeds with `cfg` applied on top, and a jieba segmenter (with the
  /// configured user dictionary, if any). Unreadable dictionaries and
  /// invalid regexes are fatal.
  pub fn from_config(cfg: &BankConfig) -> Result<Self> {
    let segmenter: Arc<dyn Segmenter> = match &cfg.resources.user_dict {
      Some(path) => Arc::new(JiebaSegmenter::with_user_dict(Path::new(path))?),
      None => Arc::new(JiebaSegmenter::new()),
    };
    Self::with_segmenter(segmenter, cfg)
  }

  /// Like [`Resources::from_config`] but with a caller-supplied segmenter.
  pub fn with_segmenter(segmenter: Arc<dyn Segmenter>, cfg: &BankConfig) -> Result<Self> {
    let mut synonyms = SynonymDictionary::seeded();
    for (word, candidates) in &cfg.synonyms {
      synonyms.insert(word.clone(), candidates.clone());
    }

    let mut templates = TemplateBank::seeded();
    for (category, list) in [
      (TemplateCategory::Declarative, &cfg.templates.declarative),
      (TemplateCategory::Passive, &cfg.templates.passive),
      (TemplateCategory::Compound, &cfg.templates.compound),
    ] {
      if !list.is_empty() {
        templates.replace_category(category, list.clone());
      }
    }

    let mut features = FeatureBank::seeded();
    for (kind, list) in [
      (FeatureKind::Colloquial, &cfg.features.colloquial),
      (FeatureKind::Idiom, &cfg.features.idiom),
      (FeatureKind::Transition, &cfg.features.transition),
      (FeatureKind::Opinion, &cfg.features.opinion),
      (FeatureKind::Rhetorical, &cfg.features.rhetorical),
    ] {
      if !list.is_empty() {
        features.replace_markers(kind, list.clone());
      }
    }
    if !cfg.features.filler.is_empty() {
      features.replace_fillers(cfg.features.filler.clone());
    }

    let mut patterns = PatternBank::seeded();
    for extra in &cfg.patterns.extra {
      patterns.push(PatternFamily::Custom, extra)?;
    }
    if !cfg.patterns.preferred_words.is_empty() {
      patterns.replace_preferred_words(cfg.patterns.preferred_words.iter().cloned())?;
    }

    Ok(Self {
      segmenter,
      synonyms: Arc::new(synonyms),
      templates: Arc::new(templates),
      features: Arc::new(features),
      patterns: Arc::new(patterns),
    })
  }

  /// Startup inventory of what was loaded.
  pub fn log_inventory(&self) {
    info!(
      target: "jiangchong",
      segmenter = self.segmenter.name(),
      synonyms = self.synonyms.len(),
      templates = self.templates.len(),
      feature_markers = self.features.len(),
      "Linguistic resources ready"
    );
    self.patterns.log_inventory();
  }
}

/// The whole transformation pipeline, wired once from [`Resources`].
#[derive(Clone)]
pub struct Pipeline {
  pre: Preprocessor,
  rewriter: Rewriter,
  avoider: Avoider,
  patterns: Arc<PatternBank>,
}

impl Pipeline {
  pub fn new(res: Resources) -> Self {
    let pre = Preprocessor::new(res.segmenter);
    let synonyms = SynonymEngine::new(pre.clone(), res.synonyms);
    let rewriter = Rewriter::new(
      pre.clone(),
      synonyms.clone(),
      Restructurer::new(pre.clone(), res.templates),
      WordOrderPermuter::new(pre.clone()),
    );
    let avoider = Avoider::new(
      FeatureInjector::new(pre.clone(), res.features.clone()),
      LengthDiversifier::new(pre.clone(), synonyms.clone()),
      PatternNeutralizer::new(rewriter.clone(), res.patterns.clone()),
      PerplexityAdjuster::new(pre.clone(), synonyms, res.features),
    );
    Self { pre, rewriter, avoider, patterns: res.patterns }
  }

  pub fn preprocessor(&self) -> &Preprocessor {
    &self.pre
  }

  pub fn rewriter(&self) -> &Rewriter {
    &self.rewriter
  }

  pub fn avoider(&self) -> &Avoider {
    &self.avoider
  }

  /// Clean, rewrite and de-pattern one document.
  ///
  /// Only empty or whitespace-only input fails (`Validation`); every
  /// per-sentence failure inside the transforms is contained.
  #[instrument(level = "info", skip(self, text, cfg, rng), fields(text_len = text.len(), intensity = cfg.intensity().value()))]
  pub fn process_document<R: Rng + ?Sized>(&self, text: &str, cfg: &ProcessConfig, rng: &mut R) -> Result<ProcessOutput> {
    if text.trim().is_empty() {
      return Err(RewriteError::validation("请提供文本"));
    }
    let cleaned_text = self.pre.clean(text);
    let rewritten_text = self.rewriter.rewrite(&cleaned_text, &cfg.rewrite, rng);
    let final_text = self.avoider.avoid(&rewritten_text, &cfg.avoid, rng);

    let rewrite_change_rate = change_rate(&self.pre, &cleaned_text, &rewritten_text);
    let final_change_rate = change_rate(&self.pre, &cleaned_text, &final_text);
    debug!(
      target: "jiangchong",
      rewrite_change_rate,
      final_change_rate,
      patterns_before = pattern_hits(&self.patterns, &cleaned_text),
      patterns_after = pattern_hits(&self.patterns, &final_text),
      "Document processed"
    );
    Ok(ProcessOutput { cleaned_text, rewritten_text, final_text, rewrite_change_rate, final_change_rate })
  }
}

#[cfg(test)]
mod tests {
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  use super::*;
  use crate::config::{FeaturesCfg, PatternsCfg};
  use crate::domain::{AvoidMethod, RewriteMethod};
  use crate::segment::LexiconSegmenter;

  fn lexicon() -> Arc<dyn Segmenter> {
    Arc::new(LexiconSegmenter::new([("论文", "n"), ("研究", "vn"), ("方法", "n")]))
  }

  #[test]
  fn empty_or_blank_text_is_a_validation_error() {
    let p = Pipeline::new(Resources::seeded(lexicon()));
    let mut rng = StdRng::seed_from_u64(0);
    for text in ["", "  \n\t"] {
      let err = p.process_document(text, &ProcessConfig::default(), &mut rng).unwrap_err();
      assert!(matches!(err, RewriteError::Validation(_)));
    }
  }

  #[test]
  fn nothing_selected_only_cleans() {
    let p = Pipeline::new(Resources::seeded(lexicon()));
    let mut rng = StdRng::seed_from_u64(0);
    let cfg = ProcessConfig::new([], [], 1.0);
    let out = p.process_document("论文★研究方法。", &cfg, &mut rng).unwrap();
    assert_eq!(out.cleaned_text, "论文研究方法。");
    assert_eq!(out.rewritten_text, out.cleaned_text);
    assert_eq!(out.final_text, out.cleaned_text);
    assert_eq!(out.rewrite_change_rate, 0.0);
    assert_eq!(out.final_change_rate, 0.0);
  }

  #[test]
  fn full_synonym_pass_changes_text() {
    let p = Pipeline::new(Resources::seeded(lexicon()));
    let mut rng = StdRng::seed_from_u64(0);
    let cfg = ProcessConfig::new([RewriteMethod::Synonym], [], 1.0);
    let out = p.process_document("论文研究方法", &cfg, &mut rng).unwrap();
    assert_ne!(out.rewritten_text, out.cleaned_text);
    assert!(out.rewrite_change_rate > 0.0 && out.rewrite_change_rate <= 1.0);
  }

  #[test]
  fn config_overrides_are_applied() {
    let cfg = BankConfig {
      synonyms: [("方法".to_string(), vec!["路子".to_string()])].into_iter().collect(),
      features: FeaturesCfg { filler: vec!["其实".into()], ..Default::default() },
      patterns: PatternsCfg { extra: vec!["总体而言".into()], preferred_words: vec!["robust".into()] },
      ..Default::default()
    };
    let res = Resources::with_segmenter(lexicon(), &cfg).unwrap();
    assert_eq!(res.synonyms.candidates("方法"), Some(&["路子".to_string()][..]));
    assert!(res.synonyms.contains("论文"));
    assert_eq!(res.features.fillers(), &["其实".to_string()]);
    assert_eq!(res.patterns.entries().last().map(|e| e.family), Some(PatternFamily::Custom));
    assert_eq!(res.patterns.preferred_words().collect::<Vec<_>>(), vec!["robust"]);
  }

  #[test]
  fn invalid_extra_pattern_is_fatal() {
    let cfg = BankConfig {
      patterns: PatternsCfg { extra: vec!["[".into()], preferred_words: vec![] },
      ..Default::default()
    };
    let err = Resources::with_segmenter(lexicon(), &cfg).err().unwrap();
    assert!(matches!(err, RewriteError::ResourceUnavailable(_)));
  }

  #[test]
  fn avoid_only_runs_selected_passes() {
    let p = Pipeline::new(Resources::seeded(lexicon()));
    let mut rng = StdRng::seed_from_u64(0);
    let cfg = ProcessConfig::new([], [AvoidMethod::ReducePatterns], 0.0);
    let out = p.process_document("总而言之，论文研究方法。", &cfg, &mut rng).unwrap();
    assert_eq!(out.rewritten_text, out.cleaned_text);
    assert!(!out.final_text.contains("总而言之"));
  }
}
