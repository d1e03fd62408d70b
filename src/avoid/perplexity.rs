//! Lexical unpredictability: hedge words and occasional rare synonyms.

use std::sync::Arc;

use rand::Rng;
use tracing::{instrument, warn};

use crate::avoid::features::FeatureBank;
use crate::chance::{pick, roll};
use crate::preprocess::Preprocessor;
use crate::synonym::SynonymEngine;
use crate::util::char_len;

const MIN_CHARS: usize = 16;
const MIN_TOKENS: usize = 6;
const SWAP_RATE: f64 = 0.2;

#[derive(Clone)]
pub struct PerplexityAdjuster {
  pre: Preprocessor,
  synonyms: SynonymEngine,
  features: Arc<FeatureBank>,
}

impl PerplexityAdjuster {
  pub fn new(pre: Preprocessor, synonyms: SynonymEngine, features: Arc<FeatureBank>) -> Self {
    Self { pre, synonyms, features }
  }

  /// Insert one filler at an interior position (longer sentences only) and
  /// swap some multi-character words for synonyms.
  pub fn adjust_sentence<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> String {
    let mut words = match self.pre.tokenize(sentence) {
      Ok(words) => words,
      Err(e) => {
        warn!(target: "jiangchong", error = %e, "Tokenization failed; keeping sentence");
        return sentence.to_string();
      }
    };
    if words.len() >= MIN_TOKENS {
      if let Some(filler) = pick(rng, self.features.fillers()) {
        let at = rng.gen_range(1..words.len());
        words.insert(at, filler.clone());
      }
    }
    for word in words.iter_mut() {
      if char_len(word) > 1 && roll(rng, SWAP_RATE) {
        *word = self.synonyms.get_synonym(word, rng);
      }
    }
    words.concat()
  }

  #[instrument(level = "debug", skip(self, text, rng), fields(text_len = text.len(), intensity))]
  pub fn adjust<R: Rng + ?Sized>(&self, text: &str, intensity: f64, rng: &mut R) -> String {
    if text.is_empty() {
      return String::new();
    }
    self.pre.map_sentences(text, |_, sentence| {
      if char_len(sentence) >= MIN_CHARS && roll(rng, intensity) {
        self.adjust_sentence(sentence, rng)
      } else {
        sentence.to_string()
      }
    })
  }
}
