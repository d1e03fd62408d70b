//! Synonym dictionary and dictionary-driven word substitution.
//!
//! A miss in the dictionary is not an error: the word is returned unchanged.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::{instrument, warn};

use crate::chance::{clamp_probability, pick, roll};
use crate::preprocess::Preprocessor;
use crate::seeds::seed_synonyms;
use crate::util::char_len;

/// Maps a word to its non-empty, ordered list of candidate synonyms.
#[derive(Clone, Debug, Default)]
pub struct SynonymDictionary {
  entries: HashMap<String, Vec<String>>,
}

impl SynonymDictionary {
  pub fn new() -> Self {
    Self::default()
  }

  /// Dictionary built from the bundled seed vocabulary.
  pub fn seeded() -> Self {
    let mut dict = Self::new();
    for (word, candidates) in seed_synonyms() {
      dict.insert(*word, candidates.iter().map(|c| c.to_string()).collect());
    }
    dict
  }

  /// Insert or replace an entry. Empty candidate lists are rejected (returns false).
  pub fn insert<W: Into<String>>(&mut self, word: W, candidates: Vec<String>) -> bool {
    let word = word.into();
    let candidates: Vec<String> = candidates.into_iter().filter(|c| !c.is_empty()).collect();
    if word.is_empty() || candidates.is_empty() {
      warn!(target: "jiangchong", %word, "Ignoring synonym entry with no candidates");
      return false;
    }
    self.entries.insert(word, candidates);
    true
  }

  /// Candidates for `word`, or `None` on a lookup miss.
  pub fn candidates(&self, word: &str) -> Option<&[String]> {
    self.entries.get(word).map(Vec::as_slice)
  }

  pub fn contains(&self, word: &str) -> bool {
    self.entries.contains_key(word)
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }
}

/// Word substitution over a shared, read-only dictionary.
#[derive(Clone)]
pub struct SynonymEngine {
  pre: Preprocessor,
  dict: Arc<SynonymDictionary>,
}

impl SynonymEngine {
  pub fn new(pre: Preprocessor, dict: Arc<SynonymDictionary>) -> Self {
    Self { pre, dict }
  }

  pub fn dictionary(&self) -> &SynonymDictionary {
    &self.dict
  }

  /// A uniformly random candidate for `word`, or `word` itself on a miss.
  pub fn get_synonym<R: Rng + ?Sized>(&self, word: &str, rng: &mut R) -> String {
    self
      .dict
      .candidates(word)
      .and_then(|c| pick(rng, c))
      .cloned()
      .unwrap_or_else(|| word.to_string())
  }

  /// Replace each multi-character word with probability `rate`.
  ///
  /// `rate = 0` returns the input untouched. Tagging failures leave the text
  /// as it was.
  #[instrument(level = "debug", skip(self, text, rng), fields(text_len = text.len(), rate))]
  pub fn substitute<R: Rng + ?Sized>(&self, text: &str, rate: f64, rng: &mut R) -> String {
    let rate = clamp_probability(rate);
    if text.is_empty() || rate == 0.0 {
      return text.to_string();
    }
    let tokens = match self.pre.tag(text) {
      Ok(tokens) => tokens,
      Err(e) => {
        warn!(target: "jiangchong", error = %e, "Tagging failed; keeping sentence");
        return text.to_string();
      }
    };
    let mut out = String::with_capacity(text.len() + 16);
    for token in tokens {
      if char_len(&token.word) > 1 && roll(rng, rate) {
        out.push_str(&self.get_synonym(&token.word, rng));
      } else {
        out.push_str(&token.word);
      }
    }
    out
  }
}
