//! Sentence-length diversification.
//!
//! Uniform sentence lengths are a generated-text tell. When the spread is low,
//! every third sentence is padded and the one after it is split in two.

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::chance::{pick, roll};
use crate::domain::Language;
use crate::preprocess::{split_sentences, Preprocessor};
use crate::synonym::SynonymEngine;
use crate::util::{char_len, PAUSE_MARKS, SENTENCE_TERMINALS};

/// Spread (population std dev, in chars) above which text is left alone.
pub const TARGET_STD_DEV: f64 = 10.0;
const EXPAND_BELOW: usize = 30;
const SPLIT_ABOVE: usize = 20;
const ELABORATION_RATE: f64 = 0.3;

/// Population standard deviation of the character lengths. 0 for no input.
pub fn length_std_dev<S: AsRef<str>>(sentences: &[S]) -> f64 {
  if sentences.is_empty() {
    return 0.0;
  }
  let lengths: Vec<f64> = sentences.iter().map(|s| char_len(s.as_ref()) as f64).collect();
  let n = lengths.len() as f64;
  let mean = lengths.iter().sum::<f64>() / n;
  let variance = lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / n;
  variance.sqrt()
}

/// Split at the first pause mark at or after the midpoint. The mark becomes
/// a full stop and the second half gets one if it has no terminal. `None`
/// when there is no such mark or nothing follows it.
pub fn split_at_pause(sentence: &str) -> Option<String> {
  let mid = char_len(sentence) / 2;
  let (at, mark) = sentence
    .char_indices()
    .skip(mid)
    .find(|(_, c)| PAUSE_MARKS.contains(c))?;
  let head = &sentence[..at];
  let tail = &sentence[at + mark.len_utf8()..];
  if tail.trim().is_empty() {
    return None;
  }
  let mut out = format!("{}。{}", head, tail);
  if !tail.ends_with(SENTENCE_TERMINALS) {
    out.push('。');
  }
  Some(out)
}

#[derive(Clone)]
pub struct LengthDiversifier {
  pre: Preprocessor,
  synonyms: SynonymEngine,
}

impl LengthDiversifier {
  pub fn new(pre: Preprocessor, synonyms: SynonymEngine) -> Self {
    Self { pre, synonyms }
  }

  /// Append "或者说 <synonym>" after some multi-character words.
  pub fn expand<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> String {
    let words = match self.pre.tokenize(sentence) {
      Ok(words) => words,
      Err(e) => {
        warn!(target: "jiangchong", error = %e, "Tokenization failed; keeping sentence");
        return sentence.to_string();
      }
    };
    let dict = self.synonyms.dictionary();
    let mut out = String::with_capacity(sentence.len() * 2);
    for word in &words {
      out.push_str(word);
      if char_len(word) > 1 && roll(rng, ELABORATION_RATE) {
        if let Some(alt) = dict.candidates(word).and_then(|c| pick(rng, c)) {
          out.push_str("或者说");
          out.push_str(alt);
        }
      }
    }
    out
  }

  #[instrument(level = "debug", skip(self, text, rng), fields(text_len = text.len(), intensity))]
  pub fn diversify<R: Rng + ?Sized>(&self, text: &str, intensity: f64, rng: &mut R) -> String {
    if text.is_empty() {
      return String::new();
    }
    let bodies: Vec<&str> = split_sentences(text, Language::detect(text))
      .into_iter()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .collect();
    if bodies.len() < 2 {
      return text.to_string();
    }
    let spread = length_std_dev(&bodies);
    if spread > TARGET_STD_DEV {
      debug!(target: "jiangchong", spread, "Sentence lengths already varied");
      return text.to_string();
    }
    self.pre.map_sentences(text, |i, sentence| {
      if !roll(rng, intensity) {
        return sentence.to_string();
      }
      let len = char_len(sentence);
      match i % 3 {
        0 if len < EXPAND_BELOW => self.expand(sentence, rng),
        1 if len > SPLIT_ABOVE => split_at_pause(sentence).unwrap_or_else(|| sentence.to_string()),
        _ => sentence.to_string(),
      }
    })
  }
}
