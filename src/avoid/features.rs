//! Human-writing markers and the injector that sprinkles them into text.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::{instrument, warn};

use crate::chance::{pick, roll};
use crate::preprocess::Preprocessor;
use crate::seeds::{seed_features, seed_fillers};
use crate::util::{char_len, trim_terminal};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeatureKind {
  Colloquial,
  Idiom,
  Transition,
  Opinion,
  Rhetorical,
}

impl FeatureKind {
  pub const ALL: [FeatureKind; 5] = [
    FeatureKind::Colloquial,
    FeatureKind::Idiom,
    FeatureKind::Transition,
    FeatureKind::Opinion,
    FeatureKind::Rhetorical,
  ];
}

/// Marker lists per kind, plus the filler/hedge words used by the perplexity pass.
#[derive(Clone, Debug, Default)]
pub struct FeatureBank {
  markers: HashMap<FeatureKind, Vec<String>>,
  fillers: Vec<String>,
}

fn owned(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}

fn non_empty(items: Vec<String>) -> Vec<String> {
  items.into_iter().filter(|s| !s.trim().is_empty()).collect()
}

impl FeatureBank {
  pub fn seeded() -> Self {
    let markers = seed_features().iter().map(|(k, m)| (*k, owned(m))).collect();
    Self { markers, fillers: owned(seed_fillers()) }
  }

  /// Replace the markers for one kind. An empty list is ignored.
  pub fn replace_markers(&mut self, kind: FeatureKind, markers: Vec<String>) {
    let markers = non_empty(markers);
    if markers.is_empty() {
      warn!(target: "jiangchong", ?kind, "Ignoring empty marker list");
      return;
    }
    self.markers.insert(kind, markers);
  }

  pub fn replace_fillers(&mut self, fillers: Vec<String>) {
    let fillers = non_empty(fillers);
    if fillers.is_empty() {
      warn!(target: "jiangchong", "Ignoring empty filler list");
      return;
    }
    self.fillers = fillers;
  }

  pub fn markers(&self, kind: FeatureKind) -> &[String] {
    self.markers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn fillers(&self) -> &[String] {
    &self.fillers
  }

  pub fn len(&self) -> usize {
    self.markers.values().map(Vec::len).sum::<usize>() + self.fillers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }
}

#[derive(Clone)]
pub struct FeatureInjector {
  pre: Preprocessor,
  bank: Arc<FeatureBank>,
}

impl FeatureInjector {
  /// Extra draw that keeps first-person opinions rare.
  pub const OPINION_RATE: f64 = 0.3;

  pub fn new(pre: Preprocessor, bank: Arc<FeatureBank>) -> Self {
    Self { pre, bank }
  }

  /// Apply `kind` to one sentence if its precondition holds; otherwise
  /// return the sentence as is.
  pub fn apply<R: Rng + ?Sized>(&self, kind: FeatureKind, index: usize, sentence: &str, rng: &mut R) -> String {
    let len = char_len(sentence);
    let ok = match kind {
      FeatureKind::Colloquial => len > 10,
      FeatureKind::Idiom => len > 15,
      FeatureKind::Transition => index > 0 && len > 10,
      FeatureKind::Opinion => roll(rng, Self::OPINION_RATE),
      FeatureKind::Rhetorical => len > 15,
    };
    if !ok {
      return sentence.to_string();
    }
    let Some(marker) = pick(rng, self.bank.markers(kind)) else {
      return sentence.to_string();
    };
    match kind {
      FeatureKind::Colloquial => {
        if roll(rng, 0.5) {
          format!("{}，{}", marker, sentence)
        } else {
          format!("{}，{}。", trim_terminal(sentence), marker)
        }
      }
      FeatureKind::Idiom => match sentence.split_once('，') {
        Some((head, tail)) => format!("{}，{}，{}", head, marker, tail),
        None => format!("{}，{}。", trim_terminal(sentence), marker),
      },
      FeatureKind::Transition | FeatureKind::Opinion => format!("{}，{}", marker, sentence),
      FeatureKind::Rhetorical => format!("{}{}", trim_terminal(sentence), marker),
    }
  }

  /// One gate per sentence, then a uniformly chosen kind.
  #[instrument(level = "debug", skip(self, text, rng), fields(text_len = text.len(), intensity))]
  pub fn inject<R: Rng + ?Sized>(&self, text: &str, intensity: f64, rng: &mut R) -> String {
    if text.is_empty() {
      return String::new();
    }
    self.pre.map_sentences(text, |i, sentence| {
      if !roll(rng, intensity) {
        return sentence.to_string();
      }
      match pick(rng, &FeatureKind::ALL) {
        Some(kind) => self.apply(*kind, i, sentence, rng),
        None => sentence.to_string(),
      }
    })
  }
}
