//! Stereotyped-pattern detection and neutralization.
//!
//! Matched spans are rewritten in place by byte range, so a span that also
//! occurs earlier in the text only changes where it actually matched.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use rand::Rng;
use regex::{Regex, RegexBuilder};
use tracing::{debug, info, instrument};

use crate::chance::pick;
use crate::domain::{Intensity, RewriteMethod, TransformConfig};
use crate::error::{Result, RewriteError};
use crate::rewriter::Rewriter;
use crate::seeds::{seed_patterns, seed_preferred_words};

/// Fixed intensity used when rewriting a matched span.
pub const SPAN_REWRITE_INTENSITY: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternFamily {
  /// 首先…其次…最后
  Enumeration,
  /// 一方面…另一方面
  Contrast,
  /// 不仅…而且
  Progression,
  /// 因此…所以
  Causal,
  Summary,
  Emphasis,
  Certainty,
  /// Patterns added through configuration.
  Custom,
}

impl PatternFamily {
  /// Marker words and plainer stand-ins, longest marker first.
  pub fn softenings(self) -> &'static [(&'static str, &'static [&'static str])] {
    match self {
      PatternFamily::Enumeration => &[
        ("首先", &["第一", "一开始"]),
        ("其次", &["第二", "接下来"]),
        ("最后", &["最终", "末了"]),
      ],
      PatternFamily::Contrast => &[("另一方面", &["换个角度看"]), ("一方面", &["从一个角度看"])],
      PatternFamily::Progression => &[("不仅", &["不光", "不单"]), ("而且", &["还", "并且"])],
      PatternFamily::Causal => &[("因此", &["于是", "故而"]), ("所以", &["这样一来"])],
      PatternFamily::Summary => &[
        ("总的来说", &["整体来看", "大体上"]),
        ("总而言之", &["概括起来", "简单归纳"]),
        ("综上所述", &["归纳起来", "从上面看"]),
      ],
      PatternFamily::Emphasis => &[
        ("值得注意的是", &["要留意的是"]),
        ("需要指出的是", &["应当说明的是"]),
        ("有必要强调", &["应当强调"]),
      ],
      PatternFamily::Certainty => &[
        ("毫无疑问", &["可以肯定"]),
        ("显而易见", &["很明显"]),
        ("不言而喻", &["不用多说"]),
      ],
      PatternFamily::Custom => &[],
    }
  }
}

#[derive(Clone, Debug)]
pub struct PatternEntry {
  pub family: PatternFamily,
  pub regex: Regex,
}

/// Ordered stereotyped-phrasing regexes plus detector-favored vocabulary.
#[derive(Clone, Debug, Default)]
pub struct PatternBank {
  entries: Vec<PatternEntry>,
  preferred: Vec<(String, Regex)>,
}

static SEEDED: Lazy<PatternBank> = Lazy::new(|| {
  let mut bank = PatternBank::default();
  for (family, pattern) in seed_patterns() {
    bank.push(*family, pattern).expect("seed pattern compiles");
  }
  bank
    .replace_preferred_words(seed_preferred_words().iter().map(|w| w.to_string()))
    .expect("seed vocabulary compiles");
  bank
});

fn preferred_regex(word: &str) -> Result<Regex> {
  RegexBuilder::new(&regex::escape(word))
    .case_insensitive(true)
    .build()
    .map_err(|e| RewriteError::resource(format!("Invalid preferred word '{}': {}", word, e)))
}

impl PatternBank {
  pub fn seeded() -> Self {
    SEEDED.clone()
  }

  /// Append a pattern. An invalid regex is a resource error.
  pub fn push(&mut self, family: PatternFamily, pattern: &str) -> Result<()> {
    let regex = Regex::new(pattern)
      .map_err(|e| RewriteError::resource(format!("Invalid pattern '{}': {}", pattern, e)))?;
    self.entries.push(PatternEntry { family, regex });
    Ok(())
  }

  /// Replace the vocabulary list. Blank words are skipped.
  pub fn replace_preferred_words<I: IntoIterator<Item = String>>(&mut self, words: I) -> Result<()> {
    let mut preferred = Vec::new();
    for word in words.into_iter().filter(|w| !w.trim().is_empty()) {
      let regex = preferred_regex(&word)?;
      preferred.push((word, regex));
    }
    self.preferred = preferred;
    Ok(())
  }

  pub fn entries(&self) -> &[PatternEntry] {
    &self.entries
  }

  pub fn preferred_words(&self) -> impl Iterator<Item = &str> {
    self.preferred.iter().map(|(w, _)| w.as_str())
  }

  /// Matches per family, vocabulary hits excluded.
  pub fn hits(&self, text: &str) -> HashMap<PatternFamily, usize> {
    let mut hits = HashMap::new();
    for entry in &self.entries {
      let n = entry.regex.find_iter(text).count();
      if n > 0 {
        *hits.entry(entry.family).or_insert(0) += n;
      }
    }
    hits
  }

  pub fn log_inventory(&self) {
    info!(
      target: "jiangchong",
      patterns = self.entries.len(),
      preferred_words = self.preferred.len(),
      "Pattern bank ready"
    );
  }
}

/// Swap each family marker inside `span` for a plainer alternative.
pub fn soften<R: Rng + ?Sized>(family: PatternFamily, span: &str, rng: &mut R) -> String {
  let mut out = span.to_string();
  for (marker, alternatives) in family.softenings() {
    if out.contains(*marker) {
      if let Some(alt) = pick(rng, *alternatives) {
        out = out.replace(*marker, alt);
      }
    }
  }
  out
}

#[derive(Clone)]
pub struct PatternNeutralizer {
  rewriter: Rewriter,
  bank: Arc<PatternBank>,
}

impl PatternNeutralizer {
  pub fn new(rewriter: Rewriter, bank: Arc<PatternBank>) -> Self {
    Self { rewriter, bank }
  }

  fn rewrite_span<R: Rng + ?Sized>(&self, family: PatternFamily, span: &str, rng: &mut R) -> String {
    let cfg = TransformConfig::new(
      [RewriteMethod::Synonym, RewriteMethod::WordOrder],
      Intensity::new(SPAN_REWRITE_INTENSITY),
    );
    let rewritten = self.rewriter.rewrite(span, &cfg, rng);
    if rewritten != span {
      return rewritten;
    }
    soften(family, span, rng)
  }

  #[instrument(level = "debug", skip(self, text, rng), fields(text_len = text.len()))]
  pub fn neutralize<R: Rng + ?Sized>(&self, text: &str, rng: &mut R) -> String {
    if text.is_empty() {
      return String::new();
    }
    let mut out = text.to_string();
    for entry in self.bank.entries() {
      let ranges: Vec<(usize, usize)> = entry.regex.find_iter(&out).map(|m| (m.start(), m.end())).collect();
      if ranges.is_empty() {
        continue;
      }
      debug!(target: "jiangchong", family = ?entry.family, matches = ranges.len(), "Neutralizing pattern");
      // Back to front so earlier ranges stay valid.
      for (start, end) in ranges.into_iter().rev() {
        let rewritten = self.rewrite_span(entry.family, &out[start..end], rng);
        out.replace_range(start..end, &rewritten);
      }
    }

    let synonyms = self.rewriter.synonyms();
    for (word, regex) in &self.bank.preferred {
      if regex.is_match(&out) {
        let key = word.to_lowercase();
        out = regex
          .replace_all(&out, |_: &regex::Captures| synonyms.get_synonym(&key, rng))
          .into_owned();
      }
    }
    out
  }
}
