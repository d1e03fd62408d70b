//! How much a transform changed the text.

use std::collections::HashSet;

use tracing::warn;

use crate::avoid::patterns::PatternBank;
use crate::preprocess::Preprocessor;

/// `|A △ B| / |A ∪ B|` over token sets. 0 when the union is empty.
pub fn token_change_rate<S: AsRef<str>>(a: &[S], b: &[S]) -> f64 {
  let a: HashSet<&str> = a.iter().map(|s| s.as_ref()).collect();
  let b: HashSet<&str> = b.iter().map(|s| s.as_ref()).collect();
  let union = a.union(&b).count();
  if union == 0 {
    return 0.0;
  }
  a.symmetric_difference(&b).count() as f64 / union as f64
}

fn tokens(pre: &Preprocessor, text: &str) -> Vec<String> {
  pre.tokenize(text).unwrap_or_else(|e| {
    warn!(target: "jiangchong", error = %e, "Tokenization failed; measuring by characters");
    text.chars().map(String::from).collect()
  })
}

/// Change rate between two texts, tokenized with `pre`. Exactly 0 when `a == b`.
pub fn change_rate(pre: &Preprocessor, a: &str, b: &str) -> f64 {
  if a == b {
    return 0.0;
  }
  token_change_rate(&tokens(pre, a), &tokens(pre, b))
}

/// Total stereotyped-pattern matches in `text`.
pub fn pattern_hits(bank: &PatternBank, text: &str) -> usize {
  bank.hits(text).values().sum()
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::segment::LexiconSegmenter;

  #[test]
  fn rate_bounds() {
    assert_eq!(token_change_rate::<&str>(&[], &[]), 0.0);
    assert_eq!(token_change_rate(&["论文", "方法"], &["论文", "方法"]), 0.0);
    assert_eq!(token_change_rate(&["论文"], &["文章"]), 1.0);
    assert_eq!(token_change_rate(&["论文", "方法"], &["文章", "方法"]), 2.0 / 3.0);
  }

  #[test]
  fn identical_texts_do_not_change() {
    let pre = Preprocessor::new(Arc::new(LexiconSegmenter::new([("论文", "n")])));
    assert_eq!(change_rate(&pre, "论文很好。", "论文很好。"), 0.0);
    let r = change_rate(&pre, "论文很好。", "文章很好。");
    assert!(r > 0.0 && r <= 1.0);
  }

  #[test]
  fn counts_pattern_hits() {
    let bank = PatternBank::seeded();
    assert_eq!(pattern_hits(&bank, "首先甲，其次乙，最后丙。总而言之如此。"), 2);
    assert_eq!(pattern_hits(&bank, "平铺直叙。"), 0);
  }
}
