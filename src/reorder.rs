//! Word-order permutation: move the back half of a sentence to the front.

use tracing::{instrument, warn};

use crate::preprocess::Preprocessor;
use crate::util::{char_len, is_punct_token, CLOSING_PUNCT};

const MIN_REORDER_CHARS: usize = 10;
const MIN_REORDER_TOKENS: usize = 6;

fn is_closing(token: &str) -> bool {
  CLOSING_PUNCT.contains(&token)
}

#[derive(Clone)]
pub struct WordOrderPermuter {
  pre: Preprocessor,
}

impl WordOrderPermuter {
  pub fn new(pre: Preprocessor) -> Self {
    Self { pre }
  }

  /// Swap the halves of `sentence` around a midpoint that never lands on
  /// punctuation. The result always ends with closing punctuation, or is
  /// `sentence` unchanged.
  #[instrument(level = "debug", skip(self, sentence), fields(text_len = sentence.len()))]
  pub fn reorder(&self, sentence: &str) -> String {
    if char_len(sentence) < MIN_REORDER_CHARS {
      return sentence.to_string();
    }
    let words = match self.pre.tokenize(sentence) {
      Ok(words) => words,
      Err(e) => {
        warn!(target: "jiangchong", error = %e, "Tokenization failed; keeping sentence");
        return sentence.to_string();
      }
    };
    if words.len() < MIN_REORDER_TOKENS {
      return sentence.to_string();
    }
    let Some(terminal) = words.iter().rev().find(|w| is_closing(w)) else {
      return sentence.to_string();
    };

    let mut mid = words.len() / 2;
    while mid < words.len() && is_punct_token(&words[mid]) {
      mid += 1;
    }
    if mid >= words.len() {
      return sentence.to_string();
    }

    let (head, tail) = words.split_at(mid);
    let mut out: String = tail.iter().chain(head).map(String::as_str).collect();
    if !tail.iter().chain(head).last().is_some_and(|w| is_closing(w)) {
      out.push_str(terminal);
    }
    out
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use super::*;
  use crate::segment::LexiconSegmenter;

  fn permuter() -> WordOrderPermuter {
    let seg = LexiconSegmenter::new([
      ("这些", "r"),
      ("方法", "n"),
      ("可以", "v"),
      ("有效", "a"),
      ("降低", "v"),
      ("重复率", "n"),
    ]);
    WordOrderPermuter::new(Preprocessor::new(Arc::new(seg)))
  }

  #[test]
  fn swaps_halves_and_keeps_terminal() {
    // 这些|方法|可以|有效|降低|重复率|。 -> mid 3
    assert_eq!(permuter().reorder("这些方法可以有效降低重复率。"), "有效降低重复率。这些方法可以。");
  }

  #[test]
  fn midpoint_skips_punctuation() {
    // 这些|方法|可以|，|降低|重复率|。 -> mid 3 is a comma, moves to 4
    assert_eq!(permuter().reorder("这些方法可以，降低重复率。"), "降低重复率。这些方法可以，。");
  }

  #[test]
  fn midpoint_skips_ellipsis() {
    // 这些|方法|可以|…|降低|重复率|。 -> mid 3 is an ellipsis, moves to 4
    assert_eq!(permuter().reorder("这些方法可以…降低重复率。"), "降低重复率。这些方法可以…");
  }

  #[test]
  fn short_or_unterminated_sentences_are_unchanged() {
    let p = permuter();
    assert_eq!(p.reorder("这些方法。"), "这些方法。");
    assert_eq!(p.reorder("这些方法可以有效降低重复率"), "这些方法可以有效降低重复率");
  }

  #[test]
  fn output_ends_in_closing_punct_or_is_identity() {
    let p = permuter();
    for s in ["这些方法可以有效降低重复率！", "有效降低重复率；这些方法可以", "方法可以，，，，，。", "这些这些这些这些这些…"] {
      let out = p.reorder(s);
      assert!(out == s || CLOSING_PUNCT.iter().any(|c| out.ends_with(c)), "{} -> {}", s, out);
    }
  }
}
