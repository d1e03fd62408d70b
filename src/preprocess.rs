//! Text preprocessing: cleaning, paragraph and sentence splitting, segmentation.
//!
//! Example:
//!   输入: "首先，论文降重很重要！其次，方法有很多"
//!   句子: ["首先，论文降重很重要！", "其次，方法有很多"]

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, instrument, warn};
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::Language;
use crate::error::Result;
use crate::segment::{Segmenter, Token};
use crate::util::split_ws;

/// Everything outside CJK ideographs, Latin letters, digits, common Chinese and
/// ASCII punctuation, and whitespace.
static DISALLOWED_RE: Lazy<Regex> = Lazy::new(|| {
  Regex::new(r#"[^\x{4e00}-\x{9fff}a-zA-Z0-9，。！？、；：“”‘’（）【】《》…—·,.!?;:'"()%\-\s]"#).expect("valid clean regex")
});

static BLANK_LINES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n").expect("valid paragraph regex"));

/// A run of non-terminals closed by a run of terminals.
static ZH_SENTENCE_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"[^。！？?!]*[。！？?!]+").expect("valid sentence regex"));

/// Result of a full preprocessing pass over one document.
#[derive(Clone, Debug, Serialize)]
pub struct PreprocessReport {
  pub cleaned_text: String,
  pub paragraphs: Vec<String>,
  pub sentences: Vec<String>,
  pub words: Vec<String>,
  pub tags: Vec<Token>,
}

/// Strip characters outside the allow-list. Never fails; "" stays "".
pub fn clean(text: &str) -> String {
  if text.is_empty() {
    return String::new();
  }
  DISALLOWED_RE.replace_all(text, "").into_owned()
}

/// Split on blank-line runs, trim, and drop empty paragraphs.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
  BLANK_LINES_RE
    .split(text)
    .map(str::trim)
    .filter(|p| !p.is_empty())
    .collect()
}

/// Split text into sentences.
///
/// Lossless: concatenating the output gives back `text` exactly. An
/// unterminated remainder becomes the final sentence; a whitespace-only
/// remainder is attached to the sentence before it.
pub fn split_sentences(text: &str, lang: Language) -> Vec<&str> {
  if text.is_empty() {
    return Vec::new();
  }
  match lang {
    Language::Chinese => split_sentences_zh(text),
    Language::Other => text.split_sentence_bounds().collect(),
  }
}

fn split_sentences_zh(text: &str) -> Vec<&str> {
  let mut spans: Vec<(usize, usize)> = ZH_SENTENCE_RE
    .find_iter(text)
    .map(|m| (m.start(), m.end()))
    .collect();
  let covered = spans.last().map_or(0, |&(_, end)| end);
  if covered < text.len() {
    let rest = &text[covered..];
    match spans.last_mut() {
      Some(last) if rest.trim().is_empty() => last.1 = text.len(),
      _ => spans.push((covered, text.len())),
    }
  }
  spans.into_iter().map(|(s, e)| &text[s..e]).collect()
}

/// Cleaning, splitting and segmentation behind one injected segmenter.
#[derive(Clone)]
pub struct Preprocessor {
  segmenter: Arc<dyn Segmenter>,
}

impl Preprocessor {
  pub fn new(segmenter: Arc<dyn Segmenter>) -> Self {
    Self { segmenter }
  }

  pub fn clean(&self, text: &str) -> String {
    clean(text)
  }

  pub fn split_paragraphs<'t>(&self, text: &'t str) -> Vec<&'t str> {
    split_paragraphs(text)
  }

  pub fn split_sentences<'t>(&self, text: &'t str, lang: Language) -> Vec<&'t str> {
    split_sentences(text, lang)
  }

  pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
    if text.is_empty() {
      return Ok(Vec::new());
    }
    self.segmenter.cut(text)
  }

  pub fn tag(&self, text: &str) -> Result<Vec<Token>> {
    if text.is_empty() {
      return Ok(Vec::new());
    }
    self.segmenter.tag(text)
  }

  /// Rebuild `text` sentence by sentence.
  ///
  /// `f` receives the sentence index and the sentence with surrounding
  /// whitespace removed; that whitespace is put back around its output.
  pub fn map_sentences<F>(&self, text: &str, mut f: F) -> String
  where
    F: FnMut(usize, &str) -> String,
  {
    let lang = Language::detect(text);
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for (i, sentence) in split_sentences(text, lang).into_iter().enumerate() {
      let (lead, body, trail) = split_ws(sentence);
      out.push_str(lead);
      if body.is_empty() {
        out.push_str(trail);
        continue;
      }
      out.push_str(&f(i, body));
      out.push_str(trail);
    }
    out
  }

  /// Clean, split, segment and tag a document in one pass.
  #[instrument(level = "debug", skip(self, text), fields(text_len = text.len()))]
  pub fn process_text(&self, text: &str) -> Result<PreprocessReport> {
    let cleaned_text = clean(text);
    let lang = Language::detect(&cleaned_text);
    let paragraphs = split_paragraphs(&cleaned_text).into_iter().map(str::to_string).collect();
    let sentences: Vec<String> = split_sentences(&cleaned_text, lang)
      .into_iter()
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
      .collect();
    let words = self.tokenize(&cleaned_text).map_err(|e| {
      warn!(target: "jiangchong", error = %e, "Segmentation failed during preprocessing");
      e
    })?;
    let tags = self.tag(&cleaned_text)?;
    debug!(target: "jiangchong", ?lang, sentences = sentences.len(), words = words.len(), "Preprocessed document");
    Ok(PreprocessReport { cleaned_text, paragraphs, sentences, words, tags })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::segment::JiebaSegmenter;

  #[test]
  fn clean_empty_is_empty() {
    assert_eq!(clean(""), "");
  }

  #[test]
  fn clean_strips_symbols_outside_allow_list() {
    assert_eq!(clean("论文😀降重★技术#"), "论文降重技术");
    assert_eq!(clean("准确率达到95%以上。"), "准确率达到95%以上。");
    assert_eq!(clean("《论文》（草稿）：第1版"), "《论文》（草稿）：第1版");
    assert_eq!(clean("Hello, world!"), "Hello, world!");
  }

  #[test]
  fn paragraphs_split_on_blank_lines() {
    let text = "  第一段第一行\n第一段第二行\n\n\n  第二段  \n \n";
    assert_eq!(split_paragraphs(text), vec!["第一段第一行\n第一段第二行", "第二段"]);
    assert!(split_paragraphs("").is_empty());
  }

  #[test]
  fn chinese_sentences_are_lossless() {
    let text = "首先，论文降重很重要！其次，方法有很多？？最后一句没有标点";
    let sentences = split_sentences(text, Language::Chinese);
    assert_eq!(
      sentences,
      vec!["首先，论文降重很重要！", "其次，方法有很多？？", "最后一句没有标点"]
    );
    assert_eq!(sentences.concat(), text);
  }

  #[test]
  fn whitespace_remainder_sticks_to_last_sentence() {
    let text = "第一句。\n第二句。\n";
    let sentences = split_sentences(text, Language::Chinese);
    assert_eq!(sentences, vec!["第一句。", "\n第二句。\n"]);
  }

  #[test]
  fn leading_terminal_is_not_dropped() {
    let sentences = split_sentences("。开头是句号。", Language::Chinese);
    assert_eq!(sentences.concat(), "。开头是句号。");
  }

  #[test]
  fn other_language_uses_unicode_bounds() {
    let text = "This is one. This is two! And three";
    let sentences = split_sentences(text, Language::Other);
    assert_eq!(sentences.len(), 3);
    assert_eq!(sentences.concat(), text);
  }

  #[test]
  fn map_sentences_preserves_whitespace() {
    let pre = Preprocessor::new(Arc::new(JiebaSegmenter::new()));
    let out = pre.map_sentences("第一句。\n 第二句。", |i, s| format!("[{}]{}", i, s));
    assert_eq!(out, "[0]第一句。\n [1]第二句。");
  }

  #[test]
  fn process_text_reports_every_stage() {
    let pre = Preprocessor::new(Arc::new(JiebaSegmenter::new()));
    let report = pre
      .process_text("论文降重是指降低相似度。\n\n常见的降重方法包括同义词替换。")
      .unwrap();
    assert_eq!(report.paragraphs.len(), 2);
    assert_eq!(report.sentences.len(), 2);
    assert_eq!(report.words.concat(), report.cleaned_text);
    assert!(!report.tags.is_empty());

    let empty = pre.process_text("").unwrap();
    assert!(empty.cleaned_text.is_empty());
    assert!(empty.sentences.is_empty() && empty.words.is_empty());
  }
}
