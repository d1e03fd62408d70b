//! Word segmentation and part-of-speech tagging.
//!
//! The transforms never talk to a tokenizer library directly; they go through
//! the [`Segmenter`] trait so tests can swap in a small deterministic lexicon.
//! [`JiebaSegmenter`] is the production implementation.

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jieba_rs::Jieba;
use serde::Serialize;
use tracing::info;

use crate::error::{Result, RewriteError};

/// A segmented word and its part-of-speech tag (jieba/ICTCLAS tag set).
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub word: String,
    pub pos: String,
}

impl Token {
    pub fn new<W: Into<String>, P: Into<String>>(word: W, pos: P) -> Self {
        Token {
            word: word.into(),
            pos: pos.into(),
        }
    }

    /// Nouns of any kind, plus pronouns.
    pub fn is_nominal(&self) -> bool {
        self.pos.starts_with('n') || self.pos == "r"
    }

    pub fn is_verbal(&self) -> bool {
        self.pos.starts_with('v')
    }
}

/// Trait for segmenters that split text into words and tag them.
///
/// Implementations must be `Send + Sync`: one instance is built at startup and
/// shared by every request. Concatenating the output of `cut` (or the words
/// of `tag`) is expected to reproduce the input.
pub trait Segmenter: Send + Sync {
    /// Split text into an ordered sequence of words.
    fn cut(&self, text: &str) -> Result<Vec<String>>;

    /// Split text into words with their part-of-speech tags.
    fn tag(&self, text: &str) -> Result<Vec<Token>>;

    /// Name of this segmenter (for logs).
    fn name(&self) -> &'static str;
}

/// Chinese segmenter backed by `jieba-rs`, HMM enabled for unknown words.
pub struct JiebaSegmenter {
    inner: Jieba,
}

impl JiebaSegmenter {
    /// Load the bundled jieba dictionary.
    pub fn new() -> Self {
        Self {
            inner: Jieba::new(),
        }
    }

    /// Load the bundled dictionary and then a user dictionary on top of it.
    ///
    /// The user dictionary uses jieba's `word [freq] [tag]` line format.
    pub fn with_user_dict(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            RewriteError::resource(format!(
                "Failed to open user dictionary '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut reader = BufReader::new(file);
        let mut inner = Jieba::new();
        inner.load_dict(&mut reader).map_err(|e| {
            RewriteError::resource(format!(
                "Failed to load user dictionary '{}': {:?}",
                path.display(),
                e
            ))
        })?;
        info!(target: "jiangchong", path = %path.display(), "Loaded jieba user dictionary");
        Ok(Self { inner })
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for JiebaSegmenter {
    fn cut(&self, text: &str) -> Result<Vec<String>> {
        Ok(self
            .inner
            .cut(text, true)
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    fn tag(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self
            .inner
            .tag(text, true)
            .into_iter()
            .map(|t| Token::new(t.word, t.tag))
            .collect())
    }

    fn name(&self) -> &'static str {
        "jieba"
    }
}

/// Greedy longest-match segmenter over a fixed, tagged lexicon.
///
/// Characters not covered by the lexicon become single-character tokens
/// tagged `x` (punctuation, whitespace) or `un` (anything else). Useful where
/// exact, dictionary-controlled segmentation matters more than coverage.
#[derive(Clone, Debug, Default)]
pub struct LexiconSegmenter {
    words: HashMap<String, String>,
    max_chars: usize,
}

impl LexiconSegmenter {
    pub fn new<I, W, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (W, P)>,
        W: Into<String>,
        P: Into<String>,
    {
        let words: HashMap<String, String> = entries
            .into_iter()
            .map(|(w, p)| (w.into(), p.into()))
            .filter(|(w, _)| !w.is_empty())
            .collect();
        let max_chars = words.keys().map(|w| w.chars().count()).max().unwrap_or(1);
        Self { words, max_chars }
    }

    fn segment(&self, text: &str) -> Vec<Token> {
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(std::iter::once(text.len()))
            .collect();
        let n_chars = bounds.len() - 1;
        let mut tokens = Vec::new();
        let mut i = 0;
        while i < n_chars {
            let longest = self.max_chars.min(n_chars - i);
            let hit = (1..=longest).rev().find_map(|len| {
                let word = &text[bounds[i]..bounds[i + len]];
                self.words.get(word).map(|pos| (len, Token::new(word, pos.as_str())))
            });
            match hit {
                Some((len, token)) => {
                    tokens.push(token);
                    i += len;
                }
                None => {
                    let word = &text[bounds[i]..bounds[i + 1]];
                    let pos = match word.chars().next() {
                        Some(c) if c.is_whitespace() || c.is_ascii_punctuation() => "x",
                        _ if crate::util::is_punct_token(word) => "x",
                        _ => "un",
                    };
                    tokens.push(Token::new(word, pos));
                    i += 1;
                }
            }
        }
        tokens
    }
}

impl Segmenter for LexiconSegmenter {
    fn cut(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.segment(text).into_iter().map(|t| t.word).collect())
    }

    fn tag(&self, text: &str) -> Result<Vec<Token>> {
        Ok(self.segment(text))
    }

    fn name(&self) -> &'static str {
        "lexicon"
    }
}
