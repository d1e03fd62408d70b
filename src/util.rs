//! Small utility helpers used across modules.

use crate::error::{Result, RewriteError};

/// Characters that end a sentence when splitting Chinese text.
pub const SENTENCE_TERMINALS: &[char] = &['。', '！', '？', '?', '!'];

/// Tokens accepted as the closing punctuation of a reordered sentence.
pub const CLOSING_PUNCT: &[&str] = &["。", "！", "？", "；", "…"];

/// Enumeration marks a long sentence may be split at.
pub const PAUSE_MARKS: &[char] = &['，', '、', '；'];

/// Fill `{key}` placeholders from `lookup`.
///
/// Unlike a plain `str::replace` loop this is strict: an unknown placeholder,
/// a key with no value, or an unbalanced brace is an error, so callers can
/// fall back to their input instead of emitting half-filled text.
pub fn render_template<'v, F>(tpl: &str, lookup: F) -> Result<String>
where
  F: Fn(&str) -> Option<&'v str>,
{
  let mut out = String::with_capacity(tpl.len() * 2);
  let mut rest = tpl;
  while let Some(open) = rest.find(|c: char| c == '{' || c == '}') {
    out.push_str(&rest[..open]);
    if rest[open..].starts_with('}') {
      return Err(RewriteError::template_slot("}"));
    }
    let after = &rest[open + 1..];
    let close = after
      .find('}')
      .ok_or_else(|| RewriteError::template_slot(after))?;
    let key = &after[..close];
    let value = lookup(key).ok_or_else(|| RewriteError::template_slot(key))?;
    out.push_str(value);
    rest = &after[close + 1..];
  }
  out.push_str(rest);
  Ok(out)
}

/// True if unicode char belongs to CJK ranges.
pub fn is_cjk(ch: char) -> bool {
  (ch >= '\u{4E00}' && ch <= '\u{9FFF}')
    || (ch >= '\u{3400}' && ch <= '\u{4DBF}')
    || (ch >= '\u{20000}' && ch <= '\u{2A6DF}')
    || (ch >= '\u{2A700}' && ch <= '\u{2B73F}')
    || (ch >= '\u{2B740}' && ch <= '\u{2B81F}')
    || (ch >= '\u{2B820}' && ch <= '\u{2CEAF}')
    || (ch >= '\u{F900}' && ch <= '\u{FAFF}')
}

/// Share of CJK characters among the alphanumeric ones (0.0 for none).
pub fn cjk_ratio(s: &str) -> f32 {
  let mut total = 0usize;
  let mut cjk = 0usize;
  for ch in s.chars().filter(|c| c.is_alphanumeric()) {
    total += 1;
    if is_cjk(ch) {
      cjk += 1;
    }
  }
  if total == 0 { 0.0 } else { cjk as f32 / total as f32 }
}

/// Length in characters. Every length threshold in the transforms counts chars, not bytes.
pub fn char_len(s: &str) -> usize {
  s.chars().count()
}

/// Split a sentence into (leading whitespace, body, trailing whitespace).
/// Transforms only ever see the body; the whitespace is stitched back verbatim.
pub fn split_ws(s: &str) -> (&str, &str, &str) {
  let body_start = s.len() - s.trim_start().len();
  let (lead, tail) = s.split_at(body_start);
  let body_end = tail.trim_end().len();
  let (body, trail) = tail.split_at(body_end);
  (lead, body, trail)
}

/// True when the token is (or starts with) Chinese punctuation.
pub fn is_punct_token(token: &str) -> bool {
  token.chars().next().map_or(false, |c| {
    matches!(
      c,
      '，' | '。' | '！' | '？' | '、' | '；' | '：' | '…' | '“' | '”' | '‘' | '’' | '（' | '）' | '【' | '】' | '《' | '》'
    )
  })
}

/// Strip trailing sentence terminals (。！？?!).
pub fn trim_terminal(s: &str) -> &str {
  s.trim_end_matches(SENTENCE_TERMINALS)
}
