//! Template-based sentence restructuring.
//!
//! Components are pulled out of a sentence with a first-match scan over POS
//! tags and poured into a randomly chosen template. The heuristics target the
//! Chinese academic register only; this is not a syntactic parser.

use std::collections::HashMap;
use std::sync::Arc;

use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::chance::pick;
use crate::error::Result;
use crate::preprocess::Preprocessor;
use crate::seeds::seed_templates;
use crate::util::{char_len, render_template};

/// Sentences shorter than this (in chars) are left alone.
pub const MIN_RESTRUCTURE_CHARS: usize = 10;

/// Named placeholders a template may reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
  Subject,
  Predicate,
  Object,
  Predicate2,
  Object2,
  Condition,
  Result,
  Cause,
  Contrast,
  Manner,
  Conclusion,
  Trait,
  Change,
  Concession,
}

impl Slot {
  pub const ALL: [Slot; 14] = [
    Slot::Subject,
    Slot::Predicate,
    Slot::Object,
    Slot::Predicate2,
    Slot::Object2,
    Slot::Condition,
    Slot::Result,
    Slot::Cause,
    Slot::Contrast,
    Slot::Manner,
    Slot::Conclusion,
    Slot::Trait,
    Slot::Change,
    Slot::Concession,
  ];

  pub fn name(self) -> &'static str {
    match self {
      Slot::Subject => "subject",
      Slot::Predicate => "predicate",
      Slot::Object => "object",
      Slot::Predicate2 => "predicate2",
      Slot::Object2 => "object2",
      Slot::Condition => "condition",
      Slot::Result => "result",
      Slot::Cause => "cause",
      Slot::Contrast => "contrast",
      Slot::Manner => "manner",
      Slot::Conclusion => "conclusion",
      Slot::Trait => "trait",
      Slot::Change => "change",
      Slot::Concession => "concession",
    }
  }

  pub fn from_name(name: &str) -> Option<Slot> {
    Slot::ALL.into_iter().find(|s| s.name() == name)
  }
}

/// Slot values extracted from one sentence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SentenceComponents {
  values: HashMap<Slot, String>,
}

impl SentenceComponents {
  pub fn set<V: Into<String>>(&mut self, slot: Slot, value: V) {
    self.values.insert(slot, value.into());
  }

  /// Value for `slot`; empty values count as missing.
  pub fn get(&self, slot: Slot) -> Option<&str> {
    self.values.get(&slot).map(String::as_str).filter(|v| !v.is_empty())
  }

  fn is_unset(&self, slot: Slot) -> bool {
    self.get(slot).is_none()
  }

  /// Fill `tpl`, failing with `TemplateFormat` on any missing slot.
  pub fn render(&self, tpl: &str) -> Result<String> {
    render_template(tpl, |key| Slot::from_name(key).and_then(|s| self.get(s)))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TemplateCategory {
  Declarative,
  Passive,
  Compound,
}

impl TemplateCategory {
  pub const ALL: [TemplateCategory; 3] =
    [TemplateCategory::Declarative, TemplateCategory::Passive, TemplateCategory::Compound];
}

/// True when every placeholder in `tpl` names a known slot.
pub fn is_valid_template(tpl: &str) -> bool {
  render_template(tpl, |key| Slot::from_name(key).map(|_| "x")).is_ok()
}

/// Templates per category. Categories with no templates are never chosen.
#[derive(Clone, Debug, Default)]
pub struct TemplateBank {
  categories: HashMap<TemplateCategory, Vec<String>>,
}

impl TemplateBank {
  pub fn seeded() -> Self {
    let mut bank = Self::default();
    for (category, templates) in seed_templates() {
      bank.categories.insert(*category, templates.iter().map(|t| t.to_string()).collect());
    }
    bank
  }

  /// Replace one category. Invalid templates are dropped with a warning; an
  /// empty result leaves the category as it was.
  pub fn replace_category(&mut self, category: TemplateCategory, templates: Vec<String>) {
    let valid: Vec<String> = templates
      .into_iter()
      .filter(|t| {
        let ok = is_valid_template(t);
        if !ok {
          warn!(target: "jiangchong", ?category, template = %t, "Dropping template with unknown placeholder");
        }
        ok
      })
      .collect();
    if !valid.is_empty() {
      self.categories.insert(category, valid);
    }
  }

  pub fn templates(&self, category: TemplateCategory) -> &[String] {
    self.categories.get(&category).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn len(&self) -> usize {
    self.categories.values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Uniform category, then uniform template within it.
  pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<(TemplateCategory, &str)> {
    let filled: Vec<TemplateCategory> = TemplateCategory::ALL
      .into_iter()
      .filter(|c| !self.templates(*c).is_empty())
      .collect();
    let category = *pick(rng, &filled)?;
    let tpl = pick(rng, self.templates(category))?;
    Some((category, tpl.as_str()))
  }
}

#[derive(Clone)]
pub struct Restructurer {
  pre: Preprocessor,
  templates: Arc<TemplateBank>,
}

impl Restructurer {
  pub fn new(pre: Preprocessor, templates: Arc<TemplateBank>) -> Self {
    Self { pre, templates }
  }

  /// First-match scan: subject, predicate, object, predicate2, object2, in
  /// that order. The remaining slots are fixed phrases.
  pub fn extract_components(&self, sentence: &str) -> Result<SentenceComponents> {
    let mut c = SentenceComponents::default();
    for token in self.pre.tag(sentence)? {
      let nominal = token.is_nominal();
      let verbal = token.is_verbal();
      if c.is_unset(Slot::Subject) && nominal {
        c.set(Slot::Subject, token.word);
      } else if c.is_unset(Slot::Predicate) && verbal {
        c.set(Slot::Predicate, token.word);
      } else if c.is_unset(Slot::Object) && nominal && !c.is_unset(Slot::Predicate) {
        c.set(Slot::Object, token.word);
      } else if c.is_unset(Slot::Predicate2) && verbal && !c.is_unset(Slot::Object) {
        c.set(Slot::Predicate2, token.word);
      } else if c.is_unset(Slot::Object2) && nominal && !c.is_unset(Slot::Predicate2) {
        c.set(Slot::Object2, token.word);
      }
    }

    let predicate = c.get(Slot::Predicate).unwrap_or_default().to_string();
    let object = c.get(Slot::Object).unwrap_or_default().to_string();
    if c.is_unset(Slot::Predicate2) {
      c.set(Slot::Predicate2, predicate.clone());
    }
    if c.is_unset(Slot::Object2) {
      c.set(Slot::Object2, object);
    }
    let condition = format!("{}{}", c.get(Slot::Subject).unwrap_or_default(), predicate);
    c.set(Slot::Condition, condition);
    c.set(Slot::Result, "产生了重要影响");
    c.set(Slot::Cause, "存在客观需求");
    c.set(Slot::Contrast, "仍需进一步研究");
    c.set(Slot::Manner, "科学方法");
    c.set(Slot::Conclusion, "具有重要意义");
    c.set(Slot::Trait, "独特性质");
    c.set(Slot::Change, "环境的变化");
    c.set(Slot::Concession, "面临诸多挑战");
    Ok(c)
  }

  /// Recast `sentence` through a random template.
  ///
  /// Short sentences, tagging failures and templates that reference a
  /// missing component all return the sentence unchanged.
  #[instrument(level = "debug", skip(self, sentence, rng), fields(text_len = sentence.len()))]
  pub fn restructure<R: Rng + ?Sized>(&self, sentence: &str, rng: &mut R) -> String {
    if char_len(sentence) < MIN_RESTRUCTURE_CHARS {
      return sentence.to_string();
    }
    let components = match self.extract_components(sentence) {
      Ok(c) => c,
      Err(e) => {
        warn!(target: "jiangchong", error = %e, "Component extraction failed; keeping sentence");
        return sentence.to_string();
      }
    };
    let Some((category, tpl)) = self.templates.choose(rng) else {
      return sentence.to_string();
    };
    match components.render(tpl) {
      Ok(out) => out,
      Err(e) => {
        debug!(target: "jiangchong", ?category, error = %e, "Template fell back to original");
        sentence.to_string()
      }
    }
  }
}
