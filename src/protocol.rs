//! Public protocol structs for the HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{AvoidMethod, Intensity, ProcessConfig, ProcessOutput, RewriteMethod};
use crate::error::{Result, RewriteError};

/// Slider values arrive either as JSON numbers or as numeric strings.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum IntensityIn {
    Number(f64),
    Text(String),
}

impl IntensityIn {
    pub fn value(&self) -> Result<f64> {
        match self {
            IntensityIn::Number(v) => Ok(*v),
            IntensityIn::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| RewriteError::validation(format!("intensity must be a number, got '{}'", s))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessIn {
    #[serde(default)]
    pub text: Option<String>,
    /// Omitted means every method.
    #[serde(default)]
    pub rewrite_methods: Option<Vec<String>>,
    #[serde(default)]
    pub avoid_methods: Option<Vec<String>>,
    #[serde(default)]
    pub intensity: Option<IntensityIn>,
}

/// Parse method tags, logging and skipping unknown ones.
fn parse_methods<M>(tags: &Option<Vec<String>>, all: &[M]) -> Vec<M>
where
    M: Copy + std::str::FromStr<Err = String>,
{
    match tags {
        None => all.to_vec(),
        Some(tags) => tags
            .iter()
            .filter_map(|t| match t.parse::<M>() {
                Ok(m) => Some(m),
                Err(e) => {
                    warn!(target: "jiangchong", error = %e, "Ignoring method tag");
                    None
                }
            })
            .collect(),
    }
}

impl ProcessIn {
    pub fn config(&self) -> Result<ProcessConfig> {
        let intensity = match &self.intensity {
            Some(i) => i.value()?,
            None => Intensity::DEFAULT,
        };
        Ok(ProcessConfig::new(
            parse_methods(&self.rewrite_methods, &RewriteMethod::ALL),
            parse_methods(&self.avoid_methods, &AvoidMethod::ALL),
            intensity,
        ))
    }
}

#[derive(Debug, Serialize)]
pub struct ProcessOut {
    pub original_text: String,
    pub cleaned_text: String,
    pub rewritten_text: String,
    pub final_text: String,
    pub rewrite_change_rate: f64,
    pub final_change_rate: f64,
}

impl ProcessOut {
    pub fn new(original_text: String, out: ProcessOutput) -> Self {
        Self {
            original_text,
            cleaned_text: out.cleaned_text,
            rewritten_text: out.rewritten_text,
            final_text: out.final_text,
            rewrite_change_rate: out.rewrite_change_rate,
            final_change_rate: out.final_change_rate,
        }
    }
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}

#[derive(Debug, Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intensity_accepts_numbers_and_strings() {
        let a: ProcessIn = serde_json::from_str(r#"{"text":"x","intensity":0.7}"#).unwrap();
        let b: ProcessIn = serde_json::from_str(r#"{"text":"x","intensity":"0.7"}"#).unwrap();
        assert_eq!(a.config().unwrap().intensity().value(), 0.7);
        assert_eq!(b.config().unwrap().intensity().value(), 0.7);

        let bad: ProcessIn = serde_json::from_str(r#"{"text":"x","intensity":"high"}"#).unwrap();
        assert!(matches!(bad.config().unwrap_err(), RewriteError::Validation(_)));
    }

    #[test]
    fn omitted_methods_mean_all_and_unknown_tags_are_dropped() {
        let all: ProcessIn = serde_json::from_str(r#"{"text":"x"}"#).unwrap();
        let cfg = all.config().unwrap();
        assert_eq!(cfg.rewrite.methods.len(), 3);
        assert_eq!(cfg.avoid.methods.len(), 4);
        assert_eq!(cfg.intensity().value(), 0.5);

        let some: ProcessIn =
            serde_json::from_str(r#"{"text":"x","rewrite_methods":["synonym","paraphrase"],"avoid_methods":[]}"#).unwrap();
        let cfg = some.config().unwrap();
        assert!(cfg.rewrite.has(RewriteMethod::Synonym));
        assert_eq!(cfg.rewrite.methods.len(), 1);
        assert!(cfg.avoid.methods.is_empty());
    }
}
