//! Jiangchong · academic text rewriting core.
//!
//! Chinese-first pipeline that lowers similarity to source material and
//! smooths over the tells automated authorship detectors look for:
//!
//!   raw text → [`preprocess`] → [`rewriter`] → [`avoid`] → final text
//!
//! Every bank is built once ([`pipeline::Resources`]) and shared read-only.
//! Every random choice goes through an injected `rand::Rng`.

pub mod avoid;
pub mod chance;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod preprocess;
pub mod protocol;
pub mod reorder;
pub mod restructure;
pub mod rewriter;
pub mod routes;
pub mod seeds;
pub mod segment;
pub mod state;
pub mod synonym;
pub mod telemetry;
pub mod util;

pub use domain::{AvoidMethod, Intensity, Language, ProcessConfig, ProcessOutput, RewriteMethod, TransformConfig};
pub use error::{Result, RewriteError};
pub use pipeline::{Pipeline, Resources};
pub use segment::{JiebaSegmenter, LexiconSegmenter, Segmenter, Token};
