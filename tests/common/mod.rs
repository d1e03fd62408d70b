//! Shared fixtures for the integration suites.

#![allow(dead_code)]

use std::sync::Arc;

use jiangchong::{JiebaSegmenter, LexiconSegmenter, Pipeline, Resources, Segmenter};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const SCENARIO_TEXT: &str = "首先，论文降重是指通过各种技术手段，降低论文与已有文献的相似度，提高论文的原创性。其次，常见的降重方法包括同义词替换。最后，这些方法可以有效降低重复率。";

/// Exact, dictionary-controlled segmentation for assertions on word boundaries.
pub fn lexicon() -> Arc<dyn Segmenter> {
    Arc::new(LexiconSegmenter::new([
        ("论文", "n"),
        ("研究", "vn"),
        ("方法", "n"),
        ("降重", "v"),
        ("技术", "n"),
        ("手段", "n"),
        ("降低", "v"),
        ("提高", "v"),
        ("相似度", "n"),
        ("原创性", "n"),
        ("这些", "r"),
        ("可以", "v"),
        ("有效", "a"),
        ("重复率", "n"),
        ("首先", "c"),
        ("其次", "c"),
        ("最后", "c"),
    ]))
}

pub fn jieba() -> Arc<dyn Segmenter> {
    Arc::new(JiebaSegmenter::new())
}

pub fn pipeline(segmenter: Arc<dyn Segmenter>) -> Pipeline {
    Pipeline::new(Resources::seeded(segmenter))
}

pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
