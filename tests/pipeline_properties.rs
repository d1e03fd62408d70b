mod common;

use std::sync::Arc;

use jiangchong::domain::{AvoidMethod, Intensity, ProcessConfig, RewriteMethod, TransformConfig};
use jiangchong::metrics::{change_rate, token_change_rate};
use jiangchong::preprocess::{clean, split_sentences, Preprocessor};
use jiangchong::reorder::WordOrderPermuter;
use jiangchong::restructure::{Restructurer, TemplateBank};
use jiangchong::synonym::{SynonymDictionary, SynonymEngine};
use jiangchong::util::CLOSING_PUNCT;
use jiangchong::Language;

use common::{jieba, lexicon, pipeline, rng, SCENARIO_TEXT};

const SAMPLES: &[&str] = &[
    "",
    "论文降重是指降低相似度。",
    "首先，论文降重很重要！其次，方法有很多？？最后一句没有标点",
    "  第一段。\n\n第二段，有两句。第二句。 ",
    "数据😀表明★准确率达到95%以上。",
    "This paper is robust. It uses a plethora of methods!",
];

#[test]
fn empty_input_stays_empty() {
    let p = pipeline(lexicon());
    let mut r = rng(1);
    assert_eq!(clean(""), "");
    assert_eq!(p.rewriter().rewrite("", &TransformConfig::default(), &mut r), "");
    assert_eq!(p.avoider().avoid("", &TransformConfig::default(), &mut r), "");
}

#[test]
fn sentence_split_reconstructs_cleaned_text() {
    for t in SAMPLES {
        let cleaned = clean(t);
        let lang = Language::detect(&cleaned);
        assert_eq!(split_sentences(&cleaned, lang).concat(), cleaned, "input: {:?}", t);
    }
}

#[test]
fn zero_intensity_rewrite_is_identity() {
    let p = pipeline(jieba());
    let cfg = TransformConfig::new(RewriteMethod::ALL, Intensity::new(0.0));
    for (seed, t) in SAMPLES.iter().enumerate() {
        let mut r = rng(seed as u64);
        assert_eq!(p.rewriter().rewrite(t, &cfg, &mut r), *t);
    }
}

#[test]
fn absent_words_are_their_own_synonym() {
    let pre = Preprocessor::new(lexicon());
    let engine = SynonymEngine::new(pre, Arc::new(SynonymDictionary::seeded()));
    let mut r = rng(2);
    for w in ["", "不存在", "x", "降重技术"] {
        assert_eq!(engine.get_synonym(w, &mut r), w);
    }
}

#[test]
fn short_sentences_are_not_restructured() {
    let r = Restructurer::new(Preprocessor::new(jieba()), Arc::new(TemplateBank::seeded()));
    let mut g = rng(3);
    for s in ["", "论文。", "论文降重很重要。", "降重方法有很多种类"] {
        assert_eq!(r.restructure(s, &mut g), s);
    }
}

#[test]
fn reorder_ends_in_closing_punct_or_is_unchanged() {
    let permuter = WordOrderPermuter::new(Preprocessor::new(jieba()));
    let sentences = [
        "论文降重是指通过各种技术手段，降低论文与已有文献的相似度。",
        "常见的降重方法包括同义词替换、句式重构和词序调整！",
        "这些方法可以有效降低重复率",
        "研究表明，这一方法是否有效仍有争议？",
        "句式重构；词序调整；同义词替换；",
    ];
    for s in sentences {
        let out = permuter.reorder(s);
        assert!(out == s || CLOSING_PUNCT.iter().any(|c| out.ends_with(c)), "{} -> {}", s, out);
    }
}

#[test]
fn enumeration_span_is_not_kept_verbatim() {
    let p = pipeline(jieba());
    let span_end = SCENARIO_TEXT.rfind("最后").unwrap() + "最后".len();
    let span = &SCENARIO_TEXT[..span_end];
    for seed in 0..8 {
        let cfg = ProcessConfig::new([], [AvoidMethod::ReducePatterns], 0.5);
        let out = p.process_document(SCENARIO_TEXT, &cfg, &mut rng(seed)).unwrap();
        assert_eq!(out.rewritten_text, SCENARIO_TEXT);
        assert!(!out.final_text.contains(span), "seed {}: {}", seed, out.final_text);
    }
}

#[test]
fn enumeration_span_is_rewritten_after_default_rewrite() {
    let p = pipeline(jieba());
    for seed in 0..4 {
        let cfg = ProcessConfig::new(RewriteMethod::ALL, [AvoidMethod::ReducePatterns], 0.5);
        let out = p.process_document(SCENARIO_TEXT, &cfg, &mut rng(seed)).unwrap();
        assert!(!out.final_text.contains(SCENARIO_TEXT.trim_end_matches('。')));
    }
}

fn split_candidate<'a>(text: &'a str, candidates: &[String]) -> Vec<&'a str> {
    candidates.iter().filter_map(|c| text.strip_prefix(c.as_str())).collect()
}

#[test]
fn full_intensity_synonym_rewrite_uses_listed_candidates() {
    let dict = SynonymDictionary::seeded();
    let thesis = dict.candidates("论文").unwrap();
    let research = dict.candidates("研究").unwrap();
    let method = dict.candidates("方法").unwrap();
    let p = pipeline(lexicon());
    for seed in 0..10 {
        let cfg = ProcessConfig::new([RewriteMethod::Synonym], [], 1.0);
        let out = p.process_document("论文研究方法", &cfg, &mut rng(seed)).unwrap();
        let ok = split_candidate(&out.rewritten_text, thesis).into_iter().any(|rest| {
            split_candidate(rest, research)
                .into_iter()
                .any(|rest| method.iter().any(|m| rest == m.as_str()))
        });
        assert!(ok, "seed {}: {}", seed, out.rewritten_text);
    }
}

#[test]
fn full_intensity_synonym_rewrite_with_jieba() {
    let dict = SynonymDictionary::seeded();
    let thesis = dict.candidates("论文").unwrap();
    let p = pipeline(jieba());
    let cfg = ProcessConfig::new([RewriteMethod::Synonym], [], 1.0);
    let out = p.process_document("论文研究方法", &cfg, &mut rng(5)).unwrap();
    assert!(thesis.iter().any(|c| out.rewritten_text.starts_with(c.as_str())), "{}", out.rewritten_text);
}

#[test]
fn change_rate_is_bounded() {
    let pre = Preprocessor::new(jieba());
    for a in SAMPLES {
        assert_eq!(change_rate(&pre, a, a), 0.0);
        for b in SAMPLES {
            let r = change_rate(&pre, a, b);
            assert!((0.0..=1.0).contains(&r), "{} vs {} = {}", a, b, r);
        }
    }
    assert_eq!(token_change_rate(&["论文"], &["文章"]), 1.0);
}

#[test]
fn whole_pipeline_never_fails_on_non_empty_input() {
    let p = pipeline(jieba());
    for seed in 0..4 {
        for t in SAMPLES.iter().filter(|t| !t.trim().is_empty()) {
            let out = p
                .process_document(t, &ProcessConfig::new(RewriteMethod::ALL, AvoidMethod::ALL, 1.0), &mut rng(seed))
                .unwrap();
            assert_eq!(out.cleaned_text, clean(t));
        }
    }
}

#[test]
fn same_seed_same_output() {
    let p = pipeline(jieba());
    let cfg = ProcessConfig::default();
    let a = p.process_document(SCENARIO_TEXT, &cfg, &mut rng(99)).unwrap();
    let b = p.process_document(SCENARIO_TEXT, &cfg, &mut rng(99)).unwrap();
    assert_eq!(a.final_text, b.final_text);
}
