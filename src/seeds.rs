//! Built-in linguistic resources.
//!
//! These guarantee the pipeline is useful without any external config. A TOML
//! file (see `config`) can extend the dictionary and replace any bank.

use crate::avoid::features::FeatureKind;
use crate::avoid::patterns::PatternFamily;
use crate::restructure::TemplateCategory;

/// Synonym candidates for common academic vocabulary.
pub fn seed_synonyms() -> &'static [(&'static str, &'static [&'static str])] {
  SYNONYMS
}

const SYNONYMS: &[(&str, &[&str])] = &[
  // 名词
  ("论文", &["文章", "著作", "学术作品", "研究报告", "学术论文"]),
  ("研究", &["探究", "调查", "考察", "分析", "探索"]),
  ("方法", &["方式", "途径", "手段", "措施", "策略"]),
  ("结果", &["成果", "结论", "效果", "成效", "产物"]),
  ("问题", &["议题", "课题", "难题", "疑难", "困境"]),
  ("数据", &["资料", "信息", "素材", "材料", "统计结果"]),
  ("特点", &["特征", "特性", "特质", "特色", "特别之处"]),
  ("影响", &["作用", "效应", "效果", "冲击", "感染力"]),
  ("意义", &["价值", "重要性", "作用", "功用", "效用"]),
  // 动词
  ("表明", &["显示", "证明", "说明", "阐明", "揭示"]),
  ("提高", &["增强", "增加", "提升", "加强", "促进"]),
  ("降低", &["减少", "减低", "削弱", "缩减", "减轻"]),
  ("分析", &["解析", "研究", "探讨", "考察", "剖析"]),
  ("发现", &["察觉", "觉察", "发觉", "查明", "找到"]),
  ("认为", &["以为", "觉得", "看作", "视为", "认定"]),
  ("表示", &["显示", "呈现", "展示", "体现", "反映"]),
  ("进行", &["开展", "实施", "执行", "展开", "推行"]),
  ("使用", &["采用", "运用", "应用", "利用", "使用"]),
  ("提出", &["提议", "建议", "倡导", "发起", "推荐"]),
  // 形容词
  ("重要", &["关键", "主要", "核心", "关键性", "至关重要"]),
  ("显著", &["明显", "突出", "卓著", "显著性", "明确"]),
  ("有效", &["高效", "有用", "实用", "有益", "有力"]),
  ("必要", &["必需", "必须", "不可或缺", "必备", "必不可少"]),
  ("可能", &["或许", "可能性", "潜在", "可能会", "或者会"]),
  // 副词
  ("非常", &["极其", "十分", "格外", "尤其", "特别"]),
  ("主要", &["主要地", "首要地", "重点地", "关键地", "核心地"]),
  ("明显", &["显著地", "明确地", "清晰地", "明白地", "可见地"]),
  ("基本", &["基本上", "大体上", "大致上", "根本上", "本质上"]),
  ("通常", &["一般", "常常", "往往", "经常", "普遍"]),
  // Detector-favored English vocabulary
  ("delve into", &["look into", "examine", "dig into"]),
  ("plethora", &["lot", "wide range", "great many"]),
  ("myriad", &["many", "countless", "numerous"]),
  ("paradigm", &["model", "pattern", "approach"]),
  ("robust", &["solid", "sturdy", "reliable"]),
  ("leverage", &["use", "draw on", "make use of"]),
  ("synergy", &["cooperation", "teamwork", "combined effect"]),
  ("holistic", &["overall", "whole", "complete"]),
  ("innovative", &["new", "fresh", "original"]),
  ("unprecedented", &["new", "unheard-of", "first-ever"]),
  ("revolutionary", &["radical", "sweeping", "major"]),
  ("transformative", &["far-reaching", "major", "deep"]),
  ("cutting-edge", &["latest", "advanced", "up-to-date"]),
  ("state-of-the-art", &["latest", "current", "modern"]),
  ("groundbreaking", &["new", "pioneering", "original"]),
  ("disruptive", &["unsettling", "radical", "upending"]),
  ("game-changing", &["major", "decisive", "significant"]),
];

/// Restructuring templates per category. Placeholders are slot names.
pub fn seed_templates() -> &'static [(TemplateCategory, &'static [&'static str])] {
  TEMPLATES
}

const TEMPLATES: &[(TemplateCategory, &[&str])] = &[
  (
    TemplateCategory::Declarative,
    &[
      "{subject}不仅{predicate}{object}，而且{predicate2}{object2}。",
      "就{subject}而言，{predicate}{object}是显而易见的。",
      "从{subject}的角度来看，{predicate}{object}具有重要意义。",
      "关于{subject}，{predicate}{object}的现象值得关注。",
      "{subject}之所以{predicate}{object}，是因为{cause}。",
      "尽管{subject}{predicate}{object}，但{contrast}。",
      "与其说{subject}{predicate}{object}，不如说{subject}{predicate2}{object2}。",
      "{subject}通过{manner}{predicate}{object}，从而{result}。",
      "在{condition}的情况下，{subject}{predicate}{object}。",
      "{subject}的{predicate}{object}表明了{conclusion}。",
    ],
  ),
  (
    TemplateCategory::Passive,
    &[
      "{object}被{subject}{predicate}，这表明{conclusion}。",
      "{object}受到{subject}的{predicate}，导致{result}。",
      "由{subject}{predicate}的{object}显示出{trait}。",
      "{object}在{subject}的作用下{predicate}，呈现出{trait}。",
      "经过{subject}的{predicate}，{object}表现出{trait}。",
    ],
  ),
  (
    TemplateCategory::Compound,
    &[
      "如果{condition}，那么{subject}将{predicate}{object}。",
      "只有当{condition}时，{subject}才能{predicate}{object}。",
      "随着{change}，{subject}{predicate}{object}的程度也在增加。",
      "由于{cause}，{subject}{predicate}{object}的现象越来越明显。",
      "尽管{concession}，{subject}仍然{predicate}{object}。",
    ],
  ),
];

/// Human-writing markers per feature kind.
pub fn seed_features() -> &'static [(FeatureKind, &'static [&'static str])] {
  FEATURES
}

const FEATURES: &[(FeatureKind, &[&str])] = &[
  (
    FeatureKind::Colloquial,
    &[
      "说实话", "坦白讲", "老实说", "实际上", "说白了", "简单来说",
      "换句话说", "打个比方", "举个例子", "不得不说", "值得一提的是",
      "有意思的是", "令人惊讶的是", "不可思议的是", "说来也怪",
      "说来话长", "说起来容易做起来难", "说到这里", "说到底",
    ],
  ),
  (
    FeatureKind::Idiom,
    &[
      "一目了然", "不言而喻", "深入浅出", "循序渐进", "举一反三",
      "触类旁通", "融会贯通", "学无止境", "集思广益", "博采众长",
      "推陈出新", "精益求精", "锲而不舍", "孜孜不倦", "日新月异",
      "与时俱进", "不断创新", "开拓进取", "百家争鸣", "百花齐放",
    ],
  ),
  (
    FeatureKind::Transition,
    &[
      "然而", "不过", "但是", "尽管如此", "话虽如此", "相反",
      "与此相反", "另一方面", "从另一个角度看", "尽管", "虽然",
      "固然", "诚然", "的确", "确实", "无可否认", "不可否认",
      "可是", "只是", "不仅如此", "更重要的是", "此外", "除此之外",
      "不仅仅是", "更为关键的是", "值得注意的是", "需要强调的是",
    ],
  ),
  (
    FeatureKind::Opinion,
    &[
      "我认为", "在我看来", "依我之见", "以我之见", "我个人认为",
      "我的观点是", "我的看法是", "据我所知", "就我所知", "我的理解是",
      "我的体会是", "我的经验是", "我的感受是", "我的判断是", "我的分析是",
    ],
  ),
  (
    FeatureKind::Rhetorical,
    &[
      "，难道不是吗？", "，不是吗？", "，谁能否认这一点呢？", "，这难道不值得深思吗？",
      "，难道我们不应该重视吗？", "，试问还有更好的办法吗？", "，这又何尝不是一种进步呢？",
    ],
  ),
];

/// Stereotyped phrasing, in the order the neutralizer applies it.
pub fn seed_patterns() -> &'static [(PatternFamily, &'static str)] {
  &[
    (PatternFamily::Enumeration, r"首先.*其次.*最后"),
    (PatternFamily::Contrast, r"一方面.*另一方面"),
    (PatternFamily::Progression, r"不仅.*而且"),
    (PatternFamily::Causal, r"因此.*所以"),
    (PatternFamily::Summary, r"总的来说"),
    (PatternFamily::Summary, r"总而言之"),
    (PatternFamily::Summary, r"综上所述"),
    (PatternFamily::Emphasis, r"值得注意的是"),
    (PatternFamily::Emphasis, r"需要指出的是"),
    (PatternFamily::Emphasis, r"有必要强调"),
    (PatternFamily::Certainty, r"毫无疑问"),
    (PatternFamily::Certainty, r"显而易见"),
    (PatternFamily::Certainty, r"不言而喻"),
  ]
}

/// Filler and hedge words inserted by the perplexity adjuster.
pub fn seed_fillers() -> &'static [&'static str] {
  &["其实", "说实话", "确实", "的确", "当然", "无疑", "或许", "可能", "大概", "也许"]
}

/// Words automated detectors associate with generated text.
pub fn seed_preferred_words() -> &'static [&'static str] {
  &[
    "delve into", "plethora", "myriad", "paradigm", "robust", "leverage", "synergy",
    "holistic", "innovative", "unprecedented", "revolutionary", "transformative",
    "cutting-edge", "state-of-the-art", "groundbreaking", "disruptive", "game-changing",
  ]
}
