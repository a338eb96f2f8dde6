//! Topic classification of keywords
//!
//! Each keyword is matched against small curated pattern tables, one per
//! topic bucket. Buckets are tried in a fixed priority order and the first
//! match wins; keywords matching nothing are left out. Every bucket is
//! reported, empty or not, so the output shape is stable.

use serde::Serialize;

use crate::types::Keyword;

/// Fixed topic categories, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Concepts and definitions
    Concept,
    /// Features, properties and advantages
    Feature,
    /// Applications and uses
    Application,
    /// Techniques and methods
    Technique,
}

impl Topic {
    /// Bucket priority for first-match-wins classification.
    pub const PRIORITY: [Topic; 4] = [
        Topic::Concept,
        Topic::Feature,
        Topic::Application,
        Topic::Technique,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Concept => "concept",
            Topic::Feature => "feature",
            Topic::Application => "application",
            Topic::Technique => "technique",
        }
    }

    /// Heading used in rendered reports.
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Concept => "개념/정의",
            Topic::Feature => "특징/장점",
            Topic::Application => "응용/사용",
            Topic::Technique => "기술/방법",
        }
    }
}

/// How a pattern is matched against a keyword
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// Pattern appears anywhere in the keyword
    Contains,
    /// Keyword ends with the pattern
    Suffix,
}

/// A single classification pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicPattern {
    pub pattern: &'static str,
    pub kind: MatchKind,
}

impl TopicPattern {
    const fn contains(pattern: &'static str) -> Self {
        Self {
            pattern,
            kind: MatchKind::Contains,
        }
    }

    const fn suffix(pattern: &'static str) -> Self {
        Self {
            pattern,
            kind: MatchKind::Suffix,
        }
    }

    /// Match against an already lowercased keyword.
    pub fn matches(&self, keyword: &str) -> bool {
        match self.kind {
            MatchKind::Contains => keyword.contains(self.pattern),
            MatchKind::Suffix => {
                keyword.len() > self.pattern.len() && keyword.ends_with(self.pattern)
            }
        }
    }
}

const CONCEPT_PATTERNS: &[TopicPattern] = &[
    TopicPattern::contains("정의"),
    TopicPattern::contains("개념"),
    TopicPattern::contains("의미"),
    TopicPattern::contains("이해"),
    TopicPattern::contains("원리"),
    TopicPattern::contains("이론"),
    TopicPattern::suffix("론"),
    TopicPattern::contains("definition"),
    TopicPattern::contains("concept"),
    TopicPattern::contains("meaning"),
    TopicPattern::contains("theory"),
    TopicPattern::contains("principle"),
    TopicPattern::suffix("ism"),
];

const FEATURE_PATTERNS: &[TopicPattern] = &[
    TopicPattern::contains("특징"),
    TopicPattern::contains("특성"),
    TopicPattern::contains("장점"),
    TopicPattern::contains("단점"),
    TopicPattern::contains("효과"),
    TopicPattern::contains("성능"),
    TopicPattern::contains("효율"),
    TopicPattern::suffix("성"),
    TopicPattern::contains("feature"),
    TopicPattern::contains("property"),
    TopicPattern::contains("advantage"),
    TopicPattern::contains("benefit"),
    TopicPattern::contains("performance"),
    TopicPattern::contains("efficien"),
    TopicPattern::suffix("ity"),
];

const APPLICATION_PATTERNS: &[TopicPattern] = &[
    TopicPattern::contains("응용"),
    TopicPattern::contains("사용"),
    TopicPattern::contains("활용"),
    TopicPattern::contains("적용"),
    TopicPattern::contains("사례"),
    TopicPattern::contains("서비스"),
    TopicPattern::contains("application"),
    TopicPattern::contains("usage"),
    TopicPattern::contains("apply"),
    TopicPattern::contains("deploy"),
    TopicPattern::contains("use case"),
    TopicPattern::contains("industry"),
    TopicPattern::contains("industries"),
];

const TECHNIQUE_PATTERNS: &[TopicPattern] = &[
    TopicPattern::contains("기술"),
    TopicPattern::contains("방법"),
    TopicPattern::contains("알고리즘"),
    TopicPattern::contains("기법"),
    TopicPattern::contains("모델"),
    TopicPattern::contains("학습"),
    TopicPattern::suffix("법"),
    TopicPattern::contains("technique"),
    TopicPattern::contains("method"),
    TopicPattern::contains("algorithm"),
    TopicPattern::contains("approach"),
    TopicPattern::contains("model"),
    TopicPattern::contains("procedure"),
];

/// Built-in pattern table for a topic.
pub fn patterns(topic: Topic) -> &'static [TopicPattern] {
    match topic {
        Topic::Concept => CONCEPT_PATTERNS,
        Topic::Feature => FEATURE_PATTERNS,
        Topic::Application => APPLICATION_PATTERNS,
        Topic::Technique => TECHNIQUE_PATTERNS,
    }
}

/// A topic and the keywords assigned to it, in keyword rank order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopicBucket {
    pub topic: Topic,
    pub keywords: Vec<Keyword>,
}

impl TopicBucket {
    pub fn new(topic: Topic) -> Self {
        Self {
            topic,
            keywords: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }
}

/// Pattern-table keyword classifier
#[derive(Debug, Clone)]
pub struct TopicClassifier {
    /// (topic, patterns) in priority order
    rules: Vec<(Topic, &'static [TopicPattern])>,
}

impl Default for TopicClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl TopicClassifier {
    /// Classifier with the built-in tables in [`Topic::PRIORITY`] order.
    pub fn new() -> Self {
        Self {
            rules: Topic::PRIORITY
                .iter()
                .map(|&topic| (topic, patterns(topic)))
                .collect(),
        }
    }

    /// Classifier with explicit rules; their order is the bucket priority.
    pub fn with_rules(rules: Vec<(Topic, &'static [TopicPattern])>) -> Self {
        Self { rules }
    }

    /// The first topic whose patterns match, if any.
    pub fn topic_of(&self, keyword: &str) -> Option<Topic> {
        let lowered = keyword.to_lowercase();
        self.rules
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|p| p.matches(&lowered)))
            .map(|(topic, _)| *topic)
    }

    /// Group keywords into buckets, one bucket per rule, in rule order.
    pub fn classify(&self, keywords: &[Keyword]) -> Vec<TopicBucket> {
        let mut buckets: Vec<TopicBucket> = self
            .rules
            .iter()
            .map(|(topic, _)| TopicBucket::new(*topic))
            .collect();

        for keyword in keywords {
            if let Some(topic) = self.topic_of(&keyword.text) {
                if let Some(bucket) = buckets.iter_mut().find(|b| b.topic == topic) {
                    bucket.keywords.push(keyword.clone());
                }
            }
        }

        buckets
    }
}
