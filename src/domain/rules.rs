//! Keyword classifier. Maps raw text to exactly one `Category`.
//!
//! Two layers evaluated in order: sentiment rules first, then topic rules.
//! Within a layer the first rule with any keyword contained in the
//! normalised text wins. No match anywhere yields `Category::Neutral`.
//!
//! Matching is substring containment against the normalised text: lower-cased,
//! punctuation turned into single spaces, and padded with one space on each
//! side. A keyword with a leading or trailing space therefore only fires at a
//! word boundary (" tired" matches "tired" but not "retired").

use crate::domain::Category;
use std::sync::LazyLock;

/// Lower-case `text`, keep letters, digits and apostrophes, collapse everything
/// else to single spaces, and pad both ends with a space.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' { c } else { ' ' })
        .collect();
    let mut out = String::with_capacity(cleaned.len() + 2);
    out.push(' ');
    for word in cleaned.split_whitespace() {
        out.push_str(word);
        out.push(' ');
    }
    out
}

/// An ordered (category, keywords) pair.
#[derive(Debug, Clone)]
pub struct ClassificationRule {
    pub category: Category,
    pub keywords: Vec<String>,
}

impl ClassificationRule {
    /// Keywords are stored lower-cased. Boundary spaces are kept.
    pub fn new<I, S>(category: Category, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            category,
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Returns the first keyword contained in `normalized` (see [`normalize`]), if any.
    pub fn matched_keyword(&self, normalized: &str) -> Option<&str> {
        self.keywords
            .iter()
            .find(|k| !k.trim().is_empty() && normalized.contains(k.as_str()))
            .map(String::as_str)
    }
}

const SADNESS_KW: &[&str] = &[
    " sad",
    "unhappy",
    "depressed",
    "sorrow",
    "grief",
    "grieving",
    "mourn",
    "heartbroken",
    "heart is broken",
    "lonely",
    "crying",
    "despair",
    "empty inside",
    "i feel so empty",
];

const ANXIETY_KW: &[&str] = &[
    "anxious",
    "anxiety",
    "worried",
    "worry",
    "nervous",
    "stress",
    "afraid",
    "scared",
    "fear",
    "terrified",
    "panic",
    "can't sleep",
];

const ANGER_KW: &[&str] = &[
    "angry",
    " anger",
    "furious",
    " mad at ",
    " hate",
    " resent",
    "bitter",
    "outraged",
    "in a rage",
];

const JOY_KW: &[&str] = &[
    "happy",
    " joy",
    "rejoice",
    "grateful",
    "thankful",
    "thank you",
    "celebrate",
    "excited",
    "wonderful news",
];

const LOVE_KW: &[&str] = &[" love", "beloved", "marriage", "relationship", "compassion"];

const FORGIVENESS_KW: &[&str] = &[
    "forgive",
    "forgiveness",
    " sin ",
    " sins ",
    " sinned",
    " sinner",
    "guilt",
    "ashamed",
    "mercy",
    "repent",
];

const FAITH_KW: &[&str] = &[
    "faith",
    "believe",
    "belief",
    "doubt",
    "trust in god",
    "trust god",
    "scripture",
    "bible",
];

const GUIDANCE_KW: &[&str] = &[
    "guidance",
    "guide me",
    " lost ",
    "direction",
    "purpose",
    "decision",
    "what should i do",
    "confused",
    "help me",
];

const STRENGTH_KW: &[&str] = &[
    "strength",
    "strong",
    " weak",
    " tired",
    "exhausted",
    "courage",
    "overwhelmed",
    "struggl",
    "give up",
];

const PEACE_KW: &[&str] = &["peace", "calm", "serenity", "restless", "quiet", "tranquil"];

const HOPE_KW: &[&str] = &["hope", "future", "promise", "better days"];

const PRAYER_KW: &[&str] = &[" pray", " amen "];

const GREETING_KW: &[&str] = &[
    " hello",
    " hi ",
    " hey ",
    "greetings",
    "good morning",
    "good afternoon",
    "good evening",
    "shalom",
];

/// Ordered rule table. Immutable after construction.
#[derive(Debug, Clone)]
pub struct RuleSet {
    sentiment: Vec<ClassificationRule>,
    topics: Vec<ClassificationRule>,
}

impl RuleSet {
    pub fn new(sentiment: Vec<ClassificationRule>, topics: Vec<ClassificationRule>) -> Self {
        Self { sentiment, topics }
    }

    /// The canonical rule set.
    pub fn standard() -> Self {
        let rule = |c, kw: &[&str]| ClassificationRule::new(c, kw.iter());
        Self {
            sentiment: vec![
                rule(Category::Sadness, SADNESS_KW),
                rule(Category::Anxiety, ANXIETY_KW),
                rule(Category::Anger, ANGER_KW),
                rule(Category::Joy, JOY_KW),
            ],
            topics: vec![
                rule(Category::Love, LOVE_KW),
                rule(Category::Forgiveness, FORGIVENESS_KW),
                rule(Category::Faith, FAITH_KW),
                rule(Category::Guidance, GUIDANCE_KW),
                rule(Category::Strength, STRENGTH_KW),
                rule(Category::Peace, PEACE_KW),
                rule(Category::Hope, HOPE_KW),
                rule(Category::Prayer, PRAYER_KW),
                rule(Category::Greeting, GREETING_KW),
            ],
        }
    }

    /// All rules in evaluation order.
    pub fn rules(&self) -> impl Iterator<Item = &ClassificationRule> {
        self.sentiment.iter().chain(self.topics.iter())
    }

    /// Classify `text`. Pure; never fails.
    pub fn classify(&self, text: &str) -> Category {
        let normalized = normalize(text);
        self.rules()
            .find(|r| r.matched_keyword(&normalized).is_some())
            .map(|r| r.category)
            .unwrap_or(Category::Neutral)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

static STANDARD_RULES: LazyLock<RuleSet> = LazyLock::new(RuleSet::standard);

/// Classify with the canonical rule set.
pub fn classify(text: &str) -> Category {
    STANDARD_RULES.classify(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topic_examples() {
        assert_eq!(classify("I love you"), Category::Love);
        assert_eq!(classify("please forgive me"), Category::Forgiveness);
        assert_eq!(classify("hello there"), Category::Greeting);
        assert_eq!(classify("How do I pray?"), Category::Prayer);
        assert_eq!(classify("My faith feels weak"), Category::Faith);
    }

    #[test]
    fn test_sentiment_precedes_topic() {
        // "scared" (anxiety) and "lost" (guidance) both match
        assert_eq!(classify("I am scared and lost"), Category::Anxiety);
        // "sad" beats "love"
        assert_eq!(classify("I am sad that my love left"), Category::Sadness);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(classify("I AM SO ANGRY"), Category::Anger);
        assert_eq!(classify("Thank You, Jesus!"), Category::Joy);
    }

    #[test]
    fn test_no_match_is_neutral() {
        assert_eq!(classify("what time is it"), Category::Neutral);
        assert_eq!(classify(""), Category::Neutral);
        assert_eq!(classify("   "), Category::Neutral);
    }

    #[test]
    fn test_avoids_common_false_hits() {
        for text in [
            "I made lunch",
            "since yesterday",
            "they came",
            "I want to present my idea",
            "they represent us",
            "whatever you say",
            "I retired last year",
            "I ate raisins",
            "a small tweak",
            "we passed an amendment",
            "the spray bottle",
            "there is danger ahead",
            "a new glove",
            "I am sincere",
            "this is my first visit",
        ] {
            assert_eq!(classify(text), Category::Neutral, "{text:?}");
        }
    }

    #[test]
    fn test_word_boundary_keywords_still_fire() {
        assert_eq!(classify("Hi"), Category::Greeting);
        assert_eq!(classify("hey Jesus"), Category::Greeting);
        assert_eq!(classify("Amen."), Category::Prayer);
        assert_eq!(classify("I hate this"), Category::Anger);
        assert_eq!(classify("I resent my brother"), Category::Anger);
        assert_eq!(classify("I am so tired"), Category::Strength);
        assert_eq!(classify("I feel weak"), Category::Strength);
        assert_eq!(classify("forgive my sins, Lord"), Category::Forgiveness);
        assert_eq!(classify("I have sinned"), Category::Forgiveness);
    }

    #[test]
    fn test_normalize_pads_and_strips_punctuation() {
        assert_eq!(normalize("Amen!"), " amen ");
        assert_eq!(normalize("  Hi,   there. "), " hi there ");
        assert_eq!(normalize("I can't sleep"), " i can't sleep ");
        assert_eq!(normalize(""), " ");
    }

    #[test]
    fn test_classify_is_deterministic() {
        let text = "I'm worried about my future";
        let first = classify(text);
        for _ in 0..10 {
            assert_eq!(classify(text), first);
        }
        assert_eq!(first, Category::Anxiety);
    }

    #[test]
    fn test_custom_rule_order() {
        let rules = RuleSet::new(
            vec![],
            vec![
                ClassificationRule::new(Category::Hope, ["Light"]),
                ClassificationRule::new(Category::Peace, ["light"]),
            ],
        );
        assert_eq!(rules.classify("a LIGHT in the dark"), Category::Hope);
        assert_eq!(rules.classify("darkness"), Category::Neutral);
    }

    #[test]
    fn test_every_keyword_classifies_to_its_own_rule_or_earlier() {
        let rules = RuleSet::standard();
        let order: Vec<Category> = rules.rules().map(|r| r.category).collect();
        for rule in rules.rules() {
            let own = order.iter().position(|c| *c == rule.category).unwrap();
            for kw in &rule.keywords {
                let got = rules.classify(kw);
                let pos = order.iter().position(|c| *c == got).unwrap();
                assert!(pos <= own, "keyword {kw:?} classified as {got}");
            }
        }
    }
}
