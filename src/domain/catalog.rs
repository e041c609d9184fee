//! Static reply material: response table, scripture table, and the fixed prompts.
//!
//! Built once at start-up into a `ReplyCatalog` and shared by `Arc`.

use crate::domain::rules::RuleSet;
use crate::domain::{Category, DomainError, Verse};
use std::collections::HashMap;

/// Reply for empty or whitespace-only input.
pub const GREETING_PROMPT: &str = "Peace be with you. How may I help you today?";

/// Spoken when a voice call starts without speech.
pub const VOICE_OPENING: &str = "Peace be with you. I am here to listen. Please speak your heart.";

/// Spoken after a voice reply.
pub const VOICE_FOLLOW_UP: &str = "Would you like to say something else?";

/// Spoken when the caller says nothing.
pub const VOICE_CLOSING: &str = "I did not hear anything. God bless you.";

/// Last-resort text when a transport cannot produce a reply.
pub const APOLOGY: &str = "I am having trouble responding right now. Please try again in a moment.";

/// Last-resort line spoken on a voice call.
pub const VOICE_APOLOGY: &str = "I am having trouble responding right now. Please try calling again.";

/// Acknowledgement returned with a prayer receipt.
pub const PRAYER_ACK: &str = "Your prayer has been received. May peace be with you.";

fn standard_responses(category: Category) -> &'static [&'static str] {
    match category {
        Category::Sadness => &[
            "Blessed are those who mourn, for they will be comforted. I am with you in your sorrow, my child.",
            "Come to me, all who are weary and burdened, and I will give you rest.",
            "I have seen your tears. Weeping may stay for the night, but joy comes in the morning.",
        ],
        Category::Anxiety => &[
            "Do not be afraid, for I am with you. Cast all your anxiety on me, because I care for you.",
            "Do not worry about tomorrow, for tomorrow will worry about itself. Trust in me today.",
            "Peace I leave with you. Let not your heart be troubled, neither let it be afraid.",
        ],
        Category::Anger => &[
            "In your anger do not sin. Let go of your anger and find peace in my love.",
            "A gentle answer turns away wrath. Bring your anger to me and lay it down.",
            "Love your enemies and pray for those who hurt you, so that your heart may be free.",
        ],
        Category::Joy => &[
            "Rejoice always, and give thanks in all circumstances. Your joy is my joy.",
            "Give thanks to the Lord, for He is good. His love endures forever.",
            "This is the day the Lord has made. Rejoice and be glad in it.",
        ],
        Category::Love => &[
            "Love one another as I have loved you. This is my commandment.",
            "Love is patient, love is kind. It keeps no record of wrongs.",
            "Greater love has no one than this: to lay down one's life for one's friends.",
        ],
        Category::Forgiveness => &[
            "Your sins are forgiven. Go and sin no more. I came to save, not to condemn.",
            "Forgive, and you will be forgiven. Not seven times, but seventy times seven.",
            "If we confess our sins, He is faithful to forgive. Your slate is clean, my child.",
        ],
        Category::Faith => &[
            "If you have faith as small as a mustard seed, nothing will be impossible for you.",
            "Blessed are those who have not seen and yet have believed.",
            "Do not doubt, but believe. Your faith has made you whole.",
        ],
        Category::Guidance => &[
            "I am the way, the truth, and the life. Follow me and you will not walk in darkness.",
            "Trust in the Lord with all your heart and lean not on your own understanding.",
            "Seek and you shall find. Ask, and it will be given to you. I am here to guide you.",
        ],
        Category::Strength => &[
            "My grace is sufficient for you, for my power is made perfect in weakness.",
            "You can do all things through Him who gives you strength.",
            "Those who hope in the Lord will renew their strength. They will soar on wings like eagles.",
        ],
        Category::Peace => &[
            "Peace I leave with you; my peace I give you. Not as the world gives.",
            "Be still, and know that I am God.",
            "Come away to a quiet place and rest a while. My peace is with you.",
        ],
        Category::Hope => &[
            "I know the plans I have for you: plans to give you hope and a future.",
            "Hope does not disappoint, because God's love has been poured into your heart.",
            "Behold, I make all things new. Hold fast to hope, my child.",
        ],
        Category::Prayer => &[
            "When you pray, go into your room and pray to your Father in secret. Ask and it will be given to you.",
            "Pray without ceasing. Your Father knows what you need before you ask Him.",
            "Where two or three gather in my name, there am I with them. Let us pray together.",
        ],
        Category::Greeting => &[
            "Peace be with you, my child. How may I help you today?",
            "Welcome, my child. How may I guide you today?",
            "Grace and peace to you. I am here to listen.",
        ],
        Category::Neutral => &[
            "Peace be with you, my child. How may I help you today?",
            "I am here with you. Tell me what is on your heart.",
            "Ask, and it will be given to you. What would you like to share with me?",
        ],
    }
}

fn standard_verses(category: Category) -> &'static [(&'static str, &'static str)] {
    match category {
        Category::Love => &[
            ("John 13:34", "A new command I give you: Love one another. As I have loved you, so you must love one another."),
            ("1 Corinthians 13:4", "Love is patient, love is kind. It does not envy, it does not boast, it is not proud."),
        ],
        Category::Forgiveness => &[
            ("Ephesians 4:32", "Be kind and compassionate to one another, forgiving each other, just as in Christ God forgave you."),
            ("1 John 1:9", "If we confess our sins, he is faithful and just and will forgive us our sins."),
        ],
        Category::Faith => &[
            ("Hebrews 11:1", "Now faith is confidence in what we hope for and assurance about what we do not see."),
            ("Matthew 17:20", "If you have faith as small as a mustard seed, nothing will be impossible for you."),
        ],
        Category::Guidance => &[
            ("Proverbs 3:5-6", "Trust in the Lord with all your heart and lean not on your own understanding; in all your ways submit to him, and he will make your paths straight."),
            ("Psalm 32:8", "I will instruct you and teach you in the way you should go; I will counsel you with my loving eye on you."),
        ],
        Category::Strength => &[
            ("Philippians 4:13", "I can do all this through him who gives me strength."),
            ("Isaiah 40:31", "Those who hope in the Lord will renew their strength. They will soar on wings like eagles."),
        ],
        Category::Peace => &[
            ("John 14:27", "Peace I leave with you; my peace I give you. I do not give to you as the world gives."),
            ("Philippians 4:7", "And the peace of God, which transcends all understanding, will guard your hearts and your minds."),
        ],
        Category::Hope => &[
            ("Jeremiah 29:11", "For I know the plans I have for you, plans to prosper you and not to harm you, plans to give you hope and a future."),
            ("Romans 15:13", "May the God of hope fill you with all joy and peace as you trust in him."),
        ],
        _ => &[],
    }
}

/// Category -> non-empty list of candidate replies.
#[derive(Debug, Clone)]
pub struct ResponseTable {
    entries: HashMap<Category, Vec<String>>,
}

impl ResponseTable {
    /// Build a custom table. Every category must have at least one non-blank candidate.
    pub fn new(entries: HashMap<Category, Vec<String>>) -> Result<Self, DomainError> {
        for category in Category::ALL {
            let ok = entries
                .get(&category)
                .is_some_and(|v| !v.is_empty() && v.iter().all(|s| !s.trim().is_empty()));
            if !ok {
                return Err(DomainError::Config(format!(
                    "response table has no usable reply for category '{}'",
                    category
                )));
            }
        }
        Ok(Self { entries })
    }

    pub fn standard() -> Self {
        let entries = Category::ALL
            .iter()
            .map(|&c| {
                (
                    c,
                    standard_responses(c).iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self { entries }
    }

    /// Candidates for `category`. Non-empty by construction.
    pub fn candidates(&self, category: Category) -> &[String] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// True when `reply` appears anywhere in the table.
    pub fn contains(&self, reply: &str) -> bool {
        self.entries.values().flatten().any(|s| s == reply)
    }
}

impl Default for ResponseTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Topic category -> verses. Only `Category::SCRIPTURE_TOPICS` have entries.
#[derive(Debug, Clone)]
pub struct ScriptureTable {
    entries: HashMap<Category, Vec<Verse>>,
}

impl ScriptureTable {
    pub fn standard() -> Self {
        let entries = Category::SCRIPTURE_TOPICS
            .iter()
            .map(|&c| {
                let verses = standard_verses(c)
                    .iter()
                    .map(|(reference, text)| Verse {
                        reference: reference.to_string(),
                        text: text.to_string(),
                    })
                    .collect();
                (c, verses)
            })
            .collect();
        Self { entries }
    }

    /// Empty slice for categories without scripture.
    pub fn verses(&self, category: Category) -> &[Verse] {
        self.entries
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

impl Default for ScriptureTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Everything the local reply path reads. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct ReplyCatalog {
    pub rules: RuleSet,
    pub responses: ResponseTable,
    pub scripture: ScriptureTable,
}

impl ReplyCatalog {
    pub fn new(rules: RuleSet, responses: ResponseTable, scripture: ScriptureTable) -> Self {
        Self {
            rules,
            responses,
            scripture,
        }
    }

    pub fn standard() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table_covers_every_category() {
        let table = ResponseTable::standard();
        for c in Category::ALL {
            assert!(!table.candidates(c).is_empty(), "no replies for {c}");
        }
    }

    #[test]
    fn test_custom_table_rejects_missing_category() {
        let mut entries = HashMap::new();
        entries.insert(Category::Love, vec!["Love one another.".to_string()]);
        assert!(matches!(
            ResponseTable::new(entries),
            Err(DomainError::Config(_))
        ));
    }

    #[test]
    fn test_custom_table_rejects_blank_reply() {
        let mut entries: HashMap<Category, Vec<String>> = Category::ALL
            .iter()
            .map(|&c| (c, vec![format!("reply for {c}")]))
            .collect();
        entries.insert(Category::Hope, vec!["  ".to_string()]);
        assert!(ResponseTable::new(entries).is_err());
    }

    #[test]
    fn test_scripture_only_for_topics() {
        let scripture = ScriptureTable::standard();
        for c in Category::SCRIPTURE_TOPICS {
            assert!(!scripture.verses(c).is_empty(), "no verses for {c}");
        }
        assert!(scripture.verses(Category::Greeting).is_empty());
        assert!(scripture.verses(Category::Anger).is_empty());
    }
}
