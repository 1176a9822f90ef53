//! Stress and positive-affect lexicons.
//!
//! Fixed keyword tables for English, Hindi (Devanagari) and Hinglish
//! (romanized Hindi / Hindi-English code-switch). All entries are stored
//! lowercase; matching is done against lowercased text.

use std::sync::LazyLock;

/// Stress keywords, English
const STRESS_EN: &[&str] = &[
    "stressed",
    "anxious",
    "anxiety",
    "overwhelmed",
    "worried",
    "panic",
    "depressed",
    "hopeless",
    "helpless",
    "exhausted",
    "tired",
    "lonely",
    "sad",
    "scared",
    "afraid",
    "nervous",
    "frustrated",
    "angry",
    "burnout",
    "burned out",
    "can't sleep",
    "cannot sleep",
    "insomnia",
    "crying",
    "worthless",
    "miserable",
    "restless",
    "pressure",
    "tense",
    "upset",
    "hurt",
    "pain",
    "give up",
    "no energy",
    "breakdown",
];

/// Stress keywords, Hindi (Devanagari)
const STRESS_HI: &[&str] = &[
    "तनाव",
    "चिंता",
    "परेशान",
    "उदास",
    "डर",
    "थका",
    "अकेला",
    "अकेली",
    "घबराहट",
    "दुखी",
    "निराश",
    "गुस्सा",
    "रोना",
];

/// Stress keywords, Hinglish
const STRESS_HINGLISH: &[&str] = &[
    "tension",
    "pareshan",
    "udaas",
    "dukhi",
    "thak gaya",
    "thak gayi",
    "bahut bura",
    "dar lag",
    "ghabrahat",
    "chinta",
    "akela",
    "akeli",
    "nirash",
    "gussa",
    "rona aa",
    "mann nahi",
    "neend nahi",
    "pagal ho",
];

/// Positive keywords, English
const POSITIVE_EN: &[&str] = &[
    "happy",
    "great",
    "wonderful",
    "good",
    "better",
    "calm",
    "relaxed",
    "grateful",
    "thankful",
    "excited",
    "joy",
    "peaceful",
    "confident",
    "motivated",
    "hopeful",
    "proud",
    "love",
    "amazing",
    "awesome",
    "fantastic",
    "blessed",
];

/// Positive keywords, Hindi (Devanagari)
const POSITIVE_HI: &[&str] = &["खुश", "अच्छा", "शांत", "आभारी", "बढ़िया", "प्यार"];

/// Positive keywords, Hinglish
const POSITIVE_HINGLISH: &[&str] = &[
    "khush",
    "accha",
    "achha",
    "mast",
    "badhiya",
    "shukriya",
    "sukoon",
    "shaant",
];

fn concat(tables: &[&[&'static str]]) -> Vec<&'static str> {
    tables.iter().flat_map(|table| table.iter().copied()).collect()
}

static STRESS_KEYWORDS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| concat(&[STRESS_EN, STRESS_HI, STRESS_HINGLISH]));

static POSITIVE_KEYWORDS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| concat(&[POSITIVE_EN, POSITIVE_HI, POSITIVE_HINGLISH]));

/// All stress keywords, English then Hindi then Hinglish
pub fn stress_keywords() -> &'static [&'static str] {
    &STRESS_KEYWORDS
}

/// All positive keywords, English then Hindi then Hinglish
pub fn positive_keywords() -> &'static [&'static str] {
    &POSITIVE_KEYWORDS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tables_are_lowercase() {
        for term in stress_keywords().iter().chain(positive_keywords()) {
            assert_eq!(*term, term.to_lowercase(), "'{}' must be lowercase", term);
        }
    }

    #[test]
    fn test_no_duplicates() {
        let stress: HashSet<&str> = stress_keywords().iter().copied().collect();
        assert_eq!(stress.len(), stress_keywords().len());

        let positive: HashSet<&str> = positive_keywords().iter().copied().collect();
        assert_eq!(positive.len(), positive_keywords().len());

        assert!(stress.is_disjoint(&positive));
    }

    #[test]
    fn test_tables_concatenated_in_order() {
        assert_eq!(
            stress_keywords().len(),
            STRESS_EN.len() + STRESS_HI.len() + STRESS_HINGLISH.len()
        );
        assert_eq!(stress_keywords()[0], STRESS_EN[0]);
        assert_eq!(stress_keywords()[STRESS_EN.len()], STRESS_HI[0]);
        assert_eq!(positive_keywords().last(), POSITIVE_HINGLISH.last());
    }
}
