//! Noun lemmatization following WordNet morphology

use std::collections::HashSet;

/// Irregular plurals that suffix rules cannot recover
const EXCEPTIONS: &[(&str, &str)] = &[
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("salesmen", "salesman"),
    ("businessmen", "businessman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("analyses", "analysis"),
    ("criteria", "criterion"),
    ("phenomena", "phenomenon"),
];

/// Detachment rules tried when a lexicon is available, in WordNet order
const LEXICON_RULES: &[(&str, &str)] = &[
    ("s", ""),
    ("ses", "s"),
    ("ves", "f"),
    ("xes", "x"),
    ("zes", "z"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("men", "man"),
    ("ies", "y"),
];

const MIN_LEMMA_LEN: usize = 3;

/// Reduces plural nouns to their base form.
///
/// With a lexicon, a word already in the lexicon is returned unchanged and a
/// candidate is only accepted if the lexicon knows it. Without one, a
/// conservative rule set is applied directly. Both modes are idempotent.
#[derive(Debug, Clone, Default)]
pub struct Lemmatizer {
    lexicon: Option<HashSet<String>>,
}

impl Lemmatizer {
    /// Rule-only lemmatizer
    pub fn new() -> Self {
        Self { lexicon: None }
    }

    pub fn with_lexicon(lexicon: HashSet<String>) -> Self {
        Self {
            lexicon: Some(lexicon),
        }
    }

    pub fn has_lexicon(&self) -> bool {
        self.lexicon.is_some()
    }

    pub fn lemmatize(&self, word: &str) -> String {
        match &self.lexicon {
            Some(lexicon) => Self::lemmatize_with_lexicon(word, lexicon),
            None => Self::lemmatize_by_rules(word),
        }
    }

    fn exception(word: &str) -> Option<&'static str> {
        EXCEPTIONS
            .iter()
            .find(|(plural, _)| *plural == word)
            .map(|(_, base)| *base)
    }

    fn lemmatize_with_lexicon(word: &str, lexicon: &HashSet<String>) -> String {
        if lexicon.contains(word) {
            return word.to_string();
        }
        if let Some(base) = Self::exception(word) {
            if lexicon.contains(base) {
                return base.to_string();
            }
        }

        LEXICON_RULES
            .iter()
            .filter_map(|(suffix, replacement)| {
                word.strip_suffix(suffix)
                    .map(|stem| format!("{stem}{replacement}"))
            })
            .find(|candidate| lexicon.contains(candidate))
            .unwrap_or_else(|| word.to_string())
    }

    fn lemmatize_by_rules(word: &str) -> String {
        if let Some(base) = Self::exception(word) {
            return base.to_string();
        }
        // Singular forms that end in "s"
        if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
            return word.to_string();
        }

        let candidate = if let Some(stem) = word.strip_suffix("ies") {
            if word.len() > 4 {
                format!("{stem}y")
            } else {
                // lies, ties, dies
                format!("{stem}ie")
            }
        } else if let Some(stem) = word.strip_suffix("sses") {
            format!("{stem}ss")
        } else if let Some(stem) = ["xes", "zes", "ches", "shes"]
            .iter()
            .find_map(|suffix| word.strip_suffix(suffix).map(|s| (s, &suffix[..suffix.len() - 2])))
            .map(|(stem, kept)| format!("{stem}{kept}"))
        {
            stem
        } else if let Some(stem) = word.strip_suffix('s') {
            stem.to_string()
        } else {
            return word.to_string();
        };

        if candidate.len() < MIN_LEMMA_LEN {
            word.to_string()
        } else {
            candidate
        }
    }
}
