//! The vocabulary catalog: study words plus a common-word synonym map.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use camino::Utf8Path;
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

const BUILTIN_VOCABULARY: &str = include_str!("../data/vocabulary.json");

static BUILTIN: LazyLock<Vocabulary> = LazyLock::new(|| {
    Vocabulary::from_json_str(BUILTIN_VOCABULARY).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "built-in vocabulary is invalid; using empty catalog");
        Vocabulary::default()
    })
});

/// How hard a vocabulary word is.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Level {
    /// Everyday words.
    Beginner,
    /// Common in professional writing.
    Intermediate,
    /// Uncommon but widely understood.
    Advanced,
    /// Specialist or rare.
    Expert,
}

impl Level {
    /// Returns the level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subject area of a vocabulary word.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Category {
    /// General usage.
    General,
    /// Software and engineering.
    Technical,
    /// Workplace and commerce.
    Business,
    /// Research and scholarship.
    Academic,
}

impl Category {
    /// Returns the category as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Technical => "technical",
            Self::Business => "business",
            Self::Academic => "academic",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A study word with its definition and usage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct VocabularyWord {
    /// Stable identifier.
    pub id: String,
    /// The headword.
    pub word: String,
    /// Short definition.
    pub definition: String,
    /// Part of speech (e.g. "adjective").
    pub part_of_speech: String,
    /// Example sentence.
    pub example: String,
    /// Words with a similar meaning.
    #[serde(default)]
    pub synonyms: Vec<String>,
    /// Words with the opposite meaning.
    #[serde(default)]
    pub antonyms: Vec<String>,
    /// Difficulty.
    pub level: Level,
    /// Subject area.
    pub category: Category,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCatalog {
    #[serde(default)]
    version: u32,
    #[serde(default)]
    words: Vec<VocabularyWord>,
    #[serde(default)]
    synonym_map: BTreeMap<String, Vec<String>>,
}

/// Read-only vocabulary catalog.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    version: u32,
    words: Vec<VocabularyWord>,
    synonym_map: BTreeMap<String, Vec<String>>,
}

impl Vocabulary {
    /// The embedded catalog.
    pub fn builtin() -> Self {
        BUILTIN.clone()
    }

    /// Parse a catalog from JSON text.
    pub fn from_json_str(json: &str) -> DataResult<Self> {
        let raw: RawCatalog = serde_json::from_str(json).map_err(|source| DataError::Parse {
            what: "vocabulary catalog",
            source,
        })?;
        let synonym_map = raw
            .synonym_map
            .into_iter()
            .map(|(k, v)| (k.trim().to_lowercase(), v))
            .collect();
        Ok(Self {
            version: raw.version,
            words: raw.words,
            synonym_map,
        })
    }

    /// Load from `path`, or the built-in catalog when `path` is `None`.
    ///
    /// Any read or parse failure is logged and yields an empty catalog.
    #[tracing::instrument]
    pub fn load_or_empty(path: Option<&Utf8Path>) -> Self {
        let Some(path) = path else {
            return Self::builtin();
        };
        let loaded = std::fs::read_to_string(path)
            .map_err(|source| DataError::Read {
                path: path.to_path_buf(),
                source,
            })
            .and_then(|json| Self::from_json_str(&json));
        match loaded {
            Ok(vocabulary) => {
                tracing::debug!(words = vocabulary.len(), "vocabulary loaded");
                vocabulary
            }
            Err(err) => {
                tracing::warn!(error = %err, "vocabulary unavailable; catalog is empty");
                Self::default()
            }
        }
    }

    /// Data format version declared by the catalog.
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Number of study words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the catalog has no study words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Every study word, in catalog order.
    pub fn all(&self) -> &[VocabularyWord] {
        &self.words
    }

    /// The word with this id.
    pub fn by_id(&self, id: &str) -> Option<&VocabularyWord> {
        self.words.iter().find(|w| w.id == id)
    }

    /// Words at `level`.
    pub fn by_level(&self, level: Level) -> Vec<&VocabularyWord> {
        self.words.iter().filter(|w| w.level == level).collect()
    }

    /// Words in `category`.
    pub fn by_category(&self, category: Category) -> Vec<&VocabularyWord> {
        self.words.iter().filter(|w| w.category == category).collect()
    }

    /// Case-insensitive substring search over headword, definition, and synonyms.
    pub fn search(&self, query: &str) -> Vec<&VocabularyWord> {
        let query = query.to_lowercase();
        self.words
            .iter()
            .filter(|w| {
                w.word.to_lowercase().contains(&query)
                    || w.definition.to_lowercase().contains(&query)
                    || w.synonyms.iter().any(|s| s.to_lowercase().contains(&query))
            })
            .collect()
    }

    /// The headword matching `word` exactly, ignoring case.
    pub fn find_exact(&self, word: &str) -> Option<&VocabularyWord> {
        let word = word.trim();
        self.words.iter().find(|w| w.word.eq_ignore_ascii_case(word))
    }

    /// The featured word for `date`: day of year modulo catalog size.
    pub fn word_of_the_day(&self, date: NaiveDate) -> Option<&VocabularyWord> {
        if self.words.is_empty() {
            return None;
        }
        self.words.get(date.ordinal() as usize % self.words.len())
    }

    /// Up to `count` distinct words in random order, skipping `exclude` ids.
    pub fn random_words<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        count: usize,
        exclude: &[&str],
    ) -> Vec<&VocabularyWord> {
        let mut pool: Vec<&VocabularyWord> = self
            .words
            .iter()
            .filter(|w| !exclude.contains(&w.id.as_str()))
            .collect();
        pool.shuffle(rng);
        pool.truncate(count);
        pool
    }

    /// Replacements for a common everyday word.
    pub fn synonyms_for_common_word(&self, word: &str) -> &[String] {
        self.synonym_map
            .get(&word.trim().to_lowercase())
            .map_or(&[], Vec::as_slice)
    }

    /// Synonyms for `word`: the common-word map first, then the study word's own list.
    pub fn synonyms_for(&self, word: &str) -> &[String] {
        let common = self.synonyms_for_common_word(word);
        if !common.is_empty() {
            return common;
        }
        self.find_exact(word).map_or(&[], |w| w.synonyms.as_slice())
    }

    /// Common words that have entries in the synonym map, alphabetically.
    pub fn common_words(&self) -> impl Iterator<Item = &str> {
        self.synonym_map.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn builtin_catalog_loads() {
        let vocab = Vocabulary::builtin();
        assert_eq!(vocab.version(), 1);
        assert_eq!(vocab.len(), 24);
        assert_eq!(vocab.by_id("1").unwrap().word, "Ubiquitous");
        assert!(vocab.by_id("999").is_none());
    }

    #[test]
    fn definitions_are_unique() {
        let vocab = Vocabulary::builtin();
        let mut defs: Vec<&str> = vocab.all().iter().map(|w| w.definition.as_str()).collect();
        defs.sort_unstable();
        defs.dedup();
        assert_eq!(defs.len(), vocab.len());
    }

    #[test]
    fn filters_by_level_and_category() {
        let vocab = Vocabulary::builtin();
        assert!(vocab.by_level(Level::Expert).iter().all(|w| w.level == Level::Expert));
        let technical = vocab.by_category(Category::Technical);
        assert!(technical.iter().any(|w| w.word == "Idempotent"));
        assert!(technical.iter().all(|w| w.category == Category::Technical));
    }

    #[test]
    fn search_covers_word_definition_and_synonyms() {
        let vocab = Vocabulary::builtin();
        assert!(vocab.search("UBIQ").iter().any(|w| w.id == "1"));
        assert!(vocab.search("everywhere").iter().any(|w| w.id == "1"));
        assert!(vocab.search("omnipresent").iter().any(|w| w.id == "1"));
        assert!(vocab.search("zzzzzz").is_empty());
    }

    #[test]
    fn find_exact_ignores_case() {
        let vocab = Vocabulary::builtin();
        assert_eq!(vocab.find_exact("candid").unwrap().id, "6");
        assert!(vocab.find_exact("cand").is_none());
    }

    #[test]
    fn word_of_the_day_uses_day_of_year() {
        let vocab = Vocabulary::builtin();
        let jan_1 = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        // Day 1 of the year maps to index 1.
        assert_eq!(vocab.word_of_the_day(jan_1).unwrap().id, "2");
        let jan_24 = NaiveDate::from_ymd_opt(2025, 1, 24).unwrap();
        assert_eq!(vocab.word_of_the_day(jan_24).unwrap().id, "1");
        assert!(Vocabulary::default().word_of_the_day(jan_1).is_none());
    }

    #[test]
    fn random_words_are_distinct_and_respect_exclusions() {
        let vocab = Vocabulary::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = vocab.random_words(&mut rng, 5, &["1", "2"]);
        assert_eq!(picked.len(), 5);
        assert!(picked.iter().all(|w| w.id != "1" && w.id != "2"));
        let mut ids: Vec<&str> = picked.iter().map(|w| w.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 5);

        let all = vocab.random_words(&mut rng, 100, &[]);
        assert_eq!(all.len(), vocab.len());
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let vocab = Vocabulary::builtin();
        let a: Vec<String> = vocab
            .random_words(&mut StdRng::seed_from_u64(42), 4, &[])
            .into_iter()
            .map(|w| w.id.clone())
            .collect();
        let b: Vec<String> = vocab
            .random_words(&mut StdRng::seed_from_u64(42), 4, &[])
            .into_iter()
            .map(|w| w.id.clone())
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn synonym_lookup_prefers_common_map() {
        let vocab = Vocabulary::builtin();
        assert_eq!(vocab.synonyms_for("Good")[0], "excellent");
        assert_eq!(vocab.synonyms_for("candid")[0], vocab.find_exact("candid").unwrap().synonyms[0]);
        assert!(vocab.synonyms_for("xylophone").is_empty());
    }

    #[test]
    fn broken_file_degrades_to_empty() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("vocab.json");
        std::fs::write(&path, "{ nope").unwrap();
        let path = camino::Utf8PathBuf::try_from(path).unwrap();
        assert!(Vocabulary::load_or_empty(Some(&path)).is_empty());
    }
}
