//! Spaced-repetition progress tracking.
//!
//! Each reviewed word carries a confidence in `0..=5`. Knowing a word raises
//! it by one, missing it lowers it by one, and the confidence picks the
//! interval until the next review. The caller supplies the current time so
//! schedules are deterministic under test. Calendar days are UTC days.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Highest confidence a word can reach.
pub const MAX_CONFIDENCE: u8 = 5;

/// Confidence at which a word counts as learned.
pub const LEARNED_CONFIDENCE: u8 = 3;

/// Confidence at which a word counts as mastered.
pub const MASTERED_CONFIDENCE: u8 = 4;

/// Quiz results kept in history.
pub const QUIZ_HISTORY_LIMIT: usize = 50;

/// Recent quizzes averaged into [`ProgressStats::avg_quiz_score`].
pub const RECENT_QUIZ_WINDOW: usize = 10;

/// Days until the next review for a given confidence.
pub const fn review_interval_days(confidence: u8) -> i64 {
    match confidence {
        0 | 1 => 1,
        2 => 2,
        3 => 4,
        4 => 7,
        _ => 14,
    }
}

/// Review state of a single word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WordProgress {
    /// Vocabulary word id.
    pub word_id: String,
    /// Current confidence, `0..=5`. Stored values above the maximum load clamped.
    #[serde(deserialize_with = "clamped_confidence")]
    #[schemars(with = "u8")]
    pub confidence: u8,
    /// How many times the word has been reviewed.
    pub times_reviewed: u32,
    /// When the word was last reviewed.
    pub last_reviewed: Option<DateTime<Utc>>,
    /// When the word is next due.
    pub next_review_date: Option<DateTime<Utc>>,
}

fn clamped_confidence<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = u64::deserialize(deserializer)?;
    Ok(u8::try_from(raw).map_or(MAX_CONFIDENCE, |c| c.min(MAX_CONFIDENCE)))
}

/// Outcome of one completed quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    /// When the quiz was finished.
    pub date: DateTime<Utc>,
    /// Correct answers.
    pub score: u32,
    /// Questions asked.
    pub total_questions: u32,
    /// Ids of the words that were tested.
    pub words_tested: Vec<String>,
}

impl QuizResult {
    /// Score as a fraction in `0.0..=1.0` (zero for an empty quiz).
    pub fn ratio(&self) -> f64 {
        if self.total_questions == 0 {
            0.0
        } else {
            f64::from(self.score) / f64::from(self.total_questions)
        }
    }
}

/// A learner's full study state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProgress {
    /// Per-word review state, keyed by word id.
    pub words: BTreeMap<String, WordProgress>,
    /// Most recent quiz results, oldest first.
    pub quiz_history: Vec<QuizResult>,
    /// Words at or above [`LEARNED_CONFIDENCE`].
    pub total_words_learned: usize,
    /// Consecutive study days ending on the last study date.
    pub current_streak: u32,
    /// When the learner last reviewed a word.
    pub last_study_date: Option<DateTime<Utc>>,
}

/// Summary figures derived from [`UserProgress`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressStats {
    /// Words reviewed at least once.
    pub total_reviewed: usize,
    /// Words at confidence 4 or 5.
    pub mastered: usize,
    /// Words at confidence 1 to 3.
    pub learning: usize,
    /// Words at confidence 0.
    pub needs_work: usize,
    /// Mean confidence over reviewed words.
    pub avg_confidence: f64,
    /// Mean score of the last ten quizzes, as a percentage.
    pub avg_quiz_score: f64,
    /// Current study streak in days.
    pub current_streak: u32,
    /// Quiz results on record.
    pub total_quizzes_taken: usize,
    /// When the learner last studied.
    pub last_study_date: Option<DateTime<Utc>>,
}

impl UserProgress {
    /// Review state for `word_id`, if it has been reviewed.
    pub fn word(&self, word_id: &str) -> Option<&WordProgress> {
        self.words.get(word_id)
    }

    /// Record a review of `word_id` at `now`.
    ///
    /// Updates the word's confidence and schedule, the study streak, and the
    /// learned-word count.
    #[tracing::instrument(skip(self))]
    pub fn review(&mut self, word_id: &str, knew: bool, now: DateTime<Utc>) -> &WordProgress {
        let existing = self.words.get(word_id);
        let confidence = match (existing, knew) {
            (Some(p), true) => p.confidence.saturating_add(1).min(MAX_CONFIDENCE),
            (Some(p), false) => p.confidence.saturating_sub(1),
            (None, true) => 1,
            (None, false) => 0,
        };
        let times_reviewed = existing.map_or(0, |p| p.times_reviewed) + 1;

        self.words.insert(
            word_id.to_string(),
            WordProgress {
                word_id: word_id.to_string(),
                confidence,
                times_reviewed,
                last_reviewed: Some(now),
                next_review_date: Some(now + Duration::days(review_interval_days(confidence))),
            },
        );

        self.touch_streak(now);
        self.total_words_learned = self
            .words
            .values()
            .filter(|p| p.confidence >= LEARNED_CONFIDENCE)
            .count();
        tracing::debug!(confidence, times_reviewed, streak = self.current_streak, "word reviewed");

        &self.words[word_id]
    }

    fn touch_streak(&mut self, now: DateTime<Utc>) {
        let today = now.date_naive();
        let last = self.last_study_date.map(|d| d.date_naive());
        if last == Some(today) {
            return;
        }
        if last.is_some() && last == today.pred_opt() {
            self.current_streak += 1;
        } else {
            self.current_streak = 1;
        }
        self.last_study_date = Some(now);
    }

    /// Append a quiz result, keeping the most recent [`QUIZ_HISTORY_LIMIT`].
    pub fn record_quiz(&mut self, result: QuizResult) {
        self.quiz_history.push(result);
        if self.quiz_history.len() > QUIZ_HISTORY_LIMIT {
            let excess = self.quiz_history.len() - QUIZ_HISTORY_LIMIT;
            self.quiz_history.drain(..excess);
        }
    }

    /// Ids of words due for review at `now` (or never scheduled).
    pub fn words_to_review(&self, now: DateTime<Utc>) -> Vec<&str> {
        self.words
            .values()
            .filter(|p| p.next_review_date.is_none_or(|due| due <= now))
            .map(|p| p.word_id.as_str())
            .collect()
    }

    /// Derived summary statistics.
    pub fn stats(&self) -> ProgressStats {
        let total_reviewed = self.words.len();
        let count = |pred: fn(u8) -> bool| self.words.values().filter(|p| pred(p.confidence)).count();

        let avg_confidence = if total_reviewed == 0 {
            0.0
        } else {
            let sum: u32 = self.words.values().map(|p| u32::from(p.confidence)).sum();
            f64::from(sum) / total_reviewed as f64
        };

        let recent = &self.quiz_history[self.quiz_history.len().saturating_sub(RECENT_QUIZ_WINDOW)..];
        let avg_quiz_score = if recent.is_empty() {
            0.0
        } else {
            recent.iter().map(QuizResult::ratio).sum::<f64>() / recent.len() as f64 * 100.0
        };

        ProgressStats {
            total_reviewed,
            mastered: count(|c| c >= MASTERED_CONFIDENCE),
            learning: count(|c| (1..MASTERED_CONFIDENCE).contains(&c)),
            needs_work: count(|c| c < 1),
            avg_confidence,
            avg_quiz_score,
            current_streak: self.current_streak,
            total_quizzes_taken: self.quiz_history.len(),
            last_study_date: self.last_study_date,
        }
    }

    /// Forget everything.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, day, hour, 0, 0).unwrap()
    }

    fn quiz(score: u32, total: u32) -> QuizResult {
        QuizResult {
            date: at(1, 12),
            score,
            total_questions: total,
            words_tested: Vec::new(),
        }
    }

    #[test]
    fn first_review_sets_initial_confidence() {
        let mut progress = UserProgress::default();
        assert_eq!(progress.review("1", true, at(1, 9)).confidence, 1);
        assert_eq!(progress.review("2", false, at(1, 9)).confidence, 0);
        assert_eq!(progress.word("1").unwrap().times_reviewed, 1);
    }

    #[test]
    fn confidence_is_clamped() {
        let mut progress = UserProgress::default();
        for _ in 0..10 {
            progress.review("1", true, at(1, 9));
        }
        assert_eq!(progress.word("1").unwrap().confidence, MAX_CONFIDENCE);
        assert_eq!(progress.word("1").unwrap().times_reviewed, 10);
        for _ in 0..10 {
            progress.review("1", false, at(1, 9));
        }
        assert_eq!(progress.word("1").unwrap().confidence, 0);
    }

    #[test]
    fn intervals_follow_confidence() {
        let now = at(1, 9);
        let mut progress = UserProgress::default();
        let p = progress.review("1", false, now);
        assert_eq!(p.next_review_date, Some(now + Duration::days(1)));

        for _ in 0..5 {
            progress.review("2", true, now);
        }
        let p = progress.word("2").unwrap();
        assert_eq!(p.confidence, 5);
        assert_eq!(p.next_review_date, Some(now + Duration::days(14)));

        let days: Vec<i64> = (0..=5).map(review_interval_days).collect();
        assert_eq!(days, [1, 1, 2, 4, 7, 14]);
    }

    #[test]
    fn streak_counts_consecutive_days() {
        let mut progress = UserProgress::default();
        progress.review("1", true, at(1, 9));
        assert_eq!(progress.current_streak, 1);
        progress.review("2", true, at(1, 22));
        assert_eq!(progress.current_streak, 1);
        assert_eq!(progress.last_study_date, Some(at(1, 9)));
        progress.review("1", true, at(2, 8));
        assert_eq!(progress.current_streak, 2);
        progress.review("1", true, at(5, 8));
        assert_eq!(progress.current_streak, 1);
        assert_eq!(progress.last_study_date, Some(at(5, 8)));
    }

    #[test]
    fn learned_count_tracks_confidence_three() {
        let mut progress = UserProgress::default();
        for _ in 0..3 {
            progress.review("1", true, at(1, 9));
        }
        progress.review("2", true, at(1, 9));
        assert_eq!(progress.total_words_learned, 1);
        progress.review("1", false, at(1, 9));
        assert_eq!(progress.total_words_learned, 0);
    }

    #[test]
    fn due_words() {
        let now = at(1, 9);
        let mut progress = UserProgress::default();
        progress.review("1", false, now);
        progress.words.insert(
            "9".to_string(),
            WordProgress {
                word_id: "9".to_string(),
                confidence: 0,
                times_reviewed: 0,
                last_reviewed: None,
                next_review_date: None,
            },
        );
        assert_eq!(progress.words_to_review(now), ["9"]);
        assert_eq!(progress.words_to_review(at(2, 9)), ["1", "9"]);
    }

    #[test]
    fn quiz_history_is_bounded() {
        let mut progress = UserProgress::default();
        for i in 0..60 {
            progress.record_quiz(quiz(i, 100));
        }
        assert_eq!(progress.quiz_history.len(), QUIZ_HISTORY_LIMIT);
        assert_eq!(progress.quiz_history[0].score, 10);
        assert_eq!(progress.quiz_history.last().unwrap().score, 59);
    }

    #[test]
    fn stats_bucket_words_and_average_recent_quizzes() {
        let mut progress = UserProgress::default();
        for _ in 0..4 {
            progress.review("a", true, at(1, 9));
        }
        progress.review("b", true, at(1, 9));
        progress.review("c", false, at(1, 9));
        for _ in 0..5 {
            progress.record_quiz(quiz(0, 10));
        }
        for _ in 0..10 {
            progress.record_quiz(quiz(8, 10));
        }

        let stats = progress.stats();
        assert_eq!(stats.total_reviewed, 3);
        assert_eq!(stats.mastered, 1);
        assert_eq!(stats.learning, 1);
        assert_eq!(stats.needs_work, 1);
        assert!((stats.avg_confidence - 5.0 / 3.0).abs() < 1e-9);
        assert!((stats.avg_quiz_score - 80.0).abs() < 1e-9);
        assert_eq!(stats.total_quizzes_taken, 15);
        assert_eq!(stats.current_streak, 1);
    }

    #[test]
    fn empty_stats_are_zero() {
        let stats = UserProgress::default().stats();
        assert_eq!(stats.total_reviewed, 0);
        assert!(stats.avg_confidence.abs() < f64::EPSILON);
        assert!(stats.avg_quiz_score.abs() < f64::EPSILON);
        assert!(stats.last_study_date.is_none());
    }

    #[test]
    fn reset_clears_everything() {
        let mut progress = UserProgress::default();
        progress.review("1", true, at(1, 9));
        progress.record_quiz(quiz(1, 1));
        progress.reset();
        assert_eq!(progress, UserProgress::default());
    }

    fn stored_word(confidence: u64) -> String {
        format!(
            r#"{{"words":{{"w1":{{"wordId":"w1","confidence":{confidence},"timesReviewed":3,"lastReviewed":null,"nextReviewDate":null}}}}}}"#
        )
    }

    #[test]
    fn stored_confidence_above_max_is_clamped() {
        for raw in [6, 9, 255, 70_000] {
            let progress: UserProgress = serde_json::from_str(&stored_word(raw)).unwrap();
            assert_eq!(progress.word("w1").unwrap().confidence, MAX_CONFIDENCE);
        }

        let mut progress: UserProgress = serde_json::from_str(&stored_word(255)).unwrap();
        assert!((progress.stats().avg_confidence - 5.0).abs() < f64::EPSILON);
        let p = progress.review("w1", true, at(1, 9));
        assert_eq!(p.confidence, MAX_CONFIDENCE);
        assert_eq!(p.times_reviewed, 4);
        assert_eq!(p.next_review_date, Some(at(1, 9) + Duration::days(14)));
    }

    #[test]
    fn clamped_confidence_survives_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let store = crate::store::Store::new(
            camino::Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap(),
        );
        std::fs::write(
            store.path(crate::store::Namespace::Progress),
            stored_word(200),
        )
        .unwrap();
        let mut progress: UserProgress = store.load(crate::store::Namespace::Progress);
        assert_eq!(progress.word("w1").unwrap().confidence, MAX_CONFIDENCE);
        assert_eq!(progress.review("w1", false, at(1, 9)).confidence, 4);
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let mut progress = UserProgress::default();
        progress.review("1", true, at(1, 9));
        let json = serde_json::to_value(&progress).unwrap();
        assert_eq!(json["words"]["1"]["wordId"], "1");
        assert_eq!(json["currentStreak"], 1);
        let back: UserProgress = serde_json::from_value(json).unwrap();
        assert_eq!(back, progress);
    }
}
