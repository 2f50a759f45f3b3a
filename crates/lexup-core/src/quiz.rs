//! Multiple-choice definition quizzes.
//!
//! Each question shows a vocabulary word and asks for its definition among
//! shuffled options: the true definition plus up to three definitions of
//! other words. Answers feed the spaced-repetition schedule.

use chrono::{DateTime, Utc};
use rand::Rng;
use rand::seq::SliceRandom;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::progress::{QuizResult, UserProgress};
use crate::vocabulary::{Vocabulary, VocabularyWord};

/// Questions per quiz unless configured otherwise.
pub const DEFAULT_QUIZ_LENGTH: usize = 10;

/// Wrong options offered per question.
pub const DISTRACTORS: usize = 3;

/// One quiz question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// The word being tested.
    pub word: VocabularyWord,
    /// Candidate definitions, shuffled.
    pub options: Vec<String>,
    /// The word's definition.
    pub correct_answer: String,
}

impl QuizQuestion {
    /// Whether `choice` is the correct definition.
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }
}

/// Build a quiz of up to `length` questions.
///
/// Catalogs smaller than `length` give a shorter quiz, and questions get as
/// many distractors as other words exist (at most [`DISTRACTORS`]).
#[tracing::instrument(skip(vocabulary, rng))]
pub fn generate_quiz<R: Rng + ?Sized>(
    vocabulary: &Vocabulary,
    rng: &mut R,
    length: usize,
) -> Vec<QuizQuestion> {
    let questions: Vec<QuizQuestion> = vocabulary
        .random_words(rng, length, &[])
        .into_iter()
        .map(|word| {
            let mut options: Vec<String> = vocabulary
                .random_words(rng, DISTRACTORS, &[word.id.as_str()])
                .into_iter()
                .map(|other| other.definition.clone())
                .collect();
            options.push(word.definition.clone());
            options.shuffle(rng);
            QuizQuestion {
                word: word.clone(),
                options,
                correct_answer: word.definition.clone(),
            }
        })
        .collect();
    tracing::debug!(questions = questions.len(), "quiz generated");
    questions
}

/// Closing message band for a finished quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Verdict {
    /// 90% or better.
    Outstanding,
    /// 70% or better.
    Great,
    /// 50% or better.
    Good,
    /// Below 50%.
    KeepLearning,
}

impl Verdict {
    /// Band for a percentage score.
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 90.0 {
            Self::Outstanding
        } else if percentage >= 70.0 {
            Self::Great
        } else if percentage >= 50.0 {
            Self::Good
        } else {
            Self::KeepLearning
        }
    }

    /// Encouraging message for the band.
    pub const fn message(&self) -> &'static str {
        match self {
            Self::Outstanding => "Outstanding! You're a vocabulary master!",
            Self::Great => "Great job! Keep up the excellent work!",
            Self::Good => "Good effort! Practice makes perfect!",
            Self::KeepLearning => "Keep learning! You'll improve with practice!",
        }
    }
}

/// Feedback for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnswerFeedback {
    /// Whether the choice was right.
    pub correct: bool,
    /// The right definition.
    pub correct_answer: String,
}

/// Final tally of a completed quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuizSummary {
    /// The result recorded in progress.
    pub result: QuizResult,
    /// Score as a percentage.
    pub percentage: f64,
    /// Message band.
    pub verdict: Verdict,
}

/// A quiz in progress.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    answers: Vec<bool>,
}

impl QuizSession {
    /// Start a session over pre-built questions.
    pub const fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            questions,
            answers: Vec::new(),
        }
    }

    /// Every question in the quiz.
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// The next unanswered question.
    pub fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.answers.len())
    }

    /// Questions answered so far.
    pub fn answered(&self) -> usize {
        self.answers.len()
    }

    /// Correct answers so far.
    pub fn score(&self) -> usize {
        self.answers.iter().filter(|&&a| a).count()
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// Answer the current question and update the word's schedule.
    ///
    /// Returns `None` once the quiz is complete.
    pub fn answer(
        &mut self,
        progress: &mut UserProgress,
        choice: &str,
        now: DateTime<Utc>,
    ) -> Option<AnswerFeedback> {
        let question = self.questions.get(self.answers.len())?;
        let correct = question.is_correct(choice);
        progress.review(&question.word.id, correct, now);
        let feedback = AnswerFeedback {
            correct,
            correct_answer: question.correct_answer.clone(),
        };
        self.answers.push(correct);
        Some(feedback)
    }

    /// Record the result in `progress` and summarize.
    pub fn finish(self, progress: &mut UserProgress, now: DateTime<Utc>) -> QuizSummary {
        let score = u32::try_from(self.score()).unwrap_or(u32::MAX);
        let total_questions = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        let result = QuizResult {
            date: now,
            score,
            total_questions,
            words_tested: self.questions.into_iter().map(|q| q.word.id).collect(),
        };
        let percentage = result.ratio() * 100.0;
        progress.record_quiz(result.clone());
        tracing::info!(score, total_questions, "quiz finished");
        QuizSummary {
            result,
            percentage,
            verdict: Verdict::for_percentage(percentage),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn each_question_has_exactly_one_true_definition() {
        let vocab = Vocabulary::builtin();
        let quiz = generate_quiz(&vocab, &mut StdRng::seed_from_u64(1), DEFAULT_QUIZ_LENGTH);
        assert_eq!(quiz.len(), DEFAULT_QUIZ_LENGTH);
        for q in &quiz {
            assert_eq!(q.options.len(), DISTRACTORS + 1);
            assert_eq!(q.options.iter().filter(|o| **o == q.word.definition).count(), 1);
            assert_eq!(q.correct_answer, q.word.definition);

            let mut distinct = q.options.clone();
            distinct.sort();
            distinct.dedup();
            assert_eq!(distinct.len(), DISTRACTORS + 1);
            for option in &q.options {
                assert!(vocab.all().iter().any(|w| &w.definition == option));
            }
        }
    }

    #[test]
    fn question_words_are_distinct() {
        let quiz = generate_quiz(&Vocabulary::builtin(), &mut StdRng::seed_from_u64(9), 10);
        let mut ids: Vec<&str> = quiz.iter().map(|q| q.word.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn small_catalog_gives_short_quiz() {
        let json = serde_json::json!({
            "words": [
                { "id": "a", "word": "Alpha", "definition": "first", "partOfSpeech": "noun",
                  "example": "", "level": "beginner", "category": "general" },
                { "id": "b", "word": "Beta", "definition": "second", "partOfSpeech": "noun",
                  "example": "", "level": "beginner", "category": "general" }
            ]
        })
        .to_string();
        let vocab = Vocabulary::from_json_str(&json).unwrap();
        let quiz = generate_quiz(&vocab, &mut StdRng::seed_from_u64(3), 10);
        assert_eq!(quiz.len(), 2);
        assert!(quiz.iter().all(|q| q.options.len() == 2));
        assert!(generate_quiz(&Vocabulary::default(), &mut StdRng::seed_from_u64(3), 10).is_empty());
    }

    #[test]
    fn seeded_quiz_is_reproducible() {
        let vocab = Vocabulary::builtin();
        let a = generate_quiz(&vocab, &mut StdRng::seed_from_u64(5), 10);
        let b = generate_quiz(&vocab, &mut StdRng::seed_from_u64(5), 10);
        assert_eq!(a, b);
    }

    #[test]
    fn session_scores_and_records() {
        let vocab = Vocabulary::builtin();
        let questions = generate_quiz(&vocab, &mut StdRng::seed_from_u64(2), 4);
        let mut session = QuizSession::new(questions);
        let mut progress = UserProgress::default();

        let mut i = 0;
        while let Some(q) = session.current() {
            let choice = if i % 2 == 0 {
                q.correct_answer.clone()
            } else {
                "definitely wrong".to_string()
            };
            let feedback = session.answer(&mut progress, &choice, now()).unwrap();
            assert_eq!(feedback.correct, i % 2 == 0);
            i += 1;
        }
        assert!(session.is_complete());
        assert!(session.answer(&mut progress, "x", now()).is_none());
        assert_eq!(session.score(), 2);

        let summary = session.finish(&mut progress, now());
        assert_eq!(summary.result.score, 2);
        assert_eq!(summary.result.total_questions, 4);
        assert_eq!(summary.result.words_tested.len(), 4);
        assert!((summary.percentage - 50.0).abs() < 1e-9);
        assert_eq!(summary.verdict, Verdict::Good);
        assert_eq!(progress.quiz_history.len(), 1);
        assert_eq!(progress.words.len(), 4);
    }

    #[test]
    fn verdict_thresholds() {
        assert_eq!(Verdict::for_percentage(100.0), Verdict::Outstanding);
        assert_eq!(Verdict::for_percentage(90.0), Verdict::Outstanding);
        assert_eq!(Verdict::for_percentage(89.9), Verdict::Great);
        assert_eq!(Verdict::for_percentage(70.0), Verdict::Great);
        assert_eq!(Verdict::for_percentage(50.0), Verdict::Good);
        assert_eq!(Verdict::for_percentage(49.0), Verdict::KeepLearning);
        assert!(Verdict::KeepLearning.message().starts_with("Keep learning"));
    }
}
