//! Quiz command: multiple-choice definitions read from stdin.

use std::io::{BufRead, Write};

use anyhow::{Context, bail};
use clap::Args;
use lexup_core::progress::UserProgress;
use lexup_core::quiz::{QuizQuestion, QuizSession, generate_quiz};
use lexup_core::store::Namespace;
use lexup_core::{Config, Session};
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use super::open_store;

/// Arguments for the `quiz` subcommand.
#[derive(Args, Debug)]
pub struct QuizArgs {
    /// Number of questions (defaults to the configured quiz length).
    #[arg(short = 'n', long)]
    pub length: Option<usize>,

    /// Seed for a repeatable quiz.
    #[arg(long)]
    pub seed: Option<u64>,
}

/// Run a quiz, reading one answer per line (option number or text).
///
/// Stops early at end of input; unanswered questions count as wrong.
#[instrument(name = "cmd_quiz", skip_all)]
pub fn cmd_quiz(
    args: QuizArgs,
    global_json: bool,
    session: &Session,
    config: &Config,
) -> anyhow::Result<()> {
    let length = args.length.unwrap_or(config.quiz_length);
    if length == 0 {
        bail!("quiz length must be at least 1");
    }
    let mut rng = args
        .seed
        .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
    let questions = generate_quiz(session.vocabulary(), &mut rng, length);
    if questions.is_empty() {
        bail!("the vocabulary catalog is empty");
    }

    let store = open_store(config)?;
    let mut progress: UserProgress = store.load(Namespace::Progress);
    let mut quiz = QuizSession::new(questions);
    let total = quiz.questions().len();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    let mut stdout = std::io::stdout().lock();

    while let Some(question) = quiz.current().cloned() {
        let number = quiz.answered() + 1;
        if !global_json {
            print_question(&mut stdout, &question, number, total)?;
        }
        let Some(line) = lines.next().transpose().context("failed to read answer")? else {
            debug!("input ended before the quiz was complete");
            break;
        };
        let choice = resolve_choice(&question, line.trim());
        let now = chrono::Utc::now();
        let Some(feedback) = quiz.answer(&mut progress, &choice, now) else {
            break;
        };
        if !global_json {
            if feedback.correct {
                writeln!(stdout, "{}\n", "Correct!".green())?;
            } else {
                writeln!(
                    stdout,
                    "{} {}\n",
                    "Incorrect. The answer was:".red(),
                    feedback.correct_answer
                )?;
            }
        }
    }

    let summary = quiz.finish(&mut progress, chrono::Utc::now());
    store
        .save(Namespace::Progress, &progress)
        .context("failed to save progress")?;

    if global_json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&summary)?)?;
    } else {
        writeln!(
            stdout,
            "{} {}/{} ({:.0}%)",
            "Score:".bold(),
            summary.result.score,
            summary.result.total_questions,
            summary.percentage
        )?;
        writeln!(stdout, "{}", summary.verdict.message())?;
    }
    Ok(())
}

fn print_question(
    out: &mut impl Write,
    question: &QuizQuestion,
    number: usize,
    total: usize,
) -> anyhow::Result<()> {
    writeln!(
        out,
        "{} {}",
        format!("[{number}/{total}]").dimmed(),
        question.word.word.bold()
    )?;
    for (i, option) in question.options.iter().enumerate() {
        writeln!(out, "  {}. {option}", i + 1)?;
    }
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

/// Map a 1-based option number to its text; anything else is taken literally.
fn resolve_choice(question: &QuizQuestion, answer: &str) -> String {
    answer
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| question.options.get(i))
        .cloned()
        .unwrap_or_else(|| answer.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> QuizQuestion {
        let vocab = lexup_core::Vocabulary::builtin();
        generate_quiz(&vocab, &mut StdRng::seed_from_u64(3), 1).remove(0)
    }

    #[test]
    fn numeric_answers_select_options() {
        let q = question();
        assert_eq!(resolve_choice(&q, "1"), q.options[0]);
        assert_eq!(resolve_choice(&q, "4"), q.options[3]);
    }

    #[test]
    fn out_of_range_or_text_answers_are_literal() {
        let q = question();
        assert_eq!(resolve_choice(&q, "0"), "0");
        assert_eq!(resolve_choice(&q, "9"), "9");
        assert_eq!(resolve_choice(&q, &q.correct_answer), q.correct_answer);
    }
}
