//! Words command: browse the vocabulary catalog.

use anyhow::bail;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use lexup_core::vocabulary::{Category, Level, VocabularyWord};
use lexup_core::Session;
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

/// Arguments for the `words` subcommand.
#[derive(Args, Debug)]
pub struct WordsArgs {
    #[command(subcommand)]
    pub command: WordsCommand,
}

/// Catalog views.
#[derive(Subcommand, Debug)]
pub enum WordsCommand {
    /// List catalog words, optionally filtered
    List {
        /// Only words at this level.
        #[arg(long, value_enum)]
        level: Option<Level>,
        /// Only words in this category.
        #[arg(long, value_enum)]
        category: Option<Category>,
    },
    /// Show one word by id or headword
    Show {
        /// Word id or headword.
        word: String,
    },
    /// Search headwords and definitions
    Search {
        /// Text to look for.
        query: String,
    },
    /// Show the word of the day
    Today {
        /// Date to use instead of today (YYYY-MM-DD).
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Pick random words
    Random {
        /// How many words.
        #[arg(short = 'n', long, default_value_t = 5)]
        count: usize,
        /// Seed for a repeatable pick.
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Run a catalog view.
#[instrument(name = "cmd_words", skip_all)]
pub fn cmd_words(args: WordsArgs, global_json: bool, session: &Session) -> anyhow::Result<()> {
    let vocabulary = session.vocabulary();
    match args.command {
        WordsCommand::List { level, category } => {
            let words: Vec<&VocabularyWord> = vocabulary
                .all()
                .iter()
                .filter(|w| level.is_none_or(|l| w.level == l))
                .filter(|w| category.is_none_or(|c| w.category == c))
                .collect();
            debug!(count = words.len(), "listing words");
            print_list(&words, global_json)
        }
        WordsCommand::Show { word } => {
            let Some(entry) = vocabulary
                .by_id(&word)
                .or_else(|| vocabulary.find_exact(&word))
            else {
                bail!("no vocabulary word matches \"{word}\"");
            };
            print_word(entry, global_json)
        }
        WordsCommand::Search { query } => print_list(&vocabulary.search(&query), global_json),
        WordsCommand::Today { date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            let Some(entry) = vocabulary.word_of_the_day(date) else {
                bail!("the vocabulary catalog is empty");
            };
            print_word(entry, global_json)
        }
        WordsCommand::Random { count, seed } => {
            let mut rng = seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
            print_list(&vocabulary.random_words(&mut rng, count, &[]), global_json)
        }
    }
}

fn print_list(words: &[&VocabularyWord], global_json: bool) -> anyhow::Result<()> {
    if global_json {
        println!("{}", serde_json::to_string_pretty(words)?);
        return Ok(());
    }
    if words.is_empty() {
        println!("No matching words.");
    }
    for word in words {
        println!(
            "{:>4}  {:<14} {}",
            word.id.dimmed(),
            word.word.bold(),
            word.definition
        );
    }
    Ok(())
}

fn print_word(word: &VocabularyWord, global_json: bool) -> anyhow::Result<()> {
    if global_json {
        println!("{}", serde_json::to_string_pretty(word)?);
        return Ok(());
    }
    println!(
        "{} {}",
        word.word.bold(),
        format!("({}, {}, {})", word.part_of_speech, word.level, word.category).dimmed()
    );
    println!("{}", word.definition);
    println!("{} {}", "Example:".dimmed(), word.example.italic());
    if !word.synonyms.is_empty() {
        println!("{} {}", "Synonyms:".dimmed(), word.synonyms.join(", "));
    }
    if !word.antonyms.is_empty() {
        println!("{} {}", "Antonyms:".dimmed(), word.antonyms.join(", "));
    }
    Ok(())
}
