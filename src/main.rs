use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::info;

use wordfilter::censor;
use wordfilter::config::Config;
use wordfilter::output::terminal;
use wordfilter::tokenize::{HfTokenizer, TokenCache};
use wordfilter::wordlist::{self, WordListStore};

/// wordfilter: manage a banned word list and censor text against it.
///
/// The list file comes from WORDFILTER_LIST (default ./banned_words.txt).
#[derive(Parser)]
#[command(name = "wordfilter", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an empty word list if none exists
    Init,

    /// Show the banned words
    List {
        /// Print as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Add a word (no-op if already listed)
    Add {
        word: String,
    },

    /// Remove a word (succeeds even if it isn't listed)
    Remove {
        word: String,
    },

    /// Censor a single word (tolerates up to 2 edits)
    CensorWord {
        word: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Censor every space-separated token of a text (tolerates 1 edit)
    CensorText {
        text: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove the phrases listed after the `expressions` line from a response
    Strip {
        response: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build or refresh the token cache for a model
    Tokenize {
        /// Model name, used to name the cache file
        #[arg(long)]
        model: String,

        /// Rebuild even if the cache looks up to date
        #[arg(long)]
        force: bool,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// JSON shape for censor/strip results.
#[derive(Serialize)]
struct CensorReport<'a> {
    input: &'a str,
    output: &'a str,
    censored: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wordfilter=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Init => {
            if wordlist::create_list(&config.list_path)? {
                println!("Word list created at: {}", config.list_path.display());
            } else {
                println!("Word list already exists at: {}", config.list_path.display());
            }
        }

        Commands::List { json } => {
            let store = open_store(&config)?;
            let words = store.words()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&words)?);
            } else {
                terminal::display_list(&words, &config.list_path.display().to_string());
            }
        }

        Commands::Add { word } => {
            let store = open_store(&config)?;
            store.add_word(&word)?;
            if store.is_dirty() {
                println!("{} {}", "added".green(), word);
            } else {
                println!("{} {} (already listed)", "unchanged".dimmed(), word);
            }
        }

        Commands::Remove { word } => {
            let store = open_store(&config)?;
            store.remove_word(&word)?;
            println!("{} {}", "removed".yellow(), word);
        }

        Commands::CensorWord { word, json } => {
            let store = open_store(&config)?;
            let output = censor::censor_word(&store, &word)?;
            print_result(&word, &output, json)?;
        }

        Commands::CensorText { text, json } => {
            let store = open_store(&config)?;
            let output = censor::censor_text(&store, &text)?;
            print_result(&text, &output, json)?;
        }

        Commands::Strip { response, json } => {
            let store = open_store(&config)?;
            let output = censor::strip_known_phrases(&store, &response)?;
            print_result(&response, &output, json)?;
        }

        Commands::Tokenize { model, force, json } => {
            let tokenizer_path = config.require_tokenizer()?;
            let store = open_store(&config)?;
            if force {
                store.mark_dirty();
            }

            let tokenizer = HfTokenizer::load(tokenizer_path)?;
            let cache = TokenCache::new(&config.cache_dir);

            info!(model = %model, "Refreshing token cache");
            let outcome = cache
                .refresh(&store, &tokenizer, &model)
                .await
                .with_context(|| format!("Failed to build token cache for {model}"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                terminal::display_refresh(
                    &model,
                    &outcome,
                    &cache.cache_path(&model).display().to_string(),
                );
            }
        }
    }

    Ok(())
}

/// Open the configured word list, pointing at `init` if it is missing.
fn open_store(config: &Config) -> Result<WordListStore> {
    WordListStore::open(&config.list_path).with_context(|| {
        format!(
            "Could not open word list {}\nRun `wordfilter init` to create it, \
             or set WORDFILTER_LIST in your .env file.",
            config.list_path.display()
        )
    })
}

fn print_result(input: &str, output: &str, json: bool) -> Result<()> {
    if json {
        let report = CensorReport {
            input,
            output,
            censored: input != output,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        terminal::display_censored(input, output);
    }
    Ok(())
}
