use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Returns the default directory for token cache files.
/// Uses the platform data directory: ~/.local/share/wordfilter/tokens/ on Linux.
pub fn default_cache_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wordfilter")
        .join("tokens")
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Banned word list, one entry per line (WORDFILTER_LIST)
    pub list_path: PathBuf,
    /// Where per-model token caches are written (WORDFILTER_CACHE_DIR)
    pub cache_dir: PathBuf,
    /// `tokenizer.json` used by the `tokenize` command (WORDFILTER_TOKENIZER)
    pub tokenizer_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default except the tokenizer, which is only needed
    /// to build a token cache.
    pub fn load() -> Result<Self> {
        Ok(Self {
            list_path: env::var("WORDFILTER_LIST")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./banned_words.txt")),
            cache_dir: env::var("WORDFILTER_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| default_cache_dir()),
            tokenizer_path: env::var("WORDFILTER_TOKENIZER")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        })
    }

    /// Check that a tokenizer file is configured and present.
    /// Call this before building a token cache.
    pub fn require_tokenizer(&self) -> Result<&PathBuf> {
        match &self.tokenizer_path {
            None => anyhow::bail!(
                "WORDFILTER_TOKENIZER not set. Point it at the model's tokenizer.json\n\
                 in your .env file."
            ),
            Some(path) if !path.exists() => anyhow::bail!(
                "Tokenizer file not found: {}\nCheck WORDFILTER_TOKENIZER in your .env file.",
                path.display()
            ),
            Some(path) => Ok(path),
        }
    }
}
