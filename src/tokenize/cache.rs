// Per-model token cache file: one token id per line.
//
// Rebuilt when the cache file is missing or the list has changed since the
// last rebuild: either the store's dirty flag is set, or the list file was
// modified after the cache was written (a change made by an earlier process).
// Otherwise tokenization is skipped.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use super::traits::Tokenizer;
use crate::error::{FilterError, Result};
use crate::wordlist::store::atomic_write;
use crate::wordlist::WordListStore;

/// What a refresh did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RefreshOutcome {
    /// The cache existed and the list was unchanged.
    Fresh,
    /// The cache was (re)written with this many token ids.
    Rebuilt { token_count: usize },
}

/// Directory holding `tokens<model>.txt` files.
#[derive(Debug, Clone)]
pub struct TokenCache {
    dir: PathBuf,
}

impl TokenCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Cache file for `model`. Path separators and `:` in model names such as
    /// `org/model:7b` are replaced so the file stays inside the cache dir.
    pub fn cache_path(&self, model: &str) -> PathBuf {
        let safe: String = model
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
            .collect();
        self.dir.join(format!("tokens{safe}.txt"))
    }

    /// Bring the cache for `model` up to date with `store`.
    ///
    /// Skips tokenization when the cache file exists, the list is not dirty
    /// and the list file is not newer than the cache. Otherwise joins every
    /// listed word with single spaces, tokenizes the result and writes the
    /// ids. The dirty flag is cleared up front and restored if the rebuild
    /// fails, so a concurrent add during the rebuild still triggers the next
    /// one.
    pub async fn refresh(
        &self,
        store: &WordListStore,
        tokenizer: &dyn Tokenizer,
        model: &str,
    ) -> Result<RefreshOutcome> {
        let path = self.cache_path(model);
        let dirty = store.take_dirty();

        if path.exists() && !dirty && !list_is_newer(store, &path) {
            debug!(model, path = %path.display(), "Token cache is fresh");
            return Ok(RefreshOutcome::Fresh);
        }

        match self.rebuild(store, tokenizer, &path).await {
            Ok(token_count) => {
                info!(model, token_count, path = %path.display(), "Rebuilt token cache");
                Ok(RefreshOutcome::Rebuilt { token_count })
            }
            Err(e) => {
                if dirty {
                    store.mark_dirty();
                }
                Err(e)
            }
        }
    }

    /// Read the cached token ids for `model`.
    pub fn read(&self, model: &str) -> Result<Vec<u32>> {
        let path = self.cache_path(model);
        let content = fs::read_to_string(&path).map_err(|e| FilterError::from_io(&path, e))?;
        content
            .lines()
            .filter(|line| !line.is_empty())
            .map(|line| {
                line.parse::<u32>().map_err(|e| {
                    FilterError::io(
                        &path,
                        std::io::Error::new(std::io::ErrorKind::InvalidData, e),
                    )
                })
            })
            .collect()
    }

    async fn rebuild(
        &self,
        store: &WordListStore,
        tokenizer: &dyn Tokenizer,
        path: &Path,
    ) -> Result<usize> {
        let joined = store.words()?.join(" ");
        let ids = tokenizer.tokenize(&joined).await?;

        fs::create_dir_all(&self.dir).map_err(|e| FilterError::io(&self.dir, e))?;

        let mut content = String::with_capacity(ids.len() * 6);
        for id in &ids {
            content.push_str(&id.to_string());
            content.push('\n');
        }
        atomic_write(path, content.as_bytes())?;

        Ok(ids.len())
    }
}

/// True if the store's list file was modified after `cache`.
fn list_is_newer(store: &WordListStore, cache: &Path) -> bool {
    let modified = |p: &Path| fs::metadata(p).and_then(|m| m.modified()).ok();
    match (store.path().and_then(modified), modified(cache)) {
        (Some(list), Some(cache)) => list > cache,
        _ => false,
    }
}
