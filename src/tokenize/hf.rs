// HuggingFace `tokenizers` implementation of the Tokenizer trait.
//
// Loads a model's `tokenizer.json` and encodes on a blocking thread so a large
// list doesn't stall the async runtime.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::traits::Tokenizer;
use crate::error::{FilterError, Result};

pub struct HfTokenizer {
    inner: Arc<tokenizers::Tokenizer>,
}

impl HfTokenizer {
    /// Load a tokenizer from a `tokenizer.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(FilterError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let inner = tokenizers::Tokenizer::from_file(path).map_err(|e| {
            FilterError::TokenizeFailure(format!(
                "Failed to load tokenizer from {}: {}",
                path.display(),
                e
            ))
        })?;

        debug!("Loaded tokenizer from {}", path.display());

        Ok(Self {
            inner: Arc::new(inner),
        })
    }
}

#[async_trait]
impl Tokenizer for HfTokenizer {
    async fn tokenize(&self, text: &str) -> Result<Vec<u32>> {
        let tokenizer = Arc::clone(&self.inner);
        let text = text.to_string();

        tokio::task::spawn_blocking(move || {
            // No special tokens: the cache holds the list's own ids only.
            tokenizer
                .encode(text.as_str(), false)
                .map(|encoding| encoding.get_ids().to_vec())
                .map_err(|e| FilterError::TokenizeFailure(e.to_string()))
        })
        .await
        .map_err(|e| FilterError::TokenizeFailure(format!("tokenizer task failed: {e}")))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{RefreshOutcome, TokenCache};
    use crate::wordlist::WordListStore;

    /// Word-level vocabulary split on whitespace: each known word is one id.
    const WORD_LEVEL_TOKENIZER: &str = r#"{
        "version": "1.0",
        "truncation": null,
        "padding": null,
        "added_tokens": [],
        "normalizer": null,
        "pre_tokenizer": { "type": "Whitespace" },
        "post_processor": null,
        "decoder": null,
        "model": {
            "type": "WordLevel",
            "vocab": { "[UNK]": 0, "chat": 1, "chien": 2, "souris": 3 },
            "unk_token": "[UNK]"
        }
    }"#;

    fn word_level_tokenizer(dir: &Path) -> HfTokenizer {
        let path = dir.join("tokenizer.json");
        std::fs::write(&path, WORD_LEVEL_TOKENIZER).unwrap();
        HfTokenizer::load(&path).unwrap_or_else(|e| panic!("tokenizer.json rejected: {e}"))
    }

    #[tokio::test]
    async fn test_tokenize_word_level_ids() {
        let dir = tempfile::tempdir().unwrap();
        let tokenizer = word_level_tokenizer(dir.path());

        assert_eq!(tokenizer.tokenize("chat chien").await.unwrap(), vec![1, 2]);
        assert_eq!(tokenizer.tokenize("chat cheval").await.unwrap(), vec![1, 0]);
        assert!(tokenizer.tokenize("").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_refresh_writes_tokenizer_ids() {
        let dir = tempfile::tempdir().unwrap();
        let tokenizer = word_level_tokenizer(dir.path());

        let list = dir.path().join("list.txt");
        std::fs::write(&list, "chat\nchien\n").unwrap();
        let store = WordListStore::open(&list).unwrap();
        let cache = TokenCache::new(dir.path().join("ressources"));

        let outcome = cache.refresh(&store, &tokenizer, "mistral").await.unwrap();
        assert_eq!(outcome, RefreshOutcome::Rebuilt { token_count: 2 });
        assert_eq!(cache.read("mistral").unwrap(), vec![1, 2]);

        store.add_word("souris").unwrap();
        cache.refresh(&store, &tokenizer, "mistral").await.unwrap();
        assert_eq!(cache.read("mistral").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = HfTokenizer::load(&dir.path().join("tokenizer.json")).err().unwrap();
        assert!(matches!(err, FilterError::NotFound { .. }));
    }

    #[test]
    fn test_load_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tokenizer.json");
        std::fs::write(&path, "not json").unwrap();
        let err = HfTokenizer::load(&path).err().unwrap();
        assert!(matches!(err, FilterError::TokenizeFailure(_)));
    }
}
