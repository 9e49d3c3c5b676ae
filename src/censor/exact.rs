// Exact-match filter: strips known phrases verbatim from a model response.
//
// The phrases live in the same kind of list file, below an `expressions`
// sentinel line.

use tracing::debug;

use crate::error::Result;
use crate::wordlist::WordListStore;

/// Remove every occurrence of every listed phrase from `response`.
///
/// Phrases are applied in file order against the progressively modified
/// response. Blank phrase lines are skipped.
pub fn strip_known_phrases(store: &WordListStore, response: &str) -> Result<String> {
    let mut response = response.to_string();

    for phrase in store.expressions()? {
        if phrase.is_empty() {
            continue;
        }
        if response.contains(phrase.as_str()) {
            debug!(phrase = %phrase, "Stripped phrase from response");
            response = response.replace(phrase.as_str(), "");
        }
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn store_with(content: &str) -> (tempfile::TempDir, WordListStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, content).unwrap();
        let store = WordListStore::open(&path).unwrap();
        (dir, store)
    }

    #[test]
    fn test_strips_listed_phrase() {
        let (_dir, store) = store_with("header\nexpressions\nen tant que modèle, \n");
        let out = strip_known_phrases(&store, "en tant que modèle, je réponds.").unwrap();
        assert_eq!(out, "je réponds.");
    }

    #[test]
    fn test_strips_every_occurrence() {
        let (_dir, store) = store_with("expressions\nbla\n");
        assert_eq!(strip_known_phrases(&store, "bla x bla").unwrap(), " x ");
    }

    #[test]
    fn test_header_entries_are_not_stripped() {
        let (_dir, store) = store_with("chat\nexpressions\nchien\n");
        assert_eq!(
            strip_known_phrases(&store, "chat et chien").unwrap(),
            "chat et "
        );
    }

    #[test]
    fn test_no_sentinel_leaves_response_alone() {
        let (_dir, store) = store_with("chat\nchien\n");
        assert_eq!(
            strip_known_phrases(&store, "chat et chien").unwrap(),
            "chat et chien"
        );
    }

    #[test]
    fn test_blank_phrase_lines_ignored() {
        let (_dir, store) = store_with("expressions\n\nchien\n");
        assert_eq!(strip_known_phrases(&store, "un chien").unwrap(), "un ");
    }
}
