// Fuzzy censor: redacts words within a small edit distance of a banned entry.
//
// Both entry points re-read the list on every call, so a word added a moment
// ago is enforced immediately.

use tracing::debug;

use super::distance::distance;
use crate::error::Result;
use crate::wordlist::WordListStore;

/// Maximum distance at which a single word counts as a banned word.
pub const WORD_THRESHOLD: usize = 2;

/// Maximum distance at which a token inside a text counts as a banned word.
/// Tighter than [`WORD_THRESHOLD`]: short tokens in running text collide with
/// banned words far more often than a deliberately submitted word does.
pub const TEXT_THRESHOLD: usize = 1;

/// Strip the `*` and `"` characters used to obfuscate or quote a word.
pub fn normalize(word: &str) -> String {
    word.chars().filter(|c| !matches!(c, '*' | '"')).collect()
}

/// The replacement for a censored word.
pub fn censored_marker(normalized: &str) -> String {
    format!("censuré ({normalized})")
}

/// Censor a single word.
///
/// Returns the censored marker if any banned entry is within
/// [`WORD_THRESHOLD`] of the normalized word, otherwise `word` unchanged.
pub fn censor_word(store: &WordListStore, word: &str) -> Result<String> {
    let normalized = normalize(word);

    for entry in store.words()? {
        let d = distance(&entry, &normalized);
        if d <= WORD_THRESHOLD {
            debug!(entry = %entry, word = %normalized, distance = d, "Censored word");
            return Ok(censored_marker(&normalized));
        }
    }

    Ok(word.to_string())
}

/// Censor every space-separated token of `text`.
///
/// Splitting is on single spaces only, so runs of spaces produce empty tokens
/// and are preserved on re-join. Entries are the outer loop and tokens are
/// replaced in place, so later entries compare against already-censored
/// tokens rather than a snapshot of the input.
pub fn censor_text(store: &WordListStore, text: &str) -> Result<String> {
    let entries = store.words()?;
    let mut tokens: Vec<String> = text.split(' ').map(str::to_string).collect();

    for entry in &entries {
        for token in tokens.iter_mut() {
            let normalized = normalize(token);
            let d = distance(entry, &normalized);
            if d <= TEXT_THRESHOLD {
                debug!(entry = %entry, token = %normalized, distance = d, "Censored token");
                *token = censored_marker(&normalized);
            }
        }
    }

    Ok(tokens.join(" "))
}
