// WordListStore: the banned word list, persisted one entry per line.
//
// The file is the single source of truth. Every read goes back to disk, so
// there is no in-memory mirror to keep consistent. Mutations take the store's
// mutex for the whole read-modify-write cycle; callers sharing one store
// (e.g. behind an Arc) cannot lose each other's updates.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{FilterError, Result};

/// Literal line separating the header section from the phrase section in a
/// list used by the exact-match filter.
pub const EXPRESSIONS_SENTINEL: &str = "expressions";

/// Handle to a banned word list on disk.
///
/// Created empty, pointed at a file with [`WordListStore::load`], then passed
/// by reference into the censor and token cache.
#[derive(Debug, Default)]
pub struct WordListStore {
    path: Option<PathBuf>,
    /// Set by every successful add/remove; cleared once the token cache has
    /// been rebuilt from the new list.
    dirty: AtomicBool,
    lock: Mutex<()>,
}

impl WordListStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for `new` followed by `load`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    /// Point the store at `path`, checking that the file can be opened.
    ///
    /// An empty file is a valid (empty) list. The dirty flag is left alone.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::File::open(path).map_err(|e| FilterError::from_io(path, e))?;
        info!(path = %path.display(), "Loaded word list");
        self.path = Some(path.to_path_buf());
        Ok(())
    }

    /// Path of the loaded list, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Clear the dirty flag, returning whether it was set.
    pub fn take_dirty(&self) -> bool {
        self.dirty.swap(false, Ordering::SeqCst)
    }

    /// Force the next token cache refresh to rebuild.
    pub fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }

    /// Read the current list, in file order.
    pub fn words(&self) -> Result<Vec<String>> {
        let path = self.require_path()?;
        let _guard = self.guard();
        read_lines(path)
    }

    /// Read the phrases listed after the `expressions` sentinel line.
    ///
    /// Everything up to and including the sentinel is skipped. A file with
    /// no sentinel yields no phrases.
    pub fn expressions(&self) -> Result<Vec<String>> {
        let path = self.require_path()?;
        let _guard = self.guard();
        let lines = read_lines(path)?;
        Ok(lines
            .into_iter()
            .skip_while(|line| line != EXPRESSIONS_SENTINEL)
            .skip(1)
            .collect())
    }

    /// Append `word` to the list unless an identical line already exists.
    ///
    /// Comparison is exact: case and surrounding whitespace count. Adding a
    /// word that is already present succeeds without touching the file or
    /// the dirty flag. A word containing a line terminator is rejected with
    /// `InvalidWord`: it would be stored as several entries and never match
    /// itself on the next add.
    pub fn add_word(&self, word: &str) -> Result<()> {
        if word.contains(['\n', '\r']) {
            return Err(FilterError::InvalidWord(word.to_string()));
        }
        let path = self.require_path()?;
        let _guard = self.guard();

        let content = read_content(path)?;
        if content.lines().any(|line| line == word) {
            debug!(word, "Word already listed, nothing to add");
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(path)
            .map_err(|e| FilterError::from_io(path, e))?;

        // A hand-edited file may lack the final newline; don't glue the new
        // word onto the last entry.
        let mut line = String::with_capacity(word.len() + 2);
        if !content.is_empty() && !content.ends_with('\n') {
            line.push('\n');
        }
        line.push_str(word);
        line.push('\n');

        file.write_all(line.as_bytes())
            .and_then(|_| file.flush())
            .map_err(|e| FilterError::io(path, e))?;

        self.mark_dirty();
        info!(word, "Added word to list");
        Ok(())
    }

    /// Rewrite the list without any line equal to `word`.
    ///
    /// The rewrite happens even when `word` is absent, and the list is
    /// marked dirty either way. The new content goes to a temporary file in
    /// the same directory which then replaces the list, so a crash mid-write
    /// leaves the old list intact.
    pub fn remove_word(&self, word: &str) -> Result<()> {
        let path = self.require_path()?;
        let _guard = self.guard();

        let lines = read_lines(path)?;
        let before = lines.len();
        let kept: Vec<String> = lines.into_iter().filter(|line| line != word).collect();

        let mut content = String::new();
        for line in &kept {
            content.push_str(line);
            content.push('\n');
        }
        atomic_write(path, content.as_bytes())?;

        self.mark_dirty();
        info!(word, removed = before - kept.len(), "Removed word from list");
        Ok(())
    }

    fn require_path(&self) -> Result<&Path> {
        self.path.as_deref().ok_or(FilterError::NotLoaded)
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        // The guarded data is `()`, so a poisoned lock carries no broken state.
        self.lock.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Create an empty list file at `path` if none exists yet.
///
/// Returns true if a new file was created.
pub fn create_list(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FilterError::io(parent, e))?;
    }
    fs::File::create(path).map_err(|e| FilterError::io(path, e))?;
    Ok(true)
}

fn read_content(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| FilterError::from_io(path, e))
}

fn read_lines(path: &Path) -> Result<Vec<String>> {
    Ok(read_content(path)?.lines().map(str::to_string).collect())
}

/// Replace the file at `path` with `bytes` via temp file + rename.
///
/// The temp file is created owner-only, so it takes the target's permissions
/// before the rename (or 0644 on Unix when the target is new).
pub(crate) fn atomic_write(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| FilterError::io(dir, e))?;
    if let Some(perms) = target_permissions(path) {
        tmp.as_file()
            .set_permissions(perms)
            .map_err(|e| FilterError::io(tmp.path(), e))?;
    }
    tmp.write_all(bytes)
        .and_then(|_| tmp.as_file().sync_all())
        .map_err(|e| FilterError::io(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| FilterError::io(path, e.error))?;
    Ok(())
}

fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<fs::Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(content: &str) -> (tempfile::TempDir, WordListStore) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, content).unwrap();
        let store = WordListStore::open(&path).unwrap();
        (dir, store)
    }

    #[test]
    fn test_load_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = WordListStore::new();
        let err = store.load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, FilterError::NotFound { .. }));
        assert!(store.path().is_none());
    }

    #[test]
    fn test_load_empty_file() {
        let (_dir, store) = store_with("");
        assert!(store.words().unwrap().is_empty());
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_operations_before_load_fail() {
        let store = WordListStore::new();
        assert!(matches!(store.words(), Err(FilterError::NotLoaded)));
        assert!(matches!(store.add_word("x"), Err(FilterError::NotLoaded)));
        assert!(matches!(store.remove_word("x"), Err(FilterError::NotLoaded)));
    }

    #[test]
    fn test_add_word_appends_and_marks_dirty() {
        let (_dir, store) = store_with("mot0\nmot1\n");
        store.add_word("mot_test").unwrap();
        assert_eq!(store.words().unwrap(), vec!["mot0", "mot1", "mot_test"]);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_add_existing_word_is_a_no_op() {
        let (dir, store) = store_with("mot0\nmot1\n");
        store.add_word("mot1").unwrap();
        let raw = fs::read_to_string(dir.path().join("list.txt")).unwrap();
        assert_eq!(raw, "mot0\nmot1\n");
        assert!(!store.is_dirty(), "no write means nothing to re-tokenize");
    }

    #[test]
    fn test_add_word_is_case_sensitive() {
        let (_dir, store) = store_with("Chat\n");
        store.add_word("chat").unwrap();
        assert_eq!(store.words().unwrap(), vec!["Chat", "chat"]);
    }

    #[test]
    fn test_add_word_to_file_without_trailing_newline() {
        let (_dir, store) = store_with("mot0");
        store.add_word("mot1").unwrap();
        assert_eq!(store.words().unwrap(), vec!["mot0", "mot1"]);
    }

    #[test]
    fn test_remove_word_rewrites_list() {
        let (dir, store) = store_with("mot0\nmot_test\nmot1\nmot_test\n");
        store.remove_word("mot_test").unwrap();
        let raw = fs::read_to_string(dir.path().join("list.txt")).unwrap();
        assert_eq!(raw, "mot0\nmot1\n");
        assert!(store.is_dirty());
    }

    #[test]
    fn test_remove_absent_word_still_marks_dirty() {
        let (_dir, store) = store_with("mot0\n");
        store.remove_word("absent").unwrap();
        assert_eq!(store.words().unwrap(), vec!["mot0"]);
        assert!(store.is_dirty());
    }

    #[test]
    fn test_take_dirty() {
        let (_dir, store) = store_with("");
        store.add_word("x").unwrap();
        assert!(store.take_dirty());
        assert!(!store.is_dirty());
        assert!(!store.take_dirty());
    }

    #[test]
    fn test_add_word_rejects_line_terminators() {
        let (_dir, store) = store_with("mot0\n");
        for word in ["a\nb", "a\r\nb", "trail\n"] {
            let err = store.add_word(word).unwrap_err();
            assert!(matches!(err, FilterError::InvalidWord(_)), "got {err:?}");
        }
        assert_eq!(store.words().unwrap(), vec!["mot0"]);
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_expressions_skip_header_and_sentinel() {
        let (_dir, store) = store_with("mot0\nexpressions\nje suis une IA\nen tant que\n");
        assert_eq!(
            store.expressions().unwrap(),
            vec!["je suis une IA", "en tant que"]
        );
    }

    #[test]
    fn test_expressions_without_sentinel() {
        let (_dir, store) = store_with("mot0\nmot1\n");
        assert!(store.expressions().unwrap().is_empty());
    }

    #[test]
    fn test_create_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("list.txt");
        assert!(create_list(&path).unwrap());
        assert!(!create_list(&path).unwrap());
        assert!(WordListStore::open(&path).unwrap().words().unwrap().is_empty());
    }
}
