// Banned word list: file-backed store with idempotent add/remove.

pub mod store;

pub use store::{create_list, WordListStore, EXPRESSIONS_SENTINEL};
