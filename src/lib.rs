// wordfilter: banned word list management and fuzzy censorship
//
// This is the library root. A hosting service owns a WordListStore, passes it
// to the censor functions, and refreshes the token cache when it needs the
// list in a model's token ids.

pub mod censor;
pub mod config;
pub mod error;
pub mod output;
pub mod tokenize;
pub mod wordlist;

pub use error::{FilterError, Result};
