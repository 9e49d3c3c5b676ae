// Censorship: edit distance, fuzzy word/text redaction and exact phrase
// stripping, all driven by a WordListStore.

pub mod distance;
pub mod exact;
pub mod fuzzy;

pub use distance::distance;
pub use exact::strip_known_phrases;
pub use fuzzy::{censor_text, censor_word, normalize, TEXT_THRESHOLD, WORD_THRESHOLD};
