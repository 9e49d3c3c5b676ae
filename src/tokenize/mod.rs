// Token cache: the banned list in a model's token ids, rebuilt only when the
// list changes.
//
// The Tokenizer trait is the seam to the language-model runtime. HfTokenizer
// implements it with a local `tokenizer.json`; a hosting server can plug in
// its own model runner instead.

pub mod cache;
pub mod hf;
pub mod traits;

pub use cache::{RefreshOutcome, TokenCache};
pub use hf::HfTokenizer;
pub use traits::Tokenizer;
