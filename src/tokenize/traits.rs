// Tokenizer trait: the only point where the filter touches a model runtime.

use async_trait::async_trait;

use crate::error::Result;

/// Turns text into a model's token ids.
///
/// Async because a hosting server typically forwards this to its model runner.
/// Dropping the returned future abandons the call; there is no separate
/// cancellation handle. Failures should be reported as
/// [`FilterError::TokenizeFailure`](crate::error::FilterError::TokenizeFailure).
#[async_trait]
pub trait Tokenizer: Send + Sync {
    async fn tokenize(&self, text: &str) -> Result<Vec<u32>>;
}
