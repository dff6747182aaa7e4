/*!
 * Client implementations for the translation backend.
 *
 * The backend is any OpenAI-compatible chat-completion endpoint; the
 * `TranslationClient` trait is the seam that lets the two-stage
 * translator run against a test double instead of the network.
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::TranslationError;

/// Common trait for chat-completion backends
///
/// One invocation is one best-effort request: no retry, no backoff, no
/// caching. Callers own any retry policy.
#[async_trait]
pub trait TranslationClient: Send + Sync + Debug {
    /// Complete a single chat request
    ///
    /// # Arguments
    /// * `system_prompt` - The resolved system prompt guiding the model
    /// * `user_text` - The user message carrying the text to translate
    ///
    /// # Returns
    /// * `Result<String, TranslationError>` - The completion text or a typed error
    async fn complete(&self, system_prompt: &str, user_text: &str)
        -> Result<String, TranslationError>;
}

pub mod openai;

pub use openai::OpenAI;
