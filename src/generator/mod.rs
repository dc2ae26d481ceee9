//! Text generation backends.
//!
//! The rest of the crate only sees [`TextGenerator`]: one prompt in, the
//! model's raw text out. [`GeminiClient`] talks to Google's REST API and
//! [`ScriptedGenerator`] replays canned answers for tests.

pub mod gemini;
pub mod mock;
pub mod prompt;

pub use gemini::GeminiClient;
pub use mock::ScriptedGenerator;

use async_trait::async_trait;

use crate::error::CardNewsError;

/// Something that can complete a prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` once and returns the raw completion text.
    async fn generate(&self, prompt: &str) -> Result<String, CardNewsError>;

    /// Model identifier, for display.
    fn model(&self) -> &str;
}
