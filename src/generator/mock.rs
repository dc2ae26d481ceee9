//! Canned [`TextGenerator`] for tests and offline demos.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::TextGenerator;
use crate::error::CardNewsError;

#[derive(Clone, Debug)]
enum Scripted {
    Text(String),
    Failure(String),
}

/// Replays scripted answers in order, cycling when it runs out.
#[derive(Clone, Debug, Default)]
pub struct ScriptedGenerator {
    responses: Arc<Vec<Scripted>>,
    prompts: Arc<Mutex<Vec<String>>>,
    call_count: Arc<AtomicUsize>,
}

impl ScriptedGenerator {
    /// Generator with nothing scripted; every call fails until a response is added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful completion.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.push(Scripted::Text(text.into()))
    }

    /// Queues an upstream failure.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(Scripted::Failure(message.into()))
    }

    /// Clones the script first if another handle still shares it.
    fn push(mut self, scripted: Scripted) -> Self {
        Arc::make_mut(&mut self.responses).push(scripted);
        self
    }

    /// Number of `generate` calls so far.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// The most recent prompt received, if any.
    pub async fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().await.last().cloned()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, CardNewsError> {
        let index = self.call_count.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().await.push(prompt.to_string());

        let responses = &self.responses;
        if responses.is_empty() {
            return Err(CardNewsError::Upstream(
                "no scripted response configured".to_string(),
            ));
        }
        match &responses[index % responses.len()] {
            Scripted::Text(text) => Ok(text.clone()),
            Scripted::Failure(message) => Err(CardNewsError::Upstream(message.clone())),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}
