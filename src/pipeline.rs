//! One generation request, end to end: validate, prompt, call, normalize.

use tracing::info;

use crate::card::{Card, GenerationOptions};
use crate::error::CardNewsError;
use crate::generator::TextGenerator;
use crate::generator::prompt::build_prompt;
use crate::images::ImageResolver;
use crate::normalize::normalize;

/// Returns the trimmed topic, or [`CardNewsError::MissingTopic`] if nothing is left.
pub fn validate_topic(topic: &str) -> Result<&str, CardNewsError> {
    let topic = topic.trim();
    if topic.is_empty() {
        return Err(CardNewsError::MissingTopic);
    }
    Ok(topic)
}

/// Generates a fresh card deck for `topic`.
///
/// `generator` is `None` when no credential is configured; that is reported
/// before anything is sent upstream. Exactly one upstream call is made
/// otherwise, with no retry.
pub async fn generate_cards(
    generator: Option<&dyn TextGenerator>,
    images: &ImageResolver,
    topic: &str,
    options: &GenerationOptions,
) -> Result<Vec<Card>, CardNewsError> {
    let topic = validate_topic(topic)?;
    let generator = generator.ok_or(CardNewsError::MissingCredential)?;

    let prompt = build_prompt(topic, options);
    let raw = generator.generate(&prompt).await?;
    let cards = normalize(&raw, images)?;

    info!(
        "Generated {} of {} requested cards with {} ({} character topic)",
        cards.len(),
        options.scene_count,
        generator.model(),
        topic.chars().count()
    );
    Ok(cards)
}
