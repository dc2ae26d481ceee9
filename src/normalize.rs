//! Turns the model's free-text answer into [`Card`]s.
//!
//! Models like to wrap JSON in a fenced code block, sometimes tagged with a
//! language. We take the first fenced block if there is one, otherwise the
//! whole text, and parse that. Nothing else is tried.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::card::Card;
use crate::error::CardNewsError;
use crate::images::ImageResolver;

#[allow(clippy::expect_used)]
static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```[\w-]*\s*([\s\S]*?)\s*```").expect("fenced block pattern is valid")
});

#[derive(Debug, Deserialize)]
struct RawDeck {
    cards: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCard {
    id: i64,
    title: String,
    content: String,
    // older prompts asked the model to put the keyword in `imageUrl`
    #[serde(alias = "imageUrl")]
    image_keyword: String,
}

/// The JSON payload inside `raw`: the first fenced block's body, else all of it.
pub fn extract_payload(raw: &str) -> &str {
    FENCED_BLOCK
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map_or(raw, |body| body.as_str())
        .trim()
}

/// Parses the model output into cards, resolving each keyword to an image URL.
///
/// Count, title length and content length are prompt hints only and are not
/// checked here.
pub fn normalize(raw: &str, images: &ImageResolver) -> Result<Vec<Card>, CardNewsError> {
    let payload = extract_payload(raw);
    let deck: RawDeck =
        serde_json::from_str(payload).map_err(|err| CardNewsError::Parse(err.to_string()))?;

    Ok(deck
        .cards
        .into_iter()
        .map(|card| Card {
            id: card.id,
            title: card.title,
            content: card.content,
            image_url: images.resolve(&card.image_keyword),
        })
        .collect())
}
