use axum::Json;
use axum::body::Bytes;

use super::prelude::*;
use crate::pipeline::validate_topic;

/// Body of `POST /api/generate`. Only `topic` is required.
///
/// Decoded from the raw body, so clients that omit `Content-Type` still work.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest {
    topic: Option<String>,
    scene_count: Option<i64>,
    aspect_ratio: Option<String>,
    resolution: Option<String>,
    script_style: Option<String>,
}

impl GenerateRequest {
    /// Topic is checked before anything else so a missing topic is always a 400
    /// about the topic.
    fn into_parts(self) -> Result<(String, GenerationOptions), CardNewsError> {
        let topic = validate_topic(self.topic.as_deref().unwrap_or_default())?.to_string();
        let options = GenerationOptions::from_parts(
            self.scene_count,
            self.aspect_ratio.as_deref(),
            self.resolution.as_deref(),
            self.script_style.as_deref(),
        )?;
        Ok((topic, options))
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GenerateResponse {
    cards: Vec<Card>,
}

pub(crate) async fn generate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<GenerateResponse>, CardNewsError> {
    let request: GenerateRequest = serde_json::from_slice(&body)
        .map_err(|err| CardNewsError::BadRequest(format!("Invalid request body: {err}")))?;
    let (topic, options) = request.into_parts()?;
    info!(
        "API generation request for {} cards ({}, {}, {})",
        options.scene_count,
        options.aspect_ratio.as_str(),
        options.resolution.as_str(),
        options.script_style.as_str()
    );

    let cards = generate_cards(state.generator(), &state.images, &topic, &options).await?;
    Ok(Json(GenerateResponse { cards }))
}
