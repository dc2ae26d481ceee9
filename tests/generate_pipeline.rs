use cardnews::card::{AspectRatio, GenerationOptions, Resolution, ScriptStyle};
use cardnews::error::CardNewsError;
use cardnews::generator::{GeminiClient, ScriptedGenerator};
use cardnews::images::ImageResolver;
use cardnews::pipeline::generate_cards;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DECK: &str = r#"```json
{
  "cards": [
    {"id": 1, "title": "Morning", "content": "Start strong.", "imageKeyword": "sunrise over city"},
    {"id": 2, "title": "Focus", "content": "One thing at a time.", "imageKeyword": "desk & coffee"},
    {"id": 3, "title": "Rest", "content": "Breaks matter.", "imageKeyword": "hammock"}
  ]
}
```"#;

#[tokio::test]
async fn gemini_output_becomes_cards() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.0-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": DECK }] } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key".to_string(), "gemini-2.0-flash".to_string())
        .with_base_url(server.uri());
    let images = ImageResolver::new("https://images.example/search?q={keyword}").unwrap();
    let options = GenerationOptions {
        scene_count: 3,
        aspect_ratio: AspectRatio::Portrait,
        resolution: Resolution::TwoK,
        script_style: ScriptStyle::Casual,
    };

    let cards = generate_cards(Some(&client), &images, "productive days", &options)
        .await
        .unwrap();

    assert_eq!(cards.len(), 3);
    assert_eq!(cards[1].title, "Focus");
    assert_eq!(
        cards[1].image_url,
        "https://images.example/search?q=desk%20%26%20coffee"
    );
}

#[tokio::test]
async fn gemini_outage_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let client = GeminiClient::new("test-key".to_string(), "gemini-2.0-flash".to_string())
        .with_base_url(server.uri());
    let err = generate_cards(
        Some(&client),
        &ImageResolver::default(),
        "anything",
        &GenerationOptions::default(),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, CardNewsError::Upstream(_)));
}

#[tokio::test]
async fn same_topic_twice_gives_unrelated_decks() {
    let other = DECK.replace("Morning", "Evening");
    let generator = ScriptedGenerator::new()
        .with_response(DECK)
        .with_response(other);
    let images = ImageResolver::default();
    let options = GenerationOptions::default();

    let first = generate_cards(Some(&generator), &images, "days", &options)
        .await
        .unwrap();
    let second = generate_cards(Some(&generator), &images, "days", &options)
        .await
        .unwrap();

    assert_eq!(first[0].title, "Morning");
    assert_eq!(second[0].title, "Evening");
    assert_eq!(generator.call_count(), 2);
}
