//! The instruction sent to the text model.

use crate::card::GenerationOptions;

/// Card news instruction template, see `data/prompts/card_news.txt`.
pub const CARD_NEWS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/data/prompts/card_news.txt"
));

/// Replace `{{key}}` placeholders in a template string.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        result = result.replace(&format!("{{{{{}}}}}", key), value);
    }
    result
}

/// Builds the single prompt for one generation request.
pub fn build_prompt(topic: &str, options: &GenerationOptions) -> String {
    let count = options.scene_count.to_string();
    let framing = format!(
        "{} at {} ({}, {})",
        options.aspect_ratio.orientation(),
        options.dimensions(),
        options.aspect_ratio.as_str(),
        options.resolution.as_str(),
    );
    // topic goes last so a topic containing `{{count}}` isn't expanded
    render(
        CARD_NEWS,
        &[
            ("count", &count),
            ("tone", options.script_style.tone_instruction()),
            ("framing", &framing),
            ("topic", topic),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{AspectRatio, Resolution, ScriptStyle};

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn template_has_placeholders() {
        for key in ["{{count}}", "{{topic}}", "{{tone}}", "{{framing}}"] {
            assert!(CARD_NEWS.contains(key), "missing {key}");
        }
    }

    #[test]
    fn default_prompt_asks_for_five_cards() {
        let prompt = build_prompt("healthy breakfast", &GenerationOptions::default());
        assert!(prompt.contains("Topic: \"healthy breakfast\""));
        assert!(prompt.contains("exactly 5 cards"));
        assert!(prompt.contains("\"imageKeyword\""));
        assert!(!prompt.contains("{{"));
    }

    #[test]
    fn options_shape_the_prompt() {
        let options = GenerationOptions {
            scene_count: 12,
            aspect_ratio: AspectRatio::Portrait,
            resolution: Resolution::FourK,
            script_style: ScriptStyle::Formal,
        };
        let prompt = build_prompt("quarterly results", &options);
        assert!(prompt.contains("exactly 12 cards"));
        assert!(prompt.contains("portrait at 2160x3840 (9:16, 4K)"));
        assert!(prompt.contains(ScriptStyle::Formal.tone_instruction()));
    }

    #[test]
    fn topic_placeholders_are_left_alone() {
        let prompt = build_prompt("{{count}} ways", &GenerationOptions::default());
        assert!(prompt.contains("Topic: \"{{count}} ways\""));
    }
}
