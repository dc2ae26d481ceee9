//! CLI parser
use clap::Parser;
use std::num::NonZeroU16;

use crate::constants::{DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL, DEFAULT_IMAGE_URL_TEMPLATE};

#[derive(Parser, Debug)]
/// CLI Options
pub struct CliOptions {
    #[clap(long, help = "Enable debug logging", env = "CARDNEWS_DEBUG")]
    /// Enable debug logging. Env: CARDNEWS_DEBUG
    pub debug: bool,
    #[clap(long, short, default_value = "9000", env = "CARDNEWS_PORT")]
    /// http listener, defaults to `9000`.
    /// Env: CARDNEWS_PORT
    pub port: NonZeroU16,
    #[clap(
        long,
        short,
        default_value = "127.0.0.1",
        env = "CARDNEWS_LISTEN_ADDRESS"
    )]
    /// Listen address, defaults to `127.0.0.1`.
    /// Env: CARDNEWS_LISTEN_ADDRESS
    pub listen_address: String,

    #[clap(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    /// Gemini API key. Without it the server still starts but every
    /// generation request fails with a configuration error.
    /// Env: GEMINI_API_KEY
    pub gemini_api_key: Option<String>,

    #[clap(long, default_value = DEFAULT_GEMINI_MODEL, env = "CARDNEWS_GEMINI_MODEL")]
    /// Gemini model id. Env: CARDNEWS_GEMINI_MODEL
    pub gemini_model: String,

    #[clap(long, default_value = DEFAULT_GEMINI_BASE_URL, env = "CARDNEWS_GEMINI_BASE_URL")]
    /// Gemini API root. Env: CARDNEWS_GEMINI_BASE_URL
    pub gemini_base_url: String,

    #[clap(
        long,
        default_value = DEFAULT_IMAGE_URL_TEMPLATE,
        env = "CARDNEWS_IMAGE_URL_TEMPLATE"
    )]
    /// Image lookup URL, `{keyword}` is replaced by the encoded keyword.
    /// Env: CARDNEWS_IMAGE_URL_TEMPLATE
    pub image_url_template: String,

    #[clap(long, env = "CARDNEWS_REQUEST_TIMEOUT_SECS")]
    /// Timeout for the Gemini call in seconds, unset means the HTTP client default.
    /// Env: CARDNEWS_REQUEST_TIMEOUT_SECS
    pub request_timeout_secs: Option<u64>,
}

impl CliOptions {
    /// The configured API key, treating an empty value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini_api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_parse() {
        let cli = CliOptions::try_parse_from(["cardnews"]).expect("defaults");
        assert_eq!(cli.port.get(), 9000);
        assert_eq!(cli.gemini_model, DEFAULT_GEMINI_MODEL);
        assert_eq!(cli.image_url_template, DEFAULT_IMAGE_URL_TEMPLATE);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cli = CliOptions::try_parse_from(["cardnews", "--gemini-api-key", "  "])
            .expect("parse");
        assert_eq!(cli.api_key(), None);

        let cli = CliOptions::try_parse_from(["cardnews", "--gemini-api-key", "abc"])
            .expect("parse");
        assert_eq!(cli.api_key(), Some("abc"));
    }
}
