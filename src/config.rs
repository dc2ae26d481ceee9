//! Config handling

use std::sync::Arc;
use std::time::Duration;

use tracing::log::LevelFilter;
use tracing::warn;

use crate::cli::CliOptions;
use crate::error::CardNewsError;
use crate::generator::{GeminiClient, TextGenerator};
use crate::images::ImageResolver;

/// Sets up logging based on the debug flag
pub fn setup_logging(debug: bool) -> Result<(), Box<std::io::Error>> {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut logger = simple_logger::SimpleLogger::new().with_level(level);
    if !debug {
        logger = logger
            .with_module_level("tracing", LevelFilter::Warn)
            .with_module_level("rustls", LevelFilter::Info)
            .with_module_level("hyper_util", LevelFilter::Info)
            .with_module_level("reqwest", LevelFilter::Info)
            .with_module_level("tower_sessions", LevelFilter::Warn)
            .with_module_level("h2", LevelFilter::Info);
    }
    logger.init().map_err(|err| {
        eprintln!("Failed to initialize logger: {}", err);
        Box::new(std::io::Error::other(err))
    })
}

/// Builds the Gemini client from the CLI options, or `None` when no key is set.
///
/// A missing key isn't fatal: the server runs and reports the problem on each
/// generation request.
pub fn text_generator(cli: &CliOptions) -> Option<Arc<dyn TextGenerator>> {
    let Some(api_key) = cli.api_key() else {
        warn!("GEMINI_API_KEY is not set, generation requests will fail until it is");
        return None;
    };
    let client = GeminiClient::new(api_key.to_string(), cli.gemini_model.clone())
        .with_base_url(cli.gemini_base_url.as_str())
        .with_timeout(cli.request_timeout_secs.map(Duration::from_secs));
    let generator: Arc<dyn TextGenerator> = Arc::new(client);
    Some(generator)
}

/// Image resolver for the configured template.
pub fn image_resolver(cli: &CliOptions) -> Result<ImageResolver, CardNewsError> {
    ImageResolver::new(cli.image_url_template.as_str())
}
