use cardnews::config::{image_resolver, setup_logging, text_generator};
use cardnews::web::AppState;
use clap::Parser;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = cardnews::cli::CliOptions::parse();

    if let Err(err) = setup_logging(cli.debug) {
        eprintln!("Logging setup error: {}", err);
        return;
    }

    let images = match image_resolver(&cli) {
        Ok(images) => images,
        Err(err) => {
            error!("Configuration error: {}", err);
            return;
        }
    };

    let state = AppState::new(text_generator(&cli), images, &cli.gemini_model);

    if let Err(err) = cardnews::web::setup_server(&cli.listen_address, cli.port, state).await {
        error!("Application error: {}", err);
    }
}
