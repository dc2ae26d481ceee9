//! HTTP surface: the JSON generation API and the studio UI.

use std::num::NonZeroU16;
use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{Expiry, SessionManagerLayer};
use tracing::{error, info};

use crate::constants::{SESSION_INACTIVITY_MINUTES, SESSION_SWEEP_INTERVAL_SECS};
use crate::generator::TextGenerator;
use crate::images::ImageResolver;

mod api;
mod csrf;
mod flash;
mod prelude;
mod sessions;
mod views;

pub use sessions::SessionCache;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    generator: Option<Arc<dyn TextGenerator>>,
    images: Arc<ImageResolver>,
    model_name: String,
}

impl AppState {
    /// `generator` is `None` when no credential is configured.
    pub fn new(
        generator: Option<Arc<dyn TextGenerator>>,
        images: ImageResolver,
        model_name: &str,
    ) -> Self {
        Self {
            generator,
            images: Arc::new(images),
            model_name: model_name.to_string(),
        }
    }

    pub(crate) fn generator(&self) -> Option<&dyn TextGenerator> {
        self.generator.as_deref()
    }
}

fn create_router() -> Router<AppState> {
    Router::new()
        .route("/", get(views::index_handler))
        .route("/generate", post(views::generate_form_handler))
        .route("/reset", post(views::reset_handler))
        .route("/cards/{id}/toggle", post(views::toggle_card_handler))
        .route("/selection/all", post(views::select_all_handler))
        .route("/selection/none", post(views::select_none_handler))
        .route("/download", get(views::download_handler))
        .route("/api/generate", post(api::generate_handler))
        .route("/static/styles.css", get(styles_handler))
        .route("/healthz", get(healthz_handler))
}

/// The full application: routes, state, sessions and request tracing.
///
/// Sessions live in `sessions`; something has to sweep it, see
/// [`SessionCache::spawn_sweeper`].
pub fn build_app(state: AppState, sessions: SessionCache) -> Router {
    app_with_expiry(
        state,
        sessions,
        Duration::minutes(SESSION_INACTIVITY_MINUTES),
    )
}

fn app_with_expiry(state: AppState, sessions: SessionCache, inactivity: Duration) -> Router {
    let sessions = SessionManagerLayer::new(sessions)
        .with_secure(false)
        .with_expiry(Expiry::OnInactivity(inactivity));

    create_router()
        .with_state(state)
        .layer(sessions)
        .layer(TraceLayer::new_for_http())
}

async fn styles_handler() -> impl IntoResponse {
    const STYLES: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/styles.css"));
    ([(CONTENT_TYPE, "text/css")], STYLES)
}

async fn healthz_handler() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", err);
    }
    info!("Shutting down");
}

/// Binds the listener and serves until Ctrl-C.
pub async fn setup_server(
    listen_addr: &str,
    port: NonZeroU16,
    state: AppState,
) -> Result<(), anyhow::Error> {
    let sessions = SessionCache::default();
    let sweeper = sessions.spawn_sweeper(std::time::Duration::from_secs(
        SESSION_SWEEP_INTERVAL_SECS,
    ));
    let app = build_app(state, sessions);

    let addr = format!("{}:{}", listen_addr, port);
    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    sweeper.abort();
    served?;
    Ok(())
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::generator::ScriptedGenerator;

    use http_body_util::BodyExt;

    pub(crate) const FIVE_CARDS: &str = r#"{
  "cards": [
    {"id": 1, "title": "Why it matters", "content": "Breakfast fuels the morning.", "imageKeyword": "healthy breakfast food"},
    {"id": 2, "title": "Protein first", "content": "Eggs keep you full.", "imageKeyword": "boiled eggs"},
    {"id": 3, "title": "Add fiber", "content": "Oats release energy slowly.", "imageKeyword": "oatmeal bowl"},
    {"id": 4, "title": "Fruit", "content": "Berries add vitamins.", "imageKeyword": "fresh berries"},
    {"id": 5, "title": "Make it a habit", "content": "Same time, every day.", "imageKeyword": "morning routine"}
  ]
}"#;

    pub(crate) fn state_with(generator: Option<ScriptedGenerator>) -> AppState {
        let generator = generator.map(|g| Arc::new(g) as Arc<dyn TextGenerator>);
        AppState::new(generator, ImageResolver::default(), "gemini-2.0-flash")
    }

    pub(crate) fn app_with(generator: Option<ScriptedGenerator>) -> Router {
        build_app(state_with(generator), SessionCache::default())
    }

    pub(crate) async fn read_body(response: axum::response::Response) -> String {
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("collect body")
            .to_bytes();
        String::from_utf8_lossy(&bytes).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::{SessionCache, app_with_expiry};

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn healthz_is_ok() {
        let app = app_with(None);
        let request = Request::builder()
            .uri("/healthz")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_body(response).await, "ok");
    }

    #[tokio::test]
    async fn stylesheet_is_served_as_css() {
        let app = app_with(None);
        let request = Request::builder()
            .uri("/static/styles.css")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "text/css"
        );
    }

    #[tokio::test]
    async fn anonymous_visits_do_not_outlive_their_sessions() {
        let sessions = SessionCache::default();
        let app = app_with_expiry(
            state_with(None),
            sessions.clone(),
            time::Duration::milliseconds(500),
        );

        for _ in 0..50 {
            let request = Request::builder().uri("/").body(Body::empty()).unwrap();
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }
        assert_eq!(sessions.len().await, 50);

        let sweeper = sessions.spawn_sweeper(std::time::Duration::from_millis(100));
        tokio::time::sleep(std::time::Duration::from_millis(1500)).await;
        sweeper.abort();
        assert_eq!(sessions.len().await, 0);
    }
}
