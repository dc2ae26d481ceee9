pub(crate) use crate::card::{Card, GenerationOptions};
pub(crate) use crate::error::CardNewsError;
pub(crate) use crate::pipeline::generate_cards;
pub(crate) use crate::web::AppState;
pub(crate) use askama::Template;
pub(crate) use askama_web::WebTemplate;
pub(crate) use axum::extract::{Form, Path, State};
pub(crate) use axum::response::{IntoResponse, Redirect, Response};
pub(crate) use serde::{Deserialize, Serialize};
pub(crate) use tower_sessions::Session;
pub(crate) use tracing::{debug, info};
