use axum::body::Body;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use chrono::Utc;

use super::csrf::{csrf_token, validate_csrf};
use super::flash::{self, FLASH_GENERATED, FLASH_RESET, FlashMessage};
use super::prelude::*;
use crate::card::{AspectRatio, Resolution, ScriptStyle};
use crate::constants::{
    DOWNLOAD_FILENAME_PREFIX, MAX_SCENE_COUNT, MIN_SCENE_COUNT, STUDIO_SESSION_KEY,
};
use crate::studio::Studio;

#[derive(Clone, Debug)]
pub(crate) struct SelectOption {
    value: &'static str,
    label: &'static str,
    selected: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct CardView {
    id: i64,
    position: usize,
    title: String,
    content: String,
    image_url: String,
    selected: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "studio.html")]
pub(crate) struct StudioTemplate {
    csrf_token: String,
    model_name: String,
    configured: bool,
    topic: String,
    scene_count: u8,
    min_scene_count: u8,
    max_scene_count: u8,
    aspect_ratios: Vec<SelectOption>,
    resolutions: Vec<SelectOption>,
    script_styles: Vec<SelectOption>,
    output_label: String,
    cards: Vec<CardView>,
    has_cards: bool,
    selected_count: usize,
    has_flash: bool,
    flash_message: String,
    flash_class: String,
}

impl StudioTemplate {
    fn new(
        state: &AppState,
        studio: &Studio,
        csrf_token: String,
        flash: Option<FlashMessage>,
    ) -> Self {
        let options = studio.options;
        let aspect_ratios = AspectRatio::ALL
            .into_iter()
            .map(|ratio| SelectOption {
                value: ratio.as_str(),
                label: ratio.label(),
                selected: ratio == options.aspect_ratio,
            })
            .collect();
        let resolutions = Resolution::ALL
            .into_iter()
            .map(|resolution| SelectOption {
                value: resolution.as_str(),
                label: resolution.as_str(),
                selected: resolution == options.resolution,
            })
            .collect();
        let script_styles = ScriptStyle::ALL
            .into_iter()
            .map(|style| SelectOption {
                value: style.as_str(),
                label: style.label(),
                selected: style == options.script_style,
            })
            .collect();
        let cards: Vec<CardView> = studio
            .cards
            .iter()
            .enumerate()
            .map(|(index, card)| card_view(index, card, studio.is_selected(card.id)))
            .collect();
        let (has_flash, flash_message, flash_class) = match flash {
            Some(flash) => (true, flash.text.to_string(), flash.class.to_string()),
            None => (false, String::new(), String::new()),
        };

        Self {
            csrf_token,
            model_name: state.model_name.clone(),
            configured: state.generator().is_some(),
            topic: studio.topic.clone(),
            scene_count: options.scene_count,
            min_scene_count: MIN_SCENE_COUNT,
            max_scene_count: MAX_SCENE_COUNT,
            aspect_ratios,
            resolutions,
            script_styles,
            output_label: format!(
                "{} ({})",
                options.dimensions(),
                options.resolution.as_str()
            ),
            has_cards: !cards.is_empty(),
            cards,
            selected_count: studio.selected_cards().len(),
            has_flash,
            flash_message,
            flash_class,
        }
    }
}

fn card_view(index: usize, card: &Card, selected: bool) -> CardView {
    CardView {
        id: card.id,
        position: index + 1,
        title: card.title.clone(),
        content: card.content.clone(),
        image_url: card.image_url.clone(),
        selected,
    }
}

#[derive(Deserialize)]
pub(crate) struct CsrfForm {
    csrf_token: String,
}

#[derive(Deserialize)]
pub(crate) struct GenerateForm {
    csrf_token: String,
    #[serde(default)]
    topic: String,
    #[serde(default)]
    scene_count: String,
    #[serde(default)]
    aspect_ratio: String,
    #[serde(default)]
    resolution: String,
    #[serde(default)]
    script_style: String,
}

#[derive(Serialize)]
struct DownloadBody<'a> {
    cards: Vec<&'a Card>,
}

async fn load_studio(session: &Session) -> Result<Studio, CardNewsError> {
    Ok(session
        .get::<Studio>(STUDIO_SESSION_KEY)
        .await?
        .unwrap_or_default())
}

async fn save_studio(session: &Session, studio: &Studio) -> Result<(), CardNewsError> {
    session.insert(STUDIO_SESSION_KEY, studio).await?;
    Ok(())
}

/// handles the / GET
pub(crate) async fn index_handler(
    State(state): State<AppState>,
    session: Session,
) -> Result<StudioTemplate, CardNewsError> {
    let studio = load_studio(&session).await?;
    let csrf_token = csrf_token(&session).await?;
    let flash = flash::take_flash_message(&session).await?;
    Ok(StudioTemplate::new(&state, &studio, csrf_token, flash))
}

/// Runs a generation from the settings form. On failure the previous cards
/// stay as they were.
pub(crate) async fn generate_form_handler(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<GenerateForm>,
) -> Result<Redirect, CardNewsError> {
    validate_csrf(&session, &form.csrf_token).await?;
    let mut studio = load_studio(&session).await?;
    studio.topic = form.topic.trim().to_string();

    let outcome = match GenerationOptions::from_parts(
        form.scene_count.trim().parse::<i64>().ok(),
        Some(form.aspect_ratio.as_str()),
        Some(form.resolution.as_str()),
        Some(form.script_style.as_str()),
    ) {
        Ok(options) => {
            studio.options = options;
            generate_cards(state.generator(), &state.images, &studio.topic, &options).await
        }
        Err(err) => Err(err),
    };

    match outcome {
        Ok(cards) => {
            info!("Studio generated {} cards", cards.len());
            studio.replace_cards(cards);
            flash::set_flash(&session, FLASH_GENERATED).await?;
        }
        Err(err) => {
            err.log();
            flash::set_flash(&session, flash::flag_for_error(&err)).await?;
        }
    }

    save_studio(&session, &studio).await?;
    Ok(Redirect::to("/"))
}

pub(crate) async fn reset_handler(
    session: Session,
    Form(form): Form<CsrfForm>,
) -> Result<Redirect, CardNewsError> {
    validate_csrf(&session, &form.csrf_token).await?;
    let mut studio = load_studio(&session).await?;
    studio.reset();
    save_studio(&session, &studio).await?;
    flash::set_flash(&session, FLASH_RESET).await?;
    Ok(Redirect::to("/"))
}

pub(crate) async fn toggle_card_handler(
    Path(id): Path<i64>,
    session: Session,
    Form(form): Form<CsrfForm>,
) -> Result<Redirect, CardNewsError> {
    validate_csrf(&session, &form.csrf_token).await?;
    let mut studio = load_studio(&session).await?;
    let selected = studio.toggle(id);
    debug!("Card {id} selected: {selected}");
    save_studio(&session, &studio).await?;
    Ok(Redirect::to("/"))
}

pub(crate) async fn select_all_handler(
    session: Session,
    Form(form): Form<CsrfForm>,
) -> Result<Redirect, CardNewsError> {
    validate_csrf(&session, &form.csrf_token).await?;
    let mut studio = load_studio(&session).await?;
    studio.select_all();
    save_studio(&session, &studio).await?;
    Ok(Redirect::to("/"))
}

pub(crate) async fn select_none_handler(
    session: Session,
    Form(form): Form<CsrfForm>,
) -> Result<Redirect, CardNewsError> {
    validate_csrf(&session, &form.csrf_token).await?;
    let mut studio = load_studio(&session).await?;
    studio.deselect_all();
    save_studio(&session, &studio).await?;
    Ok(Redirect::to("/"))
}

/// Selected cards as a JSON attachment, in deck order.
pub(crate) async fn download_handler(session: Session) -> Result<Response, CardNewsError> {
    let studio = load_studio(&session).await?;
    let cards = studio.selected_cards();
    if cards.is_empty() {
        return Err(CardNewsError::BadRequest(
            "Select at least one card to download.".to_string(),
        ));
    }

    let body = serde_json::to_vec_pretty(&DownloadBody { cards })
        .map_err(|err| CardNewsError::InternalServerError(err.to_string()))?;
    let filename = format!(
        "{}-{}.json",
        DOWNLOAD_FILENAME_PREFIX,
        Utc::now().format("%Y%m%d-%H%M%S")
    );
    let response = Response::builder()
        .header(CONTENT_TYPE, "application/json")
        .header(
            CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        )
        .body(Body::from(body))?;
    Ok(response.into_response())
}
