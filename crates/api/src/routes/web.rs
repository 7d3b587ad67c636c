//! htmx front end
//!
//! Fragments are always answered with 200 so htmx swaps them in; failures
//! become an error paragraph.

use axum::extract::{Form, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use tracing::error;
use vibekeeper_domain::{OccasionFilter, VibeKeeperError};

use crate::context::SharedContext;
use crate::error::ApiError;
use crate::utils::html;

pub fn routes() -> Router<SharedContext> {
    Router::new()
        .route("/", get(index))
        .route("/occasions", get(list_fragment))
        .route("/add_occasion", post(add_occasion))
        .route("/search", post(search))
}

#[derive(Debug, Deserialize)]
pub struct AddOccasionForm {
    #[serde(default)]
    pub occasion_text: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search: String,
}

pub async fn index() -> Html<&'static str> {
    Html(html::index_page())
}

pub async fn list_fragment(State(ctx): State<SharedContext>) -> Result<Html<String>, ApiError> {
    let occasions = ctx.occasions.list(ctx.web_user.id, OccasionFilter::default()).await?;
    Ok(Html(html::occasion_list(&occasions)))
}

pub async fn add_occasion(
    State(ctx): State<SharedContext>,
    Form(form): Form<AddOccasionForm>,
) -> Html<String> {
    if form.occasion_text.trim().is_empty() {
        return Html(html::error_message(html::EMPTY_INPUT_MESSAGE));
    }

    match ctx.occasions.quick_add(ctx.web_user.id, &form.occasion_text).await {
        Ok(occasion) => Html(html::occasion_card(&occasion)),
        Err(VibeKeeperError::Extraction(_)) => {
            Html(html::error_message(html::EXTRACTION_HELP_MESSAGE))
        }
        Err(VibeKeeperError::InvalidInput(message)) => Html(html::error_message(&message)),
        Err(err) => {
            error!(error = %err, "Failed to save occasion from web form");
            Html(html::error_message("Error saving occasion"))
        }
    }
}

pub async fn search(
    State(ctx): State<SharedContext>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, ApiError> {
    let occasions = ctx.occasions.search(ctx.web_user.id, &form.search).await?;
    Ok(Html(html::occasion_list(&occasions)))
}
