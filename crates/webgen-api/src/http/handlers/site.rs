//! Rendered page handler.

use axum::extract::{Path, State};
use axum::response::Html;

use webgen_core::service::render::render_page;

use crate::http::error::{ApiError, AppError};
use crate::http::handlers::run_store;
use crate::http::response::RequestTimer;
use crate::state::AppState;

/// GET /sites/{slug} - Serve the stored markup of a website.
pub async fn view_site(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Html<String>, ApiError> {
    let timer = RequestTimer::start();

    let page = run_store(&state, &timer, move |store| {
        store
            .get_website(&slug)
            .as_ref()
            .and_then(render_page)
            .ok_or(AppError::NotFound(slug))
    })
    .await?;

    Ok(Html(page))
}
