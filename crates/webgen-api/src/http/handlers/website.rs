//! Website store handlers for the REST API.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use webgen_types::generation::{GenerationOutput, GenerationRequest};
use webgen_types::website::WebsiteDraft;

use crate::http::error::{ApiError, AppError};
use crate::http::handlers::run_store;
use crate::http::response::{ApiResponse, RequestTimer};
use crate::state::AppState;

type JsonResult = Result<Json<ApiResponse<serde_json::Value>>, ApiError>;

/// Body for `POST /api/v1/websites/import`.
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub prompt: String,
    #[serde(rename = "type", default)]
    pub site_type: Option<String>,
    pub output: GenerationOutput,
}

/// GET /api/v1/websites - List all websites, most recent first.
pub async fn list_websites(State(state): State<AppState>) -> JsonResult {
    let timer = RequestTimer::start();

    let websites = run_store(&state, &timer, |store| Ok(store.get_websites_list())).await?;
    let data = serde_json::json!({
        "count": websites.len(),
        "websites": websites,
    });

    Ok(Json(timer.success(data).with_link("self", "/api/v1/websites")))
}

/// POST /api/v1/websites - Save a website draft.
pub async fn save_website(
    State(state): State<AppState>,
    Json(draft): Json<WebsiteDraft>,
) -> JsonResult {
    let timer = RequestTimer::start();
    store_draft(&state, draft, timer).await
}

/// POST /api/v1/websites/import - Save the raw output of a generation service.
pub async fn import_website(
    State(state): State<AppState>,
    Json(body): Json<ImportRequest>,
) -> JsonResult {
    let timer = RequestTimer::start();

    let request = GenerationRequest {
        prompt: body.prompt,
        site_type: body.site_type,
    };
    let draft = WebsiteDraft::from_generation(request, body.output);
    store_draft(&state, draft, timer).await
}

async fn store_draft(state: &AppState, draft: WebsiteDraft, timer: RequestTimer) -> JsonResult {
    draft.validate().map_err(|e| timer.fail(e))?;

    let slug = run_store(state, &timer, move |store| {
        store.save_website(draft).map_err(AppError::from)
    })
    .await?;

    tracing::info!(request_id = timer.request_id(), slug = %slug, "website saved");

    let resp = timer
        .success(serde_json::json!({ "slug": slug }))
        .with_link("self", &format!("/api/v1/websites/{slug}"))
        .with_link("page", &format!("/sites/{slug}"));

    Ok(Json(resp))
}

/// DELETE /api/v1/websites - Remove every stored website.
pub async fn clear_websites(State(state): State<AppState>) -> JsonResult {
    let timer = RequestTimer::start();

    let cleared = run_store(&state, &timer, |store| {
        let count = store.get_count();
        store.clear_all()?;
        Ok(count)
    })
    .await?;

    Ok(Json(timer.success(serde_json::json!({ "cleared": cleared }))))
}

/// GET /api/v1/websites/count - Number of stored websites.
pub async fn count_websites(State(state): State<AppState>) -> JsonResult {
    let timer = RequestTimer::start();
    let count = run_store(&state, &timer, |store| Ok(store.get_count())).await?;
    Ok(Json(timer.success(serde_json::json!({ "count": count }))))
}

/// GET /api/v1/websites/{slug} - Get a website by slug.
pub async fn get_website(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> JsonResult {
    let timer = RequestTimer::start();

    let lookup = slug.clone();
    let website = run_store(&state, &timer, move |store| {
        store
            .get_website(&lookup)
            .ok_or(AppError::NotFound(lookup))
    })
    .await?;

    let website_json = serde_json::to_value(&website)
        .map_err(|e| timer.fail(AppError::Internal(e.to_string())))?;
    let resp = timer
        .success(website_json)
        .with_link("self", &format!("/api/v1/websites/{slug}"))
        .with_link("page", &format!("/sites/{slug}"));

    Ok(Json(resp))
}

/// DELETE /api/v1/websites/{slug} - Delete a website.
pub async fn delete_website(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> JsonResult {
    let timer = RequestTimer::start();

    let target = slug.clone();
    let deleted = run_store(&state, &timer, move |store| {
        Ok(store.delete_website(&target)?)
    })
    .await?;

    if !deleted {
        return Err(timer.fail(AppError::NotFound(slug)));
    }

    tracing::info!(request_id = timer.request_id(), slug = %slug, "website deleted");

    Ok(Json(timer.success(serde_json::json!({ "deleted": slug }))))
}
