//! HTTP request handlers.

pub mod site;
pub mod website;

use crate::http::error::{ApiError, AppError};
use crate::http::response::RequestTimer;
use crate::state::{AppState, ConcreteWebsiteStore};

/// Run `f` against the store off the async workers, stamping any failure
/// with the request's meta.
async fn run_store<T, F>(state: &AppState, timer: &RequestTimer, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&ConcreteWebsiteStore) -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    state
        .with_store(f)
        .await
        .map_err(|e| timer.fail(e))?
        .map_err(|e| timer.fail(e))
}
