use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{error::AppError, identity::ApplicationIdentity, responder::StatusResponder};

/// `GET <path>`: the application identity as JSON.
///
/// 200 with the resolved identity, or 500 with
/// `{"name": null, "version": null, "status": "failed"}` when the configured
/// package is not installed.
pub async fn handler(
    State(responder): State<Arc<StatusResponder>>,
) -> Result<Json<ApplicationIdentity>, AppError> {
    Ok(Json(responder.identity()?))
}

/// Mounts the status handler at `path`. The returned router carries its own
/// state and can be merged into any host router.
pub fn router<S>(path: &str, responder: StatusResponder) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route(path, get(handler))
        .with_state(Arc::new(responder))
}
