use axum::{
    extract::{Query, State},
    Extension, Json,
};
use mantra_core::ShowsResponse;
use mantra_shows::{ShowsError, ShowsParams};

use crate::middleware::RequestId;

use super::{ApiError, AppState};

pub(super) async fn list_shows(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ShowsResponse>, ApiError> {
    let params = ShowsParams::from_pairs(pairs);
    match state.finder.find_shows(&params).await {
        Ok(response) => Ok(Json(response)),
        Err(err) => {
            log_failure(&req_id, &err);
            Err(ApiError::from(&err))
        }
    }
}

fn log_failure(req_id: &RequestId, err: &ShowsError) {
    match err {
        ShowsError::Upstream { status, body } => {
            tracing::error!(
                request_id = %req_id.0,
                upstream_status = *status,
                upstream_body = %body,
                "events API request failed"
            );
        }
        ShowsError::Unexpected(reason) => {
            tracing::error!(request_id = %req_id.0, error = %reason, "show lookup failed");
        }
        ShowsError::NotConfigured => {
            tracing::warn!(request_id = %req_id.0, "show lookup attempted without API key");
        }
        ShowsError::InvalidZip | ShowsError::ZipNotFound => {
            tracing::debug!(request_id = %req_id.0, error = %err, "rejected show lookup");
        }
    }
}
