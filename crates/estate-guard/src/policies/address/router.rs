use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::repository::{CollaborationLookup, ListingCatalog};
use super::service::{DisclosureError, ListingDisclosureService};
use crate::identity::{ListingId, UserId};

#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    #[serde(default)]
    pub viewer_id: Option<String>,
}

/// Router builder exposing the viewer-specific listing detail.
pub fn listing_router<C, L>(service: Arc<ListingDisclosureService<C, L>>) -> Router
where
    C: ListingCatalog + 'static,
    L: CollaborationLookup + 'static,
{
    Router::new()
        .route("/api/v1/listings/:listing_id", get(detail_handler::<C, L>))
        .with_state(service)
}

pub(crate) async fn detail_handler<C, L>(
    State(service): State<Arc<ListingDisclosureService<C, L>>>,
    Path(listing_id): Path<String>,
    Query(query): Query<ViewerQuery>,
) -> Response
where
    C: ListingCatalog + 'static,
    L: CollaborationLookup + 'static,
{
    let listing_id = ListingId(listing_id);
    let viewer_id = query
        .viewer_id
        .filter(|value| !value.trim().is_empty())
        .map(UserId);

    match service.view(&listing_id, viewer_id.as_ref()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(DisclosureError::ListingNotFound(id)) => {
            let payload = json!({
                "error": "listing_not_found",
                "listing_id": id,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::SERVICE_UNAVAILABLE, axum::Json(payload)).into_response()
        }
    }
}
