//! Admin console gate.
//!
//! Provides an extractor that rejects API calls unless the admin console has
//! been unlocked with the configured password.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::state::AppState;

/// Extractor that requires the admin console to be unlocked.
///
/// # Example
///
/// ```rust,ignore
/// async fn dashboard(_admin: RequireAdmin, State(state): State<AppState>) -> impl IntoResponse {
///     // only reached after a successful POST /api/admin/login
/// }
/// ```
pub struct RequireAdmin;

/// Returned when an admin route is called while locked.
pub struct AdminRejection;

impl IntoResponse for AdminRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized: admin login required" })),
        )
            .into_response()
    }
}

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AdminRejection;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if state.admin().read().await.is_authenticated() {
            Ok(Self)
        } else {
            tracing::debug!("Rejected admin request while locked");
            Err(AdminRejection)
        }
    }
}
