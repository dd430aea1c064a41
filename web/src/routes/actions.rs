//! Ajax actions on the signed-in user's account.

use crate::context::RequestContext;
use crate::error::{ApiError, AppError};
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use libreviews_model::UserPreference;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TogglePreferenceRequest {
    pub preference_name: String,
}

/// The new value, as the string `"true"` or `"false"`.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TogglePreferenceResponse {
    pub new_value: String,
}

/// `POST /api/actions/toggle-preference/`
pub async fn toggle_preference(
    ctx: RequestContext,
    State(state): State<AppState>,
    Json(request): Json<TogglePreferenceRequest>,
) -> Result<Json<TogglePreferenceResponse>, ApiError> {
    let fail = |e: AppError| ApiError::new(ctx.language, e);

    let user = ctx.require_user().map_err(fail)?;
    let preference: UserPreference = request
        .preference_name
        .parse()
        .map_err(|e| fail(AppError::from(e)))?;

    let mut user = state.store.get_user(user.id).map_err(|e| fail(e.into()))?;
    let new_value = user.toggle_preference(preference);
    state.store.save_user(user.clone()).map_err(|e| fail(e.into()))?;
    info!(user = %user.name, preference = %preference, new_value, "Preference toggled");

    Ok(Json(TogglePreferenceResponse {
        new_value: new_value.to_string(),
    }))
}
