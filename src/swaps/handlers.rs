use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};

use super::dto::{CreateSwapRequest, CreatedSwapResponse};
use super::repo::SkillSwapRequest;
use crate::{auth::identity::AuthUser, error::ApiResult, state::AppState};

pub fn swap_routes() -> Router<AppState> {
    Router::new()
        .route("/skill-swap-request/", post(create_request))
        .route("/skill-swap-request", post(create_request))
        .route("/skill-swap-requests/", get(list_requests))
        .route("/skill-swap-requests", get(list_requests))
}

#[instrument(skip(state, payload))]
pub async fn create_request(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateSwapRequest>, JsonRejection>,
) -> ApiResult<Json<CreatedSwapResponse>> {
    let Json(payload) = payload?;

    let mut conn = state.conn().await?;
    let request = SkillSwapRequest::create(
        &mut conn,
        user_id,
        &payload.skills_offered,
        &payload.skills_wanted,
        payload.message.as_deref(),
    )
    .await?;

    info!(request_id = request.id, user_id, "skill swap request created");
    Ok(Json(CreatedSwapResponse {
        message: "Skill swap request created",
        request_id: request.id,
    }))
}

#[instrument(skip(state))]
pub async fn list_requests(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<SkillSwapRequest>>> {
    let mut conn = state.conn().await?;
    let requests = SkillSwapRequest::list_all(&mut conn).await?;
    Ok(Json(requests))
}
