use axum::{
    extract::{rejection::PathRejection, Path, State},
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::identity::AuthUser,
    error::{ApiError, ApiResult},
    state::AppState,
    users::repo::User,
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/user/:user_id", get(get_user))
        .route("/user/:user_id/", get(get_user))
}

/// Full profile row of any user, password hash included.
#[instrument(skip(state, user_id))]
pub async fn get_user(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    user_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(user_id) = user_id?;

    let mut conn = state.conn().await?;
    match User::find_by_id(&mut conn, user_id).await? {
        Some(user) => Ok(Json(user)),
        None => {
            warn!(caller, user_id, "user not found");
            Err(ApiError::NotFound("User not found".into()))
        }
    }
}
