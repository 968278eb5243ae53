use axum::{extract::rejection::JsonRejection, extract::State, routing::post, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        services::{hash_password, is_valid_email, normalize_email, verify_password},
    },
    error::{ApiError, ApiResult},
    state::AppState,
    users::repo::{is_unique_violation, NewUser, User},
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register/", post(register))
        .route("/register", post(register))
        .route("/login/", post(login))
        .route("/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(mut payload) = payload?;
    payload.email = normalize_email(&payload.email);

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let mut conn = state.conn().await?;

    if User::find_by_email(&mut conn, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(ApiError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let new_user = NewUser {
        email: &payload.email,
        password_hash: &hash,
        name: &payload.name,
        location: payload.location.as_deref(),
        profile_photo: payload.profile_photo.as_deref(),
        availability: payload.availability.as_deref(),
    };

    let user = match User::create(&mut conn, &new_user).await {
        Ok(u) => u,
        // Lost a race with a concurrent registration for the same email.
        Err(e) if is_unique_violation(&e) => {
            warn!(email = %payload.email, "email already registered");
            return Err(ApiError::Conflict("Email already registered".into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(Json(AuthResponse {
        message: "User registered successfully",
        user_id: user.id,
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<AuthResponse>> {
    let Json(mut payload) = payload?;
    payload.email = normalize_email(&payload.email);

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(ApiError::Validation("Invalid email".into()));
    }

    let mut conn = state.conn().await?;

    let Some(user) = User::find_by_email(&mut conn, &payload.email).await? else {
        warn!(email = %payload.email, "login unknown email");
        return Err(ApiError::InvalidCredentials);
    };

    match verify_password(&payload.password, &user.password) {
        Ok(true) => {}
        Ok(false) => {
            warn!(email = %payload.email, user_id = user.id, "login invalid password");
            return Err(ApiError::InvalidCredentials);
        }
        // Stored value is not a PHC hash (e.g. a plaintext row written by hand).
        Err(e) => {
            error!(error = %e, user_id = user.id, "stored password hash unreadable");
            return Err(ApiError::InvalidCredentials);
        }
    }

    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok(Json(AuthResponse {
        message: "Login successful",
        user_id: user.id,
    }))
}
