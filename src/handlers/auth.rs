// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{AuthResponse, LoginPayload, Profile, RegisterPayload, UpdateProfilePayload},
};

// POST /api/auth/register
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterPayload,
    responses(
        (status = 201, description = "Cliente registrado", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .register_user(
            &payload.name,
            &payload.email,
            &payload.password,
            payload.phone.as_deref(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// POST /api/auth/login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login efetuado", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok((StatusCode::OK, Json(AuthResponse { token })))
}

// GET /api/users/me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Perfil do cliente autenticado", body = Profile)
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(user: AuthenticatedUser) -> Result<impl IntoResponse, AppError> {
    Ok((StatusCode::OK, Json(user.0)))
}

// PUT /api/users/me
#[utoipa::path(
    put,
    path = "/api/users/me",
    tag = "Users",
    request_body = UpdateProfilePayload,
    responses(
        (status = 200, description = "Perfil atualizado", body = Profile)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<UpdateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = app_state
        .user_repo
        .update_profile(
            &app_state.db_pool,
            user.0.id,
            payload.name.as_deref(),
            payload.phone.as_deref(),
            payload.avatar_url.as_deref(),
        )
        .await?;

    Ok((StatusCode::OK, Json(profile)))
}
