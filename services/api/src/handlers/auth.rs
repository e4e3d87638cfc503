use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use loomap_auth_types::cookie::{clear_access_token_cookie, set_access_token_cookie};

use crate::error::ApiError;
use crate::handlers::{JsonBody, MessageResponse};
use crate::state::AppState;
use crate::usecase::auth::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

#[derive(Serialize)]
pub struct SessionResponse {
    pub message: &'static str,
    pub user_id: Uuid,
    pub access_token: String,
    pub access_token_exp: u64,
}

// ── POST /api/auth/register ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(RegisterInput {
            email: body.email,
            password: body.password,
            name: body.name,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            message: "User registered successfully",
            user_id: out.user_id,
            access_token: out.access_token,
            access_token_exp: out.access_token_exp,
        }),
    ))
}

// ── POST /api/auth/login ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(body): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    let out = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_access_token_cookie(jar, out.access_token.clone(), state.cookie_secure);
    Ok((
        jar,
        Json(SessionResponse {
            message: "Login successful",
            user_id: out.user_id,
            access_token: out.access_token,
            access_token_exp: out.access_token_exp,
        }),
    ))
}

// ── POST /api/auth/logout ────────────────────────────────────────────────────

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    (
        clear_access_token_cookie(jar, state.cookie_secure),
        Json(MessageResponse {
            message: "Logout successful",
        }),
    )
}
