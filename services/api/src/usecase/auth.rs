use anyhow::Context as _;
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use loomap_auth_types::password::{hash_password, verify_password};
use loomap_auth_types::token::issue_access_token;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;

/// A freshly issued access token for a user.
#[derive(Debug)]
pub struct SessionOutput {
    pub user_id: Uuid,
    pub access_token: String,
    pub access_token_exp: u64,
}

fn issue_session(user_id: Uuid, secret: &str) -> Result<SessionOutput, ApiError> {
    let (access_token, access_token_exp) =
        issue_access_token(user_id, secret).context("issue access token")?;
    Ok(SessionOutput {
        user_id,
        access_token,
        access_token_exp,
    })
}

/// Trim a required field; blank counts as missing.
fn required(value: Option<String>) -> Result<String, ApiError> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
        .ok_or(ApiError::MissingData)
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<SessionOutput, ApiError> {
        let email = required(input.email)?;
        let name = required(input.name)?;
        // Passwords are taken verbatim; only emptiness is rejected.
        let password = input
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ApiError::MissingData)?;

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(ApiError::UserAlreadyExists);
        }

        let password_hash = hash_password(&password).context("hash password")?;
        let now = Utc::now();
        let user = User {
            id: Uuid::now_v7(),
            email,
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        };
        self.users.create(&user).await?;
        info!(user_id = %user.id, "user registered");

        issue_session(user.id, &self.jwt_secret)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<SessionOutput, ApiError> {
        let email = required(input.email)?;
        let password = input
            .password
            .filter(|p| !p.is_empty())
            .ok_or(ApiError::MissingData)?;

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::InvalidCredentials)?;
        if !verify_password(&password, &user.password_hash) {
            return Err(ApiError::InvalidCredentials);
        }

        issue_session(user.id, &self.jwt_secret)
    }
}
