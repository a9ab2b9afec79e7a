//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, GetProfileUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase, UpdateProfileInput, UpdateProfileUseCase,
};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    SessionStatusResponse, SignInRequest, SignUpRequest, UpdateProfileRequest, UserEnvelope,
};
use crate::presentation::middleware::AuthenticatedUser;

/// Shared state for auth handlers
pub struct AuthAppState<R> {
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            config: Arc::clone(&self.config),
        }
    }
}

/// Anything that is not a JSON object of the expected shape is a malformed
/// request; field values are validated by the use cases.
fn read_body<T>(payload: Result<Json<Value>, JsonRejection>) -> AuthResult<T>
where
    T: DeserializeOwned,
{
    let Json(value) = payload.map_err(|rejection| {
        AuthError::MalformedRequest(format!(
            "Invalid JSON in request body: {}",
            rejection.body_text()
        ))
    })?;

    if !value.is_object() {
        return Err(AuthError::MalformedRequest(
            "Request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(value).map_err(|e| {
        AuthError::MalformedRequest(format!(
            "Request body does not match the expected structure: {e}"
        ))
    })
}

fn session_token(headers: &HeaderMap, config: &AuthConfig) -> Option<String> {
    config.cookie().extract(headers)
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let req: SignUpRequest = read_body(payload)?;
    let use_case = SignUpUseCase::new(state.repo.clone(), state.config.clone());

    let user = use_case
        .execute(SignUpInput {
            name: req.name.unwrap_or_default(),
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserEnvelope::new(user))))
}

// ============================================================================
// Sign In
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R>(
    State(state): State<AuthAppState<R>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let req: SignInRequest = read_body(payload)?;
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email.unwrap_or_default(),
            password: req.password.unwrap_or_default(),
            remember_me: req.remember_me,
        })
        .await?;

    // Max-Age must match the session TTL
    let cookie = state
        .config
        .cookie()
        .set_cookie_header(&output.session_token, Some(output.max_age_secs))
        .ok_or_else(|| AuthError::Internal("Session token is not a valid header".into()))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserEnvelope::new(output.user)),
    ))
}

// ============================================================================
// Sign Out
// ============================================================================

/// POST /api/auth/signout
///
/// Always succeeds and clears the cookie, even without a live session.
pub async fn sign_out<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    if let Some(token) = session_token(&headers, &state.config) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Sign out without a valid session");
        }
    }

    let cookie = state
        .config
        .cookie()
        .delete_cookie_header()
        .ok_or_else(|| AuthError::Internal("Invalid cookie name".into()))?;

    Ok((StatusCode::NO_CONTENT, [(header::SET_COOKIE, cookie)]))
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
) -> AuthResult<Json<SessionStatusResponse>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let anonymous = SessionStatusResponse {
        authenticated: false,
        user: None,
        expires_at_ms: None,
    };

    let Some(token) = session_token(&headers, &state.config) else {
        return Ok(Json(anonymous));
    };

    let use_case = CheckSessionUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.config.clone(),
    );

    match use_case.execute(&token).await {
        Ok((session, user)) => Ok(Json(SessionStatusResponse {
            authenticated: true,
            user: Some(user.into()),
            expires_at_ms: Some(session.expires_at_ms),
        })),
        Err(AuthError::Unauthenticated) => Ok(Json(anonymous)),
        Err(e) => Err(e),
    }
}

// ============================================================================
// Profile (requires authentication)
// ============================================================================

/// GET /api/profile
pub async fn get_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let use_case = GetProfileUseCase::new(state.repo.clone());
    let user = use_case.execute(current.user_id).await?;

    Ok(Json(UserEnvelope::new(user)))
}

/// PUT /api/profile
pub async fn update_profile<R>(
    State(state): State<AuthAppState<R>>,
    Extension(current): Extension<AuthenticatedUser>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AuthResult<Json<UserEnvelope>>
where
    R: UserRepository + AuthSessionRepository + Send + Sync + 'static,
{
    let req: UpdateProfileRequest = read_body(payload)?;
    let use_case = UpdateProfileUseCase::new(state.repo.clone());

    let user = use_case
        .execute(
            current.user_id,
            UpdateProfileInput {
                name: req.name,
                image: req.image,
                email: req.email,
            },
        )
        .await?;

    Ok(Json(
        UserEnvelope::new(user).with_message("Profile updated successfully"),
    ))
}
