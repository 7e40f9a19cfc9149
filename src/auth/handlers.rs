use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, LoginRequest, RegisterRequest},
        error::AuthError,
        password::verify_password_blocking,
        repo_types::NewUser,
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/authentication", post(authenticate))
}

fn invalid_body(rejection: JsonRejection) -> AuthError {
    warn!(error = %rejection.body_text(), "rejected request body");
    AuthError::validation("invalid request body")
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let Json(payload) = payload.map_err(invalid_body)?;
    let candidate = NewUser::from(payload);

    // Ensure email is not taken
    match state.users.find_by_email(&candidate.email).await {
        Ok(Some(_)) => {
            warn!("email already registered");
            return Err(AuthError::DuplicateEmail);
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "find_by_email failed");
            return Err(AuthError::RegistrationFailed);
        }
    }

    let user = match state.users.create(candidate).await {
        Ok(u) => u,
        Err(AuthError::DuplicateEmail) => {
            warn!("email already registered");
            return Err(AuthError::DuplicateEmail);
        }
        Err(e @ AuthError::Validation(_)) => {
            warn!(error = %e, "registration rejected");
            return Err(AuthError::RegistrationFailed);
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            return Err(AuthError::RegistrationFailed);
        }
    };

    let token = state.tokens.issue(user.id).map_err(|e| {
        error!(error = %e, "token issue failed");
        AuthError::RegistrationFailed
    })?;

    info!(user_id = %user.id, "user registered");
    Ok(Json(AuthResponse { user, token }))
}

#[instrument(skip(state, payload))]
pub async fn authenticate(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, AuthError> {
    let Json(payload) = payload.map_err(invalid_body)?;

    if payload.email.trim().is_empty() || payload.secret.is_empty() {
        return Err(AuthError::validation("email and secret are required"));
    }

    let found = match state.users.find_by_email_with_secret(&payload.email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            warn!("login unknown email");
            return Err(AuthError::UserNotFound);
        }
        Err(e) => {
            error!(error = %e, "find_by_email_with_secret failed");
            return Err(AuthError::AuthenticationFailed);
        }
    };

    let ok = match verify_password_blocking(payload.secret, found.password_hash.clone()).await {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, user_id = %found.user.id, "verify_password failed");
            return Err(AuthError::AuthenticationFailed);
        }
    };

    if !ok {
        warn!(user_id = %found.user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    let user = found.into_user();
    let token = state.tokens.issue(user.id).map_err(|e| {
        error!(error = %e, "token issue failed");
        AuthError::AuthenticationFailed
    })?;

    info!(user_id = %user.id, "user logged in");
    Ok(Json(AuthResponse { user, token }))
}
