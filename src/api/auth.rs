//! Operator authentication endpoint

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{AppError, AppResult};

#[derive(Deserialize, Validate, ToSchema)]
pub struct AdminLoginRequest {
    #[validate(email)]
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub success: bool,
    pub token: String,
}

/// Admin login: checks credentials against the configured allow-list and
/// returns a signed token.
#[utoipa::path(
    post,
    path = "/user/admin",
    tag = "auth",
    request_body = AdminLoginRequest,
    responses(
        (status = 200, description = "Token issued, or success=false on invalid credentials", body = AdminLoginResponse)
    )
)]
pub async fn admin_login(
    State(state): State<crate::AppState>,
    Json(request): Json<AdminLoginRequest>,
) -> AppResult<Json<AdminLoginResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let token = state.services.auth.login(&request.email, &request.password)?;

    Ok(Json(AdminLoginResponse {
        success: true,
        token,
    }))
}
