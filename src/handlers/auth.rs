//! 认证相关的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    extract::JsonBody,
    middleware::AppState,
    models::auth::*,
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// 注册
pub async fn signup(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let registered = state
        .auth_service
        .register(req)
        .await
        .map_err(|e| e.or_unexpected("Error registering user"))?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            message: "User registered successfully",
            token: registered.token,
        }),
    ))
}

/// 登录
pub async fn signin(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<SigninRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = state
        .auth_service
        .authenticate(req)
        .await
        .map_err(|e| e.or_unexpected("Error signing in. Please try again"))?;

    Ok(Json(TokenResponse {
        message: "Logged in successfully",
        token,
    }))
}

/// 受保护资源：返回当前用户
pub async fn protected(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .auth_service
        .current_user(auth_context.user_id)
        .await
        .map_err(|e| e.or_unexpected("Error accessing protected route"))?;

    Ok(Json(json!({
        "message": "Access granted to protected route",
        "user": user,
    })))
}
