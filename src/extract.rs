//! 请求体提取器
//! 把 JSON 解析失败统一转换为 400

use crate::error::AppError;
use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

/// JSON 请求体，解析失败时返回 `AppError::Validation`
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        Ok(Self(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    tracing::debug!(reason = %rejection.body_text(), "Rejected request body");

    let message = match rejection {
        JsonRejection::JsonDataError(_) => "Request body contains unexpected or invalid fields",
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON request body",
        JsonRejection::MissingJsonContentType(_) => "Expected a JSON request body",
        _ => "Invalid request body",
    };

    AppError::validation(message)
}
