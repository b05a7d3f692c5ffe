// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::application::use_cases::project_use_case::ProjectUseCaseError;

/// 应用错误类型
///
/// 封装所有可能的应用层错误，统一转换为 `{"error": "..."}` 响应体
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let error_message = self.0.to_string();

        let status = match self.0.downcast_ref::<ProjectUseCaseError>() {
            Some(ProjectUseCaseError::ValidationError(_)) => StatusCode::BAD_REQUEST,
            Some(ProjectUseCaseError::NotFound(_)) => StatusCode::NOT_FOUND,
            Some(ProjectUseCaseError::Conflict(_)) => StatusCode::CONFLICT,
            Some(ProjectUseCaseError::Repository(_)) | None => {
                error!("Request failed: {:#}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
