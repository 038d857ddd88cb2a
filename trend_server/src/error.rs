use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tokio::task::JoinError;
use trend_core::error::TrendError;
use utoipa::{ToResponse, ToSchema};

#[derive(Debug, Serialize, ToResponse, ToSchema)]
pub struct ErrorServer {
    #[serde(rename = "error")]
    pub message: String,
    #[serde(skip)]
    pub status: u16,
}

impl std::fmt::Display for ErrorServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl IntoResponse for ErrorServer {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<TrendError> for ErrorServer {
    fn from(err: TrendError) -> Self {
        Self {
            message: err.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.into(),
        }
    }
}

impl From<JoinError> for ErrorServer {
    fn from(err: JoinError) -> Self {
        Self {
            message: format!("Workflow task failed: {}", err),
            status: StatusCode::INTERNAL_SERVER_ERROR.into(),
        }
    }
}
