use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use log::info;
use trend_core::workflow::dto::WorkflowState;

use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    get,
    path = "/session/{session_id}",
    params(("session_id" = String, Path, description = "Session identifier")),
    description = "Last persisted workflow state, empty when unknown",
    responses(
        (status = 200, description = "Stored state", body = WorkflowState),
        (status = 500, description = "Store unavailable", body = ErrorServer),
    )
)]
pub async fn get_session(
    State(server_state): State<Arc<ServerState>>,
    Path(session_id): Path<String>,
) -> Result<Json<WorkflowState>, ErrorServer> {
    let state = server_state.sessions().get_state(&session_id).await?;
    Ok(Json(state))
}

#[utoipa::path(
    delete,
    path = "/session/{session_id}",
    params(("session_id" = String, Path, description = "Session identifier")),
    description = "Erase the persisted state of a session",
    responses(
        (status = 204, description = "Cleared"),
        (status = 500, description = "Store unavailable", body = ErrorServer),
    )
)]
pub async fn clear_session(
    State(server_state): State<Arc<ServerState>>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, ErrorServer> {
    server_state.sessions().clear_state(&session_id).await?;
    info!("Cleared session {}", session_id);
    Ok(StatusCode::NO_CONTENT)
}
