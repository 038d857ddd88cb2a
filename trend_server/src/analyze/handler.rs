use std::sync::Arc;

use axum::extract::{Json, State};
use log::{error, info};
use trend_core::workflow::dto::WorkflowState;

use super::dto::AnalyzeRequest;
use crate::{error::ErrorServer, state::ServerState};

#[utoipa::path(
    post,
    path = "/analyze",
    request_body = AnalyzeRequest,
    description = "Retrieve, summarize and report on papers for a topic",
    responses(
        (status = 200, description = "Resulting workflow state", body = WorkflowState),
        (status = 500, description = "Workflow failed", body = ErrorServer),
    )
)]
#[axum::debug_handler]
pub async fn analyze(
    State(server_state): State<Arc<ServerState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<WorkflowState>, ErrorServer> {
    match run_analysis(&server_state, request).await {
        Ok(state) => Ok(Json(state)),
        Err(e) => {
            error!("Analyze failed: {}", e);
            Err(e)
        }
    }
}

async fn run_analysis(
    server_state: &ServerState,
    request: AnalyzeRequest,
) -> Result<WorkflowState, ErrorServer> {
    let sessions = server_state.sessions();

    let mut state = sessions.get_state(&request.session_id).await?;
    state.topic = request.topic;
    info!(
        "Processing topic '{}' for session {}",
        state.topic, request.session_id
    );

    let workflow = server_state.workflow();
    let result = tokio::spawn(async move { workflow.invoke(state).await }).await??;

    info!(
        "Workflow finished for session {} after {} summarizer passes",
        request.session_id, result.retry_count
    );

    sessions.save_state(&request.session_id, &result).await?;

    Ok(result)
}
