use crate::{analyze, error::ErrorServer, info, session};
use trend_core::{
    ai::summarizer::dto::Summary,
    arxiv::dto::Paper,
    workflow::dto::{Route, WorkflowState},
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        info::handler::info,
        analyze::handler::analyze,
        session::handler::get_session,
        session::handler::clear_session,
    ),
    components(schemas(
        info::dto::Info,
        analyze::dto::AnalyzeRequest,
        WorkflowState,
        Paper,
        Summary,
        Route,
        ErrorServer
    ))
)]
pub struct ApiDoc;
