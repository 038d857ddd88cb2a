use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::ai::summarizer::dto::Summary;
use crate::arxiv::dto::Paper;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Retry,
    Pass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowNode {
    Retriever,
    Summarizer,
    Evaluator,
    Compiler,
}

impl fmt::Display for WorkflowNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowNode::Retriever => "retriever",
            WorkflowNode::Summarizer => "summarizer",
            WorkflowNode::Evaluator => "evaluator",
            WorkflowNode::Compiler => "compiler",
        };
        write!(f, "{}", name)
    }
}

/// Everything a run knows, threaded through every stage and persisted per
/// session afterwards. Missing keys default, so an empty stored object is the
/// empty state.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, ToSchema)]
#[serde(default)]
pub struct WorkflowState {
    pub topic: String,
    pub papers: Vec<Paper>,
    pub summaries: Vec<Summary>,
    pub retry_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Route>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report: Option<String>,
}

impl WorkflowState {
    pub fn for_topic(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }
}
