use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Deserialize, Serialize, Debug, ToSchema)]
pub struct AnalyzeRequest {
    pub session_id: String,
    pub topic: String,
}
