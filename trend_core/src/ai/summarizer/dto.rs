use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, ToSchema)]
pub struct Summary {
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub url: String,
}
