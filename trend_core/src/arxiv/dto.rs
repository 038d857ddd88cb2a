use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const NO_TITLE: &str = "No title";
pub const NO_SUMMARY: &str = "No summary";

/// A paper record as returned by the arXiv feed. The abstract travels under
/// the `summary` key, matching the Atom element it is read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Paper {
    pub title: String,
    #[serde(rename = "summary")]
    pub abstract_text: String,
    #[serde(default)]
    pub url: String,
}

impl Paper {
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            abstract_text: abstract_text.into(),
            url: url.into(),
        }
    }
}
