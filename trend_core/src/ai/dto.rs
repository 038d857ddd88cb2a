use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone)]
pub struct GenerationParameters {
    pub max_length: u32,
    pub num_beams: u32,
}

#[derive(Serialize, Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub inputs: String,
    pub parameters: GenerationParameters,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// What the inference endpoint sends back. Text2text pipelines wrap the
/// output as `[{"generated_text": ...}]`, simpler servers return the bare
/// string.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum GenerationOutput {
    Raw(String),
    Single(GeneratedText),
    Batch(Vec<GeneratedText>),
}

impl GenerationOutput {
    pub fn into_text(self) -> Option<String> {
        match self {
            GenerationOutput::Raw(text) => Some(text),
            GenerationOutput::Single(generated) => Some(generated.generated_text),
            GenerationOutput::Batch(batch) => batch.into_iter().next().map(|g| g.generated_text),
        }
    }
}

/// Result of a single model call, resolved to display text at the edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InferenceOutcome {
    Generated(String),
    Failed(String),
}

impl InferenceOutcome {
    pub fn resolve(self, fallback: &str) -> String {
        match self {
            InferenceOutcome::Generated(text) => text,
            InferenceOutcome::Failed(_) => fallback.to_string(),
        }
    }
}
