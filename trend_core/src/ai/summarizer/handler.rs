use log::{info, warn};
use std::sync::Arc;

use super::dto::Summary;
use super::helpers::{build_summarization_prompt, classify_generation};
use crate::ai::dto::InferenceOutcome;
use crate::ai::handler::TextGenerator;
use crate::arxiv::dto::Paper;

#[derive(Clone)]
pub struct SummarizerService {
    generator: Arc<dyn TextGenerator>,
}

impl SummarizerService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// One model call per paper, in order. Never fails: a paper whose call
    /// fails keeps its abstract as the summary.
    pub async fn summarize(&self, papers: &[Paper]) -> Vec<Summary> {
        let mut summaries = Vec::with_capacity(papers.len());

        for paper in papers {
            let prompt = build_summarization_prompt(&paper.abstract_text);
            let outcome = classify_generation(self.generator.generate(&prompt).await);

            match &outcome {
                InferenceOutcome::Generated(text) => {
                    info!("Summary for '{}': {}", paper.title, text);
                }
                InferenceOutcome::Failed(reason) => {
                    warn!(
                        "Model error for '{}', keeping abstract: {}",
                        paper.title, reason
                    );
                }
            }

            summaries.push(Summary {
                title: paper.title.clone(),
                summary: outcome.resolve(&paper.abstract_text),
                url: paper.url.clone(),
            });
        }

        summaries
    }
}
