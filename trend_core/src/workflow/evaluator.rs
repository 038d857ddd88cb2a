use super::dto::Route;
use crate::ai::summarizer::dto::Summary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityThresholds {
    pub min_sentences: usize,
    pub min_words: usize,
    pub max_retries: u32,
}

impl Default for QualityThresholds {
    fn default() -> Self {
        Self {
            min_sentences: 2,
            min_words: 35,
            max_retries: 5,
        }
    }
}

/// Counts literal periods, not real sentences.
pub fn sentence_count(text: &str) -> usize {
    text.matches('.').count()
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn meets_quality(summary: &Summary, thresholds: &QualityThresholds) -> bool {
    sentence_count(&summary.summary) >= thresholds.min_sentences
        && word_count(&summary.summary) >= thresholds.min_words
}

/// One weak summary sends the whole batch back for another pass, until the
/// retry budget is spent.
pub fn evaluate(summaries: &[Summary], retry_count: u32, thresholds: &QualityThresholds) -> Route {
    let needs_retry = summaries.iter().any(|s| !meets_quality(s, thresholds));

    if needs_retry && retry_count < thresholds.max_retries {
        Route::Retry
    } else {
        Route::Pass
    }
}
