use log::{debug, info};
use std::sync::Arc;

use super::compiler::compile_report;
use super::dto::{Route, WorkflowNode, WorkflowState};
use super::evaluator::{QualityThresholds, evaluate};
use crate::ai::summarizer::handler::SummarizerService;
use crate::arxiv::handler::PaperSource;
use crate::error::TrendResult;

pub const DEFAULT_MAX_RESULTS: usize = 5;

/// retriever -> summarizer -> evaluator -> (summarizer | compiler)
#[derive(Clone)]
pub struct TrendWorkflow {
    source: Arc<dyn PaperSource>,
    summarizer: SummarizerService,
    thresholds: QualityThresholds,
    max_results: usize,
}

impl TrendWorkflow {
    pub fn new(source: Arc<dyn PaperSource>, summarizer: SummarizerService) -> Self {
        Self {
            source,
            summarizer,
            thresholds: QualityThresholds::default(),
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.thresholds.max_retries = max_retries;
        self
    }

    pub fn thresholds(&self) -> &QualityThresholds {
        &self.thresholds
    }

    /// Runs the graph to completion. `retry_count` and `route` start fresh;
    /// the other fields of `state` are overwritten as the stages reach them.
    pub async fn invoke(&self, mut state: WorkflowState) -> TrendResult<WorkflowState> {
        state.retry_count = 0;
        state.route = None;

        let mut node = WorkflowNode::Retriever;
        loop {
            debug!("Entering {} node", node);
            let (next, updated) = self.step(node, state).await?;
            state = updated;
            match next {
                Some(next) => node = next,
                None => return Ok(state),
            }
        }
    }

    async fn step(
        &self,
        node: WorkflowNode,
        state: WorkflowState,
    ) -> TrendResult<(Option<WorkflowNode>, WorkflowState)> {
        let transition = match node {
            WorkflowNode::Retriever => (
                Some(WorkflowNode::Summarizer),
                self.retrieve_papers(state).await?,
            ),
            WorkflowNode::Summarizer => (
                Some(WorkflowNode::Evaluator),
                self.summarize_papers(state).await,
            ),
            WorkflowNode::Evaluator => {
                let state = self.evaluate_summaries(state);
                let next = match state.route {
                    Some(Route::Retry) => WorkflowNode::Summarizer,
                    _ => WorkflowNode::Compiler,
                };
                (Some(next), state)
            }
            WorkflowNode::Compiler => (None, self.compile_insights(state)),
        };

        Ok(transition)
    }

    pub async fn retrieve_papers(&self, state: WorkflowState) -> TrendResult<WorkflowState> {
        let papers = self.source.fetch(&state.topic, self.max_results).await?;

        info!("Topic: {}", state.topic);
        info!("Retrieved {} papers", papers.len());
        for (i, paper) in papers.iter().enumerate() {
            info!("  {}. {}", i + 1, paper.title);
        }

        Ok(WorkflowState { papers, ..state })
    }

    pub async fn summarize_papers(&self, state: WorkflowState) -> WorkflowState {
        let retry_count = state.retry_count + 1;
        info!("Summarizer pass {}", retry_count);
        info!("Summarizing {} papers", state.papers.len());

        let summaries = self.summarizer.summarize(&state.papers).await;

        WorkflowState {
            summaries,
            retry_count,
            ..state
        }
    }

    pub fn evaluate_summaries(&self, state: WorkflowState) -> WorkflowState {
        info!("Evaluating summaries, retry count {}", state.retry_count);

        let route = evaluate(&state.summaries, state.retry_count, &self.thresholds);
        if route == Route::Retry {
            info!("Summary failed quality check. Retrying...");
        }

        WorkflowState {
            route: Some(route),
            ..state
        }
    }

    pub fn compile_insights(&self, state: WorkflowState) -> WorkflowState {
        let report = compile_report(&state.summaries);
        info!("Final report:\n{}", report);

        WorkflowState {
            report: Some(report),
            ..state
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::handler::TextGenerator;
    use crate::arxiv::dto::Paper;
    use crate::error::{TrendError, TrendResult};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const GOOD: &str = "The authors present a retrieval method for long documents. \
        It improves recall on three public benchmarks by a wide margin over strong baselines. \
        The work shows that careful indexing matters as much as model size for this task.";

    struct FixedSource {
        papers: Vec<Paper>,
        seen: Mutex<Vec<(String, usize)>>,
    }

    #[async_trait]
    impl PaperSource for FixedSource {
        async fn fetch(&self, topic: &str, max_results: usize) -> TrendResult<Vec<Paper>> {
            self.seen
                .lock()
                .unwrap()
                .push((topic.to_string(), max_results));
            Ok(self.papers.iter().take(max_results).cloned().collect())
        }
    }

    struct BrokenSource;

    #[async_trait]
    impl PaperSource for BrokenSource {
        async fn fetch(&self, _topic: &str, _max_results: usize) -> TrendResult<Vec<Paper>> {
            Err(TrendError::Upstream {
                service: "arXiv",
                status: 502,
            })
        }
    }

    /// Returns `reply` for every call and counts them.
    struct CountingGenerator {
        reply: Result<String, String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TextGenerator for CountingGenerator {
        async fn generate(&self, _prompt: &str) -> TrendResult<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone().map_err(TrendError::ModelOutput)
        }
    }

    fn papers(n: usize) -> Vec<Paper> {
        (1..=n)
            .map(|i| {
                let url = if i % 2 == 0 {
                    String::new()
                } else {
                    format!("http://arxiv.org/abs/2501.0000{}", i)
                };
                Paper::new(format!("Paper {}", i), format!("Abstract {}.", i), url)
            })
            .collect()
    }

    fn workflow(
        source: Arc<dyn PaperSource>,
        reply: Result<String, String>,
    ) -> (TrendWorkflow, Arc<CountingGenerator>) {
        let generator = Arc::new(CountingGenerator {
            reply,
            calls: AtomicUsize::new(0),
        });
        let flow = TrendWorkflow::new(source, SummarizerService::new(generator.clone()));
        (flow, generator)
    }

    fn fixed(n: usize) -> Arc<FixedSource> {
        Arc::new(FixedSource {
            papers: papers(n),
            seen: Mutex::new(Vec::new()),
        })
    }

    #[tokio::test]
    async fn test_good_summaries_pass_first_time() {
        let source = fixed(7);
        let (flow, generator) = workflow(source.clone(), Ok(GOOD.to_string()));

        let state = flow
            .invoke(WorkflowState::for_topic("machine learning"))
            .await
            .unwrap();

        assert_eq!(
            source.seen.lock().unwrap().as_slice(),
            &[("machine learning".to_string(), 5)]
        );
        assert_eq!(state.papers.len(), 5);
        assert_eq!(state.summaries.len(), state.papers.len());
        assert_eq!(state.retry_count, 1);
        assert_eq!(state.route, Some(Route::Pass));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 5);

        let report = state.report.unwrap();
        assert!(report.starts_with("1. [Paper 1](http://arxiv.org/abs/2501.00001)\n\n"));
        assert!(report.contains("\n2. Paper 2\n\n"));
        assert!(report.contains("5. [Paper 5](http://arxiv.org/abs/2501.00005)"));
        let first = report.find("1. [Paper 1]").unwrap();
        let last = report.find("5. [Paper 5]").unwrap();
        assert!(first < last);
    }

    #[tokio::test]
    async fn test_poor_summaries_retry_until_cap() {
        let (flow, generator) = workflow(fixed(3), Ok("Too short.".to_string()));

        let state = flow.invoke(WorkflowState::for_topic("graphs")).await.unwrap();

        assert_eq!(state.retry_count, 5);
        assert_eq!(state.route, Some(Route::Pass));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 15);
        assert_eq!(state.summaries.len(), 3);
        assert!(state.report.unwrap().contains("Too short."));
    }

    #[tokio::test]
    async fn test_model_failure_falls_back_to_abstracts() {
        let (flow, _) = workflow(fixed(2), Err("out of memory".to_string()));

        let state = flow.invoke(WorkflowState::for_topic("graphs")).await.unwrap();

        assert_eq!(state.summaries.len(), 2);
        assert_eq!(state.summaries[0].summary, "Abstract 1.");
        assert_eq!(state.summaries[1].summary, "Abstract 2.");
        // abstracts are too short to pass, so the cap ends the run
        assert_eq!(state.retry_count, 5);
    }

    #[tokio::test]
    async fn test_no_papers_yields_fallback_report() {
        let (flow, generator) = workflow(fixed(0), Ok(GOOD.to_string()));

        let state = flow.invoke(WorkflowState::for_topic("nothing")).await.unwrap();

        assert!(state.papers.is_empty());
        assert!(state.summaries.is_empty());
        assert_eq!(state.retry_count, 1);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            state.report.as_deref(),
            Some("No summaries found. Try a different topic.")
        );
    }

    #[tokio::test]
    async fn test_prior_state_is_refreshed() {
        let (flow, _) = workflow(fixed(1), Ok(GOOD.to_string()));
        let prior = WorkflowState {
            topic: "new topic".to_string(),
            papers: papers(4),
            summaries: vec![],
            retry_count: 5,
            route: Some(Route::Retry),
            report: Some("old report".to_string()),
        };

        let state = flow.invoke(prior).await.unwrap();

        assert_eq!(state.topic, "new topic");
        assert_eq!(state.papers.len(), 1);
        assert_eq!(state.retry_count, 1);
        assert_ne!(state.report.as_deref(), Some("old report"));
    }

    #[tokio::test]
    async fn test_custom_retry_cap() {
        let (flow, generator) = workflow(fixed(1), Ok("bad".to_string()));
        let flow = flow.with_max_retries(2).with_max_results(1);

        let state = flow.invoke(WorkflowState::for_topic("t")).await.unwrap();

        assert_eq!(state.retry_count, 2);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_feed_error_aborts_run() {
        let (flow, generator) = workflow(Arc::new(BrokenSource), Ok(GOOD.to_string()));

        let result = flow.invoke(WorkflowState::for_topic("t")).await;

        assert!(matches!(result, Err(TrendError::Upstream { status: 502, .. })));
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }
}
