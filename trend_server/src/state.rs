use std::{sync::Arc, time::Duration};

use trend_core::{
    ai::{handler::HttpTextGenerator, summarizer::handler::SummarizerService},
    arxiv::handler::ArxivClient,
    config::{SessionBackend, TrendConfig},
    error::TrendResult,
    memory::handler::{InMemorySessionStore, RedisSessionStore, SessionStore},
    workflow::handler::TrendWorkflow,
};

#[derive(Clone)]
pub struct ServerState {
    workflow: TrendWorkflow,
    sessions: Arc<dyn SessionStore>,
}

impl From<(TrendWorkflow, Arc<dyn SessionStore>)> for ServerState {
    fn from(states: (TrendWorkflow, Arc<dyn SessionStore>)) -> Self {
        let (workflow, sessions) = states;
        Self { workflow, sessions }
    }
}

impl ServerState {
    pub async fn from_config(config: &TrendConfig) -> TrendResult<Self> {
        let timeout = Duration::from_secs(config.http_timeout_secs);

        let source = Arc::new(ArxivClient::new(&config.arxiv_api_url, timeout)?);
        let generator = Arc::new(HttpTextGenerator::new(config.model.clone(), timeout)?);
        let workflow = TrendWorkflow::new(source, SummarizerService::new(generator))
            .with_max_results(config.max_results)
            .with_max_retries(config.max_retries);

        let sessions: Arc<dyn SessionStore> = match config.session_backend {
            SessionBackend::Redis => Arc::new(RedisSessionStore::connect(&config.redis_url).await?),
            SessionBackend::Memory => Arc::new(InMemorySessionStore::new()),
        };

        Ok(Self::from((workflow, sessions)))
    }

    pub fn workflow(&self) -> TrendWorkflow {
        self.workflow.clone()
    }

    pub fn sessions(&self) -> Arc<dyn SessionStore> {
        self.sessions.clone()
    }
}
