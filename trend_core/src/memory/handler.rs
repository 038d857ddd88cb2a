use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use redis::AsyncCommands;
use redis::aio::MultiplexedConnection;

use crate::error::TrendResult;
use crate::workflow::dto::WorkflowState;

/// Persists the last workflow state of each session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save_state(&self, session_id: &str, state: &WorkflowState) -> TrendResult<()>;

    /// The empty state when nothing is stored under `session_id`.
    async fn get_state(&self, session_id: &str) -> TrendResult<WorkflowState>;

    async fn clear_state(&self, session_id: &str) -> TrendResult<()>;
}

#[derive(Clone)]
pub struct RedisSessionStore {
    connection: MultiplexedConnection,
}

impl RedisSessionStore {
    pub async fn connect(redis_url: &str) -> TrendResult<Self> {
        let client = redis::Client::open(redis_url)?;
        let connection = client.get_multiplexed_async_connection().await?;
        Ok(Self { connection })
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn save_state(&self, session_id: &str, state: &WorkflowState) -> TrendResult<()> {
        let payload = serde_json::to_string(state)?;
        let mut connection = self.connection.clone();
        let _: () = connection.set(session_id, payload).await?;
        debug!("Saved state for session {}", session_id);
        Ok(())
    }

    async fn get_state(&self, session_id: &str) -> TrendResult<WorkflowState> {
        let mut connection = self.connection.clone();
        let payload: Option<String> = connection.get(session_id).await?;
        match payload {
            Some(data) if !data.is_empty() => Ok(serde_json::from_str(&data)?),
            _ => Ok(WorkflowState::default()),
        }
    }

    async fn clear_state(&self, session_id: &str) -> TrendResult<()> {
        let mut connection = self.connection.clone();
        let _: () = connection.del(session_id).await?;
        Ok(())
    }
}

/// Process-local store for running without Redis. States are kept as the
/// same JSON text Redis would hold.
#[derive(Default)]
pub struct InMemorySessionStore {
    states: DashMap<String, String>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn save_state(&self, session_id: &str, state: &WorkflowState) -> TrendResult<()> {
        let payload = serde_json::to_string(state)?;
        self.states.insert(session_id.to_string(), payload);
        Ok(())
    }

    async fn get_state(&self, session_id: &str) -> TrendResult<WorkflowState> {
        let payload = self.states.get(session_id).map(|entry| entry.value().clone());
        match payload {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(WorkflowState::default()),
        }
    }

    async fn clear_state(&self, session_id: &str) -> TrendResult<()> {
        self.states.remove(session_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::summarizer::dto::Summary;
    use crate::arxiv::dto::Paper;
    use crate::workflow::dto::Route;

    fn sample_state() -> WorkflowState {
        WorkflowState {
            topic: "machine learning".to_string(),
            papers: vec![Paper::new("Title", "Abstract.", "http://arxiv.org/abs/1")],
            summaries: vec![Summary {
                title: "Title".to_string(),
                summary: "Summary.".to_string(),
                url: "http://arxiv.org/abs/1".to_string(),
            }],
            retry_count: 3,
            route: Some(Route::Pass),
            report: Some("1. [Title](http://arxiv.org/abs/1)\n\nSummary.\n".to_string()),
        }
    }

    async fn round_trip(store: &dyn SessionStore, session_id: &str) {
        let state = sample_state();

        store.save_state(session_id, &state).await.unwrap();
        assert_eq!(store.get_state(session_id).await.unwrap(), state);

        store.clear_state(session_id).await.unwrap();
        assert_eq!(
            store.get_state(session_id).await.unwrap(),
            WorkflowState::default()
        );
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let store = InMemorySessionStore::new();
        round_trip(&store, "session-a").await;
    }

    #[tokio::test]
    async fn test_in_memory_sessions_are_isolated() {
        let store = InMemorySessionStore::new();
        store.save_state("a", &sample_state()).await.unwrap();

        assert_eq!(store.get_state("b").await.unwrap(), WorkflowState::default());

        store.clear_state("b").await.unwrap();
        assert_eq!(store.get_state("a").await.unwrap(), sample_state());
    }

    #[tokio::test]
    #[ignore] // Requires a running Redis at REDIS_URL
    async fn test_redis_round_trip() {
        let url = std::env::var("REDIS_URL")
            .unwrap_or_else(|_| crate::config::DEFAULT_REDIS_URL.to_string());
        let store = RedisSessionStore::connect(&url).await.unwrap();
        round_trip(&store, "trend-core-test-session").await;
    }
}
