use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use super::dto::{GenerationOutput, GenerationParameters, GenerationRequest};
use crate::config::ModelConfig;
use crate::error::{TrendError, TrendResult};

/// Single prompt in, single text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> TrendResult<String>;
}

/// Talks to a locally hosted text2text model served over HTTP.
#[derive(Clone)]
pub struct HttpTextGenerator {
    http: Client,
    config: ModelConfig,
}

impl HttpTextGenerator {
    pub fn new(config: ModelConfig, timeout: Duration) -> TrendResult<Self> {
        let http = Client::builder()
            .user_agent("trend-server/0.1")
            .timeout(timeout)
            .build()?;

        Ok(Self { http, config })
    }

    fn build_request(&self, prompt: &str) -> GenerationRequest {
        GenerationRequest {
            model: self.config.name.clone(),
            inputs: prompt.to_string(),
            parameters: GenerationParameters {
                max_length: self.config.max_length,
                num_beams: self.config.num_beams,
            },
        }
    }
}

#[async_trait]
impl TextGenerator for HttpTextGenerator {
    async fn generate(&self, prompt: &str) -> TrendResult<String> {
        debug!(
            "Sending {} prompt characters to {}",
            prompt.len(),
            self.config.name
        );

        let resp = self
            .http
            .post(&self.config.url)
            .json(&self.build_request(prompt))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(TrendError::Upstream {
                service: "model",
                status: status.as_u16(),
            });
        }

        let output: GenerationOutput = resp
            .json()
            .await
            .map_err(|e| TrendError::ModelOutput(e.to_string()))?;

        output
            .into_text()
            .ok_or_else(|| TrendError::ModelOutput("response held no generated text".to_string()))
    }
}
