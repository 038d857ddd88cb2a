use redis::RedisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrendError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Upstream {service} returned HTTP {status}")]
    Upstream { service: &'static str, status: u16 },
    #[error("Model output error: {0}")]
    ModelOutput(String),
    #[error("Redis error: {0}")]
    Redis(#[from] RedisError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type TrendResult<T> = Result<T, TrendError>;
