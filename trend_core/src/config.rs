use std::{env, str::FromStr};

use crate::error::{TrendError, TrendResult};

pub const DEFAULT_ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionBackend {
    Redis,
    Memory,
}

impl FromStr for SessionBackend {
    type Err = TrendError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => Err(TrendError::Config(format!(
                "SESSION_BACKEND must be 'redis' or 'memory', got '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    pub url: String,
    pub name: String,
    pub max_length: u32,
    pub num_beams: u32,
}

#[derive(Debug, Clone)]
pub struct TrendConfig {
    pub server_domain: String,
    pub redis_url: String,
    pub session_backend: SessionBackend,
    pub arxiv_api_url: String,
    pub max_results: usize,
    pub model: ModelConfig,
    pub max_retries: u32,
    pub cors_origins: Vec<String>,
    pub http_timeout_secs: u64,
}

impl TrendConfig {
    /// Reads the configuration from the process environment. Call
    /// `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> TrendResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> TrendResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let cors_origins = text(
            "CORS_ORIGINS",
            "http://localhost:3000,http://127.0.0.1:3000",
        )
        .split(',')
        .map(|origin| origin.trim().to_string())
        .filter(|origin| !origin.is_empty())
        .collect();

        Ok(Self {
            server_domain: text("SERVER_DOMAIN", "127.0.0.1:8000"),
            redis_url: text("REDIS_URL", DEFAULT_REDIS_URL),
            session_backend: text("SESSION_BACKEND", "redis").parse()?,
            arxiv_api_url: text("ARXIV_API_URL", DEFAULT_ARXIV_API_URL),
            max_results: parse_var(&lookup, "ARXIV_MAX_RESULTS", 5)?,
            model: ModelConfig {
                url: text("MODEL_URL", "http://localhost:8080/generate"),
                name: text("MODEL_NAME", "google/flan-t5-base"),
                max_length: parse_var(&lookup, "MODEL_MAX_LENGTH", 1024)?,
                num_beams: parse_var(&lookup, "MODEL_NUM_BEAMS", 7)?,
            },
            max_retries: parse_var(&lookup, "MAX_RETRIES", 5)?,
            cors_origins,
            http_timeout_secs: parse_var(&lookup, "HTTP_TIMEOUT_SECS", 120)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> TrendResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| TrendError::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}
