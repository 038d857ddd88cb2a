pub mod ai;
pub mod arxiv;
pub mod config;
pub mod error;
pub mod memory;
pub mod workflow;
