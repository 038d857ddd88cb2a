pub mod compiler;
pub mod dto;
pub mod evaluator;
pub mod handler;
