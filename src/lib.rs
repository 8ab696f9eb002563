pub mod app;
pub mod assemble;
pub mod config;
pub mod constants;
pub mod date;
pub mod error;
pub mod extract;
pub mod infra;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod strategy;
pub mod text;
pub mod types;
