mod chunk_pipeline;
mod config;
mod execution;
mod resilience;
