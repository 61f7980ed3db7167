//! Application layer orchestrating the analysis pipeline.

pub mod services;
