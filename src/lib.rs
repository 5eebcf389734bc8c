pub mod alignment;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod genome;
pub mod types;
pub mod utils;

pub use commands::reorder::{reorder_genomes, ReorderOptions, RunSummary};
pub use error::ReorderError;
