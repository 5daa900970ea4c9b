pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
mod context;
pub mod submission;

pub use context::SubmissionContext;
pub use submission::{CancelToken, SubmissionOrchestrator, SubmissionSettings};
