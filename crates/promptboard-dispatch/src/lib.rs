pub mod client;
pub mod runner;
pub mod wire;

pub use client::{ChatClient, CompletionService, DEFAULT_API_BASE};
pub use runner::run_card;
