//! Backend relay for the ForestWise assistant
//!
//! Receives chat requests from the frontend, shapes a forestry system prompt
//! around optional user context and species data, forwards the conversation to
//! Gemini, and relays the generated text back. Keeps the API key off the client.

pub mod ai;
pub mod config;
pub mod error;
pub mod function;
pub mod history;
pub mod models;
pub mod prompts;
pub mod relay;
pub mod server;

pub use error::{Error, Result};
