//! Completion model adapters.
//!
//! A thin HTTP implementation of the `CompletionClient` port covering both
//! OpenAI and Azure OpenAI.

mod dto;
mod http_client;

pub use http_client::{CompletionProvider, HttpCompletionClient, SamplingOptions};
