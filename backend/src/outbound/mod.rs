//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **completion**: OpenAI / Azure OpenAI completions over reqwest
//! - **persistence**: PostgreSQL view access through Diesel
//!
//! Adapters translate between domain types and wire or row formats. They
//! contain no question-answering logic.

pub mod completion;
pub mod persistence;
