//! Stockpulse AI crate.
//!
//! A thin client for LLM-generated stock commentary:
//! - [`AnthropicClient`] posts a fixed analysis prompt to the Messages API
//! - [`parse_analysis`] scrapes the semi-structured text reply into a
//!   [`GeneratedAnalysis`], defaulting any field it cannot find
//!
//! The reply format is requested by the prompt but never guaranteed, so the
//! parser is deliberately forgiving: a malformed response yields defaults,
//! never an error.

mod client;
mod error;
mod parser;
mod prompt;
mod traits;

pub use client::{AnthropicClient, ANTHROPIC_VERSION, DEFAULT_MODEL};
pub use error::AiError;
pub use parser::{parse_analysis, GeneratedAnalysis, Sentiment};
pub use prompt::build_analysis_prompt;
pub use traits::CompletionModel;
