//! manasooth-bedrock
//!
//! Prompt rendering, model invocation, and the AI flows built on them:
//! assessment analysis, the support chatbot, and consultation booking.

pub mod analyze;
pub mod chatbot;
pub mod client;
pub mod consultation;
pub mod error;
pub mod extract;
pub mod prompts;

#[cfg(any(test, feature = "testing"))]
pub mod testing;
