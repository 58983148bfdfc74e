//! LLM Agent Module
//!
//! Wires the SRE chat agent: provider selection, system prompt, and the
//! tools exposed to the model over the tool-calling boundary.

pub mod chatbot;
pub mod provider;
pub mod templates;
pub mod tools;

pub use chatbot::{ChatAgent, ToolType};
pub use provider::{create_provider, LLMProviderType};
pub use tools::ToolError;
