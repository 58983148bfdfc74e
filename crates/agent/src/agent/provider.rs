//! LLM Provider Selection
//!
//! Picks a rig provider client from configuration. The original system
//! runs on Gemini, so that is the default; a mock provider is available
//! for offline runs and tests.

use anyhow::Result;
use rig::providers::{anthropic, gemini, openai};

use crate::config::LlmConfig;

/// Provider clients the chat agent can be built on.
pub enum LLMProviderType {
    Gemini(gemini::Client),
    Anthropic(anthropic::Client),
    OpenAI(openai::Client),
    Mock,
}

/// Create a provider from configuration. When no API key is configured,
/// each client falls back to its own environment variable (GEMINI_API_KEY,
/// ANTHROPIC_API_KEY, OPENAI_API_KEY).
pub fn create_provider(config: &LlmConfig) -> Result<LLMProviderType> {
    match config.provider.as_str() {
        "gemini" | "google" => {
            let client = if let Some(key) = &config.api_key {
                gemini::Client::new(key)
            } else {
                gemini::Client::from_env()
            };
            Ok(LLMProviderType::Gemini(client))
        }
        "anthropic" | "claude" => {
            let client = if let Some(key) = &config.api_key {
                anthropic::Client::new(
                    key,
                    "https://api.anthropic.com",
                    None,
                    anthropic::ANTHROPIC_VERSION_LATEST,
                )
            } else {
                anthropic::Client::from_env()
            };
            Ok(LLMProviderType::Anthropic(client))
        }
        "openai" => {
            let client = if let Some(key) = &config.api_key {
                openai::Client::new(key)
            } else {
                openai::Client::from_env()
            };
            Ok(LLMProviderType::OpenAI(client))
        }
        "mock" => Ok(LLMProviderType::Mock),
        other => Err(anyhow::anyhow!("Unknown LLM provider: {}", other)),
    }
}
