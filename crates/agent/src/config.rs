use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// LLM provider settings for the chat agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: Option<String>,
    /// Number of prior exchanges kept in the rolling chat history.
    pub history_limit: usize,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "gemini".to_string(),
            model: "gemini-2.0-flash".to_string(),
            api_key: None,
            history_limit: 10,
        }
    }
}

/// Defaults for the locally-implemented tools. These replace the
/// hardcoded endpoint and tail-length literals so tests can point the
/// tools at mock endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsConfig {
    pub prometheus_url: String,
    pub shell_tail_lines: usize,
    pub files_dir: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            prometheus_url: "http://localhost:9090".to_string(),
            shell_tail_lines: 100,
            files_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub llm: LlmConfig,
    pub tools: ToolsConfig,
}

impl Config {
    pub fn load() -> crate::Result<Self> {
        // Load environment variables from .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Config {
            llm: LlmConfig {
                provider: std::env::var("LLM_PROVIDER")
                    .unwrap_or_else(|_| "gemini".to_string())
                    .to_lowercase(),
                model: std::env::var("LLM_MODEL")
                    .unwrap_or_else(|_| "gemini-2.0-flash".to_string()),
                api_key: std::env::var("LLM_API_KEY").ok(),
                history_limit: std::env::var("HISTORY_LIMIT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            },
            tools: ToolsConfig {
                prometheus_url: std::env::var("PROMETHEUS_URL")
                    .unwrap_or_else(|_| "http://localhost:9090".to_string()),
                shell_tail_lines: std::env::var("SHELL_TAIL_LINES")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(100),
                files_dir: std::env::var("FILES_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|_| PathBuf::from(".")),
            },
        };

        if config.llm.api_key.is_none() && config.llm.provider != "mock" {
            tracing::warn!(
                "LLM_API_KEY is not set. Falling back to the provider's own env var."
            );
        }

        Ok(config)
    }
}
