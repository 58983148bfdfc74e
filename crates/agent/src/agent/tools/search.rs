//! Web Search Tool
//!
//! Looks up error messages and known issues via the DuckDuckGo Instant
//! Answer API.

use super::ToolError;
use reqwest::Client;
use rig::completion::ToolDefinition;
use rig::tool::Tool as RigTool;
use serde::Deserialize;
use serde_json::Value;

const SEARCH_ENDPOINT: &str = "https://api.duckduckgo.com/";
const DEFAULT_MAX_RESULTS: usize = 5;

/// Web search tool exposed to the agent as `web_search`.
#[derive(Clone)]
pub struct WebSearchTool {
    client: Client,
}

impl WebSearchTool {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    async fn search(&self, query: &str, max_results: usize) -> String {
        let response = match self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", query), ("format", "json"), ("no_html", "1")])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return format!("Error: {}", e),
        };

        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => return format!("Error: {}", e),
        };

        format_search_results(&body, max_results)
    }
}

impl Default for WebSearchTool {
    fn default() -> Self {
        Self::new()
    }
}

fn format_search_results(body: &Value, max_results: usize) -> String {
    let mut lines = Vec::new();

    if let Some(abstract_text) = body.get("AbstractText").and_then(Value::as_str) {
        if !abstract_text.is_empty() {
            lines.push(abstract_text.to_string());
        }
    }

    if let Some(topics) = body.get("RelatedTopics").and_then(Value::as_array) {
        for topic in topics {
            if lines.len() >= max_results {
                break;
            }
            let text = topic.get("Text").and_then(Value::as_str).unwrap_or("");
            if text.is_empty() {
                continue;
            }
            match topic.get("FirstURL").and_then(Value::as_str) {
                Some(url) => lines.push(format!("{} ({})", text, url)),
                None => lines.push(text.to_string()),
            }
        }
    }

    if lines.is_empty() {
        "No results found".to_string()
    } else {
        lines.join("\n")
    }
}

#[derive(Debug, Deserialize)]
pub struct WebSearchArgs {
    pub query: String,
    pub max_results: Option<usize>,
}

impl RigTool for WebSearchTool {
    const NAME: &'static str = "web_search";

    type Error = ToolError;
    type Args = WebSearchArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Search the web for documentation and known issues, \
                         e.g. a container exit code or an error message."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query"
                    },
                    "max_results": {
                        "type": "integer",
                        "description": "Maximum number of result lines to return (default 5)"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let max_results = args.max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        Ok(self.search(&args.query, max_results).await)
    }
}
