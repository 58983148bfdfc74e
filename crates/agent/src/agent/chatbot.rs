//! Chat Agent
//!
//! Interactive agent wiring: attaches the tool set to a rig agent built
//! on the configured provider and drives the conversation with rolling
//! history.

use std::collections::HashMap;

use anyhow::Result;
use rig::agent::AgentBuilder;
use rig::completion::{CompletionModel, Message, Prompt};
use tracing::{debug, info};

use super::provider::{create_provider, LLMProviderType};
use super::templates;
use super::tools::{
    file::{FileListTool, FileReadTool, FileWriteTool},
    prometheus::PrometheusTool,
    search::WebSearchTool,
    shell::ShellTool,
};
use crate::config::Config;

/// Maximum tool-call turns the model may take for a single user message.
const MAX_TOOL_TURNS: usize = 10;

/// Enum to store the different tool types attached to the agent.
#[derive(Clone)]
pub enum ToolType {
    Shell(ShellTool),
    Prometheus(PrometheusTool),
    FileRead(FileReadTool),
    FileWrite(FileWriteTool),
    FileList(FileListTool),
    Search(WebSearchTool),
}

impl From<ShellTool> for ToolType {
    fn from(tool: ShellTool) -> Self {
        ToolType::Shell(tool)
    }
}

impl From<PrometheusTool> for ToolType {
    fn from(tool: PrometheusTool) -> Self {
        ToolType::Prometheus(tool)
    }
}

impl From<FileReadTool> for ToolType {
    fn from(tool: FileReadTool) -> Self {
        ToolType::FileRead(tool)
    }
}

impl From<FileWriteTool> for ToolType {
    fn from(tool: FileWriteTool) -> Self {
        ToolType::FileWrite(tool)
    }
}

impl From<FileListTool> for ToolType {
    fn from(tool: FileListTool) -> Self {
        ToolType::FileList(tool)
    }
}

impl From<WebSearchTool> for ToolType {
    fn from(tool: WebSearchTool) -> Self {
        ToolType::Search(tool)
    }
}

/// Attach every registered tool to a rig agent builder.
fn attach_tools<M: CompletionModel>(
    mut builder: AgentBuilder<M>,
    tools: &HashMap<String, ToolType>,
) -> AgentBuilder<M> {
    for (name, tool) in tools {
        debug!("Adding tool to agent: {}", name);
        builder = match tool {
            ToolType::Shell(tool) => builder.tool(tool.clone()),
            ToolType::Prometheus(tool) => builder.tool(tool.clone()),
            ToolType::FileRead(tool) => builder.tool(tool.clone()),
            ToolType::FileWrite(tool) => builder.tool(tool.clone()),
            ToolType::FileList(tool) => builder.tool(tool.clone()),
            ToolType::Search(tool) => builder.tool(tool.clone()),
        };
    }
    builder
}

/// Interactive SRE chat agent.
pub struct ChatAgent {
    provider: LLMProviderType,
    model: String,
    system_prompt: String,
    tools: HashMap<String, ToolType>,
    history_limit: usize,
}

impl ChatAgent {
    /// Build the agent and its full tool set from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let provider = create_provider(&config.llm)?;

        let mut tools: HashMap<String, ToolType> = HashMap::new();
        tools.insert(
            "run_shell_command".to_string(),
            ShellTool::new(config.tools.shell_tail_lines).into(),
        );
        tools.insert(
            "query_prometheus".to_string(),
            PrometheusTool::new(config.tools.prometheus_url.clone()).into(),
        );
        tools.insert(
            "read_file".to_string(),
            FileReadTool::new(config.tools.files_dir.clone()).into(),
        );
        tools.insert(
            "save_file".to_string(),
            FileWriteTool::new(config.tools.files_dir.clone()).into(),
        );
        tools.insert(
            "list_files".to_string(),
            FileListTool::new(config.tools.files_dir.clone()).into(),
        );
        tools.insert("web_search".to_string(), WebSearchTool::new().into());

        Ok(Self {
            provider,
            model: config.llm.model.clone(),
            system_prompt: templates::build_system_prompt(),
            tools,
            history_limit: config.llm.history_limit,
        })
    }

    /// Send a user message, letting the model call tools as needed. The
    /// exchange is appended to `history`, which is then trimmed to the
    /// configured number of prior exchanges.
    pub async fn chat(&self, content: &str, history: &mut Vec<Message>) -> Result<String> {
        info!("Processing chat message");

        let response = match &self.provider {
            LLMProviderType::Gemini(client) => {
                let builder = client.agent(&self.model).preamble(&self.system_prompt);
                let agent = attach_tools(builder, &self.tools).build();
                agent
                    .prompt(content)
                    .with_history(&mut *history)
                    .multi_turn(MAX_TOOL_TURNS)
                    .await
                    .map_err(|e| anyhow::anyhow!("Chat failed: {:?}", e))?
            }
            LLMProviderType::Anthropic(client) => {
                let builder = client.agent(&self.model).preamble(&self.system_prompt);
                let agent = attach_tools(builder, &self.tools).build();
                agent
                    .prompt(content)
                    .with_history(&mut *history)
                    .multi_turn(MAX_TOOL_TURNS)
                    .await
                    .map_err(|e| anyhow::anyhow!("Chat failed: {:?}", e))?
            }
            LLMProviderType::OpenAI(client) => {
                let builder = client.agent(&self.model).preamble(&self.system_prompt);
                let agent = attach_tools(builder, &self.tools).build();
                agent
                    .prompt(content)
                    .with_history(&mut *history)
                    .multi_turn(MAX_TOOL_TURNS)
                    .await
                    .map_err(|e| anyhow::anyhow!("Chat failed: {:?}", e))?
            }
            LLMProviderType::Mock => {
                format!(
                    "I received your message: '{}'. I'm running in mock mode, \
                     so no model or tools were invoked.",
                    content
                )
            }
        };

        // Keep two messages (user + assistant) per retained exchange
        let max_messages = self.history_limit * 2;
        if history.len() > max_messages {
            let excess = history.len() - max_messages;
            history.drain(..excess);
        }

        Ok(response)
    }

    /// Tool registry, keyed by the name each tool is exposed under.
    pub fn tools(&self) -> &HashMap<String, ToolType> {
        &self.tools
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn mock_config() -> Config {
        let mut config = Config::default();
        config.llm.provider = "mock".to_string();
        config
    }

    #[tokio::test]
    async fn mock_provider_answers_without_model_access() {
        let agent = ChatAgent::from_config(&mock_config()).unwrap();
        let mut history = Vec::new();
        let response = agent.chat("is the cluster healthy?", &mut history).await.unwrap();
        assert!(response.contains("is the cluster healthy?"));
    }

    #[test]
    fn agent_registers_the_full_tool_set() {
        let agent = ChatAgent::from_config(&mock_config()).unwrap();
        for name in [
            "run_shell_command",
            "query_prometheus",
            "read_file",
            "save_file",
            "list_files",
            "web_search",
        ] {
            assert!(agent.tools().contains_key(name), "missing tool: {}", name);
        }
    }
}
