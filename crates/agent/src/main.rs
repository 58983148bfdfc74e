use clap::Parser;
use rig::completion::Message;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use kube_medic_agent::{agent::ChatAgent, config::Config, Error, Result};

/// LLM-powered chat agent for Kubernetes troubleshooting.
#[derive(Parser, Debug)]
#[command(name = "kube-medic", version, about)]
struct Cli {
    /// LLM provider (gemini, anthropic, openai, mock)
    #[arg(long)]
    provider: Option<String>,

    /// Model name for the selected provider
    #[arg(long)]
    model: Option<String>,

    /// Base URL of the Prometheus server
    #[arg(long)]
    prometheus_url: Option<String>,

    /// Directory the file tools read from and write to
    #[arg(long)]
    files_dir: Option<std::path::PathBuf>,

    /// Answer a single prompt and exit instead of starting the chat loop
    #[arg(long)]
    prompt: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    // Load configuration, then apply CLI overrides
    let mut config = Config::load()?;
    if let Some(provider) = cli.provider {
        config.llm.provider = provider;
    }
    if let Some(model) = cli.model {
        config.llm.model = model;
    }
    if let Some(url) = cli.prometheus_url {
        config.tools.prometheus_url = url;
    }
    if let Some(dir) = cli.files_dir {
        config.tools.files_dir = dir;
    }

    info!(
        provider = %config.llm.provider,
        model = %config.llm.model,
        prometheus_url = %config.tools.prometheus_url,
        "starting agent"
    );

    let agent = ChatAgent::from_config(&config).map_err(|e| Error::Agent(e.to_string()))?;
    let mut history: Vec<Message> = Vec::new();

    if let Some(prompt) = cli.prompt {
        let response = agent
            .chat(&prompt, &mut history)
            .await
            .map_err(|e| Error::Agent(e.to_string()))?;
        println!("{}", response);
        return Ok(());
    }

    run_chat_loop(&agent, &mut history).await
}

/// Interactive read-eval-print chat loop on stdin/stdout.
async fn run_chat_loop(agent: &ChatAgent, history: &mut Vec<Message>) -> Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("kube-medic: Kubernetes troubleshooting agent. Type 'exit' to quit.");

    loop {
        stdout.write_all(b"sre> ").await?;
        stdout.flush().await?;

        let line = match lines.next_line().await? {
            Some(line) => line,
            None => break,
        };

        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if message == "exit" || message == "quit" {
            break;
        }

        match agent.chat(message, history).await {
            Ok(response) => println!("\n{}\n", response),
            Err(e) => eprintln!("\nagent error: {}\n", e),
        }
    }

    Ok(())
}
