//! Shell Command Tool
//!
//! Runs kubectl and other diagnostic commands in a subprocess and hands
//! the output back to the agent as text.

use super::ToolError;
use rig::completion::ToolDefinition;
use rig::tool::Tool as RigTool;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

/// Run a command line in a subprocess and return the tail of its output.
///
/// The command string is split on single spaces into an argument vector;
/// there is no shell layer, so quoting and escaping are not supported and
/// an argument containing an internal space cannot be represented.
///
/// Nonzero exit returns `"Error: " + stderr`; a spawn failure returns
/// `"Error: " + message`. On success the last `tail` lines of stdout are
/// returned, newline-joined. A single trailing newline counts as a line
/// terminator, not an extra empty line.
pub async fn run_shell_command(command: &str, tail: usize) -> String {
    let mut parts = command.split(' ');
    let program = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    debug!(program = %program, args = ?args, "executing subprocess");

    let output = match Command::new(program).args(&args).output().await {
        Ok(output) => output,
        Err(e) => return format!("Error: {}", e),
    };

    if !output.status.success() {
        return format!("Error: {}", String::from_utf8_lossy(&output.stderr));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stdout = stdout.strip_suffix('\n').unwrap_or(&stdout);
    let lines: Vec<&str> = stdout.split('\n').collect();
    let start = lines.len().saturating_sub(tail);
    lines[start..].join("\n")
}

/// Shell tool exposed to the agent as `run_shell_command`.
#[derive(Clone)]
pub struct ShellTool {
    default_tail: usize,
}

impl ShellTool {
    pub fn new(default_tail: usize) -> Self {
        Self { default_tail }
    }
}

#[derive(Debug, Deserialize)]
pub struct ShellArgs {
    /// The command to run, tokens separated by single spaces.
    pub args: String,
    /// Number of trailing output lines to return.
    pub tail: Option<usize>,
}

impl RigTool for ShellTool {
    const NAME: &'static str = "run_shell_command";

    type Error = ToolError;
    type Args = ShellArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Run a shell command (e.g. kubectl) in a subprocess and return \
                         its output, or an error message prefixed with 'Error: '. \
                         Arguments are split on spaces; there is no shell quoting."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "args": {
                        "type": "string",
                        "description": "The command line to run (e.g. 'kubectl get pods -n default')"
                    },
                    "tail": {
                        "type": "integer",
                        "description": "Number of trailing output lines to return (default 100)"
                    }
                },
                "required": ["args"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let tail = args.tail.unwrap_or(self.default_tail);
        Ok(run_shell_command(&args.args, tail).await)
    }
}
