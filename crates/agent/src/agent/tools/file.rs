//! File Tools
//!
//! Read, save, and list files under a configured base directory so the
//! agent can stash forensic bundles and review manifests between turns.

use super::ToolError;
use rig::completion::ToolDefinition;
use rig::tool::Tool as RigTool;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Clone)]
pub struct FileReadTool {
    base_dir: PathBuf,
}

impl FileReadTool {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

#[derive(Debug, Deserialize)]
pub struct FileReadArgs {
    pub file_name: String,
}

impl RigTool for FileReadTool {
    const NAME: &'static str = "read_file";

    type Error = ToolError;
    type Args = FileReadArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Read a file from the working directory and return its contents."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "file_name": {
                        "type": "string",
                        "description": "Name of the file to read, relative to the working directory"
                    }
                },
                "required": ["file_name"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let path = self.base_dir.join(&args.file_name);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(contents),
            Err(e) => Ok(format!("Error reading file {}: {}", path.display(), e)),
        }
    }
}

#[derive(Clone)]
pub struct FileWriteTool {
    base_dir: PathBuf,
}

impl FileWriteTool {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

#[derive(Debug, Deserialize)]
pub struct FileWriteArgs {
    pub file_name: String,
    pub contents: String,
}

impl RigTool for FileWriteTool {
    const NAME: &'static str = "save_file";

    type Error = ToolError;
    type Args = FileWriteArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "Save text to a file in the working directory, \
                         creating or overwriting it."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {
                    "file_name": {
                        "type": "string",
                        "description": "Name of the file to write, relative to the working directory"
                    },
                    "contents": {
                        "type": "string",
                        "description": "Text to write"
                    }
                },
                "required": ["file_name", "contents"]
            }),
        }
    }

    async fn call(&self, args: Self::Args) -> Result<Self::Output, Self::Error> {
        let path = self.base_dir.join(&args.file_name);
        match tokio::fs::write(&path, &args.contents).await {
            Ok(()) => Ok(format!("Saved {}", path.display())),
            Err(e) => Ok(format!("Error saving file {}: {}", path.display(), e)),
        }
    }
}

#[derive(Clone)]
pub struct FileListTool {
    base_dir: PathBuf,
}

impl FileListTool {
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }
}

#[derive(Debug, Deserialize)]
pub struct FileListArgs {}

impl RigTool for FileListTool {
    const NAME: &'static str = "list_files";

    type Error = ToolError;
    type Args = FileListArgs;
    type Output = String;

    async fn definition(&self, _prompt: String) -> ToolDefinition {
        ToolDefinition {
            name: Self::NAME.to_string(),
            description: "List the files in the working directory, one name per line."
                .to_string(),
            parameters: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn call(&self, _args: Self::Args) -> Result<Self::Output, Self::Error> {
        let mut entries = match tokio::fs::read_dir(&self.base_dir).await {
            Ok(entries) => entries,
            Err(e) => {
                return Ok(format!(
                    "Error listing files in {}: {}",
                    self.base_dir.display(),
                    e
                ))
            }
        };

        let mut names = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => names.push(entry.file_name().to_string_lossy().to_string()),
                Ok(None) => break,
                Err(e) => {
                    return Ok(format!(
                        "Error listing files in {}: {}",
                        self.base_dir.display(),
                        e
                    ))
                }
            }
        }

        names.sort();
        Ok(names.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("kube-medic-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn save_then_read_round_trips() {
        let dir = scratch_dir("rw");
        let write = FileWriteTool::new(dir.clone());
        let read = FileReadTool::new(dir);

        let saved = write
            .call(FileWriteArgs {
                file_name: "notes.txt".to_string(),
                contents: "pod OOMKilled at 12:03 UTC".to_string(),
            })
            .await
            .unwrap();
        assert!(saved.starts_with("Saved "));

        let contents = read
            .call(FileReadArgs {
                file_name: "notes.txt".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(contents, "pod OOMKilled at 12:03 UTC");
    }

    #[tokio::test]
    async fn reading_missing_file_returns_error_string() {
        let read = FileReadTool::new(scratch_dir("missing"));
        let result = read
            .call(FileReadArgs {
                file_name: "nope.yaml".to_string(),
            })
            .await
            .unwrap();
        assert!(result.starts_with("Error reading file "), "got: {}", result);
    }

    #[tokio::test]
    async fn list_returns_sorted_names() {
        let dir = scratch_dir("list");
        std::fs::write(dir.join("b.yaml"), "b").unwrap();
        std::fs::write(dir.join("a.yaml"), "a").unwrap();

        let list = FileListTool::new(dir);
        let result = list.call(FileListArgs {}).await.unwrap();
        assert_eq!(result, "a.yaml\nb.yaml");
    }
}
