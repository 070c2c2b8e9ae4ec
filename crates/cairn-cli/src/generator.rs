//! Text-generation collaborators backed by an external command.

use std::{fmt::Write as _, process::Stdio, time::Duration};

use async_trait::async_trait;
use cairn_core::{error::BoxError, CodeGenerator, PlanContext, Task, TaskGenerator};
use log::debug;
use thiserror::Error;
use tokio::{io::AsyncWriteExt, process::Command, time::timeout};

use crate::config::GeneratorConfig;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Generator timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to run generator '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generator failed with exit code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

/// Runs a command per request, writing the prompt to its stdin and reading
/// the response from its stdout.
///
/// The plan context is passed as `CAIRN_PROJECT_TYPE`, `CAIRN_FRAMEWORK` and
/// `CAIRN_COMPLEXITY` environment variables when set.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    command: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandGenerator {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            command: config.command.clone(),
            args: config.args.clone(),
            timeout: config.timeout(),
        }
    }

    async fn run(&self, prompt: &str, context: &PlanContext) -> Result<String, GeneratorError> {
        let mut cmd = Command::new(&self.command);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        for (name, value) in [
            ("CAIRN_PROJECT_TYPE", &context.project_type),
            ("CAIRN_FRAMEWORK", &context.framework),
            ("CAIRN_COMPLEXITY", &context.complexity),
        ] {
            if let Some(value) = value {
                cmd.env(name, value);
            }
        }

        debug!("Running generator {} {:?}", self.command, self.args);
        let mut child = cmd.spawn().map_err(|source| GeneratorError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        // Stdout must be drained while the prompt is still being written
        let writer = child.stdin.take().map(|mut stdin| {
            let prompt = prompt.as_bytes().to_vec();
            tokio::spawn(async move { stdin.write_all(&prompt).await })
        });

        let output = timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| GeneratorError::Timeout(self.timeout))??;

        if let Some(writer) = writer {
            if let Ok(Err(e)) = writer.await {
                debug!("Generator did not read the whole prompt: {e}");
            }
        }

        if !output.status.success() {
            return Err(GeneratorError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl TaskGenerator for CommandGenerator {
    async fn generate(&self, prompt: &str, context: &PlanContext) -> Result<String, BoxError> {
        Ok(self.run(prompt, context).await?)
    }
}

#[async_trait]
impl CodeGenerator for CommandGenerator {
    async fn generate_code(&self, task: &Task, context: &PlanContext) -> Result<String, BoxError> {
        Ok(self.run(&code_prompt(task), context).await?)
    }
}

fn code_prompt(task: &Task) -> String {
    let mut prompt = format!("Write the code for this task.\n\n## Task\n\n{}\n", task.title);
    if !task.description.is_empty() {
        let _ = writeln!(prompt, "\n{}", task.description);
    }
    if !task.files.is_empty() {
        prompt.push_str("\n## Files\n\n");
        for file in &task.files {
            let _ = writeln!(prompt, "- {file}");
        }
    }
    prompt.push_str("\nRespond with code only.\n");
    prompt
}
