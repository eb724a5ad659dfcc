/*!
 * External command provider.
 *
 * Translates text by feeding it through a chain of processes: the chunk is
 * written to the first stage's stdin and each stage's stdout becomes the next
 * stage's stdin. The last stage's stdout is the translation.
 */

use async_trait::async_trait;
use log::{debug, error};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::app_config::PipelineStage;
use crate::errors::ProviderError;
use crate::providers::{Provider, TextRequest};

/// Client that runs a configured process pipeline
#[derive(Debug, Clone)]
pub struct CommandPipeline {
    stages: Vec<PipelineStage>,
}

impl CommandPipeline {
    pub fn new(stages: Vec<PipelineStage>) -> Self {
        Self { stages }
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    /// Replace language placeholders in a stage's arguments
    pub fn expand_args(stage: &PipelineStage, source_language: &str, target_language: &str) -> Vec<String> {
        stage
            .args
            .iter()
            .map(|arg| {
                arg.replace("{source_language}", source_language)
                    .replace("{target_language}", target_language)
            })
            .collect()
    }

    async fn run_stage(&self, stage: &PipelineStage, args: &[String], input: Vec<u8>) -> Result<Vec<u8>, ProviderError> {
        let mut child = Command::new(&stage.program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| ProviderError::SpawnFailed {
                program: stage.program.clone(),
                message: e.to_string(),
            })?;

        // stdin must be fed while stdout is drained
        let writer = child.stdin.take().map(|mut stdin| {
            tokio::spawn(async move {
                let result = stdin.write_all(&input).await;
                drop(stdin);
                result
            })
        });

        let output = child.wait_with_output().await.map_err(|e| ProviderError::SpawnFailed {
            program: stage.program.clone(),
            message: e.to_string(),
        })?;

        if let Some(writer) = writer {
            match writer.await {
                Ok(Ok(())) => {}
                // The stage may legitimately exit without reading all of its input
                Ok(Err(e)) => debug!("Stage '{}' closed stdin early: {}", stage.program, e),
                Err(e) => debug!("Stdin writer for '{}' did not complete: {}", stage.program, e),
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("Pipeline stage '{}' failed: {}", stage.program, stderr);
            return Err(ProviderError::CommandFailed {
                program: stage.program.clone(),
                status: output
                    .status
                    .code()
                    .map_or_else(|| "terminated by signal".to_string(), |code| code.to_string()),
                stderr,
            });
        }

        Ok(output.stdout)
    }
}

#[async_trait]
impl Provider for CommandPipeline {
    type Request = TextRequest;
    type Response = String;

    async fn complete(&self, request: Self::Request) -> Result<Self::Response, ProviderError> {
        let mut data = request.text.into_bytes();
        for stage in &self.stages {
            let args = Self::expand_args(stage, &request.source_language, &request.target_language);
            debug!("Running pipeline stage: {} {}", stage.program, args.join(" "));
            data = self.run_stage(stage, &args, data).await?;
        }

        String::from_utf8(data)
            .map_err(|e| ProviderError::ParseError(format!("Pipeline produced invalid UTF-8: {}", e)))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        if self.stages.is_empty() {
            return Err(ProviderError::ConnectionError(
                "Command pipeline has no stages".to_string(),
            ));
        }
        Ok(())
    }

    fn extract_text(response: &Self::Response) -> String {
        response.clone()
    }
}
