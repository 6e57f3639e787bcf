use std::process::Stdio;

use eyre::{Result, bail};
use log::debug;
use tokio::process::Command;

use crate::collaborator::{SummaryOutput, Summarizer, TranscriptListing, TranscriptService};
use crate::config::CliConfig;
use crate::{SummaryType, parse};

const DEFAULT_PROGRAM: &str = "python3";

/// Collaborators backed by the summarizer command-line program.
///
/// Every call spawns `<program> <args..> <subcommand> ...` and parses stdout.
#[derive(Debug, Clone)]
pub struct CliRunner {
    program: String,
    args: Vec<String>,
}

impl CliRunner {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Config values win; otherwise `PYTHON_EXECUTABLE` and `PYTHON_CLI_PATH`
    pub fn from_config(config: &CliConfig) -> Result<Self> {
        let program = config
            .program
            .clone()
            .or_else(|| std::env::var("PYTHON_EXECUTABLE").ok())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

        let args = if config.args.is_empty() {
            match std::env::var("PYTHON_CLI_PATH") {
                Ok(path) if !path.trim().is_empty() => vec![path],
                _ => bail!("PYTHON_CLI_PATH environment variable is not set (or set [cli] args in the config file)"),
            }
        } else {
            config.args.clone()
        };

        Ok(Self::new(program, args))
    }

    async fn run(&self, command: &str, args: &[&str]) -> Result<String> {
        debug!("Running {} {:?} {command} {args:?}", self.program, self.args);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(command)
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| eyre::eyre!("failed to start {}: {e}", self.program))?;

        if !output.status.success() {
            let code = output
                .status
                .code()
                .map(|c| c.to_string())
                .unwrap_or_else(|| "none".to_string());
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("process exited with code {code}: {}", stderr.trim());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl TranscriptService for CliRunner {
    async fn list_languages(&self, video: &str) -> Result<TranscriptListing> {
        let stdout = self.run("list-transcripts", &[video]).await?;
        Ok(TranscriptListing {
            video_id: parse::video_id(&stdout).unwrap_or_default(),
            transcripts: parse::transcript_list(&stdout),
        })
    }

    async fn fetch_transcript(&self, video: &str, language: &str) -> Result<String> {
        let stdout = self.run("transcript", &[video, "-l", language]).await?;
        Ok(stdout.trim().to_string())
    }
}

impl Summarizer for CliRunner {
    async fn summarize(
        &self,
        video: &str,
        language: &str,
        model: &str,
        summary_type: SummaryType,
    ) -> Result<SummaryOutput> {
        let stdout = self
            .run(
                "summarize",
                &[
                    video,
                    "-l",
                    language,
                    "-m",
                    model,
                    "-t",
                    summary_type.as_str(),
                    "--show-transcript",
                ],
            )
            .await?;
        Ok(parse::summary_output(&stdout))
    }
}
