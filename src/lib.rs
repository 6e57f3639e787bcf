pub mod cli_backend;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod language;
pub mod orchestrator;
pub mod output;
pub mod parse;
pub mod server;
pub mod summarize;
pub mod youtube;

use serde::{Deserialize, Serialize};

pub use error::{CollaboratorError, ProcessError, Step};
pub use orchestrator::Orchestrator;

pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_MODEL: &str = "gpt-5-chat-latest";

/// One transcript track a video offers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptInfo {
    pub language: String,
    pub language_code: String,
    pub is_generated: bool,
    pub is_translatable: bool,
}

/// Style of summary requested from the LLM
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SummaryType {
    #[default]
    Concise,
    Detailed,
    BulletPoints,
    KeyInsights,
}

impl SummaryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryType::Concise => "concise",
            SummaryType::Detailed => "detailed",
            SummaryType::BulletPoints => "bullet-points",
            SummaryType::KeyInsights => "key-insights",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            SummaryType::Concise => {
                "Provide a concise summary of the following video transcript in 3-5 sentences, capturing the main points:"
            }
            SummaryType::Detailed => {
                "Provide a detailed summary of the following video transcript, including all key points, arguments, and conclusions:"
            }
            SummaryType::BulletPoints => {
                "Summarize the following video transcript as bullet points, highlighting the main topics and key takeaways:"
            }
            SummaryType::KeyInsights => {
                "Extract and explain the key insights and most important information from the following video transcript:"
            }
        }
    }
}

impl std::fmt::Display for SummaryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What a request wants back
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Task {
    #[default]
    Summary,
    TranscriptOnly,
}

/// Ordered language codes, primary first. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguagePreferences(Vec<String>);

impl LanguagePreferences {
    /// Trims entries and drops blanks, falling back to `["en"]`
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let codes: Vec<String> = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if codes.is_empty() {
            Self::default()
        } else {
            Self(codes)
        }
    }

    pub fn primary(&self) -> &str {
        &self.0[0]
    }

    pub fn codes(&self) -> &[String] {
        &self.0
    }
}

impl Default for LanguagePreferences {
    fn default() -> Self {
        Self(vec![DEFAULT_LANGUAGE.to_string()])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingOptions {
    pub languages: LanguagePreferences,
    pub model: String,
    pub summary_type: SummaryType,
    pub show_transcript: bool,
    pub task: Task,
}

impl Default for ProcessingOptions {
    fn default() -> Self {
        Self {
            languages: LanguagePreferences::default(),
            model: DEFAULT_MODEL.to_string(),
            summary_type: SummaryType::default(),
            show_transcript: false,
            task: Task::default(),
        }
    }
}

impl ProcessingOptions {
    /// Options for fetching a transcript without summarizing it
    pub fn transcript_only(languages: LanguagePreferences) -> Self {
        Self {
            languages,
            show_transcript: true,
            task: Task::TranscriptOnly,
            ..Self::default()
        }
    }
}

/// A successfully processed video
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSummary {
    pub video_id: String,
    pub transcript_length: usize,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transcript: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProcessingResult {
    Success(VideoSummary),
    Failure(ProcessError),
}

impl ProcessingResult {
    pub fn is_success(&self) -> bool {
        matches!(self, ProcessingResult::Success(_))
    }

    pub fn error_message(&self) -> Option<String> {
        match self {
            ProcessingResult::Success(_) => None,
            ProcessingResult::Failure(e) => Some(e.to_string()),
        }
    }
}

impl From<Result<VideoSummary, ProcessError>> for ProcessingResult {
    fn from(result: Result<VideoSummary, ProcessError>) -> Self {
        match result {
            Ok(summary) => ProcessingResult::Success(summary),
            Err(e) => ProcessingResult::Failure(e),
        }
    }
}
