use std::time::Duration;

use thiserror::Error;

/// Collaborator call a failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ListLanguages,
    FetchTranscript,
    DetectLanguage,
    Summarize,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::ListLanguages => write!(f, "listing transcripts"),
            Step::FetchTranscript => write!(f, "fetching transcript"),
            Step::DetectLanguage => write!(f, "detecting language"),
            Step::Summarize => write!(f, "summarizing"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    #[error("{message}")]
    Failed { step: Step, message: String },

    #[error("{step} timed out after {}s", after.as_secs())]
    TimedOut { step: Step, after: Duration },
}

impl CollaboratorError {
    pub fn failed(step: Step, report: &eyre::Report) -> Self {
        CollaboratorError::Failed {
            step,
            message: report.to_string(),
        }
    }

    pub fn step(&self) -> Step {
        match self {
            CollaboratorError::Failed { step, .. } | CollaboratorError::TimedOut { step, .. } => *step,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcessError {
    #[error("Video URL or ID is required")]
    MissingVideo,

    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),
}

impl ProcessError {
    pub fn is_validation(&self) -> bool {
        matches!(self, ProcessError::MissingVideo)
    }
}
