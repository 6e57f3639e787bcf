use std::future::Future;

use eyre::Result;

use crate::{SummaryType, TranscriptInfo};

/// Transcripts a video offers, as reported by the transcript service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptListing {
    /// Video ID as normalized by the collaborator; empty if it reported none
    pub video_id: String,
    pub transcripts: Vec<TranscriptInfo>,
}

/// Lists and fetches transcripts for a video
pub trait TranscriptService {
    fn list_languages(&self, video: &str) -> impl Future<Output = Result<TranscriptListing>> + Send;

    fn fetch_transcript(&self, video: &str, language: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Guesses the language of a text sample
pub trait LanguageDetector {
    fn detect_language(&self, sample: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Output of a combined fetch + summarize call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryOutput {
    /// Video ID as normalized by the collaborator; empty if it reported none
    pub video_id: String,
    pub transcript_length: usize,
    pub summary: String,
    pub transcript: Option<String>,
}

/// Fetches a transcript and summarizes it in one call
pub trait Summarizer {
    fn summarize(
        &self,
        video: &str,
        language: &str,
        model: &str,
        summary_type: SummaryType,
    ) -> impl Future<Output = Result<SummaryOutput>> + Send;
}

/// Stand-in detector for orchestrators built without language detection
#[derive(Debug, Clone, Copy)]
pub enum NoDetection {}

impl LanguageDetector for NoDetection {
    async fn detect_language(&self, _sample: &str) -> Result<String> {
        match *self {}
    }
}
