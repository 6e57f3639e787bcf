//! Video processing pipeline.
//!
//! A request runs list → resolve → (detect) → fetch/summarize, strictly in
//! order. Listing is the only step whose failure is tolerated.

use std::future::Future;
use std::time::Duration;

use log::{debug, info, warn};

use crate::collaborator::{LanguageDetector, NoDetection, Summarizer, TranscriptListing, TranscriptService};
use crate::config::Timeouts;
use crate::error::{CollaboratorError, ProcessError, Step};
use crate::language::{self, Availability, Resolution};
use crate::{ProcessingOptions, ProcessingResult, Task, VideoSummary};

#[derive(Debug)]
pub struct Orchestrator<T, S, D = NoDetection> {
    transcripts: T,
    summarizer: S,
    detector: Option<D>,
    timeouts: Timeouts,
}

impl<T, S> Orchestrator<T, S, NoDetection>
where
    T: TranscriptService + Sync,
    S: Summarizer + Sync,
{
    /// Orchestrator using the base language policy
    pub fn new(transcripts: T, summarizer: S) -> Self {
        Self {
            transcripts,
            summarizer,
            detector: None,
            timeouts: Timeouts::default(),
        }
    }

    /// Switch to the detection-augmented language policy
    pub fn with_detection<D: LanguageDetector + Sync>(self, detector: D) -> Orchestrator<T, S, D> {
        Orchestrator {
            transcripts: self.transcripts,
            summarizer: self.summarizer,
            detector: Some(detector),
            timeouts: self.timeouts,
        }
    }
}

impl<T, S, D> Orchestrator<T, S, D>
where
    T: TranscriptService + Sync,
    S: Summarizer + Sync,
    D: LanguageDetector + Sync,
{
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn detects_language(&self) -> bool {
        self.detector.is_some()
    }

    /// Process one video; every failure comes back as `ProcessingResult::Failure`
    pub async fn process(&self, video: &str, options: &ProcessingOptions) -> ProcessingResult {
        self.try_process(video, options).await.into()
    }

    pub async fn try_process(&self, video: &str, options: &ProcessingOptions) -> Result<VideoSummary, ProcessError> {
        let video = video.trim();
        if video.is_empty() {
            return Err(ProcessError::MissingVideo);
        }

        let available = self.available_languages(video).await;
        let language = self.resolve_language(video, options, &available).await?;

        match options.task {
            Task::Summary => self.summarize(video, &language, options).await,
            Task::TranscriptOnly => self.transcript(video, &language, options).await,
        }
    }

    /// List the transcripts a video offers; listing failure is fatal here
    pub async fn list_transcripts(&self, video: &str) -> Result<TranscriptListing, ProcessError> {
        let video = video.trim();
        if video.is_empty() {
            return Err(ProcessError::MissingVideo);
        }

        let mut listing = call(
            Step::ListLanguages,
            self.timeouts.list(),
            self.transcripts.list_languages(video),
        )
        .await?;

        // collaborator may have normalized a URL into a bare ID
        if listing.video_id.is_empty() {
            listing.video_id = video.to_string();
        }
        Ok(listing)
    }

    async fn available_languages(&self, video: &str) -> Availability {
        match call(
            Step::ListLanguages,
            self.timeouts.list(),
            self.transcripts.list_languages(video),
        )
        .await
        {
            Ok(listing) => {
                debug!("{video}: {} transcript(s) available", listing.transcripts.len());
                Availability::from_transcripts(&listing.transcripts)
            }
            Err(e) => {
                warn!("Failed to list transcripts for {video}, keeping requested language: {e}");
                Availability::Unknown
            }
        }
    }

    async fn resolve_language(
        &self,
        video: &str,
        options: &ProcessingOptions,
        available: &Availability,
    ) -> Result<String, CollaboratorError> {
        match language::resolve(&options.languages, available) {
            Resolution::Preferred(code) => Ok(code),
            Resolution::Substituted { requested, fallback } => match (&self.detector, available.codes()) {
                (Some(detector), Some(codes)) => {
                    let chosen = self.detect(detector, video, codes).await?;
                    info!("Preferred language '{requested}' not available for {video}. Detected '{chosen}'.");
                    Ok(chosen)
                }
                _ => {
                    info!("Preferred language '{requested}' not available for {video}. Using '{fallback}' instead.");
                    Ok(fallback)
                }
            },
        }
    }

    async fn detect(&self, detector: &D, video: &str, codes: &[String]) -> Result<String, CollaboratorError> {
        let sample_text = call(
            Step::FetchTranscript,
            self.timeouts.fetch(),
            self.transcripts.fetch_transcript(video, &codes[0]),
        )
        .await?;
        let sample = language::detection_sample(&sample_text);

        let detected = call(
            Step::DetectLanguage,
            self.timeouts.detect(),
            detector.detect_language(sample),
        )
        .await?;
        debug!("{video}: detected language '{detected}'");

        Ok(language::choose_detected(&detected, codes))
    }

    async fn summarize(
        &self,
        video: &str,
        language: &str,
        options: &ProcessingOptions,
    ) -> Result<VideoSummary, ProcessError> {
        debug!("Summarizing {video} in '{language}' with {} ({})", options.model, options.summary_type);

        let output = call(
            Step::Summarize,
            self.timeouts.summarize(),
            self.summarizer
                .summarize(video, language, &options.model, options.summary_type),
        )
        .await?;

        // collaborator may have normalized a URL into a bare ID
        let video_id = if output.video_id.is_empty() {
            video.to_string()
        } else {
            output.video_id
        };

        Ok(VideoSummary {
            video_id,
            transcript_length: output.transcript_length,
            summary: output.summary,
            transcript: output.transcript.filter(|_| options.show_transcript),
        })
    }

    async fn transcript(
        &self,
        video: &str,
        language: &str,
        options: &ProcessingOptions,
    ) -> Result<VideoSummary, ProcessError> {
        debug!("Fetching transcript for {video} in '{language}'");

        let text = call(
            Step::FetchTranscript,
            self.timeouts.fetch(),
            self.transcripts.fetch_transcript(video, language),
        )
        .await?;

        Ok(VideoSummary {
            video_id: video.to_string(),
            transcript_length: text.chars().count(),
            summary: String::new(),
            transcript: Some(text).filter(|_| options.show_transcript),
        })
    }
}

/// Run one collaborator call under a timeout
async fn call<F, R>(step: Step, timeout: Duration, fut: F) -> Result<R, CollaboratorError>
where
    F: Future<Output = eyre::Result<R>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(report)) => Err(CollaboratorError::failed(step, &report)),
        Err(_) => Err(CollaboratorError::TimedOut { step, after: timeout }),
    }
}
