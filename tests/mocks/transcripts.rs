use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ytsum::TranscriptInfo;
use ytsum::collaborator::{TranscriptListing, TranscriptService};

#[derive(Clone, Default)]
pub struct MockTranscripts {
    /// `None` makes listing fail
    pub languages: Option<Vec<TranscriptInfo>>,
    pub texts: HashMap<String, String>,
    /// ID reported back from listing; the input is echoed when unset
    pub video_id: Option<String>,
    pub list_delay: Option<Duration>,
    pub fetch_delay: Option<Duration>,
    pub list_calls: Arc<Mutex<Vec<String>>>,
    pub fetch_calls: Arc<Mutex<Vec<(String, String)>>>,
}

pub fn info(code: &str) -> TranscriptInfo {
    TranscriptInfo {
        language: code.to_uppercase(),
        language_code: code.to_string(),
        is_generated: false,
        is_translatable: true,
    }
}

impl MockTranscripts {
    pub fn with_languages(codes: &[&str]) -> Self {
        Self {
            languages: Some(codes.iter().map(|c| info(c)).collect()),
            ..Self::default()
        }
    }

    pub fn failing_list() -> Self {
        Self::default()
    }

    pub fn text(mut self, code: &str, text: &str) -> Self {
        self.texts.insert(code.to_string(), text.to_string());
        self
    }

    pub fn slow_list(mut self, delay: Duration) -> Self {
        self.list_delay = Some(delay);
        self
    }

    pub fn slow_fetch(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn normalizing(mut self, video_id: &str) -> Self {
        self.video_id = Some(video_id.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.list_calls.lock().unwrap().len() + self.fetch_calls.lock().unwrap().len()
    }
}

impl TranscriptService for MockTranscripts {
    async fn list_languages(&self, video: &str) -> eyre::Result<TranscriptListing> {
        self.list_calls.lock().unwrap().push(video.to_string());
        if let Some(delay) = self.list_delay {
            tokio::time::sleep(delay).await;
        }
        let transcripts = self
            .languages
            .clone()
            .ok_or_else(|| eyre::eyre!("Error listing transcripts: Transcripts are disabled for video: {video}"))?;
        Ok(TranscriptListing {
            video_id: self.video_id.clone().unwrap_or_else(|| video.to_string()),
            transcripts,
        })
    }

    async fn fetch_transcript(&self, video: &str, language: &str) -> eyre::Result<String> {
        self.fetch_calls
            .lock()
            .unwrap()
            .push((video.to_string(), language.to_string()));
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
        self.texts
            .get(language)
            .cloned()
            .ok_or_else(|| eyre::eyre!("No transcript found in languages [{language}] for video: {video}"))
    }
}
