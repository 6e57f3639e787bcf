use std::sync::{Arc, Mutex};
use std::time::Duration;

use ytsum::SummaryType;
use ytsum::collaborator::{SummaryOutput, Summarizer};

#[derive(Clone)]
pub struct MockSummarizer {
    pub output: SummaryOutput,
    pub fail_with: Option<String>,
    pub delay: Option<Duration>,
    /// (video, language, model, summary type)
    pub calls: Arc<Mutex<Vec<(String, String, String, SummaryType)>>>,
}

impl MockSummarizer {
    pub fn new(video_id: &str, transcript: &str, summary: &str) -> Self {
        Self {
            output: SummaryOutput {
                video_id: video_id.to_string(),
                transcript_length: transcript.chars().count(),
                summary: summary.to_string(),
                transcript: Some(transcript.to_string()),
            },
            fail_with: None,
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            output: SummaryOutput::default(),
            fail_with: Some(msg.to_string()),
            delay: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn slow(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn languages(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.1.clone()).collect()
    }
}

impl Summarizer for MockSummarizer {
    async fn summarize(
        &self,
        video: &str,
        language: &str,
        model: &str,
        summary_type: SummaryType,
    ) -> eyre::Result<SummaryOutput> {
        self.calls.lock().unwrap().push((
            video.to_string(),
            language.to_string(),
            model.to_string(),
            summary_type,
        ));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(ref msg) = self.fail_with {
            return Err(eyre::eyre!("{}", msg));
        }
        Ok(self.output.clone())
    }
}
