use std::sync::{Arc, Mutex};

use ytsum::collaborator::LanguageDetector;

#[derive(Clone)]
pub struct MockDetector {
    pub detected: Result<String, String>,
    pub samples: Arc<Mutex<Vec<String>>>,
}

impl MockDetector {
    pub fn new(code: &str) -> Self {
        Self {
            detected: Ok(code.to_string()),
            samples: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            detected: Err(msg.to_string()),
            samples: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl LanguageDetector for MockDetector {
    async fn detect_language(&self, sample: &str) -> eyre::Result<String> {
        self.samples.lock().unwrap().push(sample.to_string());
        self.detected.clone().map_err(|msg| eyre::eyre!("{}", msg))
    }
}
