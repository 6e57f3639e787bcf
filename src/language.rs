//! Transcript language resolution.
//!
//! Picks the single language code a request is served in, given the caller's
//! preference and the languages the video actually offers.

use crate::{DEFAULT_LANGUAGE, LanguagePreferences, TranscriptInfo};

/// Number of transcript characters handed to the language detector
pub const DETECTION_SAMPLE_CHARS: usize = 500;

/// Languages a video offers, in the order the transcript service reported them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Availability {
    /// Listing failed or was skipped
    Unknown,
    Known(Vec<String>),
}

impl Availability {
    pub fn from_transcripts(transcripts: &[TranscriptInfo]) -> Self {
        Availability::Known(transcripts.iter().map(|t| t.language_code.clone()).collect())
    }

    /// Known and non-empty codes; an empty listing offers nothing to substitute
    pub fn codes(&self) -> Option<&[String]> {
        match self {
            Availability::Known(codes) if !codes.is_empty() => Some(codes),
            _ => None,
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes().is_some_and(|codes| codes.iter().any(|c| c == code))
    }
}

/// Outcome of the base policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Use the caller's primary language as-is
    Preferred(String),
    /// Primary language is not offered; this is the first one that is
    Substituted { requested: String, fallback: String },
}

impl Resolution {
    pub fn code(&self) -> &str {
        match self {
            Resolution::Preferred(code) => code,
            Resolution::Substituted { fallback, .. } => fallback,
        }
    }
}

/// Base resolution policy.
///
/// Unknown availability passes the primary preference through; a primary that
/// is offered wins; otherwise the first offered language is substituted.
pub fn resolve(preferred: &LanguagePreferences, available: &Availability) -> Resolution {
    let primary = preferred.primary();

    match available.codes() {
        None => Resolution::Preferred(primary.to_string()),
        Some(codes) if codes.iter().any(|c| c == primary) => Resolution::Preferred(primary.to_string()),
        Some(codes) => Resolution::Substituted {
            requested: primary.to_string(),
            fallback: codes[0].clone(),
        },
    }
}

/// Final pick of the detection-augmented policy once a detector has spoken.
///
/// `available` must be non-empty. Prefers the detected code, then English,
/// then the first offered language.
pub fn choose_detected(detected: &str, available: &[String]) -> String {
    let detected = detected.trim();
    if available.iter().any(|c| c == detected) {
        return detected.to_string();
    }
    if available.iter().any(|c| c == DEFAULT_LANGUAGE) {
        return DEFAULT_LANGUAGE.to_string();
    }
    available[0].clone()
}

/// First `DETECTION_SAMPLE_CHARS` characters of a transcript
pub fn detection_sample(transcript: &str) -> &str {
    match transcript.char_indices().nth(DETECTION_SAMPLE_CHARS) {
        Some((idx, _)) => &transcript[..idx],
        None => transcript,
    }
}
