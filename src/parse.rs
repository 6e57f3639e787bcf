//! Parsers for the summarizer program's human-readable stdout.
//!
//! The program prints banners of 60 `=` characters between sections:
//!
//! ```text
//! Video ID: dQw4w9WgXcQ
//! Transcript Length: 1500 characters
//!
//! ============================================================
//! SUMMARY (CONCISE):
//! ============================================================
//!
//! ...
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::TranscriptInfo;
use crate::collaborator::SummaryOutput;

static VIDEO_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Video ID: ([^\n]+)").expect("valid regex"));

static TRANSCRIPT_LENGTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Transcript Length: (\d+)").expect("valid regex"));

static SUMMARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SUMMARY[^:]*:\n={60}\n\n([\s\S]*?)(?:\n={60}|$)").expect("valid regex"));

static FULL_TRANSCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"FULL TRANSCRIPT:\n={60}\n\n([\s\S]*?)$").expect("valid regex"));

static ENTRY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+\. Language:").expect("valid regex"));

static ENTRY_LANGUAGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Language: (.+) \(([^()]+)\)\s*$").expect("valid regex"));

/// Video ID line, if the program printed one
pub fn video_id(output: &str) -> Option<String> {
    VIDEO_ID
        .captures(output)
        .map(|caps| caps[1].trim().to_string())
        .filter(|id| !id.is_empty())
}

/// Output of the `summarize` subcommand.
///
/// A missing summary section falls back to the whole output; a missing length
/// line reads as zero.
pub fn summary_output(output: &str) -> SummaryOutput {
    let transcript_length = TRANSCRIPT_LENGTH
        .captures(output)
        .and_then(|caps| caps[1].parse::<usize>().ok())
        .unwrap_or(0);

    let summary = SUMMARY
        .captures(output)
        .map(|caps| caps[1].trim().to_string())
        .unwrap_or_else(|| output.to_string());

    let transcript = FULL_TRANSCRIPT.captures(output).map(|caps| caps[1].trim().to_string());

    SummaryOutput {
        video_id: video_id(output).unwrap_or_default(),
        transcript_length,
        summary,
        transcript,
    }
}

/// Entries of the `list-transcripts` subcommand, in printed order
pub fn transcript_list(output: &str) -> Vec<TranscriptInfo> {
    let mut transcripts = Vec::new();
    let mut current: Option<TranscriptInfo> = None;

    for line in output.lines() {
        if ENTRY.is_match(line) {
            if let Some(done) = current.take() {
                transcripts.push(done);
            }
            let (language, language_code) = match ENTRY_LANGUAGE.captures(line) {
                Some(caps) => (caps[1].trim().to_string(), caps[2].trim().to_string()),
                None => (String::new(), String::new()),
            };
            current = Some(TranscriptInfo {
                language,
                language_code,
                is_generated: false,
                is_translatable: false,
            });
        } else if let Some(entry) = current.as_mut() {
            if line.contains("Auto-generated:") {
                entry.is_generated = line.contains("True");
            }
            if line.contains("Translatable:") {
                entry.is_translatable = line.contains("True");
            }
        }
    }

    transcripts.extend(current);
    transcripts
}
