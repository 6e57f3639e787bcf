use eyre::Result;

use crate::collaborator::TranscriptListing;
use crate::{SummaryType, VideoSummary};

fn banner() -> String {
    "=".repeat(60)
}

/// Render a summary in the summarizer's classic text layout
pub fn render_summary_text(summary: &VideoSummary, summary_type: SummaryType) -> String {
    let b = banner();
    let mut out = format!(
        "Video ID: {}\nTranscript Length: {} characters\n\n{b}\nSUMMARY ({}):\n{b}\n\n{}\n",
        summary.video_id,
        summary.transcript_length,
        summary_type.as_str().to_uppercase(),
        summary.summary,
    );

    if let Some(ref transcript) = summary.transcript {
        out.push_str(&format!("\n{b}\nFULL TRANSCRIPT:\n{b}\n\n{transcript}\n"));
    }

    out
}

pub fn render_summary_json(summary: &VideoSummary) -> Result<String> {
    Ok(serde_json::to_string_pretty(summary)?)
}

/// Render available transcripts as a numbered list
pub fn render_listing_text(listing: &TranscriptListing) -> String {
    let mut out = format!("\nVideo ID: {}\n\nAvailable Transcripts:\n{}\n", listing.video_id, banner());

    for (i, t) in listing.transcripts.iter().enumerate() {
        out.push_str(&format!(
            "\n{}. Language: {} ({})\n   Auto-generated: {}\n   Translatable: {}\n",
            i + 1,
            t.language,
            t.language_code,
            python_bool(t.is_generated),
            python_bool(t.is_translatable),
        ));
    }

    out
}

fn python_bool(value: bool) -> &'static str {
    if value { "True" } else { "False" }
}
