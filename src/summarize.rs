use eyre::{Result, bail};
use log::debug;

use crate::collaborator::{LanguageDetector, SummaryOutput, Summarizer, TranscriptListing, TranscriptService};
use crate::{DEFAULT_LANGUAGE, SummaryType, youtube};

const SUMMARY_SYSTEM_PROMPT: &str =
    "You are a helpful assistant that summarizes video transcripts clearly and accurately.";

const DETECTION_SYSTEM_PROMPT: &str = "You identify the language of text. \
Reply with only the two-letter ISO 639-1 code of the language, for example: en";

/// Collaborators backed by InnerTube captions and an LLM HTTP API
#[derive(Debug, Clone, Default)]
pub struct NativeBackend {
    client: reqwest::Client,
}

impl NativeBackend {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl TranscriptService for NativeBackend {
    async fn list_languages(&self, video: &str) -> Result<TranscriptListing> {
        let video_id = youtube::extract_video_id(video);
        let transcripts = youtube::list_transcripts(&self.client, &video_id).await?;
        Ok(TranscriptListing { video_id, transcripts })
    }

    async fn fetch_transcript(&self, video: &str, language: &str) -> Result<String> {
        let video_id = youtube::extract_video_id(video);
        youtube::fetch_transcript(&self.client, &video_id, language).await
    }
}

impl Summarizer for NativeBackend {
    async fn summarize(
        &self,
        video: &str,
        language: &str,
        model: &str,
        summary_type: SummaryType,
    ) -> Result<SummaryOutput> {
        let video_id = youtube::extract_video_id(video);
        let transcript = youtube::fetch_transcript(&self.client, &video_id, language).await?;
        let summary = summarize_text(&self.client, &transcript, model, summary_type).await?;

        Ok(SummaryOutput {
            video_id,
            transcript_length: transcript.chars().count(),
            summary,
            transcript: Some(transcript),
        })
    }
}

/// Detects transcript language by asking an LLM
#[derive(Debug, Clone)]
pub struct LlmDetector {
    client: reqwest::Client,
    model: String,
}

impl LlmDetector {
    pub fn new(client: reqwest::Client, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }
}

impl LanguageDetector for LlmDetector {
    async fn detect_language(&self, sample: &str) -> Result<String> {
        let reply = complete(&self.client, &self.model, DETECTION_SYSTEM_PROMPT, sample, Some(5)).await?;
        Ok(language_code_from_reply(&reply))
    }
}

/// Two-letter code from a detection reply, `"en"` when the reply is anything else
fn language_code_from_reply(reply: &str) -> String {
    let code = reply.trim().trim_matches(|c: char| !c.is_ascii_alphanumeric()).to_ascii_lowercase();
    if code.len() == 2 && code.chars().all(|c| c.is_ascii_lowercase()) {
        code
    } else {
        DEFAULT_LANGUAGE.to_string()
    }
}

/// Summarize transcript text in the requested style
pub async fn summarize_text(
    client: &reqwest::Client,
    text: &str,
    model: &str,
    summary_type: SummaryType,
) -> Result<String> {
    let user_message = format!("{}\n\n{text}", summary_type.prompt());
    complete(client, model, SUMMARY_SYSTEM_PROMPT, &user_message, None)
        .await
        .map_err(|e| eyre::eyre!("Error generating summary: {e}"))
}

async fn complete(
    client: &reqwest::Client,
    model: &str,
    system: &str,
    user_message: &str,
    max_tokens: Option<u32>,
) -> Result<String> {
    if is_anthropic_model(model) {
        complete_anthropic(client, model, system, user_message, max_tokens).await
    } else {
        complete_openai(client, model, system, user_message, max_tokens).await
    }
}

fn is_anthropic_model(model: &str) -> bool {
    model.starts_with("claude")
}

async fn complete_anthropic(
    client: &reqwest::Client,
    model: &str,
    system: &str,
    user_message: &str,
    max_tokens: Option<u32>,
) -> Result<String> {
    let api_key = std::env::var("ANTHROPIC_API_KEY").map_err(|_| {
        eyre::eyre!("ANTHROPIC_API_KEY environment variable not set (required for Claude summarization)")
    })?;

    debug!("Calling Anthropic API with model {model}");

    let body = serde_json::json!({
        "model": model,
        "max_tokens": max_tokens.unwrap_or(4096),
        "system": system,
        "messages": [
            {
                "role": "user",
                "content": user_message
            }
        ]
    });

    let resp = client
        .post("https://api.anthropic.com/v1/messages")
        .header("x-api-key", &api_key)
        .header("anthropic-version", "2023-06-01")
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("Anthropic API returned {status}: {body}");
    }

    let json: serde_json::Value = resp.json().await?;
    extract_anthropic_text(&json)
}

fn extract_anthropic_text(json: &serde_json::Value) -> Result<String> {
    if let Some(content) = json.get("content").and_then(|c| c.as_array()) {
        let text: String = content
            .iter()
            .filter_map(|block| {
                if block.get("type")?.as_str()? == "text" {
                    block.get("text")?.as_str().map(|s| s.to_string())
                } else {
                    None
                }
            })
            .collect::<Vec<_>>()
            .join("");
        if !text.is_empty() {
            return Ok(text);
        }
    }
    bail!("unexpected Anthropic API response format");
}

async fn complete_openai(
    client: &reqwest::Client,
    model: &str,
    system: &str,
    user_message: &str,
    max_tokens: Option<u32>,
) -> Result<String> {
    let api_key = std::env::var("OPENAI_API_KEY")
        .map_err(|_| eyre::eyre!("OPENAI_API_KEY environment variable not set (required for OpenAI summarization)"))?;

    debug!("Calling OpenAI API with model {model}");

    let mut body = serde_json::json!({
        "model": model,
        "messages": [
            {
                "role": "system",
                "content": system
            },
            {
                "role": "user",
                "content": user_message
            }
        ],
        "temperature": 0.7
    });
    if let Some(max_tokens) = max_tokens {
        body["max_tokens"] = max_tokens.into();
    }

    let resp = client
        .post("https://api.openai.com/v1/chat/completions")
        .bearer_auth(&api_key)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?;

    if !resp.status().is_success() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        bail!("OpenAI API returned {status}: {body}");
    }

    let json: serde_json::Value = resp.json().await?;
    extract_openai_text(&json)
}

fn extract_openai_text(json: &serde_json::Value) -> Result<String> {
    if let Some(text) = json
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|t| t.as_str())
    {
        return Ok(text.to_string());
    }
    bail!("unexpected OpenAI API response format");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_anthropic_model() {
        assert!(is_anthropic_model("claude-sonnet-4-6"));
        assert!(!is_anthropic_model("gpt-5-chat-latest"));
        assert!(!is_anthropic_model("gpt-4o-mini"));
    }

    #[test]
    fn test_extract_anthropic_text() {
        let json = serde_json::json!({
            "content": [
                {"type": "text", "text": "Here is "},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": "the summary."}
            ]
        });
        assert_eq!(extract_anthropic_text(&json).unwrap(), "Here is the summary.");
    }

    #[test]
    fn test_extract_anthropic_text_empty() {
        let json = serde_json::json!({"content": []});
        assert!(extract_anthropic_text(&json).is_err());
    }

    #[test]
    fn test_extract_openai_text() {
        let json = serde_json::json!({
            "choices": [
                {
                    "message": {
                        "role": "assistant",
                        "content": "Summary of the video."
                    }
                }
            ]
        });
        assert_eq!(extract_openai_text(&json).unwrap(), "Summary of the video.");
    }

    #[test]
    fn test_extract_openai_text_empty() {
        let json = serde_json::json!({"choices": []});
        assert!(extract_openai_text(&json).is_err());
    }

    #[test]
    fn test_language_code_from_reply() {
        assert_eq!(language_code_from_reply("de"), "de");
        assert_eq!(language_code_from_reply(" FR.\n"), "fr");
        assert_eq!(language_code_from_reply("\"es\""), "es");
        assert_eq!(language_code_from_reply("The language is Spanish"), "en");
        assert_eq!(language_code_from_reply(""), "en");
    }
}
