use std::sync::LazyLock;

use eyre::{Result, bail};
use log::debug;
use regex::Regex;
use serde::Deserialize;

use crate::TranscriptInfo;

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

static BARE_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_-]{11}$").expect("valid regex"));

static URL_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:youtube\.com/watch\?.*v=|youtu\.be/|youtube\.com/embed/|youtube\.com/shorts/)([a-zA-Z0-9_-]{11})")
        .expect("valid regex")
});

#[derive(Debug, Deserialize)]
struct InnerTubePlayerResponse {
    captions: Option<CaptionsData>,
}

#[derive(Debug, Deserialize)]
struct CaptionsData {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

#[derive(Debug, Deserialize)]
struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    base_url: String,
    #[serde(rename = "languageCode")]
    language_code: String,
    name: Option<TrackName>,
    kind: Option<String>,
    #[serde(rename = "isTranslatable", default)]
    is_translatable: bool,
}

#[derive(Debug, Deserialize)]
struct TrackName {
    #[serde(rename = "simpleText")]
    simple_text: Option<String>,
    runs: Option<Vec<TextRun>>,
}

#[derive(Debug, Deserialize)]
struct TextRun {
    text: String,
}

impl CaptionTrack {
    fn display_name(&self) -> String {
        self.name
            .as_ref()
            .and_then(|n| {
                n.simple_text
                    .clone()
                    .or_else(|| n.runs.as_ref().map(|runs| runs.iter().map(|r| r.text.as_str()).collect()))
            })
            .unwrap_or_else(|| self.language_code.clone())
    }

    fn info(&self) -> TranscriptInfo {
        TranscriptInfo {
            language: self.display_name(),
            language_code: self.language_code.clone(),
            is_generated: self.kind.as_deref() == Some("asr"),
            is_translatable: self.is_translatable,
        }
    }
}

/// Extract video ID from various YouTube URL formats.
///
/// Input that matches no known format is passed through trimmed; YouTube is
/// the authority on whether it names a video.
pub fn extract_video_id(input: &str) -> String {
    let input = input.trim();

    if BARE_ID.is_match(input) {
        return input.to_string();
    }

    match URL_ID.captures(input) {
        Some(caps) => caps[1].to_string(),
        None => input.to_string(),
    }
}

/// List caption tracks via the InnerTube API, in the order YouTube reports them
pub async fn list_transcripts(client: &reqwest::Client, video_id: &str) -> Result<Vec<TranscriptInfo>> {
    let tracks = fetch_caption_tracks(client, video_id).await?;
    Ok(tracks.iter().map(CaptionTrack::info).collect())
}

/// Fetch transcript text in exactly `lang`; segments are joined with spaces
pub async fn fetch_transcript(client: &reqwest::Client, video_id: &str, lang: &str) -> Result<String> {
    let tracks = fetch_caption_tracks(client, video_id).await?;

    let Some(track) = tracks.iter().find(|t| t.language_code == lang) else {
        bail!("No transcript found in languages [{lang}] for video: {video_id}");
    };
    debug!("Using caption track: lang={}", track.language_code);

    let caption_xml = client
        .get(&track.base_url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let segments = parse_caption_xml(&caption_xml)?;
    Ok(segments.join(" "))
}

async fn fetch_caption_tracks(client: &reqwest::Client, video_id: &str) -> Result<Vec<CaptionTrack>> {
    // Step 1: Fetch the watch page to get the InnerTube API key
    let watch_url = format!("https://www.youtube.com/watch?v={video_id}");
    debug!("Fetching watch page: {watch_url}");

    let page_html = client
        .get(&watch_url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;

    let api_key = extract_api_key(&page_html)?;
    debug!("Extracted InnerTube API key: {api_key}");

    // Step 2: Call InnerTube player endpoint
    let player_url = format!("https://www.youtube.com/youtubei/v1/player?key={api_key}&prettyPrint=false");

    let body = serde_json::json!({
        "context": {
            "client": {
                "hl": "en",
                "gl": "US",
                "clientName": "WEB",
                "clientVersion": "2.20241126.01.00"
            }
        },
        "videoId": video_id
    });

    let resp: InnerTubePlayerResponse = client
        .post(&player_url)
        .header("User-Agent", USER_AGENT)
        .header("Content-Type", "application/json")
        .json(&body)
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    let tracks = resp
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .and_then(|r| r.caption_tracks)
        .unwrap_or_default();

    if tracks.is_empty() {
        bail!("Transcripts are disabled for video: {video_id}");
    }

    Ok(tracks)
}

fn extract_api_key(html: &str) -> Result<String> {
    let re = Regex::new(r#""INNERTUBE_API_KEY"\s*:\s*"([^"]+)""#)?;
    if let Some(caps) = re.captures(html) {
        return Ok(caps[1].to_string());
    }

    // Fallback: try the newer pattern
    let re2 = Regex::new(r#"innertubeApiKey\s*[=:]\s*"([^"]+)""#)?;
    if let Some(caps) = re2.captures(html) {
        return Ok(caps[1].to_string());
    }

    bail!("could not extract InnerTube API key from watch page");
}

fn parse_caption_xml(xml: &str) -> Result<Vec<String>> {
    use quick_xml::Reader;
    use quick_xml::events::Event;

    let mut reader = Reader::from_str(xml);
    let mut segments = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => in_text = true,
            Ok(Event::End(ref e)) if e.name().as_ref() == b"text" => in_text = false,
            Ok(Event::Text(ref e)) if in_text => {
                let raw_text = e.unescape().unwrap_or_default().to_string();
                let text = html_escape::decode_html_entities(&raw_text).trim().to_string();
                if !text.is_empty() {
                    segments.push(text);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => bail!("error parsing caption XML: {e}"),
            _ => {}
        }
    }

    Ok(segments)
}
