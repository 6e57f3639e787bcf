use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use ytsum::SummaryType;
use ytsum::config::Backend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "ytsum",
    about = "YouTube video summarizer",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Collaborator backend (overrides config)
    #[arg(long, value_enum, global = true)]
    pub backend: Option<Backend>,

    /// Use AI language detection when the preferred language is unavailable
    #[arg(long, global = true)]
    pub detect_language: bool,

    /// Show config and resolution details
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize a YouTube video
    Summarize(SummarizeArgs),

    /// Get the transcript only (without summarization)
    Transcript(TranscriptArgs),

    /// List all available transcripts for a video
    List {
        /// YouTube video URL or video ID
        video: String,
    },

    /// Serve the JSON API
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        listen: Option<String>,
    },
}

#[derive(Args)]
pub struct SummarizeArgs {
    /// YouTube video URL or video ID
    pub video: String,

    /// Preferred transcript languages, primary first (e.g. -l en -l de)
    #[arg(short, long = "language")]
    pub languages: Vec<String>,

    /// LLM model for summarization
    #[arg(short, long)]
    pub model: Option<String>,

    /// Type of summary to generate
    #[arg(short = 't', long = "type", value_enum)]
    pub summary_type: Option<SummaryType>,

    /// Include full transcript in output
    #[arg(long)]
    pub show_transcript: bool,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct TranscriptArgs {
    /// YouTube video URL or video ID
    pub video: String,

    /// Preferred transcript languages, primary first
    #[arg(short, long = "language")]
    pub languages: Vec<String>,

    /// Write transcript to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
