use std::path::{Path, PathBuf};
use std::process::Command as Process;

use eyre::Result;
use log::{debug, info, warn};

mod cli;

use cli::{Cli, Command, OutputFormat};
use ytsum::Orchestrator;
use ytsum::cli_backend::CliRunner;
use ytsum::collaborator::{LanguageDetector, Summarizer, TranscriptService};
use ytsum::config::{Backend, Config, Defaults, Overrides};
use ytsum::summarize::{LlmDetector, NativeBackend};

const DEFAULT_LISTEN: &str = "127.0.0.1:3000";

fn setup_logging() -> Result<()> {
    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir)?;
    let log_file = log_dir.join("ytsum.log");

    let target = Box::new(std::fs::OpenOptions::new().create(true).append(true).open(&log_file)?);

    env_logger::Builder::from_default_env()
        .target(env_logger::Target::Pipe(target))
        .init();

    info!("Logging initialized: {}", log_file.display());
    Ok(())
}

fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("ytsum")
        .join("logs")
}

fn tool_version(name: &str) -> Option<String> {
    Process::new(name)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| {
            // python2 and some shims print the version on stderr
            let text = if o.stdout.is_empty() { o.stderr } else { o.stdout };
            String::from_utf8_lossy(&text)
                .trim()
                .lines()
                .next()
                .unwrap_or("")
                .to_string()
        })
}

fn build_after_help() -> String {
    let python = std::env::var("PYTHON_EXECUTABLE").unwrap_or_else(|_| "python3".to_string());

    let python_line = match tool_version(&python) {
        Some(v) => format!("  \x1b[32m✅\x1b[0m {python:<10} {v}"),
        None => format!("  \x1b[31m❌\x1b[0m {python:<10} (not found — needed for --backend cli)"),
    };

    let script_line = match std::env::var("PYTHON_CLI_PATH") {
        Ok(path) if Path::new(&path).exists() => format!("  \x1b[32m✅\x1b[0m summarizer {path}"),
        _ => "  \x1b[31m❌\x1b[0m summarizer (PYTHON_CLI_PATH not set — needed for --backend cli)".to_string(),
    };

    let log_path = log_dir().join("ytsum.log");

    format!(
        "\nREQUIRED TOOLS:\n{python_line}\n{script_line}\n\nConfig is read from: {}\nLogs are written to: {}",
        ytsum::config::config_path().display(),
        log_path.display()
    )
}

fn write_or_print(path: Option<&Path>, rendered: &str, verbose: bool) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered)?;
            if verbose {
                eprintln!("Output written to: {}", path.display());
            }
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

async fn run<T, S, D>(
    cli: Cli,
    orchestrator: Orchestrator<T, S, D>,
    defaults: Defaults,
    listen: String,
) -> Result<()>
where
    T: TranscriptService + Send + Sync + 'static,
    S: Summarizer + Send + Sync + 'static,
    D: LanguageDetector + Send + Sync + 'static,
{
    let verbose = cli.verbose;

    match cli.command {
        Command::Summarize(args) => {
            let options = defaults.options(Overrides {
                languages: args.languages,
                model: args.model,
                summary_type: args.summary_type,
                show_transcript: args.show_transcript,
            });

            if verbose {
                eprintln!("Processing video: {}", args.video);
                eprintln!("Using model: {}", options.model);
                eprintln!("Preferred languages: {}", options.languages.codes().join(", "));
            }

            let summary = orchestrator.try_process(&args.video, &options).await?;

            let rendered = match args.format {
                OutputFormat::Text => ytsum::output::render_summary_text(&summary, options.summary_type),
                OutputFormat::Json => ytsum::output::render_summary_json(&summary)?,
            };
            write_or_print(args.output.as_deref(), &rendered, verbose)?;

            if verbose {
                eprintln!("\n✓ Summary generated successfully!");
            }
        }
        Command::Transcript(args) => {
            let options = defaults.transcript_options(args.languages);
            if verbose {
                eprintln!("Fetching transcript for video: {}", args.video);
            }

            let summary = orchestrator.try_process(&args.video, &options).await?;
            let text = summary.transcript.unwrap_or_default();
            write_or_print(args.output.as_deref(), text.trim(), verbose)?;
        }
        Command::List { video } => {
            let listing = orchestrator.list_transcripts(&video).await?;
            println!("{}", ytsum::output::render_listing_text(&listing));
        }
        Command::Serve { listen: flag } => {
            let listen = flag.unwrap_or(listen);
            if verbose {
                eprintln!("Listening on {listen}");
            }
            ytsum::server::serve(&listen, orchestrator, defaults).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging()?;

    let after_help = build_after_help();
    let cmd = <Cli as clap::CommandFactory>::command().after_help(after_help);
    let matches = cmd.get_matches();
    let cli = <Cli as clap::FromArgMatches>::from_arg_matches(&matches)?;

    // Load config file (non-fatal if missing/invalid)
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            warn!("Ignoring config file, using defaults: {e}");
            eprintln!("Warning: ignoring config file: {e}");
            Config::default()
        }
    };

    // CLI flags take priority over config
    let backend = cli.backend.or(config.backend).unwrap_or_default();
    let detect_language = cli.detect_language || config.detect_language;
    let listen = config.listen.clone().unwrap_or_else(|| DEFAULT_LISTEN.to_string());

    if cli.verbose {
        let config_path = ytsum::config::config_path();
        if config_path.exists() {
            eprintln!("Config: {}", config_path.display());
        }
        eprintln!("Backend: {backend:?}, language detection: {detect_language}");
    }
    debug!("Backend {backend:?}, detect_language={detect_language}, defaults={:?}", config.defaults);

    let client = reqwest::Client::new();
    let detector_model = config.defaults.model.clone();

    match backend {
        Backend::Native => {
            let native = NativeBackend::new(client.clone());
            let orchestrator = Orchestrator::new(native.clone(), native).with_timeouts(config.timeouts);
            if detect_language {
                let orchestrator = orchestrator.with_detection(LlmDetector::new(client, detector_model));
                run(cli, orchestrator, config.defaults, listen).await
            } else {
                run(cli, orchestrator, config.defaults, listen).await
            }
        }
        Backend::Cli => {
            let runner = CliRunner::from_config(&config.cli)?;
            let orchestrator = Orchestrator::new(runner.clone(), runner).with_timeouts(config.timeouts);
            if detect_language {
                let orchestrator = orchestrator.with_detection(LlmDetector::new(client, detector_model));
                run(cli, orchestrator, config.defaults, listen).await
            } else {
                run(cli, orchestrator, config.defaults, listen).await
            }
        }
    }
}
