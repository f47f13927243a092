//! turntable CLI: Command-line interface for the turntable timeline controller

use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use serde_json::Value;
use turntable_engine::{
    health_text, init_logging, Config, ConfigError, EditorState, LogTarget, PresetError,
    PresetRevision, RequestError, TurntableClient, SUBMIT_BLOCKED_MESSAGE,
};
use turntable_tui::Screen;

const DEFAULT_CONFIG: &str = "turntable.json";

/// Send motion timelines to a turntable service
#[derive(Parser)]
#[command(name = "turntable")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG)]
    config: PathBuf,

    /// Service base URL (overrides config and TURNTABLE_BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Preset table revision (current or legacy)
    #[arg(long, global = true)]
    revision: Option<PresetRevision>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the dispatcher TUI (default when no command specified)
    Dispatcher,

    /// Open the JSON editor TUI
    Editor,

    /// Send one preset timeline
    Send {
        /// Preset name, e.g. PIVOT
        preset: String,
    },

    /// Send a JSON document read from a file ("-" for stdin)
    Submit {
        /// Path to the document
        path: String,
    },

    /// Probe the service health endpoint
    Health {
        /// Output the raw response as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the preset table
    Presets {
        /// Output the table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        exit_with(&e);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    match &cli.command {
        None | Some(Commands::Dispatcher) => {
            run_tui(load_config(cli)?, Screen::Dispatcher, cli.verbose)
        }
        Some(Commands::Editor) => run_tui(load_config(cli)?, Screen::Editor, cli.verbose),
        Some(Commands::Send { preset }) => {
            let config = load_config(cli)?;
            init_logging(config.log_dir.as_deref(), LogTarget::Stderr, cli.verbose);
            cmd_send(&config, preset)
        }
        Some(Commands::Submit { path }) => {
            let config = load_config(cli)?;
            init_logging(config.log_dir.as_deref(), LogTarget::Stderr, cli.verbose);
            cmd_submit(&config, path)
        }
        Some(Commands::Health { json }) => {
            let config = load_config(cli)?;
            init_logging(config.log_dir.as_deref(), LogTarget::Stderr, cli.verbose);
            cmd_health(&config, *json)
        }
        Some(Commands::Presets { json }) => cmd_presets(&load_config(cli)?, *json),
        Some(Commands::Init { force }) => {
            init_logging(None, LogTarget::Stderr, cli.verbose);
            cmd_init(&cli.config, *force).map(|_| ())
        }
    }
}

/// Errors that end a command with exit status 1.
#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Preset(#[from] PresetError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error("{0}")]
    Message(String),
}

/// Config file, then environment, then flags.
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = Config::load_or_default(&cli.config)?.with_env_overrides();
    if let Some(url) = &cli.base_url {
        config = config.with_base_url(url.clone());
    }
    if let Some(revision) = cli.revision {
        config.revision = revision;
    }
    Ok(config)
}

fn exit_with(e: &CliError) -> ! {
    if let CliError::Request(request) = e {
        if let Some(body) = request.body() {
            eprintln!("Response body:\n{}", pretty(body));
        }
    }
    eprintln!("Error: {e}");
    std::process::exit(1);
}

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Message(format!("Failed to create tokio runtime: {e}")))
}

fn pretty(value: &serde_json::Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn run_tui(config: Config, screen: Screen, verbose: bool) -> Result<(), CliError> {
    // The terminal belongs to the TUI, so logs only go to a file
    init_logging(config.log_dir.as_deref(), LogTarget::FileOnly, verbose);
    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "configuration has unresolved triggers");
    }

    runtime()?
        .block_on(turntable_tui::run_tui(config, screen))
        .map_err(|e| CliError::Message(e.to_string()))
}

fn cmd_send(config: &Config, preset: &str) -> Result<(), CliError> {
    let table = config.preset_table();
    let timeline = table.require(preset)?;
    let client = TurntableClient::from_config(config)?;

    let body = runtime()?.block_on(client.send_preset(timeline))?;
    println!("Sent {preset} to {}", client.base_url());
    if !body.is_null() {
        println!("{}", pretty(&body));
    }
    Ok(())
}

fn read_document(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::Message(format!("Failed to read stdin: {e}")))?;
        Ok(buf)
    } else {
        std::fs::read_to_string(path)
            .map_err(|e| CliError::Message(format!("Failed to read {path}: {e}")))
    }
}

/// The body to send for a document, or the reason it cannot be sent.
fn submission_body(text: String) -> Result<Value, CliError> {
    let editor = EditorState::new(text);
    match editor.submission() {
        Ok(body) => Ok(body.clone()),
        Err(_) => Err(CliError::Message(
            editor
                .validation_message()
                .unwrap_or_else(|| SUBMIT_BLOCKED_MESSAGE.to_string()),
        )),
    }
}

fn cmd_submit(config: &Config, path: &str) -> Result<(), CliError> {
    let body = submission_body(read_document(path)?)?;
    let client = TurntableClient::from_config(config)?;

    let response = runtime()?.block_on(client.send_timeline(&body))?;
    println!("{}", pretty(&response));
    Ok(())
}

fn cmd_health(config: &Config, json: bool) -> Result<(), CliError> {
    let client = TurntableClient::from_config(config)?;
    let value = runtime()?.block_on(client.health())?;

    if json {
        println!("{}", pretty(&value));
        return Ok(());
    }

    match health_text(&value) {
        Some(text) => println!("Health: {text}"),
        None => println!("Health: (no data)"),
    }
    Ok(())
}

fn cmd_presets(config: &Config, json: bool) -> Result<(), CliError> {
    let table = config.preset_table();

    if json {
        // Serialize the table directly to keep preset order
        let text = serde_json::to_string_pretty(&table)
            .map_err(|e| CliError::Message(e.to_string()))?;
        println!("{text}");
        return Ok(());
    }

    println!("Presets ({} revision)\n", config.revision);
    for (name, timeline) in table.iter() {
        if timeline.is_empty() {
            println!("  {name} - no-op");
        } else {
            println!(
                "  {name} - {} segment(s), {}s",
                timeline.len(),
                timeline.total_duration()
            );
        }
    }

    println!("\nTriggers\n");
    for (index, trigger) in config.triggers.iter().enumerate() {
        let marker = if table.get(&trigger.preset).is_some() {
            ""
        } else {
            " (missing)"
        };
        println!("  {}. {} -> {}{marker}", index + 1, trigger.label, trigger.preset);
    }
    Ok(())
}

/// Write the default config. Returns whether a file was written.
fn cmd_init(path: &Path, force: bool) -> Result<bool, CliError> {
    if path.exists() && !force {
        println!("Config already exists at {}", path.display());
        return Ok(false);
    }

    Config::default()
        .save(path)
        .map_err(|e| CliError::Message(format!("Failed to write config: {e}")))?;
    println!("Created {}", path.display());
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_dispatcher() {
        let cli = Cli::try_parse_from(["turntable"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "turntable",
            "presets",
            "--json",
            "--revision",
            "legacy",
            "--base-url",
            "http://turntable.local:9000",
        ])
        .unwrap();
        assert_eq!(cli.revision, Some(PresetRevision::Legacy));
        assert!(matches!(cli.command, Some(Commands::Presets { json: true })));
    }

    #[test]
    fn test_flags_override_config() {
        let dir = std::env::temp_dir().join("turntable-cli-missing-config");
        let cli = Cli::try_parse_from([
            "turntable",
            "--config",
            dir.join("none.json").to_str().unwrap(),
            "--base-url",
            "http://turntable.local:9000/",
            "--revision",
            "legacy",
        ])
        .unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.base_url(), "http://turntable.local:9000");
        assert!(config.preset_table().get("360").is_none());
    }

    #[test]
    fn test_init_keeps_existing_file_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turntable.json");
        std::fs::write(&path, r#"{"base_url": "http://turntable.local"}"#).unwrap();

        assert!(!cmd_init(&path, false).unwrap());
        let kept = Config::load(&path).unwrap();
        assert_eq!(kept.base_url(), "http://turntable.local");

        assert!(cmd_init(&path, true).unwrap());
        let replaced = Config::load(&path).unwrap();
        assert_eq!(replaced.base_url(), turntable_engine::DEFAULT_BASE_URL);
    }

    #[test]
    fn test_init_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("turntable.json");
        assert!(cmd_init(&path, false).unwrap());
        assert!(Config::load(&path).is_ok());
    }

    #[test]
    fn test_submit_rejects_invalid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, r#"{"rotate": 90"#).unwrap();

        // Nothing listens here; validation fails before any request.
        let config = Config::default().with_base_url("http://127.0.0.1:9");
        let err = cmd_submit(&config, path.to_str().unwrap()).unwrap_err();
        assert!(err.to_string().starts_with("Invalid JSON"), "{err}");
    }

    #[test]
    fn test_submission_body_accepts_valid_document() {
        let body = submission_body(r#"[{"delay": 0}]"#.to_string()).unwrap();
        assert_eq!(body, serde_json::json!([{"delay": 0}]));
    }

    #[test]
    fn test_submit_missing_file() {
        let err = cmd_submit(&Config::default(), "/nonexistent/turntable-doc.json").unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn test_bad_revision_rejected() {
        assert!(Cli::try_parse_from(["turntable", "--revision", "beta"]).is_err());
    }
}
