//! CLI command implementations

use anyhow::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use serde::Serialize;
use std::io;
use std::path::PathBuf;

use crate::cli::args::{Cli, ConfigCommand};
use crate::config::Settings;
use crate::llm::{MinutesStyle, ALL_STYLES};
use crate::pipeline::MinutesPipeline;

/// Audio containers accepted by `generate`.
const SUPPORTED_AUDIO_EXTENSIONS: [&str; 3] = ["m4a", "mp3", "wav"];

/// Generate minutes from an audio file
pub async fn generate(
    settings: &Settings,
    audio: PathBuf,
    style_key: &str,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    if !audio.exists() {
        anyhow::bail!("Audio file not found: {}", audio.display());
    }

    let extension = audio
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    if !SUPPORTED_AUDIO_EXTENSIONS.contains(&extension.as_str()) {
        anyhow::bail!(
            "Unsupported audio format: {}. Supported formats: {}",
            audio.display(),
            SUPPORTED_AUDIO_EXTENSIONS.join(", ")
        );
    }

    let style = MinutesStyle::from_key(style_key);

    let mut settings = settings.clone();
    if let Some(dir) = output_dir {
        settings.output.dir = dir;
    }

    let pipeline = MinutesPipeline::from_settings(&settings)?;

    println!("Generating minutes from: {}", audio.display());
    println!("Transcription and summarization may take a few minutes...");

    let output = pipeline.process_audio(&audio, style).await?;

    println!();
    println!("{}", output.summary);
    println!();
    println!("Transcript preview:");
    println!("{}", output.transcript_preview);
    println!();
    println!("Minutes written to: {}", output.minutes_path.display());

    Ok(())
}

/// List available minutes styles
pub fn list_styles() {
    println!("{:<16} {}", "KEY", "LABEL");
    for style in ALL_STYLES {
        println!("{:<16} {}", style.key(), style.label());
    }
}

/// Handle config subcommands
pub fn config_command(settings: &Settings, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => {
            let toml = toml::to_string_pretty(settings)?;
            println!("{}", toml);
        }
        ConfigCommand::Path => {
            let path = Settings::config_path()?;
            println!("{}", path.display());
        }
        ConfigCommand::Init { force } => config_init(force)?,
    }

    Ok(())
}

/// Write the default configuration file.
///
/// Does not read the existing config, so `--force` can repair a file that
/// no longer parses.
pub fn config_init(force: bool) -> Result<()> {
    let path = Settings::config_path()?;
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    Settings::write_default(&path)?;
    println!("Configuration initialized at: {}", path.display());
    Ok(())
}

/// Print completion script for the requested shell to stdout.
pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let command_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, command_name, &mut io::stdout());
}

#[derive(Serialize)]
struct DoctorCheck {
    name: &'static str,
    status: &'static str,
    detail: String,
}

#[derive(Serialize)]
struct DoctorReport {
    whisper_model: String,
    llm_provider: String,
    llm_model: String,
    checks: Vec<DoctorCheck>,
    notes: Vec<String>,
}

/// Run diagnostic checks to help troubleshoot local setup issues.
pub fn run_doctor(settings: &Settings, json: bool) -> Result<()> {
    let report = collect_doctor_report(settings)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("mtgmap doctor");
    println!("whisper model: {}", report.whisper_model);
    println!("llm: {} ({})", report.llm_provider, report.llm_model);
    println!();

    for check in &report.checks {
        println!("{:<12} {:<8} {}", check.name, check.status, check.detail);
    }

    if !report.notes.is_empty() {
        println!();
        for note in &report.notes {
            println!("{}", note);
        }
    }

    Ok(())
}

fn collect_doctor_report(settings: &Settings) -> Result<DoctorReport> {
    let config_path = Settings::config_path()?;
    let model_path = settings.model_path();
    let model_ok = model_path.exists();
    let api_key_ok = !settings.llm.api_key.trim().is_empty();
    let output_dir_ok = settings.output.dir.exists();

    let mut notes = Vec::new();

    if !model_ok {
        notes.push(format!(
            "hint: download ggml-{}.bin into {}",
            settings.whisper.model,
            settings.whisper.models_dir.display()
        ));
    }

    if !api_key_ok {
        notes.push(
            "hint: set llm.api_key in config or export OPENAI_API_KEY before running generate."
                .to_string(),
        );
    }

    Ok(DoctorReport {
        whisper_model: settings.whisper.model.clone(),
        llm_provider: settings.llm.provider.clone(),
        llm_model: settings.llm.model.clone(),
        checks: vec![
            DoctorCheck {
                name: "config",
                status: if config_path.exists() { "ok" } else { "missing" },
                detail: format!("{} (defaults used when missing)", config_path.display()),
            },
            DoctorCheck {
                name: "model",
                status: if model_ok { "ok" } else { "missing" },
                detail: model_path.display().to_string(),
            },
            DoctorCheck {
                name: "api-key",
                status: if api_key_ok { "ok" } else { "missing" },
                detail: "required for summarization".to_string(),
            },
            DoctorCheck {
                name: "output-dir",
                status: if output_dir_ok { "ok" } else { "missing" },
                detail: format!("{} (created on first run)", settings.output.dir.display()),
            },
        ],
        notes,
    })
}
