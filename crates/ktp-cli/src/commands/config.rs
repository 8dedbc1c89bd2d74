//! Config command - inspect and create configuration files.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::{Args, Subcommand};
use console::style;

use ktp_core::{KtpConfig, KtpParser};

use super::input::{default_config_path, load_config};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show the effective configuration
    Show,

    /// Write a configuration file with default values
    Init {
        /// Where to write (default: the user config directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print one setting
    Get {
        /// Setting name, e.g. "extraction.include_blood_type"
        key: ConfigKey,
    },

    /// Show which configuration file is used
    Path,
}

/// Settings readable with `ktp config get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigKey {
    IncludeBloodType,
    MinConfidence,
    PrettyJson,
    IncludeRawText,
}

impl ConfigKey {
    const ALL: [ConfigKey; 4] = [
        Self::IncludeBloodType,
        Self::MinConfidence,
        Self::PrettyJson,
        Self::IncludeRawText,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::IncludeBloodType => "extraction.include_blood_type",
            Self::MinConfidence => "extraction.min_confidence",
            Self::PrettyJson => "output.pretty_json",
            Self::IncludeRawText => "output.include_raw_text",
        }
    }

    fn value(self, config: &KtpConfig) -> String {
        match self {
            Self::IncludeBloodType => config.extraction.include_blood_type.to_string(),
            Self::MinConfidence => config.extraction.min_confidence.to_string(),
            Self::PrettyJson => config.output.pretty_json.to_string(),
            Self::IncludeRawText => config.output.include_raw_text.to_string(),
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| format!("Configuration key not found: {s}"))
    }
}

/// Where the effective configuration comes from.
#[derive(Debug, PartialEq)]
enum ConfigSource {
    /// `--config` on the command line.
    Explicit(PathBuf),
    /// The per-user file, which exists.
    UserFile(PathBuf),
    /// No file; built-in defaults.
    Defaults(PathBuf),
}

impl ConfigSource {
    fn resolve(config_path: Option<&str>) -> Self {
        if let Some(path) = config_path {
            return Self::Explicit(PathBuf::from(path));
        }
        let path = default_config_path();
        if path.exists() {
            Self::UserFile(path)
        } else {
            Self::Defaults(path)
        }
    }

    fn path(&self) -> &Path {
        match self {
            Self::Explicit(path) | Self::UserFile(path) | Self::Defaults(path) => path,
        }
    }
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let source = ConfigSource::resolve(config_path);
            let config = load_config(config_path)?;
            println!("{}", render_show(&source, &config)?);
        }
        ConfigCommand::Init { output, force } => {
            let path = output.unwrap_or_else(default_config_path);
            write_default_config(&path, force)?;
            println!(
                "{} Created configuration file at {}",
                style("✓").green(),
                path.display()
            );
        }
        ConfigCommand::Get { key } => {
            let config = load_config(config_path)?;
            println!("{}", key.value(&config));
        }
        ConfigCommand::Path => {
            println!("{}", render_path(&ConfigSource::resolve(config_path)));
        }
    }
    Ok(())
}

fn render_show(source: &ConfigSource, config: &KtpConfig) -> anyhow::Result<String> {
    let origin = match source {
        ConfigSource::Defaults(_) => "built-in defaults".to_string(),
        other => other.path().display().to_string(),
    };
    let fields = KtpParser::from_config(&config.extraction).fields().len();

    Ok(format!(
        "# source: {origin}\n# fields per card: {fields}\n{}",
        serde_json::to_string_pretty(config)?
    ))
}

fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    KtpConfig::default().save(path)?;
    Ok(())
}

fn render_path(source: &ConfigSource) -> String {
    let status = match source {
        ConfigSource::Explicit(path) if !path.exists() => style("missing").red().to_string(),
        ConfigSource::Defaults(_) => format!(
            "{}\n\nRun 'ktp config init' to create a configuration file.",
            style("not created").yellow()
        ),
        _ => style("exists").green().to_string(),
    };
    format!("Configuration file: {}\nStatus: {}", source.path().display(), status)
}
