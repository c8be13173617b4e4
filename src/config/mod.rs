use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub mod validator;

use crate::cli::Cli;

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub form: FormSettings,
    #[serde(default)]
    pub output: OutputSettings,
}

/// Knobs that change how control trees are composed and submitted
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct FormSettings {
    /// String fields with a `maxLength` above this get a multi-line editor
    #[serde(default = "default_multiline_threshold")]
    pub multiline_threshold: u64,
    /// Nesting depth past which composition stops and emits a text leaf
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Payload key that wraps raw (markdown/json/yaml) document content
    #[serde(default = "default_raw_key")]
    pub raw_key: String,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            multiline_threshold: default_multiline_threshold(),
            max_depth: default_max_depth(),
            raw_key: default_raw_key(),
        }
    }
}

fn default_multiline_threshold() -> u64 {
    100
}

fn default_max_depth() -> usize {
    32
}

fn default_raw_key() -> String {
    "raw".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected text or json)", other)),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputSettings {
    #[serde(default)]
    pub format: OutputFormat,
    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_path(Path::new("studio.toml"))
    }

    /// Create settings from CLI arguments (config file, env, then CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::load(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);

        settings.validate()?;
        Ok(settings)
    }

    pub fn from_path(path: &Path) -> Result<Self, anyhow::Error> {
        let settings = Self::load(path)?;
        settings.validate()?;
        Ok(settings)
    }

    fn load(path: &Path) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .set_default("form.multiline_threshold", 100)?
            .set_default("form.max_depth", 32)?
            .set_default("form.raw_key", "raw")?
            .set_default("output.format", "text")?
            .set_default("output.pretty", true)?
            .add_source(File::from(path.to_path_buf()).required(false))
            .add_source(Environment::with_prefix("STUDIO").separator("__"))
            .build()?;

        let settings: Settings = s.try_deserialize()?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(format) = cli.format {
            self.output.format = format;
        }
        if let Some(max_depth) = cli.max_depth {
            self.form.max_depth = max_depth;
        }
        if let Some(threshold) = cli.multiline_threshold {
            self.form.multiline_threshold = threshold;
        }
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        validator::ConfigValidator::validate(self).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Configuration validation failed:\n{}",
                error_messages.join("\n")
            )
        })
    }
}
