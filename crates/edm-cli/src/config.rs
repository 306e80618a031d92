use std::fs;
use std::path::Path;

use anyhow::Context;
use edm_types::CVR_NAMESPACE;
use serde::{Deserialize, Serialize};

use crate::cli::{Cli, OutputFormat};

/// Settings read from `edm.toml`. Command-line flags take precedence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub namespace: String,
    /// Treat lookup misses as errors.
    pub strict: bool,
    pub format: OutputFormat,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            namespace: CVR_NAMESPACE.to_string(),
            strict: false,
            format: OutputFormat::Text,
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    pub const FILE_NAME: &'static str = "edm.toml";

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    /// Load `explicit` if given, else `edm.toml` in the current directory if
    /// present, else the defaults.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let local = Path::new(Self::FILE_NAME);
                if local.is_file() {
                    Self::from_file(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Apply the global command-line flags on top of the file settings.
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(namespace) = &cli.namespace {
            self.namespace = namespace.clone();
        }
        if let Some(format) = cli.format {
            self.format = format;
        }
        if cli.verbose {
            self.log_level = "debug".to_string();
        }
        self
    }
}
