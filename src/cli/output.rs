//! Rendering of CLI output in JSON, YAML or human-readable form

use crate::config::PipewrightConfig;
use anyhow::{Context, Result};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Renders the configuration; the API key is always redacted
    pub fn format_config(&self, config: &PipewrightConfig) -> Result<String> {
        let map: BTreeMap<String, String> = config.to_display_map().into_iter().collect();

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(&map).context("Failed to serialize config to JSON")
            }
            OutputFormat::Yaml => {
                serde_yaml::to_string(&map).context("Failed to serialize config to YAML")
            }
            OutputFormat::Human => Ok(config.to_string()),
        }
    }
}
