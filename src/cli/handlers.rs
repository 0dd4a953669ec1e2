use super::commands::{ConfigArgs, ServeArgs};
use super::output::OutputFormatter;
use crate::analysis::AnalysisService;
use crate::config::PipewrightConfig;
use crate::llm::GenAIClient;
use crate::repo::GitHubClient;
use crate::server::{self, AppState};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{error, info};

/// Environment configuration with command-line overrides applied
pub fn resolve_config(args: &ServeArgs) -> Result<PipewrightConfig> {
    let mut config = PipewrightConfig::from_env().context("Invalid configuration")?;

    if let Some(ref host) = args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(provider) = args.provider {
        config.provider = provider;
    }
    if let Some(ref model) = args.model {
        config.model = model.clone();
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Builds the service from `config` with the live GitHub and LLM clients
pub fn build_state(config: &PipewrightConfig) -> Result<AppState> {
    let source = GitHubClient::from_config(config).context("Failed to create GitHub client")?;
    let llm = GenAIClient::from_config(config).context("Failed to create LLM client")?;

    info!(
        "Using {} model {} with GitHub API {}",
        config.provider.as_str(),
        config.model,
        config.github_api_base
    );

    let service = AnalysisService::from_config(config, Arc::new(source), Arc::new(llm));
    Ok(AppState::new(service))
}

async fn run_server(args: &ServeArgs) -> Result<()> {
    let config = resolve_config(args)?;
    let state = build_state(&config)?;
    server::serve(&config, state).await
}

pub async fn handle_serve(args: &ServeArgs) -> i32 {
    match run_server(args).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

pub fn handle_config(args: &ConfigArgs) -> i32 {
    let config = match PipewrightConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Invalid configuration: {}", e);
            return 1;
        }
    };

    match OutputFormatter::new(args.format.into()).format_config(&config) {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genai::adapter::AdapterKind;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_resolve_config_applies_overrides() {
        let args = ServeArgs {
            host: Some("127.0.0.1".to_string()),
            port: Some(9100),
            provider: Some(AdapterKind::Ollama),
            model: Some("qwen2.5-coder:7b".to_string()),
        };

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:9100");
        assert_eq!(config.provider, AdapterKind::Ollama);
        assert_eq!(config.model, "qwen2.5-coder:7b");
    }

    #[test]
    #[serial]
    fn test_resolve_config_rejects_blank_model() {
        let args = ServeArgs {
            model: Some("  ".to_string()),
            ..ServeArgs::default()
        };
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    #[serial]
    fn test_build_state() {
        let config = PipewrightConfig::default();
        assert!(build_state(&config).is_ok());
    }
}
