use clap::{Parser, Subcommand, ValueEnum};
use genai::adapter::AdapterKind;

/// AI-assisted CI pipeline synthesis service
#[derive(Parser, Debug)]
#[command(
    name = "pipewright",
    about = "AI-assisted CI pipeline synthesis from remote repository snapshots",
    version,
    author,
    long_about = "pipewright serves an HTTP API that reads the CI and dependency files of a \
                  GitHub repository, asks an LLM for a tech-stack analysis and candidate \
                  pipeline steps, and generates GitHub Actions workflows from the steps a \
                  user approves."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Run the HTTP service",
        long_about = "Starts the HTTP service. Settings come from PIPEWRIGHT_* environment \
                      variables; flags given here take precedence.\n\n\
                      Examples:\n  \
                      pipewright serve\n  \
                      pipewright serve --port 9000\n  \
                      pipewright serve --provider openai --model gpt-4o-mini"
    )]
    Serve(ServeArgs),

    #[command(
        about = "Show the resolved configuration",
        long_about = "Prints the configuration the service would start with. \
                      Credentials are redacted.\n\n\
                      Examples:\n  \
                      pipewright config\n  \
                      pipewright config --format json"
    )]
    Config(ConfigArgs),
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ServeArgs {
    #[arg(long, value_name = "HOST", help = "Address to bind")]
    pub host: Option<String>,

    #[arg(short = 'p', long, value_name = "PORT", help = "Port to listen on")]
    pub port: Option<u16>,

    #[arg(
        short = 'b',
        long,
        value_parser = parse_adapter_kind,
        help = "LLM provider (gemini, openai, anthropic, ollama, groq, xai)"
    )]
    pub provider: Option<AdapterKind>,

    #[arg(short = 'm', long, value_name = "MODEL", help = "Model name")]
    pub model: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct ConfigArgs {
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}

fn parse_adapter_kind(s: &str) -> Result<AdapterKind, String> {
    crate::config::parse_provider(s).map_err(|e| e.to_string())
}
