use pipewright::cli::commands::{CliArgs, Commands};
use pipewright::cli::handlers::{handle_config, handle_serve};
use pipewright::util::logging::{init_logging, json_from_env, parse_level, LoggingConfig};
use pipewright::VERSION;

use clap::Parser;
use std::env;
use tracing::{debug, Level};

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("pipewright v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Serve(serve_args) => handle_serve(serve_args).await,
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str)
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        let level_str = env::var("PIPEWRIGHT_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        parse_level(&level_str)
    };

    init_logging(LoggingConfig {
        level,
        use_json: args.json_logs || json_from_env(),
        ..Default::default()
    });
}
