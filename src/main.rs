use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use base_compound_actions::actions::{tools::tool_definitions, Action, ActionContext};
use base_compound_actions::blockchain::{connect, KnownAssetRegistry};
use base_compound_actions::config::Settings;
use base_compound_actions::utils::init_logging;
use base_compound_actions::AppError;

/// Compound V3 and WETH actions on Base.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (defaults to ./compound-actions.toml when present)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one action and print its result
    Run {
        /// Action name, e.g. compound_supply
        action: String,

        /// Action arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Print the tool definitions as JSON
    Tools,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "compound-actions failed");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    let settings = Settings::load(cli.config.as_deref())?;
    init_logging(&settings.logging)?;

    match cli.command {
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&tool_definitions())?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Run { action, args } => {
            let args: serde_json::Value = serde_json::from_str(&args)?;
            let action = match Action::from_call(&action, args) {
                Ok(action) => action,
                Err(e) => {
                    println!("{}", e);
                    return Ok(ExitCode::FAILURE);
                }
            };

            let network = settings.network();
            let client = Arc::new(
                connect(
                    &settings.network.rpc_url,
                    settings.private_key()?,
                    network,
                    settings.confirmation.clone(),
                )
                .await?,
            );
            info!(network = %network, action = action.name(), "Connected");

            let ctx = ActionContext::new(
                network,
                client.clone(),
                client,
                Arc::new(KnownAssetRegistry::new()),
            );

            match action.run(&ctx).await {
                Ok(success) => {
                    println!("{}", success);
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    println!("{}", e);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
