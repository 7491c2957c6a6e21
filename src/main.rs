use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sidekick_client::{ClientConfig, HttpDefinitionClient};
use sidekick_updater::{BranchAction, TriggerUpdater};

/// Sidekick - add or remove CI branch triggers on a build definition
#[derive(Parser)]
#[command(name = "sidekick")]
#[command(version, about, long_about = None)]
struct Cli {
  /// The url of the team project collection
  #[arg(short = 'c', long = "teamprojectcollection")]
  team_project_collection: String,

  /// The name of the team project
  #[arg(short = 't', long = "teamproject")]
  team_project: String,

  /// The change to make: addbranch or removebranch (case-insensitive)
  #[arg(short = 'a', long, value_parser = parse_action)]
  action: BranchAction,

  /// The name of the build definition
  #[arg(short = 'b', long = "build")]
  build_definition: String,

  /// The folder path where the build definition is located
  #[arg(short = 'p', long)]
  path: String,

  /// The name of the branch
  #[arg(short = 'r', long)]
  branch: String,

  /// Personal access token for the collection
  #[arg(long, env = "SIDEKICK_TOKEN", hide_env_values = true)]
  token: Option<String>,

  /// Log requests and decisions to stderr
  #[arg(short = 'v', long)]
  verbose: bool,
}

fn parse_action(value: &str) -> Result<BranchAction, String> {
  value.parse().map_err(|e: sidekick_updater::UpdateError| e.to_string())
}

fn main() -> ExitCode {
  let cli = Cli::parse();
  init_tracing(cli.verbose);
  tracing::debug!(
    action = %cli.action,
    definition = %cli.build_definition,
    path = %cli.path,
    branch = %cli.branch,
    "starting"
  );

  match run(&cli) {
    Ok(message) => {
      println!("{}", message);
      ExitCode::SUCCESS
    }
    Err(e) => {
      eprintln!("{}", failure_line(cli.action, &e));
      ExitCode::FAILURE
    }
  }
}

/// The single line reported when an action fails.
fn failure_line(action: BranchAction, error: &anyhow::Error) -> String {
  format!("{} Error {:#}", action.failure_context(), error)
}

fn init_tracing(verbose: bool) {
  let default_level = if verbose { "debug" } else { "warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn run(cli: &Cli) -> Result<String> {
  let rt = tokio::runtime::Runtime::new()?;
  rt.block_on(async { run_async(cli).await })
}

async fn run_async(cli: &Cli) -> Result<String> {
  let config = ClientConfig::new(&cli.team_project_collection, &cli.team_project)
    .with_token(cli.token.clone());
  let client =
    HttpDefinitionClient::new(config).context("failed to create build definition client")?;
  let updater = TriggerUpdater::new(client);

  let outcome = updater
    .apply(
      cli.action,
      &cli.build_definition,
      &cli.path,
      &cli.branch,
    )
    .await?;

  Ok(outcome.message(&cli.branch, &cli.build_definition))
}
