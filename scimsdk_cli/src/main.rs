mod commands;
mod output;

use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use scimsdk_lib::{Client, ClientOptions, Context};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "scimsdk")]
#[command(about = "Manage users and groups through the SCIM provisioning API")]
struct Cli {
    /// Output format: table, json or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// API token (reads SCIM_TOKEN, also from a .env file)
    #[arg(long, env = "SCIM_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Alternate API base URL
    #[arg(long, env = "SCIM_API_URL", global = true)]
    api_url: Option<String>,

    /// Overall timeout for the command, in seconds
    #[arg(long, default_value = "30", global = true)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List, find, create, replace, activate or delete users
    Users(commands::users::UsersArgs),
    /// List, find, create, replace, edit or delete groups
    Groups(commands::groups::GroupsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("scimsdk=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "json" => OutputFormat::Json,
        "md" | "markdown" => OutputFormat::Markdown,
        _ => OutputFormat::Table,
    };

    let token = cli
        .token
        .ok_or_else(|| anyhow!("no API token: pass --token or set SCIM_TOKEN"))?;
    let options = ClientOptions {
        api_url: cli.api_url,
    };
    let client = Client::new(&token, Some(options));
    let ctx = Context::with_timeout(Duration::from_secs(cli.timeout));

    match &cli.command {
        Commands::Users(args) => commands::users::run(args, &client, &ctx, &format).await?,
        Commands::Groups(args) => commands::groups::run(args, &client, &ctx, &format).await?,
    }

    Ok(())
}
