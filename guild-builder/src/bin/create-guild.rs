use std::path::PathBuf;

use clap::Parser;
use guild_builder::template::GuildTemplate;
use guild_builder::transport::RestClient;
use guild_builder::{Config, Result};
use tracing::{debug, error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Creates a guild from a JSON template.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Path to the guild template
    template: PathBuf,

    /// Print the request body instead of sending it
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_envvar() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(2);
        }
    };

    configure_observability(&config);

    if let Err(e) = run(args, config).await {
        error!(error = %e, "Failed to create guild");
        std::process::exit(1);
    }
}

async fn run(args: Args, config: Config) -> Result<()> {
    let template = GuildTemplate::from_path(&args.template)?;
    let guild = template.apply()?;

    info!(
        name = guild.name(),
        channels = guild.channels().len(),
        roles = guild.roles().len(),
        "Loaded template"
    );

    let payload = guild.build();
    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    debug!(payload = %serde_json::to_string(&payload)?, "Built payload");

    let client = RestClient::from_config(&config)?;
    let created = guild.submit(&client).await?;

    info!(
        guild_id = %created.id,
        created_at = ?created.id.created_at(),
        "Done"
    );

    Ok(())
}

fn configure_observability(config: &Config) {
    let registry = tracing_subscriber::registry().with(EnvFilter::from_default_env());

    if config.json_log {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
