use colored::Colorize;
use verconf_server::{ServerConfig, VerconfServer};
use verconf_types::ConfigurationType;

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Types => cmd_types(&cli.format),
        Command::CheckConfig(args) => cmd_check_config(args, &cli.format),
    }
}

fn resolve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    Ok(config)
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_config(&args)?;
    println!("{} verconf on {}", "▶".green().bold(), config.bind_addr.to_string().bold());
    VerconfServer::new(config).serve().await?;
    Ok(())
}

fn cmd_types(format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&ConfigurationType::ALL)?),
        OutputFormat::Text => {
            for kind in ConfigurationType::ALL {
                println!("  {}", kind.as_str().cyan());
            }
        }
    }
    Ok(())
}

fn cmd_check_config(args: CheckConfigArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let config = ServerConfig::load(&args.path)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&config)?),
        OutputFormat::Text => {
            println!("{} {}", "✓".green().bold(), args.path.display());
            println!("  bind_addr: {}", config.bind_addr.to_string().yellow());
            println!("  max_body_bytes: {}", config.max_body_bytes);
            println!("  request_tracing: {}", config.request_tracing);
        }
    }
    Ok(())
}
