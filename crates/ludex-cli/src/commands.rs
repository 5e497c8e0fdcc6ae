use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use ludex_server::{LudexServer, ServerConfig};
use ludex_store::{DirImageStore, ImageStore, JsonShelfStore, ShelfStore};
use ludex_types::GameStatus;

use crate::cli::{Cli, Command, ListArgs, OutputFormat, ServeArgs};

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::List(args) => cmd_list(args, cli.format),
    }
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data_file) = args.data_file {
        config.data_file = data_file;
    }
    if let Some(images_dir) = args.images_dir {
        config.images_dir = images_dir;
    }
    if let Ok(port) = std::env::var("PORT") {
        let port: u16 = port.parse().context("PORT must be a port number")?;
        config = config.with_port(port);
    }
    if let Some(port) = args.port {
        config = config.with_port(port);
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(LudexServer::new(config).serve())?;
    Ok(())
}

fn cmd_list(args: ListArgs, format: OutputFormat) -> anyhow::Result<()> {
    let images: Arc<dyn ImageStore> = Arc::new(DirImageStore::open(&args.images_dir)?);
    let store = JsonShelfStore::open(&args.data_file, images)?;
    let games = store.list()?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&games)?),
        OutputFormat::Text => {
            if games.is_empty() {
                println!("Shelf is empty.");
                return Ok(());
            }
            for game in &games {
                let status = match game.status {
                    GameStatus::Completed => game.status.as_str().green(),
                    GameStatus::InProgress => game.status.as_str().yellow(),
                    GameStatus::Abandoned => game.status.as_str().red(),
                };
                let notes = match &game.extra {
                    Some(extra) => format!("  — {extra}").dimmed().to_string(),
                    None => String::new(),
                };
                println!(
                    "{:>14}  {:<10}  {} ({} h){}",
                    game.id.to_string().dimmed(),
                    status,
                    game.title.bold(),
                    game.hours,
                    notes,
                );
            }
        }
    }
    Ok(())
}
