mod cli;
mod color;
mod commands;
mod config;
mod output;

use anyhow::{anyhow, Result};
use clap::Parser;
use cli::{Backend, Cli, Commands, ConfigCommands, OutputFormat};
use config::Config;
use output::output_error;
use std::process::ExitCode;
use traccar_backend::TraccarClient;
use tracing::debug;
use tracing_subscriber::{filter::EnvFilter, prelude::*};
use useradmin_core::{RowActionKind, UserStore};
use useradmin_mock::MockStore;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        output_error(&e, cli.format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Logs go to stderr so stdout stays parseable
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    // Commands that don't need a store
    match &cli.command {
        Commands::Completions { shell } => {
            Cli::generate_completions(*shell);
            return Ok(());
        }
        Commands::Config { action } => return handle_config(cli, action),
        _ => {}
    }

    let mut config = Config::load(cli.config.as_deref())?;
    config.merge_with_cli(cli.url.clone(), cli.token.clone(), cli.backend);
    if useradmin_mock::is_mock_enabled() && cli.backend.is_none() {
        config.backend = Some(Backend::Mock);
    }
    config.validate()?;

    match config.backend() {
        Backend::Traccar => {
            let (Some(url), Some(token)) = (config.url.as_deref(), config.token.as_deref()) else {
                return Err(anyhow!("Server URL and token are required"));
            };
            let client = TraccarClient::new(url, token);
            run_with_store(&client, &config, cli)
        }
        Backend::Mock => {
            let dir = config
                .mock_dir
                .clone()
                .or_else(useradmin_mock::get_mock_dir)
                .ok_or_else(|| anyhow!("Mock directory not configured"))?;
            debug!(dir = %dir.display(), "using mock store");
            let store = MockStore::new(&dir)?;
            run_with_store(&store, &config, cli)
        }
    }
}

fn run_with_store(store: &dyn UserStore, config: &Config, cli: &Cli) -> Result<()> {
    let mut view = commands::users::open_view(store, config.translations())?;
    let format = cli.format;

    match &cli.command {
        Commands::List { search, temporary } => {
            commands::users::handle_list(&mut view, search.as_deref(), *temporary, format)
        }
        Commands::Remove { ids, yes } => {
            commands::users::handle_remove(store, &mut view, ids, *yes, format)
        }
        Commands::Delete { id, yes } => {
            commands::users::handle_delete(store, &mut view, *id, *yes, format)
        }
        Commands::Login { id, open } => commands::users::handle_action(
            store,
            &view,
            RowActionKind::Login,
            *id,
            *open,
            format,
        ),
        Commands::Connections { id, open } => commands::users::handle_action(
            store,
            &view,
            RowActionKind::Connections,
            *id,
            *open,
            format,
        ),
        Commands::Edit { id, open } => {
            commands::users::handle_edit(store, &view, *id, *open, format)
        }
        Commands::Create { open } => commands::users::handle_create(store, &view, *open, format),
        Commands::Browse => commands::browse::handle_browse(store, view, format),
        Commands::Config { .. } | Commands::Completions { .. } => {
            unreachable!("handled before a store is opened")
        }
    }
}

fn handle_config(cli: &Cli, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let mut config = Config::load(cli.config.as_deref())?;
            config.merge_with_cli(cli.url.clone(), cli.token.clone(), cli.backend);
            let shown = config.masked();
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&shown)?);
                }
                OutputFormat::Text => {
                    let backend = match shown.backend() {
                        Backend::Traccar => "traccar",
                        Backend::Mock => "mock",
                    };
                    println!("backend:  {}", backend);
                    println!("url:      {}", shown.url.as_deref().unwrap_or("(not set)"));
                    println!("token:    {}", shown.token.as_deref().unwrap_or("(not set)"));
                    if let Some(dir) = &shown.mock_dir {
                        println!("mock_dir: {}", dir.display());
                    }
                    for (key, value) in &shown.labels {
                        println!("labels.{} = {}", key, value);
                    }
                }
            }
            Ok(())
        }
        ConfigCommands::Path => {
            let paths = config::config_paths(cli.config.as_deref());
            match cli.format {
                OutputFormat::Json => {
                    let paths: Vec<_> = paths
                        .iter()
                        .map(|p| serde_json::json!({ "path": p, "exists": p.exists() }))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&paths)?);
                }
                OutputFormat::Text => {
                    for path in paths {
                        let marker = if path.exists() { "*" } else { " " };
                        println!("{} {}", marker, path.display());
                    }
                }
            }
            Ok(())
        }
    }
}
