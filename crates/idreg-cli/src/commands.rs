use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;

use idreg_server::{RegistryServer, ServerConfig};
use idreg_service::RegistryService;
use idreg_store::SqliteStore;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let Cli { command, db, .. } = cli;
    match command {
        Command::Init(_) => cmd_init(db),
        Command::Serve(args) => cmd_serve(args, db),
        Command::Settings(args) => cmd_settings(args, db),
        Command::Preview(_) => cmd_preview(db),
    }
}

fn db_path(db: Option<PathBuf>) -> PathBuf {
    db.unwrap_or_else(|| PathBuf::from("idreg.db"))
}

fn open_service(db: Option<PathBuf>) -> anyhow::Result<RegistryService> {
    let store = SqliteStore::open(&db_path(db))?;
    Ok(RegistryService::new(Arc::new(store)))
}

fn cmd_init(db: Option<PathBuf>) -> anyhow::Result<()> {
    let path = db_path(db);
    // Opening bootstraps the schema and seeds default settings.
    SqliteStore::open(&path)?;
    println!(
        "{} Initialized registry database at {}",
        "✓".green().bold(),
        path.display().to_string().bold()
    );
    println!(
        "  {} change the admin secret before exposing suspend/resume",
        "note:".yellow()
    );
    Ok(())
}

fn cmd_serve(args: ServeArgs, db: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(db) = db {
        config.db_path = db;
    }
    if let Some(bind) = &args.bind {
        config.bind_addr = bind.parse()?;
    }

    println!(
        "ID registry server on {} (db: {})",
        config.bind_addr.to_string().bold(),
        config.db_path.display()
    );

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(RegistryServer::new(config).serve())?;
    Ok(())
}

fn cmd_settings(args: SettingsArgs, db: Option<PathBuf>) -> anyhow::Result<()> {
    let service = open_service(db)?;
    match args.action {
        SettingsAction::Show => {
            let settings = service.settings()?;
            println!("id_length    = {}", settings.id_length);
            println!("charset      = {}", settings.charset);
            println!("admin_secret = {}", "<hidden>".dimmed());
        }
        SettingsAction::Set {
            id_length,
            charset,
            admin_secret,
        } => {
            let mut settings = service.settings()?;
            if let Some(value) = id_length {
                settings.id_length = value;
            }
            if let Some(value) = charset {
                settings.charset = value;
            }
            if let Some(value) = admin_secret {
                settings.admin_secret = value;
            }
            service.update_settings(&settings)?;
            println!("{} Settings updated.", "✓".green().bold());
        }
    }
    Ok(())
}

fn cmd_preview(db: Option<PathBuf>) -> anyhow::Result<()> {
    let service = open_service(db)?;
    println!("{}", service.preview()?);
    Ok(())
}
