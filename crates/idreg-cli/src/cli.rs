use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "idreg",
    about = "Shared registry of opaque identifiers",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to the registry database (default: idreg.db)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the registry database and seed default settings
    Init(InitArgs),
    /// Run the HTTP registry server
    Serve(ServeArgs),
    /// Show or change registry settings
    Settings(SettingsArgs),
    /// Generate a sample identifier without registering it
    Preview(PreviewArgs),
}

#[derive(Args)]
pub struct InitArgs {}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on (overrides the config file)
    #[arg(long)]
    pub bind: Option<String>,
    /// TOML config file with bind_addr and db_path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Args)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: SettingsAction,
}

#[derive(Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,
    /// Update one or more settings values
    Set {
        #[arg(long)]
        id_length: Option<u32>,
        #[arg(long)]
        charset: Option<String>,
        #[arg(long)]
        admin_secret: Option<String>,
    },
}

#[derive(Args)]
pub struct PreviewArgs {}
