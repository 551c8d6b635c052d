//! Configuration inspection commands

use anyhow::{Context, Result};
use bookshelf_core::BookshelfConfig;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a default config file
    Init(InitArgs),
    /// Print the effective configuration (file + environment)
    Show,
    /// Show config file path
    Path,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Force overwrite existing config
    #[arg(long, short)]
    pub force: bool,
}

pub fn run_config(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommands::Init(args) => run_init(args),
        ConfigCommands::Show => run_show(),
        ConfigCommands::Path => run_path(),
    }
}

fn run_init(args: InitArgs) -> Result<()> {
    let config_path = BookshelfConfig::config_path();

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config already exists at {:?}\n\nUse --force to overwrite",
            config_path
        );
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .context(format!("Failed to create {}", parent.display()))?;
    }

    let content = BookshelfConfig::default().to_toml()?;
    std::fs::write(&config_path, content)
        .context(format!("Failed to write config file: {:?}", config_path))?;

    println!("Created config at: {:?}", config_path);
    Ok(())
}

fn run_show() -> Result<()> {
    let config = BookshelfConfig::load()?;
    print!("{}", config.to_toml()?);
    Ok(())
}

fn run_path() -> Result<()> {
    println!("{}", BookshelfConfig::config_path().display());
    Ok(())
}
