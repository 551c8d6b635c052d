//! HTTP server command
//!
//! Resolves settings (flags > environment > config file > defaults), opens
//! the SQLite pool and runs the book API until shutdown.

use anyhow::{Context, Result};
use bookshelf_core::BookshelfConfig;
use bookshelf_server::db::create_pool_with_options;
use bookshelf_server::{run_server, AppState, ServerConfig};
use clap::Parser;
use std::net::SocketAddr;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: 127.0.0.1:3030)
    #[arg(long, short = 'b', env = "BOOKSHELF_BIND")]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Database URL, e.g. sqlite://bookshelf.db (overrides config/environment)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long)]
    pub max_connections: Option<u32>,
}

impl ServeArgs {
    /// Fold command-line overrides into the loaded config
    fn apply(self, mut config: BookshelfConfig) -> BookshelfConfig {
        if let Some(bind) = self.bind {
            config.server.bind = bind;
        }
        if self.cors_permissive {
            config.server.cors_permissive = true;
        }
        if let Some(url) = self.database_url {
            config.database.url = url;
        }
        if let Some(max) = self.max_connections {
            config.database.max_connections = max;
        }
        config
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.apply(BookshelfConfig::load()?);

    tracing::info!(
        bind = %config.server.bind,
        database = %config.database.url,
        "Starting bookshelf server"
    );

    let pool = create_pool_with_options(&config.database.url, config.database.max_connections)
        .await
        .context("Failed to create database pool")?;

    let state = AppState::sqlite(pool)
        .await
        .context("Failed to prepare database schema")?;

    let server_config = ServerConfig {
        bind_addr: config.server.bind,
        cors_permissive: config.server.cors_permissive,
    };

    // blocks until shutdown
    run_server(state, server_config)
        .await
        .context("Server error")?;

    Ok(())
}
