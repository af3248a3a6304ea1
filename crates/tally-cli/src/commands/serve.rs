//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use tally_server::{ServerConfig, ALLOWED_ORIGINS_ENV, JWT_SECRET_ENV};

use super::open_db;

pub async fn cmd_serve(db_path: &Path, host: &str, port: u16) -> Result<()> {
    let config = ServerConfig::from_env()
        .with_context(|| format!("Set {} before starting the server", JWT_SECRET_ENV))?;

    println!("🚀 Starting Tally web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    println!(
        "   🔐 Authentication: bearer tokens (expire after {}s)",
        config.jwt.expiration_secs
    );
    if config.allowed_origins.is_empty() {
        println!("   🌐 CORS: same-origin only");
    } else {
        println!(
            "   🌐 CORS: {} ({})",
            config.allowed_origins.join(", "),
            ALLOWED_ORIGINS_ENV
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");
    println!();

    let db = open_db(db_path)?;
    tally_server::serve(db, host, port, config)
        .await
        .context("Server error")?;

    Ok(())
}
