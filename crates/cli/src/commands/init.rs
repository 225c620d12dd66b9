//! Initialize .gosentry.toml configuration

use anyhow::Result;
use gosentry_core::config::CONFIG_FILE_NAME;
use gosentry_core::GosentryConfig;
use std::path::{Path, PathBuf};

/// What `init` did
#[derive(Debug, PartialEq, Eq)]
pub enum InitOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

pub fn run(path: Option<&Path>) -> Result<InitOutcome> {
    let target_path = path.unwrap_or_else(|| Path::new("."));
    let config_path = target_path.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        println!("⚠️  {} already exists at {:?}", CONFIG_FILE_NAME, config_path);
        return Ok(InitOutcome::AlreadyExists(config_path));
    }

    GosentryConfig::default().save(&config_path)?;

    println!("✅ Created {} at {:?}", CONFIG_FILE_NAME, config_path);
    println!("\nYou can now customize the configuration and run:");
    println!("  gosentry");

    Ok(InitOutcome::Created(config_path))
}
