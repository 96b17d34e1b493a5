use anyhow::Result;
use chrono::Utc;
use colored::*;
use std::path::PathBuf;
use taskboard_cli::commands::{users_table, Workspace};
use taskboard_cli::Config;

pub fn export(config: &Config, output_dir: Option<PathBuf>) -> Result<()> {
    let workspace = Workspace::open(config.storage_config())?;
    let dir = output_dir.unwrap_or_else(|| config.export_dir.clone());

    match workspace.export(&dir, Utc::now().date_naive())? {
        Some(path) => {
            println!("{} {}", "Data exported to".green().bold(), path.display());
        }
        None => {
            println!("{}", "Nothing to export yet".yellow());
            println!("{}", "Log in once with 'taskboard tui' to create data".dimmed());
        }
    }
    Ok(())
}

pub fn list_users(config: &Config) -> Result<()> {
    let workspace = Workspace::open(config.storage_config())?;
    let users = workspace.users();

    if users.is_empty() {
        println!("{}", "No users found".yellow());
        println!("{}", "Start 'taskboard tui' to create the demo accounts".dimmed());
        return Ok(());
    }

    println!("{}", "Taskboard users".blue().bold());
    println!();
    println!("{}", users_table(&users));
    println!("Total: {} users", users.len().to_string().cyan());
    Ok(())
}
