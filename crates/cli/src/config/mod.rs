use clap::{Parser, Subcommand};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/moneytree.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub level: String,
    /// Account list response (JSON). `-` reads stdin.
    pub accounts: String,
    /// Report tabulation response (JSON). `-` reads stdin.
    pub tabulation: String,
    pub separator: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            accounts: "data/accounts.json".to_string(),
            tabulation: "data/tabulation.json".to_string(),
            separator: ":".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print the account tree.
    Accounts {
        /// One line per account with its full name instead of indentation.
        #[arg(long)]
        flat: bool,
    },
    /// Print one level of the report.
    Report {
        /// Series path below the top level, e.g. `Food/Groceries`.
        #[arg(long)]
        path: Option<String>,
    },
    /// Navigate the report with commands read from stdin.
    Browse,
}

#[derive(Debug, Parser)]
#[command(name = "moneytree", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    level: Option<String>,
    /// Override the account list file.
    #[arg(long)]
    accounts: Option<String>,
    /// Override the report tabulation file.
    #[arg(long)]
    tabulation: Option<String>,
    #[command(subcommand)]
    command: Command,
}

pub fn load() -> Result<(AppConfig, Command)> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("MONEYTREE"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(level) = args.level {
        settings.level = level;
    }
    if let Some(accounts) = args.accounts {
        settings.accounts = accounts;
    }
    if let Some(tabulation) = args.tabulation {
        settings.tabulation = tabulation;
    }

    Ok((settings, args.command))
}

/// Splits a `Food/Groceries` style path into series names.
pub fn split_path(path: &str) -> Vec<String> {
    path.split('/')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_report_path() {
        let args = Args::try_parse_from([
            "moneytree",
            "--tabulation",
            "tab.json",
            "report",
            "--path",
            "Food/Groceries",
        ])
        .unwrap();

        assert_eq!(args.tabulation.as_deref(), Some("tab.json"));
        assert_eq!(
            args.command,
            Command::Report {
                path: Some("Food/Groceries".to_string())
            }
        );
    }

    #[test]
    fn split_path_ignores_empty_segments() {
        assert_eq!(split_path("/Food//Groceries/"), vec!["Food", "Groceries"]);
        assert!(split_path("").is_empty());
    }
}
