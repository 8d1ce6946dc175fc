use crate::config::toml_config::TomlConfig;
use crate::config::Settings;
use crate::utils::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "quote-sync")]
#[command(about = "Keep a local collection of quotes in sync with a remote endpoint")]
pub struct CliConfig {
    /// Optional TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved quotes and selected category
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    #[arg(long, global = true)]
    pub api_endpoint: Option<String>,

    /// Seconds between periodic sync cycles
    #[arg(long, global = true)]
    pub sync_interval: Option<u64>,

    /// Maximum number of remote items taken per sync
    #[arg(long, global = true)]
    pub fetch_limit: Option<usize>,

    /// Seconds a notification stays visible
    #[arg(long, global = true)]
    pub notification_secs: Option<u64>,

    /// HTTP request timeout in seconds
    #[arg(long, global = true)]
    pub request_timeout: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum CliCommand {
    /// Show a random quote, optionally switching the selected category first
    Show {
        #[arg(long)]
        category: Option<String>,
    },
    /// Add a quote and push it to the remote endpoint
    Add { text: String, category: String },
    /// List quotes, optionally for a single category
    List {
        #[arg(long, default_value = "all")]
        category: String,
    },
    /// Show the category selector
    Categories,
    /// Change the selected category ("all" for every category)
    Filter { value: String },
    /// Write quotes.json into the output directory
    Export {
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Replace the collection with the contents of an exported file
    Import { file: PathBuf },
    /// Run one sync cycle against the remote endpoint
    Sync,
    /// Interactive session with periodic background sync (default)
    Watch,
}

impl CliConfig {
    /// Defaults, overlaid by the TOML file (if any), overlaid by flags.
    pub fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::default();

        if let Some(path) = &self.config {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            TomlConfig::from_file(path)?.apply_to(&mut settings);
        }

        if let Some(data_dir) = &self.data_dir {
            settings.data_dir = data_dir.clone();
        }
        if let Some(endpoint) = &self.api_endpoint {
            settings.api_endpoint = endpoint.clone();
        }
        if let Some(interval) = self.sync_interval {
            settings.sync_interval_secs = interval;
        }
        if let Some(limit) = self.fetch_limit {
            settings.fetch_limit = limit;
        }
        if let Some(seconds) = self.notification_secs {
            settings.notification_secs = seconds;
        }
        if let Some(timeout) = self.request_timeout {
            settings.request_timeout_secs = timeout;
        }

        Ok(settings)
    }

    pub fn command(&self) -> CliCommand {
        self.command.clone().unwrap_or(CliCommand::Watch)
    }
}
