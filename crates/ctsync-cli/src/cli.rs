//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use ctsync_meta::ClientSettings;

/// ctsync - Reconcile commercetools custom types with a config file
#[derive(Parser, Debug)]
#[command(name = "ctsync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the custom type config (YAML, JSON, or TOML)
    #[arg(
        short,
        long,
        global = true,
        env = "CTSYNC_CONFIG",
        default_value = "ctsync.yaml"
    )]
    pub config: PathBuf,

    #[command(flatten)]
    pub client: ClientArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// API credentials; each falls back to its environment variable, then to the
/// `client` section of the config
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientArgs {
    /// Project key
    #[arg(long, global = true, env = "CTP_PROJECT_KEY")]
    pub project_key: Option<String>,

    /// API client id
    #[arg(long, global = true, env = "CTP_CLIENT_ID")]
    pub client_id: Option<String>,

    /// API client secret
    #[arg(long, global = true, env = "CTP_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Auth service URL
    #[arg(long, global = true, env = "CTP_AUTH_URL")]
    pub auth_url: Option<String>,

    /// API URL
    #[arg(long, global = true, env = "CTP_API_URL")]
    pub api_url: Option<String>,
}

impl ClientArgs {
    pub fn to_settings(&self) -> ClientSettings {
        ClientSettings {
            project_key: self.project_key.clone(),
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            auth_url: self.auth_url.clone(),
            api_url: self.api_url.clone(),
            scopes: Vec::new(),
        }
    }
}

/// Which undesired types the deletion sweep may touch
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterArgs {
    /// Only delete undesired types whose key contains this text
    /// (defaults to the config's `whitelist`)
    pub whitelist: Option<String>,

    /// Treat the whitelist as a regular expression
    #[arg(long, requires = "whitelist")]
    pub regex: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Create, update, and delete types until the project matches the config
    ///
    /// Undesired types are deleted first, then every configured type is
    /// created or updated in config order. Exits with 1 if any type failed.
    ///
    /// Examples:
    ///   ctsync process              # Sweep with the config's whitelist
    ///   ctsync process order-       # Only delete undesired `order-*` types
    ///   ctsync process '^(a|b)-' --regex
    Process {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show the requests process would send, without sending writes
    Plan {
        #[command(flatten)]
        filter: FilterArgs,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Validate the config and list its types
    Validate {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// List configured types by the resource they attach to
    Resources {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },
}
