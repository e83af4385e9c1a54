//! Command implementations for ctsync-cli

pub mod plan;
pub mod process;
pub mod resources;
pub mod validate;

use std::path::Path;

use ctsync_client::{ClientConfig, HttpStore};
use ctsync_core::{DesiredType, KeyFilter, Reconciler};
use ctsync_meta::{ClientSettings, SyncConfig};

use crate::cli::{ClientArgs, FilterArgs};
use crate::error::{CliError, Result};

pub use plan::run_plan;
pub use process::run_process;
pub use resources::run_resources;
pub use validate::run_validate;

/// Load the config and normalize its types.
pub fn load_desired(config_path: &Path) -> Result<(SyncConfig, Vec<DesiredType>)> {
    let config = SyncConfig::load(config_path)?;
    let desired = config.desired_types()?;
    tracing::debug!(types = desired.len(), "Loaded desired types");
    Ok((config, desired))
}

/// The sweep filter: the command-line whitelist if given, else the config's.
pub fn resolve_filter(args: &FilterArgs, config: &SyncConfig) -> Result<KeyFilter> {
    let filter = match &args.whitelist {
        Some(pattern) if args.regex => KeyFilter::pattern(pattern)?,
        Some(needle) => KeyFilter::literal(needle),
        None => KeyFilter::literals(config.whitelist.iter().map(String::as_str)),
    };
    Ok(filter)
}

/// Merge credentials from flags and environment over the config file.
pub fn resolve_client(args: &ClientArgs, config: &SyncConfig) -> Result<ClientConfig> {
    let settings = config.client.clone().with_overrides(args.to_settings());
    client_config(settings)
}

fn client_config(settings: ClientSettings) -> Result<ClientConfig> {
    fn required(value: Option<String>, flag: &str, env: &str, key: &str) -> Result<String> {
        value.filter(|v| !v.is_empty()).ok_or_else(|| {
            CliError::user(format!(
                "Missing {key}: pass --{flag}, set {env}, or add client.{key} to the config"
            ))
        })
    }

    let project_key = required(settings.project_key, "project-key", "CTP_PROJECT_KEY", "project_key")?;
    let mut config = ClientConfig::new(
        project_key,
        required(settings.client_id, "client-id", "CTP_CLIENT_ID", "client_id")?,
        required(settings.client_secret, "client-secret", "CTP_CLIENT_SECRET", "client_secret")?,
        required(settings.auth_url, "auth-url", "CTP_AUTH_URL", "auth_url")?,
        required(settings.api_url, "api-url", "CTP_API_URL", "api_url")?,
    );
    config.scopes = settings.scopes;
    Ok(config)
}

/// Everything process and plan need before talking to the store.
pub fn build_reconciler(
    config_path: &Path,
    client: &ClientArgs,
    filter: &FilterArgs,
) -> Result<Reconciler<HttpStore>> {
    let (config, desired) = load_desired(config_path)?;
    let filter = resolve_filter(filter, &config)?;
    let store = HttpStore::new(&resolve_client(client, &config)?)?;
    Ok(Reconciler::new(store, desired).with_filter(filter))
}
