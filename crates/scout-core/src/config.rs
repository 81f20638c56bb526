use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Default production endpoint for the provider's conversational search API.
const DEFAULT_CHAT_API_URL: &str = "https://api.provider.example/ai/chat/v2";

/// Default production endpoint for the provider's business-detail API.
const DEFAULT_DETAIL_API_URL: &str = "https://api.provider.example/v3/businesses";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if values are present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let env = parse_environment(&or_default("SCOUT_ENV", "development"));
    let bind_addr = parse_addr("SCOUT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SCOUT_LOG_LEVEL", "info");
    let provider_api_key = lookup("SCOUT_PROVIDER_API_KEY").ok();
    let chat_api_url = or_default("SCOUT_CHAT_API_URL", DEFAULT_CHAT_API_URL);
    let detail_api_url = or_default("SCOUT_DETAIL_API_URL", DEFAULT_DETAIL_API_URL);
    let provider_timeout_secs = parse_u64("SCOUT_PROVIDER_TIMEOUT_SECS", "30")?;
    let provider_user_agent = or_default(
        "SCOUT_PROVIDER_USER_AGENT",
        "scout/0.1 (local-business-toolkit)",
    );
    let result_cap = parse_usize("SCOUT_RESULT_CAP", "3")?;

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        provider_api_key,
        chat_api_url,
        detail_api_url,
        provider_timeout_secs,
        provider_user_agent,
        result_cap,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
