//! Config loading: `.env`, then defaults, then the TOML file, then `NUMBER_WINDOW_*` vars.

use common::{Error, ServiceConfig};
use std::path::Path;

fn parse_positive_usize(raw: &str, env_name: &str) -> Result<usize, Error> {
    let parsed = raw
        .trim()
        .parse::<usize>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn parse_positive_u64(raw: &str, env_name: &str) -> Result<u64, Error> {
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn is_http_url(raw: &str) -> bool {
    raw.starts_with("http://") || raw.starts_with("https://")
}

pub fn validate_config(config: &ServiceConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.bind_addr.trim().is_empty() {
        issues.push("bind_addr must not be empty".into());
    }
    if config.window_size == 0 {
        issues.push("window_size must be > 0".into());
    }
    if config.fetch_timeout_ms == 0 {
        issues.push("fetch_timeout_ms must be > 0".into());
    }

    let upstream = &config.upstream;
    for (name, url) in [
        ("upstream.primes_url", &upstream.primes_url),
        ("upstream.fibonacci_url", &upstream.fibonacci_url),
        ("upstream.even_url", &upstream.even_url),
        ("upstream.random_url", &upstream.random_url),
    ] {
        if !is_http_url(url.trim()) {
            issues.push(format!("{name} must be an http(s) URL"));
        }
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Apply `NUMBER_WINDOW_*` overrides. `lookup` is `std::env::var` in production.
pub fn apply_env_overrides<F>(config: &mut ServiceConfig, lookup: F) -> Result<(), Error>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(addr) = lookup("NUMBER_WINDOW_BIND_ADDR") {
        config.bind_addr = addr.trim().to_string();
    }
    if let Some(raw) = lookup("NUMBER_WINDOW_SIZE") {
        config.window_size = parse_positive_usize(&raw, "NUMBER_WINDOW_SIZE")?;
    }
    if let Some(raw) = lookup("NUMBER_WINDOW_FETCH_TIMEOUT_MS") {
        config.fetch_timeout_ms = parse_positive_u64(&raw, "NUMBER_WINDOW_FETCH_TIMEOUT_MS")?;
    }
    if let Some(url) = lookup("NUMBER_WINDOW_PRIMES_URL") {
        config.upstream.primes_url = url.trim().to_string();
    }
    if let Some(url) = lookup("NUMBER_WINDOW_FIBONACCI_URL") {
        config.upstream.fibonacci_url = url.trim().to_string();
    }
    if let Some(url) = lookup("NUMBER_WINDOW_EVEN_URL") {
        config.upstream.even_url = url.trim().to_string();
    }
    if let Some(url) = lookup("NUMBER_WINDOW_RANDOM_URL") {
        config.upstream.random_url = url.trim().to_string();
    }
    Ok(())
}

/// Load service configuration from environment and optional config file.
pub fn load_config(config_path: &Path) -> Result<ServiceConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = ServiceConfig::default();

    // 3. Try loading the config file if it exists.
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", config_path.display(), e))
        })?;
        config = toml::from_str(&contents).map_err(|e| {
            Error::Config(format!("Failed to parse {}: {}", config_path.display(), e))
        })?;
    }

    // 4. Override with environment variables (highest priority).
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    validate_config(&config)?;

    Ok(config)
}
