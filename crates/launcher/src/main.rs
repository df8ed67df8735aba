//! Spacebears launcher - startup configuration entry point
//!
//! Loads the startup configuration from the environment once, before any
//! service component starts. Any configuration error aborts the process
//! with a non-zero exit status.

use anyhow::{Context, Result};
use clap::Parser;
use config::{Config, ConfigLoader, ConfigValidator};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::{Args, PrintFormat};

fn main() -> Result<()> {
    // Load .env file if it exists; reported once logging is up
    let dotenv_result = dotenv::dotenv();

    let args = Args::parse();

    // Initialize logging
    init_logging()?;

    match dotenv_result {
        Ok(path) => info!("Loaded environment variables from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Could not load .env file: {}", e),
    }

    if let Some(path) = args.write_example {
        ConfigLoader::create_example(&path)?;
        info!("Example configuration written to: {}", path.display());
        return Ok(());
    }

    info!("Starting Spacebears v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    log_summary(&config);

    if let Some(format) = args.print {
        let rendered = match format {
            PrintFormat::Yaml => config.to_yaml().context("Failed to render configuration as YAML")?,
            PrintFormat::Json => config.to_json().context("Failed to render configuration as JSON")?,
        };
        println!("{}", rendered);
    }

    info!("Configuration ready");
    Ok(())
}

/// Load configuration, honoring `--prefix`
fn load_config(args: &Args) -> Result<Config> {
    let config = match args.prefix.as_deref() {
        Some(prefix) => ConfigLoader::load_prefixed(prefix),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration")?;

    Ok(config)
}

/// Log the loaded configuration and any validation warnings
fn log_summary(config: &Config) {
    info!("Admin username: {}", config.admin_username);
    info!("Port: {}", config.port);
    info!("Database file: {}", config.db_file.display());

    let report = ConfigValidator::validate(config);
    for issue in &report.warnings {
        warn!(field = %issue.field, "{}", issue.message);
    }
    if report.has_warnings() {
        warn!("{}", report.summary());
    }
}

/// Initialize logging based on environment variables
fn init_logging() -> Result<()> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    // Logs go to stderr so --print output on stdout stays clean
    match log_format.as_str() {
        "pretty" => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to initialize pretty logging")?;
        }
        _ => {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to initialize JSON logging")?;
        }
    }

    info!("Logging initialized");
    info!("Log level: {}", log_level);
    info!("Log format: {}", log_format);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args_with_prefix(prefix: &str) -> Args {
        Args::try_parse_from(["spacebears", "--prefix", prefix]).unwrap()
    }

    #[test]
    fn test_missing_password_aborts_startup() {
        Jail::expect_with(|jail| {
            jail.set_env("SPACEBEARS_NOPW_PORT", "9000");

            let err = load_config(&args_with_prefix("SPACEBEARS_NOPW_")).unwrap_err();
            let chain = format!("{:#}", err);
            assert!(chain.contains("Failed to load configuration"));
            assert!(chain.contains("admin_password"));
            Ok(())
        });
    }

    #[test]
    fn test_bad_port_aborts_startup() {
        Jail::expect_with(|jail| {
            jail.set_env("SPACEBEARS_BADPORT_ADMIN_PASSWORD", "secret");
            jail.set_env("SPACEBEARS_BADPORT_PORT", "abc");

            let err = load_config(&args_with_prefix("SPACEBEARS_BADPORT_")).unwrap_err();
            let chain = format!("{:#}", err);
            assert!(chain.contains("Failed to load configuration"));
            assert!(chain.contains("port=\"abc\""));
            Ok(())
        });
    }

    #[test]
    fn test_valid_environment_loads() {
        Jail::expect_with(|jail| {
            jail.set_env("SPACEBEARS_OK_ADMIN_PASSWORD", "secret");
            jail.set_env("SPACEBEARS_OK_PORT", "8080");

            let config = load_config(&args_with_prefix("SPACEBEARS_OK_")).unwrap();
            assert_eq!(config.admin_password, "secret");
            assert_eq!(config.port, 8080);
            assert_eq!(config.admin_username, "admin");
            Ok(())
        });
    }
}
