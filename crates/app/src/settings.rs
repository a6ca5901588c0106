//! Handles settings for the application.
//!
//! Sources, later ones winning: built-in defaults, the optional TOML file
//! (`config/expense_tracker.toml` or `--config`), `EXPENSE_TRACKER__*`
//! environment variables, then command line flags.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "config/expense_tracker";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct App {
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

impl Default for Server {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8050,
        }
    }
}

/// A login provisioned at startup. Exactly one of `password` and
/// `password_hash` (Argon2 PHC string) is expected; the hash wins if both are
/// set.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub username: String,
    pub password: Option<String>,
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub accounts: Vec<Account>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: App::default(),
            server: Server::default(),
            accounts: vec![Account {
                username: "admin".to_string(),
                password: Some("1234".to_string()),
                password_hash: None,
            }],
        }
    }
}

#[derive(Debug, Default, Parser)]
#[command(name = "expense_tracker", version, about = "Single-user expense tracking API")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override bind address.
    #[arg(long)]
    pub bind: Option<String>,
    /// Override port.
    #[arg(long)]
    pub port: Option<u16>,
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub level: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Args::parse())
    }

    pub fn load(args: Args) -> Result<Self, ConfigError> {
        let required = args.config.is_some();
        let path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(path).required(required))
            .add_source(Environment::with_prefix("EXPENSE_TRACKER").separator("__"))
            .build()?
            .try_deserialize()?;

        if let Some(bind) = args.bind {
            settings.server.bind = bind;
        }
        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(level) = args.level {
            settings.app.level = level;
        }

        if settings.accounts.is_empty() {
            return Err(ConfigError::Message(
                "at least one account is required".to_string(),
            ));
        }
        if let Some(account) = settings
            .accounts
            .iter()
            .find(|a| a.password.is_none() && a.password_hash.is_none())
        {
            return Err(ConfigError::Message(format!(
                "account \"{}\" has neither password nor password_hash",
                account.username
            )));
        }

        Ok(settings)
    }
}
