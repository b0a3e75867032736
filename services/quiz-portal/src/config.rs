//! Configuration types and loading
//!
//! Config precedence: CLI args > env vars > config file > defaults.
//! The Telegram bot name and provider callback URL differ per deployment, so
//! TELEGRAM_BOT_NAME and TELEGRAM_AUTH_URL override the file.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Root configuration
#[derive(Debug, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub telegram: TelegramConfig,
}

/// HTTP listener settings
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    pub listen_addr: SocketAddr,
    #[serde(default = "default_max_connections")]
    pub max_connections: usize,
}

/// Credential cookie settings
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default = "default_max_age_days")]
    pub max_age_days: u64,
    #[serde(default)]
    pub secure: bool,
}

/// Login widget settings, passed through to the provider's script tag
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_name: String,
    #[serde(default = "default_auth_url")]
    pub auth_url: String,
    #[serde(default)]
    pub size: WidgetSize,
    #[serde(default)]
    pub show_user_pic: bool,
    #[serde(default = "default_request_access")]
    pub request_access: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            max_age_days: default_max_age_days(),
            secure: false,
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            bot_name: String::new(),
            auth_url: default_auth_url(),
            size: WidgetSize::default(),
            show_user_pic: false,
            request_access: default_request_access(),
        }
    }
}

fn default_max_connections() -> usize {
    1000
}

fn default_cookie_name() -> String {
    "accessToken".into()
}

/// Browsers cap cookie lifetime at 400 days
pub const MAX_AGE_DAYS_LIMIT: u64 = 400;

fn default_max_age_days() -> u64 {
    MAX_AGE_DAYS_LIMIT
}

fn default_auth_url() -> String {
    "http://localhost:8000/auth/telegram/callback".into()
}

fn default_request_access() -> String {
    "write".into()
}

impl Config {
    /// Load configuration from a TOML file, then overlay environment variables.
    pub fn load(path: &Path) -> common::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&contents)?;

        if let Ok(bot_name) = std::env::var("TELEGRAM_BOT_NAME") {
            config.telegram.bot_name = bot_name;
        }
        if let Ok(auth_url) = std::env::var("TELEGRAM_AUTH_URL") {
            config.telegram.auth_url = auth_url;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> common::Result<()> {
        if self.server.max_connections == 0 {
            return Err(common::Error::invalid(
                "server.max_connections",
                "must be greater than 0",
            ));
        }

        let name = &self.session.cookie_name;
        if name.is_empty() || !name.bytes().all(is_cookie_name_byte) {
            return Err(common::Error::invalid(
                "session.cookie_name",
                format!("not a valid cookie name: {name:?}"),
            ));
        }

        let max_age_days = self.session.max_age_days;
        if max_age_days == 0 || max_age_days > MAX_AGE_DAYS_LIMIT {
            return Err(common::Error::invalid(
                "session.max_age_days",
                format!("must be between 1 and {MAX_AGE_DAYS_LIMIT}, got {max_age_days}"),
            ));
        }

        if self.telegram.bot_name.trim().is_empty() {
            return Err(common::Error::invalid(
                "telegram.bot_name",
                "must be set in the config file or TELEGRAM_BOT_NAME",
            ));
        }

        let auth_url = url::Url::parse(&self.telegram.auth_url).map_err(|e| {
            common::Error::invalid("telegram.auth_url", format!("{e}: {}", self.telegram.auth_url))
        })?;
        if !matches!(auth_url.scheme(), "http" | "https") {
            return Err(common::Error::invalid(
                "telegram.auth_url",
                format!("must start with http:// or https://, got: {auth_url}"),
            ));
        }

        Ok(())
    }

    /// Resolve config file path from CLI arg or CONFIG_PATH env var.
    pub fn resolve_path(cli_path: Option<&str>) -> PathBuf {
        if let Some(p) = cli_path {
            return PathBuf::from(p);
        }
        if let Ok(p) = std::env::var("CONFIG_PATH") {
            return PathBuf::from(p);
        }
        PathBuf::from("quiz-portal.toml")
    }
}

/// RFC 6265 token characters: visible ASCII minus separators
fn is_cookie_name_byte(b: u8) -> bool {
    b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
}
