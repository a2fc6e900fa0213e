use std::env;
use std::time::Duration;

use ipa_core::{AppError, AppResult};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Which user directory adapter the console talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryKind {
    Http,
    Memory,
}

/// Console command parsed from the process arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    Features,
    Users,
    MoveUser { user_id: u64, role: String },
}

impl ConsoleCommand {
    pub fn parse(args: &[String]) -> AppResult<Self> {
        match args {
            [] => Ok(Self::Features),
            [command] if command == "features" => Ok(Self::Features),
            [command] if command == "users" => Ok(Self::Users),
            [command, user_id, role @ ..] if command == "move-user" && !role.is_empty() => {
                let user_id = user_id.parse::<u64>().map_err(|error| {
                    AppError::Validation(format!("invalid user id '{user_id}': {error}"))
                })?;
                Ok(Self::MoveUser {
                    user_id,
                    role: role.join(" "),
                })
            }
            _ => Err(AppError::Validation(
                "usage: ipa-console [features | users | move-user <user_id> <role>]".to_owned(),
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: Url,
    pub api_token: Option<String>,
    pub http_timeout: Duration,
    pub directory: DirectoryKind,
}

impl ConsoleConfig {
    pub fn load() -> AppResult<Self> {
        let api_base_url = env::var("IPA_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080/api".to_owned());
        let api_base_url = Url::parse(api_base_url.as_str()).map_err(|error| {
            AppError::Validation(format!("invalid IPA_API_BASE_URL '{api_base_url}': {error}"))
        })?;

        let api_token = env::var("IPA_API_TOKEN")
            .ok()
            .filter(|value| !value.trim().is_empty());

        let http_timeout = Duration::from_secs(parse_env_u64("IPA_HTTP_TIMEOUT_SECS", 15)?);

        let directory = match env::var("IPA_DIRECTORY")
            .unwrap_or_else(|_| "http".to_owned())
            .as_str()
        {
            "http" => DirectoryKind::Http,
            "memory" => DirectoryKind::Memory,
            other => {
                return Err(AppError::Validation(format!(
                    "IPA_DIRECTORY must be either 'http' or 'memory', got '{other}'"
                )));
            }
        };

        Ok(Self {
            api_base_url,
            api_token,
            http_timeout,
            directory,
        })
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_env_u64(name: &str, default: u64) -> AppResult<u64> {
    match env::var(name) {
        Ok(value) => value
            .parse::<u64>()
            .map_err(|error| AppError::Validation(format!("invalid {name}: {error}"))),
        Err(_) => Ok(default),
    }
}
