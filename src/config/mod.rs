use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_API_URL: &str = "https://api.linear.app/graphql";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub auth: Auth,
    #[serde(default)]
    pub linear: LinearConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Auth {
    #[serde(default)]
    pub api_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for LinearConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
        }
    }
}

/// Why the configuration could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("config file not found at {0}. Run `lin --init` to create one.")]
    NotFound(PathBuf),

    #[error("failed to read config from {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config from {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("no auth.api_token set in {0}")]
    MissingToken(PathBuf),
}

/// `~/.config/lin`
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
    Ok(home.join(".config").join("lin"))
}

pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };

    if !path.exists() {
        return Err(ConfigError::NotFound(path));
    }

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;

    let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
    })?;

    config.auth.api_token = config.auth.api_token.trim().to_string();
    if config.auth.api_token.is_empty() {
        return Err(ConfigError::MissingToken(path));
    }

    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub async fn init_wizard(path: Option<&Path>) -> anyhow::Result<()> {
    use std::io::{self, Write};

    println!("lin configuration");
    println!("=================\n");

    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => default_config_path()?,
    };
    if config_path.exists() {
        print!("Config already exists at {}. Overwrite? [y/N] ", config_path.display());
        io::stdout().flush()?;
        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    print!("Linear API token (https://linear.app/settings/api): ");
    io::stdout().flush()?;
    let mut api_token = String::new();
    io::stdin().read_line(&mut api_token)?;

    let api_token = api_token.trim().to_string();
    if api_token.is_empty() {
        anyhow::bail!("An API token is required");
    }

    let config = Config {
        auth: Auth { api_token },
        linear: LinearConfig::default(),
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // Write config with restricted permissions
    let content = toml::to_string_pretty(&config)?;
    std::fs::write(&config_path, content)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&config_path, std::fs::Permissions::from_mode(0o600))?;
    }

    println!("\nConfig saved to {}", config_path.display());
    println!("Run `lin` to pick from your issues.");

    Ok(())
}
