use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use domain_characters::UpdateValidation;

// Import MongoDB config from the database library
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Settings owned by the characters routes
#[derive(Clone, Debug, Default)]
pub struct CharactersConfig {
    /// How `PUT` bodies are checked (`CHARACTERS_UPDATE_VALIDATION`)
    pub update_validation: UpdateValidation,
}

impl FromEnv for CharactersConfig {
    /// - CHARACTERS_UPDATE_VALIDATION: `unchecked` (default) or `schema`
    fn from_env() -> Result<Self, ConfigError> {
        let raw = env_or_default("CHARACTERS_UPDATE_VALIDATION", "unchecked");
        let update_validation = raw.parse().map_err(|_| ConfigError::ParseError {
            key: "CHARACTERS_UPDATE_VALIDATION".to_string(),
            details: format!("expected \"unchecked\" or \"schema\", got {raw:?}"),
        })?;

        Ok(Self { update_validation })
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub environment: Environment,
    pub characters: CharactersConfig,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongodb = MongoConfig::from_env()?;
        let server = ServerConfig::from_env()?;
        let characters = CharactersConfig::from_env()?;

        Ok(Self {
            app: app_info!(),
            mongodb,
            server,
            environment,
            characters,
        })
    }
}
