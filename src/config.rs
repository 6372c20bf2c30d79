//! Application configuration.

use std::{env, fmt, path::PathBuf, str::FromStr};

use crate::{culture::DEFAULT_COOKIE_NAME, error::ConfigError};

const LISTEN_ADDR: &str = "LISTEN_ADDR";
const APP_ENVIRONMENT: &str = "APP_ENVIRONMENT";
const RESOURCES_DIR: &str = "RESOURCES_DIR";

/// The hosting environment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Environment {
    /// Faults surface with the framework's own error responses.
    Development,
    /// Faults are rendered through the generic error page.
    #[default]
    Production,
}

impl Environment {
    /// Returns `true` if this is the development environment.
    #[inline]
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("development") {
            Ok(Environment::Development)
        } else if s.eq_ignore_ascii_case("production") {
            Ok(Environment::Production)
        } else {
            Err(ConfigError::UnknownEnvironment(s.to_string()))
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Environment::Development => f.write_str("Development"),
            Environment::Production => f.write_str("Production"),
        }
    }
}

/// Request localization options.
#[derive(Debug, Clone)]
pub struct LocalizationOptions {
    pub(crate) supported_cultures: Vec<String>,
    pub(crate) default_culture: String,
    pub(crate) apply_current_culture_to_response_headers: bool,
    pub(crate) cookie_name: String,
}

impl Default for LocalizationOptions {
    fn default() -> Self {
        LocalizationOptions {
            supported_cultures: vec!["en-US".to_string(), "es-ES".to_string()],
            default_culture: "en-US".to_string(),
            apply_current_culture_to_response_headers: true,
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
        }
    }
}

impl LocalizationOptions {
    /// Create an [`LocalizationOptions`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Specifies the supported cultures, in order of preference.
    #[must_use]
    pub fn supported_cultures<I, S>(self, cultures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported_cultures: cultures.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    /// Specifies the culture used when nothing else matches.
    #[must_use]
    pub fn default_culture(self, culture: impl Into<String>) -> Self {
        Self {
            default_culture: culture.into(),
            ..self
        }
    }

    /// Whether the resolved culture is echoed in the `Content-Language`
    /// response header.
    #[must_use]
    pub fn apply_current_culture_to_response_headers(self, enabled: bool) -> Self {
        Self {
            apply_current_culture_to_response_headers: enabled,
            ..self
        }
    }

    /// Specifies the name of the culture cookie.
    #[must_use]
    pub fn cookie_name(self, name: impl Into<String>) -> Self {
        Self {
            cookie_name: name.into(),
            ..self
        }
    }
}

/// Startup configuration of the whole application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub(crate) listen_addr: String,
    pub(crate) environment: Environment,
    pub(crate) resources_dir: Option<PathBuf>,
    pub(crate) localization: LocalizationOptions,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            listen_addr: "127.0.0.1:3000".to_string(),
            environment: Environment::default(),
            resources_dir: None,
            localization: LocalizationOptions::default(),
        }
    }
}

impl AppConfig {
    /// Create an [`AppConfig`] with default values.
    pub fn new() -> Self {
        Default::default()
    }

    /// Reads `LISTEN_ADDR`, `APP_ENVIRONMENT` and `RESOURCES_DIR`, falling back
    /// to the defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(addr) = env::var(LISTEN_ADDR) {
            config.listen_addr = addr;
        }
        if let Ok(environment) = env::var(APP_ENVIRONMENT) {
            config.environment = environment.parse()?;
        }
        if let Some(dir) = env::var_os(RESOURCES_DIR) {
            config.resources_dir = Some(dir.into());
        }
        Ok(config)
    }

    /// Specifies the listen address.
    #[must_use]
    pub fn listen_addr(self, addr: impl Into<String>) -> Self {
        Self {
            listen_addr: addr.into(),
            ..self
        }
    }

    /// Specifies the hosting environment.
    #[must_use]
    pub fn environment(self, environment: Environment) -> Self {
        Self {
            environment,
            ..self
        }
    }

    /// Load resources from a directory instead of the built-in ones.
    #[must_use]
    pub fn resources_dir(self, dir: impl Into<PathBuf>) -> Self {
        Self {
            resources_dir: Some(dir.into()),
            ..self
        }
    }

    /// Specifies the localization options.
    #[must_use]
    pub fn localization(self, localization: LocalizationOptions) -> Self {
        Self {
            localization,
            ..self
        }
    }

    /// Returns the listen address.
    pub fn get_listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// Returns the hosting environment.
    pub fn get_environment(&self) -> Environment {
        self.environment
    }
}
