//! # lms-config
//!
//! Layered configuration loading for the LMS quiz client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LMS_*` prefix, `__` as separator)
//! 2. Project-level `.lms/config.toml`
//! 3. User-level `~/.config/lms/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `LMS_SESSION__TOKEN` -> `session.token`,
//! `LMS_QUIZ__TICK_MILLIS` -> `quiz.tick_millis`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lms_config::LmsConfig;
//!
//! let config = LmsConfig::load_with_dotenv().expect("config");
//! if config.session.is_configured() {
//!     println!("tick every {:?}", config.quiz.tick_period());
//! }
//! ```

mod error;
mod fixtures;
mod quiz;
mod session;

pub use error::ConfigError;
pub use fixtures::FixturesConfig;
pub use quiz::QuizConfig;
pub use session::SessionConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LmsConfig {
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub quiz: QuizConfig,
    #[serde(default)]
    pub fixtures: FixturesConfig,
}

impl LmsConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source cannot be parsed and
    /// `ConfigError::InvalidValue` when a loaded value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".lms/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("LMS_").split("__"))
    }

    /// Reject values the quiz session cannot run with.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.quiz.tick_millis == 0 {
            return Err(ConfigError::InvalidValue {
                field: "quiz.tick_millis".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    /// The configured session token, or an error when none is set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` for a missing or blank token.
    pub fn require_token(&self) -> Result<&str, ConfigError> {
        if self.session.is_configured() {
            Ok(self.session.token.trim())
        } else {
            Err(ConfigError::NotConfigured {
                section: "session".into(),
            })
        }
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lms").join("config.toml"))
    }
}
