pub mod cli;

use crate::utils::error::{CapdocError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Shared access passphrase. The system has no per-user accounts.
pub const ACCESS_PASSPHRASE: &str = "capdocscs2025";

/// Address the user must mail the downloaded artifact to when the automatic
/// send fails.
pub const FALLBACK_EMAIL: &str = "fse.scs@gobiernodecanarias.org";

pub const DEFAULT_RECIPIENT: &str = "fse.scs.evalres@gmail.com";
pub const MAILGUN_API_BASE: &str = "https://api.mailgun.net/v3";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "capdoc")]
#[command(about = "Registro de capacidad docente de centros sanitarios del SCS")]
pub struct CliConfig {
    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "logs/actividad.log")]
    pub log_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_path("log_path", &self.log_path)?;
        Ok(())
    }
}

/// Email transport settings, resolved from the environment. Domain and API key
/// have no defaults; when either is absent the notifier reports a failed
/// outcome instead of attempting a send.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    pub domain: Option<String>,
    pub api_key: Option<String>,
    pub recipient: String,
    pub api_base: String,
}

impl MailerConfig {
    pub fn from_env() -> Self {
        Self {
            domain: env_nonempty("MAILGUN_DOMAIN"),
            api_key: env_nonempty("MAILGUN_API_KEY"),
            recipient: env_nonempty("RECIPIENT_EMAIL")
                .unwrap_or_else(|| DEFAULT_RECIPIENT.to_string()),
            api_base: env_nonempty("MAILGUN_API_BASE")
                .unwrap_or_else(|| MAILGUN_API_BASE.to_string()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.domain.is_some() && self.api_key.is_some()
    }
}

impl Validate for MailerConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_base", &self.api_base)?;
        validate_non_empty_string("recipient", &self.recipient)?;

        if !self.is_configured() {
            return Err(CapdocError::ConfigError {
                message: "MAILGUN_DOMAIN y MAILGUN_API_KEY no configurados".to_string(),
            });
        }

        Ok(())
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_config_rejects_empty_paths() {
        let config = CliConfig {
            output_path: String::new(),
            log_path: "logs/actividad.log".to_string(),
            verbose: false,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn mailer_config_without_credentials_fails_validation() {
        let config = MailerConfig {
            domain: None,
            api_key: Some("key".to_string()),
            recipient: DEFAULT_RECIPIENT.to_string(),
            api_base: MAILGUN_API_BASE.to_string(),
        };
        assert!(!config.is_configured());
        assert!(config.validate().is_err());
    }

    #[test]
    fn mailer_config_with_credentials_validates() {
        let config = MailerConfig {
            domain: Some("scs.example".to_string()),
            api_key: Some("key".to_string()),
            recipient: DEFAULT_RECIPIENT.to_string(),
            api_base: MAILGUN_API_BASE.to_string(),
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mailer_config_rejects_bad_api_base() {
        let config = MailerConfig {
            domain: Some("scs.example".to_string()),
            api_key: Some("key".to_string()),
            recipient: DEFAULT_RECIPIENT.to_string(),
            api_base: "not-a-url".to_string(),
        };
        assert!(config.validate().is_err());
    }
}
