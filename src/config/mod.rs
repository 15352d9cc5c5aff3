use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Browser User-Agent the registry expects; requests without it are rejected.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cert-lookup")]
#[command(about = "Look up a game-cartridge grading certificate")]
pub struct CliConfig {
    /// Certificate id to look up.
    #[arg(required_unless_present = "count")]
    pub cert_id: Option<String>,

    #[arg(long, default_value = "cli")]
    pub requester: String,

    #[arg(long, default_value = "https://api.watagames.com/api")]
    pub registry_base_url: String,

    #[arg(long)]
    pub webhook_url: Option<String>,

    #[arg(long, default_value = "./request_counter.txt")]
    pub counter_file: String,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Print the total request count and exit.
    #[arg(long)]
    pub count: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn registry_base_url(&self) -> &str {
        &self.registry_base_url
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn webhook_url(&self) -> Option<&str> {
        self.webhook_url.as_deref()
    }

    fn counter_file(&self) -> &str {
        &self.counter_file
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("registry_base_url", &self.registry_base_url)?;
        if let Some(webhook_url) = &self.webhook_url {
            validation::validate_url("webhook_url", webhook_url)?;
        }
        validation::validate_path("counter_file", &self.counter_file)?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            cert_id: Some("12345".to_string()),
            requester: "cli".to_string(),
            registry_base_url: "https://api.watagames.com/api".to_string(),
            webhook_url: None,
            counter_file: "./request_counter.txt".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            count: false,
            verbose: false,
        }
    }

    #[test]
    fn test_default_config_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_bad_webhook_url_rejected() {
        let mut config = base_config();
        config.webhook_url = Some("not-a-url".to_string());
        assert!(config.validate().is_err());
    }
}
