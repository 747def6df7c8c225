use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_CONFIG_PATH: &str = "sharehub.toml";
pub const DEFAULT_SLACK_TIMEOUT_SECS: u64 = 10;
/// Legacy variable name for the Slack incoming-webhook URL.
pub const LEGACY_SLACK_HOOK_VAR: &str = "SLACK_HOOK";

/// Top-level config (sharehub.toml + SHAREHUB_* env overrides).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShareHubConfig {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub slack: SlackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_bind")]
    pub bind: String,
    /// Source addresses allowed to reach the gateway. Empty blocks everyone,
    /// `"*"` allows everyone.
    #[serde(default = "default_allowed_ips")]
    pub allowed_ips: Vec<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind: DEFAULT_BIND.to_string(),
            allowed_ips: default_allowed_ips(),
        }
    }
}

/// Slack incoming-webhook settings.
///
/// An empty `webhook_url` is accepted here; it only fails once a Slack
/// share is actually attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlackConfig {
    #[serde(default)]
    pub webhook_url: String,
    #[serde(default = "default_slack_timeout")]
    pub timeout_secs: u64,
}

impl Default for SlackConfig {
    fn default() -> Self {
        Self {
            webhook_url: String::new(),
            timeout_secs: DEFAULT_SLACK_TIMEOUT_SECS,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}
fn default_allowed_ips() -> Vec<String> {
    vec!["127.0.0.1".to_string(), "::1".to_string()]
}
fn default_slack_timeout() -> u64 {
    DEFAULT_SLACK_TIMEOUT_SECS
}

impl ShareHubConfig {
    /// Load config from a TOML file with SHAREHUB_* env var overrides.
    ///
    /// Layers, later wins:
    ///   1. built-in defaults
    ///   2. the TOML file (explicit path, else ./sharehub.toml; missing is fine)
    ///   3. SHAREHUB_SECTION__KEY env vars
    ///   4. SLACK_HOOK, mapped onto slack.webhook_url
    pub fn load(config_path: Option<&str>) -> crate::error::Result<Self> {
        let path = config_path.unwrap_or(DEFAULT_CONFIG_PATH);

        let config: ShareHubConfig = Figment::from(Serialized::defaults(ShareHubConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("SHAREHUB_").split("__"))
            .merge(
                Env::raw()
                    .only(&[LEGACY_SLACK_HOOK_VAR])
                    .map(|_| "slack.webhook_url".into()),
            )
            .extract()
            .map_err(|e| crate::error::CoreError::Config(e.to_string()))?;

        tracing::debug!(path = %path, "configuration loaded");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use figment::Jail;

    fn load_in_jail(path: Option<&str>) -> Result<ShareHubConfig, figment::Error> {
        ShareHubConfig::load(path).map_err(|e| figment::Error::from(e.to_string()))
    }

    #[test]
    fn defaults_when_nothing_is_configured() {
        Jail::expect_with(|_jail| {
            let config = load_in_jail(None)?;
            assert_eq!(config.gateway.port, 8080);
            assert_eq!(config.gateway.bind, "0.0.0.0");
            assert_eq!(config.gateway.allowed_ips, vec!["127.0.0.1", "::1"]);
            assert_eq!(config.slack.webhook_url, "");
            assert_eq!(config.slack.timeout_secs, 10);
            Ok(())
        });
    }

    #[test]
    fn toml_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "sharehub.toml",
                r#"
                [gateway]
                port = 9000
                allowed_ips = ["10.0.0.7"]

                [slack]
                webhook_url = "https://hooks.slack.test/abc"
                "#,
            )?;
            let config = load_in_jail(None)?;
            assert_eq!(config.gateway.port, 9000);
            assert_eq!(config.gateway.bind, "0.0.0.0");
            assert_eq!(config.gateway.allowed_ips, vec!["10.0.0.7"]);
            assert_eq!(config.slack.webhook_url, "https://hooks.slack.test/abc");
            assert_eq!(config.slack.timeout_secs, 10);
            Ok(())
        });
    }

    #[test]
    fn explicit_path_is_used() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[gateway]\nport = 7070\n")?;
            let config = load_in_jail(Some("custom.toml"))?;
            assert_eq!(config.gateway.port, 7070);
            Ok(())
        });
    }

    #[test]
    fn prefixed_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("sharehub.toml", "[gateway]\nport = 9000\n")?;
            jail.set_env("SHAREHUB_GATEWAY__PORT", "9191");
            jail.set_env("SHAREHUB_SLACK__TIMEOUT_SECS", "3");
            let config = load_in_jail(None)?;
            assert_eq!(config.gateway.port, 9191);
            assert_eq!(config.slack.timeout_secs, 3);
            Ok(())
        });
    }

    #[test]
    fn legacy_slack_hook_sets_webhook_url() {
        Jail::expect_with(|jail| {
            jail.set_env("SLACK_HOOK", "https://hooks.slack.test/legacy");
            let config = load_in_jail(None)?;
            assert_eq!(config.slack.webhook_url, "https://hooks.slack.test/legacy");
            Ok(())
        });
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        Jail::expect_with(|jail| {
            jail.create_file("sharehub.toml", "[gateway\nport = ")?;
            let err = ShareHubConfig::load(None).unwrap_err();
            assert!(matches!(err, CoreError::Config(_)), "got {err:?}");
            Ok(())
        });
    }
}
