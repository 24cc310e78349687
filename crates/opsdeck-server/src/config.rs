use std::env;
use std::path::Path;

use anyhow::Context;
use config::Config;
use opsdeck_routing::prelude::{TenantInfo, TenantRegistry};
use opsdeck_types::prelude::TenantId;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "ServerConfig::default_address")]
    pub address: String,
    #[serde(default = "ServerConfig::default_port")]
    pub port: u16,
}

impl ServerConfig {
    pub fn default_address() -> String {
        "127.0.0.1".to_string()
    }

    pub fn default_port() -> u16 {
        8080
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: Self::default_address(),
            port: Self::default_port(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    /// Host label the bare apex redirects to.
    #[serde(default = "AppConfig::default_default_tenant")]
    pub default_tenant: String,
    /// Tenant allow-list; falls back to the demo roster when the file
    /// and environment name none.
    #[serde(default = "AppConfig::default_tenants")]
    pub tenants: Vec<TenantInfo>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            default_tenant: Self::default_default_tenant(),
            tenants: Self::default_tenants(),
        }
    }
}

impl AppConfig {
    fn default_default_tenant() -> String {
        TenantRegistry::demo().default_tenant().to_string()
    }

    fn default_tenants() -> Vec<TenantInfo> {
        TenantRegistry::demo().tenants().to_vec()
    }

    pub fn registry(&self) -> TenantRegistry {
        TenantRegistry::new(
            TenantId::from(self.default_tenant.as_str()),
            self.tenants.clone(),
        )
    }

    /// Optional TOML file (`OPSDECK_CONFIG_FILE`, default
    /// `config/opsdeck.local.toml`) overlaid with `OPSDECK__`-prefixed
    /// environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let config_file = env::var("OPSDECK_CONFIG_FILE")
            .unwrap_or_else(|_| "config/opsdeck.local.toml".to_string());

        let mut builder = Config::builder()
            .set_default("server.address", ServerConfig::default_address())?
            .set_default("server.port", ServerConfig::default_port())?;

        if Path::new(&config_file).exists() {
            builder = builder.add_source(config::File::from(Path::new(&config_file)));
        }

        builder = builder.add_source(config::Environment::with_prefix("OPSDECK").separator("__"));

        builder
            .build()
            .context("failed to build configuration")?
            .try_deserialize()
            .context("failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_carry_the_demo_roster() {
        let registry = AppConfig::default().registry();
        assert_eq!(registry.default_tenant().as_str(), "acme");
        assert!(registry.is_tenant("acme"));
        assert!(registry.is_tenant("globex"));
        assert!(!registry.is_tenant("initech"));
    }

    #[test]
    fn configured_roster_replaces_the_default() {
        let config: AppConfig = serde_json::from_value(json!({
            "default_tenant": "initech",
            "tenants": [{"slug": "initech", "display_name": "Initech"}]
        }))
        .unwrap();
        let registry = config.registry();
        assert_eq!(registry.default_tenant().as_str(), "initech");
        assert!(registry.is_tenant("initech"));
        assert!(!registry.is_tenant("acme"));
    }
}
