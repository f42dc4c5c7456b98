use std::path::Path;

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Json, Toml, Yaml};

use super::EbiConfig;

// Embed the default config at compile time
pub const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

impl EbiConfig {
    /// Load the layered configuration, optionally including a custom file
    pub fn load(custom_config: Option<&str>) -> Result<Self> {
        let figment = Self::figment(custom_config)?;
        let config: EbiConfig = figment
            .extract()
            .context("Failed to load ebi configuration")?;
        tracing::trace!("CONFIG LOAD: api_url = {}", config.github.api_url);
        Ok(config)
    }

    /// The provider chain, lowest priority first
    pub fn figment(custom_config: Option<&str>) -> Result<Figment> {
        tracing::trace!("CONFIG LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_CONFIG));

        // User config, then repository config, in any supported format
        for base in [Self::user_config_base_path(), "ebi".to_string()] {
            figment = figment
                .merge(Toml::file(format!("{base}.toml")))
                .merge(Json::file(format!("{base}.json")))
                .merge(Yaml::file(format!("{base}.yaml")))
                .merge(Yaml::file(format!("{base}.yml")));
        }

        if let Some(path) = custom_config {
            if !Path::new(path).exists() {
                bail!("Configuration file '{}' does not exist", path);
            }
            tracing::trace!("CONFIG LOAD: Applying custom config {}", path);
            figment = match Path::new(path).extension().and_then(|e| e.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }

        // Environment variables always have highest priority
        Ok(figment.merge(Env::prefixed("EBI_").split("__")))
    }

    fn user_config_base_path() -> String {
        match std::env::var("HOME") {
            Ok(home) => format!("{}/.config/ebi/config", home),
            Err(_) => "~/.config/ebi/config".to_string(),
        }
    }
}
