use crate::{
    consts::{DEFAULT_DEFINITION_PATH, ENV_PREFIX},
    format::DefinitionFormat,
};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings of the command line tool itself, as opposed to the definition
/// it loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub definition: DefinitionSettings,
    pub tracing: TracingSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DefinitionSettings {
    pub path: PathBuf,
    /// Detected from the file extension when not set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<DefinitionFormat>,
}

impl Default for DefinitionSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DEFINITION_PATH),
            format: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TracingSettings {
    pub enabled: bool,
    pub format: TracingFormat,
}

impl Default for TracingSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            format: Default::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TracingFormat {
    Default,
    Json,
}

impl Default for TracingFormat {
    fn default() -> Self {
        Self::Default
    }
}

impl Settings {
    /// Layers the file named by `TRUFFLE_CONFIG__CONFIG` (if any) and
    /// `TRUFFLE_CONFIG__*` environment variables over the defaults.
    pub fn build() -> anyhow::Result<Self> {
        let config_path_name = format!("{ENV_PREFIX}__CONFIG");
        let config_path = std::env::var(&config_path_name);

        let mut builder = Config::builder();
        if let Ok(config_path) = config_path {
            builder = builder.add_source(File::with_name(&config_path));
            std::env::remove_var(&config_path_name);
        };
        // Use `__` so that keys with underscores in names stay addressable
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"));

        let settings: Self = builder.build()?.try_deserialize()?;
        Ok(settings)
    }
}
