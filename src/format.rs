use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::{
    fmt::{Display, Formatter},
    path::Path,
    str::FromStr,
};
use thiserror::Error;

/// On-disk format of a configuration definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefinitionFormat {
    Toml,
    Json,
}

impl Default for DefinitionFormat {
    fn default() -> Self {
        Self::Toml
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown definition format {0:?}, expected `toml` or `json`")]
pub struct UnknownFormat(String);

impl DefinitionFormat {
    /// Detects the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub(crate) fn parse<T: DeserializeOwned>(self, source: &str) -> Result<T, String> {
        match self {
            Self::Toml => toml::from_str(source).map_err(|err| err.to_string()),
            Self::Json => serde_json::from_str(source).map_err(|err| err.to_string()),
        }
    }

    pub(crate) fn render<T: Serialize>(self, value: &T) -> Result<String, String> {
        match self {
            Self::Toml => toml::to_string(value).map_err(|err| err.to_string()),
            Self::Json => serde_json::to_string_pretty(value).map_err(|err| err.to_string()),
        }
    }
}

impl Display for DefinitionFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Toml => f.write_str("toml"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for DefinitionFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}
