use crate::{
    compiler::CompilerSettings,
    directories::DirectoryLayout,
    format::DefinitionFormat,
    network::{self, NetworkProfile},
    Error,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, path::Path};

/// Immutable configuration of the build and deployment toolchain.
///
/// Constructed once per invocation by [`ConfigurationDescriptor::load`] and
/// handed to consumers by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationDescriptor {
    networks: BTreeMap<String, NetworkProfile>,
    compiler: CompilerSettings,
    directories: DirectoryLayout,
}

// Plain values go first: toml refuses to emit values after tables.
#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Definition {
    contracts_directory: std::path::PathBuf,
    contracts_build_directory: std::path::PathBuf,
    migrations_directory: std::path::PathBuf,
    #[serde(deserialize_with = "network::deserialize_networks")]
    networks: BTreeMap<String, NetworkProfile>,
    compilers: Compilers,
}

#[derive(Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct Compilers {
    solc: CompilerSettings,
}

impl ConfigurationDescriptor {
    /// Loads the definition at `path`, detecting its format from the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let format = DefinitionFormat::from_path(path)
            .ok_or_else(|| Error::UnsupportedFormat(path.to_path_buf()))?;
        Self::load_with_format(path, format)
    }

    pub fn load_with_format(
        path: impl AsRef<Path>,
        format: DefinitionFormat,
    ) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|err| Error::read(path, err))?;
        let source = String::from_utf8(bytes).map_err(|err| {
            Error::MalformedConfig(format!("{} is not valid UTF-8: {err}", path.display()))
        })?;
        let descriptor = Self::parse(&source, format)?;
        tracing::info!(
            path = %path.display(),
            networks = descriptor.networks.len(),
            solc = %descriptor.compiler.version,
            "configuration loaded"
        );
        Ok(descriptor)
    }

    /// Parses an in-memory definition.
    pub fn parse(source: &str, format: DefinitionFormat) -> Result<Self, Error> {
        tracing::debug!(format = %format, "parsing configuration definition");
        let definition = format.parse(source).map_err(Error::MalformedConfig)?;
        Self::from_definition(definition)
    }

    /// Serializes back into the definition format. Parsing the output yields
    /// an identical descriptor.
    pub fn render(&self, format: DefinitionFormat) -> Result<String, Error> {
        format
            .render(&self.to_definition())
            .map_err(Error::Serialization)
    }

    /// Case-sensitive lookup of a network profile.
    pub fn get_network(&self, name: &str) -> Result<&NetworkProfile, Error> {
        self.networks
            .get(name)
            .ok_or_else(|| Error::NetworkNotFound(name.to_string()))
    }

    /// Network profiles ordered by name.
    pub fn networks(&self) -> impl Iterator<Item = &NetworkProfile> {
        self.networks.values()
    }

    pub fn compiler_settings(&self) -> &CompilerSettings {
        &self.compiler
    }

    pub fn directory_layout(&self) -> &DirectoryLayout {
        &self.directories
    }

    fn from_definition(definition: Definition) -> Result<Self, Error> {
        for (key, path) in [
            ("contracts_directory", &definition.contracts_directory),
            ("contracts_build_directory", &definition.contracts_build_directory),
            ("migrations_directory", &definition.migrations_directory),
        ] {
            if path.as_os_str().is_empty() {
                return Err(Error::MalformedConfig(format!("{key} must not be empty")));
            }
        }
        let compiler = definition.compilers.solc;
        if !compiler.optimizer.enabled {
            tracing::debug!(
                runs = compiler.optimizer.runs,
                "optimizer is disabled, runs are ignored"
            );
        }
        Ok(Self {
            networks: definition.networks,
            compiler,
            directories: DirectoryLayout {
                contracts_directory: definition.contracts_directory,
                contracts_build_directory: definition.contracts_build_directory,
                migrations_directory: definition.migrations_directory,
            },
        })
    }

    fn to_definition(&self) -> Definition {
        Definition {
            contracts_directory: self.directories.contracts_directory.clone(),
            contracts_build_directory: self.directories.contracts_build_directory.clone(),
            migrations_directory: self.directories.migrations_directory.clone(),
            networks: self.networks.clone(),
            compilers: Compilers {
                solc: self.compiler.clone(),
            },
        }
    }
}
