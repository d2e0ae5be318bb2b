mod pragma;
mod sources;

pub use pragma::{find_requirement, InvalidRequirement, SolidityRequirement};
pub use sources::{check_sources, PragmaMismatch};

use ethers_solc::artifacts::{Optimizer, Settings};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

/// The `solc` entry of a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SolcDefinition", into = "SolcDefinition")]
pub struct CompilerSettings {
    pub version: semver::Version,
    pub optimizer: OptimizerSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OptimizerSettings {
    pub enabled: bool,
    /// Only meaningful when `enabled` is set.
    pub runs: u32,
}

impl CompilerSettings {
    /// Optimizer runs handed to the compiler, if the optimizer is enabled.
    pub fn effective_runs(&self) -> Option<u32> {
        self.optimizer.enabled.then_some(self.optimizer.runs)
    }

    pub fn satisfies(&self, requirement: &SolidityRequirement) -> bool {
        requirement.matches(&self.version)
    }

    /// `solc --standard-json` settings carrying the optimizer configuration.
    pub fn solc_settings(&self) -> Settings {
        let optimizer = Optimizer {
            enabled: Some(self.optimizer.enabled),
            runs: self.effective_runs().map(|runs| runs as usize),
            ..Default::default()
        };
        Settings {
            optimizer,
            ..Default::default()
        }
    }
}

// Shape of `compilers.solc` in the definition file.
#[serde_as]
#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SolcDefinition {
    #[serde_as(as = "DisplayFromStr")]
    version: semver::Version,
    settings: SolcSettingsDefinition,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SolcSettingsDefinition {
    optimizer: OptimizerSettings,
}

impl From<SolcDefinition> for CompilerSettings {
    fn from(definition: SolcDefinition) -> Self {
        Self {
            version: definition.version,
            optimizer: definition.settings.optimizer,
        }
    }
}

impl From<CompilerSettings> for SolcDefinition {
    fn from(settings: CompilerSettings) -> Self {
        Self {
            version: settings.version,
            settings: SolcSettingsDefinition {
                optimizer: settings.optimizer,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn settings(enabled: bool, runs: u32) -> CompilerSettings {
        CompilerSettings {
            version: semver::Version::new(0, 8, 19),
            optimizer: OptimizerSettings { enabled, runs },
        }
    }

    #[test]
    fn runs_are_ignored_when_optimizer_is_disabled() {
        assert_eq!(settings(true, 200).effective_runs(), Some(200));
        assert_eq!(settings(false, 200).effective_runs(), None);
        assert_eq!(settings(false, 0).effective_runs(), None);

        let disabled = settings(false, 1_000_000).solc_settings();
        assert_eq!(disabled.optimizer.enabled, Some(false));
        assert_eq!(disabled.optimizer.runs, None);

        let enabled = settings(true, 200).solc_settings();
        assert_eq!(enabled.optimizer.enabled, Some(true));
        assert_eq!(enabled.optimizer.runs, Some(200));
    }

    #[test]
    fn deserialize_nested_shape() {
        let value = json!({
            "version": "0.8.19",
            "settings": { "optimizer": { "enabled": true, "runs": 200 } }
        });
        let parsed: CompilerSettings = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(parsed, settings(true, 200));
        assert_eq!(serde_json::to_value(&parsed).unwrap(), value);
    }

    #[test]
    fn reject_malformed_solc_entries() {
        let optimizer = json!({ "enabled": true, "runs": 200 });
        for value in [
            json!({ "settings": { "optimizer": optimizer } }),
            json!({ "version": "0.8", "settings": { "optimizer": optimizer } }),
            json!({ "version": "^0.8.19", "settings": { "optimizer": optimizer } }),
            json!({ "version": 8, "settings": { "optimizer": optimizer } }),
            json!({
                "version": "0.8.19",
                "settings": { "optimizer": { "enabled": "yes", "runs": 200 } }
            }),
            json!({
                "version": "0.8.19",
                "settings": { "optimizer": { "enabled": true, "runs": -1 } }
            }),
            json!({ "version": "0.8.19", "settings": { "optimizer": { "enabled": true } } }),
            json!({
                "version": "0.8.19",
                "settings": { "optimizer": optimizer, "evmVersion": "paris" }
            }),
        ] {
            assert!(
                serde_json::from_value::<CompilerSettings>(value.clone()).is_err(),
                "{value}"
            );
        }
    }

    #[test]
    fn version_satisfies_pragma() {
        let compiler = settings(true, 200);
        for (requirement, expected) in [
            ("^0.8.0", true),
            ("0.8.19", true),
            (">=0.7.0 <0.9.0", true),
            ("^0.7.6", false),
            ("0.8.20", false),
            ("^0.6.0 || ^0.8.0", true),
            ("0.8.0 - 0.8.20", true),
            ("0.8.20 - 0.8.25", false),
        ] {
            let requirement: SolidityRequirement = requirement.parse().unwrap();
            assert_eq!(compiler.satisfies(&requirement), expected, "{requirement}");
        }
    }
}
