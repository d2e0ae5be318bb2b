use ethers_solc::ProjectPathsConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryLayout {
    /// Solidity sources.
    pub contracts_directory: PathBuf,
    /// Compiled artifacts.
    pub contracts_build_directory: PathBuf,
    /// Ordered migration scripts.
    pub migrations_directory: PathBuf,
}

impl DirectoryLayout {
    /// Joins relative directories onto `root`, usually the directory holding
    /// the definition file. Absolute directories are kept as is.
    pub fn resolve(&self, root: &Path) -> Self {
        Self {
            contracts_directory: root.join(&self.contracts_directory),
            contracts_build_directory: root.join(&self.contracts_build_directory),
            migrations_directory: root.join(&self.migrations_directory),
        }
    }

    /// Sources and artifacts layout of a solc project rooted at `root`.
    pub fn project_paths(&self, root: &Path) -> ProjectPathsConfig {
        let layout = self.resolve(root);
        ProjectPathsConfig::builder()
            .sources(layout.contracts_directory)
            .artifacts(layout.contracts_build_directory)
            .build_with_root(root)
    }
}
