use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("contracts directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("couldn't read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot detect definition format of {}: expected a .toml or .json file", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("malformed configuration: {0}")]
    MalformedConfig(String),
    #[error("couldn't serialize configuration: {0}")]
    Serialization(String),
    #[error("network {0:?} not found")]
    NetworkNotFound(String),
}

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::FileNotFound(path),
            _ => Self::Read { path, source },
        }
    }
}
