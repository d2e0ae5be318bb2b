use super::{find_requirement, CompilerSettings};
use crate::Error;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Contract whose `pragma solidity` the configured compiler does not satisfy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PragmaMismatch {
    pub path: PathBuf,
    pub requirement: String,
}

/// Checks the `pragma solidity` directive of every `.sol` file under `dir`
/// against the configured compiler version.
///
/// Files without a directive are skipped, unparsable directives are reported
/// as mismatches.
pub fn check_sources(
    dir: &Path,
    compiler: &CompilerSettings,
) -> Result<Vec<PragmaMismatch>, Error> {
    let mut sources = Vec::new();
    collect_sources(dir, &mut sources)?;
    sources.sort();

    let mut mismatches = Vec::new();
    for path in sources {
        let source = fs::read_to_string(&path).map_err(|err| Error::read(&path, err))?;
        let requirement = match find_requirement(&source) {
            None => {
                tracing::debug!(path = %path.display(), "no pragma solidity, skipping");
                continue;
            }
            Some(Ok(requirement)) if compiler.satisfies(&requirement) => continue,
            Some(Ok(requirement)) => requirement.to_string(),
            Some(Err(err)) => {
                tracing::warn!(path = %path.display(), err = %err, "unparsable pragma solidity");
                err.to_string()
            }
        };
        mismatches.push(PragmaMismatch { path, requirement });
    }
    Ok(mismatches)
}

fn collect_sources(dir: &Path, sources: &mut Vec<PathBuf>) -> Result<(), Error> {
    let entries = fs::read_dir(dir).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => Error::DirectoryNotFound(dir.to_path_buf()),
        _ => Error::read(dir, err),
    })?;
    for entry in entries {
        let entry = entry.map_err(|err| Error::read(dir, err))?;
        let file_type = entry.file_type().map_err(|err| Error::read(entry.path(), err))?;
        let path = entry.path();
        if file_type.is_dir() {
            collect_sources(&path, sources)?;
        } else if file_type.is_symlink() && path.is_dir() {
            // may point back up the tree
            tracing::debug!(path = %path.display(), "skipping symlinked directory");
        } else if path.extension().map_or(false, |ext| ext == "sol") {
            sources.push(path);
        }
    }
    Ok(())
}
