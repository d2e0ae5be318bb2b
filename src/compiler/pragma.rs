use semver::{Version, VersionReq};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvalidRequirement {
    #[error("empty version requirement")]
    Empty,
    #[error(transparent)]
    Semver(#[from] semver::Error),
}

/// Version requirement of a `pragma solidity` directive.
///
/// Solidity ranges differ from cargo ones: comparators are separated by
/// whitespace, a bare version means an exact match, `A - B` is an inclusive
/// range and alternatives are joined with `||`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolidityRequirement {
    raw: String,
    alternatives: Vec<VersionReq>,
}

impl SolidityRequirement {
    pub fn matches(&self, version: &Version) -> bool {
        self.alternatives.iter().any(|req| req.matches(version))
    }
}

impl FromStr for SolidityRequirement {
    type Err = InvalidRequirement;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let alternatives = s
            .split("||")
            .map(parse_range)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            raw: s.trim().to_string(),
            alternatives,
        })
    }
}

impl Display for SolidityRequirement {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

fn parse_range(range: &str) -> Result<VersionReq, InvalidRequirement> {
    let mut comparators = Vec::new();
    // operators may be separated from their version, e.g. `>= 0.7.0`
    let mut operator = String::new();
    let mut tokens = range.split_whitespace().peekable();
    while let Some(token) = tokens.next() {
        if operator.is_empty() && tokens.peek() == Some(&"-") {
            tokens.next();
            let upper = tokens.next().ok_or(InvalidRequirement::Empty)?;
            comparators.push(format!(">={token}"));
            comparators.push(format!("<={upper}"));
            continue;
        }
        if token.chars().all(|c| matches!(c, '<' | '>' | '=' | '^' | '~')) {
            operator.push_str(token);
            continue;
        }
        let comparator = format!("{}{}", std::mem::take(&mut operator), token);
        if comparator.starts_with(|c: char| c.is_ascii_digit()) {
            comparators.push(format!("={comparator}"));
        } else {
            comparators.push(comparator);
        }
    }
    if comparators.is_empty() {
        return Err(InvalidRequirement::Empty);
    }
    Ok(VersionReq::parse(&comparators.join(", "))?)
}

/// Extracts the requirement of the first `pragma solidity` directive of a source file.
///
/// Returns `None` if the source declares no such directive.
pub fn find_requirement(source: &str) -> Option<Result<SolidityRequirement, InvalidRequirement>> {
    source.lines().find_map(|line| {
        let rest = line.trim_start().strip_prefix("pragma")?;
        let rest = rest.trim_start().strip_prefix("solidity")?;
        let requirement = rest.split(';').next().unwrap_or_default();
        Some(requirement.parse())
    })
}
