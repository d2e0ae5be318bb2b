use clap::{Parser, Subcommand};
use std::path::PathBuf;
use truffle_config::DefinitionFormat;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Definition file, overrides `TRUFFLE_CONFIG__DEFINITION__PATH`.
    #[clap(short, long)]
    pub definition: Option<PathBuf>,
    /// Definition format (`toml` or `json`). Detected from the extension when omitted.
    #[clap(short, long)]
    pub format: Option<DefinitionFormat>,
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load the definition and report whether it is valid.
    Check {
        /// Also check `pragma solidity` of every contract against the configured compiler.
        #[clap(long)]
        contracts: bool,
    },
    /// Print a network profile as JSON.
    Network { name: String },
    /// Print the normalized definition.
    Show,
}
