mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Args, Command};
use serde_json::json;
use std::{path::Path, process::ExitCode};
use truffle_config::{check_sources, init_logs, ConfigurationDescriptor, DefinitionFormat, Settings};

fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    let mut settings = Settings::build().context("failed to build settings")?;
    if let Some(path) = args.definition {
        settings.definition.path = path;
    }
    if let Some(format) = args.format {
        settings.definition.format = Some(format);
    }
    init_logs(&settings.tracing).context("failed to initialize logs")?;

    let path = settings.definition.path.as_path();
    let descriptor = match settings.definition.format {
        Some(format) => ConfigurationDescriptor::load_with_format(path, format),
        None => ConfigurationDescriptor::load(path),
    }
    .with_context(|| format!("failed to load {}", path.display()))?;

    match args.command {
        Command::Check { contracts } => check(&descriptor, path, contracts),
        Command::Network { name } => {
            let network = descriptor.get_network(&name)?;
            let output = json!({
                "name": network.name,
                "host": network.host,
                "port": network.port,
                "network_id": network.network_id,
                "rpc_url": network.rpc_url()?,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Show => {
            let format = settings
                .definition
                .format
                .or_else(|| DefinitionFormat::from_path(path))
                .unwrap_or_default();
            println!("{}", descriptor.render(format)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn check(
    descriptor: &ConfigurationDescriptor,
    definition_path: &Path,
    contracts: bool,
) -> anyhow::Result<ExitCode> {
    if !contracts {
        println!("{} is valid", definition_path.display());
        return Ok(ExitCode::SUCCESS);
    }

    let root = match definition_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let layout = descriptor.directory_layout().resolve(root);
    let compiler = descriptor.compiler_settings();
    let mismatches = check_sources(&layout.contracts_directory, compiler)?;
    if mismatches.is_empty() {
        println!(
            "{} is valid, all contracts accept solc {}",
            definition_path.display(),
            compiler.version
        );
        return Ok(ExitCode::SUCCESS);
    }
    for mismatch in &mismatches {
        println!(
            "{}: pragma solidity {} is not satisfied by solc {}",
            mismatch.path.display(),
            mismatch.requirement,
            compiler.version
        );
    }
    Ok(ExitCode::FAILURE)
}
