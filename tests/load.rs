use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};
use truffle_config::{ConfigurationDescriptor, DefinitionFormat, Error, NetworkId};

const JSON_DEFINITION: &str = r#"{
    "networks": {
        "development": { "host": "127.0.0.1", "port": 7545, "network_id": "*" }
    },
    "compilers": {
        "solc": {
            "version": "0.8.19",
            "settings": { "optimizer": { "enabled": true, "runs": 200 } }
        }
    },
    "contracts_directory": "./contracts",
    "contracts_build_directory": "./build/contracts",
    "migrations_directory": "./migrations"
}"#;

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn load_shipped_definition() {
    let descriptor = ConfigurationDescriptor::load("truffle-config.toml").unwrap();

    let development = descriptor.get_network("development").unwrap();
    assert_eq!(development.port.get(), 7545);
    assert_eq!(development.host, "127.0.0.1");
    assert_eq!(development.network_id, NetworkId::Any);
    assert_eq!(
        development.rpc_url().unwrap().as_str(),
        "http://127.0.0.1:7545/"
    );

    let compiler = descriptor.compiler_settings();
    assert_eq!(compiler.version.to_string(), "0.8.19");
    assert_eq!(compiler.effective_runs(), Some(200));

    assert!(matches!(
        descriptor.get_network("staging"),
        Err(Error::NetworkNotFound(_))
    ));
}

#[test]
fn toml_and_json_definitions_are_equivalent() {
    let dir = tempfile::tempdir().unwrap();
    let json = write(dir.path(), "truffle-config.json", JSON_DEFINITION);

    let from_toml = ConfigurationDescriptor::load("truffle-config.toml").unwrap();
    let from_json = ConfigurationDescriptor::load(&json).unwrap();
    assert_eq!(from_toml, from_json);
}

#[test]
fn explicit_format_overrides_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "truffle.conf", JSON_DEFINITION);

    let err = ConfigurationDescriptor::load(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)), "{err}");

    let descriptor =
        ConfigurationDescriptor::load_with_format(&path, DefinitionFormat::Json).unwrap();
    assert_eq!(descriptor.networks().count(), 1);

    let err = ConfigurationDescriptor::load_with_format(&path, DefinitionFormat::Toml).unwrap_err();
    assert!(matches!(err, Error::MalformedConfig(_)), "{err}");
}

#[test]
fn non_utf8_definition_is_malformed() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truffle-config.toml");
    std::fs::write(&path, [0xff, 0xfe, b'\n']).unwrap();

    let err = ConfigurationDescriptor::load(&path).unwrap_err();
    assert!(matches!(&err, Error::MalformedConfig(msg) if msg.contains("UTF-8")), "{err}");
}

#[test]
fn missing_definition() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("truffle-config.toml");
    match ConfigurationDescriptor::load(&path) {
        Err(Error::FileNotFound(missing)) => assert_eq!(missing, path),
        other => panic!("expected missing file error, got {other:?}"),
    }
}

#[test]
fn missing_compiler_version() {
    let dir = tempfile::tempdir().unwrap();
    let source = std::fs::read_to_string("truffle-config.toml")
        .unwrap()
        .replace("version = \"0.8.19\"\n", "");
    let path = write(dir.path(), "truffle-config.toml", &source);

    let err = ConfigurationDescriptor::load(&path).unwrap_err();
    match &err {
        Error::MalformedConfig(message) => assert!(message.contains("version"), "{message}"),
        other => panic!("expected malformed configuration, got {other:?}"),
    }
}

#[test]
fn rendered_definition_reloads_identically() {
    let dir = tempfile::tempdir().unwrap();
    let original = ConfigurationDescriptor::load("truffle-config.toml").unwrap();

    for (name, format) in [
        ("rendered.toml", DefinitionFormat::Toml),
        ("rendered.json", DefinitionFormat::Json),
    ] {
        let path = write(dir.path(), name, &original.render(format).unwrap());
        let reloaded = ConfigurationDescriptor::load(&path).unwrap();
        assert_eq!(reloaded, original, "{format}");
        // rendering is stable once normalized
        assert_eq!(
            reloaded.render(format).unwrap(),
            original.render(format).unwrap()
        );
    }
}

#[test]
fn shared_between_threads() {
    let descriptor = ConfigurationDescriptor::load("truffle-config.toml").unwrap();
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let network = descriptor.get_network("development").unwrap();
                assert!(network.accepts(5777));
            });
        }
    });
}

#[test]
fn resolve_directories_next_to_definition() {
    let dir = tempfile::tempdir().unwrap();
    let contracts = dir.path().join("contracts");
    std::fs::create_dir(&contracts).unwrap();
    std::fs::write(contracts.join("Storage.sol"), "pragma solidity ^0.8.0;\n").unwrap();
    std::fs::write(contracts.join("Old.sol"), "pragma solidity ^0.5.16;\n").unwrap();
    let path = write(dir.path(), "truffle-config.json", JSON_DEFINITION);

    let descriptor = ConfigurationDescriptor::load(&path).unwrap();
    let layout = descriptor.directory_layout().resolve(dir.path());
    assert_eq!(layout.contracts_directory, contracts);

    let mismatches =
        truffle_config::check_sources(&layout.contracts_directory, descriptor.compiler_settings())
            .unwrap();
    assert_eq!(mismatches.len(), 1);
    assert_eq!(mismatches[0].path, contracts.join("Old.sol"));
    assert_eq!(mismatches[0].requirement, "^0.5.16");
}
