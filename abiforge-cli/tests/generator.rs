//! The `abiforge` generator end to end, against files in a temp dir.
#![cfg(feature = "generator")]

use std::fs;
use std::path::Path;

use abiforge_cli::clap::Parser;
use abiforge_cli::generator::{execute, generate, load_config, GeneratorCli, GeneratorConfig};

const ABI: &str = r#"[
    {"type":"function","name":"balanceOf","stateMutability":"view","inputs":[{"name":"who","type":"address"}],"outputs":[{"name":"","type":"uint256"}]},
    {"type":"event","name":"Transfer","anonymous":false,"inputs":[{"name":"from","type":"address","indexed":true},{"name":"to","type":"address","indexed":true},{"name":"value","type":"uint256","indexed":false}]}
]"#;

fn write(dir: &Path, name: &str, contents: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

fn cli(args: &[&str]) -> GeneratorCli {
    GeneratorCli::try_parse_from(std::iter::once("abiforge").chain(args.iter().copied())).unwrap()
}

#[test]
fn test_interface_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let abi = write(dir.path(), "Token.json", ABI);
    let out = dir.path().join("IToken.sol");
    let out_arg = out.to_string_lossy().into_owned();

    execute(cli(&["interface", "--abi", &abi, "--name", "IToken", "-o", &out_arg])).unwrap();

    let source = fs::read_to_string(&out).unwrap();
    assert!(source.contains("interface IToken {"));
    assert!(source.contains("\tfunction balanceOf(address who) external view returns (uint256);"));
    assert!(source.contains("\tevent Transfer(address indexed from, address indexed to, uint256 value);"));
}

#[test]
fn test_host_without_formatting() {
    let dir = tempfile::tempdir().unwrap();
    let abi = write(dir.path(), "Token.json", ABI);
    let parsed = cli(&["host", "--abi", &abi, "--name", "Token", "--no-format", "--runtime-path", "::rt"]);
    let source = generate(&parsed.command, Default::default()).unwrap();

    assert!(source.starts_with("// Code generated by abiforge "));
    assert!(source.contains("pub struct Token"));
    assert!(source.contains("fn balance_of"));
    assert!(source.contains(":: rt :: ContractBackend"));
    assert!(source.contains("pub mod token_cli"));
}

#[test]
fn test_host_without_cli() {
    let dir = tempfile::tempdir().unwrap();
    let abi = write(dir.path(), "Token.json", ABI);
    let parsed = cli(&["host", "--abi", &abi, "--name", "Token", "--no-format", "--no-cli"]);
    let source = generate(&parsed.command, Default::default()).unwrap();
    assert!(!source.contains("token_cli"));
}

#[test]
fn test_name_from_build_descriptor() {
    let dir = tempfile::tempdir().unwrap();
    let build = write(
        dir.path(),
        "build.json",
        &format!(r#"{{"contractName":"Vault","bytecode":"0x00","abi":{}}}"#, ABI),
    );
    let parsed = cli(&["interface", "--build", &build]);
    let source = generate(&parsed.command, Default::default()).unwrap();
    assert!(source.contains("interface Vault {"));
}

#[test]
fn test_build_descriptor_without_abi_needs_abi_flag() {
    let dir = tempfile::tempdir().unwrap();
    let build = write(dir.path(), "build.json", r#"{"contractName":"Vault","bytecode":"0x00"}"#);
    let parsed = cli(&["interface", "--build", &build]);
    let err = generate(&parsed.command, Default::default()).unwrap_err();
    assert!(err.to_string().contains("has no abi"));

    let abi = write(dir.path(), "abi.json", ABI);
    let parsed = cli(&["interface", "--build", &build, "--abi", &abi]);
    assert!(generate(&parsed.command, Default::default()).is_ok());
}

#[test]
fn test_name_required_without_build() {
    let dir = tempfile::tempdir().unwrap();
    let abi = write(dir.path(), "Token.json", ABI);
    let parsed = cli(&["interface", "--abi", &abi]);
    assert!(generate(&parsed.command, Default::default()).is_err());
    assert!(GeneratorCli::try_parse_from(["abiforge", "interface", "--name", "X"]).is_err());
}

#[test]
fn test_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("abiforge.toml");
    fs::write(&config_path, "pragma_version = \"^0.8.20\"\nversion = \"9.9.9\"\n").unwrap();
    let config = load_config(Some(&config_path)).unwrap();
    assert_eq!(config.pragma_version, "^0.8.20");
    assert!(config.emit_cli);

    let abi = write(dir.path(), "Token.json", ABI);
    let parsed = cli(&["interface", "--abi", &abi, "--name", "Token"]);
    let source = generate(&parsed.command, config.clone()).unwrap();
    assert!(source.contains("// Interface generated by abiforge: 9.9.9\npragma solidity ^0.8.20;"));

    // Flag beats the file
    let parsed = cli(&["interface", "--abi", &abi, "--name", "Token", "--pragma", "0.8.24"]);
    let source = generate(&parsed.command, config).unwrap();
    assert!(source.contains("pragma solidity 0.8.24;"));
}

#[test]
fn test_config_rejects_unknown_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("abiforge.toml");
    fs::write(&config_path, "emit_clis = false\n").unwrap();
    assert!(load_config(Some(&config_path)).is_err());
    assert_eq!(load_config(None).unwrap(), GeneratorConfig::default());
}

#[test]
fn test_malformed_abi_reports_error() {
    let dir = tempfile::tempdir().unwrap();
    let abi = write(dir.path(), "bad.json", r#"[{"type":"function","name":"f","inputs":[{"name":"x","type":"uint7"}]}]"#);
    let parsed = cli(&["interface", "--abi", &abi, "--name", "Bad"]);
    let err = generate(&parsed.command, Default::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("uint7"));
}

#[test]
fn test_host_with_embedded_build() {
    let dir = tempfile::tempdir().unwrap();
    let build = write(
        dir.path(),
        "build.json",
        &format!(r#"{{"contractName":"Vault","bytecode":"0x6080","abi":{}}}"#, ABI),
    );
    let parsed = cli(&["host", "--build", &build, "--no-format", "--embed-build"]);
    let source = generate(&parsed.command, Default::default()).unwrap();
    assert!(source.contains("pub const ABI_JSON"));
    assert!(source.contains("pub const BYTECODE"));
    assert!(source.contains("deploy_bytecode"));
    assert!(!source.contains("load_abi"));

    // Without the flag the registry is used
    let parsed = cli(&["host", "--build", &build, "--no-format"]);
    let source = generate(&parsed.command, Default::default()).unwrap();
    assert!(!source.contains("BYTECODE"));
    assert!(source.contains("load_abi"));
}

#[test]
fn test_embed_build_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let build = write(
        dir.path(),
        "build.json",
        &format!(r#"{{"contractName":"Vault","bytecode":"6080","abi":{}}}"#, ABI),
    );
    let config_path = dir.path().join("abiforge.toml");
    fs::write(&config_path, "embed_build = true\nformat = false\n").unwrap();
    let config = load_config(Some(&config_path)).unwrap();
    assert!(config.embed_build);

    let parsed = cli(&["host", "--build", &build]);
    let source = generate(&parsed.command, config.clone()).unwrap();
    assert!(source.contains("deploy_bytecode"));

    // A bare ABI has no bytecode to embed
    let abi = write(dir.path(), "Vault.json", ABI);
    let parsed = cli(&["host", "--abi", &abi, "--name", "Vault"]);
    let err = generate(&parsed.command, config).unwrap_err();
    assert!(err.to_string().contains("--build"));
}

#[test]
fn test_embed_build_rejects_missing_bytecode() {
    let dir = tempfile::tempdir().unwrap();
    let build = write(dir.path(), "build.json", &format!(r#"{{"contractName":"IVault","abi":{}}}"#, ABI));
    let parsed = cli(&["host", "--build", &build, "--no-format", "--embed-build"]);
    let err = generate(&parsed.command, Default::default()).unwrap_err();
    assert!(format!("{:#}", err).contains("bytecode is empty"));

    assert!(GeneratorCli::try_parse_from(["abiforge", "host", "--abi", "x.json", "--name", "X", "--embed-build"]).is_err());
}
