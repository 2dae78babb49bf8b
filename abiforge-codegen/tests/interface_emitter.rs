//! Solidity interface output.

use abiforge_codegen::{contract_spec_from_json, generate_interface_source, GenerateError, GeneratorConfig};

fn config() -> GeneratorConfig {
    GeneratorConfig {
        version: "test".to_string(),
        ..Default::default()
    }
}

fn interface(name: &str, abi: &str) -> String {
    let spec = contract_spec_from_json(name, abi).unwrap();
    generate_interface_source(&spec, &config()).unwrap()
}

const BALANCE_OF: &str = r#"[{"type":"function","name":"balanceOf","inputs":[{"name":"who","type":"address"}],"outputs":[{"name":"","type":"uint256"}],"stateMutability":"view"}]"#;

#[test]
fn test_view_function_declaration() {
    let source = interface("Token", BALANCE_OF);
    assert!(source
        .lines()
        .any(|line| line == "\tfunction balanceOf(address who) external view returns (uint256);"));
}

#[test]
fn test_template_slots() {
    let source = interface("Token", BALANCE_OF);
    assert_eq!(
        source,
        "// SPDX-License-Identifier: UNLICENSED\n\
         // Interface generated by abiforge: test\n\
         pragma solidity ^0.8.9;\n\
         \n\
         interface Token {\n\
         \tfunction balanceOf(address who) external view returns (uint256);\n\
         }\n"
    );
}

#[test]
fn test_event_declaration() {
    let source = interface(
        "Token",
        r#"[{"type":"event","name":"Transfer","anonymous":false,"inputs":[
            {"name":"from","type":"address","indexed":true},
            {"name":"to","type":"address","indexed":true},
            {"name":"value","type":"uint256","indexed":false}]}]"#,
    );
    assert!(source.contains("\tevent Transfer(address indexed from, address indexed to, uint256 value);"));
}

#[test]
fn test_mutability_and_locations() {
    let source = interface(
        "Registry",
        r#"[
            {"type":"function","name":"register","inputs":[{"name":"label","type":"string"},{"name":"owners","type":"address[]"},{"name":"id","type":"bytes32"}],"outputs":[],"stateMutability":"payable"},
            {"type":"function","name":"hash","inputs":[{"name":"data","type":"bytes"}],"outputs":[{"name":"digest","type":"bytes32"},{"name":"","type":"uint8[2]"}],"stateMutability":"pure"},
            {"type":"function","name":"clear","inputs":[],"outputs":[],"stateMutability":"nonpayable"}
        ]"#,
    );
    assert!(source.contains(
        "\tfunction register(string memory label, address[] memory owners, bytes32 id) external payable;"
    ));
    assert!(source.contains(
        "\tfunction hash(bytes memory data) external returns (bytes32 digest, uint8[2] memory);"
    ));
    assert!(source.contains("\tfunction clear() external;"));
    // Items are separated by a blank line
    assert!(source.contains("external payable;\n\n\tfunction hash"));
}

#[test]
fn test_tuples_become_structs() {
    let source = interface(
        "Pool",
        r#"[
            {"type":"function","name":"open","stateMutability":"nonpayable","outputs":[],"inputs":[
                {"name":"position","type":"tuple","internalType":"struct Pool.Position","components":[
                    {"name":"owner","type":"address","internalType":"address"},
                    {"name":"range","type":"tuple","internalType":"struct Pool.Range","components":[
                        {"name":"lower","type":"int24"},{"name":"upper","type":"int24"}]}
                ]}]},
            {"type":"function","name":"openMany","stateMutability":"nonpayable","outputs":[],"inputs":[
                {"name":"positions","type":"tuple[]","internalType":"struct Pool.Position[]","components":[
                    {"name":"owner","type":"address","internalType":"address"},
                    {"name":"range","type":"tuple","internalType":"struct Pool.Range","components":[
                        {"name":"lower","type":"int24"},{"name":"upper","type":"int24"}]}
                ]}]},
            {"type":"function","name":"raw","stateMutability":"view","inputs":[],"outputs":[
                {"name":"","type":"tuple","components":[{"name":"","type":"bool"}]}]}
        ]"#,
    );

    let range = source.find("\tstruct Range {\n\t\tint24 lower;\n\t\tint24 upper;\n\t}").unwrap();
    let position = source.find("\tstruct Position {\n\t\taddress owner;\n\t\tRange range;\n\t}").unwrap();
    assert!(range < position, "nested struct must come first");
    assert_eq!(source.matches("struct Position {").count(), 1);
    assert!(source.contains("\tstruct Struct3 {\n\t\tbool field1;\n\t}"));
    assert!(source.contains("function open(Position memory position) external;"));
    assert!(source.contains("function openMany(Position[] memory positions) external;"));
    assert!(source.contains("function raw() external view returns (Struct3 memory);"));
}

#[test]
fn test_anonymous_event_and_skipped_entries() {
    let source = interface(
        "Vault",
        r#"[
            {"type":"fallback","stateMutability":"payable"},
            {"type":"error","name":"Denied","inputs":[]},
            {"type":"event","name":"Ping","anonymous":true,"inputs":[{"name":"","type":"uint256","indexed":false}]}
        ]"#,
    );
    assert!(source.contains("\tevent Ping(uint256) anonymous;"));
    assert!(!source.contains("Denied"));
    assert!(!source.contains("fallback"));
}

#[test]
fn test_pragma_is_configurable() {
    let spec = contract_spec_from_json("Token", BALANCE_OF).unwrap();
    let config = GeneratorConfig {
        pragma_version: ">=0.8.0 <0.9.0".to_string(),
        ..config()
    };
    let source = generate_interface_source(&spec, &config).unwrap();
    assert!(source.contains("pragma solidity >=0.8.0 <0.9.0;\n"));

    let bad = GeneratorConfig {
        pragma_version: "^0.8.0; contract X {}".to_string(),
        ..config
    };
    assert!(matches!(
        generate_interface_source(&spec, &bad),
        Err(GenerateError::InvalidConfig { field: "pragma_version", .. })
    ));
}

#[test]
fn test_output_is_deterministic() {
    let abi = r#"[
        {"type":"function","name":"b","inputs":[{"name":"x","type":"tuple","components":[{"name":"a","type":"uint8"}]}],"outputs":[]},
        {"type":"function","name":"a","inputs":[{"name":"y","type":"tuple","components":[{"name":"c","type":"bool"}]}],"outputs":[]}
    ]"#;
    assert_eq!(interface("Twice", abi), interface("Twice", abi));
}

#[test]
fn test_events_and_functions_keep_abi_order() {
    let source = interface(
        "Bell",
        r#"[
            {"type":"event","name":"Rung","anonymous":false,"inputs":[]},
            {"type":"function","name":"ring","inputs":[],"outputs":[],"stateMutability":"nonpayable"},
            {"type":"event","name":"Silenced","anonymous":false,"inputs":[]},
            {"type":"function","name":"silence","inputs":[],"outputs":[],"stateMutability":"nonpayable"}
        ]"#,
    );
    let body: Vec<&str> = source.lines().filter(|line| line.starts_with('\t')).collect();
    assert_eq!(
        body,
        [
            "\tevent Rung();",
            "\tfunction ring() external;",
            "\tevent Silenced();",
            "\tfunction silence() external;",
        ]
    );
}

#[test]
fn test_struct_name_suffixes_skip_declared_names() {
    let source = interface(
        "Book",
        r#"[
            {"type":"function","name":"a","stateMutability":"nonpayable","outputs":[],"inputs":[
                {"name":"p","type":"tuple","internalType":"struct Book.Pair_2","components":[{"name":"x","type":"uint8"}]}]},
            {"type":"function","name":"b","stateMutability":"nonpayable","outputs":[],"inputs":[
                {"name":"p","type":"tuple","internalType":"struct Book.Pair","components":[{"name":"y","type":"bool"}]}]},
            {"type":"function","name":"c","stateMutability":"nonpayable","outputs":[],"inputs":[
                {"name":"p","type":"tuple","internalType":"struct Other.Pair","components":[{"name":"z","type":"address"}]}]}
        ]"#,
    );
    assert_eq!(source.matches("struct Pair_2 {").count(), 1);
    assert!(source.contains("\tstruct Pair_2 {\n\t\tuint8 x;\n\t}"));
    assert!(source.contains("\tstruct Pair {\n\t\tbool y;\n\t}"));
    assert!(source.contains("\tstruct Pair_3 {\n\t\taddress z;\n\t}"));
    assert!(source.contains("function c(Pair_3 memory p) external;"));
}
