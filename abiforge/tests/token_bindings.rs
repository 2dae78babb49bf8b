//! Bindings generated by `contract!` against a recording backend.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use abiforge::cli::clap::error::ErrorKind;
use abiforge::cli::clap::Parser;
use abiforge::prelude::*;
use serde_json::Value;

abiforge::contract!(name = "Token", abi = "tests/fixtures/Token.json");

const ALICE: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
const BOB: &str = "0xfb6916095ca1df60bb79ce92ce3ea74c37c5d359";
const DEPLOYED: Address = Address::new([0xaa; 20]);

fn addr(raw: &str) -> Address {
    raw.parse().unwrap()
}

// ─── Recording backend ───────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Recorded {
    LoadAbi(String),
    ContractAt(String, Address),
    Deploy { args: Vec<AbiValue>, config: Value },
    Call { signature: String, args: Vec<AbiValue>, block: BlockIdentifier },
    Transact { signature: String, args: Vec<AbiValue>, config: Value },
    PublishSource(Address),
    LoadAccount(String),
}

#[derive(Debug, thiserror::Error)]
enum MockError {
    #[error("unknown network {0}")]
    UnknownNetwork(String),
    #[error(transparent)]
    NotInstantiated(#[from] NotInstantiatedError),
}

#[derive(Debug)]
struct MockContract {
    address: Address,
}

impl ContractHandle for MockContract {
    fn address(&self) -> Address {
        self.address
    }
}

#[derive(Debug)]
struct MockReceipt {
    tx: u64,
}

impl fmt::Display for MockReceipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tx {} confirmed", self.tx)
    }
}

impl Receipt for MockReceipt {
    fn info(&self) -> String {
        format!("tx {}: gas used 21000", self.tx)
    }
}

#[derive(Clone, Default)]
struct MockBackend {
    log: Rc<RefCell<Vec<Recorded>>>,
}

impl MockBackend {
    fn record(&self, event: Recorded) {
        self.log.borrow_mut().push(event);
    }

    fn recorded(&self) -> Vec<Recorded> {
        self.log.borrow().clone()
    }
}

impl ContractBackend for MockBackend {
    type Error = MockError;
    type Contract = MockContract;
    type Receipt = MockReceipt;
    type Signer = String;

    fn load_abi(&self, contract_name: &str) -> Result<Value, MockError> {
        self.record(Recorded::LoadAbi(contract_name.to_string()));
        let artifact: Value = serde_json::from_str(include_str!("fixtures/Token.json")).unwrap();
        Ok(artifact["abi"].clone())
    }

    fn contract_at(&self, contract_name: &str, address: Address, _: &Value) -> Result<MockContract, MockError> {
        self.record(Recorded::ContractAt(contract_name.to_string(), address));
        Ok(MockContract { address })
    }

    fn deploy(
        &self,
        _: &str,
        _: &Value,
        args: Vec<AbiValue>,
        config: &TransactionConfig<String>,
    ) -> Result<Deployment<MockContract, MockReceipt>, MockError> {
        self.record(Recorded::Deploy {
            args,
            config: serde_json::to_value(config).unwrap(),
        });
        Ok(Deployment {
            address: DEPLOYED,
            contract: MockContract { address: DEPLOYED },
            receipt: MockReceipt { tx: 1 },
        })
    }

    fn deploy_bytecode(
        &self,
        _: &str,
        _: &Value,
        _: &[u8],
        _: Vec<AbiValue>,
        _: &TransactionConfig<String>,
    ) -> Result<Deployment<MockContract, MockReceipt>, MockError> {
        unreachable!("Token bindings deploy from the registry")
    }

    fn call(
        &self,
        _: &MockContract,
        signature: &str,
        args: Vec<AbiValue>,
        block: BlockIdentifier,
    ) -> Result<Vec<AbiValue>, MockError> {
        self.record(Recorded::Call {
            signature: signature.to_string(),
            args,
            block,
        });
        Ok(vec![AbiValue::Uint(U256::from(1000u64))])
    }

    fn transact(
        &self,
        _: &MockContract,
        signature: &str,
        args: Vec<AbiValue>,
        config: &TransactionConfig<String>,
    ) -> Result<MockReceipt, MockError> {
        self.record(Recorded::Transact {
            signature: signature.to_string(),
            args,
            config: serde_json::to_value(config).unwrap(),
        });
        Ok(MockReceipt { tx: 2 })
    }

    fn publish_source(&self, contract: &MockContract) -> Result<(), MockError> {
        self.record(Recorded::PublishSource(contract.address));
        Ok(())
    }

    fn load_account(&self, keystore: &str, _: Option<&str>) -> Result<String, MockError> {
        self.record(Recorded::LoadAccount(keystore.to_string()));
        Ok(format!("signer:{}", keystore))
    }
}

#[derive(Default)]
struct MockNetwork {
    backend: MockBackend,
}

impl Network for MockNetwork {
    type Backend = MockBackend;

    fn connect(&self, network: &str) -> Result<MockBackend, MockError> {
        if network == "dev" {
            Ok(self.backend.clone())
        } else {
            Err(MockError::UnknownNetwork(network.to_string()))
        }
    }
}

// ─── Host bindings ───────────────────────────────────────────────

#[test]
fn test_methods_require_instantiation() {
    let backend = MockBackend::default();
    let token = Token::new(backend.clone(), None).unwrap();
    assert_eq!(token.contract_name(), "Token");
    assert_eq!(token.address(), None);

    let err = token.balance_of(addr(ALICE), None).unwrap_err();
    assert!(matches!(err, MockError::NotInstantiated(ref e) if e.contract_name == "Token"));
    assert!(token.transfer(addr(BOB), U256::from(1u64), &TransactionConfig::new("me".to_string())).is_err());
    assert!(token.verify_contract().is_err());

    // Nothing reached the backend beyond loading the ABI
    assert_eq!(backend.recorded(), [Recorded::LoadAbi("Token".to_string())]);
}

#[test]
fn test_bound_address_is_used() {
    let backend = MockBackend::default();
    let token = Token::new(backend.clone(), Some(addr(ALICE))).unwrap();
    assert_eq!(token.address(), Some(addr(ALICE)));
    assert!(token.abi().is_array());

    let outputs = token.total_supply(Some(BlockIdentifier::Number(7))).unwrap();
    assert_eq!(format_outputs(&outputs), "1000");
    assert_eq!(
        backend.recorded()[1..],
        [
            Recorded::ContractAt("Token".to_string(), addr(ALICE)),
            Recorded::Call {
                signature: "totalSupply()".to_string(),
                args: vec![],
                block: BlockIdentifier::Number(7),
            },
        ]
    );
}

#[test]
fn test_deploy_binds_the_instance() {
    let backend = MockBackend::default();
    let mut token = Token::new(backend.clone(), None).unwrap();
    let config = TransactionConfig::new("deployer".to_string()).with_overrides(TransactionOverrides {
        value: Some(U256::from(5u64)),
        ..Default::default()
    });

    let receipt = token.deploy(U256::from(1_000_000u64), &config).unwrap();
    assert_eq!(receipt.to_string(), "tx 1 confirmed");
    assert_eq!(token.address(), Some(DEPLOYED));

    token.balance_of(addr(BOB), None).unwrap();
    let recorded = backend.recorded();
    assert_eq!(
        recorded[1],
        Recorded::Deploy {
            args: vec![AbiValue::Uint(U256::from(1_000_000u64))],
            config: serde_json::json!({"from": "deployer", "value": "5"}),
        }
    );
    assert_eq!(
        recorded[2],
        Recorded::Call {
            signature: "balanceOf(address)".to_string(),
            args: vec![AbiValue::Address(addr(BOB))],
            block: BlockIdentifier::Latest,
        }
    );
}

#[test]
fn test_write_arguments_in_abi_order() {
    let backend = MockBackend::default();
    let token = Token::new(backend.clone(), Some(addr(ALICE))).unwrap();
    token
        .set_memo(
            vec![0xde, 0xad, 0xbe, 0xef],
            vec![addr(ALICE), addr(BOB)],
            true,
            &TransactionConfig::new("me".to_string()),
        )
        .unwrap();

    assert_eq!(
        backend.recorded().last(),
        Some(&Recorded::Transact {
            signature: "setMemo(bytes4,address[],bool)".to_string(),
            args: vec![
                AbiValue::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef]),
                AbiValue::Array(vec![AbiValue::Address(addr(ALICE)), AbiValue::Address(addr(BOB))]),
                AbiValue::Bool(true),
            ],
            config: serde_json::json!({"from": "me"}),
        })
    );
}

// ─── Generated CLI ───────────────────────────────────────────────

#[test]
fn test_cli_read_command() {
    let network = MockNetwork::default();
    let cli = TokenCli::try_parse_from([
        "token", "balance-of", "--network", "dev", "--address", ALICE, "--who", BOB, "--block-number", "12",
    ])
    .unwrap();
    cli.run(&network).unwrap();

    assert_eq!(
        network.backend.recorded().last(),
        Some(&Recorded::Call {
            signature: "balanceOf(address)".to_string(),
            args: vec![AbiValue::Address(addr(BOB))],
            block: BlockIdentifier::Number(12),
        })
    );
}

#[test]
fn test_cli_write_needs_sender() {
    let err = TokenCli::try_parse_from([
        "token", "transfer", "--network", "dev", "--address", ALICE, "--to", BOB, "--amount", "10",
    ])
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);

    // Reads never ask for one
    assert!(TokenCli::try_parse_from(["token", "total-supply", "--network", "dev"]).is_ok());
}

#[test]
fn test_cli_write_command() {
    let network = MockNetwork::default();
    let cli = TokenCli::try_parse_from([
        "token",
        "transfer",
        "--network",
        "dev",
        "--address",
        ALICE,
        "--sender",
        "alice.json",
        "--to",
        BOB,
        "--amount",
        "10",
        "--gas-price",
        "7",
        "--verbose",
    ])
    .unwrap();
    cli.run(&network).unwrap();

    let recorded = network.backend.recorded();
    assert!(recorded.contains(&Recorded::LoadAccount("alice.json".to_string())));
    assert_eq!(
        recorded.last(),
        Some(&Recorded::Transact {
            signature: "transfer(address,uint256)".to_string(),
            args: vec![AbiValue::Address(addr(BOB)), AbiValue::Uint(U256::from(10u64))],
            config: serde_json::json!({"from": "signer:alice.json", "gas_price": "7"}),
        })
    );
}

#[test]
fn test_cli_variadic_bytes_and_bool() {
    let network = MockNetwork::default();
    let cli = TokenCli::try_parse_from([
        "token",
        "set-memo",
        "--network",
        "dev",
        "--address",
        ALICE,
        "--sender",
        "k.json",
        "--tag",
        "0xdeadbeef",
        "--recipients",
        ALICE,
        BOB,
        "--enabled",
        "false",
    ])
    .unwrap();
    cli.run(&network).unwrap();

    match network.backend.recorded().last() {
        Some(Recorded::Transact { args, .. }) => assert_eq!(
            args,
            &vec![
                AbiValue::FixedBytes(vec![0xde, 0xad, 0xbe, 0xef]),
                AbiValue::Array(vec![AbiValue::Address(addr(ALICE)), AbiValue::Address(addr(BOB))]),
                AbiValue::Bool(false),
            ]
        ),
        other => panic!("expected a transaction, got {:?}", other),
    }
}

#[test]
fn test_cli_rejects_bad_values() {
    let base = ["token", "set-memo", "--network", "dev", "--sender", "k.json", "--recipients", ALICE];
    let with = |extra: &[&'static str]| {
        TokenCli::try_parse_from(base.iter().copied().chain(extra.iter().copied())).map(|_| ())
    };
    assert!(with(&["--tag", "0xdeadbeef", "--enabled", "true"]).is_ok());
    // bytes4 from hex must be exactly four bytes
    assert!(with(&["--tag", "0xdead", "--enabled", "true"]).is_err());
    // Booleans are strict
    assert!(with(&["--tag", "0xdeadbeef", "--enabled", "yes"]).is_err());
    // uint256 rejects negatives and junk
    assert!(TokenCli::try_parse_from(["token", "deploy", "--network", "dev", "--sender", "k", "--initial-supply", "ten"]).is_err());
}

#[test]
fn test_cli_deploy_and_verify() {
    let network = MockNetwork::default();
    TokenCli::try_parse_from(["token", "deploy", "--network", "dev", "--sender", "k.json", "--initial-supply", "0x10"])
        .unwrap()
        .run(&network)
        .unwrap();
    TokenCli::try_parse_from(["token", "verify-contract", "--network", "dev", "--address", BOB])
        .unwrap()
        .run(&network)
        .unwrap();

    let recorded = network.backend.recorded();
    assert!(recorded.contains(&Recorded::Deploy {
        args: vec![AbiValue::Uint(U256::from(16u64))],
        config: serde_json::json!({"from": "signer:k.json"}),
    }));
    assert_eq!(recorded.last(), Some(&Recorded::PublishSource(addr(BOB))));
}

#[test]
fn test_cli_without_address_is_not_instantiated() {
    let network = MockNetwork::default();
    let err = TokenCli::try_parse_from(["token", "total-supply", "--network", "dev"])
        .unwrap()
        .run(&network)
        .unwrap_err();
    assert!(matches!(err, MockError::NotInstantiated(_)));
}

#[test]
fn test_cli_unknown_network() {
    let err = TokenCli::try_parse_from(["token", "total-supply", "--network", "mainnet"])
        .unwrap()
        .run(&MockNetwork::default())
        .unwrap_err();
    assert!(matches!(err, MockError::UnknownNetwork(ref n) if n == "mainnet"));
}

// ─── Interface ───────────────────────────────────────────────────

#[test]
fn test_interface_from_artifact() {
    let source = abiforge::interface_source("Token", include_str!("fixtures/Token.json")).unwrap();
    assert!(source.contains("\tfunction balanceOf(address who) external view returns (uint256);"));
    assert!(source.contains("\tfunction setMemo(bytes4 tag, address[] memory recipients, bool enabled) external;"));
    assert!(source.contains("\tevent Transfer(address indexed from, address indexed to, uint256 value);"));
    assert!(!source.contains("constructor"));
}
