//! Target-agnostic contract specification.
//!
//! [`ContractSpec::build`] walks the ABI once, in order, and produces the
//! immutable description every emitter renders from. Parameter order is
//! never changed: it is the on-chain encoding order.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::abi::{AbiEntry, AbiParam, EntryKind};
use crate::error::{AbiError, AbiResult};
use crate::naming::{self, NameRegistry};
use crate::types::{ElementaryType, TypeDescriptor};

/// Declared state mutability of a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mutability {
    Pure,
    View,
    NonPayable,
    Payable,
}

impl Mutability {
    /// Classify an entry. Unknown or missing values are treated as
    /// state-mutating; legacy `constant`/`payable` flags are honoured when
    /// `stateMutability` is absent.
    pub fn of(entry: &AbiEntry) -> Self {
        match entry.state_mutability.as_deref() {
            Some("pure") => Mutability::Pure,
            Some("view") => Mutability::View,
            Some("payable") => Mutability::Payable,
            Some("nonpayable") => Mutability::NonPayable,
            Some(_) => Mutability::NonPayable,
            None if entry.constant == Some(true) => Mutability::View,
            None if entry.payable == Some(true) => Mutability::Payable,
            None => Mutability::NonPayable,
        }
    }

    /// Read-only call (no transaction).
    pub fn is_read(self) -> bool {
        matches!(self, Mutability::Pure | Mutability::View)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mutability::Pure => "pure",
            Mutability::View => "view",
            Mutability::NonPayable => "nonpayable",
            Mutability::Payable => "payable",
        }
    }
}

/// How a CLI argument string becomes a typed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliConverter {
    /// Decimal or `0x` hex, range-checked against the width.
    Integer { signed: bool, bits: u16 },
    /// Exactly `true` or `false`.
    Boolean,
    /// 20-byte hex address, EIP-55 checksum enforced on mixed case.
    Address,
    /// `0x` hex or a UTF-8 literal; `size` bounds fixed-width byte strings.
    Bytes { size: Option<u8> },
    /// Passed through verbatim.
    Text,
    /// One flag occurrence collecting several values, each through `element`.
    Variadic { element: Box<CliConverter>, length: Option<usize> },
    /// Structured literal such as `(1, 0xab.., [true, false])`, typed by
    /// `signature`. Only for trusted input.
    Literal { signature: String },
}

impl CliConverter {
    pub fn for_type(ty: &TypeDescriptor) -> Self {
        match ty {
            TypeDescriptor::Elementary(e) => match e {
                ElementaryType::Uint(bits) => CliConverter::Integer { signed: false, bits: *bits },
                ElementaryType::Int(bits) => CliConverter::Integer { signed: true, bits: *bits },
                ElementaryType::Bool => CliConverter::Boolean,
                ElementaryType::Address => CliConverter::Address,
                ElementaryType::FixedBytes(n) => CliConverter::Bytes { size: Some(*n) },
                ElementaryType::Bytes => CliConverter::Bytes { size: None },
                ElementaryType::String => CliConverter::Text,
            },
            TypeDescriptor::FixedArray(element, n) => CliConverter::Variadic {
                element: Box::new(Self::for_element(element)),
                length: Some(*n),
            },
            TypeDescriptor::DynamicArray(element) => CliConverter::Variadic {
                element: Box::new(Self::for_element(element)),
                length: None,
            },
            TypeDescriptor::Tuple(_) => CliConverter::Literal { signature: ty.canonical() },
        }
    }

    fn for_element(element: &TypeDescriptor) -> Self {
        if element.is_array() || element.is_tuple() {
            CliConverter::Literal { signature: element.canonical() }
        } else {
            Self::for_type(element)
        }
    }

    /// Whether this converter goes through the structured-literal parser.
    pub fn is_trusted_input_only(&self) -> bool {
        match self {
            CliConverter::Literal { .. } => true,
            CliConverter::Variadic { element, .. } => element.is_trusted_input_only(),
            _ => false,
        }
    }
}

/// One function/event parameter with every derived name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub abi_name: String,
    pub abi_type: String,
    pub internal_type: Option<String>,
    pub ty: TypeDescriptor,
    /// Argument identifier in generated code.
    pub method_name: String,
    /// CLI flag without the leading `--`.
    pub cli_flag: String,
    pub converter: CliConverter,
    pub indexed: bool,
}

impl ParameterSpec {
    /// Build from an ABI parameter; `position` is the 1-based index among
    /// unnamed parameters and names them `arg1`, `arg2`, ...
    fn build(param: &AbiParam, unnamed: &mut usize) -> AbiResult<Self> {
        let ty = TypeDescriptor::from_param(param)?;
        let source_name = if param.name.is_empty() {
            let generated = format!("arg{}", unnamed);
            *unnamed += 1;
            generated
        } else {
            param.name.clone()
        };
        let method_name = naming::argument_name(&source_name);
        Ok(Self {
            abi_name: param.name.clone(),
            abi_type: param.type_.clone(),
            internal_type: param.internal_type.clone(),
            cli_flag: naming::cli_flag(&method_name),
            converter: CliConverter::for_type(&ty),
            method_name,
            ty,
            indexed: param.indexed,
        })
    }
}

/// A callable entry (function or constructor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSpec {
    /// Index of the entry in the ABI array.
    pub position: usize,
    /// Empty for the constructor.
    pub abi_name: String,
    pub method_name: String,
    pub cli_name: String,
    pub mutability: Mutability,
    pub inputs: Vec<ParameterSpec>,
    pub outputs: Vec<ParameterSpec>,
    /// `name(type,...)`, unique even across overloads.
    pub signature: String,
}

impl FunctionSpec {
    pub fn is_read(&self) -> bool {
        self.mutability.is_read()
    }
}

/// An event declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSpec {
    pub position: usize,
    pub abi_name: String,
    pub inputs: Vec<ParameterSpec>,
    pub anonymous: bool,
    pub signature: String,
}

/// Everything the emitters need to know about one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSpec {
    pub name: String,
    pub constructor: FunctionSpec,
    pub functions: Vec<FunctionSpec>,
    pub events: Vec<EventSpec>,
}

impl ContractSpec {
    /// Build the spec for `name` from its ABI entries.
    ///
    /// Fallback, receive and error entries, unnamed functions/events and
    /// functions without complete `inputs`/`outputs` lists are skipped.
    pub fn build(name: &str, abi: &[AbiEntry]) -> AbiResult<Self> {
        if name.trim().is_empty() {
            return Err(AbiError::malformed("contract name is empty"));
        }

        let mut constructor: Option<FunctionSpec> = None;
        let mut functions = Vec::new();
        let mut events = Vec::new();
        let mut registry = NameRegistry::new();
        let mut subcommands = NameRegistry::with_separator("-");
        for synthetic in naming::SYNTHETIC_SUBCOMMANDS {
            subcommands.reserve(synthetic);
        }
        let mut variants: HashSet<String> = naming::SYNTHETIC_VARIANTS.iter().map(|v| v.to_string()).collect();

        for (index, entry) in abi.iter().enumerate() {
            match entry.kind {
                EntryKind::Constructor => {
                    if constructor.is_some() {
                        return Err(AbiError::malformed("multiple constructors found in ABI"));
                    }
                    constructor = Some(build_constructor(entry, index)?);
                }
                EntryKind::Function => {
                    let (Some(abi_name), Some(inputs), Some(outputs)) =
                        (entry.name.as_deref(), entry.inputs.as_deref(), entry.outputs.as_deref())
                    else {
                        debug!(index, "skipping function entry without name, inputs or outputs");
                        continue;
                    };
                    if abi_name.is_empty() {
                        debug!(index, "skipping unnamed function entry");
                        continue;
                    }

                    let (method_name, ordinal) = registry.claim(&naming::method_name(abi_name));
                    if ordinal > 1 {
                        debug!(abi_name, %method_name, "disambiguated overloaded function");
                    }
                    // Both the subcommand and its enum variant must be unique
                    let base = naming::subcommand_name(abi_name);
                    let cli_name = loop {
                        let (candidate, _) = subcommands.claim(&base);
                        if variants.insert(naming::variant_name(&candidate)) {
                            break candidate;
                        }
                    };
                    if cli_name != base {
                        debug!(abi_name, %cli_name, "disambiguated CLI subcommand");
                    }

                    let inputs = build_inputs(inputs, abi_name)?;
                    let outputs = build_params(outputs)?;
                    functions.push(FunctionSpec {
                        position: index,
                        signature: signature(abi_name, &inputs),
                        abi_name: abi_name.to_string(),
                        method_name,
                        cli_name,
                        mutability: Mutability::of(entry),
                        inputs,
                        outputs,
                    });
                }
                EntryKind::Event => {
                    let (Some(abi_name), Some(inputs)) = (entry.name.as_deref(), entry.inputs.as_deref()) else {
                        debug!(index, "skipping event entry without name or inputs");
                        continue;
                    };
                    if abi_name.is_empty() {
                        continue;
                    }
                    let inputs = build_params(inputs)?;
                    events.push(EventSpec {
                        position: index,
                        signature: signature(abi_name, &inputs),
                        abi_name: abi_name.to_string(),
                        inputs,
                        anonymous: entry.anonymous,
                    });
                }
                EntryKind::Fallback | EntryKind::Receive | EntryKind::Error | EntryKind::Unknown => {
                    debug!(index, kind = ?entry.kind, "skipping non-callable entry");
                }
            }
        }

        let constructor = match constructor {
            Some(c) => c,
            None => build_constructor(&default_constructor(), 0)?,
        };

        Ok(Self {
            name: name.to_string(),
            constructor,
            functions,
            events,
        })
    }

    pub fn function(&self, method_name: &str) -> Option<&FunctionSpec> {
        self.functions.iter().find(|f| f.method_name == method_name)
    }

    pub fn event(&self, abi_name: &str) -> Option<&EventSpec> {
        self.events.iter().find(|e| e.abi_name == abi_name)
    }
}

/// Constructor used when the ABI declares none.
fn default_constructor() -> AbiEntry {
    AbiEntry {
        kind: EntryKind::Constructor,
        inputs: Some(vec![]),
        state_mutability: Some("payable".to_string()),
        ..Default::default()
    }
}

fn build_constructor(entry: &AbiEntry, position: usize) -> AbiResult<FunctionSpec> {
    let inputs = build_inputs(entry.inputs.as_deref().unwrap_or(&[]), "constructor")?;
    // A constructor always deploys, whatever the entry claims.
    let mutability = match Mutability::of(entry) {
        Mutability::Payable => Mutability::Payable,
        _ => Mutability::NonPayable,
    };
    Ok(FunctionSpec {
        position,
        signature: signature("constructor", &inputs),
        abi_name: String::new(),
        method_name: "deploy".to_string(),
        cli_name: "deploy".to_string(),
        mutability,
        inputs,
        outputs: vec![],
    })
}

fn build_params(params: &[AbiParam]) -> AbiResult<Vec<ParameterSpec>> {
    let mut unnamed = 1;
    params
        .iter()
        .map(|p| ParameterSpec::build(p, &mut unnamed))
        .collect()
}

/// Inputs additionally need distinct argument names and CLI flags.
fn build_inputs(params: &[AbiParam], owner: &str) -> AbiResult<Vec<ParameterSpec>> {
    let inputs = build_params(params)?;
    let mut idents: HashMap<&str, &str> = HashMap::new();
    let mut flags: HashMap<&str, &str> = HashMap::new();
    for input in &inputs {
        let source = if input.abi_name.is_empty() { &input.method_name } else { &input.abi_name };
        if let Some(first) = idents.insert(&input.method_name, source) {
            return Err(AbiError::NameCollision {
                scope: format!("arguments of {}", owner),
                name: input.method_name.clone(),
                first: first.to_string(),
                second: source.to_string(),
            });
        }
        if let Some(first) = flags.insert(&input.cli_flag, source) {
            return Err(AbiError::NameCollision {
                scope: format!("CLI flags of {}", owner),
                name: format!("--{}", input.cli_flag),
                first: first.to_string(),
                second: source.to_string(),
            });
        }
    }
    Ok(inputs)
}

fn signature(name: &str, inputs: &[ParameterSpec]) -> String {
    let types: Vec<String> = inputs.iter().map(|p| p.ty.canonical()).collect();
    format!("{}({})", name, types.join(","))
}
