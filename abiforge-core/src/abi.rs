//! Serializable ABI model.
//!
//! Mirrors the Solidity JSON ABI closely enough to round-trip it: fields the
//! generator never reads are simply not modelled, and fields that are
//! optional in the wild stay `Option` so the spec builder can tell
//! "absent" apart from "empty".

use serde::{Deserialize, Serialize};

/// Declared kind of an ABI entry. The ABI allows `type` to be omitted, in
/// which case the entry is a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    #[default]
    Function,
    Constructor,
    Event,
    Fallback,
    Receive,
    Error,
    #[serde(other)]
    Unknown,
}

/// One element of the top-level ABI array.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiEntry {
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inputs: Option<Vec<AbiParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<AbiParam>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_mutability: Option<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub anonymous: bool,
    /// Pre-0.5 compilers emit `constant` instead of `stateMutability`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constant: Option<bool>,
    /// Pre-0.5 compilers emit `payable` instead of `stateMutability`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payable: Option<bool>,
}

fn is_false(v: &bool) -> bool { !v }

/// A function/event parameter or a tuple component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(rename = "internalType", default, skip_serializing_if = "Option::is_none")]
    pub internal_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Vec<AbiParam>>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub indexed: bool,
}

impl AbiParam {
    pub fn new(name: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_: type_.into(),
            ..Default::default()
        }
    }

    pub fn with_components(mut self, components: Vec<AbiParam>) -> Self {
        self.components = Some(components);
        self
    }

    pub fn indexed(mut self) -> Self {
        self.indexed = true;
        self
    }
}

/// Build output of a contract as written by the usual build tools
/// (`contractName`, `bytecode`, and usually the ABI itself).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    pub contract_name: String,
    #[serde(default)]
    pub bytecode: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub abi: Option<Vec<AbiEntry>>,
}

/// Either a bare ABI array or an artifact object carrying one under `abi`.
#[derive(Deserialize)]
#[serde(untagged)]
enum AbiDocument {
    Entries(Vec<AbiEntry>),
    Artifact { abi: Vec<AbiEntry> },
}

/// Parse ABI JSON, accepting a bare entry array or a build artifact.
pub fn parse_abi(json: &str) -> Result<Vec<AbiEntry>, serde_json::Error> {
    let document: AbiDocument = serde_json::from_str(json)?;
    Ok(match document {
        AbiDocument::Entries(entries) => entries,
        AbiDocument::Artifact { abi } => abi,
    })
}

impl BuildDescriptor {
    /// Parse a build descriptor from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
