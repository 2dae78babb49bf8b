//! Interface emitter: the contract surface as a Solidity `interface`.
//!
//! Rendering goes through a small IR ([`SolItem`], [`SolParam`]) whose
//! `Display` impls are the only place Solidity syntax is produced. Names
//! are checked against the Solidity identifier grammar before they reach
//! the IR.

use std::collections::{HashMap, HashSet};
use std::fmt;

use abiforge_core::error::{AbiError, AbiResult};
use abiforge_core::spec::{ContractSpec, EventSpec, FunctionSpec, Mutability, ParameterSpec};
use abiforge_core::types::{TupleComponent, TypeDescriptor};

/// One parameter of a function, event or struct.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SolParam {
    pub ty: String,
    pub indexed: bool,
    pub memory: bool,
    pub name: Option<String>,
}

impl fmt::Display for SolParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.ty)?;
        if self.indexed {
            f.write_str(" indexed")?;
        }
        if self.memory {
            f.write_str(" memory")?;
        }
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolItem {
    Struct {
        name: String,
        fields: Vec<SolParam>,
    },
    Function {
        name: String,
        inputs: Vec<SolParam>,
        outputs: Vec<SolParam>,
        mutability: Option<&'static str>,
    },
    Event {
        name: String,
        inputs: Vec<SolParam>,
        anonymous: bool,
    },
}

fn join(params: &[SolParam]) -> String {
    params.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(", ")
}

impl fmt::Display for SolItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolItem::Struct { name, fields } => {
                writeln!(f, "struct {} {{", name)?;
                for field in fields {
                    writeln!(f, "\t{};", field)?;
                }
                f.write_str("}")
            }
            SolItem::Function { name, inputs, outputs, mutability } => {
                write!(f, "function {}({}) external", name, join(inputs))?;
                if let Some(m) = mutability {
                    write!(f, " {}", m)?;
                }
                if !outputs.is_empty() {
                    write!(f, " returns ({})", join(outputs))?;
                }
                f.write_str(";")
            }
            SolItem::Event { name, inputs, anonymous } => {
                write!(f, "event {}({})", name, join(inputs))?;
                if *anonymous {
                    f.write_str(" anonymous")?;
                }
                f.write_str(";")
            }
        }
    }
}

/// Render the full interface source from the fixed template.
pub fn render_interface(name: &str, items: &[SolItem], version: &str, pragma: &str) -> String {
    let body = items
        .iter()
        .map(|item| indent(&item.to_string()))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!(
        "// SPDX-License-Identifier: UNLICENSED\n\
         // Interface generated by abiforge: {version}\n\
         pragma solidity {pragma};\n\
         \n\
         interface {name} {{\n\
         {body}\n\
         }}\n"
    )
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("\t{}", line)).collect::<Vec<_>>().join("\n")
}

/// Lower a contract spec to interface items: struct declarations first
/// (nested ones before their users), then functions and events
/// interleaved in ABI order.
pub fn interface_items(spec: &ContractSpec) -> AbiResult<Vec<SolItem>> {
    check_identifier(&spec.name)?;

    enum Member<'a> {
        Function(&'a FunctionSpec),
        Event(&'a EventSpec),
    }
    let mut ordered: Vec<(usize, Member)> = spec
        .functions
        .iter()
        .map(|f| (f.position, Member::Function(f)))
        .chain(spec.events.iter().map(|e| (e.position, Member::Event(e))))
        .collect();
    ordered.sort_by_key(|(position, _)| *position);

    let mut structs = StructRegistry::default();
    let mut members = Vec::with_capacity(ordered.len());
    for (_, member) in ordered {
        members.push(match member {
            Member::Function(function) => {
                check_identifier(&function.abi_name)?;
                let mutability = match function.mutability {
                    Mutability::View => Some("view"),
                    Mutability::Payable => Some("payable"),
                    Mutability::Pure | Mutability::NonPayable => None,
                };
                SolItem::Function {
                    name: function.abi_name.clone(),
                    inputs: params(&function.inputs, &mut structs, true)?,
                    outputs: params(&function.outputs, &mut structs, true)?,
                    mutability,
                }
            }
            Member::Event(event) => {
                check_identifier(&event.abi_name)?;
                SolItem::Event {
                    name: event.abi_name.clone(),
                    inputs: params(&event.inputs, &mut structs, false)?,
                    anonymous: event.anonymous,
                }
            }
        });
    }

    let mut items = structs.items;
    items.extend(members);
    Ok(items)
}

fn params(inputs: &[ParameterSpec], structs: &mut StructRegistry, located: bool) -> AbiResult<Vec<SolParam>> {
    inputs
        .iter()
        .map(|p| {
            let name = Some(p.abi_name.clone()).filter(|n| !n.is_empty());
            if let Some(name) = &name {
                check_identifier(name)?;
            }
            Ok(SolParam {
                ty: structs.sol_type(&p.ty, p.internal_type.as_deref())?,
                indexed: p.indexed,
                memory: located && p.ty.is_reference(),
                name,
            })
        })
        .collect()
}

fn check_identifier(name: &str) -> AbiResult<()> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$') {
        Ok(())
    } else {
        Err(AbiError::malformed(format!("'{}' is not a Solidity identifier", name)))
    }
}

// ─── Struct declarations ─────────────────────────────────────────

#[derive(Default)]
struct StructRegistry {
    items: Vec<SolItem>,
    /// Field list → declared struct name.
    by_shape: HashMap<Vec<SolParam>, String>,
    /// Every struct name declared so far.
    taken: HashSet<String>,
}

impl StructRegistry {
    /// Solidity spelling of `ty`, declaring structs for any tuples in it.
    fn sol_type(&mut self, ty: &TypeDescriptor, internal_type: Option<&str>) -> AbiResult<String> {
        Ok(match ty {
            TypeDescriptor::Elementary(e) => e.name(),
            TypeDescriptor::FixedArray(inner, n) => format!("{}[{}]", self.sol_type(inner, internal_type)?, n),
            TypeDescriptor::DynamicArray(inner) => format!("{}[]", self.sol_type(inner, internal_type)?),
            TypeDescriptor::Tuple(members) => self.declare(members, internal_type)?,
        })
    }

    fn declare(&mut self, members: &[TupleComponent], internal_type: Option<&str>) -> AbiResult<String> {
        let fields = members
            .iter()
            .enumerate()
            .map(|(i, m)| {
                let name = match &m.name {
                    Some(name) => {
                        check_identifier(name)?;
                        name.clone()
                    }
                    None => format!("field{}", i + 1),
                };
                Ok(SolParam {
                    ty: self.sol_type(&m.ty, m.internal_type.as_deref())?,
                    indexed: false,
                    memory: false,
                    name: Some(name),
                })
            })
            .collect::<AbiResult<Vec<_>>>()?;

        if let Some(existing) = self.by_shape.get(&fields) {
            return Ok(existing.clone());
        }

        let base = internal_type
            .and_then(struct_name_from_internal_type)
            .unwrap_or_else(|| format!("Struct{}", self.items.len() + 1));
        check_identifier(&base)?;
        let mut name = base.clone();
        let mut suffix = 1;
        while self.taken.contains(&name) {
            suffix += 1;
            name = format!("{}_{}", base, suffix);
        }
        self.taken.insert(name.clone());

        self.by_shape.insert(fields.clone(), name.clone());
        self.items.push(SolItem::Struct {
            name: name.clone(),
            fields,
        });
        Ok(name)
    }
}

/// `struct Pool.Position[]` → `Position`.
fn struct_name_from_internal_type(internal_type: &str) -> Option<String> {
    let declared = internal_type.strip_prefix("struct ")?;
    let without_suffix = declared.split('[').next()?;
    let name = without_suffix.rsplit('.').next()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}
