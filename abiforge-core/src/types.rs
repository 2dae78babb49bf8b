//! Type normalization: raw ABI type strings into [`TypeDescriptor`]s.
//!
//! Two textual forms are understood:
//! - the ABI form used in JSON (`tuple[2]` plus a `components` list), read by
//!   [`TypeDescriptor::normalize`] and re-derived by [`TypeDescriptor::abi_type`]
//!   (aliases such as `uint` re-derive as their canonical name);
//! - the canonical signature form (`(uint256,address)[2]`), read by
//!   [`TypeDescriptor::parse_canonical`] and produced by
//!   [`TypeDescriptor::canonical`].

use std::fmt;

use crate::abi::AbiParam;
use crate::error::{AbiError, AbiResult};

/// Elementary ABI types. Integer widths are in bits, fixed byte widths in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementaryType {
    Uint(u16),
    Int(u16),
    Address,
    Bool,
    FixedBytes(u8),
    Bytes,
    String,
}

impl ElementaryType {
    /// Look up a base type name in the supported table.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "address" => return Some(ElementaryType::Address),
            "bool" => return Some(ElementaryType::Bool),
            "bytes" => return Some(ElementaryType::Bytes),
            "string" => return Some(ElementaryType::String),
            "byte" => return Some(ElementaryType::FixedBytes(1)),
            "uint" => return Some(ElementaryType::Uint(256)),
            "int" => return Some(ElementaryType::Int(256)),
            _ => {}
        }
        if let Some(bits) = name.strip_prefix("uint") {
            return parse_int_width(bits).map(ElementaryType::Uint);
        }
        if let Some(bits) = name.strip_prefix("int") {
            return parse_int_width(bits).map(ElementaryType::Int);
        }
        if let Some(size) = name.strip_prefix("bytes") {
            return parse_digits(size)
                .filter(|n| (1..=32).contains(n))
                .map(|n| ElementaryType::FixedBytes(n as u8));
        }
        None
    }

    /// Canonical name, e.g. `uint256` or `bytes32`.
    pub fn name(&self) -> String {
        match self {
            ElementaryType::Uint(bits) => format!("uint{}", bits),
            ElementaryType::Int(bits) => format!("int{}", bits),
            ElementaryType::Address => "address".to_string(),
            ElementaryType::Bool => "bool".to_string(),
            ElementaryType::FixedBytes(n) => format!("bytes{}", n),
            ElementaryType::Bytes => "bytes".to_string(),
            ElementaryType::String => "string".to_string(),
        }
    }
}

impl fmt::Display for ElementaryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn parse_digits(s: &str) -> Option<usize> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) || s.starts_with('0') {
        return None;
    }
    s.parse().ok()
}

fn parse_int_width(bits: &str) -> Option<u16> {
    parse_digits(bits)
        .filter(|n| *n % 8 == 0 && (8..=256).contains(n))
        .map(|n| n as u16)
}

/// A member of a tuple type. Unnamed members are positional.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleComponent {
    pub name: Option<String>,
    pub internal_type: Option<String>,
    pub ty: TypeDescriptor,
}

/// Canonical semantic type of an ABI value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeDescriptor {
    Elementary(ElementaryType),
    FixedArray(Box<TypeDescriptor>, usize),
    DynamicArray(Box<TypeDescriptor>),
    Tuple(Vec<TupleComponent>),
}

impl TypeDescriptor {
    /// Normalize an ABI type string; `components` is only consulted for tuples
    /// (including arrays of tuples).
    pub fn normalize(type_string: &str, components: &[AbiParam]) -> AbiResult<Self> {
        let trimmed = type_string.trim();

        if let Some(stripped) = trimmed.strip_suffix(']') {
            let open = stripped
                .rfind('[')
                .ok_or_else(|| AbiError::unsupported(type_string))?;
            let element = Box::new(Self::normalize(&stripped[..open], components)?);
            let size = &stripped[open + 1..];
            if size.is_empty() {
                return Ok(TypeDescriptor::DynamicArray(element));
            }
            let length = parse_digits(size).ok_or_else(|| AbiError::unsupported(type_string))?;
            return Ok(TypeDescriptor::FixedArray(element, length));
        }

        if trimmed == "tuple" {
            if components.is_empty() {
                return Err(AbiError::malformed(format!(
                    "'{}' declared without components",
                    type_string
                )));
            }
            let members = components
                .iter()
                .map(|c| {
                    Ok(TupleComponent {
                        name: Some(c.name.clone()).filter(|n| !n.is_empty()),
                        internal_type: c.internal_type.clone(),
                        ty: Self::from_param(c)?,
                    })
                })
                .collect::<AbiResult<Vec<_>>>()?;
            return Ok(TypeDescriptor::Tuple(members));
        }

        ElementaryType::parse(trimmed)
            .map(TypeDescriptor::Elementary)
            .ok_or_else(|| AbiError::unsupported(trimmed))
    }

    /// Normalize the type of an ABI parameter, components included.
    pub fn from_param(param: &AbiParam) -> AbiResult<Self> {
        Self::normalize(&param.type_, param.components.as_deref().unwrap_or(&[]))
    }

    /// Parse the canonical signature form, e.g. `(uint256,bytes32[])[2]`.
    /// Tuple members come back positional.
    pub fn parse_canonical(signature: &str) -> AbiResult<Self> {
        let mut cursor = Cursor { src: signature, pos: 0 };
        let ty = cursor.parse_type()?;
        if cursor.pos != signature.len() {
            return Err(AbiError::unsupported(signature));
        }
        Ok(ty)
    }

    /// Re-derive the ABI JSON type string (`tuple[]` for arrays of tuples).
    ///
    /// The result is the canonical spelling, so this round-trips every
    /// type string except the aliases `uint`, `int` and `byte`: those come
    /// back as `uint256`, `int256` and `bytes1`. The raw string stays
    /// available on [`ParameterSpec::abi_type`](crate::spec::ParameterSpec).
    pub fn abi_type(&self) -> String {
        match self {
            TypeDescriptor::Elementary(e) => e.name(),
            TypeDescriptor::FixedArray(inner, n) => format!("{}[{}]", inner.abi_type(), n),
            TypeDescriptor::DynamicArray(inner) => format!("{}[]", inner.abi_type()),
            TypeDescriptor::Tuple(_) => "tuple".to_string(),
        }
    }

    /// Canonical signature form, as used in function selectors.
    pub fn canonical(&self) -> String {
        match self {
            TypeDescriptor::Elementary(e) => e.name(),
            TypeDescriptor::FixedArray(inner, n) => format!("{}[{}]", inner.canonical(), n),
            TypeDescriptor::DynamicArray(inner) => format!("{}[]", inner.canonical()),
            TypeDescriptor::Tuple(members) => {
                let parts: Vec<String> = members.iter().map(|m| m.ty.canonical()).collect();
                format!("({})", parts.join(","))
            }
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeDescriptor::FixedArray(..) | TypeDescriptor::DynamicArray(_))
    }

    pub fn is_tuple(&self) -> bool {
        matches!(self, TypeDescriptor::Tuple(_))
    }

    /// Element type of an array, `None` otherwise.
    pub fn element(&self) -> Option<&TypeDescriptor> {
        match self {
            TypeDescriptor::FixedArray(inner, _) | TypeDescriptor::DynamicArray(inner) => Some(inner),
            _ => None,
        }
    }

    /// Whether a Solidity declaration of this type needs a data location.
    pub fn is_reference(&self) -> bool {
        match self {
            TypeDescriptor::Elementary(e) => {
                matches!(e, ElementaryType::Bytes | ElementaryType::String)
            }
            _ => true,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

// ─── Canonical signature parser ──────────────────────────────────

struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn expect(&mut self, byte: u8) -> AbiResult<()> {
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(AbiError::unsupported(self.src))
        }
    }

    fn parse_type(&mut self) -> AbiResult<TypeDescriptor> {
        let mut ty = if self.peek() == Some(b'(') {
            self.parse_tuple()?
        } else {
            let start = self.pos;
            while matches!(self.peek(), Some(b) if b.is_ascii_alphanumeric()) {
                self.pos += 1;
            }
            let name = &self.src[start..self.pos];
            ElementaryType::parse(name)
                .map(TypeDescriptor::Elementary)
                .ok_or_else(|| AbiError::unsupported(name))?
        };

        while self.peek() == Some(b'[') {
            self.pos += 1;
            let start = self.pos;
            while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
                self.pos += 1;
            }
            let size = &self.src[start..self.pos];
            self.expect(b']')?;
            ty = if size.is_empty() {
                TypeDescriptor::DynamicArray(Box::new(ty))
            } else {
                let length = parse_digits(size).ok_or_else(|| AbiError::unsupported(self.src))?;
                TypeDescriptor::FixedArray(Box::new(ty), length)
            };
        }
        Ok(ty)
    }

    fn parse_tuple(&mut self) -> AbiResult<TypeDescriptor> {
        self.expect(b'(')?;
        if self.peek() == Some(b')') {
            return Err(AbiError::malformed(format!("empty tuple in '{}'", self.src)));
        }
        let mut members = Vec::new();
        loop {
            members.push(TupleComponent {
                name: None,
                internal_type: None,
                ty: self.parse_type()?,
            });
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b')') => {
                    self.pos += 1;
                    return Ok(TypeDescriptor::Tuple(members));
                }
                _ => return Err(AbiError::unsupported(self.src)),
            }
        }
    }
}
