//! ABI type-aware value parsing from CLI strings.
//!
//! Every generated CLI flag carries exactly one converter from this module
//! as its `value_parser`. The `*_parser` constructors capture the type
//! parameters (width, size, signature) so clap can call them with just the
//! raw string.

use abiforge_core::types::{ElementaryType, TypeDescriptor};

use crate::error::ParseError;
use crate::hex::{hex_decode, strip_0x};
use crate::value::{AbiValue, Address, I256, U256};

/// Decimal digits, or hex digits after a `0x` prefix. `None` on empty
/// input, a stray character or more than 256 bits.
fn magnitude(body: &str) -> Option<U256> {
    let (digits, radix) = match strip_0x(body) {
        Some(digits) => (digits, 16),
        None => (body, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    U256::from_str_radix(digits, radix as u64).ok()
}

/// Unsigned integer bounded by `bits`: decimal or `0x` hex.
pub fn uint(raw: &str, bits: u16) -> Result<U256, ParseError> {
    let value = magnitude(raw.trim()).ok_or_else(|| ParseError::InvalidInteger {
        raw: raw.to_string(),
        reason: "expected a non-negative decimal or 0x-prefixed hex number below 2^256".to_string(),
    })?;
    if value.bit_len() > bits as usize {
        return Err(ParseError::OutOfRange {
            raw: raw.to_string(),
            bits,
        });
    }
    Ok(value)
}

/// Signed integer bounded by `bits`: optional sign, decimal or `0x` hex.
pub fn int(raw: &str, bits: u16) -> Result<I256, ParseError> {
    let trimmed = raw.trim();
    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let value = magnitude(body).ok_or_else(|| ParseError::InvalidInteger {
        raw: raw.to_string(),
        reason: "expected a signed decimal or 0x-prefixed hex number".to_string(),
    })?;

    // Two's complement range: -2^(bits-1) ..= 2^(bits-1) - 1
    let limit = U256::from(1u64) << (bits as usize - 1);
    let fits = if negative { value <= limit } else { value < limit };
    if !fits {
        return Err(ParseError::OutOfRange {
            raw: raw.to_string(),
            bits,
        });
    }
    let raw_bits = if negative { value.wrapping_neg() } else { value };
    Ok(I256::from_raw(raw_bits))
}

/// Exactly `true` or `false`.
pub fn boolean(raw: &str) -> Result<bool, ParseError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::InvalidBool { raw: raw.to_string() }),
    }
}

/// 20-byte hex address. All-lowercase and all-uppercase digits are taken
/// as-is; mixed case must carry a valid EIP-55 checksum.
pub fn address(raw: &str) -> Result<Address, ParseError> {
    let invalid = |reason: String| ParseError::InvalidAddress {
        raw: raw.to_string(),
        reason,
    };
    let digits = strip_0x(raw).unwrap_or(raw);
    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid("expected 40 hex digits".to_string()));
    }
    let has_lower = digits.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = digits.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        Address::parse_checksummed(format!("0x{}", digits), None).map_err(|_| invalid("checksum mismatch".to_string()))
    } else {
        Ok(Address::from_slice(&hex_decode(digits)?))
    }
}

/// `0x`-prefixed hex, or else the UTF-8 bytes of `raw`.
///
/// With a `size` (for `bytesN`) hex input must decode to exactly `size`
/// bytes, while text may be shorter and is right-padded with zeros.
pub fn bytes(raw: &str, size: Option<u8>) -> Result<Vec<u8>, ParseError> {
    match (strip_0x(raw), size) {
        (Some(digits), None) => hex_decode(digits),
        (Some(digits), Some(size)) => {
            let bytes = hex_decode(digits)?;
            if bytes.len() != size as usize {
                return Err(ParseError::InvalidHex {
                    raw: raw.to_string(),
                    reason: format!("expected {} bytes, got {}", size, bytes.len()),
                });
            }
            Ok(bytes)
        }
        (None, None) => Ok(raw.as_bytes().to_vec()),
        (None, Some(size)) => {
            let text = raw.as_bytes();
            if text.len() > size as usize {
                return Err(ParseError::BytesTooLong { len: text.len(), size });
            }
            let mut bytes = vec![0u8; size as usize];
            bytes[..text.len()].copy_from_slice(text);
            Ok(bytes)
        }
    }
}

/// Strings pass through verbatim.
pub fn text(raw: &str) -> Result<String, ParseError> {
    Ok(raw.to_string())
}

/// Parse a structured literal typed by a canonical signature, e.g.
/// `(42, 0x5aAe..., [true, false])` for `(uint256,address,bool[])`.
///
/// This is a plain recursive-descent parser: no expression is ever
/// evaluated. It is still meant for trusted input only; the literal syntax
/// is loose and error positions are byte offsets, not hints.
pub fn literal(raw: &str, signature: &str) -> Result<AbiValue, ParseError> {
    let ty = TypeDescriptor::parse_canonical(signature).map_err(|_| ParseError::UnsupportedType {
        signature: signature.to_string(),
    })?;
    let mut parser = LiteralParser { src: raw, pos: 0 };
    let value = parser.value(&ty)?;
    parser.skip_ws();
    if parser.pos != raw.len() {
        return Err(ParseError::literal(parser.pos, "trailing input"));
    }
    Ok(value)
}

// ─── clap value parsers ──────────────────────────────────────────

pub fn uint_parser(bits: u16) -> impl Fn(&str) -> Result<U256, ParseError> + Clone + Send + Sync + 'static {
    move |raw: &str| uint(raw, bits)
}

pub fn int_parser(bits: u16) -> impl Fn(&str) -> Result<I256, ParseError> + Clone + Send + Sync + 'static {
    move |raw: &str| int(raw, bits)
}

pub fn bytes_parser(
    size: Option<u8>,
) -> impl Fn(&str) -> Result<Vec<u8>, ParseError> + Clone + Send + Sync + 'static {
    move |raw: &str| bytes(raw, size)
}

pub fn literal_parser(
    signature: &'static str,
) -> impl Fn(&str) -> Result<AbiValue, ParseError> + Clone + Send + Sync + 'static {
    move |raw: &str| literal(raw, signature)
}

// ─── Structured literal parser ───────────────────────────────────

struct LiteralParser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> LiteralParser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_ws(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.src.len() - trimmed.len();
    }

    fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, c: char) -> Result<(), ParseError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(ParseError::literal(self.pos, format!("expected '{}'", c)))
        }
    }

    fn value(&mut self, ty: &TypeDescriptor) -> Result<AbiValue, ParseError> {
        match ty {
            TypeDescriptor::Elementary(e) => self.elementary(e),
            TypeDescriptor::Tuple(members) => {
                let items = self.sequence('(', ')', |i| members.get(i).map(|m| &m.ty))?;
                self.check_len(items.len(), members.len())?;
                Ok(AbiValue::Tuple(items))
            }
            TypeDescriptor::FixedArray(element, n) => {
                let items = self.list(element)?;
                self.check_len(items.len(), *n)?;
                Ok(AbiValue::FixedArray(items))
            }
            TypeDescriptor::DynamicArray(element) => Ok(AbiValue::Array(self.list(element)?)),
        }
    }

    fn check_len(&self, found: usize, expected: usize) -> Result<(), ParseError> {
        if found == expected {
            Ok(())
        } else {
            Err(ParseError::literal(
                self.pos,
                format!("expected {} elements, got {}", expected, found),
            ))
        }
    }

    /// `[a, b, ...]`; `(a, b, ...)` is accepted as well.
    fn list(&mut self, element: &TypeDescriptor) -> Result<Vec<AbiValue>, ParseError> {
        self.skip_ws();
        let (open, close) = match self.peek() {
            Some('(') => ('(', ')'),
            _ => ('[', ']'),
        };
        self.sequence(open, close, |_| Some(element))
    }

    /// Comma-separated values between `open` and `close`, with an optional
    /// trailing comma. `type_at` yields the type of the i-th item and `None`
    /// once no more items are allowed.
    fn sequence<'t>(
        &mut self,
        open: char,
        close: char,
        type_at: impl Fn(usize) -> Option<&'t TypeDescriptor>,
    ) -> Result<Vec<AbiValue>, ParseError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            if self.eat(close) {
                break;
            }
            let ty = type_at(items.len())
                .ok_or_else(|| ParseError::literal(self.pos, "too many elements"))?;
            items.push(self.value(ty)?);
            if !self.eat(',') {
                self.expect(close)?;
                break;
            }
        }
        Ok(items)
    }

    fn elementary(&mut self, ty: &ElementaryType) -> Result<AbiValue, ParseError> {
        self.skip_ws();
        let start = self.pos;
        let token = match self.peek() {
            Some(q @ ('"' | '\'')) => self.quoted(q)?,
            _ => self.bare(),
        };
        if token.is_empty() && !matches!(ty, ElementaryType::String | ElementaryType::Bytes) {
            return Err(ParseError::literal(start, format!("expected a {} value", ty)));
        }
        let at = |e: ParseError| ParseError::literal(start, e.to_string());
        Ok(match ty {
            ElementaryType::Uint(bits) => AbiValue::Uint(uint(&token, *bits).map_err(at)?),
            ElementaryType::Int(bits) => AbiValue::Int(int(&token, *bits).map_err(at)?),
            ElementaryType::Address => AbiValue::Address(address(&token).map_err(at)?),
            ElementaryType::Bool => AbiValue::Bool(match token.as_str() {
                "true" | "True" => true,
                "false" | "False" => false,
                _ => return Err(at(ParseError::InvalidBool { raw: token.clone() })),
            }),
            ElementaryType::FixedBytes(n) => AbiValue::FixedBytes(bytes(&token, Some(*n)).map_err(at)?),
            ElementaryType::Bytes => AbiValue::Bytes(bytes(&token, None).map_err(at)?),
            ElementaryType::String => AbiValue::String(token),
        })
    }

    /// Characters up to the next delimiter or whitespace.
    fn bare(&mut self) -> String {
        let rest = self.rest();
        let end = rest
            .find(|c: char| c.is_whitespace() || matches!(c, ',' | '(' | ')' | '[' | ']'))
            .unwrap_or(rest.len());
        self.pos += end;
        rest[..end].to_string()
    }

    /// A single- or double-quoted string with backslash escapes.
    fn quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let start = self.pos;
        self.pos += quote.len_utf8();
        let mut out = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((i, c)) = chars.next() {
            match c {
                c if c == quote => {
                    self.pos += i + c.len_utf8();
                    return Ok(out);
                }
                '\\' => match chars.next() {
                    Some((_, 'n')) => out.push('\n'),
                    Some((_, 't')) => out.push('\t'),
                    Some((_, other)) => out.push(other),
                    None => break,
                },
                c => out.push(c),
            }
        }
        Err(ParseError::literal(start, "unterminated string"))
    }
}
