//! Identifier derivation: method names, CLI subcommands and flags.
//!
//! All functions here are pure; the only state is the [`NameRegistry`] a
//! contract build threads through its entries in ABI order.

use std::collections::{HashMap, HashSet};

/// Rust keywords (strict, reserved and 2018+ edition keywords).
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Inherent methods of a generated binding struct.
pub const RESERVED_METHOD_NAMES: &[&str] = &[
    "new",
    "deploy",
    "verify_contract",
    "address",
    "contract_name",
    "abi",
    "backend",
    "assert_contract_is_instantiated",
];

/// Locals of generated method bodies and fields of the shared CLI argument
/// groups; an ABI argument may not shadow or duplicate any of them.
pub const RESERVED_ARGUMENT_NAMES: &[&str] = &[
    "contract",
    "args",
    "result",
    "receipt",
    "deployment",
    "backend",
    "network",
    "call",
    "transact",
    "transaction_config",
    "block_number",
    "address",
    "sender",
    "password",
    "gas_price",
    "max_fee_per_gas",
    "max_priority_fee_per_gas",
    "confirmations",
    "nonce",
    "value",
    "verbose",
    "help",
];

/// Flags every generated subcommand may already carry.
pub const PROTECTED_FLAGS: &[&str] = &[
    "address",
    "block-number",
    "chain",
    "confirmations",
    "gas-price",
    "gas-limit",
    "max-fee-per-gas",
    "max-priority-fee-per-gas",
    "network",
    "nonce",
    "password",
    "sender",
    "signer",
    "value",
    "verbose",
    "help",
];

/// Subcommands the CLI emitter adds on its own.
pub const SYNTHETIC_SUBCOMMANDS: &[&str] = &["deploy", "verify-contract", "help"];

/// Command enum variants for [`SYNTHETIC_SUBCOMMANDS`].
pub const SYNTHETIC_VARIANTS: &[&str] = &["Deploy", "VerifyContract"];

pub fn is_rust_keyword(s: &str) -> bool {
    RUST_KEYWORDS.contains(&s)
}

/// camelCase / PascalCase / kebab-case to snake_case.
///
/// Acronyms stay together: `getDNA` becomes `get_dna`, `ERC20Token`
/// becomes `erc20_token`.
pub fn to_snake_case(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        if c == '-' {
            out.push('_');
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}

pub fn snake_to_kebab(s: &str) -> String {
    s.replace('_', "-")
}

pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-'])
        .map(|w| {
            let mut c = w.chars();
            match c.next() {
                None => String::new(),
                Some(ch) => ch.to_uppercase().collect::<String>() + c.as_str(),
            }
        })
        .collect()
}

/// Snake-case `raw` and force it into a valid identifier body: anything
/// outside `[a-z0-9_]` becomes `_`, and a leading digit gets a `_` prefix.
fn identifier_body(raw: &str) -> String {
    let mut ident: String = to_snake_case(raw)
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Method name for an ABI function, before collision resolution.
pub fn method_name(raw: &str) -> String {
    let mut ident = identifier_body(raw);
    if ident == "_" || is_rust_keyword(&ident) || RESERVED_METHOD_NAMES.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Argument name for an ABI parameter.
pub fn argument_name(raw: &str) -> String {
    let mut ident = identifier_body(raw);
    if ident == "_" || is_rust_keyword(&ident) || RESERVED_ARGUMENT_NAMES.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// CLI flag (without the leading `--`) for an argument name.
///
/// Names with surrounding underscores or clashing with a protected flag
/// get an `_arg` suffix, so `_owner` becomes `owner-arg` and `value_`
/// becomes `value-arg`.
pub fn cli_flag(argument: &str) -> String {
    let kebab = snake_to_kebab(argument);
    if argument.starts_with('_') || argument.ends_with('_') || PROTECTED_FLAGS.contains(&kebab.as_str()) {
        format!("{}-arg", snake_to_kebab(argument.trim_matches('_')))
    } else {
        kebab
    }
}

/// CLI subcommand for an ABI function name, before collision resolution.
///
/// Only `[a-z0-9-]` survives: any other character splits the name the way
/// an underscore does, so `get$` becomes `get` and `_setOwner` becomes
/// `set-owner`.
pub fn subcommand_name(raw: &str) -> String {
    let snake = to_snake_case(raw);
    let mut name = snake
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if name.is_empty() {
        name.push_str("function");
    }
    if SYNTHETIC_SUBCOMMANDS.contains(&name.as_str()) {
        name.push_str("-fn");
    }
    name
}

/// Enum variant for a CLI subcommand: `balance-of` becomes `BalanceOf`.
pub fn variant_name(subcommand: &str) -> String {
    let pascal = to_pascal_case(subcommand);
    if pascal == "Self" || pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Fn{}", pascal)
    } else {
        pascal
    }
}

/// Tracks claimed names across a contract so overloads get numeric suffixes.
#[derive(Debug, Clone)]
pub struct NameRegistry {
    separator: &'static str,
    taken: HashSet<String>,
    occurrences: HashMap<String, usize>,
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::with_separator("_")
    }
}

impl NameRegistry {
    /// Registry for Rust identifiers: `base_2`, `base_3`, ...
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry joining suffixes with `separator`, e.g. `-` for subcommands.
    pub fn with_separator(separator: &'static str) -> Self {
        Self {
            separator,
            taken: HashSet::new(),
            occurrences: HashMap::new(),
        }
    }

    /// Mark `name` as taken without claiming it.
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_string());
    }

    /// Claim `base`, returning the final name and the ordinal used.
    ///
    /// The first occurrence keeps `base` (ordinal 1); later ones become
    /// `base_2`, `base_3`, ... skipping any suffix that is already taken.
    pub fn claim(&mut self, base: &str) -> (String, usize) {
        let seen = self.occurrences.entry(base.to_string()).or_insert(0);
        *seen += 1;
        if *seen == 1 && !self.taken.contains(base) {
            self.taken.insert(base.to_string());
            return (base.to_string(), 1);
        }
        let mut ordinal = (*seen).max(2);
        loop {
            let candidate = format!("{}{}{}", base, self.separator, ordinal);
            if self.taken.insert(candidate.clone()) {
                *seen = ordinal;
                return (candidate, ordinal);
            }
            ordinal += 1;
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taken.contains(name)
    }
}
