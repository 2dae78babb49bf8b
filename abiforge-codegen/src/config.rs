//! Generator configuration.

use serde::Deserialize;

use crate::GenerateError;

/// Knobs shared by all emitters. Every field has a default, so an empty
/// TOML document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Path generated code uses to reach the runtime crate.
    pub runtime_path: String,
    /// Version stamp written into generated headers.
    pub version: String,
    /// `pragma solidity` constraint for interface stubs.
    pub pragma_version: String,
    /// Emit the clap command tree next to the binding struct.
    pub emit_cli: bool,
    /// Run the host source through the configured formatter.
    pub format: bool,
    /// Compile the build descriptor's ABI and bytecode into host bindings.
    pub embed_build: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            runtime_path: "::abiforge_cli".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            pragma_version: "^0.8.9".to_string(),
            emit_cli: true,
            format: true,
            embed_build: false,
        }
    }
}

impl GeneratorConfig {
    /// Parse `runtime_path` into a path usable inside `quote!`.
    pub fn runtime_path(&self) -> Result<syn::Path, GenerateError> {
        syn::parse_str(&self.runtime_path).map_err(|e| GenerateError::InvalidConfig {
            field: "runtime_path",
            message: format!("'{}' is not a Rust path: {}", self.runtime_path, e),
        })
    }

    pub fn validate(&self) -> Result<(), GenerateError> {
        self.runtime_path()?;
        if self.pragma_version.trim().is_empty() || self.pragma_version.contains([';', '\n']) {
            return Err(GenerateError::InvalidConfig {
                field: "pragma_version",
                message: format!("'{}' is not a version constraint", self.pragma_version),
            });
        }
        if self.version.contains('\n') {
            return Err(GenerateError::InvalidConfig {
                field: "version",
                message: "version stamp must fit on one line".to_string(),
            });
        }
        Ok(())
    }
}
