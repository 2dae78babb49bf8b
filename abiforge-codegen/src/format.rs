//! Source formatting seam for generated host code.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::GenerateError;

/// Turns a rendered token stream into presentable source.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String, GenerateError>;
}

/// Leaves the source untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unformatted;

impl SourceFormatter for Unformatted {
    fn format(&self, source: &str) -> Result<String, GenerateError> {
        Ok(source.to_string())
    }
}

/// Pipes the source through an external `rustfmt`.
#[derive(Debug, Clone)]
pub struct Rustfmt {
    pub program: String,
    pub edition: String,
}

impl Default for Rustfmt {
    fn default() -> Self {
        Self {
            program: "rustfmt".to_string(),
            edition: "2021".to_string(),
        }
    }
}

impl SourceFormatter for Rustfmt {
    fn format(&self, source: &str) -> Result<String, GenerateError> {
        let format_error = |message: String| GenerateError::Format { message };

        debug!(program = %self.program, "formatting generated source");
        let mut child = Command::new(&self.program)
            .args(["--edition", &self.edition, "--emit", "stdout"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| format_error(format!("failed to run {}: {}", self.program, e)))?;

        child
            .stdin
            .take()
            .ok_or_else(|| format_error("stdin of formatter not captured".to_string()))?
            .write_all(source.as_bytes())
            .map_err(|e| format_error(format!("failed to write to {}: {}", self.program, e)))?;

        let output = child
            .wait_with_output()
            .map_err(|e| format_error(format!("{} did not finish: {}", self.program, e)))?;
        if !output.status.success() {
            return Err(format_error(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        String::from_utf8(output.stdout).map_err(|e| format_error(format!("non UTF-8 output: {}", e)))
    }
}
