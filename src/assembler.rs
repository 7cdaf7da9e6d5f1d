//! 6502 Assembler Module
//!
//! Converts assembly language source code into binary machine code.
//!
//! Assembly runs in four stages over a `Vec<SegmentGroup>`, one group per
//! instruction, label or constant:
//!
//! 1. [`parser`] classifies each line's operand into an addressing mode,
//!    leaving label references pending
//! 2. [`resolver`] lays the groups out and fills pending operands, repeating
//!    until no operand changes width
//! 3. [`encoder`] concatenates the opcode and operand bytes
//! 4. [`symbol_table`] snapshots the final label and constant values

pub mod encoder;
pub mod parser;
pub mod resolver;
pub mod segment;
pub mod symbol_table;

use thiserror::Error;

pub use symbol_table::{Symbol, SymbolKind};

/// Default emission address
pub const DEFAULT_ORIGIN: u16 = 0x0600;

/// An error encountered during assembly.
///
/// Every variant carries the 1-based source line that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblerError {
    /// First token is neither a mnemonic, `DEFINE`, nor a label.
    #[error("line {line}: unknown operator '{operator}'")]
    UnknownOperator { line: usize, operator: String },

    /// `DEFINE` without both a name and a value.
    #[error("line {line}: DEFINE requires a name and a value")]
    MissingDefineParameter { line: usize },

    /// Operand text matches no addressing mode the operator supports.
    #[error("line {line}: invalid operand '{operand}'")]
    InvalidAddressingSyntax { line: usize, operand: String },

    /// Reference to a label that is never declared.
    #[error("line {line}: undefined label '{label}'")]
    MissingLabelDeclaration { line: usize, label: String },

    /// Branch target beyond a signed byte (strict mode only).
    #[error("line {line}: branch to '{label}' out of range ({displacement} bytes)")]
    BranchOutOfRange {
        line: usize,
        label: String,
        displacement: i64,
    },

    /// Code or a label placed beyond the top of the 64 KB address space.
    #[error("line {line}: program extends past $FFFF")]
    ProgramOverflow { line: usize },

    /// A segment reached encoding without being resolved.
    #[error("line {line}: segment left unresolved")]
    UnresolvedSegment { line: usize },
}

impl AssemblerError {
    /// Source line number of the error.
    pub fn line(&self) -> usize {
        match self {
            AssemblerError::UnknownOperator { line, .. }
            | AssemblerError::MissingDefineParameter { line }
            | AssemblerError::InvalidAddressingSyntax { line, .. }
            | AssemblerError::MissingLabelDeclaration { line, .. }
            | AssemblerError::BranchOutOfRange { line, .. }
            | AssemblerError::ProgramOverflow { line }
            | AssemblerError::UnresolvedSegment { line } => *line,
        }
    }
}

/// Assembly settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssemblerOptions {
    /// Address of the first emitted byte
    pub origin: u16,

    /// Reject branches whose target is more than a signed byte away instead
    /// of keeping the low byte of the displacement
    pub check_branch_range: bool,
}

impl Default for AssemblerOptions {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN,
            check_branch_range: false,
        }
    }
}

impl AssemblerOptions {
    pub fn with_origin(mut self, origin: u16) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_branch_range_check(mut self, enabled: bool) -> Self {
        self.check_branch_range = enabled;
        self
    }
}

/// Complete output from assembling source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblerOutput {
    /// Assembled machine code bytes
    pub bytes: Vec<u8>,

    /// Address the first byte belongs at
    pub origin: u16,

    /// Labels and constants with their final values, in definition order
    pub symbols: Vec<Symbol>,
}

impl AssemblerOutput {
    /// Look up a symbol by name (upper case)
    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }
}

/// Two-pass assembler
#[derive(Debug, Clone, Default)]
pub struct Assembler {
    options: AssemblerOptions,
}

impl Assembler {
    pub fn new(options: AssemblerOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &AssemblerOptions {
        &self.options
    }

    /// Assembles `source` into machine code.
    ///
    /// # Errors
    ///
    /// Returns the first error found; parsing stops at the first bad line.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{Assembler, AssemblerOptions};
    ///
    /// let assembler = Assembler::new(AssemblerOptions::default().with_origin(0xC000));
    /// let output = assembler.assemble("start:\nJMP start").unwrap();
    /// assert_eq!(output.bytes, vec![0x4C, 0x00, 0xC0]);
    /// ```
    pub fn assemble(&self, source: &str) -> Result<AssemblerOutput, AssemblerError> {
        let mut groups = Vec::new();
        for (index, line) in source.lines().enumerate() {
            groups.extend(parser::parse_line(index + 1, line)?);
        }

        resolver::resolve(
            &mut groups,
            self.options.origin,
            self.options.check_branch_range,
        )?;
        let bytes = encoder::encode(&groups)?;

        log::debug!(
            "assembled {} bytes at ${:04X}",
            bytes.len(),
            self.options.origin
        );

        Ok(AssemblerOutput {
            bytes,
            origin: self.options.origin,
            symbols: symbol_table::SymbolTable::scan(&groups).into_symbols(),
        })
    }
}

/// Assemble source code with default options
///
/// # Arguments
///
/// * `source` - The assembly source code text
pub fn assemble(source: &str) -> Result<AssemblerOutput, AssemblerError> {
    Assembler::default().assemble(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_line_numbers() {
        let error = assemble("LDA #$01\n\nBOGUS").unwrap_err();
        assert_eq!(error.line(), 3);

        let error = assemble("define only").unwrap_err();
        assert_eq!(error.line(), 1);
    }

    #[test]
    fn test_error_display() {
        let error = AssemblerError::MissingLabelDeclaration {
            line: 4,
            label: "LOOP".to_string(),
        };
        assert_eq!(error.to_string(), "line 4: undefined label 'LOOP'");
    }

    #[test]
    fn test_default_options() {
        let options = AssemblerOptions::default();
        assert_eq!(options.origin, 0x0600);
        assert!(!options.check_branch_range);
    }

    #[test]
    fn test_empty_source() {
        let output = assemble("").unwrap();
        assert!(output.bytes.is_empty());
        assert!(output.symbols.is_empty());
    }

    #[test]
    fn test_symbols_reported() {
        let output = assemble("define color $05\nstart:\nLDA #color\nend:").unwrap();
        assert_eq!(output.symbol("COLOR").unwrap().value, 0x05);
        assert_eq!(output.symbol("START").unwrap().value, 0x0600);
        assert_eq!(output.symbol("END").unwrap().value, 0x0602);
        assert_eq!(output.bytes, vec![0xA9, 0x05]);
    }
}
