//! Assembly source parser
//!
//! Turns one source line into zero or more [`SegmentGroup`]s. Operands are
//! classified by their syntax into an addressing mode; operands that name a
//! label become pending segments listing the modes they may still take.

use crate::assembler::segment::{MemorySegment, SegmentGroup};
use crate::assembler::AssemblerError;
use crate::opcodes::{encode, supports};
use crate::{AddressingMode, Operation};

/// A parsed operand value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Little-endian bytes of a numeric literal (1 or 2 bytes).
    Literal(Vec<u8>),
    /// A label or constant name.
    Label(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Index {
    X,
    Y,
}

/// Operand shapes recognised by the parser.
#[derive(Debug, Clone, PartialEq, Eq)]
enum OperandSyntax {
    /// No operand: implicit or accumulator.
    Empty,
    /// `A`
    Accumulator,
    /// `#value`
    Immediate(Value),
    /// `value`
    Bare(Value),
    /// `(value)`
    Indirect(Value),
    /// `(value,X)`
    IndexedIndirect(Value),
    /// `(value),Y`
    IndirectIndexed(Value),
    /// `value,X` / `value,Y`
    Indexed(Value, Index),
}

/// Strips any `;` comment, trims, and upper-cases.
pub fn clean_line(raw: &str) -> String {
    let code = raw.split(';').next().unwrap_or("");
    code.trim().to_ascii_uppercase()
}

/// Splits hex digits into little-endian bytes, left-padding to an even count.
fn hex_bytes(digits: &str) -> Option<Vec<u8>> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let padded = if digits.len() % 2 == 1 {
        format!("0{}", digits)
    } else {
        digits.to_string()
    };
    let mut bytes = padded
        .as_bytes()
        .chunks(2)
        .map(|pair| {
            let pair = std::str::from_utf8(pair).ok()?;
            u8::from_str_radix(pair, 16).ok()
        })
        .collect::<Option<Vec<u8>>>()?;
    bytes.reverse();
    Some(bytes)
}

/// Parses a numeric literal: `$hex`, `%binary`, or all-digit decimal.
///
/// Returns `None` when `text` is not a well-formed literal of at most two bytes.
///
/// ```
/// use sim6502::assembler::parser::parse_number;
///
/// assert_eq!(parse_number("$1020"), Some(vec![0x20, 0x10]));
/// assert_eq!(parse_number("$0010"), Some(vec![0x10, 0x00]));
/// assert_eq!(parse_number("300"), Some(vec![0x2C, 0x01]));
/// assert_eq!(parse_number("%1010"), Some(vec![0x0A]));
/// assert_eq!(parse_number("$12345"), None);
/// ```
pub fn parse_number(text: &str) -> Option<Vec<u8>> {
    let bytes = if let Some(hex) = text.strip_prefix('$') {
        hex_bytes(hex)?
    } else if let Some(binary) = text.strip_prefix('%') {
        let value = u16::from_str_radix(binary, 2).ok()?;
        hex_bytes(&format!("{:X}", value))?
    } else if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        let value: u16 = text.parse().ok()?;
        hex_bytes(&format!("{:X}", value))?
    } else {
        return None;
    };

    if bytes.len() > 2 {
        return None;
    }
    Some(bytes)
}

/// Checks label naming rules: a letter or underscore, then letters, digits
/// or underscores.
pub fn is_valid_label(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn invalid(line: usize, operand: &str) -> AssemblerError {
    AssemblerError::InvalidAddressingSyntax {
        line,
        operand: operand.to_string(),
    }
}

/// Parses an operand value as a literal or a label name.
pub fn parse_value(text: &str, line: usize) -> Result<Value, AssemblerError> {
    let starts_numeric =
        text.starts_with(['$', '%']) || text.starts_with(|c: char| c.is_ascii_digit());
    if starts_numeric {
        return parse_number(text)
            .map(Value::Literal)
            .ok_or_else(|| invalid(line, text));
    }
    if is_valid_label(text) {
        Ok(Value::Label(text.to_string()))
    } else {
        Err(invalid(line, text))
    }
}

fn classify(operand: &str, line: usize) -> Result<OperandSyntax, AssemblerError> {
    if operand.is_empty() {
        return Ok(OperandSyntax::Empty);
    }
    if operand == "A" {
        return Ok(OperandSyntax::Accumulator);
    }
    if let Some(value) = operand.strip_prefix('#') {
        return Ok(OperandSyntax::Immediate(parse_value(value, line)?));
    }
    if let Some(inner) = operand.strip_prefix('(') {
        if let Some(pointer) = inner.strip_suffix(",X)") {
            return Ok(OperandSyntax::IndexedIndirect(parse_value(pointer, line)?));
        }
        if let Some(pointer) = inner.strip_suffix("),Y") {
            return Ok(OperandSyntax::IndirectIndexed(parse_value(pointer, line)?));
        }
        if let Some(pointer) = inner.strip_suffix(')') {
            return Ok(OperandSyntax::Indirect(parse_value(pointer, line)?));
        }
        return Err(invalid(line, operand));
    }
    if let Some(base) = operand.strip_suffix(",X") {
        return Ok(OperandSyntax::Indexed(parse_value(base, line)?, Index::X));
    }
    if let Some(base) = operand.strip_suffix(",Y") {
        return Ok(OperandSyntax::Indexed(parse_value(base, line)?, Index::Y));
    }
    Ok(OperandSyntax::Bare(parse_value(operand, line)?))
}

struct Statement<'a> {
    line: usize,
    operator: &'a str,
    operation: Operation,
    operand: String,
}

impl Statement<'_> {
    fn error(&self) -> AssemblerError {
        invalid(self.line, &self.operand)
    }

    fn group(
        &self,
        mode: AddressingMode,
        memory: MemorySegment,
    ) -> Result<SegmentGroup, AssemblerError> {
        let opcode = encode(self.operation, mode).ok_or_else(|| self.error())?;
        Ok(SegmentGroup::instruction(
            self.line,
            self.operator,
            self.operation,
            mode,
            opcode,
            memory,
        ))
    }

    /// A literal that must fit the single given mode.
    fn fixed(&self, mode: AddressingMode, bytes: Vec<u8>) -> Result<SegmentGroup, AssemblerError> {
        if bytes.len() > mode.operand_size() {
            return Err(self.error());
        }
        let mut bytes = bytes;
        bytes.resize(mode.operand_size(), 0);
        self.group(mode, MemorySegment::known(bytes))
    }

    /// A literal choosing between a zero-page and an absolute form by width,
    /// widening when the operation has no zero-page form.
    fn sized(
        &self,
        zero_page: AddressingMode,
        absolute: AddressingMode,
        bytes: Vec<u8>,
    ) -> Result<SegmentGroup, AssemblerError> {
        if bytes.len() == 1 && supports(self.operation, zero_page) {
            self.group(zero_page, MemorySegment::known(bytes))
        } else {
            self.fixed(absolute, bytes)
        }
    }

    /// A label reference, keeping only the candidate modes the operation has.
    fn pending(
        &self,
        name: String,
        candidates: &[(usize, AddressingMode)],
    ) -> Result<SegmentGroup, AssemblerError> {
        let modes: Vec<(usize, AddressingMode)> = candidates
            .iter()
            .copied()
            .filter(|&(_, mode)| supports(self.operation, mode))
            .collect();
        let &(_, narrowest) = modes
            .iter()
            .min_by_key(|(size, _)| *size)
            .ok_or_else(|| self.error())?;
        self.group(narrowest, MemorySegment::pending(name, modes))
    }

    fn build(&self) -> Result<SegmentGroup, AssemblerError> {
        use AddressingMode::*;

        match classify(&self.operand, self.line)? {
            OperandSyntax::Empty => {
                let mode = [Implicit, Accumulator]
                    .into_iter()
                    .find(|&mode| supports(self.operation, mode))
                    .ok_or_else(|| self.error())?;
                self.group(mode, MemorySegment::known(Vec::new()))
            }
            OperandSyntax::Accumulator if supports(self.operation, Accumulator) => {
                self.group(Accumulator, MemorySegment::known(Vec::new()))
            }
            OperandSyntax::Accumulator => self.bare(Value::Label("A".to_string())),
            OperandSyntax::Immediate(Value::Literal(bytes)) => self.fixed(Immediate, bytes),
            OperandSyntax::Immediate(Value::Label(name)) => self.pending(name, &[(1, Immediate)]),
            OperandSyntax::Bare(value) => self.bare(value),
            OperandSyntax::Indirect(Value::Literal(bytes)) => self.fixed(Indirect, bytes),
            OperandSyntax::Indirect(Value::Label(name)) => self.pending(name, &[(2, Indirect)]),
            OperandSyntax::IndexedIndirect(Value::Literal(bytes)) => self.fixed(IndirectX, bytes),
            OperandSyntax::IndexedIndirect(Value::Label(name)) => {
                self.pending(name, &[(1, IndirectX)])
            }
            OperandSyntax::IndirectIndexed(Value::Literal(bytes)) => self.fixed(IndirectY, bytes),
            OperandSyntax::IndirectIndexed(Value::Label(name)) => {
                self.pending(name, &[(1, IndirectY)])
            }
            OperandSyntax::Indexed(value, index) => {
                let (zero_page, absolute) = match index {
                    Index::X => (ZeroPageX, AbsoluteX),
                    Index::Y => (ZeroPageY, AbsoluteY),
                };
                match value {
                    Value::Literal(bytes) => self.sized(zero_page, absolute, bytes),
                    Value::Label(name) => self.pending(name, &[(1, zero_page), (2, absolute)]),
                }
            }
        }
    }

    fn bare(&self, value: Value) -> Result<SegmentGroup, AssemblerError> {
        use AddressingMode::*;

        match value {
            // A literal branch operand is the raw displacement byte.
            Value::Literal(bytes) if self.operation.is_branch() => self.fixed(Relative, bytes),
            Value::Literal(bytes) => self.sized(ZeroPage, Absolute, bytes),
            Value::Label(name) if self.operation.is_branch() => {
                self.pending(name, &[(1, Relative)])
            }
            Value::Label(name) => self.pending(name, &[(1, ZeroPage), (2, Absolute)]),
        }
    }
}

fn parse_define(line: usize, operands: &[&str]) -> Result<SegmentGroup, AssemblerError> {
    let (name, value) = match operands {
        [name, value, ..] => (*name, *value),
        _ => return Err(AssemblerError::MissingDefineParameter { line }),
    };
    if !is_valid_label(name) {
        return Err(invalid(line, name));
    }
    let bytes = parse_number(value).ok_or_else(|| invalid(line, value))?;
    Ok(SegmentGroup::variable(line, name, bytes))
}

fn parse_statement(
    line: usize,
    operator: &str,
    operands: &[&str],
) -> Result<SegmentGroup, AssemblerError> {
    if operator == "DEFINE" {
        return parse_define(line, operands);
    }

    let operation =
        Operation::from_mnemonic(operator).ok_or_else(|| AssemblerError::UnknownOperator {
            line,
            operator: operator.to_string(),
        })?;

    Statement {
        line,
        operator,
        operation,
        operand: operands.concat(),
    }
    .build()
}

/// Parses one source line (1-based `line`) into segment groups.
///
/// Blank and comment-only lines yield nothing; `NAME: INSTRUCTION` yields a
/// label group followed by the instruction group.
pub fn parse_line(line: usize, raw: &str) -> Result<Vec<SegmentGroup>, AssemblerError> {
    let text = clean_line(raw);
    let tokens: Vec<&str> = text.split_whitespace().collect();

    let Some((&operator, mut operands)) = tokens.split_first() else {
        return Ok(Vec::new());
    };

    let mut groups = Vec::new();
    let mut operator = operator;

    if let Some(name) = operator.strip_suffix(':') {
        if !is_valid_label(name) {
            return Err(invalid(line, operator));
        }
        groups.push(SegmentGroup::label(line, name));

        match operands.split_first() {
            Some((&next, rest)) => {
                operator = next;
                operands = rest;
            }
            None => return Ok(groups),
        }
    }

    log::trace!("line {}: {} {:?}", line, operator, operands);
    groups.push(parse_statement(line, operator, operands)?);
    Ok(groups)
}
