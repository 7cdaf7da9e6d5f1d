//! # Opcode Table
//!
//! This module contains the operation tags and the 256-slot opcode table that
//! serves as the single source of truth for decoding and encoding.
//!
//! The table holds the 151 documented NMOS 6502 opcodes across 56 operations.
//! Undocumented slots are empty (`None`) and decode as invalid opcodes.
//!
//! Each entry carries:
//! - Operation tag
//! - Addressing mode
//! - Base cycle cost (excluding page-crossing and branch penalties)

use crate::addressing::AddressingMode;

/// The 56 documented 6502 operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Adc,
    And,
    Asl,
    Bcc,
    Bcs,
    Beq,
    Bit,
    Bmi,
    Bne,
    Bpl,
    Brk,
    Bvc,
    Bvs,
    Clc,
    Cld,
    Cli,
    Clv,
    Cmp,
    Cpx,
    Cpy,
    Dec,
    Dex,
    Dey,
    Eor,
    Inc,
    Inx,
    Iny,
    Jmp,
    Jsr,
    Lda,
    Ldx,
    Ldy,
    Lsr,
    Nop,
    Ora,
    Pha,
    Php,
    Pla,
    Plp,
    Rol,
    Ror,
    Rti,
    Rts,
    Sbc,
    Sec,
    Sed,
    Sei,
    Sta,
    Stx,
    Sty,
    Tax,
    Tay,
    Tsx,
    Txa,
    Txs,
    Tya,
}

impl Operation {
    /// Every operation, in mnemonic order.
    pub const ALL: [Operation; 56] = [
        Operation::Adc,
        Operation::And,
        Operation::Asl,
        Operation::Bcc,
        Operation::Bcs,
        Operation::Beq,
        Operation::Bit,
        Operation::Bmi,
        Operation::Bne,
        Operation::Bpl,
        Operation::Brk,
        Operation::Bvc,
        Operation::Bvs,
        Operation::Clc,
        Operation::Cld,
        Operation::Cli,
        Operation::Clv,
        Operation::Cmp,
        Operation::Cpx,
        Operation::Cpy,
        Operation::Dec,
        Operation::Dex,
        Operation::Dey,
        Operation::Eor,
        Operation::Inc,
        Operation::Inx,
        Operation::Iny,
        Operation::Jmp,
        Operation::Jsr,
        Operation::Lda,
        Operation::Ldx,
        Operation::Ldy,
        Operation::Lsr,
        Operation::Nop,
        Operation::Ora,
        Operation::Pha,
        Operation::Php,
        Operation::Pla,
        Operation::Plp,
        Operation::Rol,
        Operation::Ror,
        Operation::Rti,
        Operation::Rts,
        Operation::Sbc,
        Operation::Sec,
        Operation::Sed,
        Operation::Sei,
        Operation::Sta,
        Operation::Stx,
        Operation::Sty,
        Operation::Tax,
        Operation::Tay,
        Operation::Tsx,
        Operation::Txa,
        Operation::Txs,
        Operation::Tya,
    ];

    /// Upper-case three-letter mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Operation::Adc => "ADC",
            Operation::And => "AND",
            Operation::Asl => "ASL",
            Operation::Bcc => "BCC",
            Operation::Bcs => "BCS",
            Operation::Beq => "BEQ",
            Operation::Bit => "BIT",
            Operation::Bmi => "BMI",
            Operation::Bne => "BNE",
            Operation::Bpl => "BPL",
            Operation::Brk => "BRK",
            Operation::Bvc => "BVC",
            Operation::Bvs => "BVS",
            Operation::Clc => "CLC",
            Operation::Cld => "CLD",
            Operation::Cli => "CLI",
            Operation::Clv => "CLV",
            Operation::Cmp => "CMP",
            Operation::Cpx => "CPX",
            Operation::Cpy => "CPY",
            Operation::Dec => "DEC",
            Operation::Dex => "DEX",
            Operation::Dey => "DEY",
            Operation::Eor => "EOR",
            Operation::Inc => "INC",
            Operation::Inx => "INX",
            Operation::Iny => "INY",
            Operation::Jmp => "JMP",
            Operation::Jsr => "JSR",
            Operation::Lda => "LDA",
            Operation::Ldx => "LDX",
            Operation::Ldy => "LDY",
            Operation::Lsr => "LSR",
            Operation::Nop => "NOP",
            Operation::Ora => "ORA",
            Operation::Pha => "PHA",
            Operation::Php => "PHP",
            Operation::Pla => "PLA",
            Operation::Plp => "PLP",
            Operation::Rol => "ROL",
            Operation::Ror => "ROR",
            Operation::Rti => "RTI",
            Operation::Rts => "RTS",
            Operation::Sbc => "SBC",
            Operation::Sec => "SEC",
            Operation::Sed => "SED",
            Operation::Sei => "SEI",
            Operation::Sta => "STA",
            Operation::Stx => "STX",
            Operation::Sty => "STY",
            Operation::Tax => "TAX",
            Operation::Tay => "TAY",
            Operation::Tsx => "TSX",
            Operation::Txa => "TXA",
            Operation::Txs => "TXS",
            Operation::Tya => "TYA",
        }
    }

    /// Looks up an operation by mnemonic (case-insensitive).
    pub fn from_mnemonic(text: &str) -> Option<Operation> {
        Operation::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(text))
    }

    /// True for the eight conditional branches.
    pub fn is_branch(self) -> bool {
        matches!(
            self,
            Operation::Bcc
                | Operation::Bcs
                | Operation::Beq
                | Operation::Bmi
                | Operation::Bne
                | Operation::Bpl
                | Operation::Bvc
                | Operation::Bvs
        )
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Metadata for a single populated opcode slot.
///
/// # Examples
///
/// ```
/// use sim6502::{AddressingMode, Operation, OPCODE_TABLE};
///
/// let lda_imm = OPCODE_TABLE[0xA9].unwrap();
/// assert_eq!(lda_imm.operation, Operation::Lda);
/// assert_eq!(lda_imm.mode, AddressingMode::Immediate);
/// assert_eq!(lda_imm.cycles, 2);
/// assert!(OPCODE_TABLE[0xFF].is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeEntry {
    /// Operation executed by this opcode.
    pub operation: Operation,

    /// Addressing mode for this opcode.
    pub mode: AddressingMode,

    /// Base cycle cost (before page crossing and branch penalties).
    pub cycles: u8,
}

impl OpcodeEntry {
    /// Total encoded size including the opcode byte.
    pub fn size(&self) -> usize {
        1 + self.mode.operand_size()
    }
}

const fn entry(
    opcode: u8,
    operation: Operation,
    mode: AddressingMode,
    cycles: u8,
) -> (u8, OpcodeEntry) {
    (
        opcode,
        OpcodeEntry {
            operation,
            mode,
            cycles,
        },
    )
}

const DOCUMENTED: [(u8, OpcodeEntry); 151] = {
    use AddressingMode::*;
    use Operation::*;
    [
        entry(0x00, Brk, Implicit, 7),
        entry(0x01, Ora, IndirectX, 6),
        entry(0x05, Ora, ZeroPage, 3),
        entry(0x06, Asl, ZeroPage, 5),
        entry(0x08, Php, Implicit, 3),
        entry(0x09, Ora, Immediate, 2),
        entry(0x0A, Asl, Accumulator, 2),
        entry(0x0D, Ora, Absolute, 4),
        entry(0x0E, Asl, Absolute, 6),
        entry(0x10, Bpl, Relative, 2),
        entry(0x11, Ora, IndirectY, 5),
        entry(0x15, Ora, ZeroPageX, 4),
        entry(0x16, Asl, ZeroPageX, 6),
        entry(0x18, Clc, Implicit, 2),
        entry(0x19, Ora, AbsoluteY, 4),
        entry(0x1D, Ora, AbsoluteX, 4),
        entry(0x1E, Asl, AbsoluteX, 7),
        entry(0x20, Jsr, Absolute, 6),
        entry(0x21, And, IndirectX, 6),
        entry(0x24, Bit, ZeroPage, 3),
        entry(0x25, And, ZeroPage, 3),
        entry(0x26, Rol, ZeroPage, 5),
        entry(0x28, Plp, Implicit, 4),
        entry(0x29, And, Immediate, 2),
        entry(0x2A, Rol, Accumulator, 2),
        entry(0x2C, Bit, Absolute, 4),
        entry(0x2D, And, Absolute, 4),
        entry(0x2E, Rol, Absolute, 6),
        entry(0x30, Bmi, Relative, 2),
        entry(0x31, And, IndirectY, 5),
        entry(0x35, And, ZeroPageX, 4),
        entry(0x36, Rol, ZeroPageX, 6),
        entry(0x38, Sec, Implicit, 2),
        entry(0x39, And, AbsoluteY, 4),
        entry(0x3D, And, AbsoluteX, 4),
        entry(0x3E, Rol, AbsoluteX, 7),
        entry(0x40, Rti, Implicit, 6),
        entry(0x41, Eor, IndirectX, 6),
        entry(0x45, Eor, ZeroPage, 3),
        entry(0x46, Lsr, ZeroPage, 5),
        entry(0x48, Pha, Implicit, 3),
        entry(0x49, Eor, Immediate, 2),
        entry(0x4A, Lsr, Accumulator, 2),
        entry(0x4C, Jmp, Absolute, 3),
        entry(0x4D, Eor, Absolute, 4),
        entry(0x4E, Lsr, Absolute, 6),
        entry(0x50, Bvc, Relative, 2),
        entry(0x51, Eor, IndirectY, 5),
        entry(0x55, Eor, ZeroPageX, 4),
        entry(0x56, Lsr, ZeroPageX, 6),
        entry(0x58, Cli, Implicit, 2),
        entry(0x59, Eor, AbsoluteY, 4),
        entry(0x5D, Eor, AbsoluteX, 4),
        entry(0x5E, Lsr, AbsoluteX, 7),
        entry(0x60, Rts, Implicit, 6),
        entry(0x61, Adc, IndirectX, 6),
        entry(0x65, Adc, ZeroPage, 3),
        entry(0x66, Ror, ZeroPage, 5),
        entry(0x68, Pla, Implicit, 4),
        entry(0x69, Adc, Immediate, 2),
        entry(0x6A, Ror, Accumulator, 2),
        entry(0x6C, Jmp, Indirect, 5),
        entry(0x6D, Adc, Absolute, 4),
        entry(0x6E, Ror, Absolute, 6),
        entry(0x70, Bvs, Relative, 2),
        entry(0x71, Adc, IndirectY, 5),
        entry(0x75, Adc, ZeroPageX, 4),
        entry(0x76, Ror, ZeroPageX, 6),
        entry(0x78, Sei, Implicit, 2),
        entry(0x79, Adc, AbsoluteY, 4),
        entry(0x7D, Adc, AbsoluteX, 4),
        entry(0x7E, Ror, AbsoluteX, 7),
        entry(0x81, Sta, IndirectX, 6),
        entry(0x84, Sty, ZeroPage, 3),
        entry(0x85, Sta, ZeroPage, 3),
        entry(0x86, Stx, ZeroPage, 3),
        entry(0x88, Dey, Implicit, 2),
        entry(0x8A, Txa, Implicit, 2),
        entry(0x8C, Sty, Absolute, 4),
        entry(0x8D, Sta, Absolute, 4),
        entry(0x8E, Stx, Absolute, 4),
        entry(0x90, Bcc, Relative, 2),
        entry(0x91, Sta, IndirectY, 6),
        entry(0x94, Sty, ZeroPageX, 4),
        entry(0x95, Sta, ZeroPageX, 4),
        entry(0x96, Stx, ZeroPageY, 4),
        entry(0x98, Tya, Implicit, 2),
        entry(0x99, Sta, AbsoluteY, 5),
        entry(0x9A, Txs, Implicit, 2),
        entry(0x9D, Sta, AbsoluteX, 5),
        entry(0xA0, Ldy, Immediate, 2),
        entry(0xA1, Lda, IndirectX, 6),
        entry(0xA2, Ldx, Immediate, 2),
        entry(0xA4, Ldy, ZeroPage, 3),
        entry(0xA5, Lda, ZeroPage, 3),
        entry(0xA6, Ldx, ZeroPage, 3),
        entry(0xA8, Tay, Implicit, 2),
        entry(0xA9, Lda, Immediate, 2),
        entry(0xAA, Tax, Implicit, 2),
        entry(0xAC, Ldy, Absolute, 4),
        entry(0xAD, Lda, Absolute, 4),
        entry(0xAE, Ldx, Absolute, 4),
        entry(0xB0, Bcs, Relative, 2),
        entry(0xB1, Lda, IndirectY, 5),
        entry(0xB4, Ldy, ZeroPageX, 4),
        entry(0xB5, Lda, ZeroPageX, 4),
        entry(0xB6, Ldx, ZeroPageY, 4),
        entry(0xB8, Clv, Implicit, 2),
        entry(0xB9, Lda, AbsoluteY, 4),
        entry(0xBA, Tsx, Implicit, 2),
        entry(0xBC, Ldy, AbsoluteX, 4),
        entry(0xBD, Lda, AbsoluteX, 4),
        entry(0xBE, Ldx, AbsoluteY, 4),
        entry(0xC0, Cpy, Immediate, 2),
        entry(0xC1, Cmp, IndirectX, 6),
        entry(0xC4, Cpy, ZeroPage, 3),
        entry(0xC5, Cmp, ZeroPage, 3),
        entry(0xC6, Dec, ZeroPage, 5),
        entry(0xC8, Iny, Implicit, 2),
        entry(0xC9, Cmp, Immediate, 2),
        entry(0xCA, Dex, Implicit, 2),
        entry(0xCC, Cpy, Absolute, 4),
        entry(0xCD, Cmp, Absolute, 4),
        entry(0xCE, Dec, Absolute, 6),
        entry(0xD0, Bne, Relative, 2),
        entry(0xD1, Cmp, IndirectY, 5),
        entry(0xD5, Cmp, ZeroPageX, 4),
        entry(0xD6, Dec, ZeroPageX, 6),
        entry(0xD8, Cld, Implicit, 2),
        entry(0xD9, Cmp, AbsoluteY, 4),
        entry(0xDD, Cmp, AbsoluteX, 4),
        entry(0xDE, Dec, AbsoluteX, 7),
        entry(0xE0, Cpx, Immediate, 2),
        entry(0xE1, Sbc, IndirectX, 6),
        entry(0xE4, Cpx, ZeroPage, 3),
        entry(0xE5, Sbc, ZeroPage, 3),
        entry(0xE6, Inc, ZeroPage, 5),
        entry(0xE8, Inx, Implicit, 2),
        entry(0xE9, Sbc, Immediate, 2),
        entry(0xEA, Nop, Implicit, 2),
        entry(0xEC, Cpx, Absolute, 4),
        entry(0xED, Sbc, Absolute, 4),
        entry(0xEE, Inc, Absolute, 6),
        entry(0xF0, Beq, Relative, 2),
        entry(0xF1, Sbc, IndirectY, 5),
        entry(0xF5, Sbc, ZeroPageX, 4),
        entry(0xF6, Inc, ZeroPageX, 6),
        entry(0xF8, Sed, Implicit, 2),
        entry(0xF9, Sbc, AbsoluteY, 4),
        entry(0xFD, Sbc, AbsoluteX, 4),
        entry(0xFE, Inc, AbsoluteX, 7),
    ]
};

const fn build_table() -> [Option<OpcodeEntry>; 256] {
    let mut table = [None; 256];
    let mut i = 0;
    while i < DOCUMENTED.len() {
        let (opcode, entry) = DOCUMENTED[i];
        table[opcode as usize] = Some(entry);
        i += 1;
    }
    table
}

/// Opcode table indexed by opcode byte; `None` marks an invalid opcode.
pub static OPCODE_TABLE: [Option<OpcodeEntry>; 256] = build_table();

/// Decodes an opcode byte.
pub fn decode(opcode: u8) -> Option<OpcodeEntry> {
    OPCODE_TABLE[opcode as usize]
}

/// Finds the opcode encoding `operation` in `mode`, if that pairing exists.
pub fn encode(operation: Operation, mode: AddressingMode) -> Option<u8> {
    OPCODE_TABLE
        .iter()
        .position(|slot| {
            matches!(slot, Some(entry) if entry.operation == operation && entry.mode == mode)
        })
        .map(|index| index as u8)
}

/// True if `operation` has an encoding in `mode`.
pub fn supports(operation: Operation, mode: AddressingMode) -> bool {
    encode(operation, mode).is_some()
}
