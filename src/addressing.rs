//! # Addressing Modes
//!
//! This module defines the 13 addressing modes supported by the 6502 processor
//! and the resolver that turns a mode into an effective address and operand value.
//!
//! The resolver always runs with PC pointing at the first operand byte (the
//! opcode has already been fetched) and leaves PC pointing at the next
//! instruction.

use crate::{ExecutionError, MemoryBus, CPU};

/// 6502 addressing mode enumeration.
///
/// # Operand Sizes
///
/// - **0 bytes**: Implicit, Accumulator
/// - **1 byte**: Immediate, ZeroPage, ZeroPageX, ZeroPageY, Relative, IndirectX, IndirectY
/// - **2 bytes**: Absolute, AbsoluteX, AbsoluteY, Indirect
///
/// The discriminants are the stable numeric tags accepted by
/// [`AddressingMode::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AddressingMode {
    /// No operand, operation implied by instruction.
    ///
    /// Examples: CLC, RTS, NOP
    Implicit = 0,

    /// 8-bit constant operand in instruction.
    ///
    /// Example: LDA #$10
    Immediate = 1,

    /// 8-bit address in zero page (0x00-0xFF).
    ///
    /// Example: LDA $80
    ZeroPage = 2,

    /// Zero page address indexed by X register, wrapping within zero page.
    ///
    /// Example: LDA $80,X
    ZeroPageX = 3,

    /// Zero page address indexed by Y register, wrapping within zero page.
    ///
    /// Example: LDX $80,Y
    ZeroPageY = 4,

    /// Indexed indirect: (ZP + X) then dereference.
    ///
    /// Example: LDA ($40,X)
    IndirectX = 5,

    /// Indirect indexed: ZP dereference then + Y.
    ///
    /// Example: LDA ($40),Y
    IndirectY = 6,

    /// Operates directly on the accumulator register.
    ///
    /// Examples: LSR, ROL A
    Accumulator = 7,

    /// Signed 8-bit offset for branch instructions.
    Relative = 8,

    /// Full 16-bit address.
    ///
    /// Example: JMP $1234
    Absolute = 9,

    /// 16-bit address indexed by X register.
    ///
    /// +1 cycle when the index carries into the next page.
    AbsoluteX = 10,

    /// 16-bit address indexed by Y register.
    ///
    /// +1 cycle when the index carries into the next page.
    AbsoluteY = 11,

    /// Indirect jump through 16-bit pointer. Only used by JMP.
    ///
    /// Example: JMP ($FFFC)
    Indirect = 12,
}

impl AddressingMode {
    /// Number of operand bytes that follow the opcode.
    pub fn operand_size(self) -> usize {
        match self {
            AddressingMode::Implicit | AddressingMode::Accumulator => 0,
            AddressingMode::Immediate
            | AddressingMode::ZeroPage
            | AddressingMode::ZeroPageX
            | AddressingMode::ZeroPageY
            | AddressingMode::IndirectX
            | AddressingMode::IndirectY
            | AddressingMode::Relative => 1,
            AddressingMode::Absolute
            | AddressingMode::AbsoluteX
            | AddressingMode::AbsoluteY
            | AddressingMode::Indirect => 2,
        }
    }
}

impl TryFrom<u8> for AddressingMode {
    type Error = ExecutionError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        let mode = match tag {
            0 => AddressingMode::Implicit,
            1 => AddressingMode::Immediate,
            2 => AddressingMode::ZeroPage,
            3 => AddressingMode::ZeroPageX,
            4 => AddressingMode::ZeroPageY,
            5 => AddressingMode::IndirectX,
            6 => AddressingMode::IndirectY,
            7 => AddressingMode::Accumulator,
            8 => AddressingMode::Relative,
            9 => AddressingMode::Absolute,
            10 => AddressingMode::AbsoluteX,
            11 => AddressingMode::AbsoluteY,
            12 => AddressingMode::Indirect,
            other => return Err(ExecutionError::UnsupportedAddressingMode(other)),
        };
        Ok(mode)
    }
}

/// A resolved operand.
///
/// `address` is `None` for modes without a stable memory location
/// (immediate, accumulator). For relative mode it holds the branch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operand {
    pub address: Option<u16>,
    pub value: u8,
}

impl Operand {
    /// The effective address, or an error naming the mode that lacks one.
    pub(crate) fn address_for(self, mode: AddressingMode) -> Result<u16, ExecutionError> {
        self.address.ok_or(ExecutionError::NoEffectiveAddress(mode))
    }
}

/// True when `a` and `b` lie in different 256-byte pages.
pub(crate) fn crosses_page(a: u16, b: u16) -> bool {
    (a & 0xFF00) != (b & 0xFF00)
}

impl<M: MemoryBus> CPU<M> {
    /// Reads the byte at PC and advances PC.
    pub(crate) fn fetch_byte(&mut self) -> u8 {
        let value = self.memory.read(self.pc);
        self.pc = self.pc.wrapping_add(1);
        value
    }

    /// Reads a little-endian word at PC and advances PC by two.
    pub(crate) fn fetch_word(&mut self) -> u16 {
        let lo = self.fetch_byte() as u16;
        let hi = self.fetch_byte() as u16;
        (hi << 8) | lo
    }

    fn located(&self, address: u16) -> Operand {
        Operand {
            address: Some(address),
            value: self.memory.read(address),
        }
    }

    fn indexed_absolute(&mut self, index: u8) -> Operand {
        let base = self.fetch_word();
        let address = base.wrapping_add(index as u16);
        if crosses_page(base, address) {
            self.memory_cycles += 1;
        }
        self.located(address)
    }

    /// Resolves `mode` against the current registers, consuming its operand bytes.
    ///
    /// Page-crossing penalties for absolute-indexed modes are accumulated in
    /// the per-instruction memory cycle counter.
    pub(crate) fn resolve(&mut self, mode: AddressingMode) -> Result<Operand, ExecutionError> {
        let operand = match mode {
            AddressingMode::Implicit => return Err(ExecutionError::ImplicitModeRead),
            AddressingMode::Accumulator => Operand {
                address: None,
                value: self.a,
            },
            AddressingMode::Immediate => Operand {
                address: None,
                value: self.fetch_byte(),
            },
            AddressingMode::ZeroPage => {
                let address = self.fetch_byte() as u16;
                self.located(address)
            }
            AddressingMode::ZeroPageX => {
                let address = self.fetch_byte().wrapping_add(self.x) as u16;
                self.located(address)
            }
            AddressingMode::ZeroPageY => {
                let address = self.fetch_byte().wrapping_add(self.y) as u16;
                self.located(address)
            }
            AddressingMode::Absolute => {
                let address = self.fetch_word();
                self.located(address)
            }
            AddressingMode::AbsoluteX => self.indexed_absolute(self.x),
            AddressingMode::AbsoluteY => self.indexed_absolute(self.y),
            AddressingMode::Relative => {
                let offset = self.fetch_byte();
                // Bytes at or above 0x80 count backwards from 0x80.
                let target = if offset < 0x80 {
                    self.pc.wrapping_add(offset as u16)
                } else {
                    self.pc.wrapping_sub((offset - 0x80) as u16)
                };
                Operand {
                    address: Some(target),
                    value: offset,
                }
            }
            AddressingMode::IndirectX => {
                let pointer = self.fetch_byte().wrapping_add(self.x) as u16;
                let address = self.memory.read_word(pointer);
                self.located(address)
            }
            AddressingMode::IndirectY => {
                let pointer = self.fetch_byte() as u16;
                let address = self
                    .memory
                    .read_word(pointer)
                    .wrapping_add(self.y as u16);
                self.located(address)
            }
            AddressingMode::Indirect => {
                let pointer = self.fetch_word();
                let address = self.memory.read_word(pointer);
                self.located(address)
            }
        };
        Ok(operand)
    }
}
