//! # 6502 Instruction-Set Simulator and Assembler
//!
//! An NMOS 6502 CPU core with a matching two-pass assembler that targets the
//! same opcode/addressing-mode model.
//!
//! ## Quick Start
//!
//! ```rust
//! use sim6502::{assemble, FlatMemory, CPU};
//!
//! let program = assemble("LDA #$42\nSTA $00").unwrap();
//! assert_eq!(program.bytes, vec![0xA9, 0x42, 0x85, 0x00]);
//!
//! let mut cpu = CPU::new(FlatMemory::new());
//! cpu.load_program(program.origin, &program.bytes).unwrap();
//! cpu.set_pc(program.origin);
//!
//! assert_eq!(cpu.execute().unwrap(), 2);
//! assert_eq!(cpu.a(), 0x42);
//! ```
//!
//! ## Architecture
//!
//! - **Table-Driven Design**: every opcode's operation, addressing mode and base
//!   cycle cost lives in one table shared by the CPU and the assembler
//! - **Modularity**: CPU state is separated from memory via the `MemoryBus` trait
//! - **Cycle Accounting**: each `execute()` returns the cycles it consumed,
//!   including page-crossing and branch penalties
//!
//! ## Modules
//!
//! - `cpu` - Register/flag model, stack, and the execute loop
//! - `memory` - MemoryBus trait and the flat 64KB store
//! - `opcodes` - Operation tags and the opcode table
//! - `addressing` - Addressing modes and operand resolution
//! - `assembler` - Source text to machine code

pub mod addressing;
pub mod assembler;
pub mod cpu;
pub mod memory;
pub mod opcodes;

// Internal instruction implementations (not part of public API)
mod instructions;

use thiserror::Error;

// Re-export public API
pub use addressing::{AddressingMode, Operand};
pub use assembler::{assemble, Assembler, AssemblerError, AssemblerOptions, AssemblerOutput};
pub use cpu::CPU;
pub use memory::{FlatMemory, MemoryBus, MemoryError};
pub use opcodes::{OpcodeEntry, Operation, OPCODE_TABLE};

/// Errors that can occur during CPU execution.
///
/// Any of these ends the current `execute()` call; the caller should stop
/// driving the processor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// Opcode byte with no entry in the opcode table.
    #[error("invalid opcode 0x{0:02X}")]
    InvalidOpcode(u8),

    /// The resolver was asked to read an operand in implicit mode.
    #[error("implicit addressing mode has no operand to read")]
    ImplicitModeRead,

    /// Numeric addressing-mode tag outside the 13 known modes.
    #[error("unsupported addressing mode tag {0}")]
    UnsupportedAddressingMode(u8),

    /// An operation that writes memory was given a mode without an address.
    #[error("addressing mode {0:?} has no effective address")]
    NoEffectiveAddress(AddressingMode),

    /// Memory access outside the address space.
    #[error(transparent)]
    Memory(#[from] MemoryError),
}
