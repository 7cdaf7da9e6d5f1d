//! # Load and Store Instructions
//!
//! This module implements register loads and stores:
//! - LDA, LDX, LDY: Load a register, updating Z and N
//! - STA, STX, STY: Store a register to memory, no flags affected

use crate::{AddressingMode, ExecutionError, MemoryBus, Operation, CPU};

/// Executes the LDA (Load Accumulator) instruction.
pub(super) fn lda<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.a = cpu.resolve(mode)?.value;
    cpu.check_zero_negative(cpu.a);
    Ok(())
}

/// Executes the LDX (Load X Register) instruction.
pub(super) fn ldx<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.x = cpu.resolve(mode)?.value;
    cpu.check_zero_negative(cpu.x);
    Ok(())
}

/// Executes the LDY (Load Y Register) instruction.
pub(super) fn ldy<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.y = cpu.resolve(mode)?.value;
    cpu.check_zero_negative(cpu.y);
    Ok(())
}

/// Executes STA, STX or STY.
pub(super) fn store<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = match operation {
        Operation::Stx => cpu.x,
        Operation::Sty => cpu.y,
        _ => cpu.a,
    };
    let address = cpu.resolve(mode)?.address_for(mode)?;
    cpu.memory.write(address, value);
    Ok(())
}
