//! # Increment and Decrement Instructions
//!
//! This module implements increment and decrement operations:
//! - INC, DEC: Read-modify-write on memory
//! - INX, INY, DEX, DEY: Index registers
//!
//! All wrap at 8 bits and update Z and N from the wrapped result.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

fn step_memory<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    delta: i8,
) -> Result<(), ExecutionError> {
    let operand = cpu.resolve(mode)?;
    let address = operand.address_for(mode)?;

    let result = operand.value.wrapping_add_signed(delta);
    cpu.memory.write(address, result);

    cpu.check_zero_negative(result);
    Ok(())
}

/// Executes the INC (Increment Memory) instruction.
pub(super) fn inc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    step_memory(cpu, mode, 1)
}

/// Executes the DEC (Decrement Memory) instruction.
pub(super) fn dec<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    step_memory(cpu, mode, -1)
}

pub(super) fn inx<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_add(1);
    cpu.check_zero_negative(cpu.x);
    Ok(())
}

pub(super) fn iny<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_add(1);
    cpu.check_zero_negative(cpu.y);
    Ok(())
}

pub(super) fn dex<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.x = cpu.x.wrapping_sub(1);
    cpu.check_zero_negative(cpu.x);
    Ok(())
}

pub(super) fn dey<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.y = cpu.y.wrapping_sub(1);
    cpu.check_zero_negative(cpu.y);
    Ok(())
}
