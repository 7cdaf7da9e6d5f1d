//! # Register Transfer Instructions
//!
//! This module implements register transfer operations:
//! - TAX, TAY, TXA, TYA, TSX: Copy and update Z and N from the destination
//! - TXS: Copy X into SP with no flag changes

use crate::cpu::STACK_BOTTOM;
use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the TAX (Transfer Accumulator to X) instruction.
pub(super) fn tax<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.x = cpu.a;
    cpu.check_zero_negative(cpu.x);
    Ok(())
}

/// Executes the TAY (Transfer Accumulator to Y) instruction.
pub(super) fn tay<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.y = cpu.a;
    cpu.check_zero_negative(cpu.y);
    Ok(())
}

/// Executes the TXA (Transfer X to Accumulator) instruction.
pub(super) fn txa<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.a = cpu.x;
    cpu.check_zero_negative(cpu.a);
    Ok(())
}

/// Executes the TYA (Transfer Y to Accumulator) instruction.
pub(super) fn tya<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.a = cpu.y;
    cpu.check_zero_negative(cpu.a);
    Ok(())
}

/// Executes the TSX (Transfer Stack Pointer to X) instruction.
///
/// X receives the offset of SP within the stack page.
pub(super) fn tsx<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.x = (cpu.sp & 0x00FF) as u8;
    cpu.check_zero_negative(cpu.x);
    Ok(())
}

/// Executes the TXS (Transfer X to Stack Pointer) instruction.
pub(super) fn txs<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.sp = STACK_BOTTOM | cpu.x as u16;
    Ok(())
}
