//! # Stack Operations
//!
//! This module implements stack manipulation instructions:
//! - PHA / PLA: Push / pull accumulator
//! - PHP / PLP: Push / pull processor status
//!
//! The stack occupies 0x0100-0x01FF and grows downward; see [`CPU::push`].

use crate::{ExecutionError, MemoryBus, CPU};

/// Executes the PHA (Push Accumulator) instruction.
pub(super) fn pha<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.push(cpu.a);
    Ok(())
}

/// Executes the PHP (Push Processor Status) instruction.
pub(super) fn php<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.push(cpu.p);
    Ok(())
}

/// Executes the PLA (Pull Accumulator) instruction. Updates Z and N.
pub(super) fn pla<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.a = cpu.pop();
    cpu.check_zero_negative(cpu.a);
    Ok(())
}

/// Executes the PLP (Pull Processor Status) instruction.
///
/// Every flag is re-derived from the pulled byte.
pub(super) fn plp<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let status = cpu.pop();
    cpu.set_status(status);
    Ok(())
}
