//! # Status Flag Manipulation Instructions
//!
//! CLC, SEC, CLI, SEI, CLD, SED, CLV. Each touches exactly one flag.
//! SED sets D, which has no effect on arithmetic.

use crate::{ExecutionError, MemoryBus, CPU};

pub(super) fn clc<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.clear_carry();
    Ok(())
}

pub(super) fn sec<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.set_carry();
    Ok(())
}

pub(super) fn cli<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.clear_interrupt_disable();
    Ok(())
}

pub(super) fn sei<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.set_interrupt_disable();
    Ok(())
}

pub(super) fn cld<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.clear_decimal();
    Ok(())
}

pub(super) fn sed<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.set_decimal();
    Ok(())
}

pub(super) fn clv<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.clear_overflow();
    Ok(())
}
