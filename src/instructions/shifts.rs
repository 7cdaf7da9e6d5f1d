//! # Shift and Rotate Instructions
//!
//! This module implements bit shift and rotate operations:
//! - ASL: Arithmetic Shift Left
//! - LSR: Logical Shift Right
//! - ROL: Rotate Left
//! - ROR: Rotate Right
//!
//! In accumulator mode the operation works on A; otherwise the memory cell is
//! read, shifted, and written back. C always receives the bit shifted out.

use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Shared read-modify-write body.
///
/// `shift` maps the operand and incoming carry to the untruncated result and
/// the outgoing carry. Z and N are checked on the masked result.
fn read_modify_write<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
    shift: impl FnOnce(u8, bool) -> (u16, bool),
) -> Result<(), ExecutionError> {
    let operand = cpu.resolve(mode)?;
    let (raw, carry_out) = shift(operand.value, cpu.flag_c);

    if carry_out {
        cpu.set_carry();
    } else {
        cpu.clear_carry();
    }

    let result = (raw & 0xFF) as u8;
    if mode == AddressingMode::Accumulator {
        cpu.a = result;
    } else {
        let address = operand.address_for(mode)?;
        cpu.memory.write(address, result);
    }

    cpu.check_zero_negative(result);
    Ok(())
}

/// Executes the ASL (Arithmetic Shift Left) instruction.
pub(super) fn asl<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    read_modify_write(cpu, mode, |value, _| {
        let shifted = (value as u16) << 1;
        (shifted, shifted > 0xFF)
    })
}

/// Executes the LSR (Logical Shift Right) instruction.
pub(super) fn lsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    read_modify_write(cpu, mode, |value, _| ((value >> 1) as u16, value & 0x01 != 0))
}

/// Executes the ROL (Rotate Left) instruction.
///
/// The old carry enters bit 0.
pub(super) fn rol<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    read_modify_write(cpu, mode, |value, carry| {
        let rotated = ((value as u16) << 1) | carry as u16;
        (rotated, rotated > 0xFF)
    })
}

/// Executes the ROR (Rotate Right) instruction.
///
/// The old carry enters bit 7.
pub(super) fn ror<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    read_modify_write(cpu, mode, |value, carry| {
        let rotated = ((value >> 1) as u16) | ((carry as u16) << 7);
        (rotated, value & 0x01 != 0)
    })
}
