//! # ALU (Arithmetic Logic Unit) Instructions
//!
//! This module implements arithmetic and logical operations:
//! - ADC: Add with Carry
//! - SBC: Subtract with Carry
//! - AND, ORA, EOR: Bitwise logic into the accumulator
//! - BIT: Bit test
//! - CMP, CPX, CPY: Register compares
//!
//! Decimal mode is not emulated; the D flag has no effect on ADC/SBC.

use crate::cpu::Arithmetic;
use crate::{AddressingMode, ExecutionError, MemoryBus, Operation, CPU};

/// Executes the ADC (Add with Carry) instruction.
///
/// Computes `A + M + C` untruncated, derives V and C from the full sum, then
/// stores the low byte in A and updates Z and N from it.
pub(super) fn adc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.resolve(mode)?.value as i32;
    let a = cpu.a as i32;

    let sum = a + value + cpu.flag_c as i32;

    cpu.check_overflow(a, value, sum, Arithmetic::Add);
    cpu.check_carry(sum);

    cpu.a = (sum & 0xFF) as u8;
    cpu.check_zero_negative(cpu.a);

    Ok(())
}

/// Executes the SBC (Subtract with Carry) instruction.
///
/// Computes `A - M - (1 - C)`. Carry goes through the same `> 0xFF` check as
/// ADC, and the difference never exceeds 0xFF, so SBC always leaves C clear.
pub(super) fn sbc<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.resolve(mode)?.value as i32;
    let a = cpu.a as i32;

    let borrow = 1 - cpu.flag_c as i32;
    let difference = a - value - borrow;

    cpu.check_overflow(a, value, difference, Arithmetic::Subtract);
    cpu.check_carry(difference);

    cpu.a = (difference & 0xFF) as u8;
    cpu.check_zero_negative(cpu.a);

    Ok(())
}

/// Executes the AND (Logical AND) instruction.
pub(super) fn and<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.resolve(mode)?.value;
    cpu.a &= value;
    cpu.check_zero_negative(cpu.a);
    Ok(())
}

/// Executes the ORA (Logical Inclusive OR) instruction.
pub(super) fn ora<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.resolve(mode)?.value;
    cpu.a |= value;
    cpu.check_zero_negative(cpu.a);
    Ok(())
}

/// Executes the EOR (Exclusive OR) instruction.
pub(super) fn eor<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.resolve(mode)?.value;
    cpu.a ^= value;
    cpu.check_zero_negative(cpu.a);
    Ok(())
}

/// Executes the BIT (Bit Test) instruction.
///
/// Z comes from `A & M`; N and V are copied from bits 7 and 6 of the operand
/// itself. A is not modified.
pub(super) fn bit<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let value = cpu.resolve(mode)?.value;

    cpu.check_zero((cpu.a & value) as i32);
    cpu.check_negative(value as i32);
    if value & 0x40 != 0 {
        cpu.set_overflow();
    } else {
        cpu.clear_overflow();
    }

    Ok(())
}

/// Executes CMP, CPX or CPY.
///
/// Computes `register - M` without truncation: C is set when the difference
/// is non-negative, Z and N are checked on the same raw difference.
pub(super) fn compare<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let register = match operation {
        Operation::Cpx => cpu.x,
        Operation::Cpy => cpu.y,
        _ => cpu.a,
    };
    let value = cpu.resolve(mode)?.value;

    let difference = register as i32 - value as i32;

    if difference >= 0 {
        cpu.set_carry();
    } else {
        cpu.clear_carry();
    }
    cpu.check_zero(difference);
    cpu.check_negative(difference);

    Ok(())
}
