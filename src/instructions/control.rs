//! # Control Flow Instructions
//!
//! This module implements control flow operations:
//! - JMP: Jump to address (absolute or indirect)
//! - JSR / RTS: Subroutine call and return
//! - BRK / RTI: Software interrupt and return
//!
//! JSR pushes the address of the instruction after its operand (not minus
//! one), and RTS resumes there directly.

use crate::cpu::IRQ_VECTOR;
use crate::{AddressingMode, ExecutionError, MemoryBus, CPU};

/// Executes the JMP (Jump) instruction.
///
/// Indirect mode reads its target from the pointer and pointer + 1; there is
/// no page-wrap quirk.
pub(super) fn jmp<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    cpu.pc = cpu.resolve(mode)?.address_for(mode)?;
    Ok(())
}

/// Executes the JSR (Jump to Subroutine) instruction.
///
/// Pushes PC high byte then low byte, with PC already past the operand.
pub(super) fn jsr<M: MemoryBus>(
    cpu: &mut CPU<M>,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    let target = cpu.resolve(mode)?.address_for(mode)?;

    let return_address = cpu.pc;
    cpu.push((return_address >> 8) as u8);
    cpu.push((return_address & 0xFF) as u8);

    cpu.pc = target;
    Ok(())
}

/// Executes the RTS (Return from Subroutine) instruction.
pub(super) fn rts<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let lo = cpu.pop() as u16;
    let hi = cpu.pop() as u16;
    cpu.pc = (hi << 8) | lo;
    Ok(())
}

/// Executes the BRK (Force Interrupt) instruction.
///
/// 1. Steps PC past the padding byte after BRK
/// 2. Pushes PC high byte, PC low byte, then P
/// 3. Sets the break flag
/// 4. Loads PC from the IRQ vector at $FFFE (low) and $FFFF (high)
pub(super) fn brk<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    cpu.pc = cpu.pc.wrapping_add(1);

    let return_address = cpu.pc;
    cpu.push((return_address >> 8) as u8);
    cpu.push((return_address & 0xFF) as u8);
    cpu.push(cpu.p);

    cpu.set_break();

    cpu.pc = cpu.memory.read_word(IRQ_VECTOR);
    Ok(())
}

/// Executes the RTI (Return from Interrupt) instruction.
///
/// Pops P first (re-deriving every flag), then PC low and high bytes.
pub(super) fn rti<M: MemoryBus>(cpu: &mut CPU<M>) -> Result<(), ExecutionError> {
    let status = cpu.pop();
    cpu.set_status(status);

    let lo = cpu.pop() as u16;
    let hi = cpu.pop() as u16;
    cpu.pc = (hi << 8) | lo;
    Ok(())
}
