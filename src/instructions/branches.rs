//! # Branch Instructions
//!
//! This module implements conditional branch operations:
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS.
//!
//! All branch instructions use relative addressing.
//!
//! Cycle timing:
//! - 2 cycles if branch not taken
//! - 3 cycles if branch taken to same page
//! - 4 cycles if branch taken to different page

use crate::addressing::crosses_page;
use crate::{AddressingMode, ExecutionError, MemoryBus, Operation, CPU};

fn condition<M: MemoryBus>(cpu: &CPU<M>, operation: Operation) -> bool {
    match operation {
        Operation::Bcc => !cpu.flag_c,
        Operation::Bcs => cpu.flag_c,
        Operation::Beq => cpu.flag_z,
        Operation::Bne => !cpu.flag_z,
        Operation::Bmi => cpu.flag_n,
        Operation::Bpl => !cpu.flag_n,
        Operation::Bvs => cpu.flag_v,
        Operation::Bvc => !cpu.flag_v,
        _ => false,
    }
}

/// Executes a conditional branch.
///
/// PC already points past the offset byte when the condition is tested, so a
/// branch not taken needs no further work. No flags are affected.
pub(super) fn branch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
) -> Result<(), ExecutionError> {
    let operand = cpu.resolve(AddressingMode::Relative)?;
    let target = operand.address_for(AddressingMode::Relative)?;

    if condition(cpu, operation) {
        cpu.extra_cycles += 1;
        if crosses_page(cpu.pc, target) {
            cpu.extra_cycles += 1;
        }
        cpu.pc = target;
    }

    Ok(())
}
