//! Tests for the conditional branch instructions.
//!
//! Tests cover:
//! - Every condition taken and not taken
//! - Cycle counts: 2 not taken, 3 taken, 4 taken across a page
//! - Offset bytes at or above 0x80 counting back from 0x80

use sim6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_pc(0x0600);
    cpu
}

/// Runs one branch at 0x0600 with offset 0x10 and returns (cycles, pc).
fn run_branch(opcode: u8, configure: impl FnOnce(&mut CPU<FlatMemory>)) -> (u32, u16) {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[opcode, 0x10]).unwrap();
    configure(&mut cpu);
    let cycles = cpu.execute().unwrap();
    (cycles, cpu.pc())
}

const TAKEN: (u32, u16) = (3, 0x0612);
const NOT_TAKEN: (u32, u16) = (2, 0x0602);

// ========== Conditions ==========

#[test]
fn test_bcc_bcs() {
    assert_eq!(run_branch(0x90, |cpu| cpu.clear_carry()), TAKEN);
    assert_eq!(run_branch(0x90, |cpu| cpu.set_carry()), NOT_TAKEN);
    assert_eq!(run_branch(0xB0, |cpu| cpu.set_carry()), TAKEN);
    assert_eq!(run_branch(0xB0, |cpu| cpu.clear_carry()), NOT_TAKEN);
}

#[test]
fn test_beq_bne() {
    assert_eq!(run_branch(0xF0, |cpu| cpu.set_zero()), TAKEN);
    assert_eq!(run_branch(0xF0, |cpu| cpu.clear_zero()), NOT_TAKEN);
    assert_eq!(run_branch(0xD0, |cpu| cpu.clear_zero()), TAKEN);
    assert_eq!(run_branch(0xD0, |cpu| cpu.set_zero()), NOT_TAKEN);
}

#[test]
fn test_bmi_bpl() {
    assert_eq!(run_branch(0x30, |cpu| cpu.set_negative()), TAKEN);
    assert_eq!(run_branch(0x30, |cpu| cpu.clear_negative()), NOT_TAKEN);
    assert_eq!(run_branch(0x10, |cpu| cpu.clear_negative()), TAKEN);
    assert_eq!(run_branch(0x10, |cpu| cpu.set_negative()), NOT_TAKEN);
}

#[test]
fn test_bvs_bvc() {
    assert_eq!(run_branch(0x70, |cpu| cpu.set_overflow()), TAKEN);
    assert_eq!(run_branch(0x70, |cpu| cpu.clear_overflow()), NOT_TAKEN);
    assert_eq!(run_branch(0x50, |cpu| cpu.clear_overflow()), TAKEN);
    assert_eq!(run_branch(0x50, |cpu| cpu.set_overflow()), NOT_TAKEN);
}

// ========== Timing and Offsets ==========

#[test]
fn test_branch_across_page() {
    let mut cpu = setup_cpu();
    cpu.set_pc(0x06FD);
    cpu.memory_mut().write(0x06FD, 0xD0); // BNE +5
    cpu.memory_mut().write(0x06FE, 0x05);
    cpu.clear_zero();

    assert_eq!(cpu.execute().unwrap(), 4);
    assert_eq!(cpu.pc(), 0x0704);
}

#[test]
fn test_branch_backward_offset() {
    let mut cpu = setup_cpu();
    // 0x83 counts back three from the end of the branch
    cpu.load_program(0x0600, &[0xEA, 0xEA, 0xD0, 0x83]).unwrap();
    cpu.set_pc(0x0602);
    cpu.clear_zero();

    assert_eq!(cpu.execute().unwrap(), 3);
    assert_eq!(cpu.pc(), 0x0601);
}

#[test]
fn test_branch_leaves_flags_alone() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0xF0, 0x02]).unwrap();
    cpu.set_zero();
    let status = cpu.status();

    cpu.execute().unwrap();
    assert_eq!(cpu.status(), status);
}
