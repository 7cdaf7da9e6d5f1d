//! Fuzz target for single-instruction execution.
//!
//! Builds an arbitrary register file and memory neighbourhood, executes one
//! instruction, and checks the invariants every instruction must keep.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sim6502::{ExecutionError, FlatMemory, MemoryBus, CPU, OPCODE_TABLE};

/// Arbitrary CPU initial state for fuzzing
#[derive(Debug, Arbitrary)]
struct FuzzCpuState {
    a: u8,
    x: u8,
    y: u8,
    /// Low byte of the stack pointer
    sp: u8,
    status: u8,
    pc: u16,
}

/// Memory regions an instruction is likely to touch
#[derive(Debug, Arbitrary)]
struct FuzzMemory {
    /// Bytes at the PC location (instruction + operands)
    instruction_bytes: [u8; 3],
    zero_page: [u8; 256],
    stack_page: [u8; 256],
    irq_vector: u16,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    cpu_state: FuzzCpuState,
    memory: FuzzMemory,
}

fuzz_target!(|input: FuzzInput| {
    let mut cpu = CPU::new(FlatMemory::new());

    for (i, &byte) in input.memory.zero_page.iter().enumerate() {
        cpu.memory_mut().write(i as u16, byte);
    }
    for (i, &byte) in input.memory.stack_page.iter().enumerate() {
        cpu.memory_mut().write(0x0100 + i as u16, byte);
    }
    let [lo, hi] = input.memory.irq_vector.to_le_bytes();
    cpu.memory_mut().write(0xFFFE, lo);
    cpu.memory_mut().write(0xFFFF, hi);

    let pc = input.cpu_state.pc;
    for (i, &byte) in input.memory.instruction_bytes.iter().enumerate() {
        cpu.memory_mut().write(pc.wrapping_add(i as u16), byte);
    }

    cpu.set_a(input.cpu_state.a);
    cpu.set_x(input.cpu_state.x);
    cpu.set_y(input.cpu_state.y);
    cpu.set_sp(input.cpu_state.sp as u16);
    cpu.set_status(input.cpu_state.status);
    cpu.set_pc(pc);

    let opcode = input.memory.instruction_bytes[0];
    match cpu.execute() {
        Ok(cycles) => {
            let entry = OPCODE_TABLE[opcode as usize].expect("executed opcode must be documented");
            assert!(cycles >= entry.cycles as u32);
            assert!(cycles <= entry.cycles as u32 + 2);
            assert_eq!(cpu.cycles(), cycles as u64);
        }
        Err(ExecutionError::InvalidOpcode(byte)) => {
            assert_eq!(byte, opcode);
            assert!(OPCODE_TABLE[opcode as usize].is_none());
            assert_eq!(cpu.cycles(), 0);
        }
        Err(other) => panic!("unexpected execution error: {other}"),
    }

    // These hold after every instruction
    assert!((0x0100..=0x01FF).contains(&cpu.sp()));
    assert_eq!(cpu.status() & 0x20, 0x20);
});
