//! Tests for stack operations, register transfers and flag instructions.

use sim6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_pc(0x0600);
    cpu
}

// ========== Stack Operations ==========

#[test]
fn test_pha_pla() {
    let mut cpu = setup_cpu();
    // PHA, LDA #$00, PLA
    cpu.load_program(0x0600, &[0x48, 0xA9, 0x00, 0x68]).unwrap();
    cpu.set_a(0x80);

    assert_eq!(cpu.execute().unwrap(), 3);
    assert_eq!(cpu.sp(), 0x01FE);
    assert_eq!(cpu.memory().read(0x01FF), 0x80);

    cpu.execute().unwrap();
    assert!(cpu.flag_z());

    assert_eq!(cpu.execute().unwrap(), 4);
    assert_eq!(cpu.a(), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
    assert_eq!(cpu.sp(), 0x01FF);
}

#[test]
fn test_php_plp() {
    let mut cpu = setup_cpu();
    // PHP, CLC, PLP
    cpu.load_program(0x0600, &[0x08, 0x18, 0x28]).unwrap();
    cpu.set_status(0x21);

    assert_eq!(cpu.execute().unwrap(), 3);
    assert_eq!(cpu.memory().read(0x01FF), 0x21);

    cpu.execute().unwrap();
    assert!(!cpu.flag_c());

    assert_eq!(cpu.execute().unwrap(), 4);
    assert!(cpu.flag_c());
    assert_eq!(cpu.status(), 0x21);
}

#[test]
fn test_push_wraps_at_page_bottom() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x48]).unwrap();
    cpu.set_sp(0x0100);
    cpu.set_a(0x42);

    cpu.execute().unwrap();
    assert_eq!(cpu.memory().read(0x0100), 0x42);
    assert_eq!(cpu.sp(), 0x01FF);
}

#[test]
fn test_pull_wraps_at_page_top() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x68]).unwrap();
    cpu.memory_mut().write(0x0100, 0x33);

    cpu.execute().unwrap();
    assert_eq!(cpu.a(), 0x33);
    assert_eq!(cpu.sp(), 0x0100);
}

// ========== Transfers ==========

#[test]
fn test_register_transfers() {
    let mut cpu = setup_cpu();
    // TAX, TAY, LDA #$00, TXA, TYA
    cpu.load_program(0x0600, &[0xAA, 0xA8, 0xA9, 0x00, 0x8A, 0x98]).unwrap();
    cpu.set_a(0x90);

    cpu.execute().unwrap();
    assert_eq!(cpu.x(), 0x90);
    assert!(cpu.flag_n());

    cpu.execute().unwrap();
    assert_eq!(cpu.y(), 0x90);

    cpu.execute().unwrap();
    assert_eq!(cpu.a(), 0x00);

    cpu.execute().unwrap();
    assert_eq!(cpu.a(), 0x90);

    cpu.set_y(0x00);
    cpu.execute().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_z());
}

#[test]
fn test_tsx_reads_stack_low_byte() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0xBA]).unwrap();

    cpu.execute().unwrap();
    assert_eq!(cpu.x(), 0xFF);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_txs_sets_stack_without_flags() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x9A]).unwrap();
    cpu.set_x(0x00);
    cpu.clear_zero();
    let status = cpu.status();

    cpu.execute().unwrap();
    assert_eq!(cpu.sp(), 0x0100);
    assert_eq!(cpu.status(), status);
}

// ========== Flag Instructions ==========

#[test]
fn test_flag_set_and_clear() {
    let mut cpu = setup_cpu();
    // SEC, SED, SEI, CLC, CLD, CLI
    cpu.load_program(0x0600, &[0x38, 0xF8, 0x78, 0x18, 0xD8, 0x58]).unwrap();
    cpu.set_status(0x20);

    for _ in 0..3 {
        assert_eq!(cpu.execute().unwrap(), 2);
    }
    assert!(cpu.flag_c());
    assert!(cpu.flag_d());
    assert!(cpu.flag_i());
    assert_eq!(cpu.status(), 0x2D);

    for _ in 0..3 {
        cpu.execute().unwrap();
    }
    assert_eq!(cpu.status(), 0x20);
}

#[test]
fn test_clv() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0xB8]).unwrap();
    cpu.set_overflow();

    cpu.execute().unwrap();
    assert!(!cpu.flag_v());
}

#[test]
fn test_nop_changes_only_pc() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0xEA]).unwrap();
    let status = cpu.status();

    assert_eq!(cpu.execute().unwrap(), 2);
    assert_eq!(cpu.pc(), 0x0601);
    assert_eq!(cpu.status(), status);
    assert_eq!(cpu.a(), 0);
    assert_eq!(cpu.sp(), 0x01FF);
}
