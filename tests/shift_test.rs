//! Tests for ASL, LSR, ROL and ROR in accumulator and memory forms.

use sim6502::{FlatMemory, MemoryBus, CPU};

fn setup_cpu() -> CPU<FlatMemory> {
    let mut cpu = CPU::new(FlatMemory::new());
    cpu.set_pc(0x0600);
    cpu
}

// ========== ASL ==========

#[test]
fn test_asl_accumulator() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x0A]).unwrap();
    cpu.set_a(0x81);

    assert_eq!(cpu.execute().unwrap(), 2);
    assert_eq!(cpu.a(), 0x02);
    assert!(cpu.flag_c());
    assert!(!cpu.flag_n());
    assert!(!cpu.flag_z());
}

#[test]
fn test_asl_zero_page() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x06, 0x10]).unwrap();
    cpu.memory_mut().write(0x0010, 0x40);

    assert_eq!(cpu.execute().unwrap(), 5);
    assert_eq!(cpu.memory().read(0x0010), 0x80);
    assert!(cpu.flag_n());
    assert!(!cpu.flag_c());
}

// ========== LSR ==========

#[test]
fn test_lsr_accumulator_to_zero() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x4A]).unwrap();
    cpu.set_a(0x01);

    cpu.execute().unwrap();
    assert_eq!(cpu.a(), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
    assert!(!cpu.flag_n());
}

#[test]
fn test_lsr_absolute() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x4E, 0x00, 0x30]).unwrap();
    cpu.memory_mut().write(0x3000, 0xFE);

    assert_eq!(cpu.execute().unwrap(), 6);
    assert_eq!(cpu.memory().read(0x3000), 0x7F);
    assert!(!cpu.flag_c());
}

// ========== ROL / ROR ==========

#[test]
fn test_rol_carry_in_and_out() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x2A]).unwrap();
    cpu.set_a(0x80);
    cpu.set_carry();

    cpu.execute().unwrap();
    assert_eq!(cpu.a(), 0x01);
    assert!(cpu.flag_c());
}

#[test]
fn test_ror_carry_into_bit_seven() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x6A]).unwrap();
    cpu.set_a(0x02);
    cpu.set_carry();

    cpu.execute().unwrap();
    assert_eq!(cpu.a(), 0x81);
    assert!(!cpu.flag_c());
    assert!(cpu.flag_n());
}

#[test]
fn test_ror_zero_page_x() {
    let mut cpu = setup_cpu();
    cpu.load_program(0x0600, &[0x76, 0x10]).unwrap();
    cpu.memory_mut().write(0x0012, 0x01);
    cpu.set_x(0x02);
    cpu.clear_carry();

    assert_eq!(cpu.execute().unwrap(), 6);
    assert_eq!(cpu.memory().read(0x0012), 0x00);
    assert!(cpu.flag_c());
    assert!(cpu.flag_z());
}
