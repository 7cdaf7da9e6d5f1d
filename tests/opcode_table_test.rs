//! Tests for the opcode table shared by the CPU and the assembler.

use sim6502::opcodes::{decode, encode, supports};
use sim6502::{AddressingMode, Operation, OPCODE_TABLE};

#[test]
fn test_documented_opcode_count() {
    assert_eq!(OPCODE_TABLE.iter().flatten().count(), 151);
}

#[test]
fn test_every_operation_has_an_encoding() {
    for operation in Operation::ALL {
        assert!(
            OPCODE_TABLE
                .iter()
                .flatten()
                .any(|entry| entry.operation == operation),
            "{} has no opcode",
            operation
        );
    }
}

#[test]
fn test_encode_is_inverse_of_decode() {
    for (opcode, slot) in OPCODE_TABLE.iter().enumerate() {
        if let Some(entry) = slot {
            assert_eq!(encode(entry.operation, entry.mode), Some(opcode as u8));
        }
    }
}

#[test]
fn test_known_entries() {
    let brk = decode(0x00).unwrap();
    assert_eq!(brk.operation, Operation::Brk);
    assert_eq!(brk.cycles, 7);

    let sta = decode(0x91).unwrap();
    assert_eq!(sta.operation, Operation::Sta);
    assert_eq!(sta.mode, AddressingMode::IndirectY);
    assert_eq!(sta.cycles, 6);
    assert_eq!(sta.size(), 2);

    let jmp = decode(0x6C).unwrap();
    assert_eq!(jmp.mode, AddressingMode::Indirect);
    assert_eq!(jmp.size(), 3);
}

#[test]
fn test_undocumented_opcodes_absent() {
    for opcode in [0x02u8, 0x03, 0x1A, 0x80, 0xEB, 0xFF] {
        assert!(decode(opcode).is_none(), "0x{:02X} should be invalid", opcode);
    }
}

#[test]
fn test_mode_support() {
    assert!(supports(Operation::Ldx, AddressingMode::ZeroPageY));
    assert!(!supports(Operation::Lda, AddressingMode::ZeroPageY));
    assert!(supports(Operation::Lsr, AddressingMode::Accumulator));
    assert!(!supports(Operation::Jsr, AddressingMode::ZeroPage));
    assert!(!supports(Operation::Sta, AddressingMode::Immediate));
}

#[test]
fn test_mnemonics() {
    assert_eq!(Operation::from_mnemonic("lda"), Some(Operation::Lda));
    assert_eq!(Operation::from_mnemonic("TXS"), Some(Operation::Txs));
    assert_eq!(Operation::from_mnemonic("XYZ"), None);
    assert_eq!(Operation::Cpy.mnemonic(), "CPY");
    assert_eq!(
        Operation::ALL.iter().filter(|op| op.is_branch()).count(),
        8
    );
}
