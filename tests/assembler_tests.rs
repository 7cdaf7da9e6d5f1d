//! Integration tests for the assembler: syntax, modes and errors.

use sim6502::{assemble, Assembler, AssemblerError, AssemblerOptions};

fn bytes_of(source: &str) -> Vec<u8> {
    assemble(source).unwrap().bytes
}

// ========== Addressing Mode Selection ==========

#[test]
fn test_adc_immediate() {
    assert_eq!(bytes_of("ADC #$42"), vec![0x69, 0x42]);
}

#[test]
fn test_adc_absolute() {
    assert_eq!(bytes_of("ADC $1020"), vec![0x6D, 0x20, 0x10]);
}

#[test]
fn test_all_lda_forms() {
    let source = "\
LDA #$01
LDA $02
LDA $03,X
LDA $0405
LDA $0607,X
LDA $0809,Y
LDA ($0A,X)
LDA ($0B),Y";
    assert_eq!(
        bytes_of(source),
        vec![
            0xA9, 0x01, 0xA5, 0x02, 0xB5, 0x03, 0xAD, 0x05, 0x04, 0xBD, 0x07, 0x06, 0xB9, 0x09,
            0x08, 0xA1, 0x0A, 0xB1, 0x0B,
        ]
    );
}

#[test]
fn test_implicit_and_accumulator() {
    assert_eq!(bytes_of("INX\nASL\nROR A\nRTS"), vec![0xE8, 0x0A, 0x6A, 0x60]);
}

#[test]
fn test_indirect_jump() {
    assert_eq!(bytes_of("JMP ($FFFC)"), vec![0x6C, 0xFC, 0xFF]);
}

#[test]
fn test_leading_zeros_force_absolute() {
    assert_eq!(bytes_of("STA $0010"), vec![0x8D, 0x10, 0x00]);
}

#[test]
fn test_number_formats() {
    assert_eq!(bytes_of("LDA #10"), vec![0xA9, 0x0A]);
    assert_eq!(bytes_of("LDA #%00001010"), vec![0xA9, 0x0A]);
    assert_eq!(bytes_of("LDA 512"), vec![0xAD, 0x00, 0x02]);
}

#[test]
fn test_case_and_comments() {
    assert_eq!(
        bytes_of("  lda #$ff ; load\n; full-line comment\n\n  sta $00"),
        vec![0xA9, 0xFF, 0x85, 0x00]
    );
}

#[test]
fn test_literal_branch_displacement() {
    assert_eq!(bytes_of("BNE $05"), vec![0xD0, 0x05]);
}

#[test]
fn test_origin_option() {
    let assembler = Assembler::new(AssemblerOptions::default().with_origin(0x8000));
    let output = assembler.assemble("JMP end\nend:").unwrap();

    assert_eq!(output.origin, 0x8000);
    assert_eq!(output.bytes, vec![0x4C, 0x03, 0x80]);
}

// ========== Errors ==========

#[test]
fn test_missing_operand() {
    assert_eq!(
        assemble("ADC"),
        Err(AssemblerError::InvalidAddressingSyntax {
            line: 1,
            operand: String::new()
        })
    );
}

#[test]
fn test_unknown_operator() {
    assert_eq!(
        assemble("LDA #$01\nMOV A,X"),
        Err(AssemblerError::UnknownOperator {
            line: 2,
            operator: "MOV".to_string()
        })
    );
}

#[test]
fn test_define_missing_value() {
    assert_eq!(
        assemble("define screen"),
        Err(AssemblerError::MissingDefineParameter { line: 1 })
    );
    assert_eq!(
        assemble("DEFINE"),
        Err(AssemblerError::MissingDefineParameter { line: 1 })
    );
}

#[test]
fn test_unsupported_mode() {
    let error = assemble("STX $10,X").unwrap_err();
    assert!(matches!(error, AssemblerError::InvalidAddressingSyntax { line: 1, .. }));

    let error = assemble("JSR #$10").unwrap_err();
    assert!(matches!(error, AssemblerError::InvalidAddressingSyntax { .. }));
}

#[test]
fn test_malformed_operands() {
    for source in ["LDA #$", "LDA ($10", "LDA #$123", "LDA $12345", "LDA @12"] {
        let error = assemble(source).unwrap_err();
        assert!(
            matches!(error, AssemblerError::InvalidAddressingSyntax { .. }),
            "{} gave {:?}",
            source,
            error
        );
    }
}

#[test]
fn test_error_messages() {
    let error = assemble("\n\nFOO").unwrap_err();
    assert_eq!(error.line(), 3);
    assert_eq!(error.to_string(), "line 3: unknown operator 'FOO'");
}

#[test]
fn test_program_past_top_of_memory() {
    let assembler = Assembler::new(AssemblerOptions::default().with_origin(0xFFFE));

    // Two bytes fill memory exactly
    assert_eq!(assembler.assemble("NOP\nNOP").unwrap().bytes, vec![0xEA, 0xEA]);

    assert_eq!(
        assembler.assemble("NOP\nLDA $1234"),
        Err(AssemblerError::ProgramOverflow { line: 2 })
    );
    // A label at 0x10000 has no 16-bit address
    assert_eq!(
        assembler.assemble("NOP\nNOP\nend:"),
        Err(AssemblerError::ProgramOverflow { line: 3 })
    );
}
