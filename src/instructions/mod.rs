//! # 6502 Instruction Implementations
//!
//! This module contains the implementations of all 56 operations, organized by
//! category, and the single exhaustive dispatch over [`Operation`].
//!
//! Every operation receives the CPU with PC already past the opcode byte and
//! the addressing mode from the opcode table. Operations that read an operand
//! go through [`CPU::resolve`](crate::CPU), which advances PC past the operand.
//!
//! ## Categories
//!
//! - **alu**: Arithmetic and logic operations (ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT)
//! - **branches**: Conditional branch instructions (BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS)
//! - **shifts**: Shift and rotate operations (ASL, LSR, ROL, ROR)
//! - **load_store**: Load and store instructions (LDA, LDX, LDY, STA, STX, STY)
//! - **inc_dec**: Increment and decrement operations (INC, DEC, INX, INY, DEX, DEY)
//! - **control**: Control flow instructions (JMP, JSR, RTS, RTI, BRK, NOP)
//! - **stack**: Stack operations (PHA, PHP, PLA, PLP)
//! - **flags**: Status flag manipulation (CLC, SEC, CLI, SEI, CLD, SED, CLV)
//! - **transfer**: Register transfer operations (TAX, TAY, TXA, TYA, TSX, TXS)

mod alu;
mod branches;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod shifts;
mod stack;
mod transfer;

use crate::{AddressingMode, ExecutionError, MemoryBus, Operation, CPU};

/// Runs `operation` in `mode` against the CPU.
pub(crate) fn dispatch<M: MemoryBus>(
    cpu: &mut CPU<M>,
    operation: Operation,
    mode: AddressingMode,
) -> Result<(), ExecutionError> {
    use Operation::*;

    match operation {
        Adc => alu::adc(cpu, mode),
        Sbc => alu::sbc(cpu, mode),
        And => alu::and(cpu, mode),
        Ora => alu::ora(cpu, mode),
        Eor => alu::eor(cpu, mode),
        Bit => alu::bit(cpu, mode),
        Cmp | Cpx | Cpy => alu::compare(cpu, operation, mode),

        Asl => shifts::asl(cpu, mode),
        Lsr => shifts::lsr(cpu, mode),
        Rol => shifts::rol(cpu, mode),
        Ror => shifts::ror(cpu, mode),

        Bcc | Bcs | Beq | Bne | Bmi | Bpl | Bvs | Bvc => branches::branch(cpu, operation),

        Lda => load_store::lda(cpu, mode),
        Ldx => load_store::ldx(cpu, mode),
        Ldy => load_store::ldy(cpu, mode),
        Sta | Stx | Sty => load_store::store(cpu, operation, mode),

        Inc => inc_dec::inc(cpu, mode),
        Dec => inc_dec::dec(cpu, mode),
        Inx => inc_dec::inx(cpu),
        Iny => inc_dec::iny(cpu),
        Dex => inc_dec::dex(cpu),
        Dey => inc_dec::dey(cpu),

        Jmp => control::jmp(cpu, mode),
        Jsr => control::jsr(cpu, mode),
        Rts => control::rts(cpu),
        Rti => control::rti(cpu),
        Brk => control::brk(cpu),
        Nop => Ok(()),

        Pha => stack::pha(cpu),
        Php => stack::php(cpu),
        Pla => stack::pla(cpu),
        Plp => stack::plp(cpu),

        Clc => flags::clc(cpu),
        Sec => flags::sec(cpu),
        Cli => flags::cli(cpu),
        Sei => flags::sei(cpu),
        Cld => flags::cld(cpu),
        Sed => flags::sed(cpu),
        Clv => flags::clv(cpu),

        Tax => transfer::tax(cpu),
        Tay => transfer::tay(cpu),
        Txa => transfer::txa(cpu),
        Tya => transfer::tya(cpu),
        Tsx => transfer::tsx(cpu),
        Txs => transfer::txs(cpu),
    }
}
