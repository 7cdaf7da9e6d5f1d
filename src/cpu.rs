//! # CPU State and Execution
//!
//! This module contains the CPU struct representing the 6502 processor state and
//! the fetch-decode-execute loop.
//!
//! ## CPU State
//!
//! The CPU maintains:
//! - **Registers**: Accumulator (A), index registers (X, Y)
//! - **Program counter** (PC): 16-bit address of next instruction
//! - **Stack pointer** (SP): full address inside the stack page (0x0100-0x01FF)
//! - **Status flags**: N, V, B, D, I, Z, C as individual bools, mirrored in the
//!   packed status byte P
//! - **Cycle counter**: u64 monotonically increasing cycle count
//!
//! ## Status Register Invariant
//!
//! P is always exactly the packing of the flag booleans. Every flag primitive
//! re-packs P; every write to P re-derives every flag.
//!
//! ## Execution Model
//!
//! - `execute()`: Execute one instruction and return the cycles it took
//! - `run_for_cycles()`: Execute until cycle budget exhausted

use crate::instructions;
use crate::opcodes::decode;
use crate::{ExecutionError, MemoryBus};

/// Program counter after reset.
pub const RESET_PC: u16 = 0x07FF;

/// Highest stack address; SP after reset.
pub const STACK_TOP: u16 = 0x01FF;

/// Lowest stack address.
pub const STACK_BOTTOM: u16 = 0x0100;

/// Location of the little-endian IRQ/BRK vector.
pub const IRQ_VECTOR: u16 = 0xFFFE;

/// Status byte bit positions (NV-BDIZC).
pub mod status_bits {
    pub const CARRY: u8 = 0b0000_0001;
    pub const ZERO: u8 = 0b0000_0010;
    pub const INTERRUPT_DISABLE: u8 = 0b0000_0100;
    pub const DECIMAL: u8 = 0b0000_1000;
    pub const BREAK: u8 = 0b0001_0000;
    pub const UNUSED: u8 = 0b0010_0000;
    pub const OVERFLOW: u8 = 0b0100_0000;
    pub const NEGATIVE: u8 = 0b1000_0000;
}

use status_bits::*;

/// Which overflow rule to apply in [`CPU::check_overflow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arithmetic {
    Add,
    Subtract,
}

/// 6502 CPU state and execution context.
///
/// Generic over the memory implementation via the `MemoryBus` trait.
///
/// # Examples
///
/// ```
/// use sim6502::{CPU, FlatMemory};
///
/// let cpu = CPU::new(FlatMemory::new());
///
/// assert_eq!(cpu.pc(), 0x07FF);
/// assert_eq!(cpu.sp(), 0x01FF);
/// assert_eq!(cpu.status(), 0x36);
/// assert_eq!(cpu.cycles(), 0);
/// ```
pub struct CPU<M: MemoryBus> {
    /// Accumulator register
    pub(crate) a: u8,

    /// X index register
    pub(crate) x: u8,

    /// Y index register
    pub(crate) y: u8,

    /// Program counter (address of next instruction)
    pub(crate) pc: u16,

    /// Stack pointer, always within 0x0100-0x01FF
    pub(crate) sp: u16,

    /// Packed status register
    pub(crate) p: u8,

    /// Negative flag (set if bit 7 of result is 1)
    pub(crate) flag_n: bool,

    /// Overflow flag (set on signed overflow)
    pub(crate) flag_v: bool,

    /// Break flag
    pub(crate) flag_b: bool,

    /// Decimal mode flag (inert: decimal arithmetic is not emulated)
    pub(crate) flag_d: bool,

    /// Interrupt disable flag
    pub(crate) flag_i: bool,

    /// Zero flag (set if result is zero)
    pub(crate) flag_z: bool,

    /// Carry flag
    pub(crate) flag_c: bool,

    /// Page-crossing cycles accumulated by the current instruction
    pub(crate) memory_cycles: u32,

    /// Branch penalties accumulated by the current instruction
    pub(crate) extra_cycles: u32,

    /// Total CPU cycles executed
    pub(crate) cycles: u64,

    /// Memory bus implementation
    pub(crate) memory: M,
}

impl<M: MemoryBus> CPU<M> {
    /// Creates a new CPU attached to `memory` and performs a power-up [`reset`](Self::reset).
    pub fn new(memory: M) -> Self {
        let mut cpu = Self {
            a: 0,
            x: 0,
            y: 0,
            pc: RESET_PC,
            sp: STACK_TOP,
            p: 0,
            flag_n: false,
            flag_v: false,
            flag_b: false,
            flag_d: false,
            flag_i: false,
            flag_z: false,
            flag_c: false,
            memory_cycles: 0,
            extra_cycles: 0,
            cycles: 0,
            memory,
        };
        cpu.reset();
        cpu
    }

    /// Puts the processor and memory into the power-up state.
    ///
    /// - A = X = Y = 0, SP = 0x01FF, PC = 0x07FF
    /// - Z, I and B set; C, D, V, N clear (P = 0x36)
    /// - 0x0000-0x1FFF filled with 0xFF, except offsets 0x008/0x009/0x00A/0x00F
    ///   of each 2KB mirror, which hold 0xF7/0xEF/0xDF/0xBF
    /// - 0x2000-0xFFFF zeroed
    pub fn reset(&mut self) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.sp = STACK_TOP;
        self.pc = RESET_PC;

        self.flag_c = false;
        self.flag_z = true;
        self.flag_i = true;
        self.flag_d = false;
        self.flag_b = true;
        self.flag_v = false;
        self.flag_n = false;
        self.set_p_from_flags();

        self.memory_cycles = 0;
        self.extra_cycles = 0;
        self.cycles = 0;

        for addr in 0x0000..0x2000u16 {
            self.memory.write(addr, 0xFF);
        }
        for mirror in 0..4u16 {
            let base = mirror * 0x0800;
            self.memory.write(base + 0x008, 0xF7);
            self.memory.write(base + 0x009, 0xEF);
            self.memory.write(base + 0x00A, 0xDF);
            self.memory.write(base + 0x00F, 0xBF);
        }
        for addr in 0x2000..=0xFFFFu16 {
            self.memory.write(addr, 0x00);
        }
    }

    /// Executes one instruction and returns the cycles it consumed.
    ///
    /// The total is `base cycles + page-crossing cycles + branch penalties`.
    /// An invalid opcode leaves every register untouched except PC, which has
    /// already moved past the opcode byte.
    ///
    /// # Examples
    ///
    /// ```
    /// use sim6502::{CPU, ExecutionError, FlatMemory, MemoryBus};
    ///
    /// let mut cpu = CPU::new(FlatMemory::new());
    /// cpu.set_pc(0x0600);
    /// cpu.memory_mut().write(0x0600, 0xEA); // NOP
    /// cpu.memory_mut().write(0x0601, 0xFF); // not an opcode
    ///
    /// assert_eq!(cpu.execute(), Ok(2));
    /// assert_eq!(cpu.execute(), Err(ExecutionError::InvalidOpcode(0xFF)));
    /// assert_eq!(cpu.pc(), 0x0602);
    /// ```
    pub fn execute(&mut self) -> Result<u32, ExecutionError> {
        self.memory_cycles = 0;
        self.extra_cycles = 0;

        let address = self.pc;
        let opcode = self.fetch_byte();

        let Some(entry) = decode(opcode) else {
            log::warn!("invalid opcode 0x{:02X} at 0x{:04X}", opcode, address);
            return Err(ExecutionError::InvalidOpcode(opcode));
        };

        instructions::dispatch(self, entry.operation, entry.mode)?;

        let elapsed = entry.cycles as u32 + self.memory_cycles + self.extra_cycles;
        self.cycles += elapsed as u64;

        log::trace!(
            "{:04X}  {} {:?} ({} cycles)",
            address,
            entry.operation,
            entry.mode,
            elapsed
        );

        Ok(elapsed)
    }

    /// Runs the CPU until at least `cycle_budget` cycles have elapsed.
    ///
    /// Returns the cycles actually consumed, which may overshoot the budget by
    /// part of one instruction. Stops at the first error.
    pub fn run_for_cycles(&mut self, cycle_budget: u64) -> Result<u64, ExecutionError> {
        let start_cycles = self.cycles;
        let target_cycles = start_cycles + cycle_budget;

        while self.cycles < target_cycles {
            self.execute()?;
        }

        Ok(self.cycles - start_cycles)
    }

    /// Copies an assembled image into memory at `origin`.
    ///
    /// Fails without writing if the image would extend past 0xFFFF.
    pub fn load_program(&mut self, origin: u16, bytes: &[u8]) -> Result<(), ExecutionError> {
        let end = origin as usize + bytes.len();
        if end > crate::memory::MEMORY_SIZE {
            return Err(crate::MemoryError::InvalidAddress(crate::memory::MEMORY_SIZE).into());
        }
        for (offset, &byte) in bytes.iter().enumerate() {
            self.memory.write(origin + offset as u16, byte);
        }
        Ok(())
    }

    // ========== Status Register Packing ==========

    /// Re-packs P from the individual flags.
    pub fn set_p_from_flags(&mut self) {
        let mut p = UNUSED;
        for (flag, bit) in [
            (self.flag_c, CARRY),
            (self.flag_z, ZERO),
            (self.flag_i, INTERRUPT_DISABLE),
            (self.flag_d, DECIMAL),
            (self.flag_b, BREAK),
            (self.flag_v, OVERFLOW),
            (self.flag_n, NEGATIVE),
        ] {
            if flag {
                p |= bit;
            }
        }
        self.p = p;
    }

    /// Re-derives every flag from P, then re-packs so the unused bit reads as 1.
    pub fn set_flags_from_p(&mut self) {
        let p = self.p;
        self.flag_c = p & CARRY != 0;
        self.flag_z = p & ZERO != 0;
        self.flag_i = p & INTERRUPT_DISABLE != 0;
        self.flag_d = p & DECIMAL != 0;
        self.flag_b = p & BREAK != 0;
        self.flag_v = p & OVERFLOW != 0;
        self.flag_n = p & NEGATIVE != 0;
        self.set_p_from_flags();
    }

    // ========== Flag Primitives ==========

    pub fn set_carry(&mut self) {
        self.flag_c = true;
        self.set_p_from_flags();
    }

    pub fn clear_carry(&mut self) {
        self.flag_c = false;
        self.set_p_from_flags();
    }

    pub fn set_zero(&mut self) {
        self.flag_z = true;
        self.set_p_from_flags();
    }

    pub fn clear_zero(&mut self) {
        self.flag_z = false;
        self.set_p_from_flags();
    }

    pub fn set_interrupt_disable(&mut self) {
        self.flag_i = true;
        self.set_p_from_flags();
    }

    pub fn clear_interrupt_disable(&mut self) {
        self.flag_i = false;
        self.set_p_from_flags();
    }

    pub fn set_decimal(&mut self) {
        self.flag_d = true;
        self.set_p_from_flags();
    }

    pub fn clear_decimal(&mut self) {
        self.flag_d = false;
        self.set_p_from_flags();
    }

    pub fn set_break(&mut self) {
        self.flag_b = true;
        self.set_p_from_flags();
    }

    pub fn clear_break(&mut self) {
        self.flag_b = false;
        self.set_p_from_flags();
    }

    pub fn set_overflow(&mut self) {
        self.flag_v = true;
        self.set_p_from_flags();
    }

    pub fn clear_overflow(&mut self) {
        self.flag_v = false;
        self.set_p_from_flags();
    }

    pub fn set_negative(&mut self) {
        self.flag_n = true;
        self.set_p_from_flags();
    }

    pub fn clear_negative(&mut self) {
        self.flag_n = false;
        self.set_p_from_flags();
    }

    // ========== Flag Checks ==========
    //
    // Results are passed untruncated; subtraction results may be negative.

    /// Carry from an untruncated result: set when it exceeds 0xFF.
    pub(crate) fn check_carry(&mut self, value: i32) {
        if value > 0xFF {
            self.set_carry();
        } else {
            self.clear_carry();
        }
    }

    pub(crate) fn check_zero(&mut self, value: i32) {
        if value == 0 {
            self.set_zero();
        } else {
            self.clear_zero();
        }
    }

    /// Negative from bit 7 of the raw result.
    pub(crate) fn check_negative(&mut self, value: i32) {
        if value & 0x80 != 0 {
            self.set_negative();
        } else {
            self.clear_negative();
        }
    }

    /// Signed overflow for `left op right = result`.
    ///
    /// Addition overflows when both operands share a sign the result lacks.
    /// Subtraction overflows when the operands differ in sign and the result's
    /// sign differs from the minuend's.
    pub(crate) fn check_overflow(&mut self, left: i32, right: i32, result: i32, op: Arithmetic) {
        let operands_differ = (left ^ right) & 0x80 != 0;
        let result_flipped = (left ^ result) & 0x80 != 0;
        let overflow = match op {
            Arithmetic::Add => !operands_differ && result_flipped,
            Arithmetic::Subtract => operands_differ && result_flipped,
        };
        if overflow {
            self.set_overflow();
        } else {
            self.clear_overflow();
        }
    }

    /// Zero and negative checks on an 8-bit register value.
    pub(crate) fn check_zero_negative(&mut self, value: u8) {
        self.check_zero(value as i32);
        self.check_negative(value as i32);
    }

    // ========== Stack ==========
    //
    // SP never leaves 0x0100-0x01FF: it wraps inside the page instead.

    /// Stores `value` at SP, then moves SP down one slot.
    pub fn push(&mut self, value: u8) {
        self.memory.write(self.sp, value);
        self.sp = if self.sp == STACK_BOTTOM {
            STACK_TOP
        } else {
            self.sp - 1
        };
    }

    /// Moves SP up one slot, then loads from it.
    pub fn pop(&mut self) -> u8 {
        self.sp = Self::slot_above(self.sp);
        self.memory.read(self.sp)
    }

    /// Reads the slot `pop` would return, without moving SP.
    pub fn peek(&self) -> u8 {
        self.memory.read(Self::slot_above(self.sp))
    }

    fn slot_above(sp: u16) -> u16 {
        if sp >= STACK_TOP {
            STACK_BOTTOM
        } else {
            sp + 1
        }
    }

    // ========== Register Getters ==========

    /// Returns the accumulator register value.
    pub fn a(&self) -> u8 {
        self.a
    }

    /// Returns the X index register value.
    pub fn x(&self) -> u8 {
        self.x
    }

    /// Returns the Y index register value.
    pub fn y(&self) -> u8 {
        self.y
    }

    /// Returns the program counter value.
    pub fn pc(&self) -> u16 {
        self.pc
    }

    /// Returns the stack pointer as a full address in 0x0100-0x01FF.
    pub fn sp(&self) -> u16 {
        self.sp
    }

    /// Returns the packed status register.
    ///
    /// Bit layout (NV-BDIZC):
    /// - Bit 7: N (Negative)
    /// - Bit 6: V (Overflow)
    /// - Bit 5: (unused, always 1)
    /// - Bit 4: B (Break)
    /// - Bit 3: D (Decimal)
    /// - Bit 2: I (Interrupt Disable)
    /// - Bit 1: Z (Zero)
    /// - Bit 0: C (Carry)
    pub fn status(&self) -> u8 {
        self.p
    }

    /// Returns the total number of CPU cycles executed since reset.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn memory(&self) -> &M {
        &self.memory
    }

    pub fn memory_mut(&mut self) -> &mut M {
        &mut self.memory
    }

    // ========== Register Setters ==========

    pub fn set_a(&mut self, value: u8) {
        self.a = value;
    }

    pub fn set_x(&mut self, value: u8) {
        self.x = value;
    }

    pub fn set_y(&mut self, value: u8) {
        self.y = value;
    }

    pub fn set_pc(&mut self, value: u16) {
        self.pc = value;
    }

    /// Sets SP; only the low byte is used, the page is always 0x01.
    pub fn set_sp(&mut self, value: u16) {
        self.sp = STACK_BOTTOM | (value & 0x00FF);
    }

    /// Writes P and re-derives every flag.
    pub fn set_status(&mut self, value: u8) {
        self.p = value;
        self.set_flags_from_p();
    }

    // ========== Status Flag Getters ==========

    /// Returns true if the Negative flag is set.
    pub fn flag_n(&self) -> bool {
        self.flag_n
    }

    /// Returns true if the Overflow flag is set.
    pub fn flag_v(&self) -> bool {
        self.flag_v
    }

    /// Returns true if the Break flag is set.
    pub fn flag_b(&self) -> bool {
        self.flag_b
    }

    /// Returns true if the Decimal mode flag is set.
    pub fn flag_d(&self) -> bool {
        self.flag_d
    }

    /// Returns true if the Interrupt Disable flag is set.
    pub fn flag_i(&self) -> bool {
        self.flag_i
    }

    /// Returns true if the Zero flag is set.
    pub fn flag_z(&self) -> bool {
        self.flag_z
    }

    /// Returns true if the Carry flag is set.
    pub fn flag_c(&self) -> bool {
        self.flag_c
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlatMemory;

    #[test]
    fn test_cpu_reset_state() {
        let cpu = CPU::new(FlatMemory::new());

        assert_eq!(cpu.a(), 0x00);
        assert_eq!(cpu.x(), 0x00);
        assert_eq!(cpu.y(), 0x00);
        assert_eq!(cpu.sp(), 0x01FF);
        assert_eq!(cpu.pc(), 0x07FF);
        assert_eq!(cpu.status(), 0x36);

        assert!(cpu.flag_z());
        assert!(cpu.flag_i());
        assert!(cpu.flag_b());
        assert!(!cpu.flag_c());
        assert!(!cpu.flag_n());
        assert!(!cpu.flag_v());
        assert!(!cpu.flag_d());
    }

    #[test]
    fn test_reset_memory_pattern() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.memory_mut().write(0x4000, 0x12);
        cpu.reset();

        let mem = cpu.memory();
        assert_eq!(mem.read(0x0000), 0xFF);
        assert_eq!(mem.read(0x1FFF), 0xFF);
        for base in [0x0000u16, 0x0800, 0x1000, 0x1800] {
            assert_eq!(mem.read(base + 0x008), 0xF7);
            assert_eq!(mem.read(base + 0x009), 0xEF);
            assert_eq!(mem.read(base + 0x00A), 0xDF);
            assert_eq!(mem.read(base + 0x00F), 0xBF);
            assert_eq!(mem.read(base + 0x00B), 0xFF);
        }
        assert_eq!(mem.read(0x2000), 0x00);
        assert_eq!(mem.read(0x4000), 0x00);
        assert_eq!(mem.read(0xFFFF), 0x00);
    }

    type FlagPrimitive = fn(&mut CPU<FlatMemory>);

    const FLAG_PAIRS: [(FlagPrimitive, FlagPrimitive, u8); 7] = [
        (CPU::set_carry, CPU::clear_carry, CARRY),
        (CPU::set_zero, CPU::clear_zero, ZERO),
        (CPU::set_interrupt_disable, CPU::clear_interrupt_disable, INTERRUPT_DISABLE),
        (CPU::set_decimal, CPU::clear_decimal, DECIMAL),
        (CPU::set_break, CPU::clear_break, BREAK),
        (CPU::set_overflow, CPU::clear_overflow, OVERFLOW),
        (CPU::set_negative, CPU::clear_negative, NEGATIVE),
    ];

    #[test]
    fn test_flag_primitives_touch_one_bit() {
        let mut cpu = CPU::new(FlatMemory::new());

        for start in [0x00, 0x36, 0xFF] {
            for (set, clear, bit) in FLAG_PAIRS {
                cpu.set_status(start);
                let before = cpu.status();

                set(&mut cpu);
                assert_eq!(cpu.status(), before | bit, "set {bit:#04X}");
                clear(&mut cpu);
                assert_eq!(cpu.status(), before & !bit, "clear {bit:#04X}");
            }
        }
    }

    #[test]
    fn test_set_status_forces_unused_bit() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.set_status(0x00);
        assert_eq!(cpu.status(), UNUSED);
        assert!(!cpu.flag_z());
        assert!(!cpu.flag_i());

        cpu.set_status(0xFF);
        assert_eq!(cpu.status(), 0xFF);
        assert!(cpu.flag_c() && cpu.flag_d() && cpu.flag_n());
    }

    #[test]
    fn test_check_negative_on_raw_result() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.check_negative(-1);
        assert!(cpu.flag_n());
        cpu.check_negative(0x100);
        assert!(!cpu.flag_n());
    }

    #[test]
    fn test_stack_wraps_within_page() {
        let mut cpu = CPU::new(FlatMemory::new());

        cpu.set_sp(0x0100);
        cpu.push(0xAA);
        assert_eq!(cpu.memory().read(0x0100), 0xAA);
        assert_eq!(cpu.sp(), 0x01FF);
        cpu.push(0xBB);
        assert_eq!(cpu.memory().read(0x01FF), 0xBB);

        // Popping from the top wraps to the bottom of the page
        cpu.set_sp(0x01FF);
        assert_eq!(cpu.peek(), 0xAA);
        assert_eq!(cpu.pop(), 0xAA);
        assert_eq!(cpu.sp(), 0x0100);
    }

    #[test]
    fn test_push_pop_round_trip() {
        let mut cpu = CPU::new(FlatMemory::new());
        cpu.push(0x12);
        cpu.push(0x34);
        assert_eq!(cpu.sp(), 0x01FD);
        assert_eq!(cpu.peek(), 0x34);
        assert_eq!(cpu.pop(), 0x34);
        assert_eq!(cpu.pop(), 0x12);
        assert_eq!(cpu.sp(), 0x01FF);
    }

    #[test]
    fn test_load_program_bounds() {
        let mut cpu = CPU::new(FlatMemory::new());
        assert!(cpu.load_program(0x0600, &[0xE8, 0xE8]).is_ok());
        assert_eq!(cpu.memory().read(0x0601), 0xE8);

        assert_eq!(
            cpu.load_program(0xFFFF, &[0xEA, 0xEA]),
            Err(ExecutionError::Memory(crate::MemoryError::InvalidAddress(0x10000)))
        );
    }
}
