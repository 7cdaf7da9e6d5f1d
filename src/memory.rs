//! # Memory Bus Abstraction
//!
//! This module provides the `MemoryBus` trait that decouples the CPU from specific
//! memory implementations, plus `FlatMemory`, a 64KB byte store.
//!
//! ## Design Principles
//!
//! - The trait takes `u16` addresses, so every CPU-side access is in range by
//!   construction and reads/writes never fail.
//! - `FlatMemory` additionally offers bounds-checked `fetch`/`store`/`load` that
//!   accept arbitrary `usize` addresses and reject anything outside
//!   `0x0000..=0xFFFF` with [`MemoryError::InvalidAddress`].

use thiserror::Error;

/// Number of addressable bytes.
pub const MEMORY_SIZE: usize = 0x10000;

/// Errors raised by the checked accessors of [`FlatMemory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MemoryError {
    /// Address outside the 64KB address space.
    #[error("invalid memory address 0x{0:X}")]
    InvalidAddress(usize),
}

/// Memory bus trait for CPU to read/write bytes.
///
/// # Examples
///
/// ```
/// use sim6502::{MemoryBus, FlatMemory};
///
/// let mut mem = FlatMemory::new();
/// mem.write(0x1234, 0x42);
/// assert_eq!(mem.read(0x1234), 0x42);
/// ```
pub trait MemoryBus {
    /// Reads a byte from the specified 16-bit address.
    fn read(&self, addr: u16) -> u8;

    /// Writes a byte to the specified 16-bit address.
    fn write(&mut self, addr: u16, value: u8);

    /// Reads a little-endian 16-bit word from `addr` and `addr + 1`.
    fn read_word(&self, addr: u16) -> u16 {
        let lo = self.read(addr) as u16;
        let hi = self.read(addr.wrapping_add(1)) as u16;
        (hi << 8) | lo
    }
}

/// Simple 64KB flat memory implementation.
///
/// All addresses (0x0000-0xFFFF) are writable RAM initialized to 0x00.
///
/// # Examples
///
/// ```
/// use sim6502::{FlatMemory, MemoryError};
///
/// let mut mem = FlatMemory::new();
/// mem.store(0x0600, 0xA9).unwrap();
/// assert_eq!(mem.fetch(0x0600), Ok(0xA9));
/// assert_eq!(mem.fetch(0x10000), Err(MemoryError::InvalidAddress(0x10000)));
/// ```
pub struct FlatMemory {
    /// 64KB contiguous memory array
    data: Box<[u8; MEMORY_SIZE]>,
}

impl FlatMemory {
    /// Creates a new FlatMemory instance with all bytes initialized to zero.
    pub fn new() -> Self {
        Self {
            data: Box::new([0; MEMORY_SIZE]),
        }
    }

    /// Bounds-checked read.
    pub fn fetch(&self, address: usize) -> Result<u8, MemoryError> {
        self.data
            .get(address)
            .copied()
            .ok_or(MemoryError::InvalidAddress(address))
    }

    /// Bounds-checked write.
    pub fn store(&mut self, address: usize, value: u8) -> Result<(), MemoryError> {
        let cell = self
            .data
            .get_mut(address)
            .ok_or(MemoryError::InvalidAddress(address))?;
        *cell = value;
        Ok(())
    }

    /// Copies `bytes` into memory starting at `origin`.
    ///
    /// Nothing is written if any byte would land past 0xFFFF; the error carries
    /// the first out-of-range address.
    pub fn load(&mut self, origin: usize, bytes: &[u8]) -> Result<(), MemoryError> {
        let end = origin
            .checked_add(bytes.len())
            .filter(|&end| end <= MEMORY_SIZE)
            .ok_or(MemoryError::InvalidAddress(origin.max(MEMORY_SIZE)))?;
        self.data[origin..end].copy_from_slice(bytes);
        Ok(())
    }

    /// Zeroes all memory.
    pub fn reset(&mut self) {
        self.data.fill(0);
    }
}

impl Default for FlatMemory {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for FlatMemory {
    fn read(&self, addr: u16) -> u8 {
        self.data[addr as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.data[addr as usize] = value;
    }
}
