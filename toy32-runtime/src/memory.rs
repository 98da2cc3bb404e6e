//! Memory subsystem
//!
//! Flat zero-initialized byte array, big-endian multi-byte accesses. Every
//! access is bounds-checked before anything is touched, so a faulting access
//! never mutates memory.

use crate::error::{Result, RuntimeError};
use toy32_spec::MemFn;

/// Access width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Byte,
    Half,
    Word,
}

impl Width {
    #[inline]
    pub const fn bytes(self) -> usize {
        match self {
            Width::Byte => 1,
            Width::Half => 2,
            Width::Word => 4,
        }
    }
}

impl From<MemFn> for Width {
    fn from(func: MemFn) -> Self {
        match func.width() {
            1 => Width::Byte,
            2 => Width::Half,
            _ => Width::Word,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    pub fn new(size: usize) -> Self {
        Memory {
            data: vec![0; size],
        }
    }

    /// Memory of `size` bytes with `image` copied to address 0
    pub fn with_image(size: usize, image: &[u8]) -> Result<Self> {
        let mut memory = Self::new(size);
        memory.write_bytes(0, image)?;
        Ok(memory)
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Index range for `len` bytes at `address`, or a fault
    fn check(&self, address: i64, len: usize) -> Result<std::ops::Range<usize>> {
        let fault = || RuntimeError::MemoryFault {
            address,
            width: len,
            size: self.data.len(),
        };
        let start = usize::try_from(address).map_err(|_| fault())?;
        let end = start.checked_add(len).ok_or_else(fault)?;
        if end > self.data.len() {
            return Err(fault());
        }
        Ok(start..end)
    }

    /// Load `width` bytes big-endian, zero-extended
    pub fn read(&self, address: i64, width: Width) -> Result<u32> {
        let range = self.check(address, width.bytes())?;
        Ok(self.data[range]
            .iter()
            .fold(0u32, |acc, &byte| acc << 8 | byte as u32))
    }

    /// Store the low `width` bytes of `value` big-endian
    pub fn write(&mut self, address: i64, width: Width, value: u32) -> Result<()> {
        let range = self.check(address, width.bytes())?;
        let bytes = value.to_be_bytes();
        self.data[range].copy_from_slice(&bytes[4 - width.bytes()..]);
        Ok(())
    }

    pub fn read_bytes(&self, address: i64, len: usize) -> Result<&[u8]> {
        let range = self.check(address, len)?;
        Ok(&self.data[range])
    }

    pub fn write_bytes(&mut self, address: i64, bytes: &[u8]) -> Result<()> {
        let range = self.check(address, bytes.len())?;
        self.data[range].copy_from_slice(bytes);
        Ok(())
    }

    /// Fail unless `len` bytes at `address` are in bounds
    pub fn ensure(&self, address: i64, len: usize) -> Result<()> {
        self.check(address, len).map(|_| ())
    }
}
