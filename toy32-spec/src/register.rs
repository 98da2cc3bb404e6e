//! Register definitions for toy32
//!
//! Indices 0-31 are general purpose (r0 hardwired to zero), index 32 is the
//! program counter. Only indices 0-31 fit in an instruction's 5-bit fields.

use crate::error::{Result, SpecError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of register slots (r0-r31 plus pc)
pub const NUM_REGISTERS: usize = 33;

/// Index of the program counter
pub const PC_INDEX: usize = 32;

/// Register field mask (5 bits)
pub const REGISTER_MASK: u32 = 0x1F;

/// Register index (r0-r31, pc)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Register(u8);

impl Register {
    pub const ZERO: Self = Self(0);
    pub const PC: Self = Self(PC_INDEX as u8);

    #[inline]
    pub fn from_index(index: usize) -> Option<Self> {
        if index < NUM_REGISTERS {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    /// Register named by a 5-bit instruction field
    #[inline]
    pub const fn from_field(bits: u32) -> Self {
        Self((bits & REGISTER_MASK) as u8)
    }

    /// Look up a register by its assembler name (`r0`..`r31`, `pc`)
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "pc" {
            return Some(Self::PC);
        }
        let digits = name.strip_prefix('r')?;
        // reject "r01" and friends so every register has exactly one spelling
        if digits.is_empty() || (digits.len() > 1 && digits.starts_with('0')) {
            return None;
        }
        let index: usize = digits.parse().ok()?;
        if index < PC_INDEX {
            Some(Self(index as u8))
        } else {
            None
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }

    #[inline]
    pub fn is_pc(self) -> bool {
        self == Self::PC
    }

    /// Bits for a 5-bit register field
    pub fn field_bits(self) -> Result<u32> {
        if self.is_pc() {
            Err(SpecError::RegisterNotEncodable(self.0))
        } else {
            Ok(self.0 as u32)
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pc() {
            write!(f, "pc")
        } else {
            write!(f, "r{}", self.0)
        }
    }
}
