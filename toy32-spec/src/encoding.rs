//! # Instruction Encoding Constants and Helpers
//!
//! Bit-field extraction, sign extension and sign contraction, plus the raw
//! [`Fields`] tuple that every instruction word packs and unpacks through.
//!
//! ## Instruction Format (32-bit, MSB first)
//!
//! ```text
//! R: [opcode:3][function:3][reg_a:5][reg_b:5][reg_c:5][unused:11]
//! I: [opcode:3][function:3][reg_a:5][reg_b:5][imm:16]
//! W: [opcode:3][function:3][reg_a:5][imm:21]
//! ```

use crate::error::{Result, SpecError};
use crate::opcode::{Layout, Opcode};
use crate::register::{PC_INDEX, REGISTER_MASK};
use serde::{Deserialize, Serialize};

// ============================================================================
// Bit Position Constants
// ============================================================================

/// Opcode field: bits 31-29
pub const OPCODE_SHIFT: u32 = 29;

/// Function field: bits 28-26
pub const FUNCTION_SHIFT: u32 = 26;

/// reg_a field: bits 25-21
pub const REG_A_SHIFT: u32 = 21;

/// reg_b field: bits 20-16
pub const REG_B_SHIFT: u32 = 16;

/// reg_c field: bits 15-11
pub const REG_C_SHIFT: u32 = 11;

// ============================================================================
// Field Masks
// ============================================================================

/// Function field mask (3 bits)
pub const FUNCTION_MASK: u32 = 0b111;

/// Immediate mask for the I layout (16 bits)
pub const IMM16_MASK: u32 = 0xFFFF;

/// Immediate mask for the W layout (21 bits)
pub const IMM21_MASK: u32 = 0x1F_FFFF;

// ============================================================================
// Field Helpers
// ============================================================================

#[inline]
const fn low_mask(width: u32) -> u32 {
    if width >= 32 {
        u32::MAX
    } else {
        (1u32 << width) - 1
    }
}

/// Extract bits `high..=low` of `word` as an unsigned value.
///
/// `high` must be greater than or equal to `low` and below 32.
#[inline]
pub const fn field(word: u32, high: u32, low: u32) -> u32 {
    (word >> low) & low_mask(high - low + 1)
}

/// Interpret the low `width` bits of `value` as a two's-complement number.
#[inline]
pub const fn extend(value: u32, width: u32) -> i32 {
    if width == 0 {
        0
    } else if width >= 32 {
        value as i32
    } else {
        let shift = 32 - width;
        ((value << shift) as i32) >> shift
    }
}

/// Mask a signed value into its unsigned `width`-bit pattern.
#[inline]
pub const fn contract(value: i32, width: u32) -> u32 {
    (value as u32) & low_mask(width)
}

/// Whether `value` survives contraction to `width` bits unchanged.
#[inline]
pub const fn fits(value: i32, width: u32) -> bool {
    extend(contract(value, width), width) == value
}

// ============================================================================
// Raw Field Tuple
// ============================================================================

/// The unpacked fields of one instruction word.
///
/// Fields absent from the opcode's [`Layout`] are zero after decoding and
/// ignored when encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fields {
    pub opcode: Opcode,
    pub function: u8,
    pub reg_a: u8,
    pub reg_b: u8,
    pub reg_c: u8,
    pub imm: i32,
}

impl Fields {
    pub fn new(opcode: Opcode, function: u8) -> Self {
        Self {
            opcode,
            function,
            ..Self::default()
        }
    }

    /// Pack into an instruction word.
    ///
    /// The immediate is contracted to the layout's width; callers that care
    /// about lossy immediates check [`fits`] first.
    pub fn encode(&self) -> Result<u32> {
        if self.function as u32 > FUNCTION_MASK {
            return Err(SpecError::InvalidFunction {
                opcode: self.opcode,
                function: self.function,
            });
        }
        let layout = self.opcode.layout();

        let mut word = (self.opcode.to_u8() as u32) << OPCODE_SHIFT
            | (self.function as u32) << FUNCTION_SHIFT
            | register_bits(self.reg_a)? << REG_A_SHIFT;

        if layout.has_reg_b() {
            word |= register_bits(self.reg_b)? << REG_B_SHIFT;
        }
        if layout.has_reg_c() {
            word |= register_bits(self.reg_c)? << REG_C_SHIFT;
        }
        word |= contract(self.imm, layout.immediate_width());

        Ok(word)
    }

    /// Unpack an instruction word. Every word yields a tuple; whether the
    /// function tag means anything is checked by [`crate::Instruction::decode`].
    pub fn decode(word: u32) -> Self {
        let opcode = Opcode::from_bits(field(word, 31, 29));
        let layout = opcode.layout();

        let reg_b = if layout.has_reg_b() { field(word, 20, 16) } else { 0 };
        let reg_c = if layout.has_reg_c() { field(word, 15, 11) } else { 0 };
        let imm = match layout {
            Layout::R => 0,
            Layout::I => extend(field(word, 15, 0), 16),
            Layout::W => extend(field(word, 20, 0), 21),
        };

        Self {
            opcode,
            function: field(word, 28, 26) as u8,
            reg_a: field(word, 25, 21) as u8,
            reg_b: reg_b as u8,
            reg_c: reg_c as u8,
            imm,
        }
    }
}

fn register_bits(index: u8) -> Result<u32> {
    match index as usize {
        i if i == PC_INDEX => Err(SpecError::RegisterNotEncodable(index)),
        i if i as u32 > REGISTER_MASK => Err(SpecError::InvalidRegister(index)),
        _ => Ok(index as u32),
    }
}
