//! Image decoder
//!
//! Splits a program image into instruction words and leftovers.

use crate::error::{DisassemblerError, Result};
use toy32_spec::{Instruction, Program};

/// Decode a 32-bit instruction word
pub fn decode(word: u32) -> Result<Instruction> {
    Instruction::decode(word).map_err(|error| DisassemblerError::InvalidEncoding { word, error })
}

/// One unit of a decoded image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    /// A word that decodes to an instruction
    Instruction { address: u32, word: u32, instruction: Instruction },
    /// A word with no instruction meaning (typically data)
    Word { address: u32, word: u32 },
    /// A trailing byte that does not fill a word
    Byte { address: u32, value: u8 },
}

impl Item {
    pub fn address(&self) -> u32 {
        match self {
            Item::Instruction { address, .. } | Item::Word { address, .. } | Item::Byte { address, .. } => {
                *address
            }
        }
    }
}

/// Decode every aligned word of `program`, then its trailing bytes
pub fn decode_program(program: &Program) -> Vec<Item> {
    let mut items: Vec<Item> = program
        .words()
        .map(|(address, word)| match decode(word) {
            Ok(instruction) => Item::Instruction {
                address,
                word,
                instruction,
            },
            Err(_) => Item::Word { address, word },
        })
        .collect();

    let tail_start = (program.len() - program.tail().len()) as u32;
    items.extend(program.tail().iter().enumerate().map(|(i, &value)| Item::Byte {
        address: tail_start + i as u32,
        value,
    }));
    items
}
