//! # Error Types for the toy32 ISA

use crate::opcode::Opcode;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    // Instruction errors
    #[error("Invalid function tag {function:#05b} for opcode {opcode}")]
    InvalidFunction { opcode: Opcode, function: u8 },

    #[error("Invalid opcode: {0:#05b}")]
    InvalidOpcode(u8),

    #[error("Invalid register index: {0} (valid range: 0-31)")]
    InvalidRegister(u8),

    #[error("Register {0} cannot be encoded in a 5-bit field")]
    RegisterNotEncodable(u8),

    #[error("Invalid field width: {0} bits")]
    InvalidWidth(u32),
}

pub type Result<T> = std::result::Result<T, SpecError>;
