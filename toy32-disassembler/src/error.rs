//! Disassembler errors

use thiserror::Error;
use toy32_spec::SpecError;

#[derive(Debug, Error)]
pub enum DisassemblerError {
    #[error("Invalid instruction encoding: 0x{word:08x} ({error})")]
    InvalidEncoding { word: u32, error: SpecError },
}

pub type Result<T> = std::result::Result<T, DisassemblerError>;
