//! Assembler errors
//!
//! Every error is fatal and names the 1-based source line it came from.

use thiserror::Error;
use toy32_spec::SpecError;

#[derive(Debug, Error)]
pub enum AssemblerError {
    #[error("Syntax error at line {line}: no instruction pattern matches `{text}`")]
    NoMatchingPattern { line: usize, text: String },

    #[error("Invalid token at line {line}: `{token}`")]
    InvalidToken { line: usize, token: String },

    #[error("Invalid immediate value at line {line}: `{literal}`")]
    InvalidImmediate { line: usize, literal: String },

    #[error("Invalid register at line {line}: `{name}`")]
    InvalidRegister { line: usize, name: String },

    #[error("Register `{name}` at line {line} cannot be used as an operand")]
    RegisterNotEncodable { line: usize, name: String },

    #[error("Invalid label declaration at line {line}: `{text}`")]
    InvalidLabel { line: usize, text: String },

    #[error("Label `{name}` at line {line} collides with a mnemonic or register")]
    ReservedLabel { line: usize, name: String },

    #[error("Duplicate label `{name}` at line {line}")]
    DuplicateLabel { line: usize, name: String },

    #[error("Undefined label `{name}` at line {line}")]
    UndefinedLabel { line: usize, name: String },

    #[error("Encoding error at line {line}: {error}")]
    Encoding { line: usize, error: SpecError },
}

impl AssemblerError {
    /// Source line the error refers to
    pub fn line(&self) -> usize {
        match self {
            AssemblerError::NoMatchingPattern { line, .. }
            | AssemblerError::InvalidToken { line, .. }
            | AssemblerError::InvalidImmediate { line, .. }
            | AssemblerError::InvalidRegister { line, .. }
            | AssemblerError::RegisterNotEncodable { line, .. }
            | AssemblerError::InvalidLabel { line, .. }
            | AssemblerError::ReservedLabel { line, .. }
            | AssemblerError::DuplicateLabel { line, .. }
            | AssemblerError::UndefinedLabel { line, .. }
            | AssemblerError::Encoding { line, .. } => *line,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
