//! Runtime error types for the toy32 engine
//!
//! Every variant is fatal for the run that produced it.

use crate::config::ConfigError;
use thiserror::Error;
use toy32_spec::SpecError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("Decode error: {0}")]
    Decode(#[from] SpecError),

    #[error("Memory fault: {width}-byte access at address {address} outside [0, {size})")]
    MemoryFault {
        address: i64,
        width: usize,
        size: usize,
    },

    #[error("Invalid input: {input:?} is not a 32-bit decimal integer")]
    InputFormat { input: String },

    #[error("Division by zero at PC {pc:#x}")]
    DivisionByZero { pc: u32 },

    #[error("Invalid IO range: [{start}, {end})")]
    InvalidIoRange { start: i64, end: i64 },

    #[error("Machine is halted")]
    Halted,

    #[error("Cycle limit exceeded: {limit}")]
    CycleLimitExceeded { limit: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, RuntimeError>;
