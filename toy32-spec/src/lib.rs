//! # toy32 ISA Specification
//!
//! 32-bit register-based instruction set shared by the assembler and the
//! execution engine.
//!
//! ## Key Features
//! - 32-bit big-endian instruction words with a 3-bit opcode and 3-bit function
//! - 32 general-purpose registers (r0 hardwired to zero) plus the program counter
//! - Flat byte-addressable memory, program image loaded at address 0
//! - Memory-mapped-style IO instructions (input, output, clear)
//!
//! ## Instruction Layouts
//!
//! ```text
//! R: [opcode:3][function:3][reg_a:5][reg_b:5][reg_c:5][unused:11]
//! I: [opcode:3][function:3][reg_a:5][reg_b:5][imm:16]
//! W: [opcode:3][function:3][reg_a:5][imm:21]
//! ```

pub mod encoding;
pub mod error;
pub mod escape;
pub mod instruction;
pub mod opcode;
pub mod program;
pub mod register;

pub use encoding::{contract, extend, field, Fields};
pub use error::SpecError;
pub use instruction::Instruction;
pub use opcode::{AluFn, BranchFn, CtlFn, IoFn, JumpFn, Layout, MdFn, MemFn, Opcode};
pub use program::Program;
pub use register::{Register, NUM_REGISTERS, PC_INDEX};

/// Width of one instruction in bytes
pub const INSTRUCTION_BYTES: u32 = 4;

/// Reference memory size in bytes
pub const DEFAULT_MEMORY_SIZE: usize = 8000;

/// Machine word
pub type Word = u32;

/// Signed machine word
pub type SWord = i32;
