//! # toy32 Disassembler
//!
//! Disassemble toy32 program images into human-readable assembly.
//!
//! Two renderings are offered: [`disassemble`] produces an annotated listing
//! with addresses and raw words, [`to_source`] produces plain assembly that
//! the assembler turns back into the identical image.
//!
//! ## Example
//!
//! ```rust
//! use toy32_disassembler::disassemble;
//! use toy32_spec::Program;
//!
//! let program = Program::from_words(&[0x6020_0003, 0x0000_0000]);
//! let listing = disassemble(&program);
//! assert!(listing.contains("addi r1 r0 3"));
//! ```

pub mod decoder;
pub mod disassembler;
pub mod error;
pub mod formatter;

pub use decoder::{decode, decode_program, Item};
pub use disassembler::{disassemble, to_source};
pub use error::{DisassemblerError, Result};
pub use formatter::format;
