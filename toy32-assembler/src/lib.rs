//! toy32 Assembler
//!
//! Assemble toy32 assembly language into a program image.
//!
//! Assembly runs in three passes over the tokenized source: label
//! resolution, label substitution, then pattern matching and encoding
//! against an ordered grammar table.
//!
//! ## Example
//!
//! ```rust
//! use toy32_assembler::assemble;
//!
//! let source = r#"
//!     addi r1 r0 3
//!     outd r1
//!     halt
//! "#;
//!
//! let program = assemble(source).unwrap();
//! assert_eq!(program.len(), 12);
//! ```

pub mod assembler;
pub mod encoder;
pub mod error;
pub mod labels;
pub mod lexer;
pub mod literal;
pub mod parser;

pub use assembler::assemble;
pub use error::{AssemblerError, Result};
pub use labels::LabelTable;
pub use lexer::{tokenize, Token};
pub use parser::{is_mnemonic, match_statement};
