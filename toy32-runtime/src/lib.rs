//! # toy32 Runtime
//!
//! Execution engine for toy32 program images.
//!
//! ## Features
//!
//! - **33 registers**: r0 (hardwired zero), r1-r31, pc
//! - **Flat memory**: byte-addressable, big-endian, bounds-checked on every access
//! - **Devices**: input, output, clear and delay behind the [`IoDevices`] trait
//! - **Fail-stop**: every fault is fatal and leaves the machine state untouched
//!
//! ## Example
//!
//! ```rust,no_run
//! use toy32_runtime::{IOHandler, VMConfig, VM};
//! use toy32_spec::Program;
//!
//! let program = Program::from_bytes(&std::fs::read("out.bin").unwrap());
//! let mut vm = VM::new(&program, IOHandler::default(), VMConfig::default()).unwrap();
//! let result = vm.run().unwrap();
//! println!("Cycles: {}", result.cycles);
//! ```

pub mod config;
pub mod error;
pub mod execute;
pub mod io;
pub mod memory;
pub mod state;
pub mod vm;

pub use config::{ConfigError, VMConfig};
pub use error::RuntimeError;
pub use io::{IOHandler, IoDevices, StdIo};
pub use memory::{Memory, Width};
pub use state::{ExecState, Registers, VMState};
pub use vm::{ExecutionResult, TraceRow, VM};

/// Simple execution helper
///
/// Runs a program against `io` with the default configuration.
pub fn run<IO: IoDevices>(program: &toy32_spec::Program, io: IO) -> Result<ExecutionResult, RuntimeError> {
    VM::new(program, io, VMConfig::default())?.run()
}
