//! VM state for toy32

use serde::{Deserialize, Serialize};
use std::fmt;
use toy32_spec::{Register, NUM_REGISTERS, PC_INDEX};

/// Register file: r0-r31 plus pc
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registers {
    values: [u32; NUM_REGISTERS],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            values: [0; NUM_REGISTERS],
        }
    }

    /// Read register (r0 always returns 0)
    #[inline]
    pub fn read(&self, reg: Register) -> u32 {
        if reg.is_zero() {
            0
        } else {
            self.values[reg.index()]
        }
    }

    /// Write register (writes to r0 are ignored)
    #[inline]
    pub fn write(&mut self, reg: Register, value: u32) {
        if !reg.is_zero() {
            self.values[reg.index()] = value;
        }
    }

    #[inline]
    pub fn pc(&self) -> u32 {
        self.values[PC_INDEX]
    }

    #[inline]
    pub fn set_pc(&mut self, pc: u32) {
        self.values[PC_INDEX] = pc;
    }

    pub fn as_array(&self) -> [u32; NUM_REGISTERS] {
        let mut values = self.values;
        values[0] = 0;
        values
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

/// One register per line as a 32-digit binary string
impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, value) in self.as_array().iter().enumerate() {
            if let Some(reg) = Register::from_index(index) {
                writeln!(f, "{:>3}: {:032b}", reg.to_string(), value)?;
            }
        }
        Ok(())
    }
}

/// Engine state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecState {
    Running,
    /// Terminal; entered only by CTL/HALT
    Halted,
}

/// VM state
#[derive(Debug, Clone, Default)]
pub struct VMState {
    pub registers: Registers,

    pub state: ExecState,

    /// Instructions retired so far
    pub cycles: u64,
}

impl Default for ExecState {
    fn default() -> Self {
        ExecState::Running
    }
}

impl VMState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn pc(&self) -> u32 {
        self.registers.pc()
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.state == ExecState::Halted
    }

    pub fn halt(&mut self) {
        self.state = ExecState::Halted;
    }
}
