//! Virtual Machine for toy32

use crate::config::VMConfig;
use crate::error::{Result, RuntimeError};
use crate::execute::{execute, Control};
use crate::io::{IoDevices, StdIo};
use crate::memory::{Memory, Width};
use crate::state::{ExecState, VMState};
use serde::Serialize;
use toy32_spec::{Instruction, Program, INSTRUCTION_BYTES};

/// One retired instruction, recorded when `VMConfig::trace` is set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRow {
    pub cycle: u64,
    pub pc: u32,
    pub word: u32,
    pub instruction: Instruction,
}

/// Execution result
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    /// Number of instructions executed, HALT included
    pub cycles: u64,

    /// Final program counter
    pub pc: u32,

    pub state: ExecState,

    /// Per-step trace (empty unless tracing was enabled)
    pub trace: Vec<TraceRow>,
}

/// toy32 Virtual Machine
pub struct VM<IO: IoDevices = StdIo> {
    state: VMState,
    memory: Memory,
    io: IO,
    config: VMConfig,
    trace: Vec<TraceRow>,
}

impl<IO: IoDevices> VM<IO> {
    /// Reset: zeroed registers and memory, program image at address 0, pc = 0
    pub fn new(program: &Program, io: IO, config: VMConfig) -> Result<Self> {
        config.validate()?;
        let memory = Memory::with_image(config.memory_size, &program.bytes)?;
        tracing::debug!(
            "loaded {} byte image into {} bytes of memory",
            program.len(),
            memory.size()
        );

        Ok(Self {
            state: VMState::new(),
            memory,
            io,
            config,
            trace: Vec::new(),
        })
    }

    /// Fetch, decode and execute one instruction.
    ///
    /// On error nothing has changed, pc included.
    pub fn step(&mut self) -> Result<ExecState> {
        if self.state.is_halted() {
            return Err(RuntimeError::Halted);
        }

        let (inst, word) = self.fetch_and_decode()?;
        let pc = self.state.pc();
        tracing::trace!(cycle = self.state.cycles, "PC={:#010x} {:#010x} {}", pc, word, inst);

        let control = execute(
            &inst,
            &mut self.state,
            &mut self.memory,
            &mut self.io,
            self.config.sleep_unit,
        )?;

        let next_pc = match control {
            Control::Next => pc.wrapping_add(INSTRUCTION_BYTES),
            Control::Jump(target) => target,
            Control::Halt => {
                self.state.halt();
                pc.wrapping_add(INSTRUCTION_BYTES)
            }
        };
        self.state.registers.set_pc(next_pc);

        if self.config.trace {
            self.trace.push(TraceRow {
                cycle: self.state.cycles,
                pc,
                word,
                instruction: inst,
            });
        }
        self.state.cycles += 1;

        Ok(self.state.state)
    }

    /// Run the VM until halt
    pub fn run(&mut self) -> Result<ExecutionResult> {
        while !self.state.is_halted() {
            if let Some(limit) = self.config.max_cycles {
                if self.state.cycles >= limit {
                    return Err(RuntimeError::CycleLimitExceeded { limit });
                }
            }
            self.step()?;
        }

        tracing::debug!(
            "halted after {} cycles at PC={:#010x}",
            self.state.cycles,
            self.state.pc()
        );

        Ok(ExecutionResult {
            cycles: self.state.cycles,
            pc: self.state.pc(),
            state: self.state.state,
            trace: std::mem::take(&mut self.trace),
        })
    }

    /// Read the big-endian word at pc and decode it
    fn fetch_and_decode(&self) -> Result<(Instruction, u32)> {
        let pc = self.state.pc();
        let word = self.memory.read(pc as i32 as i64, Width::Word)?;
        let inst = Instruction::decode(word)?;
        Ok((inst, word))
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &VMState {
        &self.state
    }

    /// Get memory (for debugging)
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn io(&self) -> &IO {
        &self.io
    }
}
