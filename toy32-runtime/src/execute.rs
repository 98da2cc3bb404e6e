//! Instruction execution for toy32
//!
//! [`execute`] applies one decoded instruction to the machine. It never
//! touches pc itself; the returned [`Control`] tells the step loop where
//! execution continues. All checks that can fail run before the first
//! mutation, so an `Err` leaves registers, memory and devices unchanged.

use std::time::Duration;

use crate::error::{Result, RuntimeError};
use crate::io::IoDevices;
use crate::memory::{Memory, Width};
use crate::state::VMState;
use toy32_spec::escape::unescape;
use toy32_spec::{AluFn, BranchFn, CtlFn, Instruction, IoFn, MdFn};

/// Where execution continues after an instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Fall through to pc + 4
    Next,
    /// Set pc to the target unmodified
    Jump(u32),
    /// Advance pc and stop
    Halt,
}

/// ALU operation on two 32-bit values
#[inline]
pub fn alu(func: AluFn, a: u32, b: u32) -> u32 {
    match func {
        AluFn::Add => a.wrapping_add(b),
        AluFn::Sub => a.wrapping_sub(b),
        AluFn::And => a & b,
        AluFn::Or => a | b,
        AluFn::Xor => a ^ b,
        AluFn::Ls => a.checked_shl(b).unwrap_or(0),
        AluFn::Rs => a.checked_shr(b).unwrap_or(0),
    }
}

/// Signed multiply/divide/modulo; `None` on a zero divisor
#[inline]
pub fn muldiv(func: MdFn, a: u32, b: u32) -> Option<u32> {
    let (a, b) = (a as i32, b as i32);
    let result = match func {
        MdFn::Mul => a.wrapping_mul(b),
        _ if b == 0 => return None,
        MdFn::Div => a.wrapping_div(b),
        MdFn::Mod => a.wrapping_rem(b),
    };
    Some(result as u32)
}

/// Signed branch condition
#[inline]
pub fn cond(func: BranchFn, a: u32, b: u32) -> bool {
    let (a, b) = (a as i32, b as i32);
    match func {
        BranchFn::Eq => a == b,
        BranchFn::Ne => a != b,
        BranchFn::Lt => a < b,
        BranchFn::Ge => a >= b,
    }
}

/// Base-plus-offset address in the signed register interpretation
#[inline]
fn address(base: u32, offset: i32) -> i64 {
    base as i32 as i64 + offset as i64
}

/// Execute single instruction
pub fn execute<IO: IoDevices>(
    inst: &Instruction,
    state: &mut VMState,
    memory: &mut Memory,
    io: &mut IO,
    sleep_unit: Duration,
) -> Result<Control> {
    let pc = state.pc();
    let regs = &mut state.registers;

    match *inst {
        Instruction::Ctl { func, ra, imm } => match func {
            CtlFn::Halt => {
                tracing::debug!("HALT at PC={:#010x}", pc);
                return Ok(Control::Halt);
            }
            CtlFn::Nop => {}
            CtlFn::Sleep => {
                // negative durations sleep for zero time
                let units = (regs.read(ra) as i32).wrapping_add(imm).max(0) as u32;
                let duration = sleep_unit.saturating_mul(units);
                tracing::debug!("SLEEP {} units ({:?}) at PC={:#010x}", units, duration, pc);
                io.delay(duration);
            }
        },

        Instruction::Io { func, ra, rb, imm } => {
            let x = regs.read(ra) as i32;
            let y = regs.read(rb) as i32;
            let value = x.wrapping_add(imm);

            match func {
                IoFn::In => {
                    let len = if y == 0 { 1 } else { y as i64 - x as i64 };
                    if len < 0 {
                        return Err(RuntimeError::InvalidIoRange {
                            start: x as i64,
                            end: y as i64,
                        });
                    }
                    let dest = x as i64 + imm as i64;
                    memory.ensure(dest, len as usize)?;
                    let bytes = io.read_bytes(len as usize)?;
                    memory.write_bytes(dest, &bytes)?;
                }
                IoFn::Out => {
                    let start = x as i64 + imm as i64;
                    let end = y as i64;
                    if end < start {
                        return Err(RuntimeError::InvalidIoRange { start, end });
                    }
                    let bytes = memory.read_bytes(start, (end - start) as usize)?;
                    io.write(&unescape(bytes))?;
                }
                IoFn::OutD => io.write(value.to_string().as_bytes())?,
                IoFn::OutB => io.write(format!("{:032b}", value as u32).as_bytes())?,
                IoFn::OutH => io.write(format!("{:08x}", value as u32).as_bytes())?,
                IoFn::OutC => {
                    let c = char::from_u32(value as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
                    let mut buf = [0u8; 4];
                    io.write(c.encode_utf8(&mut buf).as_bytes())?;
                }
                IoFn::Cl => {
                    tracing::debug!("CL at PC={:#010x}", pc);
                    io.clear()?;
                }
                IoFn::InD => {
                    let line = io.read_line()?.ok_or_else(|| RuntimeError::InputFormat {
                        input: String::new(),
                    })?;
                    let parsed = line
                        .trim()
                        .parse::<i32>()
                        .map_err(|_| RuntimeError::InputFormat { input: line.clone() })?;
                    regs.write(ra, parsed as u32);
                }
            }
        }

        Instruction::AluR { func, ra, rb, rc } => {
            let result = alu(func, regs.read(rb), regs.read(rc));
            regs.write(ra, result);
        }

        Instruction::AluI { func, ra, rb, imm } => {
            let result = alu(func, regs.read(rb), imm as u32);
            regs.write(ra, result);
        }

        Instruction::MulDiv { func, ra, rb, rc } => {
            let result = muldiv(func, regs.read(rb), regs.read(rc))
                .ok_or(RuntimeError::DivisionByZero { pc })?;
            regs.write(ra, result);
        }

        Instruction::Jump { ra, rb, imm, .. } => {
            // link first: with ra == rb the target is relative to this jump
            regs.write(ra, pc);
            let target = regs.read(rb).wrapping_add(imm as u32);
            return Ok(Control::Jump(target));
        }

        Instruction::Branch { func, ra, rb, imm } => {
            if cond(func, regs.read(ra), regs.read(rb)) {
                return Ok(Control::Jump(imm as u32));
            }
        }

        Instruction::Mem { func, ra, rb, imm } => {
            let width = Width::from(func);
            if func.is_store() {
                let addr = address(regs.read(ra), imm);
                memory.write(addr, width, regs.read(rb))?;
            } else {
                let value = memory.read(address(regs.read(rb), imm), width)?;
                regs.write(ra, value);
            }
        }
    }

    Ok(Control::Next)
}
