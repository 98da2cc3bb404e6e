//! toy32 Instruction Set
//!
//! One variant per opcode category, carrying the decoded function tag and the
//! operands that category's layout defines.
//!
//! ## Operand roles
//! - CTL:    reg_a, imm21
//! - IO:     x = reg_a, y = reg_b, z = imm16
//! - ALUR/MD: reg_a = op(reg_b, reg_c)
//! - ALUI:   reg_a = op(reg_b, imm16)
//! - JUMP:   reg_a = link, target = reg_b + imm16
//! - BRANCH: cond(reg_a, reg_b), target = imm16
//! - MEM:    loads read reg_b + imm16 into reg_a; stores write reg_b to reg_a + imm16

use crate::encoding::Fields;
use crate::error::{Result, SpecError};
use crate::opcode::{AluFn, BranchFn, CtlFn, IoFn, JumpFn, MdFn, MemFn, Opcode};
use crate::register::Register;
use serde::{Deserialize, Serialize};

/// toy32 Instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Instruction {
    /// HALT / NOP / SLEEP(reg_a + imm)
    Ctl { func: CtlFn, ra: Register, imm: i32 },

    /// Device transfer on x = ra, y = rb, z = imm
    Io {
        func: IoFn,
        ra: Register,
        rb: Register,
        imm: i32,
    },

    /// ra = alu(rb, rc)
    AluR {
        func: AluFn,
        ra: Register,
        rb: Register,
        rc: Register,
    },

    /// ra = alu(rb, imm)
    AluI {
        func: AluFn,
        ra: Register,
        rb: Register,
        imm: i32,
    },

    /// ra = muldiv(rb, rc)
    MulDiv {
        func: MdFn,
        ra: Register,
        rb: Register,
        rc: Register,
    },

    /// ra = pc; pc = rb + imm
    Jump {
        func: JumpFn,
        ra: Register,
        rb: Register,
        imm: i32,
    },

    /// if cond(ra, rb) { pc = imm }
    Branch {
        func: BranchFn,
        ra: Register,
        rb: Register,
        imm: i32,
    },

    /// Load or store of 1/2/4 bytes
    Mem {
        func: MemFn,
        ra: Register,
        rb: Register,
        imm: i32,
    },
}

impl Instruction {
    pub const HALT: Instruction = Instruction::Ctl {
        func: CtlFn::Halt,
        ra: Register::ZERO,
        imm: 0,
    };

    pub const NOP: Instruction = Instruction::Ctl {
        func: CtlFn::Nop,
        ra: Register::ZERO,
        imm: 0,
    };

    pub fn opcode(&self) -> Opcode {
        match self {
            Instruction::Ctl { .. } => Opcode::Ctl,
            Instruction::Io { .. } => Opcode::Io,
            Instruction::AluR { .. } => Opcode::AluR,
            Instruction::AluI { .. } => Opcode::AluI,
            Instruction::MulDiv { .. } => Opcode::Md,
            Instruction::Jump { .. } => Opcode::Jump,
            Instruction::Branch { .. } => Opcode::Branch,
            Instruction::Mem { .. } => Opcode::Mem,
        }
    }

    /// Get instruction mnemonic
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Instruction::Ctl { func, .. } => func.mnemonic(),
            Instruction::Io { func, .. } => func.mnemonic(),
            Instruction::AluR { func, .. } => func.mnemonic(),
            Instruction::AluI { func, .. } => func.immediate_mnemonic(),
            Instruction::MulDiv { func, .. } => func.mnemonic(),
            Instruction::Jump { func, .. } => func.mnemonic(),
            Instruction::Branch { func, .. } => func.mnemonic(),
            Instruction::Mem { func, .. } => func.mnemonic(),
        }
    }

    pub fn is_halt(&self) -> bool {
        matches!(self, Instruction::Ctl { func: CtlFn::Halt, .. })
    }

    pub fn to_fields(&self) -> Fields {
        let (opcode, function, ra, rb, rc, imm) = match *self {
            Instruction::Ctl { func, ra, imm } => (Opcode::Ctl, func.to_u8(), ra, Register::ZERO, Register::ZERO, imm),
            Instruction::Io { func, ra, rb, imm } => (Opcode::Io, func.to_u8(), ra, rb, Register::ZERO, imm),
            Instruction::AluR { func, ra, rb, rc } => (Opcode::AluR, func.to_u8(), ra, rb, rc, 0),
            Instruction::AluI { func, ra, rb, imm } => (Opcode::AluI, func.to_u8(), ra, rb, Register::ZERO, imm),
            Instruction::MulDiv { func, ra, rb, rc } => (Opcode::Md, func.to_u8(), ra, rb, rc, 0),
            Instruction::Jump { func, ra, rb, imm } => (Opcode::Jump, func.to_u8(), ra, rb, Register::ZERO, imm),
            Instruction::Branch { func, ra, rb, imm } => (Opcode::Branch, func.to_u8(), ra, rb, Register::ZERO, imm),
            Instruction::Mem { func, ra, rb, imm } => (Opcode::Mem, func.to_u8(), ra, rb, Register::ZERO, imm),
        };

        Fields {
            opcode,
            function,
            reg_a: ra.index() as u8,
            reg_b: rb.index() as u8,
            reg_c: rc.index() as u8,
            imm,
        }
    }

    /// Interpret a field tuple, rejecting function tags the category does not define.
    pub fn from_fields(fields: &Fields) -> Result<Self> {
        let ra = Register::from_field(fields.reg_a as u32);
        let rb = Register::from_field(fields.reg_b as u32);
        let rc = Register::from_field(fields.reg_c as u32);
        let imm = fields.imm;
        let function = fields.function;

        let inst = match fields.opcode {
            Opcode::Ctl => Instruction::Ctl {
                func: CtlFn::decode(function)?,
                ra,
                imm,
            },
            Opcode::Io => Instruction::Io {
                func: IoFn::decode(function)?,
                ra,
                rb,
                imm,
            },
            Opcode::AluR => Instruction::AluR {
                func: AluFn::decode(function)?,
                ra,
                rb,
                rc,
            },
            Opcode::AluI => Instruction::AluI {
                func: AluFn::from_u8(function).ok_or(SpecError::InvalidFunction {
                    opcode: Opcode::AluI,
                    function,
                })?,
                ra,
                rb,
                imm,
            },
            Opcode::Md => Instruction::MulDiv {
                func: MdFn::decode(function)?,
                ra,
                rb,
                rc,
            },
            Opcode::Jump => Instruction::Jump {
                func: JumpFn::decode(function)?,
                ra,
                rb,
                imm,
            },
            Opcode::Branch => Instruction::Branch {
                func: BranchFn::decode(function)?,
                ra,
                rb,
                imm,
            },
            Opcode::Mem => Instruction::Mem {
                func: MemFn::decode(function)?,
                ra,
                rb,
                imm,
            },
        };

        Ok(inst)
    }

    pub fn encode(&self) -> Result<u32> {
        self.to_fields().encode()
    }

    pub fn decode(word: u32) -> Result<Self> {
        Self::from_fields(&Fields::decode(word))
    }
}

/// Renders the canonical assembler form, e.g. `addi r1 r0 3`.
impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mnemonic = self.mnemonic();
        match self {
            Instruction::Ctl { ra, imm, .. } => {
                if ra.is_zero() && *imm == 0 {
                    write!(f, "{}", mnemonic)
                } else {
                    write!(f, "{} {} {}", mnemonic, ra, imm)
                }
            }

            Instruction::AluR { ra, rb, rc, .. } | Instruction::MulDiv { ra, rb, rc, .. } => {
                write!(f, "{} {} {} {}", mnemonic, ra, rb, rc)
            }

            Instruction::Io { ra, rb, imm, .. }
            | Instruction::AluI { ra, rb, imm, .. }
            | Instruction::Jump { ra, rb, imm, .. }
            | Instruction::Branch { ra, rb, imm, .. }
            | Instruction::Mem { ra, rb, imm, .. } => {
                write!(f, "{} {} {} {}", mnemonic, ra, rb, imm)
            }
        }
    }
}
