//! # toy32 Opcode and Function Definitions
//!
//! The opcode (bits 31-29) selects an instruction category; the function tag
//! (bits 28-26) selects an operation within that category.
//!
//! ## Opcode Encoding
//!
//! - 0b000: CTL    (halt, nop, sleep)
//! - 0b001: IO     (device input/output)
//! - 0b010: ALUR   (register-register ALU)
//! - 0b011: ALUI   (register-immediate ALU)
//! - 0b100: MD     (multiply/divide/modulo)
//! - 0b101: JUMP
//! - 0b110: BRANCH
//! - 0b111: MEM    (loads and stores)

use crate::error::{Result, SpecError};
use serde::{Deserialize, Serialize};

/// Instruction category (3 bits)
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Opcode {
    /// Halt, no-op, sleep
    #[default]
    Ctl = 0b000,
    /// Device read/write variants
    Io = 0b001,
    /// reg_a = alu(reg_b, reg_c)
    AluR = 0b010,
    /// reg_a = alu(reg_b, imm)
    AluI = 0b011,
    /// reg_a = muldiv(reg_b, reg_c)
    Md = 0b100,
    /// reg_a = pc; pc = reg_b + imm
    Jump = 0b101,
    /// if cond(reg_a, reg_b) pc = imm
    Branch = 0b110,
    /// Loads and stores
    Mem = 0b111,
}

impl Opcode {
    /// Opcode mask (0b111 for 3 bits)
    pub const MASK: u32 = 0b111;

    /// All opcodes in tag order
    pub const ALL: [Opcode; 8] = [
        Opcode::Ctl,
        Opcode::Io,
        Opcode::AluR,
        Opcode::AluI,
        Opcode::Md,
        Opcode::Jump,
        Opcode::Branch,
        Opcode::Mem,
    ];

    /// Try to convert from u8
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0b000 => Some(Opcode::Ctl),
            0b001 => Some(Opcode::Io),
            0b010 => Some(Opcode::AluR),
            0b011 => Some(Opcode::AluI),
            0b100 => Some(Opcode::Md),
            0b101 => Some(Opcode::Jump),
            0b110 => Some(Opcode::Branch),
            0b111 => Some(Opcode::Mem),
            _ => None,
        }
    }

    /// Opcode from the low 3 bits of `bits`; every pattern is a valid category
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Self::ALL[(bits & Self::MASK) as usize]
    }

    /// Convert to u8
    #[inline]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Operand layout used by this category
    #[inline]
    pub const fn layout(self) -> Layout {
        match self {
            Opcode::Ctl => Layout::W,
            Opcode::AluR | Opcode::Md => Layout::R,
            Opcode::Io | Opcode::AluI | Opcode::Jump | Opcode::Branch | Opcode::Mem => Layout::I,
        }
    }

    /// Width of the immediate field in bits (0 when the layout has none)
    #[inline]
    pub const fn immediate_width(self) -> u32 {
        self.layout().immediate_width()
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Opcode::Ctl => "ctl",
            Opcode::Io => "io",
            Opcode::AluR => "alur",
            Opcode::AluI => "alui",
            Opcode::Md => "md",
            Opcode::Jump => "jump",
            Opcode::Branch => "branch",
            Opcode::Mem => "mem",
        };
        write!(f, "{}", name)
    }
}

/// Field layout of an instruction word
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layout {
    /// reg_a, reg_b, reg_c
    R,
    /// reg_a, reg_b, 16-bit immediate
    I,
    /// reg_a, 21-bit immediate overlapping reg_b/reg_c
    W,
}

impl Layout {
    #[inline]
    pub const fn immediate_width(self) -> u32 {
        match self {
            Layout::R => 0,
            Layout::I => 16,
            Layout::W => 21,
        }
    }

    #[inline]
    pub const fn has_reg_b(self) -> bool {
        matches!(self, Layout::R | Layout::I)
    }

    #[inline]
    pub const fn has_reg_c(self) -> bool {
        matches!(self, Layout::R)
    }
}

/// Defines a function-tag enum with conversions and canonical mnemonics.
macro_rules! function_tags {
    (
        $(#[$meta:meta])*
        $name:ident for $opcode:path {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal => $mnemonic:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[repr(u8)]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// Every function tag of this category
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Opcode this function tag belongs to
            pub const OPCODE: Opcode = $opcode;

            pub fn from_u8(value: u8) -> Option<Self> {
                match value {
                    $( $value => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Decode a function tag, rejecting values with no meaning in this category
            pub fn decode(value: u8) -> Result<Self> {
                Self::from_u8(value).ok_or(SpecError::InvalidFunction {
                    opcode: Self::OPCODE,
                    function: value,
                })
            }

            #[inline]
            pub const fn to_u8(self) -> u8 {
                self as u8
            }

            /// Canonical assembler mnemonic
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $( $name::$variant => $mnemonic, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.mnemonic())
            }
        }
    };
}

function_tags! {
    /// CTL functions
    CtlFn for Opcode::Ctl {
        /// Stop execution
        Halt = 0b000 => "halt",
        /// Advance pc only
        Nop = 0b001 => "nop",
        /// Delay for reg_a + imm time units
        Sleep = 0b010 => "sleep",
    }
}

function_tags! {
    /// IO functions (x = reg_a, y = reg_b, z = imm)
    IoFn for Opcode::Io {
        /// Read bytes into memory at x + z
        In = 0b000 => "in",
        /// Write memory [x + z, y) with escape interpretation
        Out = 0b001 => "out",
        /// Write x + z as signed decimal
        OutD = 0b010 => "outd",
        /// Write x + z as 32 binary digits
        OutB = 0b011 => "outb",
        /// Write x + z as 8 hex digits
        OutH = 0b100 => "outh",
        /// Write the character with code point x + z
        OutC = 0b101 => "outc",
        /// Clear the output device
        Cl = 0b110 => "cl",
        /// Read a decimal integer line into reg_a
        InD = 0b111 => "ind",
    }
}

function_tags! {
    /// ALU functions shared by ALUR and ALUI
    AluFn for Opcode::AluR {
        Add = 0b000 => "add",
        Sub = 0b001 => "sub",
        And = 0b010 => "and",
        Or = 0b011 => "or",
        Xor = 0b100 => "xor",
        /// Logical left shift
        Ls = 0b101 => "ls",
        /// Logical right shift
        Rs = 0b110 => "rs",
    }
}

function_tags! {
    /// Multiply/divide functions
    MdFn for Opcode::Md {
        Mul = 0b000 => "mul",
        /// Truncating toward zero
        Div = 0b001 => "div",
        /// Remainder with the dividend's sign
        Mod = 0b010 => "mod",
    }
}

function_tags! {
    /// Jump functions. Both variants write the link register.
    JumpFn for Opcode::Jump {
        J = 0b000 => "j",
        Jal = 0b001 => "jal",
    }
}

function_tags! {
    /// Branch conditions (signed comparisons)
    BranchFn for Opcode::Branch {
        Eq = 0b000 => "beq",
        Ne = 0b001 => "bne",
        Lt = 0b010 => "blt",
        Ge = 0b011 => "bge",
    }
}

function_tags! {
    /// Memory access functions
    MemFn for Opcode::Mem {
        Lw = 0b000 => "lw",
        Lb = 0b001 => "lb",
        Lh = 0b010 => "lh",
        Sw = 0b011 => "sw",
        Sb = 0b100 => "sb",
        Sh = 0b101 => "sh",
    }
}

impl MemFn {
    /// Access width in bytes
    pub const fn width(self) -> u32 {
        match self {
            MemFn::Lw | MemFn::Sw => 4,
            MemFn::Lh | MemFn::Sh => 2,
            MemFn::Lb | MemFn::Sb => 1,
        }
    }

    pub const fn is_store(self) -> bool {
        matches!(self, MemFn::Sw | MemFn::Sb | MemFn::Sh)
    }
}

impl AluFn {
    /// Mnemonic of the register-immediate form
    pub const fn immediate_mnemonic(self) -> &'static str {
        match self {
            AluFn::Add => "addi",
            AluFn::Sub => "subi",
            AluFn::And => "andi",
            AluFn::Or => "ori",
            AluFn::Xor => "xori",
            AluFn::Ls => "lsi",
            AluFn::Rs => "rsi",
        }
    }
}
