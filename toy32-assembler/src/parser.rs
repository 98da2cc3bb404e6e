//! Statement grammar
//!
//! An ordered table of operand-shape patterns. A statement is classified by
//! its token kinds and the first pattern whose mnemonic group and shape both
//! match is authoritative. Patterns without a mnemonic group are raw data
//! statements.

use crate::lexer::Token;
use toy32_spec::{AluFn, BranchFn, CtlFn, IoFn, JumpFn, MdFn, MemFn, Opcode};

/// Operand kind in a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// `r<N>` or `pc`
    Reg,
    /// Numeric literal
    Num,
    /// Character or bare escape literal
    Chr,
    /// String literal
    Str,
    /// Numeric, character or escape literal
    Imm,
}

impl Kind {
    fn of(token: &Token) -> Option<Kind> {
        match token {
            Token::Register(_) => Some(Kind::Reg),
            Token::Number(_) => Some(Kind::Num),
            Token::Char(_) | Token::Escape(_) => Some(Kind::Chr),
            Token::Str(_) => Some(Kind::Str),
            Token::Identifier(_) | Token::Colon => None,
        }
    }

    fn accepts(self, token: &Token) -> bool {
        match (self, Kind::of(token)) {
            (Kind::Imm, Some(Kind::Num | Kind::Chr)) => true,
            (expected, Some(found)) => expected == found,
            (_, None) => false,
        }
    }
}

/// Instruction field an operand is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    RegA,
    RegB,
    RegC,
    Imm,
}

/// Mnemonic table a pattern draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Group {
    Ctl,
    Io,
    AluR,
    /// `mov ra rb` = `add ra rb r0`
    Mov,
    AluI,
    /// `movi ra imm` = `addi ra r0 imm`
    Movi,
    Md,
    /// `jalr` = `jal`
    Jump,
    Branch,
    /// `bgt ra rb imm` = `blt rb ra imm`, `ble ra rb imm` = `bge rb ra imm`
    SwappedBranch,
    Mem,
}

impl Group {
    pub const ALL: [Group; 11] = [
        Group::Ctl,
        Group::Io,
        Group::AluR,
        Group::Mov,
        Group::AluI,
        Group::Movi,
        Group::Md,
        Group::Jump,
        Group::Branch,
        Group::SwappedBranch,
        Group::Mem,
    ];

    pub fn opcode(self) -> Opcode {
        match self {
            Group::Ctl => Opcode::Ctl,
            Group::Io => Opcode::Io,
            Group::AluR | Group::Mov => Opcode::AluR,
            Group::AluI | Group::Movi => Opcode::AluI,
            Group::Md => Opcode::Md,
            Group::Jump => Opcode::Jump,
            Group::Branch | Group::SwappedBranch => Opcode::Branch,
            Group::Mem => Opcode::Mem,
        }
    }

    /// `(mnemonic, function tag)` pairs of this group
    pub fn mnemonics(self) -> Vec<(&'static str, u8)> {
        match self {
            Group::Ctl => CtlFn::ALL.iter().map(|f| (f.mnemonic(), f.to_u8())).collect(),
            Group::Io => IoFn::ALL.iter().map(|f| (f.mnemonic(), f.to_u8())).collect(),
            Group::AluR => AluFn::ALL.iter().map(|f| (f.mnemonic(), f.to_u8())).collect(),
            Group::Mov => vec![("mov", AluFn::Add.to_u8())],
            Group::AluI => AluFn::ALL
                .iter()
                .map(|f| (f.immediate_mnemonic(), f.to_u8()))
                .collect(),
            Group::Movi => vec![("movi", AluFn::Add.to_u8())],
            Group::Md => MdFn::ALL.iter().map(|f| (f.mnemonic(), f.to_u8())).collect(),
            Group::Jump => JumpFn::ALL
                .iter()
                .map(|f| (f.mnemonic(), f.to_u8()))
                .chain([("jalr", JumpFn::Jal.to_u8())])
                .collect(),
            Group::Branch => BranchFn::ALL.iter().map(|f| (f.mnemonic(), f.to_u8())).collect(),
            Group::SwappedBranch => vec![("bgt", BranchFn::Lt.to_u8()), ("ble", BranchFn::Ge.to_u8())],
            Group::Mem => MemFn::ALL.iter().map(|f| (f.mnemonic(), f.to_u8())).collect(),
        }
    }

    /// Function tag for `mnemonic`, if this group defines it
    pub fn function(self, mnemonic: &str) -> Option<u8> {
        self.mnemonics()
            .into_iter()
            .find(|(name, _)| *name == mnemonic)
            .map(|(_, function)| function)
    }
}

/// Whether `name` is a mnemonic in any group
pub fn is_mnemonic(name: &str) -> bool {
    Group::ALL.iter().any(|group| group.function(name).is_some())
}

/// One grammar entry
#[derive(Debug)]
pub struct Pattern {
    /// `None` for raw data statements
    pub group: Option<Group>,
    /// Operand kinds, after the mnemonic
    pub shape: &'static [Kind],
    /// Destination of each operand; unlisted fields stay zero
    pub slots: &'static [Slot],
}

const fn data(shape: &'static [Kind]) -> Pattern {
    Pattern {
        group: None,
        shape,
        slots: &[],
    }
}

const fn inst(group: Group, shape: &'static [Kind], slots: &'static [Slot]) -> Pattern {
    Pattern {
        group: Some(group),
        shape,
        slots,
    }
}

use Kind::{Chr, Imm, Num, Reg, Str};
use Slot::{Imm as I, RegA as A, RegB as B, RegC as C};

/// The grammar, in priority order
pub static GRAMMAR: &[Pattern] = &[
    // raw data
    data(&[Str]),
    data(&[Chr]),
    data(&[Num]),
    // CTL
    inst(Group::Ctl, &[], &[]),
    inst(Group::Ctl, &[Imm], &[I]),
    inst(Group::Ctl, &[Reg, Imm], &[A, I]),
    // IO
    inst(Group::Io, &[Reg, Reg, Imm], &[A, B, I]),
    inst(Group::Io, &[Reg, Reg], &[A, B]),
    inst(Group::Io, &[Reg, Imm], &[A, I]),
    inst(Group::Io, &[Reg], &[A]),
    inst(Group::Io, &[Imm], &[I]),
    inst(Group::Io, &[], &[]),
    // ALU
    inst(Group::AluR, &[Reg, Reg, Reg], &[A, B, C]),
    inst(Group::Mov, &[Reg, Reg], &[A, B]),
    inst(Group::AluI, &[Reg, Reg, Imm], &[A, B, I]),
    inst(Group::Movi, &[Reg, Imm], &[A, I]),
    inst(Group::Md, &[Reg, Reg, Reg], &[A, B, C]),
    // control transfer
    inst(Group::Jump, &[Reg, Reg, Imm], &[A, B, I]),
    inst(Group::Jump, &[Reg, Imm], &[A, I]),
    inst(Group::Jump, &[Imm], &[I]),
    inst(Group::Branch, &[Reg, Reg, Imm], &[A, B, I]),
    inst(Group::SwappedBranch, &[Reg, Reg, Imm], &[B, A, I]),
    // memory
    inst(Group::Mem, &[Reg, Reg, Imm], &[A, B, I]),
];

/// A statement matched against a grammar pattern
#[derive(Debug)]
pub struct Matched<'a> {
    pub pattern: &'static Pattern,
    /// Function tag selected by the mnemonic (0 for data)
    pub function: u8,
    pub operands: &'a [Token],
}

/// Find the first pattern matching `tokens`
pub fn match_statement(tokens: &[Token]) -> Option<Matched<'_>> {
    GRAMMAR.iter().find_map(|pattern| {
        let (function, operands) = match pattern.group {
            None => (0, tokens),
            Some(group) => match tokens.split_first() {
                Some((Token::Identifier(mnemonic), rest)) => (group.function(mnemonic)?, rest),
                _ => return None,
            },
        };

        let shape_matches = operands.len() == pattern.shape.len()
            && pattern
                .shape
                .iter()
                .zip(operands)
                .all(|(kind, token)| kind.accepts(token));

        shape_matches.then_some(Matched {
            pattern,
            function,
            operands,
        })
    })
}
