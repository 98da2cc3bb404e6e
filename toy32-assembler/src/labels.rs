//! Label resolution and substitution
//!
//! Pass 1 walks the statements with a running byte offset and binds every
//! `name:` line to the offset of the statement that follows it. Pass 2
//! rewrites identifier operands naming a label into decimal literals.

use std::collections::HashMap;

use crate::error::{AssemblerError, Result};
use crate::lexer::{SourceLine, Token};
use crate::literal::parse_string;
use crate::parser::is_mnemonic;
use toy32_spec::INSTRUCTION_BYTES;

/// Label name to byte offset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTable {
    offsets: HashMap<String, u32>,
}

impl LabelTable {
    pub fn get(&self, name: &str) -> Option<u32> {
        self.offsets.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

/// Bytes a statement will occupy in the image
pub fn statement_size(line: &SourceLine) -> Result<u32> {
    match line.tokens.as_slice() {
        [Token::Str(text)] => parse_string(text)
            .map(|bytes| bytes.len() as u32)
            .ok_or_else(|| AssemblerError::InvalidImmediate {
                line: line.number,
                literal: text.clone(),
            }),
        [Token::Char(_)] | [Token::Escape(_)] => Ok(1),
        _ => Ok(INSTRUCTION_BYTES),
    }
}

/// Name declared by a label line, `None` for statements
fn declaration(line: &SourceLine) -> Result<Option<&str>> {
    match line.tokens.as_slice() {
        [Token::Identifier(name), Token::Colon] if is_mnemonic(name) => Err(AssemblerError::ReservedLabel {
            line: line.number,
            name: name.clone(),
        }),
        [Token::Identifier(name), Token::Colon] => Ok(Some(name.as_str())),
        [Token::Register(name), Token::Colon] => Err(AssemblerError::ReservedLabel {
            line: line.number,
            name: name.clone(),
        }),
        tokens if tokens.contains(&Token::Colon) => Err(AssemblerError::InvalidLabel {
            line: line.number,
            text: line.text.clone(),
        }),
        _ => Ok(None),
    }
}

/// Pass 1: split label lines from statements and bind each label
pub fn resolve(lines: Vec<SourceLine>) -> Result<(Vec<SourceLine>, LabelTable)> {
    let mut table = LabelTable::default();
    let mut statements = Vec::with_capacity(lines.len());
    let mut pending: Vec<String> = Vec::new();
    let mut cur: u32 = 0;

    for line in lines {
        if let Some(name) = declaration(&line)? {
            if table.offsets.contains_key(name) || pending.iter().any(|p| p == name) {
                return Err(AssemblerError::DuplicateLabel {
                    line: line.number,
                    name: name.to_string(),
                });
            }
            pending.push(name.to_string());
            continue;
        }

        let prev = cur;
        cur = cur.wrapping_add(statement_size(&line)?);
        for name in pending.drain(..) {
            table.offsets.insert(name, prev);
        }
        statements.push(line);
    }

    for name in pending {
        table.offsets.insert(name, cur);
    }

    tracing::debug!(
        statements = statements.len(),
        labels = table.len(),
        bytes = cur,
        "resolved labels"
    );
    Ok((statements, table))
}

/// Pass 2: replace label references with their decimal offsets
pub fn substitute(statements: &mut [SourceLine], table: &LabelTable) {
    for statement in statements {
        for token in &mut statement.tokens {
            if let Token::Identifier(name) = token {
                if let Some(offset) = table.get(name) {
                    *token = Token::Number(offset.to_string());
                }
            }
        }
    }
}
