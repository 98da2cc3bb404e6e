//! Statement encoder
//!
//! Turns a matched statement into the bytes it contributes to the image.

use crate::error::{AssemblerError, Result};
use crate::lexer::Token;
use crate::literal::{parse_char, parse_escape, parse_number, parse_string};
use crate::parser::{Matched, Slot};
use toy32_spec::encoding::fits;
use toy32_spec::{Fields, Register};

/// Encode one matched statement found on source line `line`
pub fn encode(matched: &Matched<'_>, line: usize) -> Result<Vec<u8>> {
    let Some(group) = matched.pattern.group else {
        return encode_data(matched.operands, line);
    };

    let mut fields = Fields::new(group.opcode(), matched.function);
    let width = group.opcode().immediate_width();

    for (slot, token) in matched.pattern.slots.iter().zip(matched.operands) {
        match slot {
            Slot::RegA => fields.reg_a = register(token, line)?,
            Slot::RegB => fields.reg_b = register(token, line)?,
            Slot::RegC => fields.reg_c = register(token, line)?,
            Slot::Imm => {
                let value = immediate(token, line)?;
                if !fits(value, width) {
                    tracing::warn!(
                        line,
                        literal = token.text(),
                        width,
                        "immediate does not fit its field and will be truncated"
                    );
                }
                fields.imm = value;
            }
        }
    }

    let word = fields
        .encode()
        .map_err(|error| AssemblerError::Encoding { line, error })?;
    Ok(word.to_be_bytes().to_vec())
}

fn encode_data(operands: &[Token], line: usize) -> Result<Vec<u8>> {
    match operands {
        [Token::Str(text)] => parse_string(text).ok_or_else(|| invalid_immediate(text, line)),
        [token @ (Token::Char(_) | Token::Escape(_))] => {
            let value = immediate(token, line)?;
            u8::try_from(value)
                .map(|byte| vec![byte])
                .map_err(|_| invalid_immediate(token.text(), line))
        }
        [token @ Token::Number(_)] => Ok(immediate(token, line)?.to_be_bytes().to_vec()),
        _ => Err(AssemblerError::NoMatchingPattern {
            line,
            text: operands.iter().map(Token::text).collect::<Vec<_>>().join(" "),
        }),
    }
}

/// 5-bit register field for a register operand
fn register(token: &Token, line: usize) -> Result<u8> {
    let name = token.text();
    let register = Register::from_name(name).ok_or_else(|| AssemblerError::InvalidRegister {
        line,
        name: name.to_string(),
    })?;
    register
        .field_bits()
        .map(|bits| bits as u8)
        .map_err(|_| AssemblerError::RegisterNotEncodable {
            line,
            name: name.to_string(),
        })
}

/// Full 32-bit value of an immediate operand
fn immediate(token: &Token, line: usize) -> Result<i32> {
    let value = match token {
        Token::Number(text) => parse_number(text),
        Token::Char(text) => parse_char(text).map(|c| c as i32),
        Token::Escape(text) => parse_escape(text).map(|c| c as i32),
        _ => None,
    };
    value.ok_or_else(|| invalid_immediate(token.text(), line))
}

fn invalid_immediate(literal: &str, line: usize) -> AssemblerError {
    AssemblerError::InvalidImmediate {
        line,
        literal: literal.to_string(),
    }
}
