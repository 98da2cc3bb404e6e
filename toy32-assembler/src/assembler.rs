//! Main assembler logic

use crate::encoder::encode;
use crate::error::{AssemblerError, Result};
use crate::labels::{resolve, substitute};
use crate::lexer::{lex_source, SourceLine, Token};
use crate::parser::match_statement;
use toy32_spec::Program;

/// Assemble source code into a program image
pub fn assemble(source: &str) -> Result<Program> {
    let lines = lex_source(source)?;
    let (mut statements, labels) = resolve(lines)?;
    substitute(&mut statements, &labels);

    let mut program = Program::new();
    for statement in &statements {
        let bytes = assemble_statement(statement)?;
        program.push_bytes(&bytes);
    }

    tracing::debug!(
        statements = statements.len(),
        labels = labels.len(),
        bytes = program.len(),
        "assembled program"
    );
    Ok(program)
}

fn assemble_statement(statement: &SourceLine) -> Result<Vec<u8>> {
    match match_statement(&statement.tokens) {
        Some(matched) => encode(&matched, statement.number),
        None => Err(unmatched(statement)),
    }
}

/// Identifiers left in operand position after substitution name no label
fn unmatched(statement: &SourceLine) -> AssemblerError {
    let undefined = statement.tokens.iter().skip(1).find_map(|token| match token {
        Token::Identifier(name) => Some(name),
        _ => None,
    });

    match undefined {
        Some(name) => AssemblerError::UndefinedLabel {
            line: statement.number,
            name: name.clone(),
        },
        None => AssemblerError::NoMatchingPattern {
            line: statement.number,
            text: statement.text.clone(),
        },
    }
}
