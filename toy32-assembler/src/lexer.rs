//! # Lexer for toy32 Assembly Language
//!
//! Tokens are whitespace-separated; `#` starts a comment that runs to the end
//! of the line unless it appears inside a string or character literal.

use crate::error::{AssemblerError, Result};
use logos::Logos;

/// Tokens for toy32 assembly
#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
pub enum Token {
    /// Register name (`r<N>` or `pc`); the index is validated later
    #[regex(r"r[0-9]+|pc", |lex| lex.slice().to_string(), priority = 10)]
    Register(String),

    /// Numeric literal text: decimal, `0x` hex or `0b` binary
    #[regex(r"-?[0-9]+", |lex| lex.slice().to_string())]
    #[regex(r"0x[0-9a-fA-F]+", |lex| lex.slice().to_string())]
    #[regex(r"0b[01]+", |lex| lex.slice().to_string())]
    Number(String),

    /// Character literal including quotes, e.g. `'a'` or `'\n'`
    #[regex(r"'([^'\\\n]|\\[^\n]|\\x[0-9a-fA-F][0-9a-fA-F])'", |lex| lex.slice().to_string())]
    Char(String),

    /// Bare escape literal, e.g. `\n`
    #[regex(r"\\([^\s]|x[0-9a-fA-F][0-9a-fA-F])", |lex| lex.slice().to_string())]
    Escape(String),

    /// String literal including quotes
    #[regex(r#""([^"\\\n]|\\[^\n])*""#, |lex| lex.slice().to_string())]
    Str(String),

    /// Mnemonics and label references
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),

    /// Label declaration suffix
    #[token(":")]
    Colon,
}

impl Token {
    /// Source text of the token
    pub fn text(&self) -> &str {
        match self {
            Token::Register(s)
            | Token::Number(s)
            | Token::Char(s)
            | Token::Escape(s)
            | Token::Str(s)
            | Token::Identifier(s) => s,
            Token::Colon => ":",
        }
    }
}

/// Tokenize one source line. On failure returns the offending slice.
pub fn tokenize(line: &str) -> std::result::Result<Vec<Token>, String> {
    let mut lex = Token::lexer(line);
    let mut tokens = Vec::new();
    while let Some(token) = lex.next() {
        match token {
            Ok(token) => tokens.push(token),
            Err(()) => return Err(lex.slice().to_string()),
        }
    }
    Ok(tokens)
}

/// A non-empty source line after tokenizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// 1-based line number
    pub number: usize,
    /// Trimmed source text, for diagnostics
    pub text: String,
    pub tokens: Vec<Token>,
}

/// Tokenize a whole source file, dropping blank and comment-only lines
pub fn lex_source(source: &str) -> Result<Vec<SourceLine>> {
    let mut lines = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let number = index + 1;
        let tokens = tokenize(raw).map_err(|token| AssemblerError::InvalidToken { line: number, token })?;
        if tokens.is_empty() {
            continue;
        }
        lines.push(SourceLine {
            number,
            text: raw.trim().to_string(),
            tokens,
        });
    }
    Ok(lines)
}
