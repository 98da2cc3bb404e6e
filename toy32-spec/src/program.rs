//! toy32 program image
//!
//! A flat byte blob loaded at address 0. There is no header: instructions
//! and raw data are indistinguishable at the byte level, and word alignment
//! of instructions is a convention only.

use crate::INSTRUCTION_BYTES;
use serde::{Deserialize, Serialize};

/// Assembled program image
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Program {
    pub bytes: Vec<u8>,
}

impl Program {
    /// Create a new empty program
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bytes: bytes.to_vec(),
        }
    }

    /// Build an image from big-endian instruction words
    pub fn from_words(words: &[u32]) -> Self {
        let mut program = Self::new();
        for &word in words {
            program.push_word(word);
        }
        program
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn push_word(&mut self, word: u32) {
        self.bytes.extend_from_slice(&word.to_be_bytes());
    }

    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Big-endian words at each 4-byte-aligned address, with their address.
    /// A trailing partial word is not yielded; see [`Program::tail`].
    pub fn words(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.bytes
            .chunks_exact(INSTRUCTION_BYTES as usize)
            .enumerate()
            .map(|(i, chunk)| {
                let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                (i as u32 * INSTRUCTION_BYTES, word)
            })
    }

    /// Bytes after the last whole word
    pub fn tail(&self) -> &[u8] {
        let whole = self.bytes.len() / INSTRUCTION_BYTES as usize * INSTRUCTION_BYTES as usize;
        &self.bytes[whole..]
    }
}

impl From<Vec<u8>> for Program {
    fn from(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }
}
