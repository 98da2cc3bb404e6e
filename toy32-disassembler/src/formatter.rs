//! Instruction formatting to assembly text

use crate::decoder::Item;
use toy32_spec::Instruction;

/// Format instruction as assembly text the assembler accepts back
pub fn format(instr: &Instruction) -> String {
    instr.to_string()
}

/// Listing text for one item: an instruction, `.word` or `.byte`
pub fn format_item(item: &Item) -> String {
    match item {
        Item::Instruction { instruction, .. } => format(instruction),
        Item::Word { word, .. } => format!(".word 0x{:08x}", word),
        Item::Byte { value, .. } => format!(".byte 0x{:02x}", value),
    }
}

/// Source statement reproducing the item's exact bytes
pub fn format_source(item: &Item) -> String {
    match item {
        // only words that re-encode identically may be shown as instructions
        Item::Instruction { word, instruction, .. } if instruction.encode() == Ok(*word) => format(instruction),
        Item::Instruction { word, .. } | Item::Word { word, .. } => format!("0x{:08x}", word),
        Item::Byte { value, .. } => format!("'\\x{:02x}'", value),
    }
}
