//! Main disassembler logic

use crate::decoder::{decode_program, Item};
use crate::formatter::{format_item, format_source};
use toy32_spec::Program;

/// Disassemble a program into an annotated listing.
///
/// Each line is `address:  raw  text`; words that do not decode are shown
/// as `.word`, trailing bytes as `.byte`.
pub fn disassemble(program: &Program) -> String {
    let mut output = String::new();

    output.push_str("# toy32 disassembly\n");
    output.push_str(&format!("# {} bytes, {} words\n", program.len(), program.words().count()));

    for item in decode_program(program) {
        let raw = match item {
            Item::Instruction { word, .. } | Item::Word { word, .. } => format!("{:08x}", word),
            Item::Byte { value, .. } => format!("{:02x}", value),
        };
        output.push_str(&format!("0x{:08x}:  {:<8}  {}\n", item.address(), raw, format_item(&item)));
    }

    output
}

/// Render a program as assembly source that reassembles to the same bytes
pub fn to_source(program: &Program) -> String {
    decode_program(program)
        .iter()
        .map(|item| format_source(item) + "\n")
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disassemble_simple() {
        let program = Program::from_words(&[0x6020_0003, 0x0000_0000]);
        let asm = disassemble(&program);

        assert!(asm.contains("0x00000000:  60200003  addi r1 r0 3"));
        assert!(asm.contains("0x00000004:  00000000  halt"));
        assert!(asm.contains("8 bytes, 2 words"));
    }

    #[test]
    fn test_disassemble_data() {
        let mut program = Program::from_words(&[0xFFFF_FFFF]);
        program.push_bytes(b"!");
        let asm = disassemble(&program);

        assert!(asm.contains(".word 0xffffffff"));
        assert!(asm.contains("0x00000004:  21        .byte 0x21"));
    }

    #[test]
    fn test_one_line_per_item() {
        let mut program = Program::from_words(&[0x0400_0000, 0x0000_0000]);
        program.push_bytes(b"ab");
        let asm = disassemble(&program);

        assert!(asm.ends_with('\n'));
        assert_eq!(asm.lines().count(), 2 + 4);
        assert_eq!(asm.lines().nth(1), Some("# 10 bytes, 2 words"));
    }

    #[test]
    fn test_to_source() {
        let mut program = Program::from_words(&[0x0400_0000, 0xFFFF_FFFF]);
        program.push_bytes(&[0x0A]);
        assert_eq!(to_source(&program), "nop\n0xffffffff\n'\\x0a'\n");
    }

    #[test]
    fn test_empty_program() {
        assert_eq!(to_source(&Program::new()), "");
        assert!(disassemble(&Program::new()).contains("0 bytes"));
    }
}
