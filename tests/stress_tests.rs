//! Stress tests for toy32
//!
//! Tests with large programs, many iterations, and edge cases.

use std::fmt::Write;

use toy32_assembler::assemble;
use toy32_runtime::{IOHandler, RuntimeError, VMConfig, VM};
use toy32_spec::{Instruction, Program, Register};

fn vm_for(program: &Program, max_cycles: u64) -> VM<IOHandler> {
    let config = VMConfig {
        memory_size: 64 * 1024,
        max_cycles: Some(max_cycles),
        ..VMConfig::default()
    };
    VM::new(program, IOHandler::default(), config).unwrap()
}

fn r(index: usize) -> Register {
    Register::from_index(index).unwrap()
}

// ============================================================================
// Large Program Tests
// ============================================================================

#[test]
fn test_1000_instructions() {
    let mut source = String::new();
    for _ in 0..1000 {
        source.push_str("addi r1 r1 1\n");
    }
    source.push_str("outd r1\nhalt\n");

    let program = assemble(&source).unwrap();
    assert_eq!(program.len(), 1002 * 4);

    let mut vm = vm_for(&program, 10_000);
    let result = vm.run().unwrap();
    assert_eq!(result.cycles, 1002);
    assert_eq!(vm.io().output_string(), "1000");
}

#[test]
fn test_many_labels_program() {
    let mut source = String::new();
    for i in 0..200 {
        let _ = writeln!(source, "l{i}:\nj l{}", i + 1);
    }
    source.push_str("l200:\noutc 'E'\nhalt\n");

    let program = assemble(&source).unwrap();
    let mut vm = vm_for(&program, 1_000);
    let result = vm.run().unwrap();
    assert_eq!(result.cycles, 202);
    assert_eq!(vm.io().output_string(), "E");
}

// ============================================================================
// Long Running Tests
// ============================================================================

#[test]
fn test_tight_loop_many_iterations() {
    let source = r#"
        movi r1 10000
    loop:
        subi r1 r1 1
        bne r1 r0 loop
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = vm_for(&program, 100_000);
    let result = vm.run().unwrap();
    assert_eq!(result.cycles, 1 + 2 * 10_000 + 1);
}

#[test]
fn test_nested_loops() {
    let source = r#"
        movi r1 30
    outer:
        movi r2 40
    inner:
        addi r3 r3 1
        subi r2 r2 1
        bne r2 r0 inner
        subi r1 r1 1
        bne r1 r0 outer
        outd r3
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = vm_for(&program, 100_000);
    vm.run().unwrap();
    assert_eq!(vm.io().output_string(), "1200");
}

// ============================================================================
// Cycle Limit Tests
// ============================================================================

#[test]
fn test_cycle_limit_exact() {
    let program = assemble("nop\nnop\nnop\nhalt\n").unwrap();

    let mut vm = vm_for(&program, 4);
    assert_eq!(vm.run().unwrap().cycles, 4);

    let mut vm = vm_for(&program, 3);
    assert!(matches!(vm.run(), Err(RuntimeError::CycleLimitExceeded { limit: 3 })));
    assert_eq!(vm.state().pc(), 12);
}

// ============================================================================
// Memory Stress Tests
// ============================================================================

#[test]
fn test_fill_and_sum_memory() {
    // store 1..=500 as words at 4096.., then sum them back
    let source = r#"
        movi r1 4096
        movi r2 1
        movi r3 501
    fill:
        sw r1 r2 0
        addi r1 r1 4
        addi r2 r2 1
        bne r2 r3 fill
        movi r1 4096
        movi r2 500
        movi r4 0
    sum:
        lw r5 r1 0
        add r4 r4 r5
        addi r1 r1 4
        subi r2 r2 1
        bne r2 r0 sum
        outd r4
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = vm_for(&program, 100_000);
    vm.run().unwrap();
    assert_eq!(vm.io().output_string(), "125250");
}

#[test]
fn test_last_byte_of_memory() {
    let program = assemble("movi r1 1\nlsi r1 r1 16\nsubi r1 r1 1\nmovi r2 0x7f\nsb r1 r2 0\nlb r3 r1 0\nhalt\n").unwrap();
    let mut vm = vm_for(&program, 100);
    vm.run().unwrap();
    assert_eq!(vm.state().registers.read(r(3)), 0x7f);
    assert_eq!(vm.memory().as_bytes()[65535], 0x7f);
}

// ============================================================================
// Arithmetic Stress Tests
// ============================================================================

#[test]
fn test_repeated_multiplication_wraps() {
    // 3^40 mod 2^32
    let source = r#"
        movi r1 1
        movi r2 3
        movi r3 40
    loop:
        mul r1 r1 r2
        subi r3 r3 1
        bne r3 r0 loop
        outh r1
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = vm_for(&program, 1_000);
    vm.run().unwrap();
    assert_eq!(vm.io().output_string(), format!("{:08x}", 3u32.wrapping_pow(40)));
}

#[test]
fn test_extreme_division() {
    let source = r#"
        movi r1 1
        lsi r1 r1 31
        movi r2 -1
        div r3 r1 r2
        mod r4 r1 r2
        outd r3
        outc ' '
        outd r4
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = vm_for(&program, 100);
    vm.run().unwrap();
    assert_eq!(vm.io().output_string(), "-2147483648 0");
}

// ============================================================================
// IO Stress Tests
// ============================================================================

#[test]
fn test_many_io_operations() {
    let source = r#"
        movi r1 0
        movi r2 256
    loop:
        outc r1 'a'
        addi r1 r1 1
        movi r3 26
        mod r1 r1 r3
        subi r2 r2 1
        bne r2 r0 loop
        halt
    "#;
    let program = assemble(source).unwrap();
    let mut vm = vm_for(&program, 10_000);
    vm.run().unwrap();

    let expected: String = (0..256).map(|i| (b'a' + (i % 26) as u8) as char).collect();
    assert_eq!(vm.io().output_string(), expected);
}

#[test]
fn test_large_input_block() {
    let input: Vec<u8> = (0..=255u8).cycle().take(4000).collect();
    let program = assemble("movi r1 1000\nmovi r2 5000\nin r1 r2 0\nout r1 r2\nhalt\n").unwrap();
    let config = VMConfig {
        memory_size: 8000,
        ..VMConfig::default()
    };
    let mut vm = VM::new(&program, IOHandler::new(input.clone()), config).unwrap();
    vm.run().unwrap();
    assert_eq!(&vm.memory().as_bytes()[1000..5000], &input[..]);
}

// ============================================================================
// Edge Case Tests
// ============================================================================

#[test]
fn test_register_zero_survives_everything() {
    let writes: Vec<u32> = [
        Instruction::AluI { func: toy32_spec::AluFn::Add, ra: r(0), rb: r(0), imm: 123 },
        Instruction::Jump { func: toy32_spec::JumpFn::Jal, ra: r(0), rb: r(0), imm: 8 },
        Instruction::HALT,
    ]
    .iter()
    .map(|inst| inst.encode().unwrap())
    .collect();

    let program = Program::from_words(&writes);
    let mut vm = vm_for(&program, 10);
    vm.run().unwrap();
    assert_eq!(vm.state().registers.read(r(0)), 0);
}
