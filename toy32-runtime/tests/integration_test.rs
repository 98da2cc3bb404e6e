//! Integration tests for the toy32 runtime
//!
//! Programs are written in assembly and run against in-memory devices.

use std::time::Duration;

use toy32_assembler::assemble;
use toy32_runtime::{ExecState, IOHandler, RuntimeError, VMConfig, VM};
use toy32_spec::Register;

fn r(index: usize) -> Register {
    Register::from_index(index).unwrap()
}

fn vm_with(source: &str, input: &str) -> VM<IOHandler> {
    let program = assemble(source).unwrap();
    let config = VMConfig {
        max_cycles: Some(100_000),
        ..VMConfig::default()
    };
    VM::new(&program, IOHandler::new(input), config).unwrap()
}

fn run(source: &str) -> (VM<IOHandler>, String) {
    let mut vm = vm_with(source, "");
    vm.run().unwrap();
    let output = vm.io().output_string();
    (vm, output)
}

// ============================================================================
// Arithmetic
// ============================================================================

#[test]
fn test_add_and_print() {
    let (vm, output) = run("addi r1 r0 3\naddi r2 r0 4\nadd r3 r1 r2\noutd r3\nhalt\n");
    assert_eq!(output, "7");
    assert_eq!(vm.state().pc(), 20);
    assert_eq!(vm.state().cycles, 5);
    assert_eq!(vm.state().state, ExecState::Halted);
}

#[test]
fn test_countdown_loop() {
    let source = r#"
        movi r1 5
    loop:
        outd r1
        subi r1 r1 1
        bne r1 r0 loop
        halt
    "#;
    let (_, output) = run(source);
    assert_eq!(output, "54321");
}

#[test]
fn test_factorial() {
    let source = r#"
        movi r1 1
        movi r2 6
    loop:
        mul r1 r1 r2
        subi r2 r2 1
        blt r0 r2 loop
        outd r1
        halt
    "#;
    let (_, output) = run(source);
    assert_eq!(output, "720");
}

#[test]
fn test_signed_division_and_modulo() {
    let source = r#"
        movi r1 -7
        movi r2 2
        div r3 r1 r2
        mod r4 r1 r2
        outd r3
        outc ' '
        outd r4
        halt
    "#;
    let (_, output) = run(source);
    assert_eq!(output, "-3 -1");
}

#[test]
fn test_shifts_and_logic() {
    let source = r#"
        movi r1 1
        lsi r2 r1 31
        rsi r3 r2 31
        ori r4 r0 0xf0
        andi r5 r4 0x3c
        xori r6 r5 0xff
        outh r2
        outc ' '
        outd r3
        outc ' '
        outb r6
        halt
    "#;
    let (_, output) = run(source);
    assert_eq!(output, format!("80000000 1 {:032b}", 0xcfu32));
}

#[test]
fn test_r0_is_immutable() {
    let (vm, _) = run("addi r0 r0 99\nmov r1 r0\nhalt\n");
    assert_eq!(vm.state().registers.read(r(0)), 0);
    assert_eq!(vm.state().registers.read(r(1)), 0);
}

// ============================================================================
// Control Flow
// ============================================================================

#[test]
fn test_subroutine_call_and_return() {
    let source = r#"
        jal r31 r0 subroutine
        outc 'b'
        halt
    subroutine:
        outc 'a'
        j r0 r31 4
    "#;
    let (vm, output) = run(source);
    assert_eq!(output, "ab");
    assert_eq!(vm.state().registers.read(r(31)), 0);
}

#[test]
fn test_relative_jump_through_link() {
    // ra == rb: the link is written first, so the target is relative to this jump
    let (_, output) = run("nop\nj r5 r5 8\nouth r0\noutc 'y'\nhalt\n");
    assert_eq!(output, "y");
}

#[test]
fn test_branch_not_taken_falls_through() {
    let (_, output) = run("movi r1 1\nbeq r1 r0 12\noutc 'n'\nhalt\noutc 't'\nhalt\n");
    assert_eq!(output, "n");
}

#[test]
fn test_signed_comparison() {
    let (_, output) = run("movi r1 -1\nbge r1 r0 12\noutc '<'\nhalt\noutc '>'\nhalt\n");
    assert_eq!(output, "<");
}

#[test]
fn test_greater_and_less_equal_branches() {
    let source = r#"
        movi r1 5
        movi r2 3
        bgt r1 r2 taken
        outc 'n'
    taken:
        ble r2 r1 also
        outc 'n'
    also:
        ble r1 r1 equal
        outc 'n'
    equal:
        bgt r2 r1 wrong
        outc 'y'
        halt
    wrong:
        outc 'w'
        halt
    "#;
    let (_, output) = run(source);
    assert_eq!(output, "y");
}

// ============================================================================
// Devices
// ============================================================================

#[test]
fn test_hello_world_from_data() {
    let source = r#"
        movi r1 msg
        movi r2 end
        out r1 r2
        halt
    msg:
        "Hello\n"
    end:
    "#;
    let (_, output) = run(source);
    assert_eq!(output, "Hello\n");
}

#[test]
fn test_out_interprets_raw_escapes() {
    // A single-byte backslash and an `n` stored separately are printed as a newline
    let source = r#"
        movi r1 text
        movi r2 end
        out r1 r2
        halt
    text:
        '\\'
        'n'
    end:
    "#;
    let (_, output) = run(source);
    assert_eq!(output, "\n");
}

#[test]
fn test_echo_input() {
    let source = r#"
        movi r1 buf
        movi r2 buf
        addi r2 r2 3
        in r1 r2 0
        out r1 r2
        halt
    buf:
        0
    "#;
    let mut vm = vm_with(source, "abcdef");
    vm.run().unwrap();
    assert_eq!(vm.io().output_string(), "abc");
    assert_eq!(vm.io().remaining_input(), 3);
}

#[test]
fn test_single_byte_input() {
    let source = r#"
        in r0 r0 buf
        lb r1 r0 buf
        outd r1
        halt
    buf:
        0
    "#;
    let mut vm = vm_with(source, "A");
    vm.run().unwrap();
    assert_eq!(vm.io().output_string(), "65");
}

#[test]
fn test_integer_input() {
    let mut vm = vm_with("ind r1\nind r2\nadd r3 r1 r2\noutd r3\nhalt\n", " 40\n2\n");
    vm.run().unwrap();
    assert_eq!(vm.io().output_string(), "42");
}

#[test]
fn test_integer_input_rejects_garbage() {
    let mut vm = vm_with("ind r1\nhalt\n", "forty\n");
    let err = vm.run().unwrap_err();
    assert!(matches!(err, RuntimeError::InputFormat { ref input } if input == "forty"));
}

#[test]
fn test_input_exhausted() {
    let mut vm = vm_with("in r0 r0 100\nhalt\n", "");
    assert!(matches!(vm.run(), Err(RuntimeError::Io(_))));
    assert_eq!(vm.state().pc(), 0);
}

#[test]
fn test_clear_and_sleep() {
    let program = assemble("outc 'x'\ncl\nmovi r1 2\nsleep r1 1\nsleep -5\noutc 'y'\nhalt\n").unwrap();
    let config = VMConfig {
        sleep_unit: Duration::from_millis(10),
        ..VMConfig::default()
    };
    let mut vm = VM::new(&program, IOHandler::default(), config).unwrap();
    vm.run().unwrap();

    assert_eq!(vm.io().clears(), 1);
    assert_eq!(vm.io().output_string(), "y");
    assert_eq!(vm.io().delays(), [Duration::from_millis(30), Duration::ZERO]);
}

// ============================================================================
// Faults
// ============================================================================

#[test]
fn test_division_by_zero_is_fatal() {
    let mut vm = vm_with("movi r1 1\ndiv r2 r1 r0\nhalt\n", "");
    let err = vm.run().unwrap_err();
    assert!(matches!(err, RuntimeError::DivisionByZero { pc: 4 }));
    assert_eq!(vm.state().pc(), 4);
    assert_eq!(vm.state().state, ExecState::Running);
}

#[test]
fn test_running_off_the_end() {
    let program = assemble("nop").unwrap();
    let config = VMConfig {
        memory_size: 4,
        ..VMConfig::default()
    };
    let mut vm = VM::new(&program, IOHandler::default(), config).unwrap();
    assert!(matches!(
        vm.run(),
        Err(RuntimeError::MemoryFault { address: 4, width: 4, size: 4 })
    ));
}

#[test]
fn test_infinite_loop_hits_cycle_limit() {
    let program = assemble("spin:\nj spin\n").unwrap();
    let config = VMConfig {
        max_cycles: Some(50),
        ..VMConfig::default()
    };
    let mut vm = VM::new(&program, IOHandler::default(), config).unwrap();
    assert!(matches!(vm.run(), Err(RuntimeError::CycleLimitExceeded { limit: 50 })));
    assert_eq!(vm.state().cycles, 50);
}
