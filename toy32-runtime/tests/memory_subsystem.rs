//! Tests for the memory subsystem
//!
//! Big-endian layout, width handling and bounds checks, both directly on
//! `Memory` and through load/store programs.

use toy32_assembler::assemble;
use toy32_runtime::{IOHandler, Memory, RuntimeError, VMConfig, Width, VM};
use toy32_spec::Register;

fn r(index: usize) -> Register {
    Register::from_index(index).unwrap()
}

fn run_program(source: &str, memory_size: usize) -> (VM<IOHandler>, Result<(), RuntimeError>) {
    let program = assemble(source).unwrap();
    let config = VMConfig {
        memory_size,
        max_cycles: Some(10_000),
        ..VMConfig::default()
    };
    let mut vm = VM::new(&program, IOHandler::default(), config).unwrap();
    let result = vm.run().map(|_| ());
    (vm, result)
}

// ============================================================================
// Direct Access
// ============================================================================

#[test]
fn test_big_endian_layout() {
    let mut memory = Memory::new(8);
    memory.write(0, Width::Word, 0x1122_3344).unwrap();
    assert_eq!(&memory.as_bytes()[..4], [0x11, 0x22, 0x33, 0x44]);
    assert_eq!(memory.read(0, Width::Half).unwrap(), 0x1122);
    assert_eq!(memory.read(2, Width::Half).unwrap(), 0x3344);
    assert_eq!(memory.read(3, Width::Byte).unwrap(), 0x44);
}

#[test]
fn test_narrow_writes_truncate() {
    let mut memory = Memory::new(4);
    memory.write(0, Width::Byte, 0xABCD_EF12).unwrap();
    memory.write(2, Width::Half, 0xFFFF_8001).unwrap();
    assert_eq!(memory.as_bytes(), [0x12, 0x00, 0x80, 0x01]);
}

#[test]
fn test_boundary_accesses() {
    let mut memory = Memory::new(16);
    assert!(memory.write(12, Width::Word, 1).is_ok());
    assert!(memory.read(15, Width::Byte).is_ok());
    assert!(matches!(
        memory.read(13, Width::Word),
        Err(RuntimeError::MemoryFault { address: 13, width: 4, size: 16 })
    ));
    assert!(matches!(
        memory.read(-1, Width::Byte),
        Err(RuntimeError::MemoryFault { address: -1, .. })
    ));
    assert!(memory.write(16, Width::Byte, 0).is_err());
}

#[test]
fn test_faulting_write_leaves_memory() {
    let mut memory = Memory::new(4);
    memory.write(0, Width::Word, 0xDEAD_BEEF).unwrap();
    assert!(memory.write(2, Width::Word, 0).is_err());
    assert_eq!(memory.read(0, Width::Word).unwrap(), 0xDEAD_BEEF);
}

#[test]
fn test_image_loaded_at_zero() {
    let memory = Memory::with_image(8, &[1, 2, 3]).unwrap();
    assert_eq!(memory.as_bytes(), [1, 2, 3, 0, 0, 0, 0, 0]);
    assert!(Memory::with_image(2, &[1, 2, 3]).is_err());
}

// ============================================================================
// Load / Store Programs
// ============================================================================

#[test]
fn test_store_and_load_widths() {
    let source = r#"
        movi r1 0x1234
        lsi r1 r1 16
        ori r1 r1 0x5678
        sw r0 r1 100
        lw r2 r0 100
        lh r3 r0 102
        lb r4 r0 100
        halt
    "#;
    let (vm, result) = run_program(source, 256);
    result.unwrap();
    let regs = &vm.state().registers;
    assert_eq!(regs.read(r(2)), 0x1234_5678);
    assert_eq!(regs.read(r(3)), 0x5678);
    assert_eq!(regs.read(r(4)), 0x12);
}

#[test]
fn test_loads_zero_extend() {
    let source = r#"
        movi r1 -1
        sw r0 r1 200
        lb r2 r0 200
        lh r3 r0 200
        halt
    "#;
    let (vm, result) = run_program(source, 256);
    result.unwrap();
    assert_eq!(vm.state().registers.read(r(2)), 0xFF);
    assert_eq!(vm.state().registers.read(r(3)), 0xFFFF);
}

#[test]
fn test_byte_and_half_stores() {
    let source = r#"
        movi r1 0x0ABC
        movi r5 64
        sb r5 r1 0
        sh r5 r1 2
        halt
    "#;
    let (vm, result) = run_program(source, 128);
    result.unwrap();
    assert_eq!(&vm.memory().as_bytes()[64..68], [0xBC, 0x00, 0x0A, 0xBC]);
}

#[test]
fn test_negative_offset_addressing() {
    let source = r#"
        movi r1 80
        movi r2 7
        sw r1 r2 -4
        lw r3 r0 76
        halt
    "#;
    let (vm, result) = run_program(source, 128);
    result.unwrap();
    assert_eq!(vm.state().registers.read(r(3)), 7);
}

#[test]
fn test_self_modifying_code() {
    // overwrite the trailing `nop` with `outc '!'`
    let source = r#"
        lw r1 r0 template
        sw r0 r1 patch
    patch:
        nop
        halt
    template:
        outc '!'
    "#;
    let (vm, result) = run_program(source, 64);
    result.unwrap();
    assert_eq!(vm.io().output_string(), "!");
}

#[test]
fn test_store_out_of_bounds_faults() {
    let (vm, result) = run_program("movi r1 5\nsw r0 r1 62\nhalt\n", 64);
    assert!(matches!(
        result,
        Err(RuntimeError::MemoryFault { address: 62, width: 4, size: 64 })
    ));
    assert_eq!(vm.state().pc(), 4);
    assert!(!vm.state().is_halted());
}

#[test]
fn test_load_from_negative_address_faults() {
    let (vm, result) = run_program("movi r1 99\nlw r1 r0 -4\nhalt\n", 64);
    assert!(matches!(result, Err(RuntimeError::MemoryFault { address: -4, .. })));
    assert_eq!(vm.state().registers.read(r(1)), 99);
}

#[test]
fn test_out_range_checked_before_output() {
    let (vm, result) = run_program("movi r2 100\nout r0 r2\nhalt\n", 64);
    assert!(matches!(result, Err(RuntimeError::MemoryFault { .. })));
    assert!(vm.io().output().is_empty());
}
