//! `toy32` command-line tool
//!
//! ```text
//! toy32 asm prog.s -o out.bin
//! toy32 run out.bin --max-cycles 1000000
//! toy32 disasm out.bin
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use toy32_runtime::{StdIo, VMConfig, VM};
use toy32_spec::{Program, DEFAULT_MEMORY_SIZE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log assembler passes and device activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble a source file into a binary image
    Asm {
        source: PathBuf,

        #[arg(short, long, default_value = "out.bin")]
        output: PathBuf,
    },

    /// Execute a binary image
    Run {
        binary: PathBuf,

        /// Memory size in bytes
        #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE)]
        memory_size: usize,

        /// Abort after this many instructions
        #[arg(long)]
        max_cycles: Option<u64>,

        /// Length of one SLEEP unit in milliseconds
        #[arg(long, default_value_t = 1000)]
        sleep_unit_ms: u64,

        /// Log every executed instruction
        #[arg(long)]
        trace: bool,

        /// Print the register file after the run
        #[arg(long)]
        dump: bool,
    },

    /// Print a binary image as assembly
    Disasm {
        binary: PathBuf,

        /// Emit plain source instead of an annotated listing
        #[arg(long)]
        source: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match &cli.command {
        Command::Run { trace: true, .. } => "trace",
        _ if cli.verbose => "debug",
        _ => "warn",
    };
    init_logging(level);

    match cli.command {
        Command::Asm { source, output } => asm(&source, &output),
        Command::Run {
            binary,
            memory_size,
            max_cycles,
            sleep_unit_ms,
            trace,
            dump,
        } => {
            let config = VMConfig {
                memory_size,
                max_cycles,
                sleep_unit: Duration::from_millis(sleep_unit_ms),
                trace,
            };
            run(&binary, config, dump)
        }
        Command::Disasm { binary, source } => disasm(&binary, source),
    }
}

/// `RUST_LOG` wins over the level picked from flags
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn asm(source: &Path, output: &Path) -> Result<()> {
    let text = fs::read_to_string(source).with_context(|| format!("reading {}", source.display()))?;
    let program = toy32_assembler::assemble(&text).with_context(|| format!("assembling {}", source.display()))?;
    fs::write(output, program.to_bytes()).with_context(|| format!("writing {}", output.display()))?;
    tracing::info!("wrote {} bytes to {}", program.len(), output.display());
    Ok(())
}

fn load(binary: &Path) -> Result<Program> {
    let bytes = fs::read(binary).with_context(|| format!("reading {}", binary.display()))?;
    Ok(Program::from_bytes(&bytes))
}

fn run(binary: &Path, config: VMConfig, dump: bool) -> Result<()> {
    let program = load(binary)?;
    let mut vm = VM::new(&program, StdIo, config).context("initializing VM")?;
    let outcome = vm.run();

    if dump {
        eprintln!("{}", vm.state().registers);
    }

    let result = outcome.with_context(|| format!("executing {}", binary.display()))?;
    tracing::debug!(cycles = result.cycles, pc = result.pc, "program halted");
    Ok(())
}

fn disasm(binary: &Path, source: bool) -> Result<()> {
    let program = load(binary)?;
    let text = if source {
        toy32_disassembler::to_source(&program)
    } else {
        toy32_disassembler::disassemble(&program)
    };
    print!("{}", text);
    Ok(())
}
