use anyhow::{bail, Context, Result};
use clap::Parser;
use rill_runtime::ast::AST_VERSION;
use rill_runtime::{builtins, dump, Interpreter, VersionedProgram};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Rill interpreter.
///
/// Executes a program given as a JSON-serialized AST, the interchange form
/// produced by rill parser frontends.
///
/// EXAMPLES:
///     rill program.json                  Run a program
///     rill program.json --debug          Dump each node before executing
///     rill program.json --dump-symbols   Print globals after the run
#[derive(Parser)]
#[command(name = "rill")]
#[command(version)]
struct Cli {
    /// Path to the JSON-serialized program
    file: PathBuf,

    /// Print a structural dump of each top-level node before executing it
    #[arg(long)]
    debug: bool,

    /// Print the global symbol table after the run
    #[arg(long)]
    dump_symbols: bool,
}

fn load_program(cli: &Cli) -> Result<VersionedProgram> {
    let source = fs::read_to_string(&cli.file)
        .with_context(|| format!("failed to read {}", cli.file.display()))?;
    let versioned = VersionedProgram::from_json(&source)
        .with_context(|| format!("{} is not a valid rill AST dump", cli.file.display()))?;
    if versioned.ast_version != AST_VERSION {
        bail!(
            "AST version mismatch: {} carries version {}, this runtime expects {}",
            cli.file.display(),
            versioned.ast_version,
            AST_VERSION
        );
    }
    Ok(versioned)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let versioned = load_program(&cli)?;

    let mut interpreter = Interpreter::new();
    builtins::install(&mut interpreter);

    let completed = interpreter.run(&versioned.program, cli.debug);

    if cli.dump_symbols {
        print!("{}", dump::symbol_table(&interpreter));
    }

    // A failed run already rendered its traceback; only the exit code is
    // left to report.
    Ok(if completed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
