use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use stackcalc_parser::limits::{DEFAULT_MAX_LENGTH, DEFAULT_MAX_NESTING};
use stackcalc_parser::ParseLimits;
use stackcalc_vm::{compile_with_limits, disassemble, CompiledUnit, VM};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod diagnostics;

use diagnostics::Diagnostic;

/// stackcalc - infix integer expressions compiled for a stack machine
#[derive(Parser)]
#[command(name = "stackcalc")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Compile infix integer expressions to stack machine code", long_about = "stackcalc\n\nTools for working with infix integer expressions:\n  - Precedence normalization\n  - Compilation to stack machine units\n  - Disassembly and execution")]
struct Cli {
    /// Maximum expression length in bytes
    #[arg(long, global = true, env = "STACKCALC_MAX_LENGTH", default_value_t = DEFAULT_MAX_LENGTH)]
    max_length: usize,

    /// Maximum parenthesis nesting depth
    #[arg(long, global = true, env = "STACKCALC_MAX_NESTING", default_value_t = DEFAULT_MAX_NESTING)]
    max_nesting: usize,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and execute an expression
    Eval {
        /// Expression to evaluate
        expression: String,
        /// Parameter binding, declared in the order given
        #[arg(short, long = "arg", value_name = "NAME=VALUE", value_parser = parse_binding)]
        args: Vec<(String, i64)>,
    },
    /// Print the fully-bracketed form of an expression
    Normalize {
        /// Expression to normalize
        expression: String,
    },
    /// Compile an expression and show the resulting unit
    Compile {
        #[command(flatten)]
        unit: UnitArgs,
        /// Output the unit as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the instruction listing of a compiled expression
    Disassemble {
        #[command(flatten)]
        unit: UnitArgs,
    },
    /// Check that an expression compiles without executing it
    Check {
        #[command(flatten)]
        unit: UnitArgs,
        /// Report diagnostics as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct UnitArgs {
    /// Expression to compile
    expression: String,
    /// Declared parameter, in slot order
    #[arg(short, long = "param", value_name = "NAME")]
    params: Vec<String>,
    /// Unit name
    #[arg(short, long, default_value = "Eval")]
    name: String,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let limits = ParseLimits::new(cli.max_length, cli.max_nesting);
    debug!(max_length = limits.max_length, max_nesting = limits.max_nesting, "limits");

    let result = match cli.command {
        Commands::Eval { expression, args } => eval_command(&expression, &args, &limits),
        Commands::Normalize { expression } => normalize_command(&expression, &limits),
        Commands::Compile { unit, json } => compile_command(&unit, json, &limits),
        Commands::Disassemble { unit } => disassemble_command(&unit, &limits),
        Commands::Check { unit, json } => check_command(&unit, json, &limits),
    };

    if let Err(err) = result {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

/// Initialize logging on stderr.
///
/// `RUST_LOG` overrides the level chosen by `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_binding(raw: &str) -> Result<(String, i64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", raw))?;
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("invalid value for '{}': {}", name, err))?;
    Ok((name.trim().to_string(), value))
}

/// Compile, turning a failure into a rendered caret diagnostic
fn build_unit(
    expression: &str,
    params: &[String],
    name: &str,
    limits: &ParseLimits,
) -> Result<CompiledUnit> {
    compile_with_limits(expression, params, name, limits).map_err(|err| {
        anyhow!(Diagnostic::from_compile_error(expression, &err).render(expression))
    })
}

fn eval_command(expression: &str, args: &[(String, i64)], limits: &ParseLimits) -> Result<()> {
    let (params, values): (Vec<String>, Vec<i64>) = args.iter().cloned().unzip();
    let unit = build_unit(expression, &params, "Eval", limits)?;

    let mut vm = VM::new();
    let result = vm
        .execute(&unit, &values)
        .with_context(|| format!("failed to evaluate '{}'", expression))?;
    println!("{}", result);
    Ok(())
}

fn normalize_command(expression: &str, limits: &ParseLimits) -> Result<()> {
    let normalized = stackcalc_parser::normalize_with_limits(expression, limits).map_err(|err| {
        anyhow!(Diagnostic::from_parse_error(expression, &err).render(expression))
    })?;
    println!("{}", normalized);
    Ok(())
}

fn compile_command(args: &UnitArgs, json: bool, limits: &ParseLimits) -> Result<()> {
    let unit = build_unit(&args.expression, &args.params[..], &args.name, limits)?;

    if json {
        let text = serde_json::to_string_pretty(&unit).context("failed to serialize unit")?;
        println!("{}", text);
        return Ok(());
    }

    println!("Unit: {}", unit.name());
    println!("  Parameters: {}", unit.params().join(", "));
    println!("  Instructions: {}", unit.code().len());
    println!("  Max stack depth: {}", unit.max_stack_depth());
    println!("  Locals: {}", unit.local_count());
    Ok(())
}

fn disassemble_command(args: &UnitArgs, limits: &ParseLimits) -> Result<()> {
    let unit = build_unit(&args.expression, &args.params[..], &args.name, limits)?;
    print!("{}", disassemble(&unit));
    Ok(())
}

fn check_command(args: &UnitArgs, json: bool, limits: &ParseLimits) -> Result<()> {
    let diagnostics = check_diagnostics(args, limits);

    if json {
        let text = serde_json::to_string_pretty(&diagnostics).context("failed to serialize diagnostics")?;
        println!("{}", text);
    } else if diagnostics.is_empty() {
        println!("✓ '{}' compiles", args.expression);
    } else {
        for diagnostic in &diagnostics {
            eprintln!("{}", diagnostic.render(&args.expression));
        }
    }

    if !diagnostics.is_empty() {
        bail!("'{}' does not compile", args.expression);
    }
    Ok(())
}

fn check_diagnostics(args: &UnitArgs, limits: &ParseLimits) -> Vec<Diagnostic> {
    match compile_with_limits(&args.expression, &args.params[..], &args.name, limits) {
        Ok(_) => Vec::new(),
        Err(err) => vec![Diagnostic::from_compile_error(&args.expression, &err)],
    }
}
