//! Prints how literals are laid out as tagval words.
use clap::Parser;
use tagval_runtime::allocator::ALLOCATOR;
use tagval_runtime::symbol::SymbolTable;
use tagval_runtime::{Unpacked, Value};
use tracing_subscriber::EnvFilter;

mod literal;

/// Encodes each literal and shows its word, class and type tag.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Literals to inspect: nil, true, false, undef, 42, 0.1, :foo, :"foo", "text".
    #[arg(required = true)]
    literals: Vec<String>,

    /// Logs allocations and boxing fallbacks.
    #[arg(short, long)]
    verbose: bool,

    /// Also prints the low byte of each word in binary.
    #[arg(short, long)]
    binary: bool,
}

fn class_of(value: Value) -> &'static str {
    match value.classify() {
        Unpacked::False | Unpacked::Nil | Unpacked::True | Unpacked::Undef => "singleton",
        Unpacked::Fixnum(_) => "fixnum",
        Unpacked::Flonum(_) => "flonum",
        Unpacked::Symbol(_) => "static symbol",
        Unpacked::Heap(_) => "heap",
    }
}

fn low_byte(value: Value) -> String {
    let byte = value.to_raw() & 0xff;
    format!("...{:04b} {:04b}", byte >> 4, byte & 0xf)
}

fn render(value: Value, symbols: &SymbolTable) -> String {
    match symbols.symbol_name(value) {
        Some(name) => format!(":{name}"),
        None => value.to_string(),
    }
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("TAGVAL_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut symbols = SymbolTable::new();

    for source in &args.literals {
        let value = literal::parse(&ALLOCATOR, &mut symbols, source)?;

        let mut line = format!("{:<24} {:#018x}", render(value, &symbols), value.to_raw());
        if args.binary {
            line.push_str(&format!("  {}", low_byte(value)));
        }
        line.push_str(&format!("  {:<13} {}", class_of(value), value.type_of()));

        println!("{line}");
    }

    Ok(())
}
