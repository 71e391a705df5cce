//! Literal parsing for the inspector. Only the shapes needed to produce every
//! class of value are understood.
use miette::Diagnostic;
use num_bigint::BigInt;
use tagval_runtime::allocator::Allocator;
use tagval_runtime::numeric::{bignum_new, float_new, int_new};
use tagval_runtime::object::RString;
use tagval_runtime::symbol::SymbolTable;
use tagval_runtime::Value;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum LiteralError {
    #[error("empty literal")]
    #[diagnostic(code(tagval::literal::empty))]
    Empty,

    #[error("empty symbol name in '{0}'")]
    #[diagnostic(code(tagval::literal::symbol))]
    EmptySymbol(String),

    #[error("unterminated string '{0}'")]
    #[diagnostic(code(tagval::literal::string))]
    UnterminatedString(String),

    #[error("can't read '{0}' as a value")]
    #[diagnostic(
        code(tagval::literal::unknown),
        help("try nil, true, false, undef, 42, 1.5, :name, :\"name\" or \"text\"")
    )]
    Unknown(String),
}

pub type Result<T, E = LiteralError> = std::result::Result<T, E>;

/// Reads one literal into a value, allocating when it doesn't fit in a word.
pub fn parse<A: Allocator>(
    allocator: &A,
    symbols: &mut SymbolTable,
    literal: &str,
) -> Result<Value> {
    let literal = literal.trim();

    match literal {
        "" => Err(LiteralError::Empty),
        "false" => Ok(Value::FALSE),
        "nil" => Ok(Value::NIL),
        "true" => Ok(Value::TRUE),
        "undef" => Ok(Value::UNDEF),
        "NaN" => Ok(float_new(allocator, f64::NAN)),
        "Infinity" => Ok(float_new(allocator, f64::INFINITY)),
        "-Infinity" => Ok(float_new(allocator, f64::NEG_INFINITY)),
        _ => match literal.as_bytes()[0] {
            b':' => parse_symbol(allocator, symbols, literal),
            b'"' => Ok(allocator.alloc(RString::new(unquote(literal)?))),
            _ => parse_number(allocator, literal),
        },
    }
}

/// `:name` is interned, `:"name"` is created as a dynamic symbol.
fn parse_symbol<A: Allocator>(
    allocator: &A,
    symbols: &mut SymbolTable,
    literal: &str,
) -> Result<Value> {
    let name = &literal[1..];

    if name.starts_with('"') {
        let name = unquote(name)?;
        if name.is_empty() {
            return Err(LiteralError::EmptySymbol(literal.to_string()));
        }
        return Ok(symbols.dynamic(allocator, name));
    }

    if name.is_empty() {
        return Err(LiteralError::EmptySymbol(literal.to_string()));
    }

    Ok(symbols.symbol(name))
}

fn unquote(literal: &str) -> Result<&str> {
    literal
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .ok_or_else(|| LiteralError::UnterminatedString(literal.to_string()))
}

fn parse_number<A: Allocator>(allocator: &A, literal: &str) -> Result<Value> {
    let digits = literal.replace('_', "");

    if let Ok(int) = digits.parse::<i64>() {
        return Ok(int_new(allocator, int));
    }

    if let Ok(int) = digits.parse::<BigInt>() {
        return Ok(bignum_new(allocator, int));
    }

    let looks_like_float = digits.contains(&['.', 'e', 'E'][..]);
    match digits.parse::<f64>() {
        Ok(float) if looks_like_float => Ok(float_new(allocator, float)),
        _ => Err(LiteralError::Unknown(literal.to_string())),
    }
}
