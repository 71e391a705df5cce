//! Definitions of errors that the encoding and inspection layers report.
use miette::Diagnostic;
use thiserror::Error;

use crate::tag::TypeTag;

/// The number can't be stored as an immediate and has to be boxed.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq)]
pub enum DoesNotFit {
    #[error("integer {0} does not fit in a fixnum")]
    #[diagnostic(
        code(tagval::does_not_fit::integer),
        help("allocate it as a bignum with `numeric::int_new`")
    )]
    Integer(i64),

    #[error("float {0:e} does not fit in a flonum")]
    #[diagnostic(
        code(tagval::does_not_fit::float),
        help("allocate it as a boxed float with `numeric::float_new`")
    )]
    Float(f64),
}

/// A value was asserted to have a type tag it doesn't have.
#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
#[error("wrong argument type {} (expected {})", .actual.name(), .expected.name())]
#[diagnostic(code(tagval::type_mismatch))]
pub struct TypeMismatch {
    pub expected: TypeTag,
    pub actual: TypeTag,
}

pub type Result<T, E = TypeMismatch> = std::result::Result<T, E>;
