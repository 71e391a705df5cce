//! Single word value representation for a dynamically typed runtime.
//!
//! [value] holds the tag encoding layer: the [Value] word, its immediate
//! classes and their encoders. [tag] holds the type inspection layer built
//! on top of it, which falls back to the [object::Header] of a heap cell
//! when the word is a reference.

pub mod allocator;
pub mod error;
pub mod numeric;
pub mod object;
pub mod symbol;
pub mod tag;
pub mod value;

pub use error::{DoesNotFit, TypeMismatch};
pub use tag::TypeTag;
pub use value::{Unpacked, Value};
