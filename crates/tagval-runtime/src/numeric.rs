//! Numbers that fall back to heap cells when the immediate encodings can't
//! hold them.

use num_bigint::BigInt;
use num_traits::ToPrimitive;

use crate::allocator::Allocator;
use crate::object::{RBignum, RFloat};
use crate::value::{Unpacked, Value};

/// A flonum when `float` fits, otherwise a boxed float.
pub fn float_new<A: Allocator>(allocator: &A, float: f64) -> Value {
    Value::flonum(float).unwrap_or_else(|err| {
        tracing::debug!(%err, bits = float.to_bits(), "boxing float");
        allocator.alloc(RFloat(float))
    })
}

/// A fixnum when `int` fits, otherwise a bignum.
pub fn int_new<A: Allocator>(allocator: &A, int: i64) -> Value {
    Value::fixnum(int).unwrap_or_else(|err| {
        tracing::debug!(%err, "boxing integer");
        allocator.alloc(RBignum::from(int))
    })
}

/// Boxes `int` only when no fixnum can hold it.
pub fn bignum_new<A: Allocator>(allocator: &A, int: BigInt) -> Value {
    match int.to_i64().map(Value::fixnum) {
        Some(Ok(fixnum)) => fixnum,
        _ => {
            tracing::debug!(%int, "boxing integer");
            allocator.alloc(RBignum::from(int))
        }
    }
}

/// Reads a flonum or a boxed float.
pub fn float_value(value: Value) -> Option<f64> {
    match value.classify() {
        Unpacked::Flonum(float) => Some(float.get()),
        Unpacked::Heap(heap) => heap.payload::<RFloat>().ok().map(|float| float.0),
        _ => None,
    }
}

/// Reads a fixnum or a bignum.
pub fn integer_value(value: Value) -> Option<BigInt> {
    match value.classify() {
        Unpacked::Fixnum(int) => Some(BigInt::from(int.get())),
        Unpacked::Heap(heap) => heap.payload::<RBignum>().ok().map(|int| int.get().clone()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::ALLOCATOR;
    use crate::tag::TypeTag;
    use crate::value::{FIXNUM_MAX, FIXNUM_MIN};

    #[test]
    fn test_float_new() {
        let flonum = float_new(&ALLOCATOR, 0.1);
        assert!(flonum.is_flonum());

        let boxed = float_new(&ALLOCATOR, f64::INFINITY);
        assert!(boxed.is_heap_reference());
        assert_eq!(boxed.type_of(), TypeTag::Float);
        assert_eq!(float_value(boxed), Some(f64::INFINITY));

        let negative_zero = float_new(&ALLOCATOR, -0.0);
        assert_eq!(float_value(negative_zero).map(f64::to_bits), Some((-0.0f64).to_bits()));
    }

    #[test]
    fn test_int_new() {
        assert_eq!(int_new(&ALLOCATOR, FIXNUM_MAX).as_fixnum(), Some(FIXNUM_MAX));

        let boxed = int_new(&ALLOCATOR, FIXNUM_MAX + 1);
        assert_eq!(boxed.type_of(), TypeTag::Bignum);
        assert!(boxed.is_numeric_like());
        assert_eq!(integer_value(boxed), Some(BigInt::from(FIXNUM_MAX + 1)));

        let boxed = int_new(&ALLOCATOR, FIXNUM_MIN - 1);
        assert_eq!(integer_value(boxed), Some(BigInt::from(FIXNUM_MIN - 1)));
    }

    #[test]
    fn test_bignum_normalizes() {
        let small = bignum_new(&ALLOCATOR, BigInt::from(-12));
        assert_eq!(small.as_fixnum(), Some(-12));

        let huge = BigInt::from(i64::MAX) * BigInt::from(4);
        let boxed = bignum_new(&ALLOCATOR, huge.clone());
        assert_eq!(boxed.type_of(), TypeTag::Bignum);
        assert_eq!(integer_value(boxed), Some(huge));
    }

    #[test]
    fn test_readers_reject_other_kinds() {
        assert_eq!(float_value(Value::fixnum(1).unwrap()), None);
        assert_eq!(integer_value(Value::flonum(1.0).unwrap()), None);
        assert_eq!(integer_value(Value::NIL), None);
        assert_eq!(float_value(Value::FALSE), None);
    }
}
