//! This module describes the values that the tagval runtime
//! manipulates. [Value] is a single 64 bit word that either holds an
//! immediate (singletons, fixnums, flonums, static symbols) or an 8 byte
//! aligned pointer to a heap cell whose first field is a [Header].
//!
//! ```text
//! ...0000 0000  false
//! ...0000 0100  nil
//! ...0001 0100  true
//! ...0010 0100  undef
//! ...xxxx xxx1  fixnum
//! ...xxxx xx10  flonum
//! ...xxxx 1100  static symbol
//! ...xxxx x000  heap reference (nonzero)
//! ```
//!
//! [Header]: crate::object::Header

use std::ptr::NonNull;

use crate::object::Header;

pub use self::pointer::*;
pub use self::tagged::Tagged;

pub mod display;
pub mod pointer;
pub mod tagged;

#[cfg(not(target_pointer_width = "64"))]
compile_error!("tagval values are only defined for 64 bit words");

pub const FALSE: u64 = 0x00;
pub const NIL: u64 = 0x04;
pub const TRUE: u64 = 0x14;
pub const UNDEF: u64 = 0x24;

/// If any of these bits is set the word is an immediate.
pub const IMMEDIATE_MASK: u64 = 0x07;

pub const FIXNUM_FLAG: u64 = 0x01;
pub const FIXNUM_MASK: u64 = 0x01;

pub const FLONUM_FLAG: u64 = 0x02;
pub const FLONUM_MASK: u64 = 0x03;

pub const SYMBOL_FLAG: u64 = 0x0c;

/// Static symbol ids live above this many bits.
pub const SPECIAL_SHIFT: u32 = 8;
pub const SYMBOL_MASK: u64 = (1 << SPECIAL_SHIFT) - 1;

/// Heap cells are aligned to this many bytes, which keeps the
/// [IMMEDIATE_MASK] bits of every heap reference clear.
pub const HEAP_ALIGN: usize = 8;

pub const FIXNUM_MAX: i64 = i64::MAX >> 1;
pub const FIXNUM_MIN: i64 = i64::MIN >> 1;

/// A pointer tagged value. The classes it can assume are described in
/// [Unpacked], which is what [Value::classify] hands back.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Value(pub(crate) u64);

impl Value {
    pub const FALSE: Value = Value(FALSE);
    pub const NIL: Value = Value(NIL);
    pub const TRUE: Value = Value(TRUE);
    pub const UNDEF: Value = Value(UNDEF);

    /// Rebuilds a value from a word obtained through [Value::to_raw].
    ///
    /// # Safety
    /// The word must come from a live [Value]. Fabricated heap words would
    /// be dereferenced by [Value::type_of].
    #[inline(always)]
    pub const unsafe fn from_raw(word: u64) -> Self {
        Self(word)
    }

    /// Wraps a heap cell that an [Allocator] has just published.
    ///
    /// # Safety
    /// `header` must point at the header of a cell that stays alive and
    /// keeps its type tag for as long as the value is reachable.
    ///
    /// [Allocator]: crate::allocator::Allocator
    #[inline(always)]
    pub unsafe fn from_heap(header: NonNull<Header>) -> Self {
        let word = header.as_ptr() as u64;
        debug_assert!(
            word & IMMEDIATE_MASK == 0,
            "heap cell at {word:#x} is not {HEAP_ALIGN} byte aligned"
        );
        Self(word)
    }

    #[inline(always)]
    pub const fn to_raw(self) -> u64 {
        self.0
    }

    /// True iff any of the reserved low tag bits is set.
    #[inline(always)]
    pub const fn is_immediate(self) -> bool {
        self.0 & IMMEDIATE_MASK != 0
    }

    /// Immediates plus `false`, i.e. every word that must not be
    /// dereferenced.
    #[inline(always)]
    pub const fn is_special_const(self) -> bool {
        self.is_immediate() || self.0 == FALSE
    }

    #[inline(always)]
    pub const fn is_heap_reference(self) -> bool {
        !self.is_special_const()
    }

    #[inline(always)]
    pub const fn is_false(self) -> bool {
        self.0 == FALSE
    }

    #[inline(always)]
    pub const fn is_nil(self) -> bool {
        self.0 == NIL
    }

    #[inline(always)]
    pub const fn is_true(self) -> bool {
        self.0 == TRUE
    }

    #[inline(always)]
    pub const fn is_undef(self) -> bool {
        self.0 == UNDEF
    }

    /// Only `false` and `nil` are falsy.
    #[inline(always)]
    pub const fn is_truthy(self) -> bool {
        self.0 & !NIL != 0
    }

    #[inline(always)]
    pub fn is_fixnum(self) -> bool {
        Fixnum::is(self)
    }

    #[inline(always)]
    pub fn is_flonum(self) -> bool {
        Flonum::is(self)
    }

    #[inline(always)]
    pub fn is_static_symbol(self) -> bool {
        StaticSymbol::is(self)
    }

    /// Encodes `int` as a fixnum.
    pub fn fixnum(int: i64) -> Result<Value, crate::error::DoesNotFit> {
        Fixnum::new(int).map(Value::from)
    }

    /// Encodes `float` as a flonum.
    pub fn flonum(float: f64) -> Result<Value, crate::error::DoesNotFit> {
        Flonum::new(float).map(Value::from)
    }

    #[inline(always)]
    pub fn static_symbol(id: SymbolId) -> Value {
        StaticSymbol(id).into()
    }

    #[inline(always)]
    pub fn as_fixnum(self) -> Option<i64> {
        Fixnum::untag(self).map(Fixnum::get)
    }

    #[inline(always)]
    pub fn as_flonum(self) -> Option<f64> {
        Flonum::untag(self).map(Flonum::get)
    }

    #[inline(always)]
    pub fn as_static_symbol(self) -> Option<SymbolId> {
        StaticSymbol::untag(self).map(|symbol| symbol.0)
    }

    /// The header of the referenced heap cell, or [None] for special
    /// constants. This is the only place where a word is dereferenced.
    #[inline(always)]
    pub fn header(self) -> Option<&'static Header> {
        if self.is_special_const() {
            return None;
        }

        // SAFETY: heap words are only produced by `from_heap`, whose
        // contract keeps the cell alive and aligned.
        unsafe { (self.0 as *const Header).as_ref() }
    }

    /// Splits the word into its class.
    pub fn classify(self) -> Unpacked {
        match self.0 & IMMEDIATE_MASK {
            0 if self.0 == FALSE => Unpacked::False,
            0 => Unpacked::Heap(HeapRef(self)),
            _ if Fixnum::is(self) => Unpacked::Fixnum(Fixnum::untag_word(self.0)),
            _ if Flonum::is(self) => Unpacked::Flonum(Flonum::untag_word(self.0)),
            _ if StaticSymbol::is(self) => Unpacked::Symbol(StaticSymbol::untag_word(self.0)),
            _ => match self.0 {
                NIL => Unpacked::Nil,
                TRUE => Unpacked::True,
                UNDEF => Unpacked::Undef,
                word => unreachable!("invalid special constant {word:#x}"),
            },
        }
    }
}

impl From<bool> for Value {
    #[inline(always)]
    fn from(value: bool) -> Self {
        if value {
            Value::TRUE
        } else {
            Value::FALSE
        }
    }
}

/// Zeroed memory reads as `false`.
impl Default for Value {
    fn default() -> Self {
        Value::FALSE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singleton_words() {
        assert_eq!(Value::FALSE.to_raw(), 0);
        assert_eq!(Value::NIL.to_raw(), 0b0000_0100);
        assert_eq!(Value::TRUE.to_raw(), 0b0001_0100);
        assert_eq!(Value::UNDEF.to_raw(), 0b0010_0100);
    }

    #[test]
    fn test_false_is_special_but_not_immediate() {
        assert!(!Value::FALSE.is_immediate());
        assert!(Value::FALSE.is_special_const());
        assert!(!Value::FALSE.is_heap_reference());
        assert!(matches!(Value::FALSE.classify(), Unpacked::False));
    }

    #[test]
    fn test_singletons_are_immediate() {
        for value in [Value::NIL, Value::TRUE, Value::UNDEF] {
            assert!(value.is_immediate());
            assert!(!value.is_heap_reference());
            assert!(value.header().is_none());
        }
    }

    #[test]
    fn test_truthiness() {
        assert!(!Value::FALSE.is_truthy());
        assert!(!Value::NIL.is_truthy());
        assert!(Value::TRUE.is_truthy());
        assert!(Value::UNDEF.is_truthy());
        assert!(Value::fixnum(0).unwrap().is_truthy());
    }

    #[test]
    fn test_default_is_the_zero_word() {
        assert_eq!(Value::default(), Value::FALSE);
        assert_eq!(Value::default().to_raw(), 0);
    }

    #[test]
    fn test_bool_conversion() {
        assert_eq!(Value::from(true), Value::TRUE);
        assert_eq!(Value::from(false), Value::FALSE);
    }

    #[test]
    fn test_classify_singletons() {
        assert!(matches!(Value::NIL.classify(), Unpacked::Nil));
        assert!(matches!(Value::TRUE.classify(), Unpacked::True));
        assert!(matches!(Value::UNDEF.classify(), Unpacked::Undef));
    }

    #[test]
    fn test_fixnum_bounds() {
        assert_eq!(FIXNUM_MAX, (1 << 62) - 1);
        assert_eq!(FIXNUM_MIN, -(1 << 62));
    }
}
