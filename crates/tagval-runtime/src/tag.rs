//! Type inspection. Every [Value] answers a single [TypeTag], read from the
//! bit pattern for special constants and from the cell [Header] otherwise.
//!
//! [Header]: crate::object::Header

use std::fmt::Display;

use crate::error::{Result, TypeMismatch};
use crate::object::{HeapCell, Payload};
use crate::value::{Unpacked, Value};

/// Bits of the header flags that hold the [TypeTag].
pub const T_MASK: u64 = 0x1f;

/// Kinds of values. Heap cells store the code in the low bits of their
/// header flags; immediates map to the tags between `Nil` and `Undef`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TypeTag {
    None = 0x00,
    Object = 0x01,
    Class = 0x02,
    Module = 0x03,
    Float = 0x04,
    String = 0x05,
    Regexp = 0x06,
    Array = 0x07,
    Hash = 0x08,
    Struct = 0x09,
    Bignum = 0x0a,
    File = 0x0b,
    Data = 0x0c,
    Match = 0x0d,
    Complex = 0x0e,
    Rational = 0x0f,

    Nil = 0x11,
    True = 0x12,
    False = 0x13,
    Symbol = 0x14,
    Fixnum = 0x15,
    Undef = 0x16,

    IMemo = 0x1a,
    Node = 0x1b,
    IClass = 0x1c,
    Zombie = 0x1d,
    Moved = 0x1e,
}

impl TypeTag {
    /// Decodes the low [T_MASK] bits of a header's flags.
    pub fn from_flags(flags: u64) -> Option<TypeTag> {
        use TypeTag::*;

        let tag = match flags & T_MASK {
            0x00 => None,
            0x01 => Object,
            0x02 => Class,
            0x03 => Module,
            0x04 => Float,
            0x05 => String,
            0x06 => Regexp,
            0x07 => Array,
            0x08 => Hash,
            0x09 => Struct,
            0x0a => Bignum,
            0x0b => File,
            0x0c => Data,
            0x0d => Match,
            0x0e => Complex,
            0x0f => Rational,
            0x11 => Nil,
            0x12 => True,
            0x13 => False,
            0x14 => Symbol,
            0x15 => Fixnum,
            0x16 => Undef,
            0x1a => IMemo,
            0x1b => Node,
            0x1c => IClass,
            0x1d => Zombie,
            0x1e => Moved,
            _ => return Option::None,
        };

        Some(tag)
    }

    #[inline(always)]
    pub const fn bits(self) -> u64 {
        self as u64
    }

    /// Tags that only immediates carry; no header is ever written with one.
    pub const fn is_immediate_only(self) -> bool {
        matches!(
            self,
            TypeTag::Nil | TypeTag::True | TypeTag::False | TypeTag::Fixnum | TypeTag::Undef
        )
    }

    /// Name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            TypeTag::None => "none",
            TypeTag::Object => "Object",
            TypeTag::Class => "Class",
            TypeTag::Module => "Module",
            TypeTag::Float => "Float",
            TypeTag::String => "String",
            TypeTag::Regexp => "Regexp",
            TypeTag::Array => "Array",
            TypeTag::Hash => "Hash",
            TypeTag::Struct => "Struct",
            TypeTag::Bignum | TypeTag::Fixnum => "Integer",
            TypeTag::File => "File",
            TypeTag::Data => "Data",
            TypeTag::Match => "MatchData",
            TypeTag::Complex => "Complex",
            TypeTag::Rational => "Rational",
            TypeTag::Nil => "nil",
            TypeTag::True => "true",
            TypeTag::False => "false",
            TypeTag::Symbol => "Symbol",
            TypeTag::Undef => "undef",
            TypeTag::IMemo => "imemo",
            TypeTag::Node => "Node",
            TypeTag::IClass => "iClass",
            TypeTag::Zombie => "Zombie",
            TypeTag::Moved => "Moved",
        }
    }
}

impl Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Value {
    /// Type tag of any value. Special constants never touch memory.
    pub fn type_of(self) -> TypeTag {
        match self.classify() {
            Unpacked::False => TypeTag::False,
            Unpacked::Nil => TypeTag::Nil,
            Unpacked::True => TypeTag::True,
            Unpacked::Undef => TypeTag::Undef,
            Unpacked::Fixnum(_) => TypeTag::Fixnum,
            Unpacked::Flonum(_) => TypeTag::Float,
            Unpacked::Symbol(_) => TypeTag::Symbol,
            Unpacked::Heap(heap) => heap.type_tag(),
        }
    }

    /// Header tag of a heap reference, [None] for special constants.
    #[inline(always)]
    pub fn builtin_type(self) -> Option<TypeTag> {
        self.header().map(|header| header.type_tag())
    }

    /// Same answer as `self.type_of() == tag`, with the immediate classes
    /// checked straight from the bits.
    pub fn has_type(self, tag: TypeTag) -> bool {
        match tag {
            TypeTag::False => self.is_false(),
            TypeTag::Nil => self.is_nil(),
            TypeTag::True => self.is_true(),
            TypeTag::Undef => self.is_undef(),
            TypeTag::Fixnum => self.is_fixnum(),
            TypeTag::Float => self.is_float_type(),
            TypeTag::Symbol => self.is_symbol_type(),
            tag => self.builtin_type() == Some(tag),
        }
    }

    /// Returns the value unchanged when it has type `expected`.
    pub fn assert_type(self, expected: TypeTag) -> Result<Value> {
        if self.has_type(expected) {
            Ok(self)
        } else {
            Err(TypeMismatch {
                expected,
                actual: self.type_of(),
            })
        }
    }

    /// Borrows the payload of a heap cell of kind `T`. Immediates never
    /// have a payload, even when they share `T::TYPE` (flonums, static
    /// symbols).
    pub fn payload<T: Payload>(self) -> Result<&'static T> {
        match self.header() {
            Some(header) if header.type_tag() == T::TYPE => {
                // SAFETY: `T::TYPE` names exactly one payload type, and the
                // allocator wrote the tag of the payload it stored.
                Ok(unsafe { &HeapCell::<T>::from_header(header).payload })
            }
            _ => Err(TypeMismatch {
                expected: T::TYPE,
                actual: self.type_of(),
            }),
        }
    }

    /// Flonum or boxed float.
    #[inline(always)]
    pub fn is_float_type(self) -> bool {
        self.is_flonum() || self.builtin_type() == Some(TypeTag::Float)
    }

    /// Static or dynamic symbol.
    #[inline(always)]
    pub fn is_symbol_type(self) -> bool {
        self.is_static_symbol() || self.is_dynamic_symbol()
    }

    #[inline(always)]
    pub fn is_dynamic_symbol(self) -> bool {
        self.builtin_type() == Some(TypeTag::Symbol)
    }

    /// Fixnum or bignum.
    #[inline(always)]
    pub fn is_numeric_like(self) -> bool {
        self.is_fixnum() || self.builtin_type() == Some(TypeTag::Bignum)
    }

    #[inline(always)]
    pub fn is_integer_type(self) -> bool {
        self.is_numeric_like()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::alloc;
    use crate::object::*;
    use crate::value::SymbolId;

    #[test]
    fn test_immediate_types() {
        assert_eq!(Value::FALSE.type_of(), TypeTag::False);
        assert_eq!(Value::NIL.type_of(), TypeTag::Nil);
        assert_eq!(Value::TRUE.type_of(), TypeTag::True);
        assert_eq!(Value::UNDEF.type_of(), TypeTag::Undef);
        assert_eq!(Value::fixnum(0).unwrap().type_of(), TypeTag::Fixnum);
        assert_eq!(Value::flonum(0.5).unwrap().type_of(), TypeTag::Float);
        assert_eq!(Value::static_symbol(SymbolId::new(1)).type_of(), TypeTag::Symbol);
    }

    #[test]
    fn test_builtin_type_skips_special_consts() {
        assert_eq!(Value::FALSE.builtin_type(), None);
        assert_eq!(Value::NIL.builtin_type(), None);
        assert_eq!(Value::fixnum(8).unwrap().builtin_type(), None);
        assert_eq!(alloc(RHash::new()).builtin_type(), Some(TypeTag::Hash));
    }

    #[test]
    fn test_has_type_on_heap() {
        let array = alloc(RArray::new(vec![]));
        assert!(array.has_type(TypeTag::Array));
        assert!(!array.has_type(TypeTag::Hash));
        assert!(!array.has_type(TypeTag::Float));
        assert!(!array.has_type(TypeTag::Nil));
    }

    #[test]
    fn test_has_type_agrees_with_type_of() {
        let values = [
            Value::FALSE,
            Value::NIL,
            Value::TRUE,
            Value::UNDEF,
            Value::fixnum(1).unwrap(),
            Value::flonum(1.0).unwrap(),
            Value::static_symbol(SymbolId::new(2)),
            alloc(RFloat(f64::INFINITY)),
            alloc(RString::new("s")),
            alloc(RModule::new(SymbolId::new(4))),
        ];
        let tags = [
            TypeTag::False,
            TypeTag::Nil,
            TypeTag::True,
            TypeTag::Undef,
            TypeTag::Fixnum,
            TypeTag::Float,
            TypeTag::Symbol,
            TypeTag::String,
            TypeTag::Module,
            TypeTag::Array,
        ];

        for value in values {
            for tag in tags {
                assert_eq!(value.has_type(tag), value.type_of() == tag, "{value:?} vs {tag}");
            }
        }
    }

    #[test]
    fn test_assert_type() {
        let array = alloc(RArray::new(vec![]));
        assert_eq!(array.assert_type(TypeTag::Array), Ok(array));

        let err = array.assert_type(TypeTag::Hash).unwrap_err();
        assert_eq!(err.expected, TypeTag::Hash);
        assert_eq!(err.actual, TypeTag::Array);

        let err = Value::NIL.assert_type(TypeTag::True).unwrap_err();
        assert_eq!(err.actual, TypeTag::Nil);
    }

    #[test]
    fn test_float_and_symbol_predicates() {
        assert!(Value::flonum(2.0).unwrap().is_float_type());
        assert!(alloc(RFloat(-0.0)).is_float_type());
        assert!(!Value::fixnum(2).unwrap().is_float_type());

        let dynamic = alloc(RSymbol::new("dyn"));
        assert!(dynamic.is_symbol_type());
        assert!(dynamic.is_dynamic_symbol());
        assert!(Value::static_symbol(SymbolId::new(9)).is_symbol_type());
        assert!(!Value::static_symbol(SymbolId::new(9)).is_dynamic_symbol());
    }

    #[test]
    fn test_numeric_like() {
        assert!(Value::fixnum(-5).unwrap().is_numeric_like());
        assert!(alloc(RBignum::from(i64::MAX)).is_numeric_like());
        assert!(!Value::flonum(5.0).unwrap().is_numeric_like());
        assert!(!Value::NIL.is_numeric_like());
        assert!(!alloc(RString::new("5")).is_integer_type());
    }

    #[test]
    fn test_payload_rejects_immediates() {
        let flonum = Value::flonum(1.0).unwrap();
        let err = flonum.payload::<RFloat>().unwrap_err();
        assert_eq!(err.actual, TypeTag::Float);
        assert!(Value::FALSE.payload::<RArray>().is_err());
    }

    #[test]
    fn test_from_flags() {
        assert_eq!(TypeTag::from_flags(0xd_0000_0043), Some(TypeTag::Module));
        assert_eq!(TypeTag::from_flags(0x10), None);
        assert_eq!(TypeTag::from_flags(TypeTag::Moved.bits()), Some(TypeTag::Moved));
    }
}
