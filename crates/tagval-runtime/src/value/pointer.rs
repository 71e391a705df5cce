use super::*;
use crate::error::TypeMismatch;
use crate::object::Payload;
use crate::tag::TypeTag;

/// A 63 bit signed integer stored inline.
#[derive(Clone, PartialEq, Eq, Copy, Debug)]
pub struct Fixnum(pub(crate) i64);

/// A binary64 whose pattern fits beside the 2 bit flonum flag.
#[derive(Clone, PartialEq, Copy, Debug)]
pub struct Flonum(pub(crate) f64);

/// Interned symbol id.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Debug)]
pub struct SymbolId(pub(crate) u32);

/// A symbol id packed above [SPECIAL_SHIFT].
#[derive(Clone, PartialEq, Eq, Copy, Debug)]
pub struct StaticSymbol(pub(crate) SymbolId);

/// A value already known to point at a heap cell.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HeapRef(pub(crate) Value);

/// "Fat" form of a [Value] that is easier to match on in the rust side.
/// Exactly one variant exists per word, so the classes can't overlap.
#[derive(Clone, Copy, Debug)]
pub enum Unpacked {
    False,
    Nil,
    True,
    Undef,
    Fixnum(Fixnum),
    Flonum(Flonum),
    Symbol(StaticSymbol),
    // Heap stuff
    Heap(HeapRef),
}

impl Fixnum {
    #[inline(always)]
    pub fn get(self) -> i64 {
        self.0
    }
}

impl Flonum {
    #[inline(always)]
    pub fn get(self) -> f64 {
        self.0
    }
}

impl SymbolId {
    #[inline(always)]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl StaticSymbol {
    #[inline(always)]
    pub fn new(id: SymbolId) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn id(self) -> SymbolId {
        self.0
    }
}

impl HeapRef {
    #[inline(always)]
    pub fn value(self) -> Value {
        self.0
    }

    /// Type tag stored in the cell's header.
    #[inline(always)]
    pub fn type_tag(self) -> TypeTag {
        self.header().type_tag()
    }

    #[inline(always)]
    pub fn header(self) -> &'static Header {
        // SAFETY: a `HeapRef` is only built by `Value::classify` for words
        // that passed `is_heap_reference`, and heap words come from
        // `Value::from_heap`.
        unsafe { &*(self.0 .0 as *const Header) }
    }

    /// Borrows the payload after checking the header's type tag.
    pub fn payload<T: Payload>(self) -> Result<&'static T, TypeMismatch> {
        self.0.payload()
    }
}

impl Unpacked {
    /// Packs the class back into its word.
    pub fn pack(self) -> Value {
        match self {
            Unpacked::False => Value::FALSE,
            Unpacked::Nil => Value::NIL,
            Unpacked::True => Value::TRUE,
            Unpacked::Undef => Value::UNDEF,
            Unpacked::Fixnum(int) => int.into(),
            Unpacked::Flonum(float) => float.into(),
            Unpacked::Symbol(symbol) => symbol.into(),
            Unpacked::Heap(heap) => heap.0,
        }
    }
}

impl From<Unpacked> for Value {
    fn from(value: Unpacked) -> Self {
        value.pack()
    }
}
