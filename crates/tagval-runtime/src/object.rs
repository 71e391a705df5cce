//! Heap cells. Every cell starts with a [Header] whose flags carry the
//! [TypeTag] of the payload that follows it, so a [Value] pointing at the
//! cell can be classified without knowing the payload type up front.
use fxhash::FxHashMap;
use num_bigint::BigInt;

use crate::tag::{TypeTag, T_MASK};
use crate::value::{SymbolId, Value};

/// First field of every heap cell. The type tag is written once, when the
/// cell is built, and there is no way to change it afterwards.
#[derive(Debug)]
#[repr(C, align(8))]
pub struct Header {
    flags: u64,
}

impl Header {
    fn new(tag: TypeTag) -> Self {
        Header { flags: tag.bits() }
    }

    #[inline(always)]
    pub fn flags(&self) -> u64 {
        self.flags
    }

    #[inline(always)]
    pub fn type_tag(&self) -> TypeTag {
        TypeTag::from_flags(self.flags & T_MASK).unwrap_or(TypeTag::None)
    }
}

/// A header followed by its payload.
#[derive(Debug)]
#[repr(C)]
pub struct HeapCell<T> {
    pub header: Header,
    pub payload: T,
}

impl<T: Payload> HeapCell<T> {
    /// Fails the build for payloads that declare an immediate-only tag.
    const HEAP_TAG: () = assert!(
        !T::TYPE.is_immediate_only(),
        "payload declares a tag that only immediates carry"
    );

    pub fn new(payload: T) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::HEAP_TAG;

        HeapCell {
            header: Header::new(T::TYPE),
            payload,
        }
    }

    /// # Safety
    /// `header` must be the header of a `HeapCell<T>`.
    pub(crate) unsafe fn from_header(header: &'static Header) -> &'static HeapCell<T> {
        &*(header as *const Header as *const HeapCell<T>)
    }
}

/// Something that can live in a heap cell.
///
/// # Safety
/// [Payload::TYPE] must identify `Self` alone: [Value::payload] casts any
/// cell whose header carries that tag to a `HeapCell<Self>`. It must not be
/// one of the tags only immediates carry (see [TypeTag::is_immediate_only]);
/// [HeapCell::new] refuses to compile for such payloads.
///
/// Payloads are handed out as `&'static Self` on any thread holding the
/// [Value], so they must be `Send + Sync`.
pub unsafe trait Payload: Sized + Send + Sync + 'static {
    const TYPE: TypeTag;
}

/// A plain instance. Instance variables are stored elsewhere.
#[derive(Debug, Clone)]
pub struct RObject {
    pub class: Value,
}

#[derive(Debug, Clone)]
pub struct RClass {
    pub name: SymbolId,
    pub superclass: Value,
}

#[derive(Debug, Clone)]
pub struct RModule {
    pub name: SymbolId,
}

/// A float that didn't fit in a flonum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RFloat(pub f64);

/// Fixed size string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RString(String);

#[derive(Debug, Clone)]
pub struct RArray(Vec<Value>);

#[derive(Debug, Clone, Default)]
pub struct RHash(FxHashMap<Value, Value>);

/// An integer that didn't fit in a fixnum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RBignum(BigInt);

/// A symbol created at runtime rather than interned up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RSymbol {
    name: String,
}

unsafe impl Payload for RObject {
    const TYPE: TypeTag = TypeTag::Object;
}

unsafe impl Payload for RClass {
    const TYPE: TypeTag = TypeTag::Class;
}

unsafe impl Payload for RModule {
    const TYPE: TypeTag = TypeTag::Module;
}

unsafe impl Payload for RFloat {
    const TYPE: TypeTag = TypeTag::Float;
}

unsafe impl Payload for RString {
    const TYPE: TypeTag = TypeTag::String;
}

unsafe impl Payload for RArray {
    const TYPE: TypeTag = TypeTag::Array;
}

unsafe impl Payload for RHash {
    const TYPE: TypeTag = TypeTag::Hash;
}

unsafe impl Payload for RBignum {
    const TYPE: TypeTag = TypeTag::Bignum;
}

unsafe impl Payload for RSymbol {
    const TYPE: TypeTag = TypeTag::Symbol;
}

impl RObject {
    pub fn new(class: Value) -> Self {
        RObject { class }
    }
}

impl RClass {
    pub fn new(name: SymbolId, superclass: Value) -> Self {
        RClass { name, superclass }
    }
}

impl RModule {
    pub fn new(name: SymbolId) -> Self {
        RModule { name }
    }
}

impl RString {
    pub fn new(str: impl Into<String>) -> Self {
        RString(str.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl RArray {
    pub fn new(items: Vec<Value>) -> Self {
        RArray(items)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Value> + '_ {
        self.0.iter().copied()
    }
}

impl RHash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys compare by word, so heap keys are matched by identity.
    pub fn get(&self, key: Value) -> Option<Value> {
        self.0.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Value, Value)> + '_ {
        self.0.iter().map(|(key, value)| (*key, *value))
    }
}

impl FromIterator<(Value, Value)> for RHash {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        RHash(iter.into_iter().collect())
    }
}

impl RBignum {
    pub fn get(&self) -> &BigInt {
        &self.0
    }
}

impl From<BigInt> for RBignum {
    fn from(value: BigInt) -> Self {
        RBignum(value)
    }
}

impl From<i64> for RBignum {
    fn from(value: i64) -> Self {
        RBignum(BigInt::from(value))
    }
}

impl RSymbol {
    pub fn new(name: impl Into<String>) -> Self {
        RSymbol { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
