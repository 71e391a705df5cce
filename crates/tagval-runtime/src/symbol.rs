//! Symbol interning. Interned names become static symbols, whose id is
//! packed straight into the word; names created on the fly can instead be
//! allocated as dynamic symbols.

use fxhash::FxHashMap;

use crate::allocator::Allocator;
use crate::object::RSymbol;
use crate::value::{SymbolId, Unpacked, Value};

#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    names: Vec<Box<str>>,
    ids: FxHashMap<Box<str>, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ids are handed out in interning order, starting at zero.
    pub fn intern(&mut self, name: &str) -> SymbolId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }

        let id = next_id(self.names.len());
        self.names.push(name.into());
        self.ids.insert(name.into(), id);
        id
    }

    pub fn name(&self, id: SymbolId) -> Option<&str> {
        self.names.get(id.get() as usize).map(|name| &**name)
    }

    pub fn get(&self, name: &str) -> Option<SymbolId> {
        self.ids.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The static symbol word for `name`.
    pub fn symbol(&mut self, name: &str) -> Value {
        Value::static_symbol(self.intern(name))
    }

    /// A heap symbol that is not interned.
    pub fn dynamic<A: Allocator>(&self, allocator: &A, name: &str) -> Value {
        allocator.alloc(RSymbol::new(name))
    }

    /// Name of a static or dynamic symbol.
    pub fn symbol_name<'a>(&'a self, value: Value) -> Option<&'a str> {
        match value.classify() {
            Unpacked::Symbol(symbol) => self.name(symbol.id()),
            Unpacked::Heap(heap) => heap.payload::<RSymbol>().ok().map(RSymbol::name),
            _ => None,
        }
    }
}

/// Ids are `u32`, so the table holds at most `u32::MAX + 1` names.
fn next_id(len: usize) -> SymbolId {
    match u32::try_from(len) {
        Ok(id) => SymbolId::new(id),
        Err(_) => panic!("symbol table is full: {len} names already interned"),
    }
}
