// This module defines a trait called [Allocator] that produces the heap side of [Value]. The
// runtime never frees cells itself: reclamation belongs to whoever implements the trait, and the
// global allocator below simply keeps everything alive for the lifetime of the process.

use std::ptr::NonNull;

use crate::object::{HeapCell, Header, Payload};
use crate::value::{Value, HEAP_ALIGN};

pub const ALLOCATOR: GlobalAllocator = GlobalAllocator {};

/// Builds heap cells and wraps them as values.
///
/// # Safety
/// Implementors must hand out cells aligned to [HEAP_ALIGN], write the header
/// (through [HeapCell::new]) before the value is returned, and keep every cell
/// alive and untouched for as long as any [Value] can reach it.
pub unsafe trait Allocator {
    fn alloc<T: Payload>(&self, data: T) -> Value;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalAllocator {}

unsafe impl Allocator for GlobalAllocator {
    fn alloc<T: Payload>(&self, data: T) -> Value {
        let cell = NonNull::from(Box::leak(Box::new(HeapCell::new(data))));
        let header = cell.cast::<Header>();
        debug_assert_eq!(header.as_ptr() as usize % HEAP_ALIGN, 0);

        tracing::trace!(
            type_tag = %T::TYPE,
            addr = header.as_ptr() as usize,
            "allocated heap cell"
        );

        // SAFETY: the cell is leaked, so it outlives every value, and
        // `HeapCell::new` already wrote its header.
        unsafe { Value::from_heap(header) }
    }
}

#[inline(always)]
pub fn alloc<T: Payload>(data: T) -> Value {
    ALLOCATOR.alloc(data)
}
