/*!
 * Allocator Traits
 *
 * The contract every pluggable allocation strategy implements. Generic code
 * takes `A: Allocator` (static dispatch) or an `AllocatorHandle`
 * (`&mut dyn Allocator`, dynamic dispatch) and never needs to know the
 * concrete strategy.
 *
 * `allocate` has no default: every allocator must be able to produce memory
 * or fail explicitly. `resize` and `free` default to their legitimate no-op
 * forms (always refuse, do nothing).
 *
 * Synchronization is left to implementers. The contract takes `&mut self`
 * and imposes no locking of its own.
 */

use super::types::{AllocError, AllocResult};
use crate::core::types::Size;
use std::ptr::NonNull;

/// Type-erased allocator reference
pub type AllocatorHandle<'a> = &'a mut dyn Allocator;

/// Memory allocator interface
///
/// # Safety
///
/// Implementers must guarantee that:
/// - a successful `allocate(size, align, count)` returns a pointer to at least
///   `size * count` writable bytes aligned to `align`, disjoint from every other
///   live allocation
/// - a successful `resize` keeps the address and makes the new length valid
/// - a failed `resize` leaves the allocation's address, length and contents untouched
pub unsafe trait Allocator {
    /// Allocate `size * count` bytes aligned to `align`
    ///
    /// Alignment must never be ignored. Implementers may fail for alignments
    /// they cannot satisfy.
    fn allocate(&mut self, size: Size, align: Size, count: Size) -> AllocResult<NonNull<u8>>;

    /// Resize the allocation at `addr` to `size * count` bytes in place
    ///
    /// Relocation is never a successful resize: callers fall back to
    /// allocate + copy + free themselves (see `AllocatorExt::reallocate_array`).
    ///
    /// # Safety
    ///
    /// `addr` must be a live allocation from this allocator, aligned to `align`.
    unsafe fn resize(
        &mut self,
        addr: NonNull<u8>,
        size: Size,
        align: Size,
        count: Size,
    ) -> AllocResult<()> {
        let _ = (addr, size, align, count);
        Err(AllocError::ResizeUnsupported)
    }

    /// Release the allocation at `addr`
    ///
    /// Allocators that cannot reclaim memory keep this default no-op.
    ///
    /// # Safety
    ///
    /// `addr` must be a live allocation from this allocator and must not be used afterwards.
    unsafe fn free(&mut self, addr: NonNull<u8>) {
        let _ = addr;
    }
}

unsafe impl<A: Allocator + ?Sized> Allocator for &mut A {
    #[inline]
    fn allocate(&mut self, size: Size, align: Size, count: Size) -> AllocResult<NonNull<u8>> {
        (**self).allocate(size, align, count)
    }

    #[inline]
    unsafe fn resize(
        &mut self,
        addr: NonNull<u8>,
        size: Size,
        align: Size,
        count: Size,
    ) -> AllocResult<()> {
        (**self).resize(addr, size, align, count)
    }

    #[inline]
    unsafe fn free(&mut self, addr: NonNull<u8>) {
        (**self).free(addr)
    }
}

unsafe impl<A: Allocator + ?Sized> Allocator for Box<A> {
    #[inline]
    fn allocate(&mut self, size: Size, align: Size, count: Size) -> AllocResult<NonNull<u8>> {
        (**self).allocate(size, align, count)
    }

    #[inline]
    unsafe fn resize(
        &mut self,
        addr: NonNull<u8>,
        size: Size,
        align: Size,
        count: Size,
    ) -> AllocResult<()> {
        (**self).resize(addr, size, align, count)
    }

    #[inline]
    unsafe fn free(&mut self, addr: NonNull<u8>) {
        (**self).free(addr)
    }
}
