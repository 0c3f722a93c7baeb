/*!
 * Typed Allocation Helpers
 * Element-typed wrappers over the raw allocate/resize/free contract
 */

use super::traits::Allocator;
use super::types::{AllocResult, ArrayLayout};
use crate::core::types::Size;
use std::ptr::{self, NonNull};
use tracing::trace;

/// Typed helpers available on every `Allocator`, including `dyn Allocator`
pub trait AllocatorExt: Allocator {
    /// Allocate room for `count` values of `T`
    fn alloc_array<T>(&mut self, count: Size) -> AllocResult<NonNull<T>> {
        let layout = ArrayLayout::of::<T>(count)?;
        let ptr = self.allocate(layout.size(), layout.align(), layout.count())?;
        debug_assert!(layout.is_aligned(ptr), "allocator returned a misaligned pointer");
        Ok(ptr.cast())
    }

    /// Resize an array allocation to `count` values in place
    ///
    /// # Safety
    ///
    /// `ptr` must be a live allocation of `T`s from this allocator.
    unsafe fn resize_array<T>(&mut self, ptr: NonNull<T>, count: Size) -> AllocResult<()> {
        let layout = ArrayLayout::of::<T>(count)?;
        debug_assert!(layout.is_aligned(ptr.cast()), "resize of a misaligned allocation");
        self.resize(ptr.cast(), layout.size(), layout.align(), layout.count())
    }

    /// Free an array allocation
    ///
    /// # Safety
    ///
    /// `ptr` must be a live allocation from this allocator and must not be used afterwards.
    unsafe fn free_array<T>(&mut self, ptr: NonNull<T>) {
        self.free(ptr.cast())
    }

    /// Grow or shrink an array, moving it when an in-place resize is refused
    ///
    /// The first `min(old_count, new_count)` values are preserved. On error the
    /// original allocation is untouched.
    ///
    /// # Safety
    ///
    /// `ptr` must be a live allocation of `old_count` `T`s from this allocator.
    /// If the allocation moves, `ptr` is freed and must not be used afterwards.
    unsafe fn reallocate_array<T>(
        &mut self,
        ptr: NonNull<T>,
        old_count: Size,
        new_count: Size,
    ) -> AllocResult<NonNull<T>> {
        match self.resize_array(ptr, new_count) {
            Ok(()) => return Ok(ptr),
            Err(e) => trace!(error = %e, "In-place resize refused, moving allocation"),
        }

        let moved = self.alloc_array::<T>(new_count)?;
        ptr::copy_nonoverlapping(ptr.as_ptr(), moved.as_ptr(), old_count.min(new_count));
        self.free_array(ptr);
        Ok(moved)
    }
}

impl<A: Allocator + ?Sized> AllocatorExt for A {}
