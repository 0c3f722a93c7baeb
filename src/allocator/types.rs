/*!
 * Allocator Types
 * Common types for allocator implementations
 */

use crate::core::types::{Address, Size};
use crate::page::PageError;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::alloc::Layout;
use std::ptr::NonNull;
use thiserror::Error;

/// Allocator operation result
pub type AllocResult<T> = Result<T, AllocError>;

/// Allocator errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
#[non_exhaustive]
pub enum AllocError {
    #[error("Invalid alignment {0}: must be a non-zero power of two")]
    #[diagnostic(code(alloc::invalid_alignment))]
    InvalidAlignment(Size),

    #[error("Alignment {align} not supported (maximum {max})")]
    #[diagnostic(
        code(alloc::unsupported_alignment),
        help("This allocator cannot honor the alignment. Use one with a larger granularity.")
    )]
    UnsupportedAlignment { align: Size, max: Size },

    #[error("Allocation size overflows: {count} elements of {size} bytes")]
    #[diagnostic(code(alloc::size_overflow))]
    SizeOverflow { size: Size, count: Size },

    #[error("Out of memory: requested {requested} bytes, available {available} bytes")]
    #[diagnostic(
        code(alloc::out_of_memory),
        help("The allocator's backing storage is exhausted.")
    )]
    OutOfMemory { requested: Size, available: Size },

    #[error("Allocator does not support resizing")]
    #[diagnostic(
        code(alloc::resize_unsupported),
        help("Fall back to allocate, copy and free.")
    )]
    ResizeUnsupported,

    #[error("Cannot resize allocation at 0x{address:x} to {requested} bytes in place")]
    #[diagnostic(
        code(alloc::resize_refused),
        help("The allocation is unchanged. Fall back to allocate, copy and free.")
    )]
    ResizeRefused { address: Address, requested: Size },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Pages(#[from] PageError),
}

/// Validated `(size, align, count)` request
///
/// `align` is a non-zero power of two and `size * count` fits in `usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayLayout {
    size: Size,
    align: Size,
    count: Size,
}

impl ArrayLayout {
    pub fn new(size: Size, align: Size, count: Size) -> AllocResult<Self> {
        if !align.is_power_of_two() {
            return Err(AllocError::InvalidAlignment(align));
        }
        if size.checked_mul(count).is_none() {
            return Err(AllocError::SizeOverflow { size, count });
        }
        Ok(Self { size, align, count })
    }

    /// Layout of `count` values of `T`
    pub fn of<T>(count: Size) -> AllocResult<Self> {
        Self::new(std::mem::size_of::<T>(), std::mem::align_of::<T>(), count)
    }

    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    #[inline]
    pub fn align(&self) -> Size {
        self.align
    }

    #[inline]
    pub fn count(&self) -> Size {
        self.count
    }

    /// Total bytes (`size * count`)
    #[inline]
    pub fn byte_len(&self) -> Size {
        self.size * self.count
    }

    #[inline]
    pub fn is_aligned(&self, addr: NonNull<u8>) -> bool {
        (addr.as_ptr() as usize) % self.align == 0
    }

    /// Equivalent `std::alloc::Layout`, for heap-backed implementations
    pub fn to_layout(&self) -> AllocResult<Layout> {
        Layout::from_size_align(self.byte_len(), self.align).map_err(|_| AllocError::SizeOverflow {
            size: self.size,
            count: self.count,
        })
    }
}
