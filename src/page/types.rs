/*!
 * Page Types
 * Chunk descriptor and error types for page-granular virtual memory
 */

use crate::core::types::{Address, PageCount, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::ptr::NonNull;
use thiserror::Error;

/// Page operation result
pub type PageResult<T> = Result<T, PageError>;

/// Page manager errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
#[non_exhaustive]
pub enum PageError {
    #[error("Page request overflows: {count} pages of {page_size} bytes")]
    #[diagnostic(
        code(page::overflow),
        help("The byte length does not fit in usize. Request fewer pages.")
    )]
    Overflow { page_size: Size, count: PageCount },

    #[error("Zero-length page request: {count} pages of {page_size} bytes")]
    #[diagnostic(
        code(page::zero_length),
        help("Request at least one page with a non-zero page size.")
    )]
    ZeroLength { page_size: Size, count: PageCount },

    #[error("Page request exceeds limit: requested {requested} pages, limit {limit}")]
    #[diagnostic(
        code(page::limit_exceeded),
        help("Raise max_pages_per_request or split the request.")
    )]
    LimitExceeded { requested: PageCount, limit: PageCount },

    #[error("Address hint 0x{hint:x} is not aligned to page size {page_size}")]
    #[diagnostic(code(page::misaligned_hint))]
    MisalignedHint { hint: Address, page_size: Size },

    #[error("Unable to query the host page size")]
    #[diagnostic(code(page::page_size_unavailable))]
    PageSizeUnavailable,

    #[error("Failed to map {length} bytes (os error {code})")]
    #[diagnostic(
        code(page::map_failed),
        help("The host refused the mapping. It may be out of address space or the hint may be taken.")
    )]
    MapFailed { length: Size, code: i32 },

    #[error("Mapping placed at 0x{actual:x} instead of hint 0x{hint:x}")]
    #[diagnostic(code(page::misplaced))]
    Misplaced { hint: Address, actual: Address },

    #[error("Failed to unmap {length} bytes at 0x{address:x} (os error {code})")]
    #[diagnostic(
        code(page::unmap_failed),
        help("The chunk is still mapped and remains owned by the caller.")
    )]
    UnmapFailed {
        address: Address,
        length: Size,
        code: i32,
    },

    #[error("Page chunk was already returned")]
    #[diagnostic(code(page::already_released))]
    AlreadyReleased,
}

/// Contiguous run of OS pages owned by the holder of this descriptor
///
/// `start` is `None` when the chunk was never mapped or has been returned.
/// Not `Clone`: exactly one holder owns the region.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageChunk {
    start: Option<NonNull<u8>>,
    count: PageCount,
}

// SAFETY: the region is exclusively owned by the descriptor, so moving it between threads is sound.
unsafe impl Send for PageChunk {}

impl PageChunk {
    /// Descriptor in the released state with zero pages
    pub const fn empty() -> Self {
        Self {
            start: None,
            count: 0,
        }
    }

    pub(crate) fn mapped(start: NonNull<u8>, count: PageCount) -> Self {
        Self {
            start: Some(start),
            count,
        }
    }

    /// Base address, or `None` once released
    #[inline]
    pub fn start(&self) -> Option<NonNull<u8>> {
        self.start
    }

    /// Number of pages in the region
    #[inline]
    pub fn count(&self) -> PageCount {
        self.count
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.start.is_none()
    }

    /// Base address as a raw pointer (null once released)
    #[inline]
    pub fn as_ptr(&self) -> *mut u8 {
        self.start
            .map_or(std::ptr::null_mut(), |start| start.as_ptr())
    }

    /// Byte length of the region for the given page size
    ///
    /// Returns `None` if the chunk is released or the length overflows.
    pub fn byte_len(&self, page_size: Size) -> Option<Size> {
        self.start?;
        page_size.checked_mul(self.count)
    }

    pub(crate) fn clear(&mut self) {
        self.start = None;
    }
}
