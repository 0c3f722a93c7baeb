/*!
 * Page Guards
 *
 * RAII ownership of a page chunk with automatic release
 */

use super::manager::return_pages;
use super::types::{PageChunk, PageResult};
use crate::core::types::Size;
use tracing::warn;

/// Scoped page chunk that is returned to the host on drop
///
/// # Example
///
/// ```ignore
/// let mut pages = page_manager.request_guarded(4)?;
/// pages.as_mut_slice().fill(0);
/// // Pages returned on drop
/// ```
#[derive(Debug)]
pub struct PageGuard {
    chunk: PageChunk,
    page_size: Size,
}

impl PageGuard {
    pub(crate) fn new(chunk: PageChunk, page_size: Size) -> Self {
        Self { chunk, page_size }
    }

    /// Borrow the underlying descriptor
    #[inline]
    pub fn chunk(&self) -> &PageChunk {
        &self.chunk
    }

    #[inline]
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    /// Base address (null once released)
    #[inline]
    pub fn as_ptr(&self) -> *mut u8 {
        self.chunk.as_ptr()
    }

    /// Byte length of the owned region (zero once released)
    #[inline]
    pub fn byte_len(&self) -> Size {
        self.chunk.byte_len(self.page_size).unwrap_or(0)
    }

    /// View the pages as bytes
    pub fn as_slice(&self) -> &[u8] {
        match self.chunk.start() {
            // SAFETY: the guard owns a live, committed, zero-filled mapping of byte_len bytes.
            Some(start) => unsafe { std::slice::from_raw_parts(start.as_ptr(), self.byte_len()) },
            None => &[],
        }
    }

    /// View the pages as mutable bytes
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self.chunk.start() {
            // SAFETY: as above, and `&mut self` makes the borrow unique.
            Some(start) => unsafe {
                std::slice::from_raw_parts_mut(start.as_ptr(), self.byte_len())
            },
            None => &mut [],
        }
    }

    /// Return the pages now instead of at drop
    ///
    /// On failure the guard keeps the chunk and tries again when dropped.
    pub fn release(&mut self) -> PageResult<()> {
        // SAFETY: the chunk was requested with this page size and slices borrowed
        // from the guard cannot outlive `&mut self`.
        unsafe { return_pages(self.page_size, &mut self.chunk) }
    }

    /// Hand the descriptor back to manual management
    pub fn into_chunk(mut self) -> PageChunk {
        std::mem::take(&mut self.chunk)
    }
}

impl Drop for PageGuard {
    fn drop(&mut self) {
        if self.chunk.is_released() {
            return;
        }
        if let Err(e) = self.release() {
            warn!(error = %e, "Failed to return pages on drop");
        }
    }
}
