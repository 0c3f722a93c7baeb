/*!
 * Page Manager
 *
 * Page-granular reserve/commit and release of virtual memory.
 *
 * The free functions are the stateless core. `PageManager` caches the
 * host page size together with a `PageConfig` and is what most callers
 * (allocator backends in particular) hold on to.
 */

use super::config::PageConfig;
use super::guard::PageGuard;
use super::platform::{Native, PageBackend};
use super::types::{PageChunk, PageError, PageResult};
use crate::core::types::{PageCount, Size};
use std::num::NonZeroUsize;
use std::ptr::NonNull;
use tracing::{debug, info, instrument, trace, warn};

/// Query the host's native page size in bytes
///
/// Never blocks and has no side effects.
pub fn get_page_size() -> PageResult<Size> {
    Native::page_size()
}

/// Reserve and commit `count` read/write pages
///
/// `page_size` must come from [`get_page_size`]; it is not validated against the host.
/// The byte length is overflow-checked before any native call is issued, and
/// zero-length requests are rejected the same way on every host.
///
/// With a `hint`, placement is mandatory: the returned chunk starts exactly at
/// the hint or the call fails.
///
/// # Safety
///
/// With `hint = None` this is always sound. With a hint, any existing mapping in
/// `[hint, hint + page_size * count)` is replaced, so the caller must own that
/// range or know it to be unused.
#[instrument(level = "trace")]
pub unsafe fn request_pages(
    page_size: Size,
    hint: Option<NonNull<u8>>,
    count: PageCount,
) -> PageResult<PageChunk> {
    let Some(length) = page_size.checked_mul(count) else {
        trace!("Rejecting overflowing page request");
        return Err(PageError::Overflow { page_size, count });
    };

    let Some(length) = NonZeroUsize::new(length) else {
        trace!("Rejecting zero-length page request");
        return Err(PageError::ZeroLength { page_size, count });
    };

    if let Some(hint) = hint {
        let address = hint.as_ptr() as usize;
        if address % page_size != 0 {
            return Err(PageError::MisalignedHint {
                hint: address,
                page_size,
            });
        }
    }

    let start = Native::map(hint, length).inspect_err(|e| {
        warn!(error = %e, length = length.get(), "Page request failed");
    })?;

    if let Some(hint) = hint {
        if start != hint {
            let actual = start.as_ptr() as usize;
            if let Err(e) = Native::unmap(start, length.get()) {
                warn!(error = %e, "Failed to release misplaced mapping");
            }
            return Err(PageError::Misplaced {
                hint: hint.as_ptr() as usize,
                actual,
            });
        }
    }

    debug!(address = ?start, length = length.get(), "Mapped {} pages", count);
    Ok(PageChunk::mapped(start, count))
}

/// Release every page described by `chunk`
///
/// On success the chunk's start is cleared, leaving an inert descriptor.
/// On failure the chunk is untouched and still owns its region.
///
/// # Safety
///
/// `chunk` must come from [`request_pages`] with the same `page_size`, and no
/// references into the region may be used after this call.
#[instrument(level = "trace")]
pub unsafe fn return_pages(page_size: Size, chunk: &mut PageChunk) -> PageResult<()> {
    let Some(start) = chunk.start() else {
        return Err(PageError::AlreadyReleased);
    };

    let count = chunk.count();
    let length = page_size
        .checked_mul(count)
        .ok_or(PageError::Overflow { page_size, count })?;

    Native::unmap(start, length).inspect_err(|e| {
        warn!(error = %e, "Page release failed");
    })?;

    chunk.clear();
    debug!(address = ?start, length, "Unmapped {} pages", count);
    Ok(())
}

/// Page manager bound to the host page size
#[derive(Debug, Clone)]
pub struct PageManager {
    page_size: Size,
    config: PageConfig,
}

impl PageManager {
    /// Create a page manager with the default (unbounded) configuration
    pub fn new() -> PageResult<Self> {
        Self::with_config(PageConfig::default())
    }

    /// Create a page manager with custom configuration
    pub fn with_config(config: PageConfig) -> PageResult<Self> {
        let page_size = get_page_size()?;
        info!(
            page_size,
            max_pages = ?config.max_pages_per_request,
            "Page manager initialized"
        );
        Ok(Self { page_size, config })
    }

    #[inline]
    pub fn page_size(&self) -> Size {
        self.page_size
    }

    #[inline]
    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Pages needed to hold `bytes`, rounded up
    #[inline]
    pub fn pages_for(&self, bytes: Size) -> PageCount {
        bytes.div_ceil(self.page_size)
    }

    /// Byte length of `count` pages
    pub fn bytes_for(&self, count: PageCount) -> PageResult<Size> {
        self.page_size
            .checked_mul(count)
            .ok_or(PageError::Overflow {
                page_size: self.page_size,
                count,
            })
    }

    fn check_request(&self, count: PageCount) -> PageResult<()> {
        self.bytes_for(count)?;
        match self.config.max_pages_per_request {
            Some(limit) if count > limit => Err(PageError::LimitExceeded {
                requested: count,
                limit,
            }),
            _ => Ok(()),
        }
    }

    /// Request `count` pages wherever the host places them
    pub fn request(&self, count: PageCount) -> PageResult<PageChunk> {
        self.check_request(count)?;
        // SAFETY: no hint, so no existing mapping can be replaced.
        unsafe { request_pages(self.page_size, None, count) }
    }

    /// Request `count` pages at exactly `hint`
    ///
    /// # Safety
    ///
    /// Same contract as [`request_pages`] with a hint.
    pub unsafe fn request_at(&self, hint: NonNull<u8>, count: PageCount) -> PageResult<PageChunk> {
        self.check_request(count)?;
        request_pages(self.page_size, Some(hint), count)
    }

    /// Return a chunk obtained from this manager
    ///
    /// # Safety
    ///
    /// Same contract as [`return_pages`]; the chunk must come from a manager
    /// with this page size.
    pub unsafe fn release(&self, chunk: &mut PageChunk) -> PageResult<()> {
        return_pages(self.page_size, chunk)
    }

    /// Request `count` pages owned by a guard that returns them on drop
    pub fn request_guarded(&self, count: PageCount) -> PageResult<PageGuard> {
        let chunk = self.request(count)?;
        Ok(PageGuard::new(chunk, self.page_size))
    }
}
