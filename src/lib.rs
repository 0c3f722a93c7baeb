/*!
 * AllocKit
 *
 * Building blocks for allocator implementations:
 * - Page manager: reserve/commit and release whole virtual memory pages
 *   on Linux (mmap) and Windows (VirtualAlloc)
 * - Allocator interface: the allocate/resize/free contract that lets
 *   generic code use any allocation strategy interchangeably
 *
 * The two halves are independent. Concrete allocators typically take
 * their backing memory from the page manager and expose it through
 * the allocator interface.
 */

pub mod allocator;
pub mod core;
pub mod logging;
pub mod page;

// Re-exports
pub use allocator::{AllocError, AllocResult, Allocator, AllocatorExt, AllocatorHandle, ArrayLayout};
pub use logging::{init_tracing, try_init_tracing};
pub use page::{
    get_page_size, request_pages, return_pages, PageChunk, PageConfig, PageError, PageGuard,
    PageManager, PageResult,
};
