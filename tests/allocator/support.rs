/*!
 * Test Allocators
 * Independent strategies implementing the allocator interface
 */

use allockit::{
    AllocError, AllocResult, Allocator, ArrayLayout, PageGuard, PageManager, PageResult,
};
use std::alloc::Layout;
use std::collections::HashMap;
use std::ptr::NonNull;

/// Bump allocator over a fixed run of pages
///
/// Only the most recent allocation can be resized or freed (rewinding the cursor).
pub struct PageBumpAllocator {
    pages: PageGuard,
    offset: usize,
    last: Option<usize>,
}

impl PageBumpAllocator {
    pub fn new(manager: &PageManager, pages: usize) -> PageResult<Self> {
        Ok(Self {
            pages: manager.request_guarded(pages)?,
            offset: 0,
            last: None,
        })
    }

    pub fn capacity(&self) -> usize {
        self.pages.byte_len()
    }

    pub fn used(&self) -> usize {
        self.offset
    }

    fn base(&self) -> usize {
        self.pages.as_ptr() as usize
    }
}

unsafe impl Allocator for PageBumpAllocator {
    fn allocate(&mut self, size: usize, align: usize, count: usize) -> AllocResult<NonNull<u8>> {
        let layout = ArrayLayout::new(size, align, count)?;
        if align > self.pages.page_size() {
            return Err(AllocError::UnsupportedAlignment {
                align,
                max: self.pages.page_size(),
            });
        }

        let base = self.base();
        let start = (base + self.offset).next_multiple_of(align) - base;
        let available = self.capacity() - self.offset;
        let end = start
            .checked_add(layout.byte_len())
            .filter(|&end| end <= self.capacity())
            .ok_or(AllocError::OutOfMemory {
                requested: layout.byte_len(),
                available,
            })?;

        self.offset = end;
        self.last = Some(start);
        NonNull::new((base + start) as *mut u8).ok_or(AllocError::OutOfMemory {
            requested: layout.byte_len(),
            available,
        })
    }

    unsafe fn resize(
        &mut self,
        addr: NonNull<u8>,
        size: usize,
        align: usize,
        count: usize,
    ) -> AllocResult<()> {
        let layout = ArrayLayout::new(size, align, count)?;
        let start = addr.as_ptr() as usize - self.base();
        let refused = AllocError::ResizeRefused {
            address: addr.as_ptr() as usize,
            requested: layout.byte_len(),
        };

        if self.last != Some(start) || !layout.is_aligned(addr) {
            return Err(refused);
        }
        match start.checked_add(layout.byte_len()) {
            Some(end) if end <= self.capacity() => {
                self.offset = end;
                Ok(())
            }
            _ => Err(refused),
        }
    }

    unsafe fn free(&mut self, addr: NonNull<u8>) {
        let start = addr.as_ptr() as usize - self.base();
        if self.last == Some(start) {
            self.offset = start;
            self.last = None;
        }
    }
}

/// Heap-backed allocator that can only shrink in place
#[derive(Default)]
pub struct HeapAllocator {
    live: HashMap<usize, Layout>,
}

impl HeapAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_allocations(&self) -> usize {
        self.live.len()
    }
}

unsafe impl Allocator for HeapAllocator {
    fn allocate(&mut self, size: usize, align: usize, count: usize) -> AllocResult<NonNull<u8>> {
        let layout = ArrayLayout::new(size, align, count)?;
        let std_layout = ArrayLayout::new(layout.byte_len().max(1), align, 1)?.to_layout()?;

        // SAFETY: the layout has a non-zero size.
        let ptr = NonNull::new(unsafe { std::alloc::alloc(std_layout) }).ok_or(
            AllocError::OutOfMemory {
                requested: layout.byte_len(),
                available: 0,
            },
        )?;

        self.live.insert(ptr.as_ptr() as usize, std_layout);
        Ok(ptr)
    }

    unsafe fn resize(
        &mut self,
        addr: NonNull<u8>,
        size: usize,
        align: usize,
        count: usize,
    ) -> AllocResult<()> {
        let layout = ArrayLayout::new(size, align, count)?;
        match self.live.get(&(addr.as_ptr() as usize)) {
            Some(existing) if layout.byte_len() <= existing.size() && align <= existing.align() => {
                Ok(())
            }
            _ => Err(AllocError::ResizeRefused {
                address: addr.as_ptr() as usize,
                requested: layout.byte_len(),
            }),
        }
    }

    unsafe fn free(&mut self, addr: NonNull<u8>) {
        if let Some(layout) = self.live.remove(&(addr.as_ptr() as usize)) {
            std::alloc::dealloc(addr.as_ptr(), layout);
        }
    }
}

impl Drop for HeapAllocator {
    fn drop(&mut self) {
        for (addr, layout) in self.live.drain() {
            // SAFETY: every live entry came from std::alloc::alloc with this layout.
            unsafe { std::alloc::dealloc(addr as *mut u8, layout) };
        }
    }
}

/// Allocator that only implements `allocate`, keeping the default resize and free
pub struct AllocateOnly<A>(pub A);

unsafe impl<A: Allocator> Allocator for AllocateOnly<A> {
    fn allocate(&mut self, size: usize, align: usize, count: usize) -> AllocResult<NonNull<u8>> {
        self.0.allocate(size, align, count)
    }
}
