/*!
 * Linux Page Backend
 * Anonymous private mappings through mmap/munmap
 */

use super::PageBackend;
use crate::core::types::Size;
use crate::page::types::{PageError, PageResult};
use nix::sys::mman::{mmap_anonymous, munmap, MapFlags, ProtFlags};
use nix::unistd::{sysconf, SysconfVar};
use std::num::NonZeroUsize;
use std::ptr::NonNull;

pub(crate) struct LinuxPages;

impl PageBackend for LinuxPages {
    fn page_size() -> PageResult<Size> {
        match sysconf(SysconfVar::PAGE_SIZE) {
            Ok(Some(size)) if size > 0 => Ok(size as Size),
            _ => Err(PageError::PageSizeUnavailable),
        }
    }

    unsafe fn map(hint: Option<NonNull<u8>>, length: NonZeroUsize) -> PageResult<NonNull<u8>> {
        let mut flags = MapFlags::MAP_PRIVATE | MapFlags::MAP_ANONYMOUS;
        if hint.is_some() {
            flags |= MapFlags::MAP_FIXED;
        }

        let addr = hint.and_then(|h| NonZeroUsize::new(h.as_ptr() as usize));
        let prot = ProtFlags::PROT_READ | ProtFlags::PROT_WRITE;

        let mapped = mmap_anonymous(addr, length, prot, flags).map_err(|errno| {
            PageError::MapFailed {
                length: length.get(),
                code: errno as i32,
            }
        })?;

        Ok(mapped.cast())
    }

    unsafe fn unmap(start: NonNull<u8>, length: Size) -> PageResult<()> {
        munmap(start.cast(), length).map_err(|errno| PageError::UnmapFailed {
            address: start.as_ptr() as usize,
            length,
            code: errno as i32,
        })
    }
}
