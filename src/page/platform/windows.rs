/*!
 * Windows Page Backend
 * Committed reservations through VirtualAlloc/VirtualFree
 */

use super::PageBackend;
use crate::core::types::Size;
use crate::page::types::{PageError, PageResult};
use std::ffi::c_void;
use std::mem::MaybeUninit;
use std::num::NonZeroUsize;
use std::ptr::{self, NonNull};
use windows_sys::Win32::System::Memory::{
    VirtualAlloc, VirtualFree, MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_READWRITE,
};
use windows_sys::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};

pub(crate) struct WindowsPages;

fn last_os_code() -> i32 {
    std::io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

impl PageBackend for WindowsPages {
    fn page_size() -> PageResult<Size> {
        let mut info = MaybeUninit::<SYSTEM_INFO>::zeroed();
        // SAFETY: GetSystemInfo fills the whole struct and cannot fail.
        let info = unsafe {
            GetSystemInfo(info.as_mut_ptr());
            info.assume_init()
        };

        match info.dwPageSize {
            0 => Err(PageError::PageSizeUnavailable),
            size => Ok(size as Size),
        }
    }

    unsafe fn map(hint: Option<NonNull<u8>>, length: NonZeroUsize) -> PageResult<NonNull<u8>> {
        let base = hint.map_or(ptr::null(), |h| h.as_ptr() as *const c_void);

        // An explicit base address is never advisory for VirtualAlloc.
        let mapped = VirtualAlloc(base, length.get(), MEM_COMMIT | MEM_RESERVE, PAGE_READWRITE);

        NonNull::new(mapped.cast::<u8>()).ok_or_else(|| PageError::MapFailed {
            length: length.get(),
            code: last_os_code(),
        })
    }

    unsafe fn unmap(start: NonNull<u8>, length: Size) -> PageResult<()> {
        // MEM_RELEASE frees the whole reservation and requires a zero size.
        if VirtualFree(start.as_ptr().cast(), 0, MEM_RELEASE) == 0 {
            return Err(PageError::UnmapFailed {
                address: start.as_ptr() as usize,
                length,
                code: last_os_code(),
            });
        }
        Ok(())
    }
}
