/*!
 * Platform Backends
 * Native page reservation, one compilation unit per supported host
 */

use super::types::PageResult;
use crate::core::types::Size;
use std::num::NonZeroUsize;
use std::ptr::NonNull;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(windows)]
mod windows;

#[cfg(not(any(target_os = "linux", windows)))]
compile_error!("allockit: page management is only implemented for Linux and Windows hosts");

/// Host backend selected at build time
#[cfg(target_os = "linux")]
pub(crate) type Native = linux::LinuxPages;

/// Host backend selected at build time
#[cfg(windows)]
pub(crate) type Native = windows::WindowsPages;

/// Native virtual memory calls wrapped by the page manager
///
/// Backends do no argument validation; the page manager checks lengths,
/// overflow and hint alignment before calling in.
pub(crate) trait PageBackend {
    /// Native page granularity in bytes
    fn page_size() -> PageResult<Size>;

    /// Reserve and commit `length` read/write bytes
    ///
    /// A present `hint` is mandatory placement.
    ///
    /// # Safety
    ///
    /// With a hint, any existing mapping in the target range may be replaced.
    /// The caller must own that range or know it to be unused.
    unsafe fn map(hint: Option<NonNull<u8>>, length: NonZeroUsize) -> PageResult<NonNull<u8>>;

    /// Release a region previously returned by `map`
    ///
    /// # Safety
    ///
    /// `start` and `length` must describe a live mapping from `map`, and no
    /// references into it may outlive this call.
    unsafe fn unmap(start: NonNull<u8>, length: Size) -> PageResult<()>;
}
