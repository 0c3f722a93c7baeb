/*!
 * Error Types
 * Centralized re-exports of the crate's error enums
 */

// Re-export PageError from page module
pub use crate::page::{PageError, PageResult};

// Re-export AllocError from allocator module
pub use crate::allocator::{AllocError, AllocResult};
