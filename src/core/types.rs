/*!
 * Core Types
 * Common types shared by the page manager and the allocator interface
 */

/// Address type for memory operations
pub type Address = usize;

/// Size type for memory operations
pub type Size = usize;

/// Number of pages in a region
pub type PageCount = usize;
