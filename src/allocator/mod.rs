/*!
 * Allocator Module
 * Polymorphic allocation contract for pluggable allocator strategies
 */

pub mod ext;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use ext::AllocatorExt;
pub use traits::*;
pub use types::*;
