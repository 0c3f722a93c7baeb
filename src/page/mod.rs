/*!
 * Page Module
 * Platform-agnostic acquisition and release of whole virtual memory pages
 */

pub mod config;
pub mod guard;
pub mod manager;
mod platform;
pub mod types;

// Re-export for convenience
pub use config::PageConfig;
pub use guard::PageGuard;
pub use manager::{get_page_size, request_pages, return_pages, PageManager};
pub use types::*;
