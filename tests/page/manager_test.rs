/*!
 * Page Manager Tests
 * Configured requests and guard ownership
 */

use allockit::{PageConfig, PageError, PageManager};
use pretty_assertions::assert_eq;

#[test]
fn test_manager_round_trip() {
    allockit::init_tracing();
    let manager = PageManager::new().unwrap();

    let mut chunk = manager.request(2).unwrap();
    assert_eq!(chunk.count(), 2);
    assert_eq!(
        chunk.byte_len(manager.page_size()),
        Some(2 * manager.page_size())
    );

    unsafe { manager.release(&mut chunk) }.unwrap();
    assert!(chunk.is_released());
}

#[test]
fn test_restricted_manager_rejects_large_requests() {
    let manager = PageManager::with_config(PageConfig::restricted()).unwrap();
    let limit = manager.config().max_pages_per_request.unwrap();

    let mut chunk = manager.request(limit).unwrap();
    unsafe { manager.release(&mut chunk) }.unwrap();

    assert_eq!(
        manager.request(limit + 1).unwrap_err(),
        PageError::LimitExceeded {
            requested: limit + 1,
            limit
        }
    );
}

#[test]
fn test_overflow_reported_before_limit() {
    let manager = PageManager::with_config(PageConfig::restricted()).unwrap();
    assert!(matches!(
        manager.request(usize::MAX),
        Err(PageError::Overflow { .. })
    ));
}

#[test]
fn test_guard_owns_pages_until_dropped() {
    let manager = PageManager::new().unwrap();
    let page_size = manager.page_size();

    let mut guard = manager.request_guarded(4).unwrap();
    assert_eq!(guard.page_size(), page_size);
    assert_eq!(guard.byte_len(), 4 * page_size);

    let bytes = guard.as_mut_slice();
    bytes[0] = 1;
    bytes[4 * page_size - 1] = 2;
    assert_eq!(guard.as_slice()[0], 1);
    assert_eq!(guard.as_slice()[4 * page_size - 1], 2);

    drop(guard);
}

#[test]
fn test_guards_are_disjoint() {
    let manager = PageManager::new().unwrap();
    let a = manager.request_guarded(1).unwrap();
    let b = manager.request_guarded(1).unwrap();

    let a_start = a.as_ptr() as usize;
    let b_start = b.as_ptr() as usize;
    assert!(a_start + a.byte_len() <= b_start || b_start + b.byte_len() <= a_start);
}

#[test]
fn test_chunk_moves_across_threads() {
    let manager = PageManager::new().unwrap();
    let chunk = manager.request_guarded(1).unwrap().into_chunk();
    let page_size = manager.page_size();

    let handle = std::thread::spawn(move || {
        let mut chunk = chunk;
        unsafe {
            chunk.as_ptr().write(7);
            allockit::return_pages(page_size, &mut chunk).map(|_| chunk.is_released())
        }
    });

    assert_eq!(handle.join().unwrap(), Ok(true));
}
