//! Unit tests for target_pool.rs
//!
//! Validates the role invariants of the ping-pong pool: read and write are
//! always distinct, swapping is role-only, resizing preserves roles.

use std::sync::Arc;

use crate::error::Error;
use crate::renderer::mock_renderer::MockRenderer;
use crate::renderer::{RenderTarget, Renderer, TargetDesc, TextureFormat};
use crate::target::TargetPool;

fn make_pool(mock: &mut MockRenderer) -> TargetPool {
    TargetPool::new(mock, TargetDesc::new(320, 240, TextureFormat::R8G8B8A8_UNORM)).unwrap()
}

// ============================================================================
// CONSTRUCTION
// ============================================================================

#[test]
fn test_pool_allocates_two_matching_buffers() {
    let mut mock = MockRenderer::new();
    let pool = make_pool(&mut mock);

    assert_eq!(pool.read().width(), 320);
    assert_eq!(pool.read().height(), 240);
    assert_eq!(pool.write().width(), 320);
    assert_eq!(pool.write().height(), 240);
    assert_eq!(pool.read().format(), pool.write().format());
}

#[test]
fn test_pool_allocation_failure_propagates() {
    let mut mock = MockRenderer::new();
    mock.fail_allocation = true;
    let result = TargetPool::new(
        &mut mock,
        TargetDesc::new(320, 240, TextureFormat::R8G8B8A8_UNORM),
    );
    assert!(matches!(result, Err(Error::OutOfMemory)));
}

// ============================================================================
// ROLE DISTINCTNESS
// ============================================================================

#[test]
fn test_read_and_write_are_distinct_buffers() {
    let mut mock = MockRenderer::new();
    let mut pool = make_pool(&mut mock);

    assert!(!Arc::ptr_eq(pool.read(), pool.write()));
    pool.swap();
    assert!(!Arc::ptr_eq(pool.read(), pool.write()));
}

// ============================================================================
// SWAP
// ============================================================================

#[test]
fn test_swap_exchanges_roles() {
    let mut mock = MockRenderer::new();
    let mut pool = make_pool(&mut mock);

    let read_before = pool.read().clone();
    let write_before = pool.write().clone();
    pool.swap();
    assert!(Arc::ptr_eq(pool.read(), &write_before));
    assert!(Arc::ptr_eq(pool.write(), &read_before));
}

#[test]
fn test_double_swap_restores_original_assignment() {
    let mut mock = MockRenderer::new();
    let mut pool = make_pool(&mut mock);

    let read_before = pool.read().clone();
    let write_before = pool.write().clone();
    pool.swap();
    pool.swap();
    assert!(Arc::ptr_eq(pool.read(), &read_before));
    assert!(Arc::ptr_eq(pool.write(), &write_before));
}

// ============================================================================
// RESIZE
// ============================================================================

#[test]
fn test_resize_updates_both_buffers() {
    let mut mock = MockRenderer::new();
    let mut pool = make_pool(&mut mock);

    pool.resize(800, 600).unwrap();
    assert_eq!(pool.read().width(), 800);
    assert_eq!(pool.read().height(), 600);
    assert_eq!(pool.write().width(), 800);
    assert_eq!(pool.write().height(), 600);
    assert_eq!(pool.desc().width, 800);
    assert_eq!(pool.desc().height, 600);
}

#[test]
fn test_resize_preserves_role_assignment() {
    let mut mock = MockRenderer::new();
    let mut pool = make_pool(&mut mock);

    pool.swap();
    let read_before = pool.read().clone();
    let write_before = pool.write().clone();
    pool.resize(100, 100).unwrap();
    assert!(Arc::ptr_eq(pool.read(), &read_before));
    assert!(Arc::ptr_eq(pool.write(), &write_before));
}

// ============================================================================
// DISPOSE
// ============================================================================

#[test]
fn test_dispose_releases_both_buffers() {
    let mut mock = MockRenderer::new();
    let pool = make_pool(&mut mock);

    pool.dispose();

    assert_eq!(mock.created_targets.len(), 2);
    assert_eq!(mock.created_targets[0].dispose_count(), 1);
    assert_eq!(mock.created_targets[1].dispose_count(), 1);
}
