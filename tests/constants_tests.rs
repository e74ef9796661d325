// Host-side tests for the web frontend's constants.
// The main crate is wasm-only, so the pure-Rust module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use scene_core::{SceneConfig, ShadingBlock};

#[test]
#[allow(clippy::assertions_on_constants)]
fn msaa_request_is_a_webgpu_sample_count() {
    assert!(MSAA_SAMPLES == 1 || MSAA_SAMPLES == 4);
    assert!(WHEEL_DEADZONE_PX >= 0.0);
}

#[test]
fn shading_uniform_size_matches_block() {
    assert_eq!(SHADING_UNIFORM_SIZE as usize, std::mem::size_of::<ShadingBlock>());
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn uniform_sizes_respect_wgsl_alignment() {
    for size in [
        GLOBALS_UNIFORM_SIZE,
        SHADING_UNIFORM_SIZE,
        OBJECT_UNIFORM_SIZE,
        OVERLAY_UNIFORM_SIZE,
    ] {
        assert_eq!(size % 16, 0, "uniform block of {} bytes", size);
    }
    // mat4 + three vec4
    assert_eq!(GLOBALS_UNIFORM_SIZE, 64 + 3 * 16);
    // mat4 + mat3x4
    assert_eq!(OBJECT_UNIFORM_SIZE, 64 + 3 * 16);
}

#[test]
fn every_query_key_is_understood_by_the_config() {
    for key in QUERY_KEYS {
        let mut config = SceneConfig::default();
        assert!(config.apply_override(key, "1"), "key {} rejected", key);
    }
}

#[test]
fn dom_hooks_are_non_empty() {
    assert!(!CANVAS_ID.is_empty());
    assert!(LOADER_SELECTOR.starts_with('.'));
    assert!(!PANEL_ID.is_empty());
}
