// Public API exports (controller logic compiles on both targets)
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod shared;
pub mod widgets;

// Browser bindings (NOT compiled for the native test build)
#[cfg(target_arch = "wasm32")]
pub mod mount;
