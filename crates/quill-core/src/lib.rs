//! Quill Core
//!
//! Shared building blocks for the quill crates: generational handle storage,
//! fast hash collections, rectangles, logging setup and profiling scopes.

pub mod alloc;
pub mod geometry;
pub mod logging;
pub mod profiling;
