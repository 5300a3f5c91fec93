//! Purpose: Safe Rust bindings for the Augeas configuration editing library.
//! Exports: `api` (the supported surface) and `core` (binding internals).
//! Role: Library crate; all native calls happen behind `api::Augeas`.
//! Invariants: Sessions are single-threaded; the type system enforces it.
//! Invariants: Callers never see raw handles or native-owned memory.
pub mod api;
pub mod core;

pub use api::{Augeas, Error, ErrorKind, Flags, NativeCode, Transform};
