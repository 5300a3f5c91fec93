//! Purpose: Define the stable public Rust API boundary for the binding.
//! Exports: The session type plus the value types its operations use.
//! Role: Public, additive-only surface; hides the raw native modules.
//! Invariants: This module is the only public path callers should import.
//! Invariants: Raw symbol declarations stay behind the core modules.

pub use crate::core::error::{Error, ErrorKind, NativeCode};
pub use crate::core::flags::Flags;
pub use crate::core::session::Augeas;
pub use crate::core::transform::Transform;
