// Core modules implementing the native binding, session facade, and error modeling.
pub mod error;
pub mod flags;
pub mod native;
pub mod session;
pub mod transform;
