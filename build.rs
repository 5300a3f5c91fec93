//! Purpose: Link the system Augeas library into the Rust crate.
//! Role: Cargo build-script; emits link directives and rebuild triggers.
//! Invariants: Never compiles or vendors native sources; the library must
//! already be installed.
//! Invariants: `AUGEAS_LIB_DIR` adds a search path; `AUGEAS_STATIC` flips
//! the link mode to static.
use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=AUGEAS_LIB_DIR");
    println!("cargo:rerun-if-env-changed=AUGEAS_STATIC");

    if let Some(dir) = env::var("AUGEAS_LIB_DIR").ok().filter(|dir| !dir.is_empty()) {
        println!("cargo:rustc-link-search=native={dir}");
    }

    let static_link = env::var("AUGEAS_STATIC")
        .map(|value| !value.is_empty() && value != "0")
        .unwrap_or(false);
    let mode = if static_link { "static" } else { "dylib" };
    println!("cargo:rustc-link-lib={mode}=augeas");
}
