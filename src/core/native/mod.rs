//! Purpose: Typed marshaling layer between the facade and the raw C API.
//! Exports: `sys`, `ErrorApi`, `error_api`, `copy_string`, `take_string_array`.
//! Role: Everything that touches foreign pointers lives here or in `sys`.
//! Invariants: Native-owned strings are copied before control returns.
//! Invariants: Allocations handed over by `aug_match` are released exactly
//! once, with the allocator the native library used (`free(3)`).
use std::ffi::CStr;
use std::os::raw::{c_char, c_int};
use std::sync::OnceLock;

pub mod sys;

pub(crate) type ErrorCodeFn = unsafe extern "C" fn(aug: *mut sys::augeas) -> c_int;
pub(crate) type ErrorTextFn = unsafe extern "C" fn(aug: *mut sys::augeas) -> *const c_char;

/// Optional error-detail entry points, probed once per process.
///
/// Older libaugeas builds lack these symbols; a missing symbol leaves its
/// slot `None` and the binding keeps working without error enrichment.
pub(crate) struct ErrorApi {
    pub code: Option<ErrorCodeFn>,
    pub message: Option<ErrorTextFn>,
    pub minor_message: Option<ErrorTextFn>,
    pub details: Option<ErrorTextFn>,
}

impl ErrorApi {
    pub fn available(&self) -> bool {
        self.code.is_some()
    }
}

pub(crate) fn error_api() -> &'static ErrorApi {
    static API: OnceLock<ErrorApi> = OnceLock::new();
    API.get_or_init(probe_error_api)
}

#[cfg(unix)]
fn probe_error_api() -> ErrorApi {
    ErrorApi {
        code: resolve_code_fn(c"aug_error"),
        message: resolve_text_fn(c"aug_error_message"),
        minor_message: resolve_text_fn(c"aug_error_minor_message"),
        details: resolve_text_fn(c"aug_error_details"),
    }
}

#[cfg(not(unix))]
fn probe_error_api() -> ErrorApi {
    ErrorApi {
        code: None,
        message: None,
        minor_message: None,
        details: None,
    }
}

#[cfg(unix)]
fn resolve_code_fn(symbol: &CStr) -> Option<ErrorCodeFn> {
    let ptr = unsafe { libc::dlsym(libc::RTLD_DEFAULT, symbol.as_ptr()) };
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { std::mem::transmute::<*mut libc::c_void, ErrorCodeFn>(ptr) })
}

#[cfg(unix)]
fn resolve_text_fn(symbol: &CStr) -> Option<ErrorTextFn> {
    let ptr = unsafe { libc::dlsym(libc::RTLD_DEFAULT, symbol.as_ptr()) };
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { std::mem::transmute::<*mut libc::c_void, ErrorTextFn>(ptr) })
}

/// Copy a native-owned C string into a Rust `String`.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub(crate) unsafe fn copy_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let text = unsafe { CStr::from_ptr(ptr) };
    // Values come from arbitrary config files; they carry no UTF-8 promise.
    Some(text.to_string_lossy().into_owned())
}

/// Drain a `char **` result from `aug_match` into owned Rust strings.
///
/// Null entries are skipped. Every element and the array itself are freed,
/// per the native ownership contract.
///
/// # Safety
/// `array` must be null or a `free(3)`-able allocation of `count` pointers,
/// each null or a `free(3)`-able NUL-terminated string.
pub(crate) unsafe fn take_string_array(array: *mut *mut c_char, count: usize) -> Vec<String> {
    if array.is_null() {
        return Vec::new();
    }
    let items = unsafe { std::slice::from_raw_parts(array, count) };
    let mut out = Vec::with_capacity(count);
    for &item in items {
        if item.is_null() {
            continue;
        }
        let text = unsafe { CStr::from_ptr(item) };
        out.push(text.to_string_lossy().into_owned());
        unsafe { libc::free(item.cast::<libc::c_void>()) };
    }
    unsafe { libc::free(array.cast::<libc::c_void>()) };
    out
}

#[cfg(test)]
mod tests {
    use super::{copy_string, take_string_array};
    use std::ffi::CString;
    use std::os::raw::c_char;
    use std::ptr;

    // Builds a malloc'd char** the way the native library hands one over.
    #[cfg(unix)]
    fn native_array(entries: &[Option<&str>]) -> *mut *mut c_char {
        let size = entries.len() * std::mem::size_of::<*mut c_char>();
        let array = unsafe { libc::malloc(size) }.cast::<*mut c_char>();
        assert!(!array.is_null(), "malloc failed");
        for (index, entry) in entries.iter().enumerate() {
            let item = match entry {
                Some(text) => {
                    let c_text = CString::new(*text).expect("c text");
                    unsafe { libc::strdup(c_text.as_ptr()) }
                }
                None => ptr::null_mut(),
            };
            unsafe { array.add(index).write(item) };
        }
        array
    }

    #[test]
    fn copy_string_null_is_none() {
        assert_eq!(unsafe { copy_string(ptr::null()) }, None);
    }

    #[test]
    fn copy_string_copies_value() {
        let text = CString::new("127.0.0.1").expect("c text");
        let copied = unsafe { copy_string(text.as_ptr()) };
        assert_eq!(copied.as_deref(), Some("127.0.0.1"));
    }

    #[cfg(unix)]
    #[test]
    fn string_array_is_drained_in_order() {
        let array = native_array(&[Some("/files/etc/hosts/1"), Some("/files/etc/hosts/2")]);
        let out = unsafe { take_string_array(array, 2) };
        assert_eq!(out, vec!["/files/etc/hosts/1", "/files/etc/hosts/2"]);
    }

    #[cfg(unix)]
    #[test]
    fn string_array_skips_null_entries() {
        let array = native_array(&[Some("/a"), None, Some("/b")]);
        let out = unsafe { take_string_array(array, 3) };
        assert_eq!(out, vec!["/a", "/b"]);
    }

    #[test]
    fn null_array_is_empty() {
        let out = unsafe { take_string_array(ptr::null_mut(), 0) };
        assert!(out.is_empty());
    }
}
