//! Purpose: Safe session facade owning one native augeas handle.
//! Exports: `Augeas` with the full lifecycle and tree-operation surface.
//! Role: The only producer/consumer of native handles; translates native
//! status codes into `Error` values.
//! Invariants: A closed session fails every operation except `close`.
//! Invariants: The handle is owned exclusively and released exactly once,
//! by `close` or by drop glue.
//! Invariants: Native-owned output is copied before the next native call.

use std::ffi::CString;
use std::fmt;
use std::os::raw::{c_char, c_int};
use std::ptr::{self, NonNull};

use tracing::{debug, trace};

use crate::core::error::{Error, ErrorKind, NativeCode};
use crate::core::flags::Flags;
use crate::core::native::{self, sys};
use crate::core::transform::Transform;

// Reserved tree region holding transform registrations.
const LOAD_REGION: &str = "/augeas/load";

/// One native editing session.
///
/// Holds a raw handle, so the type is neither `Send` nor `Sync`; the native
/// library is not thread-safe across a single handle.
pub struct Augeas {
    handle: Option<NonNull<sys::augeas>>,
}

impl Augeas {
    /// Opens a session against `root` (filesystem prefix for all lens I/O).
    ///
    /// Absent `root`/`loadpath` forward as null; the native library then
    /// falls back to the `AUGEAS_ROOT` environment variable or `/`. Root
    /// validation is entirely the native library's job.
    pub fn open(root: Option<&str>, loadpath: Option<&str>, flags: Flags) -> Result<Self, Error> {
        let root_c = opt_cstring(root, "root")?;
        let loadpath_c = opt_cstring(loadpath, "loadpath")?;

        let raw = unsafe { sys::aug_init(opt_ptr(&root_c), opt_ptr(&loadpath_c), flags.bits()) };
        let Some(handle) = NonNull::new(raw) else {
            return Err(Error::new(ErrorKind::Native)
                .with_message("aug_init returned a null handle"));
        };
        debug!(?flags, root = root.unwrap_or("<default>"), "session opened");
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Opens a session, runs `f`, and releases the handle when `f` returns
    /// or panics, propagating `f`'s value or error.
    pub fn scoped<T, F>(
        root: Option<&str>,
        loadpath: Option<&str>,
        flags: Flags,
        f: F,
    ) -> Result<T, Error>
    where
        F: FnOnce(&mut Augeas) -> Result<T, Error>,
    {
        let mut session = Self::open(root, loadpath, flags)?;
        let result = f(&mut session);
        session.close();
        result
    }

    /// Releases the native handle. Idempotent: later calls are no-ops, and
    /// every other operation on a closed session fails with
    /// `ErrorKind::Closed`.
    pub fn close(&mut self) {
        if let Some(handle) = self.handle.take() {
            unsafe { sys::aug_close(handle.as_ptr()) };
            debug!("session closed");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.handle.is_none()
    }

    /// Whether the installed library exposes the error-detail query group.
    pub fn supports_error_detail(&self) -> bool {
        native::error_api().available()
    }

    /// Reads the value at `path`: `None` when no node matches or the node
    /// has no value. Fails only on a native error (multi-match, bad path).
    pub fn get(&self, path: &str) -> Result<Option<String>, Error> {
        let handle = self.handle()?;
        let path_c = cstring(path, "path")?;
        let mut value: *const c_char = ptr::null();

        let status = unsafe { sys::aug_get(handle.as_ptr(), path_c.as_ptr(), &mut value) };
        if status < 0 {
            return Err(self.native_failure(handle, "aug_get", status).with_path(path));
        }
        if status == 0 {
            return Ok(None);
        }
        Ok(unsafe { native::copy_string(value) })
    }

    /// Whether exactly one node matches `path` (null-output probe of the
    /// same native call `get` uses).
    pub fn exists(&self, path: &str) -> Result<bool, Error> {
        let handle = self.handle()?;
        let path_c = cstring(path, "path")?;

        let status = unsafe { sys::aug_get(handle.as_ptr(), path_c.as_ptr(), ptr::null_mut()) };
        if status < 0 {
            return Err(self.native_failure(handle, "aug_get", status).with_path(path));
        }
        Ok(status == 1)
    }

    /// Writes `value` at `path`; `None` clears the node's value. Creates
    /// the node if missing.
    pub fn set(&mut self, path: &str, value: Option<&str>) -> Result<(), Error> {
        let handle = self.handle()?;
        let path_c = cstring(path, "path")?;
        let value_c = opt_cstring(value, "value")?;

        let status = unsafe { sys::aug_set(handle.as_ptr(), path_c.as_ptr(), opt_ptr(&value_c)) };
        if status != 0 {
            return Err(self.native_failure(handle, "aug_set", status).with_path(path));
        }
        Ok(())
    }

    /// Clears the value at `path`, keeping the node.
    pub fn clear(&mut self, path: &str) -> Result<(), Error> {
        self.set(path, None)
    }

    /// Evaluates a path expression and returns the matched paths in
    /// native-returned order. Zero matches is an empty vec, not an error.
    pub fn matches(&self, expr: &str) -> Result<Vec<String>, Error> {
        let handle = self.handle()?;
        let expr_c = cstring(expr, "path expression")?;
        let mut array: *mut *mut c_char = ptr::null_mut();

        let count = unsafe { sys::aug_match(handle.as_ptr(), expr_c.as_ptr(), &mut array) };
        if count < 0 {
            return Err(self.native_failure(handle, "aug_match", count).with_path(expr));
        }
        Ok(unsafe { native::take_string_array(array, count as usize) })
    }

    /// Removes `path` and everything below it; returns the number of nodes
    /// removed. Zero matches removes nothing and is not an error.
    pub fn rm(&mut self, path: &str) -> Result<u32, Error> {
        let handle = self.handle()?;
        let path_c = cstring(path, "path")?;

        let removed = unsafe { sys::aug_rm(handle.as_ptr(), path_c.as_ptr()) };
        if removed < 0 {
            return Err(self.native_failure(handle, "aug_rm", removed).with_path(path));
        }
        Ok(removed as u32)
    }

    /// Moves the subtree at `src` onto `dst`, overwriting `dst`.
    pub fn mv(&mut self, src: &str, dst: &str) -> Result<(), Error> {
        let handle = self.handle()?;
        let src_c = cstring(src, "source path")?;
        let dst_c = cstring(dst, "destination path")?;

        let status = unsafe { sys::aug_mv(handle.as_ptr(), src_c.as_ptr(), dst_c.as_ptr()) };
        if status != 0 {
            return Err(self.native_failure(handle, "aug_mv", status).with_path(src));
        }
        Ok(())
    }

    /// Creates a sibling named `label` adjacent to `path`, before or after
    /// it per `before`.
    pub fn insert(&mut self, path: &str, label: &str, before: bool) -> Result<(), Error> {
        let handle = self.handle()?;
        let path_c = cstring(path, "path")?;
        let label_c = cstring(label, "label")?;

        let status = unsafe {
            sys::aug_insert(
                handle.as_ptr(),
                path_c.as_ptr(),
                label_c.as_ptr(),
                c_int::from(before),
            )
        };
        if status != 0 {
            return Err(self.native_failure(handle, "aug_insert", status).with_path(path));
        }
        Ok(())
    }

    /// Defines the path-expression variable `name` as `expr`.
    pub fn defvar(&mut self, name: &str, expr: &str) -> Result<(), Error> {
        let handle = self.handle()?;
        let name_c = cstring(name, "variable name")?;
        let expr_c = cstring(expr, "path expression")?;

        let status = unsafe { sys::aug_defvar(handle.as_ptr(), name_c.as_ptr(), expr_c.as_ptr()) };
        if status < 0 {
            return Err(self.native_failure(handle, "aug_defvar", status));
        }
        Ok(())
    }

    /// Defines variable `name` as the nodeset `expr`, creating one node
    /// with `value` when the nodeset is empty. Returns the nodeset size.
    pub fn defnode(&mut self, name: &str, expr: &str, value: &str) -> Result<u32, Error> {
        let handle = self.handle()?;
        let name_c = cstring(name, "variable name")?;
        let expr_c = cstring(expr, "path expression")?;
        let value_c = cstring(value, "value")?;

        // The created-flag out-pointer is not surfaced; forwarded as null.
        let count = unsafe {
            sys::aug_defnode(
                handle.as_ptr(),
                name_c.as_ptr(),
                expr_c.as_ptr(),
                value_c.as_ptr(),
                ptr::null_mut(),
            )
        };
        if count < 0 {
            return Err(self.native_failure(handle, "aug_defnode", count));
        }
        Ok(count as u32)
    }

    /// Registers `transform` under the reserved load region.
    ///
    /// Validates locally before any native call. The registration is a
    /// multi-step write sequence with no atomicity guarantee; a failure
    /// partway leaves a partially written transform behind.
    pub fn transform(&mut self, transform: &Transform) -> Result<(), Error> {
        transform.validate()?;
        self.handle()?;

        let region = format!("{LOAD_REGION}/{}", transform.load_name());
        self.set(&format!("{region}/lens"), Some(&transform.lens))?;
        for pattern in &transform.incl {
            self.set(&format!("{region}/incl[last()+1]"), Some(pattern))?;
        }
        for pattern in &transform.excl {
            self.set(&format!("{region}/excl[last()+1]"), Some(pattern))?;
        }
        trace!(name = transform.load_name(), "transform registered");
        Ok(())
    }

    /// Removes every registered transform from the load region.
    pub fn clear_transforms(&mut self) -> Result<(), Error> {
        self.rm(&format!("{LOAD_REGION}/*")).map(|_| ())
    }

    /// Flushes tree edits to the filesystem (simulated under `SAVE_NOOP`).
    pub fn save(&mut self) -> Result<(), Error> {
        let handle = self.handle()?;
        let status = unsafe { sys::aug_save(handle.as_ptr()) };
        if status != 0 {
            return Err(self.native_failure(handle, "aug_save", status));
        }
        trace!("tree saved");
        Ok(())
    }

    /// Loads (or reloads) files into the tree per the registered transforms.
    pub fn load(&mut self) -> Result<(), Error> {
        let handle = self.handle()?;
        let status = unsafe { sys::aug_load(handle.as_ptr()) };
        if status != 0 {
            return Err(self.native_failure(handle, "aug_load", status));
        }
        trace!("tree loaded");
        Ok(())
    }

    fn handle(&self) -> Result<NonNull<sys::augeas>, Error> {
        self.handle
            .ok_or_else(|| Error::new(ErrorKind::Closed).with_message("session is closed"))
    }

    // Builds the error for a failed native call, enriched through the
    // error-detail capability when the installed library has it.
    fn native_failure(&self, handle: NonNull<sys::augeas>, op: &str, status: c_int) -> Error {
        let api = native::error_api();
        let mut error = Error::new(ErrorKind::Native);
        let mut message = format!("{op} failed (status {status})");

        if let Some(code_fn) = api.code {
            let raw = unsafe { code_fn(handle.as_ptr()) };
            if let Some(code) = NativeCode::from_raw(raw) {
                error = error.with_code(code);
            }
        }
        if let Some(message_fn) = api.message {
            if let Some(text) = unsafe { native::copy_string(message_fn(handle.as_ptr())) } {
                message = format!("{op}: {text}");
            }
        }
        if let Some(minor_fn) = api.minor_message {
            if let Some(minor) = unsafe { native::copy_string(minor_fn(handle.as_ptr())) } {
                message = format!("{message}: {minor}");
            }
        }
        if let Some(details_fn) = api.details {
            if let Some(details) = unsafe { native::copy_string(details_fn(handle.as_ptr())) } {
                error = error.with_details(details);
            }
        }
        error.with_message(message)
    }
}

impl Drop for Augeas {
    fn drop(&mut self) {
        self.close();
    }
}

impl fmt::Debug for Augeas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Augeas")
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn cstring(text: &str, what: &str) -> Result<CString, Error> {
    CString::new(text).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message(format!("{what} contains a null byte"))
            .with_source(err)
    })
}

fn opt_cstring(text: Option<&str>, what: &str) -> Result<Option<CString>, Error> {
    match text {
        None => Ok(None),
        Some(text) => cstring(text, what).map(Some),
    }
}

fn opt_ptr(text: &Option<CString>) -> *const c_char {
    text.as_ref().map_or(ptr::null(), |text| text.as_ptr())
}
