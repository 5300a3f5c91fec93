// Raw FFI bindings to the libaugeas C API.
//
// Only the mandatory entry points are declared here; the optional error
// query group (aug_error and friends) is resolved at runtime in the parent
// module so that older library builds without it still link.
use std::os::raw::{c_char, c_int, c_uint};

// Session-open flag bits, one native behavior per bit (aug_flags).
pub const AUG_NONE: c_uint = 0;
pub const AUG_SAVE_BACKUP: c_uint = 1 << 0;
pub const AUG_SAVE_NEWFILE: c_uint = 1 << 1;
pub const AUG_TYPE_CHECK: c_uint = 1 << 2;
pub const AUG_NO_STDINC: c_uint = 1 << 3;
pub const AUG_SAVE_NOOP: c_uint = 1 << 4;
pub const AUG_NO_LOAD: c_uint = 1 << 5;
pub const AUG_NO_MODL_AUTOLOAD: c_uint = 1 << 6;

// Error codes reported by the optional aug_error query (aug_errcode_t).
pub const AUG_NOERROR: c_int = 0;
pub const AUG_ENOMEM: c_int = 1;
pub const AUG_EINTERNAL: c_int = 2;
pub const AUG_EPATHX: c_int = 3;
pub const AUG_ENOMATCH: c_int = 4;
pub const AUG_EMMATCH: c_int = 5;
pub const AUG_ESYNTAX: c_int = 6;
pub const AUG_ENOLENS: c_int = 7;
pub const AUG_EMXFM: c_int = 8;
pub const AUG_ENOSPAN: c_int = 9;
pub const AUG_EMVDESC: c_int = 10;
pub const AUG_ECMDRUN: c_int = 11;
pub const AUG_EBADARG: c_int = 12;
pub const AUG_ELABEL: c_int = 13;
pub const AUG_ECPDESC: c_int = 14;
pub const AUG_EFILEACCESS: c_int = 15;

// Opaque handle to one native session's in-memory tree state.
#[repr(C)]
#[allow(non_camel_case_types)]
pub struct augeas {
    _private: [u8; 0],
}

unsafe extern "C" {
    pub fn aug_init(root: *const c_char, loadpath: *const c_char, flags: c_uint) -> *mut augeas;

    pub fn aug_defvar(aug: *mut augeas, name: *const c_char, expr: *const c_char) -> c_int;

    pub fn aug_defnode(
        aug: *mut augeas,
        name: *const c_char,
        expr: *const c_char,
        value: *const c_char,
        created: *mut c_int,
    ) -> c_int;

    pub fn aug_get(aug: *const augeas, path: *const c_char, value: *mut *const c_char) -> c_int;

    pub fn aug_set(aug: *mut augeas, path: *const c_char, value: *const c_char) -> c_int;

    pub fn aug_insert(
        aug: *mut augeas,
        path: *const c_char,
        label: *const c_char,
        before: c_int,
    ) -> c_int;

    pub fn aug_rm(aug: *mut augeas, path: *const c_char) -> c_int;

    pub fn aug_mv(aug: *mut augeas, src: *const c_char, dst: *const c_char) -> c_int;

    pub fn aug_match(
        aug: *const augeas,
        path: *const c_char,
        matches: *mut *mut *mut c_char,
    ) -> c_int;

    pub fn aug_save(aug: *mut augeas) -> c_int;

    pub fn aug_load(aug: *mut augeas) -> c_int;

    pub fn aug_close(aug: *mut augeas);
}
