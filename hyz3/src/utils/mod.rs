use std::ffi::{CStr, CString};

use z3_sys::Z3_string;

use crate::utils::error::{Z3Error, Z3Result};

pub mod error;

/// Copy a string owned by the engine into Rust memory.
///
/// Strings returned by the engine live in a per-context buffer that the next API call may
/// overwrite, so they must be copied before anything else touches the context. A null pointer
/// yields an empty string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid for the duration
/// of the call.
pub(crate) unsafe fn native_string(ptr: Z3_string) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }
        .to_string_lossy()
        .into_owned()
}

/// Convert a name into a C string, rejecting interior NUL bytes.
pub(crate) fn c_name(name: &str) -> Z3Result<CString> {
    CString::new(name).map_err(|_| Z3Error::InvalidName {
        name: name.escape_debug().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_native_string_is_empty() {
        assert_eq!(unsafe { native_string(std::ptr::null()) }, "");
    }

    #[test]
    fn native_string_copies_contents() {
        let owned = CString::new("(f 1 2)").unwrap();
        assert_eq!(unsafe { native_string(owned.as_ptr()) }, "(f 1 2)");
    }

    #[test]
    fn interior_nul_is_rejected() {
        let err = c_name("a\0b").unwrap_err();
        assert!(err.is_invalid_name());
        assert!(c_name("ok").is_ok());
    }
}
