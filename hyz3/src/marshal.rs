//! Marshaling of handle sequences across the foreign boundary.
//!
//! Variadic native operations (function declarations, applications) take a count and a base
//! pointer to a contiguous array of raw handles. [`HandleArray`] builds that array from a slice
//! of handles and enforces the two rules the engine cannot check for us:
//!
//! - every handle belongs to the context performing the call;
//! - an empty sequence is passed as a null base pointer with a zero count, never as the
//!   address of a non-existent first element.
use std::os::raw::c_uint;

use log::trace;
use smallvec::SmallVec;

use crate::{
    context::Context,
    handle::NativeHandle,
    utils::error::{Z3Error, Z3Result},
};

/// Number of raw handles stored inline before spilling to the heap.
const INLINE_HANDLES: usize = 8;

/// A contiguous buffer of raw handles ready to be passed to a native call.
///
/// Example:
/// ```rust
/// # use hyz3::{config::Config, context::Context, marshal::HandleArray};
/// let ctx = Context::new(&Config::new()).unwrap();
/// let int = ctx.int_sort().unwrap();
///
/// let packed = HandleArray::pack(&ctx, &[int, int]).unwrap();
/// assert_eq!(packed.count(), 2);
///
/// let empty = HandleArray::pack::<hyz3::sort::Sort>(&ctx, &[]).unwrap();
/// assert_eq!(empty.count(), 0);
/// assert!(empty.as_ptr().is_null());
/// ```
pub struct HandleArray<R> {
    raw: SmallVec<[R; INLINE_HANDLES]>,
}

impl<R: Copy> HandleArray<R> {
    /// Pack `handles` in order, checking that each one is owned by `ctx`.
    pub fn pack<'ctx, H>(ctx: &Context, handles: &[H]) -> Z3Result<Self>
    where
        H: NativeHandle<'ctx, Raw = R>,
    {
        if u32::try_from(handles.len()).is_err() {
            return Err(Z3Error::TooManyHandles {
                count: handles.len(),
            });
        }

        let mut raw = SmallVec::with_capacity(handles.len());
        for handle in handles {
            if !handle.belongs_to(ctx) {
                return Err(Z3Error::ForeignContext { what: H::KIND });
            }
            raw.push(handle.raw());
        }

        trace!("Packed {} {} handle(s)", raw.len(), H::KIND);
        Ok(Self { raw })
    }

    /// Number of packed handles, as expected by the native call.
    pub fn count(&self) -> c_uint {
        // `pack` rejects sequences longer than `u32::MAX`.
        self.raw.len() as c_uint
    }

    pub fn len(&self) -> usize {
        self.raw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Base pointer of the array; null when the array is empty.
    pub fn as_ptr(&self) -> *const R {
        if self.raw.is_empty() {
            std::ptr::null()
        } else {
            self.raw.as_ptr()
        }
    }

    pub fn as_slice(&self) -> &[R] {
        &self.raw
    }
}

/// Rebuild `count` handles from an indexed native accessor.
///
/// `fetch(i)` is called for `i` in `0..count`, in order; each returned pointer is checked
/// against the context's error channel before being wrapped.
///
/// # Safety
/// Every pointer returned by `fetch` must have been created by `ctx`'s native environment.
pub unsafe fn unpack<'ctx, H, F>(ctx: &'ctx Context, count: c_uint, mut fetch: F) -> Z3Result<Vec<H>>
where
    H: NativeHandle<'ctx>,
    H::Raw: NullablePointer,
    F: FnMut(c_uint) -> H::Raw,
{
    let mut handles = Vec::with_capacity(count as usize);
    for index in 0..count {
        let raw = ctx.check_ptr(fetch(index), H::KIND)?;
        handles.push(unsafe { H::from_raw(ctx, raw) });
    }
    trace!("Unpacked {} {} handle(s)", handles.len(), H::KIND);
    Ok(handles)
}

/// Raw native pointers that may be null.
pub trait NullablePointer: Copy {
    fn is_null_handle(self) -> bool;
}

impl<T> NullablePointer for *mut T {
    fn is_null_handle(self) -> bool {
        self.is_null()
    }
}
