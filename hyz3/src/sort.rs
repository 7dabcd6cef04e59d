use z3_sys::*;

use crate::{
    handle::{NativeHandle, native_handle},
    symbol::Symbol,
    utils::{error::Z3Result, native_string},
};

pub use z3_sys::SortKind;

native_handle! {
    /// A type descriptor for terms: boolean, integer or an uninterpreted (named) sort.
    pub struct Sort<'ctx>(raw: Z3_sort, kind: "sort");
}

impl<'ctx> Sort<'ctx> {
    pub fn kind(&self) -> SortKind {
        unsafe { Z3_get_sort_kind(self.ctx.raw(), self.raw) }
    }

    /// Name of the sort (`Int`, `Bool`, or the symbol of an uninterpreted sort).
    pub fn name(&self) -> Z3Result<Symbol<'ctx>> {
        let raw = unsafe { Z3_get_sort_name(self.ctx.raw(), self.raw) };
        let raw = self.ctx.check_ptr(raw, Symbol::KIND)?;
        Ok(unsafe { Symbol::from_raw(self.ctx, raw) })
    }
}

impl std::fmt::Display for Sort<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = unsafe { native_string(Z3_sort_to_string(self.ctx.raw(), self.raw)) };
        f.write_str(&text)
    }
}
