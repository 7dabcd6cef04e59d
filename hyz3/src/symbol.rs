use z3_sys::*;

use crate::{handle::native_handle, utils::native_string};

native_handle! {
    /// An interned name used for sorts, declarations and constants.
    ///
    /// Symbols are views into their context: they are never copied out of it nor released on
    /// their own. Two symbols built from the same string in the same context compare equal.
    pub struct Symbol<'ctx>(raw: Z3_symbol, kind: "symbol");
}

impl Symbol<'_> {
    /// The textual name of this symbol.
    pub fn name(&self) -> String {
        self.to_string()
    }
}

impl std::fmt::Display for Symbol<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = unsafe { native_string(Z3_get_symbol_string(self.ctx.raw(), self.raw)) };
        f.write_str(&name)
    }
}
