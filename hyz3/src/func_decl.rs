use z3_sys::*;

use crate::{
    ast::Ast,
    handle::{NativeHandle, native_handle},
    marshal,
    sort::Sort,
    symbol::Symbol,
    utils::{error::Z3Result, native_string},
};

native_handle! {
    /// A function signature `name : domain -> range`.
    ///
    /// The domain is fixed when the declaration is created; zero-arity declarations stand for
    /// constants. Declarations are applied with [`Context::app`](crate::context::Context::app)
    /// or [`FuncDecl::apply`].
    pub struct FuncDecl<'ctx>(raw: Z3_func_decl, kind: "function declaration");
}

impl<'ctx> FuncDecl<'ctx> {
    /// Number of arguments expected at every application site.
    pub fn arity(&self) -> usize {
        unsafe { Z3_get_arity(self.ctx.raw(), self.raw) as usize }
    }

    pub fn name(&self) -> Z3Result<Symbol<'ctx>> {
        let raw = unsafe { Z3_get_decl_name(self.ctx.raw(), self.raw) };
        let raw = self.ctx.check_ptr(raw, Symbol::KIND)?;
        Ok(unsafe { Symbol::from_raw(self.ctx, raw) })
    }

    /// Domain sorts, in parameter order.
    pub fn domain(&self) -> Z3Result<Vec<Sort<'ctx>>> {
        let (ctx, decl) = (self.ctx, self.raw);
        unsafe {
            marshal::unpack(ctx, self.arity() as u32, |index| {
                Z3_get_domain(ctx.raw(), decl, index)
            })
        }
    }

    pub fn range(&self) -> Z3Result<Sort<'ctx>> {
        let raw = unsafe { Z3_get_range(self.ctx.raw(), self.raw) };
        let raw = self.ctx.check_ptr(raw, Sort::KIND)?;
        Ok(unsafe { Sort::from_raw(self.ctx, raw) })
    }

    /// View this declaration as a term, e.g. to hand it to [`Ast::decl_name`].
    pub fn as_ast(&self) -> Z3Result<Ast<'ctx>> {
        let raw = unsafe { Z3_func_decl_to_ast(self.ctx.raw(), self.raw) };
        let raw = self.ctx.check_ptr(raw, Ast::KIND)?;
        Ok(unsafe { Ast::from_raw(self.ctx, raw) })
    }

    /// Apply this declaration to `args`; see [`Context::app`](crate::context::Context::app).
    pub fn apply(&self, args: &[Ast<'ctx>]) -> Z3Result<Ast<'ctx>> {
        self.ctx.app(*self, args)
    }
}

impl std::fmt::Display for FuncDecl<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = unsafe { native_string(Z3_func_decl_to_string(self.ctx.raw(), self.raw)) };
        f.write_str(&text)
    }
}
