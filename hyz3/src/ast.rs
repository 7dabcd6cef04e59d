//! Terms and formulas.
//!
//! An [`Ast`] is an immutable node of the engine's term graph: a free constant, a numeral, a
//! boolean literal or the application of a [`FuncDecl`] to argument terms. Every construction
//! produces a new node; nodes are never mutated and are only released together with their
//! [`Context`](crate::context::Context).
use z3_sys::*;

use crate::{
    func_decl::FuncDecl,
    handle::{NativeHandle, native_handle},
    sort::Sort,
    symbol::Symbol,
    utils::{
        error::{Z3Error, Z3Result},
        native_string,
    },
};

pub use z3_sys::AstKind;

native_handle! {
    /// A term of the engine's logic.
    ///
    /// The [`Display`](std::fmt::Display) implementation uses the engine's canonical printer.
    /// Its output is deterministic for a given term but not guaranteed stable across engine
    /// versions.
    pub struct Ast<'ctx>(raw: Z3_ast, kind: "term");
}

impl<'ctx> Ast<'ctx> {
    pub fn kind(&self) -> AstKind {
        unsafe { Z3_get_ast_kind(self.ctx.raw(), self.raw) }
    }

    pub fn sort(&self) -> Z3Result<Sort<'ctx>> {
        let raw = unsafe { Z3_get_sort(self.ctx.raw(), self.raw) };
        let raw = self.ctx.check_ptr(raw, Sort::KIND)?;
        Ok(unsafe { Sort::from_raw(self.ctx, raw) })
    }

    /// The declaration this term denotes.
    ///
    /// - A declaration turned into a term ([`FuncDecl::as_ast`]) yields that declaration.
    /// - An application, including constants and the boolean literals, yields its head.
    /// - Numerals, bound variables, quantifiers and sorts fail with
    ///   [`Z3Error::NotADeclaration`].
    pub fn decl(&self) -> Z3Result<FuncDecl<'ctx>> {
        let ctx = self.ctx.raw();
        let raw = match self.kind() {
            AstKind::FuncDecl => unsafe { Z3_to_func_decl(ctx, self.raw) },
            AstKind::App => unsafe { Z3_get_app_decl(ctx, Z3_to_app(ctx, self.raw)) },
            _ => {
                return Err(Z3Error::NotADeclaration {
                    term: self.to_string(),
                });
            }
        };
        let raw = self.ctx.check_ptr(raw, FuncDecl::KIND)?;
        Ok(unsafe { FuncDecl::from_raw(self.ctx, raw) })
    }

    /// Name of the declaration this term denotes; see [`Ast::decl`].
    pub fn decl_name(&self) -> Z3Result<Symbol<'ctx>> {
        self.decl()?.name()
    }

    /// Whether this term is a numeric literal.
    ///
    /// The boolean literals are applications, not numerals, even though the engine's own
    /// `Z3_is_numeral_ast` accepts them.
    pub fn is_numeral(&self) -> bool {
        self.kind() == AstKind::Numeral
    }

    /// Decimal rendering of a numeral, whatever its magnitude.
    pub fn numeral_string(&self) -> Z3Result<String> {
        if !self.is_numeral() {
            return Err(Z3Error::NotANumeral {
                term: self.to_string(),
            });
        }
        let text = unsafe { Z3_get_numeral_string(self.ctx.raw(), self.raw) };
        let text = self.ctx.check(text)?;
        Ok(unsafe { native_string(text) })
    }

    /// Read an integer numeral back as a machine integer.
    ///
    /// Values that do not fit `T` are reported as [`Z3Error::NumeralOutOfRange`]; they never
    /// wrap around.
    ///
    /// Example:
    /// ```rust
    /// # use hyz3::context::Context;
    /// let ctx = Context::with_defaults().unwrap();
    /// let int = ctx.int_sort().unwrap();
    /// let v = ctx.int(300, int).unwrap();
    /// assert_eq!(v.int_value::<i64>().unwrap(), 300);
    /// assert!(v.int_value::<u8>().unwrap_err().is_numeral_out_of_range());
    /// ```
    pub fn int_value<T>(&self) -> Z3Result<T>
    where
        T: TryFrom<i64> + TryFrom<u64>,
    {
        if !self.is_numeral() {
            return Err(Z3Error::NotANumeral {
                term: self.to_string(),
            });
        }

        let ctx = self.ctx.raw();
        let out_of_range = || Z3Error::NumeralOutOfRange {
            term: self.to_string(),
            target: std::any::type_name::<T>(),
        };

        let mut signed: i64 = 0;
        if self
            .ctx
            .check(unsafe { Z3_get_numeral_int64(ctx, self.raw, &mut signed) })?
        {
            return <T as TryFrom<i64>>::try_from(signed).map_err(|_| out_of_range());
        }

        // Above `i64::MAX` the value may still fit an unsigned target.
        let mut unsigned: u64 = 0;
        if self
            .ctx
            .check(unsafe { Z3_get_numeral_uint64(ctx, self.raw, &mut unsigned) })?
        {
            return <T as TryFrom<u64>>::try_from(unsigned).map_err(|_| out_of_range());
        }

        Err(out_of_range())
    }
}

impl std::fmt::Display for Ast<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = unsafe { native_string(Z3_ast_to_string(self.ctx.raw(), self.raw)) };
        f.write_str(&text)
    }
}
