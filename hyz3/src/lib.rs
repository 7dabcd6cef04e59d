//! Hyz3: safe bindings to the Z3 constraint solver.
//!
//! The crate wraps the engine's C interface with an ownership model the compiler can check.
//! A [`Context`](context::Context) owns one native environment; every symbol, sort,
//! declaration and term built through it borrows it, so none of them can outlive the
//! environment they live in. Native memory is released exactly once, when the context is
//! dropped.
//!
//! Layers
//!  - [`context`]: environment creation and teardown, and all factory operations.
//!  - [`symbol`], [`sort`], [`func_decl`], [`ast`]: `Copy` handles pairing a context borrow
//!    with a native pointer.
//!  - [`marshal`]: packing of handle slices into native arrays for variadic calls.
//!  - [`config`]: engine options, optionally loaded from TOML.
//!
//! Failures (native errors, arity mismatches, handles from another context, numerals that do
//! not fit a machine integer) are reported as [`Z3Error`](utils::error::Z3Error); the solver's
//! default behaviour of aborting the process on error is disabled.
//!
//! Example
//! ```
//! use hyz3::prelude::*;
//!
//! let ctx = Context::new(&Config::new()).unwrap();
//! let int = ctx.int_sort().unwrap();
//!
//! // f : Int x Int -> Int
//! let f = ctx.func_decl(ctx.symbol("f").unwrap(), &[int, int], int).unwrap();
//! let one = ctx.int(1, int).unwrap();
//! let two = ctx.int(2, int).unwrap();
//! let app = ctx.app(f, &[one, two]).unwrap();
//!
//! assert_eq!(app.to_string(), "(f 1 2)");
//! assert_eq!(app.decl_name().unwrap().to_string(), "f");
//! assert_eq!(two.int_value::<i64>().unwrap(), 2);
//! ```

/// Terms: construction results, inspection and numeral extraction.
pub mod ast;
/// Engine options forwarded at context creation.
pub mod config;
/// Ownership of the native environment and factory operations.
pub mod context;
/// Function declarations.
pub mod func_decl;
/// Shared behaviour of context-owned handles.
pub mod handle;
/// Packing of handle sequences for variadic native calls.
pub mod marshal;
/// Type descriptors.
pub mod sort;
/// Interned names.
pub mod symbol;
/// Error types and small helpers around native strings.
pub mod utils;

pub use z3_sys;

pub mod prelude {
    //! Convenient re-exports for end users.
    pub use crate::ast::{Ast, AstKind};
    pub use crate::config::Config;
    pub use crate::context::Context;
    pub use crate::func_decl::FuncDecl;
    pub use crate::handle::NativeHandle;
    pub use crate::sort::{Sort, SortKind};
    pub use crate::symbol::Symbol;
    pub use crate::utils::error::{Z3Error, Z3Result};
}
