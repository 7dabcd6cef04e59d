//! Native environment ownership.
//!
//! A [`Context`] owns exactly one native engine environment and acts as an arena for every
//! [`Symbol`], [`Sort`], [`FuncDecl`] and [`Ast`] created through it. Derived values borrow the
//! context (`'ctx`), so the compiler guarantees that none of them outlives the environment they
//! point into. Teardown happens exactly once, in [`Drop`], on every exit path.
//!
//! # Thread safety
//! The engine does not support concurrent calls on one environment. [`Context`] is [`Send`]
//! (it can be moved to, and used from, another thread) but not [`Sync`]; handles are neither.
//! Sharing one context between threads requires wrapping it, and all work on its handles, in
//! a lock held by the caller. One context per thread is the simpler alternative.
use std::{ffi::CString, os::raw::c_uint};

use log::{debug, warn};
use parking_lot::{Mutex, const_mutex};
use semver::Version;
use z3_sys::*;

use crate::{
    ast::Ast,
    config::Config,
    func_decl::FuncDecl,
    handle::NativeHandle,
    marshal::{HandleArray, NullablePointer},
    sort::Sort,
    symbol::Symbol,
    utils::{
        c_name,
        error::{Z3Error, Z3Result},
        native_string,
    },
};

/// Serializes creation of native environments; the engine's global parameter table is not
/// thread-safe.
static CREATION_LOCK: Mutex<()> = const_mutex(());

/// Owner of a native engine environment.
///
/// Example:
/// ```rust
/// # use hyz3::{config::Config, context::Context};
/// let ctx = Context::new(&Config::new().with_model(true)).unwrap();
/// let int = ctx.int_sort().unwrap();
/// let x = ctx.constant(ctx.symbol("x").unwrap(), int).unwrap();
/// assert_eq!(x.to_string(), "x");
/// ```
///
/// Handles cannot escape the context that created them:
/// ```compile_fail
/// # use hyz3::context::Context;
/// let sort = {
///     let ctx = Context::with_defaults().unwrap();
///     ctx.int_sort().unwrap()
/// };
/// println!("{sort}");
/// ```
///
/// ```compile_fail
/// # use hyz3::context::Context;
/// let ctx = Context::with_defaults().unwrap();
/// let t = ctx.bool_true().unwrap();
/// drop(ctx);
/// println!("{t}");
/// ```
pub struct Context {
    raw: Z3_context,
}

// SAFETY: the environment is only ever touched through `&Context`, and `Context` is not `Sync`
// (raw pointer field), so moving it to another thread cannot introduce concurrent native calls.
unsafe impl Send for Context {}

/// Releases a native configuration object once the environment has been created from it.
struct NativeConfig(Z3_config);

impl Drop for NativeConfig {
    fn drop(&mut self) {
        unsafe { Z3_del_config(self.0) };
    }
}

impl Context {
    /// Create a native environment, forwarding every option of `config`.
    ///
    /// Options are first checked through the error channel of a scratch environment, so the
    /// engine can refuse unknown options or malformed values before anything is built; a
    /// refusal is reported as [`Z3Error::InvalidConfig`] with the engine's message. Accepted
    /// options are then applied when the environment is created.
    pub fn new(config: &Config) -> Z3Result<Self> {
        let options = config.to_native_pairs()?;

        if !options.is_empty() {
            let scratch = Self::create(&[])?;
            for (option, value) in &options {
                scratch.update_option(option, value)?;
            }
        }

        let ctx = Self::create(&options)?;
        debug!(
            "Created native context {:p} with {} option(s)",
            ctx.raw,
            options.len()
        );
        Ok(ctx)
    }

    /// Build an environment from options already accepted by the engine.
    ///
    /// `Z3_set_param_value` only prints a warning when it refuses an option, so it must never
    /// see an unchecked one.
    fn create(options: &[(CString, CString)]) -> Z3Result<Self> {
        let _guard = CREATION_LOCK.lock();
        let native_config = unsafe { Z3_mk_config() };
        if native_config.is_null() {
            return Err(Z3Error::OutOfResources {
                what: "a configuration",
            });
        }
        let native_config = NativeConfig(native_config);

        for (option, value) in options {
            unsafe { Z3_set_param_value(native_config.0, option.as_ptr(), value.as_ptr()) };
        }

        let raw = unsafe { Z3_mk_context(native_config.0) };
        if raw.is_null() {
            return Err(Z3Error::OutOfResources {
                what: "a context",
            });
        }

        // The default handler aborts the process; errors are polled instead.
        unsafe { Z3_set_error_handler(raw, None) };
        Ok(Context { raw })
    }

    /// Create a native environment with the engine's default options.
    pub fn with_defaults() -> Z3Result<Self> {
        Self::new(&Config::new())
    }

    fn update_option(&self, option: &CString, value: &CString) -> Z3Result<()> {
        unsafe { Z3_update_param_value(self.raw, option.as_ptr(), value.as_ptr()) };
        self.check(()).map_err(|err| match err {
            Z3Error::Native { message, .. } => Z3Error::InvalidConfig {
                option: option.to_string_lossy().into_owned(),
                message,
            },
            other => other,
        })
    }

    /// Version of the linked native engine.
    pub fn engine_version() -> Version {
        let (mut major, mut minor, mut build, mut revision): (c_uint, c_uint, c_uint, c_uint) =
            (0, 0, 0, 0);
        unsafe { Z3_get_version(&mut major, &mut minor, &mut build, &mut revision) };
        Version::new(major as u64, minor as u64, build as u64)
    }

    /// The raw native environment.
    ///
    /// The pointer stays valid until `self` is dropped. Objects created directly through it are
    /// owned by this context like any other.
    pub fn raw(&self) -> Z3_context {
        self.raw
    }

    /// Poll the native error channel after a call.
    pub(crate) fn check<T>(&self, value: T) -> Z3Result<T> {
        let code = unsafe { Z3_get_error_code(self.raw) };
        match code {
            ErrorCode::OK => Ok(value),
            ErrorCode::MemoutFail => Err(Z3Error::OutOfResources {
                what: "memory for a native call",
            }),
            code => {
                let message = unsafe { native_string(Z3_get_error_msg(self.raw, code)) };
                warn!("Native engine reported {:?}: {}", code, message);
                Err(Z3Error::Native { code, message })
            }
        }
    }

    /// Poll the native error channel, then reject null handles.
    pub(crate) fn check_ptr<P: NullablePointer>(&self, raw: P, what: &'static str) -> Z3Result<P> {
        let raw = self.check(raw)?;
        if raw.is_null_handle() {
            return Err(Z3Error::OutOfResources { what });
        }
        Ok(raw)
    }

    /// Fail with [`Z3Error::ForeignContext`] unless `handle` was created by this context.
    pub(crate) fn ensure_owned<'ctx, H: NativeHandle<'ctx>>(&self, handle: &H) -> Z3Result<()> {
        if handle.belongs_to(self) {
            Ok(())
        } else {
            Err(Z3Error::ForeignContext { what: H::KIND })
        }
    }

    // === Symbols ===

    /// Intern a string symbol.
    pub fn symbol(&self, name: &str) -> Z3Result<Symbol<'_>> {
        let name = c_name(name)?;
        let raw = unsafe { Z3_mk_string_symbol(self.raw, name.as_ptr()) };
        let raw = self.check_ptr(raw, Symbol::KIND)?;
        Ok(unsafe { Symbol::from_raw(self, raw) })
    }

    // === Sorts ===

    pub fn bool_sort(&self) -> Z3Result<Sort<'_>> {
        let raw = self.check_ptr(unsafe { Z3_mk_bool_sort(self.raw) }, Sort::KIND)?;
        Ok(unsafe { Sort::from_raw(self, raw) })
    }

    pub fn int_sort(&self) -> Z3Result<Sort<'_>> {
        let raw = self.check_ptr(unsafe { Z3_mk_int_sort(self.raw) }, Sort::KIND)?;
        Ok(unsafe { Sort::from_raw(self, raw) })
    }

    /// An uninterpreted sort named by `symbol`. The same name always yields the same sort.
    pub fn uninterpreted_sort<'ctx>(&'ctx self, symbol: Symbol<'ctx>) -> Z3Result<Sort<'ctx>> {
        self.ensure_owned(&symbol)?;
        let raw = unsafe { Z3_mk_uninterpreted_sort(self.raw, symbol.raw()) };
        let raw = self.check_ptr(raw, Sort::KIND)?;
        Ok(unsafe { Sort::from_raw(self, raw) })
    }

    // === Declarations ===

    /// Declare a function `symbol : domain -> range`.
    ///
    /// An empty `domain` declares a constant. The arity is fixed here and checked again at
    /// every application site.
    pub fn func_decl<'ctx>(
        &'ctx self,
        symbol: Symbol<'ctx>,
        domain: &[Sort<'ctx>],
        range: Sort<'ctx>,
    ) -> Z3Result<FuncDecl<'ctx>> {
        self.ensure_owned(&symbol)?;
        self.ensure_owned(&range)?;
        let domain = HandleArray::pack(self, domain)?;

        let raw = unsafe {
            Z3_mk_func_decl(
                self.raw,
                symbol.raw(),
                domain.count(),
                domain.as_ptr(),
                range.raw(),
            )
        };
        let raw = self.check_ptr(raw, FuncDecl::KIND)?;
        debug!("Declared `{}` with arity {}", symbol, domain.len());
        Ok(unsafe { FuncDecl::from_raw(self, raw) })
    }

    // === Terms ===

    /// Apply `decl` to `args`.
    ///
    /// `args` must contain exactly [`FuncDecl::arity`] terms of this context; sorts are checked
    /// by the engine.
    pub fn app<'ctx>(&'ctx self, decl: FuncDecl<'ctx>, args: &[Ast<'ctx>]) -> Z3Result<Ast<'ctx>> {
        self.ensure_owned(&decl)?;
        if args.len() != decl.arity() {
            return Err(Z3Error::ArityMismatch {
                decl: decl.name()?.to_string(),
                expected: decl.arity(),
                found: args.len(),
            });
        }
        let args = HandleArray::pack(self, args)?;

        let raw = unsafe { Z3_mk_app(self.raw, decl.raw(), args.count(), args.as_ptr()) };
        let raw = self.check_ptr(raw, Ast::KIND)?;
        Ok(unsafe { Ast::from_raw(self, raw) })
    }

    /// A free constant (a variable, from the solver's point of view) named `symbol`.
    pub fn constant<'ctx>(&'ctx self, symbol: Symbol<'ctx>, sort: Sort<'ctx>) -> Z3Result<Ast<'ctx>> {
        self.ensure_owned(&symbol)?;
        self.ensure_owned(&sort)?;
        let raw = unsafe { Z3_mk_const(self.raw, symbol.raw(), sort.raw()) };
        let raw = self.check_ptr(raw, Ast::KIND)?;
        Ok(unsafe { Ast::from_raw(self, raw) })
    }

    /// An integer literal of `sort`.
    pub fn int<'ctx>(&'ctx self, value: impl Into<i64>, sort: Sort<'ctx>) -> Z3Result<Ast<'ctx>> {
        self.ensure_owned(&sort)?;
        let raw = unsafe { Z3_mk_int64(self.raw, value.into(), sort.raw()) };
        let raw = self.check_ptr(raw, Ast::KIND)?;
        Ok(unsafe { Ast::from_raw(self, raw) })
    }

    /// A numeral of `sort` written in decimal, for values wider than a machine integer.
    pub fn numeral<'ctx>(&'ctx self, decimal: &str, sort: Sort<'ctx>) -> Z3Result<Ast<'ctx>> {
        self.ensure_owned(&sort)?;
        let text = c_name(decimal)?;
        let raw = unsafe { Z3_mk_numeral(self.raw, text.as_ptr(), sort.raw()) };
        let raw = self.check_ptr(raw, Ast::KIND)?;
        Ok(unsafe { Ast::from_raw(self, raw) })
    }

    pub fn bool_true(&self) -> Z3Result<Ast<'_>> {
        let raw = self.check_ptr(unsafe { Z3_mk_true(self.raw) }, Ast::KIND)?;
        Ok(unsafe { Ast::from_raw(self, raw) })
    }

    pub fn bool_false(&self) -> Z3Result<Ast<'_>> {
        let raw = self.check_ptr(unsafe { Z3_mk_false(self.raw) }, Ast::KIND)?;
        Ok(unsafe { Ast::from_raw(self, raw) })
    }

    pub fn bool_val(&self, value: bool) -> Z3Result<Ast<'_>> {
        if value {
            self.bool_true()
        } else {
            self.bool_false()
        }
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        debug!("Releasing native context {:p}", self.raw);
        unsafe { Z3_del_context(self.raw) };
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("raw", &self.raw).finish()
    }
}
