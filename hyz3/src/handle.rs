//! Common shape of every context-owned handle.
//!
//! A handle pairs a borrowed [`Context`] with a raw native pointer. The borrow ties the
//! handle's lifetime to its owner: once the context is dropped, no handle derived from it can
//! be named anymore. Handles never release native memory themselves; the whole graph is freed
//! by the context's teardown.
use crate::context::Context;

/// A value owned by a [`Context`] and backed by a native pointer.
pub trait NativeHandle<'ctx>: Copy {
    /// Raw pointer type used by the engine for this kind of object.
    type Raw: Copy;

    /// Human-readable kind, used in error messages.
    const KIND: &'static str;

    /// The context owning this handle.
    fn context(&self) -> &'ctx Context;

    /// The raw native pointer.
    fn raw(&self) -> Self::Raw;

    /// Wrap a raw pointer.
    ///
    /// # Safety
    /// `raw` must be a non-null handle created by `ctx`'s native environment.
    unsafe fn from_raw(ctx: &'ctx Context, raw: Self::Raw) -> Self;

    /// Whether this handle was created by `ctx`.
    fn belongs_to(&self, ctx: &Context) -> bool {
        self.context().raw() == ctx.raw()
    }
}

/// Define a handle type wrapping a native pointer.
///
/// Equality and hashing use the native pointer: the engine hash-conses its objects, so two
/// structurally identical objects of the same context share one pointer.
macro_rules! native_handle {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident<'ctx>(raw: $raw:ty, kind: $kind:literal);
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy)]
        $vis struct $name<'ctx> {
            ctx: &'ctx $crate::context::Context,
            raw: $raw,
        }

        impl<'ctx> $crate::handle::NativeHandle<'ctx> for $name<'ctx> {
            type Raw = $raw;
            const KIND: &'static str = $kind;

            fn context(&self) -> &'ctx $crate::context::Context {
                self.ctx
            }

            fn raw(&self) -> $raw {
                self.raw
            }

            unsafe fn from_raw(ctx: &'ctx $crate::context::Context, raw: $raw) -> Self {
                debug_assert!(!raw.is_null(), concat!("null ", $kind, " handle"));
                Self { ctx, raw }
            }
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.ctx.raw() == other.ctx.raw() && self.raw == other.raw
            }
        }

        impl Eq for $name<'_> {}

        impl std::hash::Hash for $name<'_> {
            fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
                self.ctx.raw().hash(state);
                self.raw.hash(state);
            }
        }

        impl std::fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self)
            }
        }
    };
}

pub(crate) use native_handle;
