//! Generational handles into the context's entity tables.
//!
//! A handle stays invalid once its entity is destroyed, even after the slot is
//! reused by a newer entity.

use quill_core::alloc::IndexSlot;

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[repr(transparent)]
        #[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
        pub struct $name(pub(crate) IndexSlot);

        impl $name {
            /// Packed slot index and generation, stable for the handle's life.
            pub fn to_bits(self) -> u64 {
                self.0.to_bits()
            }
        }
    };
}

handle!(
    /// A path created by [`Context::create_path`](crate::Context::create_path).
    PathHandle
);
handle!(
    /// A paint created by [`Context::create_paint`](crate::Context::create_paint).
    PaintHandle
);
handle!(
    /// An RGBA8 image owned by the context.
    ImageHandle
);
handle!(
    /// A bitmap font bound to an atlas image.
    FontHandle
);

static_assertions::assert_eq_size!(Option<PathHandle>, u64);
static_assertions::assert_eq_size!(Option<FontHandle>, u64);
