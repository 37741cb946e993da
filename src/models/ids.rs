//! Process-local identifiers for catalog entities.
//!
//! Identifiers are minted from per-type atomic counters, so they are unique
//! within one process and meaningless outside it. They never appear in the
//! projected document.

/// Macro to define a `Copy` newtype ID backed by its own counter.
macro_rules! define_local_id {
    (
        $(#[$meta:meta])*
        $name:ident, $counter:ident
    ) => {
        /// Next value handed out by the corresponding `generate`.
        static $counter: core::sync::atomic::AtomicU64 = core::sync::atomic::AtomicU64::new(1);

        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name {
            /// Mints a fresh identifier, distinct from every earlier one.
            #[inline]
            #[must_use]
            pub fn generate() -> Self {
                Self($counter.fetch_add(1, core::sync::atomic::Ordering::Relaxed))
            }

            /// Returns the raw counter value.
            #[inline]
            #[must_use]
            pub const fn as_inner(&self) -> u64 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "#{}", self.0)
            }
        }
    };
}

define_local_id! {
    /// Identifier of a product within a catalog session.
    ProductId, NEXT_PRODUCT_ID
}

define_local_id! {
    /// Identifier of a duration entry within a product.
    DurationId, NEXT_DURATION_ID
}
