//! Macros for wiring constraints into the registry.

// ============================================================================
// REGISTRABLE MACRO
// ============================================================================

/// Implements [`Registrable`](crate::core::Registrable) for constraint types,
/// using the type name as the registry name.
///
/// ```rust,ignore
/// registrable!(Length, Pattern, NotEmpty);
/// ```
macro_rules! registrable {
    ($($ty:ident),+ $(,)?) => {
        $(
            impl $crate::core::Registrable for $ty {
                const NAME: &'static str = stringify!($ty);
            }
        )+
    };
}

pub(crate) use registrable;
