//! Items used by macro expansions. Not public API.

#[cfg(feature = "auto_register")]
pub use inventory;

/// Submits a codec installer for a [`Format`](crate::codec::Format).
///
/// Installers run once, when the format's global registry is first built.
///
/// ```
/// use rowkit_reflect::codec::CodecRegistry;
/// use rowkit_reflect::jsonb::Jsonb;
///
/// fn install(_registry: &mut CodecRegistry<Jsonb>) {}
///
/// rowkit_reflect::auto_register_codecs!(Jsonb => install);
/// ```
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! auto_register_codecs {
    ($format:ty => $install:path) => {
        $crate::__macro_exports::inventory::submit! {
            $crate::codec::AutoRegister::<$format>::new($install)
        }
    };
}

/// Without the `auto_register` feature, submitted installers are ignored.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! auto_register_codecs {
    ($format:ty => $install:path) => {
        const _: fn(&mut $crate::codec::CodecRegistry<$format>) = $install;
    };
}
