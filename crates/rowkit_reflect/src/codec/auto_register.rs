use crate::codec::{CodecRegistry, Format};

/// A codec installer submitted with [`auto_register_codecs!`](crate::auto_register_codecs).
pub struct AutoRegister<F: Format> {
    install: fn(&mut CodecRegistry<F>),
}

impl<F: Format> AutoRegister<F> {
    pub const fn new(install: fn(&mut CodecRegistry<F>)) -> Self {
        Self { install }
    }

    #[inline]
    pub fn apply(&self, registry: &mut CodecRegistry<F>) {
        (self.install)(registry);
    }
}
