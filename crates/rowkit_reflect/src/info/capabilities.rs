//! Serialization protocols detected on a type.
//!
//! `#[derive(Reflect)]` records which protocols a type implements with
//! `#[reflect(marshal, unmarshal, serialize, deserialize, text)]`. Each handle
//! is created through [`FromType`] and turns a `&dyn Reflect` back into the
//! protocol's trait object.

use core::fmt::{self, Display};

use serde_core::de::DeserializeOwned;

use crate::Reflect;
use crate::codec::{Marshal, Unmarshal};

// -----------------------------------------------------------------------------
// FromType

/// Creates a capability handle for the type `T`.
pub trait FromType<T> {
    fn from_type() -> Self;
}

// -----------------------------------------------------------------------------
// Handles

/// Access to a type's [`Marshal`] impl.
#[derive(Clone, Copy)]
pub struct TraitMarshal {
    fun: fn(&dyn Reflect) -> Option<&dyn Marshal>,
}

impl TraitMarshal {
    /// Returns `None` if `value` is not of the type this handle was made for.
    #[inline]
    pub fn get<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Marshal> {
        (self.fun)(value)
    }
}

fn as_marshal<T: Marshal + Reflect>(value: &dyn Reflect) -> Option<&dyn Marshal> {
    value.downcast_ref::<T>().map(|v| v as &dyn Marshal)
}

impl<T: Marshal + Reflect> FromType<T> for TraitMarshal {
    fn from_type() -> Self {
        Self {
            fun: as_marshal::<T>,
        }
    }
}

/// Access to a type's [`Unmarshal`] impl.
#[derive(Clone, Copy)]
pub struct TraitUnmarshal {
    fun: fn(&mut dyn Reflect) -> Option<&mut dyn Unmarshal>,
}

impl TraitUnmarshal {
    #[inline]
    pub fn get<'a>(&self, value: &'a mut dyn Reflect) -> Option<&'a mut dyn Unmarshal> {
        (self.fun)(value)
    }
}

fn as_unmarshal<T: Unmarshal + Reflect>(value: &mut dyn Reflect) -> Option<&mut dyn Unmarshal> {
    value.downcast_mut::<T>().map(|v| v as &mut dyn Unmarshal)
}

impl<T: Unmarshal + Reflect> FromType<T> for TraitUnmarshal {
    fn from_type() -> Self {
        Self {
            fun: as_unmarshal::<T>,
        }
    }
}

/// Access to a type's `serde::Serialize` impl, type erased.
#[derive(Clone, Copy)]
pub struct TraitSerialize {
    fun: fn(&dyn Reflect) -> Option<&dyn erased_serde::Serialize>,
}

impl TraitSerialize {
    #[inline]
    pub fn get<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn erased_serde::Serialize> {
        (self.fun)(value)
    }
}

fn as_serialize<T: serde_core::Serialize + Reflect>(
    value: &dyn Reflect,
) -> Option<&dyn erased_serde::Serialize> {
    value
        .downcast_ref::<T>()
        .map(|v| v as &dyn erased_serde::Serialize)
}

impl<T: serde_core::Serialize + Reflect> FromType<T> for TraitSerialize {
    fn from_type() -> Self {
        Self {
            fun: as_serialize::<T>,
        }
    }
}

/// Deserializes a fresh `T` and stores it into a `&mut dyn Reflect` of type `T`.
#[derive(Clone, Copy)]
pub struct TraitDeserialize {
    fun: fn(&mut dyn erased_serde::Deserializer<'_>, &mut dyn Reflect) -> Result<(), erased_serde::Error>,
}

impl TraitDeserialize {
    #[inline]
    pub fn deserialize_into(
        &self,
        deserializer: &mut dyn erased_serde::Deserializer<'_>,
        target: &mut dyn Reflect,
    ) -> Result<(), erased_serde::Error> {
        (self.fun)(deserializer, target)
    }
}

fn deserialize_into<T: DeserializeOwned + Reflect>(
    deserializer: &mut dyn erased_serde::Deserializer<'_>,
    target: &mut dyn Reflect,
) -> Result<(), erased_serde::Error> {
    let value = T::deserialize(deserializer)?;
    match target.downcast_mut::<T>() {
        Some(slot) => {
            *slot = value;
            Ok(())
        }
        None => Err(<erased_serde::Error as serde_core::de::Error>::custom(
            format_args!("deserialize target is not `{}`", core::any::type_name::<T>()),
        )),
    }
}

impl<T: DeserializeOwned + Reflect> FromType<T> for TraitDeserialize {
    fn from_type() -> Self {
        Self {
            fun: deserialize_into::<T>,
        }
    }
}

/// Access to a type's [`Display`] impl, used as its text form.
#[derive(Clone, Copy)]
pub struct TraitText {
    fun: fn(&dyn Reflect) -> Option<&dyn Display>,
}

impl TraitText {
    #[inline]
    pub fn get<'a>(&self, value: &'a dyn Reflect) -> Option<&'a dyn Display> {
        (self.fun)(value)
    }
}

fn as_display<T: Display + Reflect>(value: &dyn Reflect) -> Option<&dyn Display> {
    value.downcast_ref::<T>().map(|v| v as &dyn Display)
}

impl<T: Display + Reflect> FromType<T> for TraitText {
    fn from_type() -> Self {
        Self {
            fun: as_display::<T>,
        }
    }
}

// -----------------------------------------------------------------------------
// Capabilities

/// The capability handles of one type.
///
/// ```
/// use rowkit_reflect::derive::Reflect;
/// use rowkit_reflect::info::Typed;
///
/// #[derive(Reflect)]
/// #[reflect(opaque, text)]
/// struct Email(String);
///
/// impl core::fmt::Display for Email {
///     fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
///         f.write_str(&self.0)
///     }
/// }
///
/// let caps = Email::type_info().capabilities();
/// assert!(caps.text().is_some());
/// assert!(caps.marshal().is_none());
/// ```
#[derive(Clone, Copy, Default)]
pub struct Capabilities {
    marshal: Option<TraitMarshal>,
    unmarshal: Option<TraitUnmarshal>,
    serialize: Option<TraitSerialize>,
    deserialize: Option<TraitDeserialize>,
    text: Option<TraitText>,
}

macro_rules! impl_capability {
    ($field:ident, $with:ident, $handle:ident) => {
        #[inline]
        pub const fn $field(&self) -> Option<&$handle> {
            self.$field.as_ref()
        }

        #[inline]
        pub const fn $with(mut self, handle: $handle) -> Self {
            self.$field = Some(handle);
            self
        }
    };
}

impl Capabilities {
    pub const NONE: &'static Capabilities = &Capabilities::new();

    #[inline]
    pub const fn new() -> Self {
        Self {
            marshal: None,
            unmarshal: None,
            serialize: None,
            deserialize: None,
            text: None,
        }
    }

    impl_capability!(marshal, with_marshal, TraitMarshal);
    impl_capability!(unmarshal, with_unmarshal, TraitUnmarshal);
    impl_capability!(serialize, with_serialize, TraitSerialize);
    impl_capability!(deserialize, with_deserialize, TraitDeserialize);
    impl_capability!(text, with_text, TraitText);
}

impl fmt::Debug for Capabilities {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Capabilities")
            .field("marshal", &self.marshal.is_some())
            .field("unmarshal", &self.unmarshal.is_some())
            .field("serialize", &self.serialize.is_some())
            .field("deserialize", &self.deserialize.is_some())
            .field("text", &self.text.is_some())
            .finish()
    }
}
