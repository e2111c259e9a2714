#![doc = include_str!("../README.md")]

pub use rowkit_reflect as reflect;
pub use rowkit_utils as utils;
