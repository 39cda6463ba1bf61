#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]
#![warn(clippy::semicolon_outside_block)]
#![warn(elided_lifetimes_in_paths)]
#![warn(unreachable_pub)]
#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod channel;
pub mod error;

#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub mod flatten;

#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub mod generator;

#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub mod handoff;

#[cfg(feature = "alloc")]
#[cfg_attr(docsrs, doc(cfg(feature = "alloc")))]
pub mod nested;

pub use channel::{ChannelState, Rendezvous};
pub use error::{Error, Role};

#[cfg(feature = "alloc")]
pub use flatten::{Flattener, Frame};
#[cfg(feature = "alloc")]
pub use nested::NestedValue;

// Used by `nested!`
#[cfg(feature = "alloc")]
#[doc(hidden)]
pub mod __private {
    pub use alloc::vec;
}
