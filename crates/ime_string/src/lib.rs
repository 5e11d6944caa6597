#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod ime_string;
mod iter;

#[cfg(feature = "serde")]
mod serde;

// -----------------------------------------------------------------------------
// Top-level exports

pub use error::ImeStringError;
pub use ime_string::{CAPACITY, ImeChar, ImeString};
pub use iter::{Chars, IntoIter, Iter};

pub use ime_ptr::UnitsPtr;
