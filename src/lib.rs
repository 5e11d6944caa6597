#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use ime_ptr as ptr;
pub use ime_string as string;

pub use ime_string::{CAPACITY, ImeChar, ImeString, ImeStringError};
