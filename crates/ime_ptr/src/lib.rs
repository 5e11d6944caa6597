//! Pointer wrappers used where composition text crosses the native boundary.
//!
//! Native input-method APIs hand out and accept bare `*const u16`. The types
//! here keep those pointers typed and, where possible, tied to a borrow.
//!
//! **ConstNonNull**
//!
//! [`ConstNonNull<T>`] is similar to [`NonNull<T>`](core::ptr::NonNull): a non-null
//! pointer that cannot be used to obtain mutable references.
//!
//! **UnitsPtr**
//!
//! [`UnitsPtr<'a>`] is a `&'a [u16]` without its length. It is what a fixed
//! buffer exports to native code: the borrow keeps the owner alive and in
//! place, but reads through it are unchecked.
//!
//! **WidePtr**
//!
//! [`WidePtr`] points at a zero-terminated run of `u16` owned by someone else.
//! Its only read operation copies into a caller-provided slice and stops at
//! the terminator or when the slice is full, whichever comes first.
#![expect(unsafe_code, reason = "Raw pointers are inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod non_null;
mod units;
mod wide;

// -----------------------------------------------------------------------------
// Top-level exports

pub use non_null::ConstNonNull;
pub use units::UnitsPtr;
pub use wide::WidePtr;
