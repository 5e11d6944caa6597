use crate::ConstNonNull;

/// A zero-terminated UTF-16 string owned by native code.
///
/// `WidePtr` knows nothing about the length of the region it points into.
/// The only way to read it is [`read_terminated`](Self::read_terminated),
/// which is bounded by the destination rather than by the source.
///
/// # Examples
///
/// ```
/// use ime_ptr::WidePtr;
///
/// let native = [b'h' as u16, b'i' as u16, 0];
/// let ptr = WidePtr::new(native.as_ptr()).unwrap();
///
/// let mut dst = [0_u16; 8];
/// let len = unsafe { ptr.read_terminated(&mut dst) };
///
/// assert_eq!(&dst[..len], &native[..2]);
/// ```
#[derive(Clone, Copy, Debug)]
#[repr(transparent)]
pub struct WidePtr(ConstNonNull<u16>);

impl WidePtr {
    /// The unit that ends a native string.
    pub const TERMINATOR: u16 = 0;

    /// Wraps a native string pointer, or returns `None` if it is null.
    #[inline]
    pub const fn new(ptr: *const u16) -> Option<Self> {
        match ConstNonNull::new(ptr) {
            Some(ptr) => Some(Self(ptr)),
            None => None,
        }
    }

    /// Acquires the underlying `*const u16` pointer.
    #[inline(always)]
    pub const fn as_ptr(self) -> *const u16 {
        self.0.as_ptr()
    }

    /// Copies units into `dst` until a [`TERMINATOR`](Self::TERMINATOR) is
    /// read or `dst` is full, and returns the number of units copied.
    ///
    /// The terminator itself is not copied. At most `dst.len()` units are
    /// read from the source, so an unterminated source is never read past
    /// that point.
    ///
    /// # Safety
    ///
    /// Every unit up to and including the first terminator, or the first
    /// `dst.len()` units if there is no terminator among them, must be
    /// readable through this pointer.
    pub unsafe fn read_terminated(self, dst: &mut [u16]) -> usize {
        let mut copied = 0;
        while copied < dst.len() {
            // SAFETY: `copied < dst.len()` and the caller guarantees the
            // source is readable up to its terminator or `dst.len()` units.
            let unit = unsafe { *self.0.add(copied).as_ref() };
            if unit == Self::TERMINATOR {
                break;
            }
            dst[copied] = unit;
            copied += 1;
        }
        copied
    }
}

// -----------------------------------------------------------------------------
// Tests
