use core::fmt;
use core::ptr::NonNull;

/// A read-only `NonNull<T>`.
///
/// # Examples
///
/// ```
/// use ime_ptr::ConstNonNull;
///
/// let unit = 0x3042_u16;
///
/// let ptr = ConstNonNull::from_ref(&unit);
///
/// assert_eq!(unsafe { *ptr.as_ref() }, 0x3042);
/// ```
#[repr(transparent)]
pub struct ConstNonNull<T: ?Sized>(NonNull<T>);

impl<T: ?Sized> ConstNonNull<T> {
    /// Wraps `ptr`, or returns `None` if it is null.
    ///
    /// This is the entry point for pointers received from native code.
    ///
    /// # Examples
    ///
    /// ```
    /// use ime_ptr::ConstNonNull;
    ///
    /// assert!(ConstNonNull::<u16>::new(core::ptr::null()).is_none());
    ///
    /// let unit = 0_u16;
    /// assert!(ConstNonNull::new(&raw const unit).is_some());
    /// ```
    #[inline]
    pub const fn new(ptr: *const T) -> Option<Self> {
        match NonNull::new(ptr.cast_mut()) {
            Some(x) => Some(Self(x)),
            None => None,
        }
    }

    /// Wraps `ptr` without checking for null.
    ///
    /// # Safety
    ///
    /// `ptr` must be non-null.
    #[inline(always)]
    pub const unsafe fn new_unchecked(ptr: *const T) -> Self {
        unsafe { Self(NonNull::new_unchecked(ptr.cast_mut())) }
    }

    /// Returns a shared reference to the pointee.
    ///
    /// # Safety
    ///
    /// The pointer must be
    /// [convertible to a reference](https://doc.rust-lang.org/stable/core/ptr/index.html#pointer-to-reference-conversion),
    /// and the pointee must stay alive and unmodified for `'a`.
    #[inline(always)]
    pub const unsafe fn as_ref<'a>(&self) -> &'a T {
        // Safety: See `NonNull::as_ref`
        unsafe { self.0.as_ref() }
    }

    /// Acquires the underlying `*const` pointer.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const T {
        self.0.as_ptr()
    }

    /// Converts a reference to a `ConstNonNull` pointer.
    #[inline(always)]
    pub const fn from_ref(r: &T) -> Self {
        Self(NonNull::from_ref(r))
    }
}

impl<T> ConstNonNull<T> {
    /// Offsets the pointer by `count` elements of `T`.
    ///
    /// # Safety
    ///
    /// Same as [`pointer::add`]: the result must stay within (or one past)
    /// the allocation the pointer was derived from.
    #[inline(always)]
    pub const unsafe fn add(self, count: usize) -> Self {
        unsafe { Self(self.0.add(count)) }
    }
}

impl<T: ?Sized> From<NonNull<T>> for ConstNonNull<T> {
    #[inline(always)]
    fn from(value: NonNull<T>) -> Self {
        Self(value)
    }
}

impl<T: ?Sized> Clone for ConstNonNull<T> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ?Sized> Copy for ConstNonNull<T> {}

impl<T: ?Sized> fmt::Pointer for ConstNonNull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.as_ptr(), f)
    }
}

impl<T: ?Sized> fmt::Debug for ConstNonNull<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&self.as_ptr(), f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::ConstNonNull;

    #[test]
    fn null_is_rejected() {
        assert!(ConstNonNull::<u16>::new(core::ptr::null()).is_none());
    }

    #[test]
    fn add_walks_units() {
        let units = [b'a' as u16, b'b' as u16, b'c' as u16];
        let ptr = ConstNonNull::from_ref(&units[0]);

        let third = unsafe { ptr.add(2) };
        assert_eq!(unsafe { *third.as_ref() }, b'c' as u16);
        assert_eq!(third.as_ptr(), units.as_ptr().wrapping_add(2));
    }
}
