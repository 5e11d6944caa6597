use core::marker::PhantomData;

use crate::ConstNonNull;

/// A borrowed run of UTF-16 units, like `&'a [u16]` without the length.
///
/// The borrow keeps the owner alive and unmoved for `'a`; the length is only
/// tracked in debug builds, so [`get`](Self::get) is unchecked and unsafe.
/// [`as_ptr`](Self::as_ptr) is what gets handed to native code.
///
/// # Examples
///
/// ```
/// use ime_ptr::UnitsPtr;
///
/// let units = [0x306B_u16, 0x307B, 0x3093];
///
/// let ptr = UnitsPtr::from_ref(&units);
///
/// assert_eq!(unsafe { ptr.get(1) }, 0x307B);
/// assert_eq!(ptr.as_ptr(), units.as_ptr());
/// ```
pub struct UnitsPtr<'a> {
    _marker: PhantomData<&'a [u16]>,
    ptr: ConstNonNull<u16>,
    #[cfg(debug_assertions)]
    len: usize,
}

impl Clone for UnitsPtr<'_> {
    #[inline(always)]
    fn clone(&self) -> Self {
        *self
    }
}

impl Copy for UnitsPtr<'_> {}

impl<'a> UnitsPtr<'a> {
    /// Reads the unit at `index` without bounds checks.
    ///
    /// # Safety
    ///
    /// `index` must be less than the length of the slice this was made from.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub const unsafe fn get(self, index: usize) -> u16 {
        #[cfg(debug_assertions)]
        assert!(index < self.len, "tried to read past the end of a unit run");

        // SAFETY: `index` is in-bounds of the borrowed slice.
        unsafe { *self.ptr.add(index).as_ref() }
    }

    /// Returns the address of the first unit.
    ///
    /// The pointer is valid for as long as `'a`, and only for as many reads
    /// as the slice this was made from had units.
    #[inline(always)]
    pub const fn as_ptr(self) -> *const u16 {
        self.ptr.as_ptr()
    }

    /// Borrows `units`.
    ///
    /// An empty slice still yields a dangling, well-aligned, non-null pointer.
    #[inline(always)]
    pub const fn from_ref(units: &'a [u16]) -> UnitsPtr<'a> {
        Self {
            _marker: PhantomData,
            // SAFETY: slice pointers are never null.
            ptr: unsafe { ConstNonNull::new_unchecked(units.as_ptr()) },
            #[cfg(debug_assertions)]
            len: units.len(),
        }
    }
}

impl<'a> From<&'a [u16]> for UnitsPtr<'a> {
    #[inline]
    fn from(units: &'a [u16]) -> Self {
        Self::from_ref(units)
    }
}

impl core::fmt::Debug for UnitsPtr<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("UnitsPtr").field(&self.ptr).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
