//! Fixed-capacity UTF-16 buffer for composition and candidate strings.
#![expect(unsafe_code, reason = "reads native strings and exports a raw pointer")]

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::convert::Infallible;
use core::fmt::{self, Write as _};
use core::hash::{Hash, Hasher};
use core::ops::Index;
use core::str::FromStr;

use ime_ptr::{UnitsPtr, WidePtr};

use crate::{Chars, ImeStringError, Iter};

// -----------------------------------------------------------------------------
// Constants

/// A single UTF-16 code unit, the unit native input-method APIs exchange.
pub type ImeChar = u16;

/// Number of units an [`ImeString`] can hold.
pub const CAPACITY: usize = 64;

// -----------------------------------------------------------------------------
// ImeString

/// A short run of UTF-16 units stored inline, with no heap allocation.
///
/// `ImeString` is built once and never modified. Input longer than the
/// buffer is truncated without any signal; compare [`len`](Self::len) with
/// the source length if that matters.
///
/// Truncation limits depend on how the string is built:
///
/// | Constructor | Source longer than [`CAPACITY`] keeps |
/// |---|---|
/// | [`from_text`](Self::from_text), [`from_slice`](Self::from_slice), [`from_chars`](Self::from_chars) | `CAPACITY - 1` units |
/// | [`from_units`](Self::from_units), [`from_raw_parts`](Self::from_raw_parts) | `CAPACITY` units |
/// | [`from_wide_ptr`](Self::from_wide_ptr) | `CAPACITY` units |
///
/// The `CAPACITY - 1` limit for text and lists is long-standing behavior
/// that callers rely on, and is kept as is.
///
/// # Examples
///
/// ```
/// use ime_string::ImeString;
///
/// let s = ImeString::from("hello");
///
/// assert_eq!(s.len(), 5);
/// assert_eq!(s.get(0), Ok(u16::from(b'h')));
/// assert_eq!(s.get(4), Ok(u16::from(b'o')));
/// assert!(s.get(5).is_err());
/// assert_eq!(s.to_string(), "hello");
/// ```
#[derive(Clone, Copy)]
#[repr(C)]
pub struct ImeString {
    len: usize,
    units: [ImeChar; CAPACITY],
}

impl ImeString {
    /// An empty string, the canonical "no text" value.
    pub const EMPTY: Self = Self {
        len: 0,
        units: [0; CAPACITY],
    };

    /// Returns [`ImeString::EMPTY`].
    #[inline(always)]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    /// Copies up to `CAPACITY` units from `units`. If the stream holds more
    /// than that, only `CAPACITY - 1` are kept.
    fn from_unit_stream(units: impl IntoIterator<Item = ImeChar>) -> Self {
        let mut units = units.into_iter();
        let mut this = Self::EMPTY;

        let mut copied = 0;
        while copied < CAPACITY {
            let Some(unit) = units.next() else { break };
            this.units[copied] = unit;
            copied += 1;
        }

        this.len = if copied == CAPACITY && units.next().is_some() {
            log::debug!("ImeString source exceeds {CAPACITY} units, keeping {}", CAPACITY - 1);
            this.units[CAPACITY - 1] = 0;
            CAPACITY - 1
        } else {
            copied
        };
        this
    }

    /// Builds a string from text, measured in UTF-16 units.
    ///
    /// Text longer than [`CAPACITY`] units keeps its first `CAPACITY - 1`
    /// units. A surrogate pair cut in half by truncation stays in the buffer
    /// as a lone surrogate.
    ///
    /// # Examples
    ///
    /// ```
    /// use ime_string::{CAPACITY, ImeString};
    ///
    /// assert_eq!(ImeString::from_text("").len(), 0);
    /// assert_eq!(ImeString::from_text(&"a".repeat(CAPACITY)).len(), CAPACITY);
    /// assert_eq!(ImeString::from_text(&"a".repeat(100)).len(), CAPACITY - 1);
    /// ```
    #[inline]
    pub fn from_text(text: &str) -> Self {
        Self::from_unit_stream(text.encode_utf16())
    }

    /// Builds a string from a list of units, with the same limits as
    /// [`from_text`](Self::from_text).
    #[inline]
    pub fn from_slice(units: &[ImeChar]) -> Self {
        Self::from_unit_stream(units.iter().copied())
    }

    /// Builds a string from a stream of `char`s, encoded as UTF-16, with the
    /// same limits as [`from_text`](Self::from_text).
    pub fn from_chars(chars: impl IntoIterator<Item = char>) -> Self {
        Self::from_unit_stream(chars.into_iter().flat_map(|c| {
            let mut buf = [0; 2];
            let n = c.encode_utf16(&mut buf).len();
            buf.into_iter().take(n)
        }))
    }

    /// Builds a string from the first `count` units of `units`.
    ///
    /// The length is `count`, clamped to `units.len()` and to [`CAPACITY`].
    /// A `count` of zero yields an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use ime_string::{CAPACITY, ImeString};
    ///
    /// let units = [b'x' as u16; 100];
    ///
    /// assert_eq!(ImeString::from_units(&units, 3).len(), 3);
    /// assert_eq!(ImeString::from_units(&units, 100).len(), CAPACITY);
    /// assert_eq!(ImeString::from_units(&units[..2], 10).len(), 2);
    /// assert!(ImeString::from_units(&units, 0).is_empty());
    /// ```
    pub fn from_units(units: &[ImeChar], count: usize) -> Self {
        let len = count.min(units.len()).min(CAPACITY);
        if len < count {
            log::debug!("ImeString asked for {count} units, keeping {len}");
        }

        let mut this = Self::EMPTY;
        this.units[..len].copy_from_slice(&units[..len]);
        this.len = len;
        this
    }

    /// Builds a string from `count` units at `ptr`, with the same limits as
    /// [`from_units`](Self::from_units).
    ///
    /// A null `ptr` or a `count` of zero yields an empty string.
    ///
    /// # Safety
    ///
    /// If `ptr` is non-null, the first `min(count, CAPACITY)` units at `ptr`
    /// must be readable and properly aligned.
    pub unsafe fn from_raw_parts(ptr: *const ImeChar, count: usize) -> Self {
        if ptr.is_null() || count == 0 {
            return Self::EMPTY;
        }
        let readable = count.min(CAPACITY);
        // SAFETY: non-null, and the caller guarantees `readable` units.
        let units = unsafe { core::slice::from_raw_parts(ptr, readable) };
        Self::from_units(units, count)
    }

    /// Builds a string from a zero-terminated native string.
    ///
    /// Units are copied until the terminator or until [`CAPACITY`] units
    /// have been copied. A null `ptr` yields an empty string.
    ///
    /// # Safety
    ///
    /// If `ptr` is non-null, every unit up to and including the first zero,
    /// or the first `CAPACITY` units if none of them is zero, must be
    /// readable through `ptr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ime_string::ImeString;
    ///
    /// let native: Vec<u16> = "hi\0".encode_utf16().collect();
    ///
    /// let s = unsafe { ImeString::from_wide_ptr(native.as_ptr()) };
    /// assert_eq!(s, "hi");
    ///
    /// let s = unsafe { ImeString::from_wide_ptr(core::ptr::null()) };
    /// assert!(s.is_empty());
    /// ```
    pub unsafe fn from_wide_ptr(ptr: *const ImeChar) -> Self {
        let Some(wide) = WidePtr::new(ptr) else {
            return Self::EMPTY;
        };

        let mut this = Self::EMPTY;
        // SAFETY: the caller guarantees readability up to the terminator or
        // `CAPACITY` units, and the destination is exactly `CAPACITY` long.
        this.len = unsafe { wide.read_terminated(&mut this.units) };
        if this.len == CAPACITY {
            log::trace!("native string at {ptr:p} reached {CAPACITY} units before a terminator");
        }
        this
    }

    // -------------------------------------------------------------------------
    // Read access

    /// Returns the number of units in the string.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the string holds no units.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns [`CAPACITY`].
    #[inline(always)]
    pub const fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Returns the unit at `index`.
    ///
    /// # Errors
    ///
    /// [`ImeStringError::OutOfRange`] if `index >= self.len()`.
    #[inline]
    pub const fn get(&self, index: usize) -> Result<ImeChar, ImeStringError> {
        if index < self.len {
            Ok(self.units[index])
        } else {
            Err(ImeStringError::OutOfRange {
                index,
                len: self.len,
            })
        }
    }

    /// Returns the first unit, if any.
    #[inline]
    pub const fn first(&self) -> Option<ImeChar> {
        if self.len > 0 {
            Some(self.units[0])
        } else {
            None
        }
    }

    /// Returns the last unit, if any.
    #[inline]
    pub const fn last(&self) -> Option<ImeChar> {
        if self.len > 0 {
            Some(self.units[self.len - 1])
        } else {
            None
        }
    }

    /// Returns the units of the string, exactly [`len`](Self::len) of them.
    #[inline]
    pub fn as_slice(&self) -> &[ImeChar] {
        &self.units[..self.len]
    }

    /// Returns an iterator over the units, front to back.
    ///
    /// Every call starts again from the first unit.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.as_slice())
    }

    /// Returns an iterator over the decoded `char`s.
    ///
    /// Unpaired surrogates decode to [`char::REPLACEMENT_CHARACTER`].
    #[inline]
    pub fn chars(&self) -> Chars<'_> {
        Chars::new(self.as_slice())
    }

    // -------------------------------------------------------------------------
    // Conversion

    /// Decodes the string, replacing unpaired surrogates with
    /// [`char::REPLACEMENT_CHARACTER`].
    ///
    /// Same as `to_string()`.
    pub fn to_string_lossy(&self) -> String {
        self.chars().collect()
    }

    /// Decodes the string.
    ///
    /// # Errors
    ///
    /// [`ImeStringError::InvalidUtf16`] with the position of the first
    /// unpaired surrogate.
    ///
    /// # Examples
    ///
    /// ```
    /// use ime_string::{ImeString, ImeStringError};
    ///
    /// let ok = ImeString::from("かな");
    /// assert_eq!(ok.try_to_string().as_deref(), Ok("かな"));
    ///
    /// let lone = ImeString::from_slice(&[b'a' as u16, 0xD800]);
    /// assert_eq!(lone.try_to_string(), Err(ImeStringError::InvalidUtf16 { index: 1 }));
    /// ```
    pub fn try_to_string(&self) -> Result<String, ImeStringError> {
        let mut out = String::with_capacity(self.len);
        let mut index = 0;
        for c in char::decode_utf16(self.iter()) {
            let c = c.map_err(|_| ImeStringError::InvalidUtf16 { index })?;
            index += c.len_utf16();
            out.push(c);
        }
        Ok(out)
    }

    /// Returns the address of the inline storage, for native APIs.
    ///
    /// The pointer is only valid while `self` is alive and has not been
    /// moved, and only for [`len`](Self::len) reads. Copying the string gives
    /// the copy its own storage at a different address. There is no
    /// terminator after the last unit when the string is full.
    ///
    /// Prefer [`handle`](Self::handle), which keeps `self` borrowed.
    #[inline(always)]
    pub const fn as_ptr(&self) -> *const ImeChar {
        self.units.as_ptr()
    }

    /// Returns a borrowed handle to the inline storage.
    ///
    /// The handle keeps `self` borrowed, so the string cannot move or be
    /// dropped while it is in use. Reads through it are unchecked.
    ///
    /// # Examples
    ///
    /// ```
    /// use ime_string::ImeString;
    ///
    /// let s = ImeString::from("ok");
    /// let handle = s.handle();
    ///
    /// assert_eq!(handle.as_ptr(), s.as_ptr());
    /// assert_eq!(unsafe { handle.get(1) }, u16::from(b'k'));
    /// ```
    #[inline]
    pub fn handle(&self) -> UnitsPtr<'_> {
        UnitsPtr::from_ref(self.as_slice())
    }
}

// -----------------------------------------------------------------------------
// Construction traits

impl Default for ImeString {
    #[inline(always)]
    fn default() -> Self {
        Self::EMPTY
    }
}

impl From<&str> for ImeString {
    #[inline]
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<&String> for ImeString {
    #[inline]
    fn from(text: &String) -> Self {
        Self::from_text(text)
    }
}

impl From<&[ImeChar]> for ImeString {
    #[inline]
    fn from(units: &[ImeChar]) -> Self {
        Self::from_slice(units)
    }
}

impl From<&Vec<ImeChar>> for ImeString {
    #[inline]
    fn from(units: &Vec<ImeChar>) -> Self {
        Self::from_slice(units)
    }
}

impl From<Vec<ImeChar>> for ImeString {
    #[inline]
    fn from(units: Vec<ImeChar>) -> Self {
        Self::from_slice(&units)
    }
}

impl FromStr for ImeString {
    type Err = Infallible;

    #[inline]
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(text))
    }
}

impl FromIterator<char> for ImeString {
    #[inline]
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        Self::from_chars(iter)
    }
}

impl From<ImeString> for String {
    #[inline]
    fn from(s: ImeString) -> Self {
        s.to_string_lossy()
    }
}

#[cfg(all(feature = "std", windows))]
impl From<ImeString> for std::ffi::OsString {
    fn from(s: ImeString) -> Self {
        use std::os::windows::ffi::OsStringExt;
        Self::from_wide(s.as_slice())
    }
}

// -----------------------------------------------------------------------------
// Access traits

impl Index<usize> for ImeString {
    type Output = ImeChar;

    #[track_caller]
    fn index(&self, index: usize) -> &ImeChar {
        match self.as_slice().get(index) {
            Some(unit) => unit,
            None => panic!(
                "{}",
                ImeStringError::OutOfRange {
                    index,
                    len: self.len
                }
            ),
        }
    }
}

impl AsRef<[ImeChar]> for ImeString {
    #[inline]
    fn as_ref(&self) -> &[ImeChar] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a ImeString {
    type Item = ImeChar;
    type IntoIter = Iter<'a>;

    #[inline]
    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

// -----------------------------------------------------------------------------
// Comparison

impl PartialEq for ImeString {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for ImeString {}

impl PartialEq<[ImeChar]> for ImeString {
    #[inline]
    fn eq(&self, other: &[ImeChar]) -> bool {
        self.as_slice() == other
    }
}

impl PartialEq<str> for ImeString {
    fn eq(&self, other: &str) -> bool {
        self.iter().eq(other.encode_utf16())
    }
}

impl PartialEq<&str> for ImeString {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl PartialOrd for ImeString {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ImeString {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_slice().cmp(other.as_slice())
    }
}

impl Hash for ImeString {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

// -----------------------------------------------------------------------------
// Formatting

impl fmt::Display for ImeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ImeString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ImeString(\"")?;
        for c in self.chars() {
            for e in c.escape_debug() {
                f.write_char(e)?;
            }
        }
        f.write_str("\")")
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::ToString;
    use alloc::vec;

    use super::{CAPACITY, ImeString};
    use crate::ImeStringError;

    #[test]
    fn is_sync_send() {
        use core::panic::{RefUnwindSafe, UnwindSafe};

        fn is_send<T: Send>() {}
        fn is_sync<T: Sync>() {}
        fn is_unwindsafe<T: UnwindSafe>() {}
        fn is_refunwindsafe<T: RefUnwindSafe>() {}

        is_send::<ImeString>();
        is_sync::<ImeString>();
        is_unwindsafe::<ImeString>();
        is_refunwindsafe::<ImeString>();
    }

    #[test]
    fn stays_inline() {
        assert_eq!(
            size_of::<ImeString>(),
            size_of::<usize>() + CAPACITY * size_of::<u16>()
        );
    }

    #[test]
    fn text_at_capacity_is_kept_whole() {
        let text = "b".repeat(CAPACITY);
        let s = ImeString::from_text(&text);
        assert_eq!(s.len(), CAPACITY);
        assert_eq!(s.to_string(), text);
    }

    // Oversized text and lists keep one unit less than the capacity.
    #[test]
    fn oversized_text_keeps_capacity_minus_one() {
        let s = ImeString::from_text(&"b".repeat(CAPACITY + 1));
        assert_eq!(s.len(), CAPACITY - 1);

        let s = ImeString::from_slice(&vec![7; 1000]);
        assert_eq!(s.len(), CAPACITY - 1);
        assert!(s.iter().all(|u| u == 7));
    }

    #[test]
    fn text_is_measured_in_utf16_units() {
        // U+1F600 is a surrogate pair.
        let s = ImeString::from_text("a\u{1F600}");
        assert_eq!(s.len(), 3);
        assert_eq!(s.chars().count(), 2);
        assert_eq!(s, "a\u{1F600}");
    }

    #[test]
    fn from_chars_matches_from_text() {
        let text = "にほんご";
        assert_eq!(ImeString::from_chars(text.chars()), ImeString::from_text(text));

        let long: ImeString = core::iter::repeat_n('z', 80).collect();
        assert_eq!(long.len(), CAPACITY - 1);
    }

    #[test]
    fn from_units_clamps() {
        let units = [1_u16; 100];
        assert_eq!(ImeString::from_units(&units, CAPACITY + 1).len(), CAPACITY);
        assert_eq!(ImeString::from_units(&units, CAPACITY).len(), CAPACITY);
        assert_eq!(ImeString::from_units(&units[..5], 9).len(), 5);
        assert_eq!(ImeString::from_units(&[], 9), ImeString::EMPTY);
    }

    #[test]
    fn from_raw_parts_handles_null_and_zero() {
        let units = [3_u16; 4];
        unsafe {
            assert!(ImeString::from_raw_parts(core::ptr::null(), 4).is_empty());
            assert!(ImeString::from_raw_parts(units.as_ptr(), 0).is_empty());
            assert_eq!(ImeString::from_raw_parts(units.as_ptr(), 4), units[..]);
        }
    }

    #[test]
    fn wide_ptr_scan_is_bounded() {
        // No terminator anywhere in the first CAPACITY units.
        let native = [b'q' as u16; CAPACITY * 2];
        let s = unsafe { ImeString::from_wide_ptr(native.as_ptr()) };
        assert_eq!(s.len(), CAPACITY);
    }

    #[test]
    fn get_and_index() {
        let s = ImeString::from("abc");
        assert_eq!(s.get(2), Ok(b'c' as u16));
        assert_eq!(s[1], b'b' as u16);
        assert_eq!(
            s.get(3),
            Err(ImeStringError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(s.first(), Some(b'a' as u16));
        assert_eq!(s.last(), Some(b'c' as u16));
        assert_eq!(ImeString::EMPTY.first(), None);
        assert_eq!(ImeString::EMPTY.last(), None);
    }

    #[test]
    #[should_panic(expected = "index 0 is out of range for an ImeString of length 0")]
    fn index_past_len_panics() {
        let _ = ImeString::EMPTY[0];
    }

    // Bytes past `len` never take part in comparisons.
    #[test]
    fn equality_ignores_unused_storage() {
        let truncated = ImeString::from_units(&[1, 2, 3], 2);
        let exact = ImeString::from_slice(&[1, 2]);
        assert_eq!(truncated, exact);
    }

    #[test]
    fn copies_do_not_alias() {
        let a = ImeString::from("copy");
        let b = a;
        assert_ne!(a.as_ptr(), b.as_ptr());
        assert_eq!(a, b);
    }

    #[test]
    fn debug_escapes() {
        let s = ImeString::from("a\"b");
        assert_eq!(format!("{s:?}"), "ImeString(\"a\\\"b\")");
    }

    #[test]
    fn lossy_and_strict_decoding() {
        let s = ImeString::from_slice(&[0xDC00, b'x' as u16]);
        assert_eq!(s.to_string_lossy(), "\u{FFFD}x");
        assert_eq!(s.to_string(), s.to_string_lossy());
        assert_eq!(
            s.try_to_string(),
            Err(ImeStringError::InvalidUtf16 { index: 0 })
        );
    }

    #[test]
    fn from_str_is_infallible() {
        let s: ImeString = "parse".parse().unwrap();
        assert_eq!(s, "parse");
    }
}
