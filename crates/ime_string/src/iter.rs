use core::char::DecodeUtf16;
use core::iter::{Copied, FusedIterator};
use core::slice;

use crate::{ImeChar, ImeString};

// -----------------------------------------------------------------------------
// Iter

/// Borrowing iterator over the units of an [`ImeString`].
///
/// Created by [`ImeString::iter`].
#[derive(Clone, Debug)]
pub struct Iter<'a>(Copied<slice::Iter<'a, ImeChar>>);

impl<'a> Iter<'a> {
    #[inline]
    pub(crate) fn new(units: &'a [ImeChar]) -> Self {
        Self(units.iter().copied())
    }
}

impl Iterator for Iter<'_> {
    type Item = ImeChar;

    #[inline]
    fn next(&mut self) -> Option<ImeChar> {
        self.0.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    #[inline]
    fn next_back(&mut self) -> Option<ImeChar> {
        self.0.next_back()
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

// -----------------------------------------------------------------------------
// IntoIter

/// Owning iterator over the units of an [`ImeString`].
///
/// Holds its own copy of the string, so it can outlive the original.
/// [`reset`](Self::reset) rewinds it to the first unit.
///
/// # Examples
///
/// ```
/// use ime_string::ImeString;
///
/// let mut iter = ImeString::from("ab").into_iter();
///
/// assert_eq!(iter.next(), Some(u16::from(b'a')));
/// iter.reset();
/// assert_eq!(iter.collect::<Vec<_>>(), [u16::from(b'a'), u16::from(b'b')]);
/// ```
#[derive(Clone, Debug)]
pub struct IntoIter {
    string: ImeString,
    front: usize,
    back: usize,
}

impl IntoIter {
    /// Rewinds to the first unit, as if freshly created.
    #[inline]
    pub fn reset(&mut self) {
        self.front = 0;
        self.back = self.string.len();
    }

    /// Returns the units not yet yielded.
    #[inline]
    pub fn as_slice(&self) -> &[ImeChar] {
        &self.string.as_slice()[self.front..self.back]
    }
}

impl Iterator for IntoIter {
    type Item = ImeChar;

    #[inline]
    fn next(&mut self) -> Option<ImeChar> {
        if self.front < self.back {
            let unit = self.string.as_slice()[self.front];
            self.front += 1;
            Some(unit)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for IntoIter {
    #[inline]
    fn next_back(&mut self) -> Option<ImeChar> {
        if self.front < self.back {
            self.back -= 1;
            Some(self.string.as_slice()[self.back])
        } else {
            None
        }
    }
}

impl ExactSizeIterator for IntoIter {}

impl FusedIterator for IntoIter {}

impl IntoIterator for ImeString {
    type Item = ImeChar;
    type IntoIter = IntoIter;

    #[inline]
    fn into_iter(self) -> IntoIter {
        IntoIter {
            back: self.len(),
            string: self,
            front: 0,
        }
    }
}

// -----------------------------------------------------------------------------
// Chars

/// Iterator over the decoded `char`s of an [`ImeString`].
///
/// Created by [`ImeString::chars`]. Unpaired surrogates decode to
/// [`char::REPLACEMENT_CHARACTER`].
#[derive(Clone, Debug)]
pub struct Chars<'a>(DecodeUtf16<Copied<slice::Iter<'a, ImeChar>>>);

impl<'a> Chars<'a> {
    #[inline]
    pub(crate) fn new(units: &'a [ImeChar]) -> Self {
        Self(char::decode_utf16(units.iter().copied()))
    }
}

impl Iterator for Chars<'_> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        self.0
            .next()
            .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl FusedIterator for Chars<'_> {}

// -----------------------------------------------------------------------------
// Tests
