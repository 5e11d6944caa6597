use core::fmt;

use serde_core::de::{Error, Visitor};
use serde_core::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ImeString;

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for ImeString {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

// -----------------------------------------------------------------------------
// Deserialize

/// Accepts a string and applies the truncation rule of [`ImeString::from_text`].
struct ImeStringVisitor;

impl<'de> Visitor<'de> for ImeStringVisitor {
    type Value = ImeString;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string")
    }

    fn visit_str<E: Error>(self, v: &str) -> Result<ImeString, E> {
        Ok(ImeString::from_text(v))
    }
}

impl<'de> Deserialize<'de> for ImeString {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ImeStringVisitor)
    }
}

// -----------------------------------------------------------------------------
// Tests
