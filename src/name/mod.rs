//! DNS domain name representation.
//!
//! A domain name is an ordered sequence of labels, each up to 63 bytes, with
//! a total wire form (length bytes + labels + terminator) of at most 255
//! bytes. Names compare and hash case-insensitively per RFC 1035, and render
//! as dot-joined labels with a trailing dot for the fully-qualified form.

mod label;

pub use label::{Label, LabelIter};

use crate::error::{Error, Result};
use crate::{MAX_LABEL_LENGTH, MAX_NAME_LENGTH};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A DNS domain name.
///
/// # Wire Format
///
/// Stored as the uncompressed wire form: each label prefixed by its length
/// byte, terminated by a zero byte (the root). `www.example.com.` is:
///
/// ```text
/// 03 'w' 'w' 'w' 07 'e' 'x' 'a' 'm' 'p' 'l' 'e' 03 'c' 'o' 'm' 00
/// ```
///
/// Compression pointers never appear in stored names; the codec resolves
/// them at the wire boundary.
///
/// # Comparison Semantics
///
/// Label bytes are compared case-insensitively; `Eq` and `Hash` agree.
///
/// # Example
///
/// ```rust
/// use dnswire::Name;
/// use std::str::FromStr;
///
/// let name = Name::from_str("www.example.com.").unwrap();
/// assert_eq!(name.label_count(), 3);
/// assert_eq!(name.to_string(), "www.example.com.");
/// assert_eq!(Name::from_str("WWW.EXAMPLE.COM").unwrap(), name);
/// ```
#[derive(Clone)]
pub struct Name {
    /// Uncompressed wire form, terminator included. Most names fit inline.
    wire: SmallVec<[u8; 64]>,
    /// Number of labels, root excluded.
    label_count: u8,
}

impl Name {
    /// Creates the root domain name.
    #[inline]
    pub fn root() -> Self {
        let mut wire = SmallVec::new();
        wire.push(0);
        Self {
            wire,
            label_count: 0,
        }
    }

    /// Creates a domain name from a sequence of label byte strings.
    ///
    /// A trailing empty label (the explicit root) is permitted and ignored.
    pub fn from_labels<I, L>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut wire = SmallVec::<[u8; 64]>::new();
        let mut count = 0u8;
        let mut iter = labels.into_iter().peekable();

        while let Some(label) = iter.next() {
            let label = label.as_ref();
            if label.is_empty() {
                // Only permitted as the final (root) label.
                if iter.peek().is_some() {
                    return Err(Error::EmptyLabel {
                        position: count as usize,
                    });
                }
                break;
            }
            if label.len() > MAX_LABEL_LENGTH {
                return Err(Error::label_too_long(label.len()));
            }
            wire.push(label.len() as u8);
            wire.extend_from_slice(label);
            count += 1;
        }

        wire.push(0);
        if wire.len() > MAX_NAME_LENGTH {
            return Err(Error::name_too_long(wire.len()));
        }

        Ok(Self {
            wire,
            label_count: count,
        })
    }

    /// Builds a name from label bytes collected off the wire.
    ///
    /// The decoder has already bounds-checked each label; this only revalidates
    /// the total length.
    pub(crate) fn from_wire_labels(labels: &[&[u8]]) -> Result<Self> {
        Self::from_labels(labels)
    }

    /// Returns the uncompressed wire form, terminator included.
    #[inline]
    pub fn as_wire(&self) -> &[u8] {
        &self.wire
    }

    /// Returns the wire-form length in bytes (terminator included).
    #[inline]
    pub fn wire_len(&self) -> usize {
        self.wire.len()
    }

    /// Returns the number of labels, root excluded.
    #[inline]
    pub fn label_count(&self) -> usize {
        self.label_count as usize
    }

    /// Returns true if this is the root domain.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.label_count == 0
    }

    /// Returns an iterator over the labels, leftmost first, root excluded.
    #[inline]
    pub fn labels(&self) -> LabelIter<'_> {
        LabelIter::new(&self.wire)
    }

    /// Returns the compression key for the suffix starting at label `skip`:
    /// the remaining labels, lowercased and dot-joined without a trailing dot.
    ///
    /// `skip = 0` keys the whole name. Returns `None` once no labels remain.
    pub fn suffix_key(&self, skip: usize) -> Option<CompactString> {
        if skip >= self.label_count as usize {
            return None;
        }
        let mut key = CompactString::default();
        for label in self.labels().skip(skip) {
            if !key.is_empty() {
                key.push('.');
            }
            for &byte in label.as_bytes() {
                key.push(byte.to_ascii_lowercase() as char);
            }
        }
        Some(key)
    }
}

impl FromStr for Name {
    type Err = Error;

    /// Parses a domain name from its dotted textual form.
    ///
    /// `""` and `"."` denote the root. A trailing dot marks the explicit
    /// fully-qualified form and is equivalent to its absence.
    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() || s == "." {
            return Ok(Self::root());
        }
        let s = s.strip_suffix('.').unwrap_or(s);
        Self::from_labels(s.split('.').map(str::as_bytes))
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        for label in self.labels() {
            write!(f, "{}.", label)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name(\"{}\")", self)
    }
}

impl PartialEq for Name {
    /// Case-insensitive comparison per DNS semantics.
    fn eq(&self, other: &Self) -> bool {
        self.label_count == other.label_count
            && self
                .labels()
                .zip(other.labels())
                .all(|(a, b)| a.eq_ignore_ascii_case(&b))
    }
}

impl Eq for Name {}

impl Hash for Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for label in self.labels() {
            state.write_usize(label.len());
            for &byte in label.as_bytes() {
                state.write_u8(byte.to_ascii_lowercase());
            }
        }
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::root()
    }
}

impl Serialize for Name {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}
