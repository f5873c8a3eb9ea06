//! Resource-record field definitions.
//!
//! A field definition gives one RDATA field its name, primitive kind, and
//! arity. Declarations use a compact textual syntax on the field name: a
//! trailing `*` or `+` marks the field variadic (only legal on the last
//! field of a type definition), and an optional integer after the sigil
//! sets the minimum value count (`*` defaults to 0, `+` to 1).

use crate::error::{Error, Result};
use crate::value::ValueKind;
use compact_str::CompactString;
use std::fmt;

/// Definition of a single RDATA field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    /// Position of the field within its type definition.
    index: usize,
    /// Lowercased field name, matching `[\w-]+`.
    name: CompactString,
    /// Primitive kind of the field's values.
    kind: ValueKind,
    /// True if the field accepts a list of values (trailing variadic).
    multiple: bool,
    /// Minimum number of values; 1 for fixed fields.
    minimum: u32,
}

impl FieldDef {
    /// Parses one declaration entry (`name`, `name*`, `name+`, `name*N`,
    /// `name+N`) into a field definition at position `index`.
    pub fn parse(index: usize, declaration: &str, kind: ValueKind) -> Result<Self> {
        let (name, multiple, minimum) = match declaration.find(['*', '+']) {
            Some(at) => {
                let (name, quantifier) = declaration.split_at(at);
                let default = if quantifier.starts_with('+') { 1 } else { 0 };
                let minimum = match &quantifier[1..] {
                    "" => default,
                    digits => digits.parse::<u32>().map_err(|_| Error::InvalidFieldName {
                        name: declaration.into(),
                    })?,
                };
                (name, true, minimum)
            }
            None => (declaration, false, 1),
        };

        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
        {
            return Err(Error::InvalidFieldName {
                name: declaration.into(),
            });
        }

        Ok(Self {
            index,
            name: name.to_ascii_lowercase().into(),
            kind,
            multiple,
            minimum,
        })
    }

    /// Returns the field's position within its type definition.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the lowercased field name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the primitive kind of the field's values.
    #[inline]
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Returns true if the field accepts multiple values.
    #[inline]
    pub fn is_multiple(&self) -> bool {
        self.multiple
    }

    /// Returns the minimum number of values the field requires.
    #[inline]
    pub fn minimum(&self) -> u32 {
        self.minimum
    }

    /// Returns true if `count` values satisfy this field's arity.
    pub fn accepts_count(&self, count: usize) -> bool {
        if self.multiple {
            count >= self.minimum as usize
        } else {
            count == 1
        }
    }
}

impl fmt::Display for FieldDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if self.multiple {
            if self.minimum == 0 {
                write!(f, "*")?;
            } else {
                write!(f, "+{}", self.minimum)?;
            }
        }
        write!(f, " => {}", self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_field() {
        let field = FieldDef::parse(0, "exchange", ValueKind::Name).unwrap();
        assert_eq!(field.name(), "exchange");
        assert!(!field.is_multiple());
        assert_eq!(field.minimum(), 1);
        assert!(field.accepts_count(1));
        assert!(!field.accepts_count(0));
        assert!(!field.accepts_count(2));
    }

    #[test]
    fn test_star_quantifier() {
        let field = FieldDef::parse(0, "data*", ValueKind::Anything).unwrap();
        assert!(field.is_multiple());
        assert_eq!(field.minimum(), 0);
        assert!(field.accepts_count(0));
        assert!(field.accepts_count(7));
    }

    #[test]
    fn test_plus_quantifier_defaults_to_one() {
        let field = FieldDef::parse(0, "txtdata+", ValueKind::CharacterString).unwrap();
        assert!(field.is_multiple());
        assert_eq!(field.minimum(), 1);
        assert!(!field.accepts_count(0));
        assert!(field.accepts_count(1));
    }

    #[test]
    fn test_explicit_minimum() {
        let field = FieldDef::parse(0, "strings+3", ValueKind::CharacterString).unwrap();
        assert_eq!(field.minimum(), 3);
        assert!(!field.accepts_count(2));
        assert!(field.accepts_count(3));

        let field = FieldDef::parse(0, "strings*2", ValueKind::CharacterString).unwrap();
        assert_eq!(field.minimum(), 2);
    }

    #[test]
    fn test_name_is_lowercased() {
        let field = FieldDef::parse(0, "Exchange", ValueKind::Name).unwrap();
        assert_eq!(field.name(), "exchange");
    }

    #[test]
    fn test_bad_names() {
        for bad in ["", "*", "+2", "ex change", "name!", "a+b"] {
            assert!(
                matches!(
                    FieldDef::parse(0, bad, ValueKind::Short),
                    Err(Error::InvalidFieldName { .. })
                ),
                "expected rejection of {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_hyphen_and_underscore_allowed() {
        assert!(FieldDef::parse(0, "cert-usage", ValueKind::Char).is_ok());
        assert!(FieldDef::parse(0, "os_info", ValueKind::CharacterString).is_ok());
    }
}
