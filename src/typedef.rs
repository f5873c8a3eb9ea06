//! Resource-record type definitions.
//!
//! A type definition is the ordered list of field definitions describing one
//! RR type's RDATA layout, plus an optional stringifier hook used when
//! rendering record data. Definitions are immutable once built and are meant
//! to be interned in a [`TypeRegistry`](crate::registry::TypeRegistry) and
//! shared via `Arc` across messages and threads.

use crate::error::{Error, Result};
use crate::field::FieldDef;
use crate::rdata::RecordData;
use crate::value::ValueKind;
use compact_str::CompactString;
use hashbrown::HashMap;
use std::fmt;
use std::sync::Arc;

/// Rendering hook attached to a type definition.
///
/// The default rendering joins the string forms of all field values with
/// single spaces; a stringifier replaces that wholesale.
pub type Stringifier = Arc<dyn Fn(&RecordData) -> String + Send + Sync>;

/// An ordered, named set of field definitions for one RR type.
#[derive(Clone)]
pub struct TypeDef {
    /// Presentation name of the RR type (e.g. `"MX"`).
    name: CompactString,
    /// Field definitions in declaration order.
    fields: Vec<FieldDef>,
    /// Lowercased field name → index.
    by_name: HashMap<CompactString, usize>,
    /// Optional rendering hook.
    stringifier: Option<Stringifier>,
}

impl TypeDef {
    /// Builds a type definition from an ordered declaration of
    /// `(field-name, kind)` pairs.
    ///
    /// Field names use the quantifier syntax of [`FieldDef::parse`]. A
    /// quantifier is only accepted on the final field; duplicate names (after
    /// lowercasing) are rejected.
    pub fn new(
        name: impl Into<CompactString>,
        declaration: &[(&str, ValueKind)],
    ) -> Result<Self> {
        let mut fields = Vec::with_capacity(declaration.len());
        let mut by_name = HashMap::with_capacity(declaration.len());

        for (index, (raw, kind)) in declaration.iter().enumerate() {
            let field = FieldDef::parse(index, raw, *kind)?;
            if field.is_multiple() && index + 1 != declaration.len() {
                return Err(Error::MisplacedQuantifier {
                    name: field.name().into(),
                });
            }
            if by_name
                .insert(CompactString::from(field.name()), index)
                .is_some()
            {
                return Err(Error::DuplicateField {
                    name: field.name().into(),
                });
            }
            fields.push(field);
        }

        Ok(Self {
            name: name.into(),
            fields,
            by_name,
            stringifier: None,
        })
    }

    /// Attaches a stringifier, replacing the default rendering.
    #[must_use]
    pub fn with_stringifier(
        mut self,
        f: impl Fn(&RecordData) -> String + Send + Sync + 'static,
    ) -> Self {
        self.stringifier = Some(Arc::new(f));
        self
    }

    /// Returns the presentation name of the RR type.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of fields.
    #[inline]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if the definition has no fields.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the field definitions in declaration order.
    #[inline]
    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Returns the field at `index`.
    #[inline]
    pub fn field(&self, index: usize) -> Option<&FieldDef> {
        self.fields.get(index)
    }

    /// Looks up a field index by name, case-insensitively.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        let lowered: CompactString = name.to_ascii_lowercase().into();
        self.by_name.get(&lowered).copied()
    }

    /// Returns the trailing variadic field, if the definition has one.
    pub fn variadic(&self) -> Option<&FieldDef> {
        self.fields.last().filter(|f| f.is_multiple())
    }

    /// Renders record data through the stringifier, or the default
    /// space-joined field rendering.
    pub fn render(&self, data: &RecordData) -> String {
        if let Some(stringifier) = &self.stringifier {
            return stringifier(data);
        }

        let mut out = String::new();
        for field in &self.fields {
            for value in data.values(field.index()) {
                if !out.is_empty() {
                    out.push(' ');
                }
                out.push_str(&value.to_string());
            }
        }
        out
    }
}

impl fmt::Debug for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDef")
            .field("name", &self.name)
            .field("fields", &self.fields)
            .field("stringifier", &self.stringifier.is_some())
            .finish()
    }
}
