//! Record data container.
//!
//! [`RecordData`] holds the RDATA values for one resource record, organised
//! per field index and validated against the record's type definition. The
//! definition itself is shared (`Arc`), never copied.

use crate::error::{Error, Result};
use crate::typedef::TypeDef;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Typed RDATA values for one resource record.
#[derive(Clone)]
pub struct RecordData {
    /// The shared type definition this data conforms to.
    def: Arc<TypeDef>,
    /// One value list per field, index-aligned with the definition.
    values: Vec<Vec<Value>>,
}

impl RecordData {
    /// Creates an empty container for the given definition.
    pub fn new(def: Arc<TypeDef>) -> Self {
        let values = vec![Vec::new(); def.len()];
        Self { def, values }
    }

    /// Creates a container from per-field value lists, validating kinds and
    /// arity against the definition.
    pub fn from_values(def: Arc<TypeDef>, values: Vec<Vec<Value>>) -> Result<Self> {
        let data = Self { def, values };
        data.validate()?;
        Ok(data)
    }

    /// Returns the type definition.
    #[inline]
    pub fn def(&self) -> &Arc<TypeDef> {
        &self.def
    }

    /// Appends a value to the field at `index`, checking its kind.
    pub fn push(&mut self, index: usize, value: Value) -> Result<()> {
        let field = self.def.field(index).ok_or_else(|| Error::InvalidFieldName {
            name: format!("#{index}"),
        })?;
        if value.kind() != field.kind() {
            return Err(Error::ValueKindMismatch {
                field: field.name().into(),
                expected: field.kind(),
                actual: value.kind(),
            });
        }
        self.values[index].push(value);
        Ok(())
    }

    /// Appends a value to the named field, case-insensitively.
    pub fn push_named(&mut self, name: &str, value: Value) -> Result<()> {
        let index = self.def.index_of(name).ok_or_else(|| Error::InvalidFieldName {
            name: name.into(),
        })?;
        self.push(index, value)
    }

    /// Returns the values of the field at `index`.
    #[inline]
    pub fn values(&self, index: usize) -> &[Value] {
        self.values.get(index).map_or(&[], Vec::as_slice)
    }

    /// Returns the values of the named field, case-insensitively.
    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.def.index_of(name).map(|index| self.values(index))
    }

    /// Returns the single value of the named field, for fixed-arity fields.
    pub fn get_one(&self, name: &str) -> Option<&Value> {
        self.get(name).and_then(<[Value]>::first)
    }

    /// Checks every field's value kinds and arity against the definition.
    pub fn validate(&self) -> Result<()> {
        for field in self.def.fields() {
            let values = self.values(field.index());
            for value in values {
                if value.kind() != field.kind() {
                    return Err(Error::ValueKindMismatch {
                        field: field.name().into(),
                        expected: field.kind(),
                        actual: value.kind(),
                    });
                }
            }
            if !field.accepts_count(values.len()) {
                return Err(Error::FieldArity {
                    field: field.name().into(),
                    minimum: if field.is_multiple() { field.minimum() } else { 1 },
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }

    /// Returns the encoded RDATA length, before compression.
    pub fn wire_len(&self) -> usize {
        self.values
            .iter()
            .flatten()
            .map(Value::wire_len)
            .sum()
    }
}

impl PartialEq for RecordData {
    fn eq(&self, other: &Self) -> bool {
        self.def.name() == other.def.name() && self.values == other.values
    }
}

impl Eq for RecordData {}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.def.render(self))
    }
}

impl fmt::Debug for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordData")
            .field("type", &self.def.name())
            .field("values", &self.values)
            .finish()
    }
}
