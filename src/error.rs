//! Codec error types.
//!
//! Every fallible operation in this crate returns [`Result`]. Encode-side
//! errors abort the whole message encode; decode-side errors abort the whole
//! message decode. Exceeding the UDP size budget is deliberately *not* an
//! error: it is absorbed by the truncation (TC) mechanism instead.

use crate::value::ValueKind;
use thiserror::Error;

/// Result type alias for codec operations.
pub type Result<T> = std::result::Result<T, Error>;

/// DNS codec errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Type definition errors
    // =========================================================================
    /// Field name does not match `[\w-]+`.
    #[error("invalid field name {name:?}")]
    InvalidFieldName {
        /// The offending raw declaration entry.
        name: String,
    },

    /// A `+`/`*` quantifier appeared on a field other than the last.
    #[error("quantifier on non-final field {name:?}")]
    MisplacedQuantifier {
        /// The offending field name.
        name: String,
    },

    /// Two fields share a name after lowercasing.
    #[error("duplicate field name {name:?}")]
    DuplicateField {
        /// The duplicated name.
        name: String,
    },

    // =========================================================================
    // Value errors
    // =========================================================================
    /// Character string exceeds 255 bytes.
    #[error("character string too long: {length} bytes exceeds maximum of 255")]
    CharacterStringTooLong {
        /// Actual byte length.
        length: usize,
    },

    /// Label exceeds maximum length of 63 bytes.
    #[error("label too long: {length} bytes exceeds maximum of 63")]
    LabelTooLong {
        /// Actual label length.
        length: usize,
    },

    /// Domain name exceeds 255 bytes in wire form.
    #[error("name too long: {length} bytes exceeds maximum of 255")]
    NameTooLong {
        /// Wire-form length (length bytes + labels + terminator).
        length: usize,
    },

    /// Empty label in the middle of a domain name.
    #[error("empty label at position {position} (only allowed at end for root)")]
    EmptyLabel {
        /// Index of the empty label.
        position: usize,
    },

    /// Textual address form did not parse.
    #[error("invalid address {input:?}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
    },

    /// A value's kind does not match the field definition it was stored under.
    #[error("field {field:?} expects a {expected} value, got {actual}")]
    ValueKindMismatch {
        /// The field name.
        field: String,
        /// Kind declared by the field definition.
        expected: ValueKind,
        /// Kind of the rejected value.
        actual: ValueKind,
    },

    /// A field holds fewer values than its arity requires.
    #[error("field {field:?} requires at least {minimum} values, got {actual}")]
    FieldArity {
        /// The field name.
        field: String,
        /// Minimum value count for the field.
        minimum: u32,
        /// Values actually present.
        actual: usize,
    },

    // =========================================================================
    // Wire format errors (decode)
    // =========================================================================
    /// Packet shorter than the declared fields need.
    #[error("unexpected end of packet at offset {offset}")]
    ShortRead {
        /// Byte offset where the read ran out.
        offset: usize,
    },

    /// Label length byte uses a reserved type (top bits `10` or `01`).
    #[error("reserved label type 0x{byte:02X} at offset {offset}")]
    ReservedLabelType {
        /// Offset of the length byte.
        offset: usize,
        /// The offending byte.
        byte: u8,
    },

    /// Compression pointer targets an offset at or past the packet end.
    #[error("compression pointer at offset {offset} targets {target}, past packet end")]
    PointerOutOfBounds {
        /// Offset of the pointer.
        offset: usize,
        /// Target offset the pointer references.
        target: usize,
    },

    /// An offset was revisited while following pointers within one name.
    #[error("compression pointer loop detected at offset {offset}")]
    CompressionLoop {
        /// Offset where the loop closed.
        offset: usize,
    },

    /// RDATA fields consumed a different byte count than RDLENGTH declared.
    #[error("RDATA length mismatch for {rtype}: declared {expected}, consumed {actual}")]
    RdataLengthMismatch {
        /// Record type name or numeric code.
        rtype: String,
        /// Declared RDLENGTH.
        expected: usize,
        /// Bytes actually consumed by the typed fields.
        actual: usize,
    },
}

impl Error {
    /// Creates a new `ShortRead` error.
    #[inline]
    pub fn short_read(offset: usize) -> Self {
        Self::ShortRead { offset }
    }

    /// Creates a new `LabelTooLong` error.
    #[inline]
    pub fn label_too_long(length: usize) -> Self {
        Self::LabelTooLong { length }
    }

    /// Creates a new `NameTooLong` error.
    #[inline]
    pub fn name_too_long(length: usize) -> Self {
        Self::NameTooLong { length }
    }

    /// Creates a new `RdataLengthMismatch` error.
    #[inline]
    pub fn rdata_length_mismatch(
        rtype: impl Into<String>,
        expected: usize,
        actual: usize,
    ) -> Self {
        Self::RdataLengthMismatch {
            rtype: rtype.into(),
            expected,
            actual,
        }
    }

    /// Returns true if this error indicates a malformed packet that should be
    /// dropped rather than answered.
    #[inline]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::ShortRead { .. }
                | Self::ReservedLabelType { .. }
                | Self::PointerOutOfBounds { .. }
                | Self::CompressionLoop { .. }
                | Self::NameTooLong { .. }
                | Self::RdataLengthMismatch { .. }
        )
    }

    /// Returns true if this error stems from an invalid type definition
    /// rather than from wire data.
    #[inline]
    pub fn is_definition_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidFieldName { .. }
                | Self::MisplacedQuantifier { .. }
                | Self::DuplicateField { .. }
        )
    }
}
