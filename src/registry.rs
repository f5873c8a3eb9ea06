//! Resource-record type registry.
//!
//! A [`TypeRegistry`] maps numeric RR type codes to shared
//! [`TypeDef`]s. The codec takes the registry as a parameter in both
//! directions; there is no process-wide mutable state. [`TypeRegistry::standard`]
//! covers the RFC 1035 core types plus AAAA, SRV, and an opaque OPT.

use crate::rtype::RecordType;
use crate::typedef::TypeDef;
use crate::value::ValueKind;
use hashbrown::HashMap;
use std::sync::{Arc, OnceLock};

/// Mapping from RR type code to its type definition.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    defs: HashMap<u16, Arc<TypeDef>>,
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a registry covering the standard record types.
    pub fn standard() -> Self {
        standard_registry().clone()
    }

    /// Registers a definition for a type code, replacing any previous one.
    pub fn insert(&mut self, code: u16, def: TypeDef) {
        self.defs.insert(code, Arc::new(def));
    }

    /// Registers an already-shared definition for a type code.
    pub fn insert_shared(&mut self, code: u16, def: Arc<TypeDef>) {
        self.defs.insert(code, def);
    }

    /// Looks up the definition for a type code.
    #[inline]
    pub fn get(&self, code: u16) -> Option<&Arc<TypeDef>> {
        self.defs.get(&code)
    }

    /// Returns the number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns true if no types are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

/// Shared fallback definition for type codes absent from a registry: the
/// whole RDATA as one opaque value.
pub(crate) fn opaque_def() -> Arc<TypeDef> {
    static DEF: OnceLock<Arc<TypeDef>> = OnceLock::new();
    DEF.get_or_init(|| {
        Arc::new(
            TypeDef::new("OPAQUE", &[("data", ValueKind::Anything)])
                .expect("opaque declaration is valid"),
        )
    })
    .clone()
}

/// Returns the interned definition for a standard record type.
///
/// This is what `TypeRegistry::standard` serves and what the record
/// convenience constructors use.
pub fn standard_def(rtype: RecordType) -> Option<Arc<TypeDef>> {
    standard_registry().get(rtype.code()).cloned()
}

fn standard_registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(build_standard)
}

fn build_standard() -> TypeRegistry {
    use ValueKind::*;

    let mut registry = TypeRegistry::new();
    let mut add = |rtype: RecordType, decl: &[(&str, ValueKind)]| {
        let def = TypeDef::new(rtype.name(), decl).expect("standard declaration is valid");
        registry.insert(rtype.code(), def);
    };

    add(RecordType::A, &[("address", Ipv4)]);
    add(RecordType::NS, &[("nsdname", Name)]);
    add(RecordType::CNAME, &[("cname", Name)]);
    add(
        RecordType::SOA,
        &[
            ("mname", Name),
            ("rname", Name),
            ("serial", Long),
            ("refresh", Long),
            ("retry", Long),
            ("expire", Long),
            ("minimum", Long),
        ],
    );
    add(RecordType::NULL, &[("data", Anything)]);
    add(
        RecordType::WKS,
        &[("address", Ipv4), ("protocol", Char), ("bitmap", BitMap)],
    );
    add(RecordType::PTR, &[("ptrdname", Name)]);
    add(
        RecordType::HINFO,
        &[("cpu", CharacterString), ("os", CharacterString)],
    );
    add(
        RecordType::MX,
        &[("preference", Short), ("exchange", Name)],
    );
    add(RecordType::TXT, &[("txtdata+1", CharacterString)]);
    add(RecordType::AAAA, &[("address", Ipv6)]);
    add(
        RecordType::SRV,
        &[
            ("priority", Short),
            ("weight", Short),
            ("port", Short),
            ("target", Name),
        ],
    );
    // EDNS(0) payload negotiation is the caller's concern; OPT RDATA is
    // carried opaque.
    add(RecordType::OPT, &[("data", Anything)]);

    registry
}
