//! Introspection traits implemented by data-model authors.
//!
//! The schema engine never inspects concrete Rust types directly; it consumes
//! the ordered descriptors these traits yield. The `'static` bound gives every
//! implementor a stable [`TypeKey`](crate::types::TypeKey) identity, which is
//! what registries key on to deduplicate shared types and terminate recursion
//! over cyclic models.

use crate::types::{EnumMember, Field, LiteralValue};

/// A record model: a named type with ordered, named, typed fields.
pub trait Model: 'static {
    /// Declared type name. A name that already carries a dotted qualification
    /// is used verbatim; build namespaces only prefix dot-free names.
    fn name() -> &'static str;

    /// Field descriptors in declaration order. Order is semantically
    /// significant: it becomes field order in generated schemas.
    fn fields() -> Vec<Field>;
}

/// An enumeration: a named type with ordered members, each carrying an
/// underlying value.
pub trait Enumeration: 'static {
    /// Declared type name.
    fn name() -> &'static str;

    /// Members in declaration order.
    fn members() -> Vec<EnumMember>;
}

/// A literal constraint: a named type restricted to a fixed, finite set of
/// exact values.
pub trait Literal: 'static {
    /// Declared type name.
    fn name() -> &'static str;

    /// Permitted values in declaration order.
    fn values() -> Vec<LiteralValue>;
}
