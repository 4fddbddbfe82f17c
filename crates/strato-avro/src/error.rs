//! Schema generation error types.

use thiserror::Error;

/// Errors from Avro schema generation.
///
/// Every variant is fatal to the build that raised it: no partial schema is
/// produced and nothing is substituted. User-facing variants carry the dotted
/// field path from the build root to the offending position.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The root of a build was not a record model.
    #[error("Not a record model: {type_name}")]
    NotAModel {
        /// Rendering of the offending type.
        type_name: String,
    },

    /// A type with no primitive, logical, or complex mapping (opaque host
    /// types, empty unions).
    #[error("Unsupported type {type_name} at {path}")]
    UnsupportedType { type_name: String, path: String },

    /// A map whose key type is not the string type.
    #[error("Map keys must be str, got {key_type} at {path}")]
    UnsupportedKeyType { key_type: String, path: String },

    /// An enumeration member whose underlying value is not a string.
    #[error("Enumeration {enumeration} member {member} has a non-string value ({kind}) at {path}")]
    InvalidEnumMember {
        enumeration: String,
        member: String,
        kind: &'static str,
        path: String,
    },

    /// A literal constraint permitting a non-string value.
    #[error("Literal {literal} permits non-string value {value} ({kind}) at {path}")]
    InvalidLiteralMember {
        literal: String,
        value: String,
        kind: &'static str,
        path: String,
    },

    /// Classifier contract violation: the type does not map to a primitive.
    /// Unreachable through the public build path.
    #[error("Not a primitive type: {type_name}")]
    NotAPrimitive { type_name: String },

    /// Classifier contract violation: the type does not map to a logical type.
    /// Unreachable through the public build path.
    #[error("Not a logical type: {type_name}")]
    NotALogical { type_name: String },
}
