//! Scalar type classification and mapping tables.
//!
//! The classifier is the leaf of the engine: given one type it answers
//! "primitive, logical, or complex?" and maps the first two kinds to their
//! schema fragments. No recursion, no state. Complex types are the
//! resolver's responsibility.

use strato_core::ModelType;

use crate::error::SchemaError;
use crate::options::{SchemaOptions, TimePrecision};
use crate::schema::{LogicalSchema, LogicalType, Primitive};

/// The three resolution routes a type can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Direct 1:1 mapping to an Avro primitive tag.
    Primitive,
    /// Primitive annotated with semantic meaning, possibly parameterized.
    Logical,
    /// Requires recursive decomposition by the resolver.
    Complex,
}

/// Which route resolves `ty`.
#[must_use]
pub const fn classify(ty: &ModelType) -> TypeKind {
    match ty {
        ModelType::Null
        | ModelType::Bool
        | ModelType::Int
        | ModelType::Float
        | ModelType::Bytes
        | ModelType::Str => TypeKind::Primitive,
        ModelType::Decimal
        | ModelType::Uuid
        | ModelType::Date
        | ModelType::Time
        | ModelType::Timestamp
        | ModelType::TimestampTz
        | ModelType::Duration => TypeKind::Logical,
        _ => TypeKind::Complex,
    }
}

/// Avro primitive tag for `ty`.
///
/// Integers map to `long` and floats to `double` unconditionally. The 64-bit
/// tags are a precision-safe default, not a detected width.
///
/// # Errors
///
/// Returns [`SchemaError::NotAPrimitive`] if [`classify`] would not route `ty`
/// here. Unreachable through the public build path.
pub fn primitive(ty: &ModelType) -> Result<Primitive, SchemaError> {
    match ty {
        ModelType::Null => Ok(Primitive::Null),
        ModelType::Bool => Ok(Primitive::Boolean),
        ModelType::Int => Ok(Primitive::Long),
        ModelType::Float => Ok(Primitive::Double),
        ModelType::Bytes => Ok(Primitive::Bytes),
        ModelType::Str => Ok(Primitive::String),
        other => Err(SchemaError::NotAPrimitive {
            type_name: other.to_string(),
        }),
    }
}

/// Logical-type fragment for `ty`, parameterized by `options`.
///
/// Decimal precision and scale and the millisecond/microsecond split for
/// time-like types come from `options`; everything else is a fixed table.
///
/// # Errors
///
/// Returns [`SchemaError::NotALogical`] if [`classify`] would not route `ty`
/// here. Unreachable through the public build path.
pub fn logical(ty: &ModelType, options: &SchemaOptions) -> Result<LogicalSchema, SchemaError> {
    let schema = match ty {
        ModelType::Decimal => {
            LogicalSchema::decimal(options.decimal.precision, options.decimal.scale)
        }
        ModelType::Uuid => LogicalSchema::new(LogicalType::Uuid),
        ModelType::Date => LogicalSchema::new(LogicalType::Date),
        ModelType::Time => LogicalSchema::new(match options.time_precision {
            TimePrecision::Millis => LogicalType::TimeMillis,
            TimePrecision::Micros => LogicalType::TimeMicros,
        }),
        ModelType::Timestamp => LogicalSchema::new(match options.timestamp_precision {
            TimePrecision::Millis => LogicalType::TimestampMillis,
            TimePrecision::Micros => LogicalType::TimestampMicros,
        }),
        ModelType::TimestampTz => LogicalSchema::new(match options.local_timestamp_precision {
            TimePrecision::Millis => LogicalType::LocalTimestampMillis,
            TimePrecision::Micros => LogicalType::LocalTimestampMicros,
        }),
        ModelType::Duration => LogicalSchema::duration(),
        other => {
            return Err(SchemaError::NotALogical {
                type_name: other.to_string(),
            });
        }
    };
    Ok(schema)
}
