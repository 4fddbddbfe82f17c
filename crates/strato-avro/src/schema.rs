//! Avro schema values and their canonical JSON encoding.
//!
//! The encoding is shape-dependent: primitives and name references render as
//! bare JSON strings, unions as JSON arrays, everything else as objects. The
//! derive cannot express that, so every type here carries a hand-written
//! [`Serialize`] impl. Key order inside objects is fixed (`name`, `type`,
//! then the body) to keep generated documents byte-stable across builds.

use std::fmt;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

/// Byte width of the fixed type underlying the `duration` logical type.
pub const DURATION_FIXED_SIZE: u32 = 12;

// ---------------------------------------------------------------------------
// Primitive
// ---------------------------------------------------------------------------

/// The eight Avro primitive type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Null,
    Boolean,
    Int,
    Long,
    Float,
    Double,
    Bytes,
    String,
}

impl Primitive {
    /// The tag as it appears in schema documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Int => "int",
            Self::Long => "long",
            Self::Float => "float",
            Self::Double => "double",
            Self::Bytes => "bytes",
            Self::String => "string",
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Primitive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LogicalType
// ---------------------------------------------------------------------------

/// The Avro logical type names, each knowing the type tag it annotates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalType {
    Decimal,
    Uuid,
    Date,
    TimeMillis,
    TimeMicros,
    TimestampMillis,
    TimestampMicros,
    LocalTimestampMillis,
    LocalTimestampMicros,
    Duration,
}

impl LogicalType {
    /// The `logicalType` name as it appears in schema documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Decimal => "decimal",
            Self::Uuid => "uuid",
            Self::Date => "date",
            Self::TimeMillis => "time-millis",
            Self::TimeMicros => "time-micros",
            Self::TimestampMillis => "timestamp-millis",
            Self::TimestampMicros => "timestamp-micros",
            Self::LocalTimestampMillis => "local-timestamp-millis",
            Self::LocalTimestampMicros => "local-timestamp-micros",
            Self::Duration => "duration",
        }
    }

    /// The underlying Avro type tag this logical type annotates.
    #[must_use]
    pub const fn backing_tag(self) -> &'static str {
        match self {
            Self::Decimal => "bytes",
            Self::Uuid => "string",
            Self::Date | Self::TimeMillis => "int",
            Self::TimeMicros
            | Self::TimestampMillis
            | Self::TimestampMicros
            | Self::LocalTimestampMillis
            | Self::LocalTimestampMicros => "long",
            Self::Duration => "fixed",
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// LogicalSchema
// ---------------------------------------------------------------------------

/// A logical type annotation with its extra parameters, encoded as
/// `{"type": <backing tag>, "logicalType": <name>, ...params}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalSchema {
    pub logical_type: LogicalType,
    pub precision: Option<u32>,
    pub scale: Option<u32>,
    pub size: Option<u32>,
}

impl LogicalSchema {
    /// A logical type with no extra parameters.
    #[must_use]
    pub const fn new(logical_type: LogicalType) -> Self {
        Self {
            logical_type,
            precision: None,
            scale: None,
            size: None,
        }
    }

    /// A decimal with explicit precision and scale.
    #[must_use]
    pub const fn decimal(precision: u32, scale: u32) -> Self {
        Self {
            logical_type: LogicalType::Decimal,
            precision: Some(precision),
            scale: Some(scale),
            size: None,
        }
    }

    /// A duration over its 12-byte fixed.
    #[must_use]
    pub const fn duration() -> Self {
        Self {
            logical_type: LogicalType::Duration,
            precision: None,
            scale: None,
            size: Some(DURATION_FIXED_SIZE),
        }
    }
}

impl Serialize for LogicalSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let extras = usize::from(self.precision.is_some())
            + usize::from(self.scale.is_some())
            + usize::from(self.size.is_some());
        let mut map = serializer.serialize_map(Some(2 + extras))?;
        map.serialize_entry("type", self.logical_type.backing_tag())?;
        map.serialize_entry("logicalType", self.logical_type.as_str())?;
        if let Some(precision) = self.precision {
            map.serialize_entry("precision", &precision)?;
        }
        if let Some(scale) = self.scale {
            map.serialize_entry("scale", &scale)?;
        }
        if let Some(size) = self.size {
            map.serialize_entry("size", &size)?;
        }
        map.end()
    }
}

// ---------------------------------------------------------------------------
// Named schemas
// ---------------------------------------------------------------------------

/// One field of a record schema: `{"name": ..., "type": ...}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSchema {
    pub name: String,
    pub ty: AvroSchema,
}

impl FieldSchema {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: AvroSchema) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

impl Serialize for FieldSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FieldSchema", 2)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", &self.ty)?;
        state.end()
    }
}

/// A named record schema: `{"name": ..., "type": "record", "fields": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    /// Fully qualified name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldSchema>,
}

impl RecordSchema {
    /// Compact canonical JSON text for this schema.
    ///
    /// # Errors
    ///
    /// Returns an error if JSON serialization fails. Schema values contain
    /// only strings, integers, and nested schema values, so this is not
    /// expected in practice.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Pretty-printed JSON text for this schema.
    ///
    /// # Errors
    ///
    /// Same conditions as [`RecordSchema::to_json_string`].
    pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Serialize for RecordSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RecordSchema", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", "record")?;
        state.serialize_field("fields", &self.fields)?;
        state.end()
    }
}

/// A named enum schema: `{"name": ..., "type": "enum", "symbols": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumSchema {
    /// Fully qualified name.
    pub name: String,
    /// Symbols in declaration order.
    pub symbols: Vec<String>,
}

impl Serialize for EnumSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("EnumSchema", 3)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("type", "enum")?;
        state.serialize_field("symbols", &self.symbols)?;
        state.end()
    }
}

// ---------------------------------------------------------------------------
// AvroSchema
// ---------------------------------------------------------------------------

/// One schema fragment: the recursive output of type resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvroSchema {
    /// A bare primitive tag.
    Primitive(Primitive),
    /// A logical type annotation object.
    Logical(LogicalSchema),
    /// A bare name referencing a previously defined named type.
    Ref(String),
    Record(RecordSchema),
    Enum(EnumSchema),
    /// `{"type": "array", "items": ...}`.
    Array(Box<AvroSchema>),
    /// `{"type": "map", "values": ...}`; keys are always strings in Avro.
    Map(Box<AvroSchema>),
    /// An ordered union, encoded as a JSON array.
    Union(Vec<AvroSchema>),
}

impl AvroSchema {
    /// An array of `items`.
    #[must_use]
    pub fn array(items: Self) -> Self {
        Self::Array(Box::new(items))
    }

    /// A map with `values` values.
    #[must_use]
    pub fn map(values: Self) -> Self {
        Self::Map(Box::new(values))
    }
}

impl Serialize for AvroSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Primitive(primitive) => primitive.serialize(serializer),
            Self::Logical(logical) => logical.serialize(serializer),
            Self::Ref(name) => serializer.serialize_str(name),
            Self::Record(record) => record.serialize(serializer),
            Self::Enum(inner) => inner.serialize(serializer),
            Self::Array(items) => {
                let mut state = serializer.serialize_struct("ArraySchema", 2)?;
                state.serialize_field("type", "array")?;
                state.serialize_field("items", items.as_ref())?;
                state.end()
            }
            Self::Map(values) => {
                let mut state = serializer.serialize_struct("MapSchema", 2)?;
                state.serialize_field("type", "map")?;
                state.serialize_field("values", values.as_ref())?;
                state.end()
            }
            Self::Union(members) => members.serialize(serializer),
        }
    }
}
