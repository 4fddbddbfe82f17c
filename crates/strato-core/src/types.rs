//! Host-side data-model vocabulary.
//!
//! A data model is described as a tree of [`ModelType`] values: primitive
//! scalars, logical scalars (primitives annotated with semantic meaning, such
//! as decimals and timestamps), named complex types (records, enumerations,
//! literal value sets), and containers (lists, maps, unions). Named types are
//! carried as copyable *tokens* pairing a [`TypeKey`] identity with a lazy
//! accessor for the type's body, so self-referential and mutually recursive
//! models are describable without cyclic data structures.

use std::any::TypeId;
use std::fmt;

use crate::model::{Enumeration, Literal, Model};

// ---------------------------------------------------------------------------
// TypeKey
// ---------------------------------------------------------------------------

/// Identity of a named model type.
///
/// Wraps [`std::any::TypeId`] so registries key on *which host type* a token
/// was built from, never on structural equality of the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeKey(TypeId);

impl TypeKey {
    /// Key for the host type `T`.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(TypeId::of::<T>())
    }
}

// ---------------------------------------------------------------------------
// RecordToken
// ---------------------------------------------------------------------------

/// Copyable handle for a record model.
///
/// The field list hides behind a fn pointer so a record can mention itself,
/// directly or through another record, without the description itself
/// becoming cyclic. Two tokens are equal when they were built from the same
/// host type, regardless of what their field lists evaluate to.
#[derive(Clone, Copy)]
pub struct RecordToken {
    key: TypeKey,
    name: &'static str,
    fields: fn() -> Vec<Field>,
}

impl RecordToken {
    /// Token for the record model `M`.
    #[must_use]
    pub fn of<M: Model>() -> Self {
        Self {
            key: TypeKey::of::<M>(),
            name: M::name(),
            fields: M::fields,
        }
    }

    /// Identity key of the underlying host type.
    #[must_use]
    pub const fn key(self) -> TypeKey {
        self.key
    }

    /// Declared type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Evaluate the field list, in declaration order.
    #[must_use]
    pub fn fields(self) -> Vec<Field> {
        (self.fields)()
    }
}

impl fmt::Debug for RecordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordToken").field(&self.name).finish()
    }
}

impl PartialEq for RecordToken {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for RecordToken {}

// ---------------------------------------------------------------------------
// EnumToken
// ---------------------------------------------------------------------------

/// Copyable handle for an enumeration.
#[derive(Clone, Copy)]
pub struct EnumToken {
    key: TypeKey,
    name: &'static str,
    members: fn() -> Vec<EnumMember>,
}

impl EnumToken {
    /// Token for the enumeration `E`.
    #[must_use]
    pub fn of<E: Enumeration>() -> Self {
        Self {
            key: TypeKey::of::<E>(),
            name: E::name(),
            members: E::members,
        }
    }

    /// Identity key of the underlying host type.
    #[must_use]
    pub const fn key(self) -> TypeKey {
        self.key
    }

    /// Declared type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Evaluate the member list, in declaration order.
    #[must_use]
    pub fn members(self) -> Vec<EnumMember> {
        (self.members)()
    }
}

impl fmt::Debug for EnumToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EnumToken").field(&self.name).finish()
    }
}

impl PartialEq for EnumToken {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for EnumToken {}

// ---------------------------------------------------------------------------
// LiteralToken
// ---------------------------------------------------------------------------

/// Copyable handle for a literal constraint: a named type restricted to a
/// fixed, finite set of exact values.
#[derive(Clone, Copy)]
pub struct LiteralToken {
    key: TypeKey,
    name: &'static str,
    values: fn() -> Vec<LiteralValue>,
}

impl LiteralToken {
    /// Token for the literal constraint `L`.
    #[must_use]
    pub fn of<L: Literal>() -> Self {
        Self {
            key: TypeKey::of::<L>(),
            name: L::name(),
            values: L::values,
        }
    }

    /// Identity key of the underlying host type.
    #[must_use]
    pub const fn key(self) -> TypeKey {
        self.key
    }

    /// Declared type name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.name
    }

    /// Evaluate the permitted values, in declaration order.
    #[must_use]
    pub fn values(self) -> Vec<LiteralValue> {
        (self.values)()
    }
}

impl fmt::Debug for LiteralToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LiteralToken").field(&self.name).finish()
    }
}

impl PartialEq for LiteralToken {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for LiteralToken {}

// ---------------------------------------------------------------------------
// ModelType
// ---------------------------------------------------------------------------

/// One type in a data model.
///
/// The set is closed: every type a model may use is either a scalar listed
/// here, a named complex type carried by token, a container over other
/// `ModelType`s, or [`ModelType::Opaque`] for host types the introspection
/// layer can name but not decompose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelType {
    /// Absence of a value.
    Null,
    Bool,
    Int,
    Float,
    Bytes,
    Str,
    /// Arbitrary-precision decimal; precision and scale come from build options.
    Decimal,
    Uuid,
    /// Calendar date without time of day.
    Date,
    /// Time of day without date.
    Time,
    /// Date and time without timezone.
    Timestamp,
    /// Date and time with timezone.
    TimestampTz,
    Duration,
    Record(RecordToken),
    Enum(EnumToken),
    Literal(LiteralToken),
    List(Box<ModelType>),
    /// Key type first, value type second. Only string keys have a schema mapping.
    Map(Box<ModelType>, Box<ModelType>),
    /// Members in declaration order; order is semantically significant.
    Union(Vec<ModelType>),
    /// A host type with no mapping, named for diagnostics.
    Opaque(&'static str),
}

impl ModelType {
    /// Identity key for named types; `None` for scalars and containers.
    #[must_use]
    pub const fn key(&self) -> Option<TypeKey> {
        match self {
            Self::Record(token) => Some(token.key),
            Self::Enum(token) => Some(token.key),
            Self::Literal(token) => Some(token.key),
            _ => None,
        }
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Bytes => f.write_str("bytes"),
            Self::Str => f.write_str("str"),
            Self::Decimal => f.write_str("decimal"),
            Self::Uuid => f.write_str("uuid"),
            Self::Date => f.write_str("date"),
            Self::Time => f.write_str("time"),
            Self::Timestamp => f.write_str("timestamp"),
            Self::TimestampTz => f.write_str("timestamptz"),
            Self::Duration => f.write_str("duration"),
            Self::Record(token) => f.write_str(token.name()),
            Self::Enum(token) => f.write_str(token.name()),
            Self::Literal(token) => f.write_str(token.name()),
            Self::List(item) => write!(f, "list<{item}>"),
            Self::Map(key, value) => write!(f, "map<{key}, {value}>"),
            Self::Union(members) => {
                f.write_str("union<")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{member}")?;
                }
                f.write_str(">")
            }
            Self::Opaque(name) => f.write_str(name),
        }
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// Model type for the record `M`.
#[must_use]
pub fn record<M: Model>() -> ModelType {
    ModelType::Record(RecordToken::of::<M>())
}

/// Model type for the enumeration `E`.
#[must_use]
pub fn enumeration<E: Enumeration>() -> ModelType {
    ModelType::Enum(EnumToken::of::<E>())
}

/// Model type for the literal constraint `L`.
#[must_use]
pub fn literal<L: Literal>() -> ModelType {
    ModelType::Literal(LiteralToken::of::<L>())
}

/// A list of `item` elements.
#[must_use]
pub fn list(item: ModelType) -> ModelType {
    ModelType::List(Box::new(item))
}

/// A map from `key` to `value`.
#[must_use]
pub fn map(key: ModelType, value: ModelType) -> ModelType {
    ModelType::Map(Box::new(key), Box::new(value))
}

/// A union of `members`, preserving iteration order.
#[must_use]
pub fn union<I>(members: I) -> ModelType
where
    I: IntoIterator<Item = ModelType>,
{
    ModelType::Union(members.into_iter().collect())
}

/// `ty | null`: the union of `ty` and the null type, null last.
#[must_use]
pub fn optional(ty: ModelType) -> ModelType {
    ModelType::Union(vec![ty, ModelType::Null])
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// One declared field of a record model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: ModelType,
}

impl Field {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ModelType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Field whose type is `ty | null`.
    #[must_use]
    pub fn optional(name: impl Into<String>, ty: ModelType) -> Self {
        Self::new(name, optional(ty))
    }
}

// ---------------------------------------------------------------------------
// EnumMember
// ---------------------------------------------------------------------------

/// One member of an enumeration: symbol name plus underlying value.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: LiteralValue,
}

impl EnumMember {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<LiteralValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// LiteralValue
// ---------------------------------------------------------------------------

/// An exact value appearing in a literal constraint or as an enumeration
/// member's underlying value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl LiteralValue {
    /// Kind name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Bool(_) => "boolean",
        }
    }

    /// The string payload, if this is a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(value) => f.write_str(value),
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for LiteralValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    struct Point;

    impl Model for Point {
        fn name() -> &'static str {
            "Point"
        }

        fn fields() -> Vec<Field> {
            vec![
                Field::new("x", ModelType::Float),
                Field::new("y", ModelType::Float),
            ]
        }
    }

    struct Segment;

    impl Model for Segment {
        fn name() -> &'static str {
            "Segment"
        }

        fn fields() -> Vec<Field> {
            vec![
                Field::new("start", record::<Point>()),
                Field::new("end", record::<Point>()),
            ]
        }
    }

    struct Color;

    impl Enumeration for Color {
        fn name() -> &'static str {
            "Color"
        }

        fn members() -> Vec<EnumMember> {
            vec![
                EnumMember::new("Red", "RED"),
                EnumMember::new("Green", "GREEN"),
            ]
        }
    }

    #[test]
    fn tokens_compare_by_host_type() {
        assert_eq!(RecordToken::of::<Point>(), RecordToken::of::<Point>());
        assert_ne!(RecordToken::of::<Point>(), RecordToken::of::<Segment>());
        assert_eq!(
            RecordToken::of::<Point>().key(),
            TypeKey::of::<Point>(),
        );
    }

    #[test]
    fn named_types_expose_their_key() {
        assert_eq!(record::<Point>().key(), Some(TypeKey::of::<Point>()));
        assert_eq!(enumeration::<Color>().key(), Some(TypeKey::of::<Color>()));
        assert_eq!(ModelType::Str.key(), None);
        assert_eq!(list(ModelType::Str).key(), None);
    }

    #[test]
    fn token_body_evaluates_lazily() {
        let token = RecordToken::of::<Segment>();
        let fields = token.fields();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].name, "start");
        assert_eq!(fields[0].ty, record::<Point>());
    }

    #[test]
    fn optional_wraps_null_last() {
        assert_eq!(
            optional(ModelType::Str),
            ModelType::Union(vec![ModelType::Str, ModelType::Null]),
        );
        assert_eq!(
            Field::optional("nickname", ModelType::Str).ty,
            optional(ModelType::Str),
        );
    }

    #[test]
    fn union_preserves_declaration_order() {
        let a = union([ModelType::Int, ModelType::Str]);
        let b = union([ModelType::Str, ModelType::Int]);
        assert_ne!(a, b);
        assert_eq!(
            a,
            ModelType::Union(vec![ModelType::Int, ModelType::Str]),
        );
    }

    #[test]
    fn literal_values_convert_from_native_kinds() {
        assert_eq!(LiteralValue::from("on"), LiteralValue::Str("on".into()));
        assert_eq!(LiteralValue::from(42_i64), LiteralValue::Int(42));
        assert_eq!(LiteralValue::from(true), LiteralValue::Bool(true));
        assert_eq!(LiteralValue::from(1.5_f64).kind(), "float");
        assert_eq!(LiteralValue::from("on").as_str(), Some("on"));
        assert_eq!(LiteralValue::from(42_i64).as_str(), None);
    }

    #[test]
    fn display_renders_containers() {
        let ty = map(
            ModelType::Str,
            union([ModelType::Null, record::<Point>()]),
        );
        assert_eq!(ty.to_string(), "map<str, union<null | Point>>");
        assert_eq!(list(ModelType::Uuid).to_string(), "list<uuid>");
        assert_eq!(ModelType::Opaque("SocketAddr").to_string(), "SocketAddr");
    }
}
