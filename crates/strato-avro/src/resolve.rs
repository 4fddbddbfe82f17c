//! Recursive resolution of complex types.
//!
//! The resolver drives the walk over enumerations, literal constraints, nested
//! records, lists, maps, and unions, delegating scalars to the classifier. Its
//! one piece of state beyond configuration is the build's [`NameRegistry`]:
//! every named type is registered there *before* its body is descended into,
//! so a self-reference (direct or mutual) reads its assigned name back and
//! terminates as a reference instead of recursing forever, and a type shared
//! by several fields is defined once and referenced by name thereafter.

use strato_core::{EnumToken, LiteralToken, ModelType, RecordToken};

use crate::classify::{self, TypeKind};
use crate::error::SchemaError;
use crate::options::SchemaOptions;
use crate::registry::NameRegistry;
use crate::schema::{AvroSchema, EnumSchema, FieldSchema, RecordSchema};

/// Resolution state for one schema build: the target namespace, the options
/// threaded unchanged through every step, the shared name table, and the
/// chain of field names used to locate errors.
pub struct Resolver<'a> {
    namespace: Option<&'a str>,
    options: SchemaOptions,
    registry: &'a mut NameRegistry,
    path: Vec<String>,
}

impl<'a> Resolver<'a> {
    /// Resolver assigning names into `registry`.
    #[must_use]
    pub fn new(
        namespace: Option<&'a str>,
        options: SchemaOptions,
        registry: &'a mut NameRegistry,
    ) -> Self {
        Self {
            namespace,
            options,
            registry,
            path: Vec::new(),
        }
    }

    /// Resolve one type to its schema fragment.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::UnsupportedType`] for types with no Avro mapping
    /// (opaque host types, empty unions), [`SchemaError::UnsupportedKeyType`]
    /// for maps not keyed by strings, and [`SchemaError::InvalidEnumMember`] /
    /// [`SchemaError::InvalidLiteralMember`] for enumerations or literal
    /// constraints permitting non-string values. Every error is fatal to the
    /// build that raised it.
    pub fn resolve(&mut self, ty: &ModelType) -> Result<AvroSchema, SchemaError> {
        match classify::classify(ty) {
            TypeKind::Primitive => classify::primitive(ty).map(AvroSchema::Primitive),
            TypeKind::Logical => classify::logical(ty, &self.options).map(AvroSchema::Logical),
            TypeKind::Complex => self.complex(ty),
        }
    }

    fn complex(&mut self, ty: &ModelType) -> Result<AvroSchema, SchemaError> {
        // A type seen earlier in this build already has its final name, even
        // if its body is still being resolved further up the stack.
        if let Some(name) = ty.key().and_then(|key| self.registry.get(key)) {
            return Ok(AvroSchema::Ref(name.to_owned()));
        }

        match ty {
            ModelType::Record(token) => self.record(*token, None).map(AvroSchema::Record),
            ModelType::Enum(token) => self.enumeration(*token).map(AvroSchema::Enum),
            ModelType::Literal(token) => self.literal(*token).map(AvroSchema::Enum),
            ModelType::List(item) => Ok(AvroSchema::array(self.resolve(item)?)),
            ModelType::Map(key, value) => {
                if **key != ModelType::Str {
                    return Err(SchemaError::UnsupportedKeyType {
                        key_type: key.to_string(),
                        path: self.location(),
                    });
                }
                Ok(AvroSchema::map(self.resolve(value)?))
            }
            ModelType::Union(members) if !members.is_empty() => members
                .iter()
                .map(|member| self.resolve(member))
                .collect::<Result<Vec<_>, _>>()
                .map(AvroSchema::Union),
            other => Err(SchemaError::UnsupportedType {
                type_name: other.to_string(),
                path: self.location(),
            }),
        }
    }

    /// Resolve a record model to a full named schema.
    ///
    /// The qualified name is registered before any field is visited; that
    /// single write is what turns recursion back into this record into a name
    /// reference. `explicit_name` overrides the declared name at the build
    /// root only; nested records always keep their own.
    pub(crate) fn record(
        &mut self,
        token: RecordToken,
        explicit_name: Option<&str>,
    ) -> Result<RecordSchema, SchemaError> {
        let name = self.qualify(explicit_name.unwrap_or_else(|| token.name()));
        self.registry.register(token.key(), name.clone());

        let declared = token.fields();
        let mut fields = Vec::with_capacity(declared.len());
        for field in declared {
            self.path.push(field.name.clone());
            let resolved = match field.ty.key().and_then(|key| self.registry.get(key)) {
                Some(seen) => Ok(AvroSchema::Ref(seen.to_owned())),
                None => self.resolve(&field.ty),
            };
            // The frame pops even on failure; errors capture the path when
            // they are built, and a reused resolver starts clean at the root.
            self.path.pop();
            fields.push(FieldSchema::new(field.name, resolved?));
        }

        Ok(RecordSchema { name, fields })
    }

    /// Resolve an enumeration to a named enum schema whose symbols are the
    /// members' underlying values, in declaration order.
    fn enumeration(&mut self, token: EnumToken) -> Result<EnumSchema, SchemaError> {
        let name = self.qualify(token.name());
        // Registered before the members are checked, so the enum's own
        // self-reference resolves even mid-iteration.
        self.registry.register(token.key(), name.clone());

        let mut symbols = Vec::new();
        for member in token.members() {
            let Some(symbol) = member.value.as_str() else {
                return Err(SchemaError::InvalidEnumMember {
                    enumeration: token.name().to_owned(),
                    member: member.name,
                    kind: member.value.kind(),
                    path: self.location(),
                });
            };
            symbols.push(symbol.to_owned());
        }

        Ok(EnumSchema { name, symbols })
    }

    /// Resolve a literal constraint to enum-shaped output.
    ///
    /// A literal over strings is the same union-of-strings pattern an
    /// enumeration is, so it becomes a named enum whose symbols are the
    /// permitted values, named after the literal type itself.
    fn literal(&mut self, token: LiteralToken) -> Result<EnumSchema, SchemaError> {
        let name = self.qualify(token.name());
        self.registry.register(token.key(), name.clone());

        let mut symbols = Vec::new();
        for value in token.values() {
            let Some(symbol) = value.as_str() else {
                return Err(SchemaError::InvalidLiteralMember {
                    literal: token.name().to_owned(),
                    value: value.to_string(),
                    kind: value.kind(),
                    path: self.location(),
                });
            };
            symbols.push(symbol.to_owned());
        }

        Ok(EnumSchema { name, symbols })
    }

    /// Prefix the build namespace onto a dot-free name. Dotted names are
    /// already qualified and pass through verbatim.
    fn qualify(&self, name: &str) -> String {
        match self.namespace {
            Some(namespace) if !name.contains('.') => format!("{namespace}.{name}"),
            _ => name.to_owned(),
        }
    }

    /// Dotted chain of field names from the build root to the current
    /// position.
    fn location(&self) -> String {
        if self.path.is_empty() {
            "<root>".to_owned()
        } else {
            self.path.join(".")
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use strato_core::{
        EnumMember, Enumeration, Field, Literal, LiteralValue, Model, TypeKey, enumeration, list,
        literal, map, record, union,
    };

    use super::*;
    use crate::schema::{LogicalSchema, LogicalType, Primitive};

    struct GenderType;

    impl Enumeration for GenderType {
        fn name() -> &'static str {
            "GenderType"
        }

        fn members() -> Vec<EnumMember> {
            vec![
                EnumMember::new("Male", "MALE"),
                EnumMember::new("Female", "FEMALE"),
                EnumMember::new("Others", "OTHERS"),
            ]
        }
    }

    struct Priority;

    impl Enumeration for Priority {
        fn name() -> &'static str {
            "Priority"
        }

        fn members() -> Vec<EnumMember> {
            vec![
                EnumMember::new("Low", "LOW"),
                EnumMember::new("Urgent", 2_i64),
            ]
        }
    }

    struct NicKind;

    impl Literal for NicKind {
        fn name() -> &'static str {
            "NicKind"
        }

        fn values() -> Vec<LiteralValue> {
            vec!["ethernet".into(), "wireless".into(), "pci".into()]
        }
    }

    struct ColaFormula;

    impl Literal for ColaFormula {
        fn name() -> &'static str {
            "ColaFormula"
        }

        fn values() -> Vec<LiteralValue> {
            vec![
                "top secret flavour".into(),
                "formula #0000".into(),
                42_i64.into(),
            ]
        }
    }

    struct RandomState;

    impl Literal for RandomState {
        fn name() -> &'static str {
            "RandomState"
        }

        fn values() -> Vec<LiteralValue> {
            vec![0_i64.into(), 1_i64.into(), 42_i64.into()]
        }
    }

    struct Node;

    impl Model for Node {
        fn name() -> &'static str {
            "Node"
        }

        fn fields() -> Vec<Field> {
            vec![
                Field::new("value", ModelType::Int),
                Field::optional("next", record::<Node>()),
            ]
        }
    }

    struct Forward;

    impl Model for Forward {
        fn name() -> &'static str {
            "Forward"
        }

        fn fields() -> Vec<Field> {
            vec![Field::new("to", record::<Backward>())]
        }
    }

    struct Backward;

    impl Model for Backward {
        fn name() -> &'static str {
            "Backward"
        }

        fn fields() -> Vec<Field> {
            vec![Field::optional("back", record::<Forward>())]
        }
    }

    struct Inner;

    impl Model for Inner {
        fn name() -> &'static str {
            "Inner"
        }

        fn fields() -> Vec<Field> {
            vec![Field::new("handle", ModelType::Opaque("RawFd"))]
        }
    }

    struct Outer;

    impl Model for Outer {
        fn name() -> &'static str {
            "Outer"
        }

        fn fields() -> Vec<Field> {
            vec![Field::new("inner", record::<Inner>())]
        }
    }

    fn resolve_one(ty: &ModelType) -> Result<AvroSchema, SchemaError> {
        let mut registry = NameRegistry::new();
        Resolver::new(None, SchemaOptions::default(), &mut registry).resolve(ty)
    }

    #[test]
    fn scalars_delegate_to_the_classifier() {
        assert_eq!(
            resolve_one(&ModelType::Str).unwrap(),
            AvroSchema::Primitive(Primitive::String),
        );
        assert_eq!(
            resolve_one(&ModelType::Decimal).unwrap(),
            AvroSchema::Logical(LogicalSchema::decimal(10, 2)),
        );
    }

    #[test]
    fn seen_types_resolve_to_references() {
        let mut registry = NameRegistry::new();
        registry.register(TypeKey::of::<GenderType>(), "hr.GenderType");

        let mut resolver = Resolver::new(None, SchemaOptions::default(), &mut registry);
        assert_eq!(
            resolver.resolve(&enumeration::<GenderType>()).unwrap(),
            AvroSchema::Ref("hr.GenderType".into()),
        );
    }

    #[test]
    fn enum_symbols_keep_declaration_order() {
        let mut registry = NameRegistry::new();
        let mut resolver = Resolver::new(None, SchemaOptions::default(), &mut registry);

        let schema = resolver.resolve(&enumeration::<GenderType>()).unwrap();
        assert_eq!(
            schema,
            AvroSchema::Enum(EnumSchema {
                name: "GenderType".into(),
                symbols: vec!["MALE".into(), "FEMALE".into(), "OTHERS".into()],
            }),
        );

        // The second resolution finds the registered name.
        assert_eq!(
            resolver.resolve(&enumeration::<GenderType>()).unwrap(),
            AvroSchema::Ref("GenderType".into()),
        );
    }

    #[test]
    fn non_string_enum_member_fails_the_build() {
        let mut registry = NameRegistry::new();
        let mut resolver = Resolver::new(None, SchemaOptions::default(), &mut registry);

        let err = resolver.resolve(&enumeration::<Priority>()).unwrap_err();
        assert!(matches!(
            &err,
            SchemaError::InvalidEnumMember { enumeration, member, kind, .. }
                if enumeration == "Priority" && member == "Urgent" && *kind == "integer",
        ));
        // Registration happens before members are checked.
        assert!(registry.contains(TypeKey::of::<Priority>()));
    }

    #[test]
    fn string_literals_resolve_like_enums() {
        let mut registry = NameRegistry::new();
        let mut resolver = Resolver::new(None, SchemaOptions::default(), &mut registry);

        let schema = resolver.resolve(&literal::<NicKind>()).unwrap();
        assert_eq!(
            schema,
            AvroSchema::Enum(EnumSchema {
                name: "NicKind".into(),
                symbols: vec!["ethernet".into(), "wireless".into(), "pci".into()],
            }),
        );
        assert_eq!(registry.get(TypeKey::of::<NicKind>()), Some("NicKind"));
    }

    #[test]
    fn mixed_kind_literal_fails_on_first_violation() {
        let err = resolve_one(&literal::<ColaFormula>()).unwrap_err();
        assert!(matches!(
            &err,
            SchemaError::InvalidLiteralMember { literal, value, kind, .. }
                if literal == "ColaFormula" && value == "42" && *kind == "integer",
        ));
    }

    #[test]
    fn non_string_literal_fails_the_build() {
        let err = resolve_one(&literal::<RandomState>()).unwrap_err();
        assert!(matches!(
            &err,
            SchemaError::InvalidLiteralMember { value, .. } if value == "0",
        ));
    }

    #[test]
    fn self_referential_record_terminates() {
        let mut registry = NameRegistry::new();
        let mut resolver = Resolver::new(None, SchemaOptions::default(), &mut registry);

        let schema = resolver.record(RecordToken::of::<Node>(), None).unwrap();
        assert_eq!(schema.name, "Node");
        assert_eq!(schema.fields.len(), 2);
        assert_eq!(
            schema.fields[1].ty,
            AvroSchema::Union(vec![
                AvroSchema::Ref("Node".into()),
                AvroSchema::Primitive(Primitive::Null),
            ]),
        );
    }

    #[test]
    fn mutually_recursive_records_terminate() {
        let mut registry = NameRegistry::new();
        let mut resolver = Resolver::new(None, SchemaOptions::default(), &mut registry);

        let schema = resolver.record(RecordToken::of::<Forward>(), None).unwrap();
        let AvroSchema::Record(backward) = &schema.fields[0].ty else {
            panic!("expected a nested record, got {:?}", schema.fields[0].ty);
        };
        assert_eq!(backward.name, "Backward");
        assert_eq!(
            backward.fields[0].ty,
            AvroSchema::Union(vec![
                AvroSchema::Ref("Forward".into()),
                AvroSchema::Primitive(Primitive::Null),
            ]),
        );
    }

    #[test]
    fn containers_wrap_resolved_elements() {
        assert_eq!(
            resolve_one(&list(ModelType::Uuid)).unwrap(),
            AvroSchema::array(AvroSchema::Logical(LogicalSchema::new(LogicalType::Uuid))),
        );
        assert_eq!(
            resolve_one(&map(ModelType::Str, ModelType::Int)).unwrap(),
            AvroSchema::map(AvroSchema::Primitive(Primitive::Long)),
        );
    }

    #[test]
    fn map_keys_must_be_strings() {
        let err = resolve_one(&map(ModelType::Int, ModelType::Str)).unwrap_err();
        assert!(matches!(
            &err,
            SchemaError::UnsupportedKeyType { key_type, .. } if key_type == "int",
        ));
    }

    #[test]
    fn union_order_is_declaration_order() {
        let forward = resolve_one(&union([ModelType::Str, ModelType::Int])).unwrap();
        let swapped = resolve_one(&union([ModelType::Int, ModelType::Str])).unwrap();

        assert_eq!(
            forward,
            AvroSchema::Union(vec![
                AvroSchema::Primitive(Primitive::String),
                AvroSchema::Primitive(Primitive::Long),
            ]),
        );
        assert_eq!(
            swapped,
            AvroSchema::Union(vec![
                AvroSchema::Primitive(Primitive::Long),
                AvroSchema::Primitive(Primitive::String),
            ]),
        );
    }

    #[test]
    fn empty_union_is_unsupported() {
        let err = resolve_one(&ModelType::Union(Vec::new())).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedType { .. }));
    }

    #[test]
    fn opaque_types_are_unsupported() {
        let err = resolve_one(&ModelType::Opaque("SocketAddr")).unwrap_err();
        assert!(matches!(
            &err,
            SchemaError::UnsupportedType { type_name, path }
                if type_name == "SocketAddr" && path == "<root>",
        ));
    }

    #[test]
    fn namespace_prefixes_dot_free_names_only() {
        let mut registry = NameRegistry::new();
        let mut resolver = Resolver::new(Some("pipeline"), SchemaOptions::default(), &mut registry);

        let schema = resolver.resolve(&enumeration::<GenderType>()).unwrap();
        assert_eq!(
            schema,
            AvroSchema::Enum(EnumSchema {
                name: "pipeline.GenderType".into(),
                symbols: vec!["MALE".into(), "FEMALE".into(), "OTHERS".into()],
            }),
        );
    }

    #[test]
    fn errors_carry_the_field_path() {
        let mut registry = NameRegistry::new();
        let mut resolver = Resolver::new(None, SchemaOptions::default(), &mut registry);

        let err = resolver.record(RecordToken::of::<Outer>(), None).unwrap_err();
        assert!(matches!(
            &err,
            SchemaError::UnsupportedType { type_name, path }
                if type_name == "RawFd" && path == "inner.handle",
        ));
    }

    #[test]
    fn failed_build_leaves_no_stale_path() {
        let mut registry = NameRegistry::new();
        let mut resolver = Resolver::new(None, SchemaOptions::default(), &mut registry);

        let err = resolver.record(RecordToken::of::<Outer>(), None).unwrap_err();
        assert!(matches!(
            &err,
            SchemaError::UnsupportedType { path, .. } if path == "inner.handle",
        ));

        // The same resolver, asked again at the root, reports the root.
        let err = resolver.resolve(&ModelType::Opaque("Socket")).unwrap_err();
        assert!(matches!(
            &err,
            SchemaError::UnsupportedType { type_name, path }
                if type_name == "Socket" && path == "<root>",
        ));
    }
}
