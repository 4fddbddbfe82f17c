//! Top-level record schema builder.

use strato_core::{Model, ModelType, RecordToken};

use crate::error::SchemaError;
use crate::options::SchemaOptions;
use crate::registry::NameRegistry;
use crate::resolve::Resolver;
use crate::schema::RecordSchema;

/// Builds one named record schema from a record model.
///
/// Construction picks the model; fluent setters supply the optional schema
/// name (defaults to the model's declared name), the namespace, and the
/// [`SchemaOptions`]. A build either returns a complete schema or the first
/// error raised while resolving a field; there is no partial output.
#[derive(Debug, Clone)]
pub struct SchemaBuilder {
    token: RecordToken,
    schema_name: Option<String>,
    namespace: Option<String>,
    options: SchemaOptions,
}

impl SchemaBuilder {
    /// Builder for the record model `M`.
    #[must_use]
    pub fn new<M: Model>() -> Self {
        Self::with_token(RecordToken::of::<M>())
    }

    /// Builder for a dynamically supplied type.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotAModel`] unless `ty` is a record type.
    pub fn from_type(ty: &ModelType) -> Result<Self, SchemaError> {
        match ty {
            ModelType::Record(token) => Ok(Self::with_token(*token)),
            other => Err(SchemaError::NotAModel {
                type_name: other.to_string(),
            }),
        }
    }

    fn with_token(token: RecordToken) -> Self {
        Self {
            token,
            schema_name: None,
            namespace: None,
            options: SchemaOptions::default(),
        }
    }

    /// Override the schema name. A dotted name is treated as already
    /// qualified and is never prefixed by the namespace.
    #[must_use]
    pub fn schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    /// Namespace prefixed onto every dot-free type name in the build.
    #[must_use]
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Options threaded through every resolution step of the build.
    #[must_use]
    pub const fn options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Build the schema with a fresh registry.
    ///
    /// # Errors
    ///
    /// Any [`SchemaError`] raised while resolving a field aborts the build;
    /// no partial schema is returned.
    pub fn build(self) -> Result<RecordSchema, SchemaError> {
        let mut registry = NameRegistry::new();
        self.build_with(&mut registry)
    }

    /// Build against a caller-owned registry, sharing type names with other
    /// builds that use the same registry.
    ///
    /// The root model is registered under its qualified name before any field
    /// is resolved, so fields referring back to it become name references. On
    /// failure, names registered before the error stay in `registry`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SchemaBuilder::build`].
    pub fn build_with(self, registry: &mut NameRegistry) -> Result<RecordSchema, SchemaError> {
        Resolver::new(self.namespace.as_deref(), self.options, registry)
            .record(self.token, self.schema_name.as_deref())
    }
}

/// Schema for the record model `M` with default options and no namespace.
///
/// # Errors
///
/// Same conditions as [`SchemaBuilder::build`].
pub fn schema_for<M: Model>() -> Result<RecordSchema, SchemaError> {
    SchemaBuilder::new::<M>().build()
}
