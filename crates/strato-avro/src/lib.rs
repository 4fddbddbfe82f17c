//! # strato-avro
//!
//! Avro schema generation for Strato data models.
//!
//! This crate provides:
//! - `SchemaBuilder` / `schema_for`: build a named record schema from a model
//! - `Resolver`: the recursive type-resolution engine behind the builder
//! - `NameRegistry`: the per-build name table that deduplicates shared types
//!   and terminates recursion over cyclic models
//! - `AvroSchema` and friends: the structured schema value and its canonical
//!   JSON text encoding
//!
//! ## Architecture
//!
//! Model vocabulary and introspection traits live in `strato-core`; this crate
//! consumes those descriptors and never inspects concrete Rust types itself.
//! The classifier maps scalar types to primitive and logical fragments, the
//! resolver walks complex types (enums, literals, nested records, containers,
//! unions) while registering every named type before descending into its body,
//! and the builder assembles the top-level record and owns naming. The engine
//! is pure: no I/O, no logging, no shared state beyond the registry a build
//! owns.

pub mod builder;
pub mod classify;
pub mod error;
pub mod options;
pub mod registry;
pub mod resolve;
pub mod schema;

pub use builder::{SchemaBuilder, schema_for};
pub use classify::{TypeKind, classify};
pub use error::SchemaError;
pub use options::{DecimalOptions, SchemaOptions, TimePrecision};
pub use registry::NameRegistry;
pub use resolve::Resolver;
pub use schema::{
    AvroSchema, DURATION_FIXED_SIZE, EnumSchema, FieldSchema, LogicalSchema, LogicalType,
    Primitive, RecordSchema,
};
