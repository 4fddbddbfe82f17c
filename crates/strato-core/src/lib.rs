//! # strato-core
//!
//! Data-model vocabulary and introspection traits for Strato.
//!
//! This crate provides the foundational types shared across all Strato crates:
//! - [`ModelType`]: the closed set of types a data model may use
//! - Tokens ([`RecordToken`], [`EnumToken`], [`LiteralToken`]) carrying named-type identity
//! - Introspection traits ([`Model`], [`Enumeration`], [`Literal`]) implemented by model authors
//! - Field and member descriptors consumed by the schema engine

pub mod model;
pub mod types;

pub use model::{Enumeration, Literal, Model};
pub use types::{
    EnumMember, EnumToken, Field, LiteralToken, LiteralValue, ModelType, RecordToken, TypeKey,
    enumeration, list, literal, map, optional, record, union,
};
