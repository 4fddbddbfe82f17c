//! Build options consumed by the type classifier.

use serde::{Deserialize, Serialize};

/// Millisecond or microsecond resolution for time-like logical types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimePrecision {
    #[default]
    Millis,
    Micros,
}

/// Precision and scale applied to every decimal field in a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecimalOptions {
    pub precision: u32,
    pub scale: u32,
}

impl DecimalOptions {
    #[must_use]
    pub const fn new(precision: u32, scale: u32) -> Self {
        Self { precision, scale }
    }
}

impl Default for DecimalOptions {
    fn default() -> Self {
        Self::new(10, 2)
    }
}

/// Options threaded through one schema build.
///
/// Immutable and `Copy`: supplied once at the top-level entry point and passed
/// unchanged through every recursive resolution step. There is no global or
/// shared default; each build constructs its own value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaOptions {
    pub decimal: DecimalOptions,
    pub time_precision: TimePrecision,
    pub timestamp_precision: TimePrecision,
    pub local_timestamp_precision: TimePrecision,
}
