//! Record abstraction over analysis data.
//!
//! Source records arrive from the persistence layer with a mix of plain
//! fields (ecosystem, package, version) and free-form nested structures
//! (worker results, audit trees). Rather than reflecting over concrete
//! storage types, consumers address a record through the [`Record`] trait:
//! one lookup of a top-level field by name, returning a JSON value tree
//! (scalar, mapping, or sequence) or nothing at all.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Capability trait for anything that can serve as a projection source.
///
/// A `Record` exposes its data one named top-level field at a time. Absent
/// fields are `None`, never an error; nested data comes back as a
/// [`serde_json::Value`] tree that dotted-path resolution can descend into.
pub trait Record {
    /// Resolve a top-level field by name.
    ///
    /// Returns `None` when the record has no field of that name, or when the
    /// field is present but currently holds no value.
    fn field(&self, name: &str) -> Option<Value>;

    /// The full canonical representation of this record.
    ///
    /// Used when no projection is requested. Field order follows the
    /// record's field declaration order.
    fn to_map(&self) -> Map<String, Value>;
}

/// One unit of analysis: a package version in an ecosystem, the analysis
/// run's timestamps, and the per-worker result trees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Ecosystem name, e.g. `npm` or `pypi`
    pub ecosystem: String,
    /// Package name within the ecosystem
    pub package: String,
    /// Version identifier being analysed
    pub version: String,
    /// When the analysis run started
    pub started_at: Option<DateTime<Utc>>,
    /// When the analysis run finished, if it has
    pub finished_at: Option<DateTime<Utc>>,
    /// How many times this record has been served
    pub access_count: i64,
    /// Free-form audit tree attached to the run
    pub audit: Option<Value>,
    /// Worker name → worker result (scalar, mapping, or sequence of mappings)
    pub analyses: Map<String, Value>,
}

impl AnalysisRecord {
    /// Top-level field names, in canonical order.
    const FIELDS: [&'static str; 8] = [
        "ecosystem",
        "package",
        "version",
        "started_at",
        "finished_at",
        "access_count",
        "audit",
        "analyses",
    ];

    /// Create a record with identifiers set and everything else empty.
    #[must_use]
    pub fn new(
        ecosystem: impl Into<String>,
        package: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            ecosystem: ecosystem.into(),
            package: package.into(),
            version: version.into(),
            started_at: None,
            finished_at: None,
            access_count: 0,
            audit: None,
            analyses: Map::new(),
        }
    }
}

impl Record for AnalysisRecord {
    fn field(&self, name: &str) -> Option<Value> {
        match name {
            "ecosystem" => Some(Value::String(self.ecosystem.clone())),
            "package" => Some(Value::String(self.package.clone())),
            "version" => Some(Value::String(self.version.clone())),
            "started_at" => self
                .started_at
                .map(|t| Value::String(t.to_rfc3339())),
            "finished_at" => self
                .finished_at
                .map(|t| Value::String(t.to_rfc3339())),
            "access_count" => Some(Value::from(self.access_count)),
            "audit" => self.audit.clone(),
            "analyses" => Some(Value::Object(self.analyses.clone())),
            _ => None,
        }
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for name in Self::FIELDS {
            if let Some(value) = self.field(name) {
                map.insert(name.to_string(), value);
            }
        }
        map
    }
}
