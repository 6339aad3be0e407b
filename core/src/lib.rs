//! # Stack Analysis Core
//!
//! Record model and field projection for the stack analysis service.
//!
//! This crate is the pure, I/O-free part of the service: it defines the
//! [`Record`] abstraction over analysis data and the [`project`] function
//! that extracts a requested subset of fields (including dot-delimited
//! nested paths) out of a record.
//!
//! ## Example
//!
//! ```
//! use stack_analysis_core::{project, AnalysisRecord};
//! use serde_json::json;
//!
//! let mut record = AnalysisRecord::new("npm", "arrify", "1.0.1");
//! record.analyses.insert(
//!     "digests".to_string(),
//!     json!({"details": [{"artifact": true, "sha1": "6be7"}]}),
//! );
//!
//! let result = project(Some(["analyses.digests", "package"].as_slice()), &record);
//! assert_eq!(result["package"], json!("arrify"));
//! assert_eq!(result["analyses"]["digests"]["details"][0]["artifact"], json!(true));
//! ```

pub mod projection;
pub mod record;

// Re-export main types for convenience
pub use projection::project;
pub use record::{AnalysisRecord, Record};
