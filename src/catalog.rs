//! # Approved Record Catalog
//!
//! The catalog is the durable, human-approved side of the pipeline: a
//! version-controlled directory holding one JSON file per approved entry,
//! partitioned into `official/` and `community/` subdirectories. Records are
//! created and edited by the external approval workflow; this module only
//! reads them.
//!
//! Two access paths are provided:
//!
//! - [`load`]: typed loading for the reconciler. A file that fails to parse
//!   is a hard per-file error, because reconciliation against a half-read
//!   catalog would produce a misleading changeset.
//! - [`validate`]: value-level structural validation that keeps going after
//!   the first problem, collecting per-file issues (filename, field,
//!   expected vs actual) so a human can fix the whole catalog in one pass.
//!   Nothing is ever coerced or defaulted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::{Error, Result};
use crate::model::Category;

/// The `security_review` sub-record of an approved record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SecurityReview {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved: Option<bool>,
}

/// One durable, human-approved catalog entry.
///
/// Tags and metadata are human-owned annotations: the reconciler never
/// compares them and this tool never writes them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApprovedRecord {
    /// Display name; must equal the file's stem, case-sensitive.
    pub identity: String,
    pub description: String,
    pub source_url: String,
    /// Must match the partition directory the record lives in.
    pub category: Category,
    pub approver_id: String,
    pub approval_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security_review: Option<SecurityReview>,
    /// Ordered list of free-form tags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Organization-specific key/value pairs, passed through untouched.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, Value>,
}

/// A record together with where it was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedRecord {
    /// Path of the JSON file.
    pub file: PathBuf,
    /// The partition directory the file was found under.
    pub partition: Category,
    pub record: ApprovedRecord,
}

/// One structural problem found in one catalog file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationIssue {
    pub file: PathBuf,
    /// The offending field, or `(document)` for file-level problems.
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.file.display(), self.field, self.message)
    }
}

/// The outcome of validating a whole catalog directory.
#[derive(Debug, Default, Serialize)]
pub struct ValidationReport {
    pub files_checked: usize,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// List every record file under one partition, in sorted order.
fn partition_files(catalog_dir: &Path, category: Category) -> Result<Vec<PathBuf>> {
    let pattern = catalog_dir
        .join(category.partition())
        .join("*.json")
        .to_string_lossy()
        .into_owned();
    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => {
                return Err(Error::CatalogRead {
                    path: e.path().to_path_buf(),
                    message: e.to_string(),
                })
            }
        }
    }
    Ok(files)
}

/// Load every approved record from a catalog directory.
///
/// A missing partition subdirectory simply contributes no records (a fresh
/// catalog starts empty), but the catalog directory itself must exist.
///
/// # Errors
///
/// Returns [`Error::CatalogRead`] when the catalog directory is absent and
/// [`Error::RecordParse`] for the first file that cannot be parsed into an
/// [`ApprovedRecord`]. Use [`validate`] to gather every problem instead of
/// stopping at the first.
pub fn load(catalog_dir: &Path) -> Result<Vec<LoadedRecord>> {
    if !catalog_dir.is_dir() {
        return Err(Error::CatalogRead {
            path: catalog_dir.to_path_buf(),
            message: "directory does not exist".to_string(),
        });
    }

    let mut records = Vec::new();
    for category in Category::ALL {
        for file in partition_files(catalog_dir, category)? {
            let content = fs::read_to_string(&file)?;
            let record: ApprovedRecord =
                serde_json::from_str(&content).map_err(|e| Error::RecordParse {
                    file: file.clone(),
                    message: e.to_string(),
                })?;
            records.push(LoadedRecord {
                file,
                partition: category,
                record,
            });
        }
    }

    log::debug!(
        "loaded {} approved record(s) from {}",
        records.len(),
        catalog_dir.display()
    );
    Ok(records)
}

/// Validate every record file in a catalog directory, collecting issues
/// rather than stopping at the first.
///
/// # Errors
///
/// Only I/O-level failures (unreadable directory) abort validation; every
/// structural problem inside a file becomes a [`ValidationIssue`].
pub fn validate(catalog_dir: &Path) -> Result<ValidationReport> {
    if !catalog_dir.is_dir() {
        return Err(Error::CatalogRead {
            path: catalog_dir.to_path_buf(),
            message: "directory does not exist".to_string(),
        });
    }

    let mut report = ValidationReport::default();
    for category in Category::ALL {
        for file in partition_files(catalog_dir, category)? {
            report.files_checked += 1;
            let content = fs::read_to_string(&file)?;
            match serde_json::from_str::<Value>(&content) {
                Ok(value) => validate_record(&file, &value, category, &mut report.issues),
                Err(e) => report.issues.push(ValidationIssue {
                    file: file.clone(),
                    field: "(document)".to_string(),
                    message: format!("expected a JSON object, got unparseable JSON: {}", e),
                }),
            }
        }
    }
    Ok(report)
}

/// Apply every structural check to one parsed record.
fn validate_record(file: &Path, value: &Value, partition: Category, issues: &mut Vec<ValidationIssue>) {
    let issue = |field: &str, message: String| ValidationIssue {
        file: file.to_path_buf(),
        field: field.to_string(),
        message,
    };

    let Some(object) = value.as_object() else {
        issues.push(issue(
            "(document)",
            format!("expected a JSON object, got {}", json_type_name(value)),
        ));
        return;
    };

    // Required string fields, present and of the right type.
    for field in ["identity", "description", "source_url", "approver_id"] {
        match object.get(field) {
            None => issues.push(issue(field, "required field is missing".to_string())),
            Some(Value::String(_)) => {}
            Some(other) => issues.push(issue(
                field,
                format!("expected a string, got {}", json_type_name(other)),
            )),
        }
    }

    // Identity must equal the storage key (the filename stem), exactly.
    if let Some(Value::String(identity)) = object.get("identity") {
        let stem = file
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if identity != &stem {
            issues.push(issue(
                "identity",
                format!("must equal storage key: expected '{}', got '{}'", stem, identity),
            ));
        }
    }

    // Category must name the partition the record actually lives in.
    match object.get("category") {
        None => issues.push(issue("category", "required field is missing".to_string())),
        Some(Value::String(category)) => match Category::from_partition(category) {
            Some(found) if found == partition => {}
            Some(_) => issues.push(issue(
                "category",
                format!(
                    "partition mismatch: record stored under '{}' but category is '{}'",
                    partition.partition(),
                    category
                ),
            )),
            None => issues.push(issue(
                "category",
                format!(
                    "expected 'official' or 'community', got '{}'",
                    category
                ),
            )),
        },
        Some(other) => issues.push(issue(
            "category",
            format!("expected a string, got {}", json_type_name(other)),
        )),
    }

    // Source URL must be syntactically valid.
    if let Some(Value::String(source_url)) = object.get("source_url") {
        if let Err(e) = Url::parse(source_url) {
            issues.push(issue(
                "source_url",
                format!("expected a valid URL, got '{}' ({})", source_url, e),
            ));
        }
    }

    // Approval date must be an ISO date.
    match object.get("approval_date") {
        None => issues.push(issue("approval_date", "required field is missing".to_string())),
        Some(Value::String(date)) => {
            if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                issues.push(issue(
                    "approval_date",
                    format!("expected an ISO date (YYYY-MM-DD), got '{}'", date),
                ));
            }
        }
        Some(other) => issues.push(issue(
            "approval_date",
            format!("expected an ISO date string, got {}", json_type_name(other)),
        )),
    }

    // Tags, when present, must be an array of strings.
    if let Some(tags) = object.get("tags") {
        match tags.as_array() {
            Some(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if !item.is_string() {
                        issues.push(issue(
                            "tags",
                            format!(
                                "expected a string at index {}, got {}",
                                idx,
                                json_type_name(item)
                            ),
                        ));
                    }
                }
            }
            None => issues.push(issue(
                "tags",
                format!("expected an array of strings, got {}", json_type_name(tags)),
            )),
        }
    }

    // security_review.approved, when present, must be a boolean.
    if let Some(review) = object.get("security_review") {
        match review.as_object() {
            Some(review) => {
                if let Some(approved) = review.get("approved") {
                    if !approved.is_boolean() {
                        issues.push(issue(
                            "security_review.approved",
                            format!("expected a boolean, got {}", json_type_name(approved)),
                        ));
                    }
                }
            }
            None => issues.push(issue(
                "security_review",
                format!("expected an object, got {}", json_type_name(review)),
            )),
        }
    }
}

/// Human-readable JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
