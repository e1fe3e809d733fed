//! Identifier validation for unit-tracked line items.
//!
//! Checks run in a fixed order and short-circuit: completeness, then
//! format, then in-form duplicates, then the advisory uniqueness check
//! against the marketplace index. The remote check is fail-open — an
//! unreachable backend never blocks submission.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::models::DeviceRow;

/// True iff `s` is exactly 15 ASCII decimal digits. Syntactic only; no
/// check-digit validation.
pub fn is_valid_imei(s: &str) -> bool {
    s.len() == 15 && s.bytes().all(|b| b.is_ascii_digit())
}

/// A single validation finding. Device positions are 1-indexed for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationIssue {
    IncompleteIdentifiers { missing: usize },
    InvalidFormat { positions: Vec<usize> },
    DuplicateLocal { positions: Vec<usize> },
    DuplicateRemote { positions: Vec<usize> },
    AlreadyRegistered { conflicts: Vec<ExistingConflict> },
}

impl ValidationIssue {
    pub fn message(&self) -> String {
        match self {
            ValidationIssue::IncompleteIdentifiers { missing } => {
                format!("{} device IMEI(s) still missing", missing)
            }
            ValidationIssue::InvalidFormat { positions } => format!(
                "IMEI must be exactly 15 digits (device {})",
                join_positions(positions)
            ),
            ValidationIssue::DuplicateLocal { positions } => format!(
                "Duplicate IMEI entered (device {})",
                join_positions(positions)
            ),
            ValidationIssue::DuplicateRemote { positions } => format!(
                "Marketplace reported duplicate IMEIs (device {})",
                join_positions(positions)
            ),
            ValidationIssue::AlreadyRegistered { conflicts } => conflicts
                .iter()
                .map(|c| {
                    format!(
                        "IMEI {} is already registered to {} {}",
                        c.identifier, c.brand, c.model
                    )
                })
                .collect::<Vec<_>>()
                .join("; "),
        }
    }
}

fn join_positions(positions: &[usize]) -> String {
    positions
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result of a validation pass, returned by the dry-run endpoint and
/// embedded in 422 responses.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    /// False when the item is not unit-tracked or the uniqueness check was
    /// unreachable (fail-open).
    pub checked_remotely: bool,
}

impl ValidationReport {
    pub fn clean(checked_remotely: bool) -> Self {
        Self {
            valid: true,
            issues: Vec::new(),
            checked_remotely,
        }
    }

    pub fn failed(issues: Vec<ValidationIssue>, checked_remotely: bool) -> Self {
        Self {
            valid: issues.is_empty(),
            issues,
            checked_remotely,
        }
    }
}

/// Run the local checks (completeness, format, in-form duplicates) over the
/// device rows. Returns the first failing check only.
pub fn check_local(rows: &[DeviceRow], quantity: usize) -> Result<(), ValidationIssue> {
    let filled = rows.iter().filter(|r| !r.identifier.is_empty()).count();
    if filled != quantity {
        return Err(ValidationIssue::IncompleteIdentifiers {
            missing: quantity.saturating_sub(filled),
        });
    }

    let malformed: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.identifier.is_empty() && !is_valid_imei(&r.identifier))
        .map(|(i, _)| i + 1)
        .collect();
    if !malformed.is_empty() {
        return Err(ValidationIssue::InvalidFormat {
            positions: malformed,
        });
    }

    // Only the second and later occurrences are flagged.
    let mut seen = HashSet::new();
    let duplicates: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, r)| !r.identifier.is_empty() && !seen.insert(r.identifier.as_str()))
        .map(|(i, _)| i + 1)
        .collect();
    if !duplicates.is_empty() {
        return Err(ValidationIssue::DuplicateLocal {
            positions: duplicates,
        });
    }

    Ok(())
}

/// Outcome of the marketplace uniqueness pre-check. `Unreachable` means the
/// backend did not answer; callers log it and proceed (the authoritative
/// constraint is the backend's unique index, this check is advisory).
#[derive(Debug, Clone)]
pub enum UniquenessOutcome {
    Verified(UniquenessReport),
    Unreachable,
}

/// Body of the backend's uniqueness-check response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniquenessReport {
    pub unique: bool,
    #[serde(default)]
    pub duplicates: Vec<RemoteDuplicate>,
    #[serde(default)]
    pub existing: Vec<ExistingConflict>,
}

/// A duplicate the backend detected within the submitted list (it may
/// normalize identifiers differently than the local check).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteDuplicate {
    pub identifier: String,
    pub device_number: usize,
}

/// An identifier already registered on another record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExistingConflict {
    pub identifier: String,
    pub brand: String,
    pub model: String,
}

/// Map a verified uniqueness report onto validation issues. An empty result
/// means the report raised nothing blocking.
pub fn remote_issues(report: UniquenessReport) -> Vec<ValidationIssue> {
    if report.unique {
        return Vec::new();
    }
    let mut issues = Vec::new();
    if !report.duplicates.is_empty() {
        issues.push(ValidationIssue::DuplicateRemote {
            positions: report.duplicates.iter().map(|d| d.device_number).collect(),
        });
    }
    if !report.existing.is_empty() {
        issues.push(ValidationIssue::AlreadyRegistered {
            conflicts: report.existing,
        });
    }
    issues
}
