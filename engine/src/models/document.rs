//! Document calculation input and computed output types
//!
//! `CalculationInput` is the live form state: it mutates as the user edits
//! and the breakdown is recomputed synchronously on every change.
//! `CostBreakdown` is the derived view (never stored on its own), and
//! `CalculationRecord` is the complete snapshot handed to the persistence
//! collaborator, self-describing enough to stay interpretable after the
//! reference tables change.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::reference::{ComplexityLevel, DocumentCategory, NormativeType};

/// User-supplied facts for one document calculation
///
/// Staff counts are keyed by the role's id rendered as a string, or by the
/// role's display name; the provider accepts both spellings and so does
/// this engine. Roles with no entry count as zero.
///
/// # Example
/// ```
/// use shnq_costing_core_rs::{CalculationInput, ComplexityLevel, DocumentCategory, NormativeType};
///
/// let input = CalculationInput::new(
///     "SHNQ 2.01.03 Seysmik hududlarda qurilish",
///     NormativeType::Shnq,
///     DocumentCategory::New,
///     ComplexityLevel::Level1,
///     120,
/// )
/// .with_staff_count("1", 2)
/// .with_research_required(true);
///
/// assert_eq!(input.total_pages, 120);
/// assert!(input.is_research_required);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// Document title
    pub name: String,
    /// Total page count of the document being costed
    pub total_pages: u32,
    pub normative_type: NormativeType,
    pub document_category: DocumentCategory,
    pub complexity_level: ComplexityLevel,
    /// Whether dedicated research is mandated for this document.
    /// Informational: affects the displayed research coefficient only.
    #[serde(default)]
    pub is_research_required: bool,
    /// Assigned employee count per staff role (role id or role name → count)
    #[serde(default)]
    pub staff_counts: HashMap<String, u32>,

    /// Reporting category id, if the document is filed under one
    #[serde(default)]
    pub calculation_category: Option<i64>,
    /// Amount already disbursed (planning attribute, not computed)
    #[serde(default)]
    pub completed_amount: Decimal,
    /// Amount planned for the next budget year (planning attribute)
    #[serde(default)]
    pub planned_amount: Decimal,
    /// Free-text development deadline (e.g. "2026-yil III-chorak")
    #[serde(default)]
    pub development_deadline: String,
    /// Organization executing the development
    #[serde(default)]
    pub executor_organization: String,
    #[serde(default)]
    pub notes: String,
}

impl CalculationInput {
    /// Create an input with the mandatory fields; everything else defaults
    pub fn new(
        name: impl Into<String>,
        normative_type: NormativeType,
        document_category: DocumentCategory,
        complexity_level: ComplexityLevel,
        total_pages: u32,
    ) -> Self {
        Self {
            name: name.into(),
            total_pages,
            normative_type,
            document_category,
            complexity_level,
            is_research_required: false,
            staff_counts: HashMap::new(),
            calculation_category: None,
            completed_amount: Decimal::ZERO,
            planned_amount: Decimal::ZERO,
            development_deadline: String::new(),
            executor_organization: String::new(),
            notes: String::new(),
        }
    }

    /// Set the employee count for one staff role (builder style)
    pub fn with_staff_count(mut self, role_key: impl Into<String>, count: u32) -> Self {
        self.staff_counts.insert(role_key.into(), count);
        self
    }

    /// Toggle the research-required flag (builder style)
    pub fn with_research_required(mut self, required: bool) -> Self {
        self.is_research_required = required;
        self
    }
}

/// One row of the persisted staff snapshot
///
/// Mirrors the provider's `staff_snapshot` JSON rows so historical records
/// keep the coefficient and MROT that were in force at calculation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffLine {
    pub staff_id: i64,
    pub name: String,
    pub employee_count: u32,
    pub coefficient: Decimal,
    pub mrot: Decimal,
    /// `employee_count × coefficient × mrot`
    pub amount: Decimal,
}

/// Derived cost figures for display
///
/// Recomputed from scratch on every input change; all values are carried at
/// full precision. Rounding happens only when a [`CalculationRecord`] is
/// produced for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    /// Base page coefficient selected for (type, category); zero when the
    /// normative type had no active coefficient row
    pub base_coefficient: Decimal,
    /// Complexity multiplier selected for (type, level); zero when missing
    pub complexity_coefficient: Decimal,
    /// `total_pages / base_coefficient`, zero when the base is zero
    pub page_ratio: Decimal,
    /// 1.4 when research is required, 1.0 otherwise. Display-only: it is
    /// NOT folded into `final_total_amount`.
    pub research_coefficient: Decimal,
    /// Per-role contributions, in staff composition order
    pub staff_lines: Vec<StaffLine>,
    /// Sum of all staff line amounts
    pub staff_total_amount: Decimal,
    /// `staff_total × page_ratio × complexity × multiplier`
    pub final_total_amount: Decimal,
}

/// Complete, self-describing snapshot of one calculation
///
/// This is the shape handed to the persistence collaborator on save. It
/// embeds the raw input, the computed values rounded to money precision,
/// and the fingerprint of the reference tables the computation ran against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationRecord {
    pub id: Uuid,

    pub name: String,
    pub total_pages: u32,
    pub normative_type: NormativeType,
    pub document_category: DocumentCategory,
    pub complexity_level: ComplexityLevel,
    pub is_research_required: bool,
    pub calculation_category: Option<i64>,

    pub selected_base_coefficient: Decimal,
    pub selected_complexity_coefficient: Decimal,
    pub research_coefficient: Decimal,
    /// Per-role rows with amounts rounded to money precision
    pub staff_snapshot: Vec<StaffLine>,
    pub staff_total_amount: Decimal,
    pub final_total_amount: Decimal,

    pub completed_amount: Decimal,
    pub planned_amount: Decimal,
    pub development_deadline: String,
    pub executor_organization: String,
    pub notes: String,

    /// SHA-256 of the reference-table snapshot this record was computed
    /// against (hex). Lets auditors tell which coefficients were in force.
    pub reference_fingerprint: String,
    pub created_at: DateTime<Utc>,
}
