//! Reference-table snapshot: coefficient rows, staff roles, categories
//!
//! The tables are fetched once per editing session and treated as a
//! read-only snapshot. Lookups honor the `is_active` flag the same way the
//! provider's queryset filters do: an inactive row is invisible, which the
//! calculator observes as a missing lookup (zero contribution).

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::models::{
    CalculationCategory, CalculationInput, NormativeCoefficient, NormativeType, StaffRole,
};

/// Errors the pre-submission validation can surface
///
/// The calculator itself never raises these; it degrades to zero
/// contributions. The form layer is expected to call
/// [`ReferenceTables::validate_input`] before allowing submission so the
/// silent degradation is never mistaken for a real price.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no active coefficient row for normative type '{normative_type}'")]
    MissingLookup { normative_type: String },

    #[error("total page count must be at least 1, got {total_pages}")]
    InvalidPageCount { total_pages: u32 },
}

/// Read-only snapshot of the reference data
///
/// # Example
/// ```
/// use shnq_costing_core_rs::{NormativeType, ReferenceTables};
///
/// let tables = ReferenceTables::seed();
/// let row = tables.find_coefficients(NormativeType::Shnq).unwrap();
/// assert_eq!(row.new_document_base.to_string(), "6.00");
/// assert!(tables.find_coefficients(NormativeType::Eurocode).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceTables {
    pub coefficients: Vec<NormativeCoefficient>,
    pub staff: Vec<StaffRole>,
    #[serde(default)]
    pub categories: Vec<CalculationCategory>,
}

impl ReferenceTables {
    /// Build a snapshot from provider payloads
    pub fn new(
        coefficients: Vec<NormativeCoefficient>,
        staff: Vec<StaffRole>,
        categories: Vec<CalculationCategory>,
    ) -> Self {
        Self {
            coefficients,
            staff,
            categories,
        }
    }

    /// Find the active coefficient row for a normative type
    ///
    /// Returns `None` when the type has no row or the row is inactive; the
    /// calculator treats that as a zero base and zero complexity
    /// coefficient rather than an error.
    pub fn find_coefficients(&self, ty: NormativeType) -> Option<&NormativeCoefficient> {
        self.coefficients
            .iter()
            .find(|row| row.normative_type == ty && row.is_active)
    }

    /// Active staff roles in composition order (sort_order, then id)
    pub fn staff_roles(&self) -> Vec<&StaffRole> {
        let mut roles: Vec<&StaffRole> = self.staff.iter().filter(|r| r.is_active).collect();
        roles.sort_by_key(|r| (r.sort_order, r.id));
        roles
    }

    /// Look up a reporting category by id
    pub fn find_category(&self, id: i64) -> Option<&CalculationCategory> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Pre-submission validation the form layer must run (MissingLookup
    /// and page-count checks); see [`ValidationError`]
    pub fn validate_input(&self, input: &CalculationInput) -> Result<(), ValidationError> {
        if input.total_pages < 1 {
            return Err(ValidationError::InvalidPageCount {
                total_pages: input.total_pages,
            });
        }
        if self.find_coefficients(input.normative_type).is_none() {
            return Err(ValidationError::MissingLookup {
                normative_type: input.normative_type.key().to_string(),
            });
        }
        Ok(())
    }

    /// SHA-256 over the canonical JSON serialization of the snapshot (hex)
    ///
    /// Recorded in every persisted calculation so historical records can be
    /// traced to the coefficients that were in force.
    pub fn fingerprint(&self) -> String {
        let canonical =
            serde_json::to_vec(self).expect("reference tables always serialize to JSON");
        let digest = Sha256::digest(&canonical);
        digest.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// The production seed data
    ///
    /// Staff coefficients and the base-page ladder as shipped in the
    /// provider's seed migrations, at MROT 1 271 000.00. The provider's
    /// merged `standard_srn_qr_mqn` row is fanned out to the four separate
    /// normative types so every enum key resolves.
    pub fn seed() -> Self {
        let complexity = (dec!(1.00), dec!(1.10), dec!(1.20));

        let ladder = [
            (NormativeType::TechnicalRegulation, dec!(4.00)),
            (NormativeType::Shnq, dec!(6.00)),
            (NormativeType::Eurocode, dec!(8.00)),
            (NormativeType::Standard, dec!(10.00)),
            (NormativeType::Srn, dec!(10.00)),
            (NormativeType::Qr, dec!(10.00)),
            (NormativeType::Mqn, dec!(10.00)),
            (NormativeType::MethodicalGuide, dec!(12.00)),
        ];

        let coefficients = ladder
            .into_iter()
            .map(|(normative_type, base)| NormativeCoefficient {
                normative_type,
                new_document_base: base,
                rework_harmonization_base: base + dec!(2.00),
                rework_modification_base: base + dec!(4.00),
                additional_change_base: base + dec!(6.00),
                complexity_level_1: complexity.0,
                complexity_level_2: complexity.1,
                complexity_level_3: complexity.2,
                is_active: true,
            })
            .collect();

        let mrot = dec!(1271000.00);
        let staff_rows = [
            (1, "Loyiha rahbari", dec!(8.41), 1),
            (2, "Yetakchi ilmiy xodim", dec!(6.87), 3),
            (3, "Katta ilmiy xodim", dec!(6.05), 4),
            (4, "Kichik ilmiy xodim", dec!(5.79), 5),
            (5, "Soha ekspertlari", dec!(4.76), 6),
            (6, "Texnik/stajer tadqiqotchi", dec!(4.76), 7),
        ];
        let staff = staff_rows
            .into_iter()
            .map(|(id, name, coefficient, sort_order)| StaffRole {
                id,
                name: name.to_string(),
                coefficient,
                mrot,
                sort_order,
                is_active: true,
            })
            .collect();

        Self {
            coefficients,
            staff,
            categories: Vec::new(),
        }
    }
}
