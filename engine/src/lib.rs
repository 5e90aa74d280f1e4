//! SHNQ Costing Core - Rust Engine
//!
//! Deterministic development-cost calculation for construction normative
//! documents (SHNQ, eurocodes, technical regulations and friends). This
//! crate is the canonical implementation of the pricing formula that the
//! web frontend previews live and the backend re-validates on save; both
//! sides must agree bit-for-bit, so the algorithm lives here once.
//!
//! # Architecture
//!
//! - **models**: Domain types (reference data, calculation input/output)
//! - **reference**: Read-only lookup-table snapshot + seed data
//! - **calculator**: The pricing formula (pure, total functions)
//! - **numeric**: Lenient decimal parsing and the money rounding policy
//! - **reports**: Dashboard and budget-report aggregation
//!
//! # Critical Invariants
//!
//! 1. All money values and coefficients are `rust_decimal::Decimal`
//! 2. The final total is a pure function of the input and the table
//!    snapshot: no hidden state, no I/O, no clock access
//! 3. Missing lookups degrade to zero contributions; nothing panics
//! 4. Rounding happens only at the snapshot/persistence boundary
//! 5. FFI boundary is minimal and safe

// Module declarations
pub mod calculator;
pub mod models;
pub mod numeric;
pub mod reference;
pub mod reports;

// Re-exports for convenience
pub use calculator::{
    compute_final_total, compute_page_ratio, compute_staff_total, research_coefficient,
    select_base_coefficient, select_complexity_coefficient, CostCalculator, OVERHEAD_MULTIPLIER,
    RESEARCH_COEFFICIENT,
};
pub use models::{
    CalculationCategory, CalculationInput, CalculationRecord, ComplexityLevel, CostBreakdown,
    DocumentCategory, NormativeCoefficient, NormativeType, StaffLine, StaffRole,
};
pub use reference::{ReferenceTables, ValidationError};
pub use reports::{budget_report, dashboard_stats, BudgetReport, DashboardStats};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn shnq_costing_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::PyCostingEngine>()?;
    Ok(())
}
