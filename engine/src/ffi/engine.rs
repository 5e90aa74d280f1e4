//! PyO3 wrapper for the cost calculator
//!
//! This is the entry point the Django backend uses to delegate the
//! authoritative recomputation to Rust instead of re-implementing the
//! formula in Python.

use chrono::{DateTime, Utc};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{
    breakdown_to_py, parse_calculation_input, parse_reference_tables, record_to_py,
};
use crate::calculator::CostCalculator;
use crate::numeric::parse_lenient_decimal;
use crate::reference::ReferenceTables;

/// Python wrapper for the cost calculator
///
/// # Example (from Python)
///
/// ```python
/// from shnq_costing_core_rs import CostingEngine
///
/// engine = CostingEngine()  # seed reference data
/// result = engine.calculate({
///     "name": "SHNQ 2.01.03",
///     "normative_type": "shnq",
///     "document_category": "new",
///     "complexity_level": "1",
///     "total_pages": 120,
///     "staff_counts": {"1": 2},
/// })
/// print(result["final_total_amount"])
/// ```
#[pyclass(name = "CostingEngine")]
pub struct PyCostingEngine {
    inner: CostCalculator,
}

#[pymethods]
impl PyCostingEngine {
    /// Create an engine over a reference-table dict
    ///
    /// With no arguments the production seed tables are used. An explicit
    /// `multiplier` (string or number) overrides the standard overhead
    /// multiplier.
    #[new]
    #[pyo3(signature = (tables=None, multiplier=None))]
    fn new(
        tables: Option<&Bound<'_, PyDict>>,
        multiplier: Option<&Bound<'_, PyAny>>,
    ) -> PyResult<Self> {
        let tables = match tables {
            Some(dict) => parse_reference_tables(dict)?,
            None => ReferenceTables::seed(),
        };

        let mut inner = CostCalculator::new(tables);
        if let Some(value) = multiplier {
            let raw = value.str()?.to_string();
            let value = parse_lenient_decimal(&raw);
            if value.is_zero() {
                return Err(PyValueError::new_err(format!(
                    "Multiplier '{raw}' is not a positive number"
                )));
            }
            inner = inner.with_multiplier(value);
        }

        Ok(Self { inner })
    }

    /// Run the full pipeline; returns the breakdown at full precision
    fn calculate<'py>(
        &self,
        py: Python<'py>,
        input: &Bound<'py, PyDict>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let input = parse_calculation_input(input)?;
        breakdown_to_py(py, &self.inner.calculate(&input))
    }

    /// Produce the rounded persistence snapshot
    ///
    /// `created_at` is an RFC 3339 timestamp; omitted means "now".
    #[pyo3(signature = (input, created_at=None))]
    fn snapshot<'py>(
        &self,
        py: Python<'py>,
        input: &Bound<'py, PyDict>,
        created_at: Option<String>,
    ) -> PyResult<Bound<'py, PyDict>> {
        let input = parse_calculation_input(input)?;
        let created_at = match created_at {
            Some(raw) => DateTime::parse_from_rfc3339(&raw)
                .map_err(|e| PyValueError::new_err(format!("Invalid created_at '{raw}': {e}")))?
                .with_timezone(&Utc),
            None => Utc::now(),
        };
        record_to_py(py, &self.inner.snapshot(&input, created_at))
    }

    /// Pre-submission validation; raises `ValueError` on missing lookups
    /// or an invalid page count
    fn validate(&self, input: &Bound<'_, PyDict>) -> PyResult<()> {
        let input = parse_calculation_input(input)?;
        self.inner
            .tables()
            .validate_input(&input)
            .map_err(|e| PyValueError::new_err(e.to_string()))
    }

    /// Fingerprint of the reference tables this engine computes against
    fn reference_fingerprint(&self) -> String {
        self.inner.tables().fingerprint()
    }

    /// The overhead multiplier in force, as a string
    fn multiplier(&self) -> String {
        self.inner.multiplier().to_string()
    }
}
