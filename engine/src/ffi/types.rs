//! Type conversion utilities for the FFI boundary
//!
//! Converts between plain Python dicts and the engine's domain types.
//! Numeric fields are parsed with the same lenient policy the rest of the
//! engine uses (comma decimal separators accepted, garbage coerces to
//! zero); structural problems such as missing required fields or unknown
//! enum keys raise `ValueError` with the offending field named.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};
use rust_decimal::Decimal;
use std::collections::HashMap;

use crate::models::{
    CalculationCategory, CalculationInput, CalculationRecord, ComplexityLevel, CostBreakdown,
    DocumentCategory, NormativeCoefficient, NormativeType, StaffLine, StaffRole,
};
use crate::numeric::{parse_lenient_count, parse_lenient_decimal};
use crate::reference::ReferenceTables;

// ========================================================================
// Dict extraction helpers
// ========================================================================

/// Extract a required field, naming it in the error on failure
fn extract_required<'py, T: FromPyObject<'py>>(
    dict: &Bound<'py, PyDict>,
    key: &str,
) -> PyResult<T> {
    dict.get_item(key)?
        .ok_or_else(|| PyValueError::new_err(format!("Missing required field '{key}'")))?
        .extract()
        .map_err(|_| PyValueError::new_err(format!("Field '{key}' has an unexpected type")))
}

/// Extract a field, falling back to a default when missing
fn extract_with_default<'py, T: FromPyObject<'py>>(
    dict: &Bound<'py, PyDict>,
    key: &str,
    default: T,
) -> PyResult<T> {
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => value
            .extract()
            .map_err(|_| PyValueError::new_err(format!("Field '{key}' has an unexpected type"))),
        _ => Ok(default),
    }
}

/// Read a decimal field leniently: strings, ints and floats all work,
/// missing or unparseable values coerce to zero
fn extract_decimal(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Decimal> {
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => {
            let text = value.str()?.to_string();
            Ok(parse_lenient_decimal(&text))
        }
        _ => Ok(Decimal::ZERO),
    }
}

/// Read an enum key field and map it through a parser
fn extract_keyed<T>(
    dict: &Bound<'_, PyDict>,
    key: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> PyResult<T> {
    let raw: String = extract_required(dict, key)?;
    parse(&raw).ok_or_else(|| PyValueError::new_err(format!("Unknown {key} '{raw}'")))
}

// ========================================================================
// Inbound conversions
// ========================================================================

/// Parse a reference-table snapshot from a Python dict
///
/// Expected shape:
/// ```python
/// {
///     "coefficients": [{"normative_type": "shnq", "new_document_base": "6.00", ...}],
///     "staff": [{"id": 1, "name": "...", "coefficient": "8.41", "mrot": "1271000.00"}],
///     "categories": [{"id": 1, "name": "..."}],   # optional
/// }
/// ```
pub fn parse_reference_tables(dict: &Bound<'_, PyDict>) -> PyResult<ReferenceTables> {
    let mut coefficients = Vec::new();
    if let Some(rows) = dict.get_item("coefficients")? {
        for row in rows.downcast::<PyList>()?.iter() {
            coefficients.push(parse_coefficient_row(row.downcast::<PyDict>()?)?);
        }
    }

    let mut staff = Vec::new();
    if let Some(rows) = dict.get_item("staff")? {
        for row in rows.downcast::<PyList>()?.iter() {
            staff.push(parse_staff_role(row.downcast::<PyDict>()?)?);
        }
    }

    let mut categories = Vec::new();
    if let Some(rows) = dict.get_item("categories")? {
        for row in rows.downcast::<PyList>()?.iter() {
            let row = row.downcast::<PyDict>()?;
            categories.push(CalculationCategory {
                id: extract_required(row, "id")?,
                name: extract_required(row, "name")?,
            });
        }
    }

    Ok(ReferenceTables::new(coefficients, staff, categories))
}

fn parse_coefficient_row(dict: &Bound<'_, PyDict>) -> PyResult<NormativeCoefficient> {
    Ok(NormativeCoefficient {
        normative_type: extract_keyed(dict, "normative_type", NormativeType::from_key)?,
        new_document_base: extract_decimal(dict, "new_document_base")?,
        rework_harmonization_base: extract_decimal(dict, "rework_harmonization_base")?,
        rework_modification_base: extract_decimal(dict, "rework_modification_base")?,
        additional_change_base: extract_decimal(dict, "additional_change_base")?,
        complexity_level_1: extract_decimal(dict, "complexity_level_1")?,
        complexity_level_2: extract_decimal(dict, "complexity_level_2")?,
        complexity_level_3: extract_decimal(dict, "complexity_level_3")?,
        is_active: extract_with_default(dict, "is_active", true)?,
    })
}

fn parse_staff_role(dict: &Bound<'_, PyDict>) -> PyResult<StaffRole> {
    Ok(StaffRole {
        id: extract_required(dict, "id")?,
        name: extract_required(dict, "name")?,
        coefficient: extract_decimal(dict, "coefficient")?,
        mrot: extract_decimal(dict, "mrot")?,
        sort_order: extract_with_default(dict, "sort_order", 1)?,
        is_active: extract_with_default(dict, "is_active", true)?,
    })
}

/// Parse a document calculation input from a Python dict
pub fn parse_calculation_input(dict: &Bound<'_, PyDict>) -> PyResult<CalculationInput> {
    let mut input = CalculationInput::new(
        extract_required::<String>(dict, "name")?,
        extract_keyed(dict, "normative_type", NormativeType::from_key)?,
        extract_keyed(dict, "document_category", DocumentCategory::from_key)?,
        extract_keyed(dict, "complexity_level", ComplexityLevel::from_key)?,
        extract_required(dict, "total_pages")?,
    );

    input.is_research_required = extract_with_default(dict, "is_research_required", false)?;
    input.calculation_category = extract_with_default(dict, "calculation_category", None)?;
    input.completed_amount = extract_decimal(dict, "completed_amount")?;
    input.planned_amount = extract_decimal(dict, "planned_amount")?;
    input.development_deadline =
        extract_with_default(dict, "development_deadline", String::new())?;
    input.executor_organization =
        extract_with_default(dict, "executor_organization", String::new())?;
    input.notes = extract_with_default(dict, "notes", String::new())?;

    if let Some(counts) = dict.get_item("staff_counts")? {
        input.staff_counts = parse_staff_counts(counts.downcast::<PyDict>()?)?;
    }

    Ok(input)
}

/// Counts arrive keyed by role id or role name; values may be ints or
/// strings, coerced with the lenient count policy
fn parse_staff_counts(dict: &Bound<'_, PyDict>) -> PyResult<HashMap<String, u32>> {
    let mut counts = HashMap::new();
    for (key, value) in dict.iter() {
        let key = key.str()?.to_string();
        let count = match value.extract::<u32>() {
            Ok(n) => n,
            Err(_) => parse_lenient_count(&value.str()?.to_string()),
        };
        counts.insert(key, count);
    }
    Ok(counts)
}

// ========================================================================
// Outbound conversions
// ========================================================================

fn staff_line_to_py<'py>(py: Python<'py>, line: &StaffLine) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("staff_id", line.staff_id)?;
    dict.set_item("name", &line.name)?;
    dict.set_item("employee_count", line.employee_count)?;
    dict.set_item("coefficient", line.coefficient.to_string())?;
    dict.set_item("mrot", line.mrot.to_string())?;
    dict.set_item("amount", line.amount.to_string())?;
    Ok(dict)
}

fn staff_lines_to_py<'py>(py: Python<'py>, lines: &[StaffLine]) -> PyResult<Bound<'py, PyList>> {
    let list = PyList::empty_bound(py);
    for line in lines {
        list.append(staff_line_to_py(py, line)?)?;
    }
    Ok(list)
}

/// Convert a live breakdown to a Python dict (money as strings)
pub fn breakdown_to_py<'py>(
    py: Python<'py>,
    breakdown: &CostBreakdown,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("base_coefficient", breakdown.base_coefficient.to_string())?;
    dict.set_item(
        "complexity_coefficient",
        breakdown.complexity_coefficient.to_string(),
    )?;
    dict.set_item("page_ratio", breakdown.page_ratio.to_string())?;
    dict.set_item(
        "research_coefficient",
        breakdown.research_coefficient.to_string(),
    )?;
    dict.set_item("staff_lines", staff_lines_to_py(py, &breakdown.staff_lines)?)?;
    dict.set_item(
        "staff_total_amount",
        breakdown.staff_total_amount.to_string(),
    )?;
    dict.set_item(
        "final_total_amount",
        breakdown.final_total_amount.to_string(),
    )?;
    Ok(dict)
}

/// Convert a persistence snapshot to a Python dict (money as strings)
pub fn record_to_py<'py>(
    py: Python<'py>,
    record: &CalculationRecord,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("id", record.id.to_string())?;
    dict.set_item("name", &record.name)?;
    dict.set_item("total_pages", record.total_pages)?;
    dict.set_item("normative_type", record.normative_type.key())?;
    dict.set_item("document_category", record.document_category.key())?;
    dict.set_item("complexity_level", record.complexity_level.key())?;
    dict.set_item("is_research_required", record.is_research_required)?;
    dict.set_item("calculation_category", record.calculation_category)?;
    dict.set_item(
        "selected_base_coefficient",
        record.selected_base_coefficient.to_string(),
    )?;
    dict.set_item(
        "selected_complexity_coefficient",
        record.selected_complexity_coefficient.to_string(),
    )?;
    dict.set_item(
        "research_coefficient",
        record.research_coefficient.to_string(),
    )?;
    dict.set_item("staff_snapshot", staff_lines_to_py(py, &record.staff_snapshot)?)?;
    dict.set_item("staff_total_amount", record.staff_total_amount.to_string())?;
    dict.set_item("final_total_amount", record.final_total_amount.to_string())?;
    dict.set_item("completed_amount", record.completed_amount.to_string())?;
    dict.set_item("planned_amount", record.planned_amount.to_string())?;
    dict.set_item("development_deadline", &record.development_deadline)?;
    dict.set_item("executor_organization", &record.executor_organization)?;
    dict.set_item("notes", &record.notes)?;
    dict.set_item("reference_fingerprint", &record.reference_fingerprint)?;
    dict.set_item("created_at", record.created_at.to_rfc3339())?;
    Ok(dict)
}
