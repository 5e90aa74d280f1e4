//! The pricing formula: deterministic cost computation
//!
//! ```text
//! staff_total = Σ over roles (employee_count × coefficient × mrot)
//! page_ratio  = total_pages / base_coefficient        (0 if base is 0)
//! final_total = staff_total × page_ratio × complexity × OVERHEAD_MULTIPLIER
//! ```
//!
//! Every operation here is a total function: missing lookups degrade to a
//! zero contribution and nothing panics. The same algorithm runs in the
//! browser for live preview and on the backend for the authoritative
//! recomputation, so this module is the single source of truth both sides
//! implement against.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use crate::models::{
    CalculationInput, CalculationRecord, ComplexityLevel, CostBreakdown, DocumentCategory,
    NormativeCoefficient, StaffLine, StaffRole,
};
use crate::numeric::round_money;
use crate::reference::ReferenceTables;

/// Fixed overhead/markup factor applied to every final total
///
/// Named and overridable (see [`CostCalculator::with_multiplier`]) rather
/// than buried in the formula, so deployments and tests can pin their own
/// value.
pub const OVERHEAD_MULTIPLIER: Decimal = dec!(2.3);

/// Coefficient displayed and persisted when research is mandated
///
/// Informational only: it is NOT folded into the final total. The
/// provider's observed behavior keeps it separate, and that separation is
/// preserved here until product intent says otherwise.
pub const RESEARCH_COEFFICIENT: Decimal = dec!(1.4);

/// Select the base page coefficient for a document category
///
/// Returns zero when the normative type had no active coefficient row;
/// callers treat zero as "uncomputable / zero contribution".
///
/// # Example
/// ```
/// use shnq_costing_core_rs::calculator::select_base_coefficient;
/// use shnq_costing_core_rs::{DocumentCategory, NormativeType, ReferenceTables};
///
/// let tables = ReferenceTables::seed();
/// let row = tables.find_coefficients(NormativeType::Shnq);
/// let base = select_base_coefficient(row, DocumentCategory::New);
/// assert_eq!(base.to_string(), "6.00");
///
/// assert!(select_base_coefficient(None, DocumentCategory::New).is_zero());
/// ```
pub fn select_base_coefficient(
    row: Option<&NormativeCoefficient>,
    category: DocumentCategory,
) -> Decimal {
    match row {
        Some(row) => match category {
            DocumentCategory::New => row.new_document_base,
            DocumentCategory::ReworkHarmonization => row.rework_harmonization_base,
            DocumentCategory::ReworkModification => row.rework_modification_base,
            DocumentCategory::AdditionalChange => row.additional_change_base,
        },
        None => Decimal::ZERO,
    }
}

/// Select the complexity multiplier for a complexity level
///
/// Zero when the normative type had no active coefficient row.
pub fn select_complexity_coefficient(
    row: Option<&NormativeCoefficient>,
    level: ComplexityLevel,
) -> Decimal {
    match row {
        Some(row) => match level {
            ComplexityLevel::Level1 => row.complexity_level_1,
            ComplexityLevel::Level2 => row.complexity_level_2,
            ComplexityLevel::Level3 => row.complexity_level_3,
        },
        None => Decimal::ZERO,
    }
}

/// Resolve the assigned employee count for one role
///
/// Counts are keyed by role id rendered as a string, falling back to the
/// role's display name (the provider accepts both). Absent entries are
/// zero.
pub fn resolve_staff_count(counts: &HashMap<String, u32>, role: &StaffRole) -> u32 {
    counts
        .get(&role.id.to_string())
        .or_else(|| counts.get(&role.name))
        .copied()
        .unwrap_or(0)
}

/// Compute per-role amounts and the staff subtotal
///
/// Per role: `employee_count × coefficient × mrot`. The sum is commutative,
/// so role iteration order cannot change the subtotal. Amounts are carried
/// at full precision; rounding belongs to the snapshot boundary.
///
/// # Example
/// ```
/// use std::collections::HashMap;
/// use rust_decimal_macros::dec;
/// use shnq_costing_core_rs::calculator::compute_staff_total;
/// use shnq_costing_core_rs::StaffRole;
///
/// let role = StaffRole {
///     id: 1,
///     name: "Loyiha rahbari".to_string(),
///     coefficient: dec!(1.2),
///     mrot: dec!(1000000),
///     sort_order: 1,
///     is_active: true,
/// };
/// let counts = HashMap::from([("1".to_string(), 2u32)]);
///
/// let (lines, total) = compute_staff_total([&role], &counts);
/// assert_eq!(total, dec!(2400000));
/// assert_eq!(lines[0].employee_count, 2);
/// ```
pub fn compute_staff_total<'a, I>(
    roles: I,
    counts: &HashMap<String, u32>,
) -> (Vec<StaffLine>, Decimal)
where
    I: IntoIterator<Item = &'a StaffRole>,
{
    let mut lines = Vec::new();
    let mut total = Decimal::ZERO;

    for role in roles {
        let count = resolve_staff_count(counts, role);
        let amount = Decimal::from(count) * role.coefficient * role.mrot;
        total += amount;
        lines.push(StaffLine {
            staff_id: role.id,
            name: role.name.clone(),
            employee_count: count,
            coefficient: role.coefficient,
            mrot: role.mrot,
            amount,
        });
    }

    (lines, total)
}

/// Ratio of the document's pages to the reference page count
///
/// Explicit division-by-zero policy: a non-positive base coefficient
/// yields a zero ratio, never an error.
///
/// # Example
/// ```
/// use rust_decimal_macros::dec;
/// use shnq_costing_core_rs::calculator::compute_page_ratio;
///
/// assert_eq!(compute_page_ratio(200, dec!(100)), dec!(2));
/// assert_eq!(compute_page_ratio(200, dec!(0)), dec!(0));
/// ```
pub fn compute_page_ratio(total_pages: u32, base_coefficient: Decimal) -> Decimal {
    if base_coefficient > Decimal::ZERO {
        Decimal::from(total_pages) / base_coefficient
    } else {
        Decimal::ZERO
    }
}

/// The final amount: product of the four non-negative factors
pub fn compute_final_total(
    staff_total: Decimal,
    page_ratio: Decimal,
    complexity_coefficient: Decimal,
    multiplier: Decimal,
) -> Decimal {
    staff_total * page_ratio * complexity_coefficient * multiplier
}

/// Display/persistence coefficient for the research flag: 1.4 or 1.0
pub fn research_coefficient(is_research_required: bool) -> Decimal {
    if is_research_required {
        RESEARCH_COEFFICIENT
    } else {
        Decimal::ONE
    }
}

/// Runs the full pricing pipeline against a reference-table snapshot
///
/// # Example
///
/// Scenario: base coefficient 100, complexity 1.5, 200 pages, one role
/// with two employees at coefficient 1.2 and MROT 1 000 000.
///
/// ```
/// use rust_decimal_macros::dec;
/// use shnq_costing_core_rs::{
///     CalculationInput, ComplexityLevel, CostCalculator, DocumentCategory,
///     NormativeCoefficient, NormativeType, ReferenceTables, StaffRole,
/// };
///
/// let tables = ReferenceTables::new(
///     vec![NormativeCoefficient {
///         normative_type: NormativeType::Shnq,
///         new_document_base: dec!(100),
///         rework_harmonization_base: dec!(120),
///         rework_modification_base: dec!(140),
///         additional_change_base: dec!(160),
///         complexity_level_1: dec!(1.5),
///         complexity_level_2: dec!(1.6),
///         complexity_level_3: dec!(1.7),
///         is_active: true,
///     }],
///     vec![StaffRole {
///         id: 1,
///         name: "Loyiha rahbari".to_string(),
///         coefficient: dec!(1.2),
///         mrot: dec!(1000000),
///         sort_order: 1,
///         is_active: true,
///     }],
///     vec![],
/// );
///
/// let calc = CostCalculator::new(tables);
/// let input = CalculationInput::new(
///     "Test document",
///     NormativeType::Shnq,
///     DocumentCategory::New,
///     ComplexityLevel::Level1,
///     200,
/// )
/// .with_staff_count("1", 2);
///
/// let breakdown = calc.calculate(&input);
/// assert_eq!(breakdown.staff_total_amount, dec!(2400000));
/// assert_eq!(breakdown.page_ratio, dec!(2));
/// assert_eq!(breakdown.final_total_amount, dec!(16560000));
/// ```
#[derive(Debug, Clone)]
pub struct CostCalculator {
    tables: ReferenceTables,
    multiplier: Decimal,
}

impl CostCalculator {
    /// Create a calculator over a table snapshot with the standard
    /// [`OVERHEAD_MULTIPLIER`]
    pub fn new(tables: ReferenceTables) -> Self {
        Self {
            tables,
            multiplier: OVERHEAD_MULTIPLIER,
        }
    }

    /// Override the overhead multiplier (per-deployment configuration)
    pub fn with_multiplier(mut self, multiplier: Decimal) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// The reference-table snapshot this calculator reads from
    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// The overhead multiplier in force
    pub fn multiplier(&self) -> Decimal {
        self.multiplier
    }

    /// Compute the full breakdown for the current input state
    ///
    /// Pure and synchronous; safe to call on every keystroke. All figures
    /// are carried at full precision.
    pub fn calculate(&self, input: &CalculationInput) -> CostBreakdown {
        let row = self.tables.find_coefficients(input.normative_type);
        let base_coefficient = select_base_coefficient(row, input.document_category);
        let complexity_coefficient = select_complexity_coefficient(row, input.complexity_level);

        let (staff_lines, staff_total_amount) =
            compute_staff_total(self.tables.staff_roles(), &input.staff_counts);
        let page_ratio = compute_page_ratio(input.total_pages, base_coefficient);
        let final_total_amount = compute_final_total(
            staff_total_amount,
            page_ratio,
            complexity_coefficient,
            self.multiplier,
        );

        CostBreakdown {
            base_coefficient,
            complexity_coefficient,
            page_ratio,
            research_coefficient: research_coefficient(input.is_research_required),
            staff_lines,
            staff_total_amount,
            final_total_amount,
        }
    }

    /// Produce the persistence snapshot for a save operation
    ///
    /// This is the boundary where money rounding applies: staff line
    /// amounts are rounded per line, the staff total is the sum of the
    /// rounded lines, and the final total is recomputed from that rounded
    /// subtotal. This is bit-for-bit what the authoritative backend stores.
    ///
    /// `created_at` is supplied by the caller so the snapshot itself stays
    /// deterministic; only the record id is freshly generated.
    pub fn snapshot(&self, input: &CalculationInput, created_at: DateTime<Utc>) -> CalculationRecord {
        let breakdown = self.calculate(input);

        let staff_snapshot: Vec<StaffLine> = breakdown
            .staff_lines
            .into_iter()
            .map(|line| StaffLine {
                amount: round_money(line.amount),
                ..line
            })
            .collect();
        let staff_total_amount: Decimal = staff_snapshot.iter().map(|l| l.amount).sum();

        let final_total_amount = round_money(compute_final_total(
            staff_total_amount,
            breakdown.page_ratio,
            breakdown.complexity_coefficient,
            self.multiplier,
        ));

        CalculationRecord {
            id: Uuid::new_v4(),
            name: input.name.clone(),
            total_pages: input.total_pages,
            normative_type: input.normative_type,
            document_category: input.document_category,
            complexity_level: input.complexity_level,
            is_research_required: input.is_research_required,
            calculation_category: input.calculation_category,
            selected_base_coefficient: breakdown.base_coefficient,
            selected_complexity_coefficient: breakdown.complexity_coefficient,
            research_coefficient: breakdown.research_coefficient,
            staff_snapshot,
            staff_total_amount: round_money(staff_total_amount),
            final_total_amount,
            completed_amount: round_money(input.completed_amount),
            planned_amount: round_money(input.planned_amount),
            development_deadline: input.development_deadline.clone(),
            executor_organization: input.executor_organization.clone(),
            notes: input.notes.clone(),
            reference_fingerprint: self.tables.fingerprint(),
            created_at,
        }
    }
}
