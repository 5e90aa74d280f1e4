//! Aggregation for dashboards and the printable budget report
//!
//! Pure functions over a slice of persisted calculation records. Rendering
//! (HTML, print sheets, XLSX export) is the UI's business; this module only
//! produces the numbers. The current time is always passed in explicitly so
//! the aggregation stays deterministic and testable; bucketing is done in
//! UTC.

use chrono::{DateTime, Datelike, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CalculationRecord, DocumentCategory, NormativeType};

/// Uzbek month abbreviations used by the trend chart
const MONTH_LABELS: [&str; 12] = [
    "Yan", "Fev", "Mar", "Apr", "May", "Iyun", "Iyul", "Avg", "Sen", "Okt", "Noy", "Dek",
];

/// How many records the "latest calculations" panel shows
const LATEST_LIMIT: usize = 5;

/// How many calendar months the trend covers, including the current one
const TREND_MONTHS: u32 = 6;

/// Grand totals across all records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total_documents: usize,
    pub total_amount: Decimal,
}

/// Per-normative-type dashboard row
///
/// One row per known normative type, zero-filled for types with no records
/// so the dashboard table always has a stable shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeStat {
    pub normative_type: NormativeType,
    pub label: String,
    pub count: usize,
    pub this_month_count: usize,
    pub total_amount: Decimal,
}

/// One bucket of the monthly trend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// `YYYY-MM`
    pub key: String,
    /// Month abbreviation for the chart axis
    pub label: String,
    pub count: usize,
}

/// Row of the "latest calculations" panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestEntry {
    pub id: Uuid,
    pub name: String,
    pub normative_type: NormativeType,
    pub document_category: DocumentCategory,
    pub final_total_amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Everything the dashboard page needs in one payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub totals: DashboardTotals,
    pub types: Vec<TypeStat>,
    pub trend_last_6_months: Vec<TrendPoint>,
    pub latest_calculations: Vec<LatestEntry>,
}

/// Compute the dashboard payload from persisted records
///
/// # Example
/// ```
/// use chrono::{TimeZone, Utc};
/// use shnq_costing_core_rs::reports::dashboard_stats;
///
/// let now = Utc.with_ymd_and_hms(2026, 3, 15, 12, 0, 0).unwrap();
/// let stats = dashboard_stats(&[], now);
/// assert_eq!(stats.totals.total_documents, 0);
/// assert_eq!(stats.types.len(), 8);
/// assert_eq!(stats.trend_last_6_months.len(), 6);
/// assert_eq!(stats.trend_last_6_months[0].key, "2025-10");
/// assert_eq!(stats.trend_last_6_months[5].key, "2026-03");
/// ```
pub fn dashboard_stats(records: &[CalculationRecord], now: DateTime<Utc>) -> DashboardStats {
    let month_start = start_of_month(now.year(), now.month());

    let types = NormativeType::ALL
        .iter()
        .map(|&ty| {
            let of_type = records.iter().filter(|r| r.normative_type == ty);
            let mut count = 0;
            let mut this_month_count = 0;
            let mut total_amount = Decimal::ZERO;
            for record in of_type {
                count += 1;
                total_amount += record.final_total_amount;
                if record.created_at >= month_start {
                    this_month_count += 1;
                }
            }
            TypeStat {
                normative_type: ty,
                label: ty.label().to_string(),
                count,
                this_month_count,
                total_amount,
            }
        })
        .collect();

    let trend_last_6_months = (0..TREND_MONTHS)
        .rev()
        .map(|offset| {
            let (year, month) = shift_month(now.year(), now.month(), offset);
            let count = records
                .iter()
                .filter(|r| r.created_at.year() == year && r.created_at.month() == month)
                .count();
            TrendPoint {
                key: format!("{year:04}-{month:02}"),
                label: MONTH_LABELS[(month - 1) as usize].to_string(),
                count,
            }
        })
        .collect();

    let mut by_recency: Vec<&CalculationRecord> = records.iter().collect();
    by_recency.sort_by_key(|r| std::cmp::Reverse(r.created_at));
    let latest_calculations = by_recency
        .into_iter()
        .take(LATEST_LIMIT)
        .map(|r| LatestEntry {
            id: r.id,
            name: r.name.clone(),
            normative_type: r.normative_type,
            document_category: r.document_category,
            final_total_amount: r.final_total_amount,
            created_at: r.created_at,
        })
        .collect();

    DashboardStats {
        totals: DashboardTotals {
            total_documents: records.len(),
            total_amount: records.iter().map(|r| r.final_total_amount).sum(),
        },
        types,
        trend_last_6_months,
        latest_calculations,
    }
}

/// Row of the printable state-budget report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReportRow {
    pub name: String,
    pub final_total_amount: Decimal,
    pub completed_amount: Decimal,
    pub planned_amount: Decimal,
    pub development_deadline: String,
    pub executor_organization: String,
    pub notes: String,
}

/// The printable report: per-document rows plus grand totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetReport {
    pub rows: Vec<BudgetReportRow>,
    pub total_amount: Decimal,
    pub total_completed: Decimal,
    pub total_planned: Decimal,
}

/// Build the budget report rows in record order
pub fn budget_report(records: &[CalculationRecord]) -> BudgetReport {
    let rows: Vec<BudgetReportRow> = records
        .iter()
        .map(|r| BudgetReportRow {
            name: r.name.clone(),
            final_total_amount: r.final_total_amount,
            completed_amount: r.completed_amount,
            planned_amount: r.planned_amount,
            development_deadline: r.development_deadline.clone(),
            executor_organization: r.executor_organization.clone(),
            notes: r.notes.clone(),
        })
        .collect();

    BudgetReport {
        total_amount: rows.iter().map(|r| r.final_total_amount).sum(),
        total_completed: rows.iter().map(|r| r.completed_amount).sum(),
        total_planned: rows.iter().map(|r| r.planned_amount).sum(),
        rows,
    }
}

/// First instant of a calendar month in UTC
fn start_of_month(year: i32, month: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0)
        .single()
        .expect("first of month is a valid UTC timestamp")
}

/// Walk a (year, month) pair back by `months_back` calendar months
fn shift_month(year: i32, month: u32, months_back: u32) -> (i32, u32) {
    let total = year as i64 * 12 + (month as i64 - 1) - months_back as i64;
    let year = (total.div_euclid(12)) as i32;
    let month = (total.rem_euclid(12) + 1) as u32;
    (year, month)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shift_month_crosses_year_boundary() {
        assert_eq!(shift_month(2026, 2, 0), (2026, 2));
        assert_eq!(shift_month(2026, 2, 1), (2026, 1));
        assert_eq!(shift_month(2026, 2, 2), (2025, 12));
        assert_eq!(shift_month(2026, 2, 14), (2024, 12));
    }
}
