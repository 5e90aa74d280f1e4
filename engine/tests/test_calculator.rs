//! Tests for the pricing formula operations
//!
//! Scenario values mirror the worked examples the frontend and backend are
//! both validated against.

use std::collections::HashMap;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shnq_costing_core_rs::{
    calculator, CalculationInput, ComplexityLevel, CostCalculator, DocumentCategory,
    NormativeCoefficient, NormativeType, ReferenceTables, StaffRole,
};

fn scenario_tables() -> ReferenceTables {
    ReferenceTables::new(
        vec![NormativeCoefficient {
            normative_type: NormativeType::Shnq,
            new_document_base: dec!(100),
            rework_harmonization_base: dec!(120),
            rework_modification_base: dec!(140),
            additional_change_base: dec!(160),
            complexity_level_1: dec!(1.5),
            complexity_level_2: dec!(1.6),
            complexity_level_3: dec!(1.7),
            is_active: true,
        }],
        vec![StaffRole {
            id: 1,
            name: "Loyiha rahbari".to_string(),
            coefficient: dec!(1.2),
            mrot: dec!(1000000),
            sort_order: 1,
            is_active: true,
        }],
        vec![],
    )
}

fn scenario_input() -> CalculationInput {
    CalculationInput::new(
        "Scenario document",
        NormativeType::Shnq,
        DocumentCategory::New,
        ComplexityLevel::Level1,
        200,
    )
    .with_staff_count("1", 2)
}

#[test]
fn scenario_a_full_pipeline() {
    let calc = CostCalculator::new(scenario_tables());
    let breakdown = calc.calculate(&scenario_input());

    assert_eq!(breakdown.base_coefficient, dec!(100));
    assert_eq!(breakdown.complexity_coefficient, dec!(1.5));
    assert_eq!(breakdown.staff_total_amount, dec!(2400000));
    assert_eq!(breakdown.page_ratio, dec!(2));
    assert_eq!(breakdown.final_total_amount, dec!(16560000));
}

#[test]
fn scenario_b_missing_lookup_degrades_to_zero() {
    // Same input, but the table snapshot has no row for this type
    let tables = ReferenceTables::new(vec![], scenario_tables().staff, vec![]);
    let calc = CostCalculator::new(tables);
    let breakdown = calc.calculate(&scenario_input());

    assert_eq!(breakdown.base_coefficient, Decimal::ZERO);
    assert_eq!(breakdown.complexity_coefficient, Decimal::ZERO);
    assert_eq!(breakdown.page_ratio, Decimal::ZERO);
    assert_eq!(breakdown.final_total_amount, Decimal::ZERO);
    // Staff subtotal is still computable on its own
    assert_eq!(breakdown.staff_total_amount, dec!(2400000));
}

#[test]
fn scenario_c_research_flag_never_changes_the_total() {
    let calc = CostCalculator::new(scenario_tables());
    let plain = calc.calculate(&scenario_input());
    let with_research = calc.calculate(&scenario_input().with_research_required(true));

    assert_eq!(plain.research_coefficient, dec!(1.0));
    assert_eq!(with_research.research_coefficient, dec!(1.4));
    assert_eq!(
        with_research.final_total_amount,
        plain.final_total_amount,
        "research coefficient must stay display-only"
    );
}

#[test]
fn base_coefficient_follows_document_category() {
    let tables = scenario_tables();
    let row = tables.find_coefficients(NormativeType::Shnq);

    let cases = [
        (DocumentCategory::New, dec!(100)),
        (DocumentCategory::ReworkHarmonization, dec!(120)),
        (DocumentCategory::ReworkModification, dec!(140)),
        (DocumentCategory::AdditionalChange, dec!(160)),
    ];
    for (category, expected) in cases {
        assert_eq!(
            calculator::select_base_coefficient(row, category),
            expected,
            "category {category:?}"
        );
    }
}

#[test]
fn complexity_coefficient_follows_level() {
    let tables = scenario_tables();
    let row = tables.find_coefficients(NormativeType::Shnq);

    assert_eq!(
        calculator::select_complexity_coefficient(row, ComplexityLevel::Level1),
        dec!(1.5)
    );
    assert_eq!(
        calculator::select_complexity_coefficient(row, ComplexityLevel::Level2),
        dec!(1.6)
    );
    assert_eq!(
        calculator::select_complexity_coefficient(row, ComplexityLevel::Level3),
        dec!(1.7)
    );
    assert_eq!(
        calculator::select_complexity_coefficient(None, ComplexityLevel::Level3),
        Decimal::ZERO
    );
}

#[test]
fn page_ratio_zero_base_is_zero_not_an_error() {
    assert_eq!(calculator::compute_page_ratio(200, Decimal::ZERO), Decimal::ZERO);
    assert_eq!(calculator::compute_page_ratio(0, dec!(100)), Decimal::ZERO);
    assert_eq!(calculator::compute_page_ratio(150, dec!(100)), dec!(1.5));
}

#[test]
fn staff_counts_resolve_by_id_then_name() {
    let tables = scenario_tables();
    let roles = tables.staff_roles();

    // Keyed by id
    let by_id = HashMap::from([("1".to_string(), 3u32)]);
    let (_, total) = calculator::compute_staff_total(roles.clone(), &by_id);
    assert_eq!(total, dec!(3600000));

    // Keyed by display name
    let by_name = HashMap::from([("Loyiha rahbari".to_string(), 3u32)]);
    let (_, total) = calculator::compute_staff_total(roles.clone(), &by_name);
    assert_eq!(total, dec!(3600000));

    // Unknown keys are ignored, absent roles count zero
    let unknown = HashMap::from([("99".to_string(), 3u32)]);
    let (lines, total) = calculator::compute_staff_total(roles, &unknown);
    assert_eq!(total, Decimal::ZERO);
    assert_eq!(lines[0].employee_count, 0);
}

#[test]
fn zero_count_roles_contribute_nothing() {
    let role = StaffRole {
        id: 7,
        name: "Soha ekspertlari".to_string(),
        coefficient: dec!(999.99),
        mrot: dec!(1271000.00),
        sort_order: 1,
        is_active: true,
    };
    let (lines, total) = calculator::compute_staff_total([&role], &HashMap::new());
    assert_eq!(total, Decimal::ZERO);
    assert_eq!(lines[0].amount, Decimal::ZERO);
}

#[test]
fn multiplier_is_a_named_overridable_constant() {
    assert_eq!(calculator::OVERHEAD_MULTIPLIER, dec!(2.3));

    let calc = CostCalculator::new(scenario_tables()).with_multiplier(dec!(1.0));
    let breakdown = calc.calculate(&scenario_input());
    // 2,400,000 × 2 × 1.5 × 1.0
    assert_eq!(breakdown.final_total_amount, dec!(7200000));
}

#[test]
fn research_coefficient_values() {
    assert_eq!(calculator::research_coefficient(true), dec!(1.4));
    assert_eq!(calculator::research_coefficient(false), dec!(1.0));
}

#[test]
fn inactive_coefficient_row_is_a_missing_lookup() {
    let mut tables = scenario_tables();
    tables.coefficients[0].is_active = false;
    let calc = CostCalculator::new(tables);
    let breakdown = calc.calculate(&scenario_input());
    assert_eq!(breakdown.final_total_amount, Decimal::ZERO);
}

#[test]
fn seed_tables_worked_example() {
    // SHNQ, new document, 12 pages, one project lead:
    // staff = 8.41 × 1,271,000 = 10,689,110
    // ratio = 12 / 6 = 2; final = 10,689,110 × 2 × 1.00 × 2.3
    let calc = CostCalculator::new(ReferenceTables::seed());
    let input = CalculationInput::new(
        "SHNQ example",
        NormativeType::Shnq,
        DocumentCategory::New,
        ComplexityLevel::Level1,
        12,
    )
    .with_staff_count("1", 1);

    let breakdown = calc.calculate(&input);
    assert_eq!(breakdown.staff_total_amount, dec!(10689110));
    assert_eq!(breakdown.page_ratio, dec!(2));
    assert_eq!(breakdown.final_total_amount, dec!(49169906));
}
